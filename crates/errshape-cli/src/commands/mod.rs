//! Command implementations.

pub mod group;
pub mod normalize;
pub mod stages;
