//! Configuration loading from file and environment variables.
//!
//! Priority: environment variables > config file > defaults.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ERRSHAPE_CONFIG";
/// Environment variable overriding `log_level`.
pub const LOG_LEVEL_ENV: &str = "ERRSHAPE_LOG_LEVEL";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "errshape.toml";

/// Error returned when configuration cannot be loaded.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid TOML for [`CliConfig`].
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// How `group` splits its input into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordSeparator {
    /// One record per non-blank line.
    #[default]
    Line,
    /// Records are blocks separated by blank lines, so stack traces stay
    /// attached to their message.
    BlankLine,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GroupConfig {
    pub min_count: u64,
    pub record_separator: RecordSeparator,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            min_count: 1,
            record_separator: RecordSeparator::Line,
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub group: GroupConfig,
    /// Detector name to replacement pattern.
    pub detectors: BTreeMap<String, String>,
    /// File the configuration was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            group: GroupConfig::default(),
            detectors: BTreeMap::new(),
            source: None,
        }
    }
}

impl CliConfig {
    /// Loads configuration from `explicit`, else `ERRSHAPE_CONFIG`, else
    /// `errshape.toml` in the working directory, else defaults. Explicit
    /// paths must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let requested = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match requested {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                Self::from_file(&path)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env();
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Environment variables override file settings.
    fn apply_env(&mut self) {
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            self.log_level = level;
        }
    }
}
