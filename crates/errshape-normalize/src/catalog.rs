//! Built-in detector catalog.
//!
//! Detectors are defined here grouped by category; [`PIPELINE_ORDER`] is the
//! separate, versioned order in which they are applied. Grammars may be
//! tuned (or overridden at build time), but every detector keeps its
//! placeholder and its position.
//!
//! Ordering rules encoded in [`PIPELINE_ORDER`]:
//! - structured tokens (URL, JWT, UUID, timestamps) run before anything
//!   that could fragment them;
//! - dates run before IPs, since an IPv6 grammar would otherwise eat `10:00:00`;
//! - domains run before source file paths, so `service.cc` is a domain;
//! - bare numbers run before the hex family, so an all-digit run is never a hash;
//! - the label and parenthesis rules run last, after numbers and hashes
//!   have consumed codes that are not label-adjacent.

use crate::detector::MatchKind;
use crate::vocabulary::Placeholder;

/// Static definition of one detector.
#[derive(Debug, Clone, Copy)]
pub struct DetectorSpec {
    /// Stable detector name, used in orders, overrides and reports.
    pub name: &'static str,
    /// Built-in pattern source.
    pub pattern: &'static str,
    /// Placeholder the detector emits.
    pub placeholder: Placeholder,
    /// How matches become replacement text.
    pub kind: MatchKind,
}

// Structured tokens

/// `scheme://...` up to the first character that cannot appear in a URL.
pub const URL: DetectorSpec = DetectorSpec {
    name: "url",
    pattern: r"\b(?:https?|wss?|ftp)://[A-Za-z0-9\-._~:/?#\[\]@!$&()*+,;=%]+",
    placeholder: Placeholder::Url,
    kind: MatchKind::Whole,
};

/// Three base64url segments with a JSON header (`eyJ`).
pub const JWT: DetectorSpec = DetectorSpec {
    name: "jwt",
    pattern: r"\beyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+",
    placeholder: Placeholder::Hash,
    kind: MatchKind::Whole,
};

/// Canonical 8-4-4-4-12 UUID.
pub const UUID: DetectorSpec = DetectorSpec {
    name: "uuid",
    pattern: r"\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b",
    placeholder: Placeholder::Hash,
    kind: MatchKind::Whole,
};

// Dates and times, most qualified first

/// ISO-8601 date and time with a zone designator, optionally after one space
/// (`2024-01-15 10:30:00.123 +0800`).
pub const DATE_ISO_OFFSET: DetectorSpec = DetectorSpec {
    name: "date_iso_offset",
    pattern: r"\b\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(?:[.,]\d{1,9})? ?(?:Z|[+-]\d{2}:?\d{2})\b",
    placeholder: Placeholder::Date,
    kind: MatchKind::Whole,
};

/// ISO-8601 local date and time, seconds optional.
pub const DATE_ISO_LOCAL: DetectorSpec = DetectorSpec {
    name: "date_iso_local",
    pattern: r"\b\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}(?::\d{2}(?:[.,]\d{1,9})?)?\b",
    placeholder: Placeholder::Date,
    kind: MatchKind::Whole,
};

/// `2024/01/15 10:30:00`
pub const DATE_SLASH_TIME: DetectorSpec = DetectorSpec {
    name: "date_slash_time",
    pattern: r"\b\d{4}/\d{2}/\d{2}[T ]\d{2}:\d{2}:\d{2}(?:[.,]\d{1,9})?\b",
    placeholder: Placeholder::Date,
    kind: MatchKind::Whole,
};

/// RFC 1123 / RFC 2822: `Mon, 15 Jan 2024 10:30:00 GMT`.
pub const DATE_RFC1123: DetectorSpec = DetectorSpec {
    name: "date_rfc1123",
    pattern: r"\b(?:Mon|Tue|Wed|Thu|Fri|Sat|Sun),? \d{1,2} (?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec) \d{4} \d{2}:\d{2}:\d{2}(?: (?:GMT|UTC|[A-Z]{2,3}T|[+-]\d{4}))?\b",
    placeholder: Placeholder::Date,
    kind: MatchKind::Whole,
};

/// Syslog and ctime forms: `Jan  5 10:30:00`, `Mon Jan 15 10:30:00 2024`.
pub const DATE_CTIME: DetectorSpec = DetectorSpec {
    name: "date_ctime",
    pattern: r"\b(?:(?:Mon|Tue|Wed|Thu|Fri|Sat|Sun) )?(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec) {1,2}\d{1,2} \d{2}:\d{2}:\d{2}(?: \d{4})?\b",
    placeholder: Placeholder::Date,
    kind: MatchKind::Whole,
};

/// Bare time of day with optional fraction.
pub const TIME_ONLY: DetectorSpec = DetectorSpec {
    name: "time_only",
    pattern: r"\b\d{1,2}:\d{2}:\d{2}(?:[.,]\d{1,9})?\b",
    placeholder: Placeholder::Date,
    kind: MatchKind::Whole,
};

/// Bare calendar date, including the CJK `2024年1月15日` form.
pub const DATE_ONLY: DetectorSpec = DetectorSpec {
    name: "date_only",
    pattern: r"\b\d{4}-\d{2}-\d{2}\b|\b\d{4}/\d{2}/\d{2}\b|\b\d{1,2}/\d{1,2}/\d{4}\b|\d{4}年\d{1,2}月\d{1,2}日",
    placeholder: Placeholder::Date,
    kind: MatchKind::Whole,
};

// Network

/// Dotted-quad IPv4 with an optional port.
pub const IPV4: DetectorSpec = DetectorSpec {
    name: "ipv4",
    pattern: r"\b(?:\d{1,3}\.){3}\d{1,3}\b(?::\d{1,5}\b)?",
    placeholder: Placeholder::Ip,
    kind: MatchKind::Whole,
};

/// IPv6: bracketed (with optional port), full, `::`-compressed, or with a
/// leading `::` (`::1`). A leading `::` must not follow a word character, so
/// `Vec::add` is left alone; all-letter pairs such as `abc::def` are
/// rejected by the guard.
pub const IPV6: DetectorSpec = DetectorSpec {
    name: "ipv6",
    pattern: r"\[(?:[0-9a-fA-F]{0,4}:){2,7}[0-9a-fA-F]{0,4}\](?::\d{1,5}\b)?|\b(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}\b|\b(?:[0-9a-fA-F]{1,4}:){1,6}(?::[0-9a-fA-F]{1,4}){1,7}\b|\B::[0-9a-fA-F]{1,4}(?::[0-9a-fA-F]{1,4}){0,6}\b",
    placeholder: Placeholder::Ip,
    kind: MatchKind::Guarded(has_digit),
};

/// Hostname whose last label is a recognized top-level domain.
///
/// Dotted names that continue past the TLD (`java.io.IOException`) are
/// matched in full and then rejected by the guard, so package paths stay
/// intact.
pub const DOMAIN: DetectorSpec = DetectorSpec {
    name: "domain",
    pattern: r"\b(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+(?:com|net|org|info|biz|io|co|cc|cn|dev|app|ai|cloud|tech|xyz|me|us|uk|de|fr|jp|kr|ru|br|au|ca|gov|edu|mil|local|internal)\b(?:\.[A-Za-z_]\w*)*",
    placeholder: Placeholder::Domain,
    kind: MatchKind::Guarded(ends_with_tld),
};

/// Top-level domains recognized by [`DOMAIN`].
pub const TLDS: &[&str] = &[
    "com", "net", "org", "info", "biz", "io", "co", "cc", "cn", "dev", "app", "ai", "cloud",
    "tech", "xyz", "me", "us", "uk", "de", "fr", "jp", "kr", "ru", "br", "au", "ca", "gov",
    "edu", "mil", "local", "internal",
];

// Paths

/// 24-hex resource ID after a `/`. Only the leading slash is consumed, so
/// the delimiter that follows (`/`, `|`) is left for the next segment.
pub const PATH_OBJECT_ID: DetectorSpec = DetectorSpec {
    name: "path_object_id",
    pattern: r"/[0-9a-f]{24}\b",
    placeholder: Placeholder::Number,
    kind: MatchKind::Template("/{NUMBER}"),
};

/// Slash- or backslash-rooted path ending in a source or asset extension.
pub const SOURCE_FILE: DetectorSpec = DetectorSpec {
    name: "source_file",
    pattern: r"(?:[A-Za-z]:)?(?:[/\\][\w.-]+)+?\.(?:jsx?|tsx?|mjs|cjs|vue|svelte|css|scss|less|sass|html?|json|svg|graphql|gql|map|go|py|rb|java|kts?|scala|rs|cpp|cxx|cc|hpp|hh|cs|c|h|php|swift|mm?|exs?|erl|lua|sql|ya?ml|toml|xml|proto|log|txt)\b",
    placeholder: Placeholder::File,
    kind: MatchKind::Whole,
};

// Opaque tokens

/// Vendor key formats (Stripe, AWS, GitHub, Slack, Google).
pub const API_KEY: DetectorSpec = DetectorSpec {
    name: "api_key",
    pattern: r"\b(?:sk|pk|rk)_(?:live|test)_[A-Za-z0-9]{10,}\b|\bAKIA[0-9A-Z]{16}\b|\bgh[pousr]_[A-Za-z0-9]{36,}\b|\bxox[abpr]-[A-Za-z0-9-]{10,}|\bAIza[0-9A-Za-z_-]{35}",
    placeholder: Placeholder::Hash,
    kind: MatchKind::Whole,
};

/// Job-style identifiers: `task-8f3a2`, `job_1234`, `req-77`.
pub const TASK_ID: DetectorSpec = DetectorSpec {
    name: "task_id",
    pattern: r"\b(?i:task|job|run|req|txn|batch)[-_][A-Za-z0-9]*\d[A-Za-z0-9]*\b",
    placeholder: Placeholder::Hash,
    kind: MatchKind::Whole,
};

/// Long snake-case identifiers carrying embedded serials.
pub const LONG_UNDERSCORE_ID: DetectorSpec = DetectorSpec {
    name: "long_underscore_id",
    pattern: r"\b[A-Za-z0-9]+(?:_[A-Za-z0-9]+)+\b",
    placeholder: Placeholder::Hash,
    kind: MatchKind::Guarded(is_serial_identifier),
};

/// Base64 blobs of mixed case and digits.
pub const BASE64_BLOB: DetectorSpec = DetectorSpec {
    name: "base64_blob",
    pattern: r"\b[A-Za-z0-9+/]{20,}={0,2}",
    placeholder: Placeholder::Hash,
    kind: MatchKind::Guarded(is_base64_blob),
};

// Numbers and hex

/// Standalone decimal digit run.
pub const NUMBER: DetectorSpec = DetectorSpec {
    name: "number",
    pattern: r"\b\d+\b",
    placeholder: Placeholder::Number,
    kind: MatchKind::Whole,
};

/// MongoDB ObjectID: 24 lowercase hex characters.
pub const OBJECT_ID: DetectorSpec = DetectorSpec {
    name: "object_id",
    pattern: r"\b[0-9a-f]{24}\b",
    placeholder: Placeholder::Hash,
    kind: MatchKind::Whole,
};

/// Trace and span IDs: 32 or 16 lowercase hex characters.
pub const TRACE_ID: DetectorSpec = DetectorSpec {
    name: "trace_id",
    pattern: r"\b(?:[0-9a-f]{32}|[0-9a-f]{16})\b",
    placeholder: Placeholder::Hash,
    kind: MatchKind::Whole,
};

/// SHA-256, SHA-1 and MD5 digests.
pub const HASH: DetectorSpec = DetectorSpec {
    name: "hash",
    pattern: r"\b(?:[0-9a-f]{64}|[0-9a-f]{40}|[0-9a-f]{32})\b",
    placeholder: Placeholder::Hash,
    kind: MatchKind::Whole,
};

/// Residual hex of six or more characters containing at least one digit.
pub const HEX_LONG: DetectorSpec = DetectorSpec {
    name: "hex_long",
    pattern: r"\b[0-9a-f]{6,}\b",
    placeholder: Placeholder::Hash,
    kind: MatchKind::Guarded(has_digit),
};

// Context rules

/// Uppercase code after `key`, `currency`, `platform` (or a CJK label) and
/// `:`, `=` or `：`.
pub const LABELED_CODE: DetectorSpec = DetectorSpec {
    name: "labeled_code",
    pattern: r"(?P<label>\b(?i:key|currency|platform)|币种|货币|平台)(?P<sep>\s*[:=：]\s*)[A-Z][A-Z0-9]{1,15}\b",
    placeholder: Placeholder::Generic,
    kind: MatchKind::Template("${label}${sep}{?}"),
};

/// Payment-method or currency code in parentheses: `(USD)`, `(VISA)`.
pub const PAREN_CODE: DetectorSpec = DetectorSpec {
    name: "paren_code",
    pattern: r"\([A-Z][A-Z0-9]{1,7}\)",
    placeholder: Placeholder::Generic,
    kind: MatchKind::Template("({?})"),
};

/// Every built-in detector, in definition order.
pub const CATALOG: &[DetectorSpec] = &[
    URL,
    JWT,
    UUID,
    DATE_ISO_OFFSET,
    DATE_ISO_LOCAL,
    DATE_SLASH_TIME,
    DATE_RFC1123,
    DATE_CTIME,
    TIME_ONLY,
    DATE_ONLY,
    IPV4,
    IPV6,
    DOMAIN,
    PATH_OBJECT_ID,
    SOURCE_FILE,
    API_KEY,
    TASK_ID,
    LONG_UNDERSCORE_ID,
    BASE64_BLOB,
    NUMBER,
    OBJECT_ID,
    TRACE_ID,
    HASH,
    HEX_LONG,
    LABELED_CODE,
    PAREN_CODE,
];

/// Application order of the substitution stages.
///
/// Changing this list changes the normalized form of existing messages;
/// bump [`crate::PIPELINE_VERSION`] with it.
pub const PIPELINE_ORDER: &[&str] = &[
    "url",
    "jwt",
    "uuid",
    "path_object_id",
    "date_iso_offset",
    "date_iso_local",
    "date_slash_time",
    "date_rfc1123",
    "date_ctime",
    "time_only",
    "date_only",
    "ipv4",
    "ipv6",
    "domain",
    "source_file",
    "api_key",
    "task_id",
    "long_underscore_id",
    "base64_blob",
    "number",
    "object_id",
    "trace_id",
    "hash",
    "hex_long",
    "labeled_code",
    "paren_code",
];

fn ends_with_tld(s: &str) -> bool {
    s.rsplit('.').next().is_some_and(|label| TLDS.contains(&label))
}

fn has_digit(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
}

/// At least 16 characters with four or more digits.
fn is_serial_identifier(s: &str) -> bool {
    s.len() >= 16 && s.bytes().filter(u8::is_ascii_digit).count() >= 4
}

/// Mixed case plus digits, and either padding, a `+`, or 32+ characters
/// without a `/` (which would more likely be a path).
fn is_base64_blob(s: &str) -> bool {
    let upper = s.bytes().any(|b| b.is_ascii_uppercase());
    let lower = s.bytes().any(|b| b.is_ascii_lowercase());
    if !(upper && lower && has_digit(s)) {
        return false;
    }
    s.ends_with('=') || s.contains('+') || (s.len() >= 32 && !s.contains('/'))
}
