use chrono::NaiveDateTime;
use std::fmt;

/// Default `LoginTime`/`ResponseTime` format, microsecond resolution.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H:%M:%S%.6f";

/// A journal timestamp as written into `LoginTime` and `ResponseTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    pub fn value(&self) -> NaiveDateTime {
        self.0
    }

    /// Parses `text` with `format`. Malformed values yield `None`.
    pub fn parse(text: &str, format: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(text.trim(), format)
            .ok()
            .map(Self)
    }

    pub fn format(&self, format: &str) -> String {
        self.0.format(format).to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DEFAULT_TIMESTAMP_FORMAT))
    }
}
