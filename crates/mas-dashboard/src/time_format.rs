use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone, Utc};

/// Local date/time with offset; parses back to the same instant.
pub const DEFAULT_PATTERN: &str = "%Y-%m-%d %H:%M:%S %:z";

#[derive(Debug, thiserror::Error)]
#[error("invalid time format pattern: {0:?}")]
pub struct InvalidTimeFormat(pub String);

/// Renders snapshot timestamps in the host's local time zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormat {
    pattern: String,
}

impl TimestampFormat {
    pub fn new(pattern: &str) -> Result<Self, InvalidTimeFormat> {
        // chrono panics on Display of a pattern with bad specifiers; reject early.
        let bad = pattern.is_empty()
            || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
        if bad {
            return Err(InvalidTimeFormat(pattern.to_string()));
        }
        Ok(Self {
            pattern: pattern.to_string(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, ts: DateTime<Utc>) -> String {
        self.format_in(ts, &Local)
    }

    pub fn format_in<Tz>(&self, ts: DateTime<Utc>, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        ts.with_timezone(tz).format(&self.pattern).to_string()
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}
