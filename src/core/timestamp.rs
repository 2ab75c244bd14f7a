//! Timestamp formatting for rendered records
//!
//! Supports a strftime layout (the console default), ISO 8601, RFC 3339,
//! Unix timestamps, and suppressing the timestamp entirely.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Default console layout: `2025-01-08 10:30:45`.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration value that disables timestamps.
pub const TIME_DISABLED: &str = "-";

/// Configuration names for the fixed formats, matched case-insensitively.
const NAMED_FORMATS: [(&str, TimestampFormat); 4] = [
    ("iso8601", TimestampFormat::Iso8601),
    ("rfc3339", TimestampFormat::Rfc3339),
    ("unix", TimestampFormat::Unix),
    ("unixmillis", TimestampFormat::UnixMillis),
];

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use logkit::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let timestamp = format.format(&Utc::now()).unwrap();
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// strftime layout, `%Y-%m-%d %H:%M:%S` by default
    Layout(String),

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 with nanoseconds: `2025-01-08T10:30:45.123456789Z`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// No timestamp at all
    Disabled,
}

impl Default for TimestampFormat {
    fn default() -> Self {
        TimestampFormat::Layout(DEFAULT_TIME_FORMAT.to_string())
    }
}

impl TimestampFormat {
    /// Interpret a configured time format string.
    ///
    /// `""` selects `fallback`, `"-"` disables timestamps, `iso8601`,
    /// `rfc3339`, `unix` and `unixmillis` name the fixed formats, and anything
    /// else is taken as a strftime layout. Layouts chrono cannot parse are
    /// rejected here rather than failing on every record.
    pub fn from_config(value: &str, fallback: TimestampFormat) -> Result<Self> {
        if let Some((_, format)) = NAMED_FORMATS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
        {
            return Ok(format.clone());
        }

        match value {
            "" => Ok(fallback),
            TIME_DISABLED => Ok(TimestampFormat::Disabled),
            layout => {
                if StrftimeItems::new(layout).any(|item| matches!(item, Item::Error)) {
                    return Err(LoggerError::config(
                        "time_format",
                        format!("invalid time format '{}'", layout),
                    ));
                }
                Ok(TimestampFormat::Layout(layout.to_string()))
            }
        }
    }

    /// Format a `DateTime<Utc>`; `None` when timestamps are disabled.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> Option<String> {
        let formatted = match self {
            TimestampFormat::Layout(layout) => {
                let mut out = String::new();
                // Layouts built without from_config may be invalid
                if write!(out, "{}", datetime.format(layout)).is_err() {
                    return Some(datetime.to_rfc3339_opts(SecondsFormat::Nanos, true));
                }
                out
            }
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Nanos, true),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Disabled => return None,
        };
        Some(formatted)
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        matches!(self, TimestampFormat::Disabled)
    }
}
