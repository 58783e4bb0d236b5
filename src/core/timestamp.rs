//! Timestamp formatting utilities
//!
//! Controls the leading time column of a plain-text line. Record timestamps
//! are rendered in local time.

use chrono::{DateTime, Local, SecondsFormat};
use serde::{Deserialize, Serialize};

/// Time column format options
///
/// # Examples
///
/// ```
/// use leveled_logger::TimestampFormat;
/// use chrono::{Local, TimeZone};
///
/// let at = Local.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Clock.format(&at), "10:30:45.000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Wall clock with milliseconds: `10:30:45.123`
    #[default]
    Clock,

    /// Date and wall clock with milliseconds: `2025-01-08 10:30:45.123`
    DateTime,

    /// RFC 3339 with milliseconds and offset: `2025-01-08T10:30:45.123+01:00`
    Rfc3339,

    /// Custom strftime format
    ///
    /// ```
    /// use leveled_logger::TimestampFormat;
    ///
    /// // Apache log format
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::Clock => datetime.format("%H:%M:%S%.3f").to_string(),
            TimestampFormat::DateTime => datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Millis, false),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}
