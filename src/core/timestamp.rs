//! Timestamp formatting utilities
//!
//! Date and time variables of a template are rendered through one of these
//! formats.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Timestamp format options for template date variables
///
/// # Examples
///
/// ```
/// use rust_logger_hierarchy::core::TimestampFormat;
///
/// // Apache log format
/// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
/// assert!(!format.format(&chrono::Local::now()).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds and offset: `2025-01-08T10:30:45.123+01:00`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45+01:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Day/month/year, e.g. `08/01/2025`
    pub const DATE: &'static str = "%d/%m/%Y";
    /// Wall clock time, e.g. `10:30:45`
    pub const TIME: &'static str = "%H:%M:%S";
    /// ANSI C layout, e.g. `Wed Jan  8 10:30:45 2025`
    pub const ANSI_C: &'static str = "%a %b %e %H:%M:%S %Y";

    pub fn custom(format_str: impl Into<String>) -> Self {
        TimestampFormat::Custom(format_str.into())
    }

    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

/// Date variables every template knows about unless overridden.
pub(crate) fn default_date_vars() -> Vec<(String, TimestampFormat)> {
    vec![
        ("date".to_string(), TimestampFormat::custom(TimestampFormat::DATE)),
        ("time".to_string(), TimestampFormat::custom(TimestampFormat::TIME)),
        ("datetime".to_string(), TimestampFormat::custom(TimestampFormat::ANSI_C)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123)
    }

    #[test]
    fn test_default_date_vars() {
        let dt = fixed_datetime();
        let rendered: Vec<(String, String)> = default_date_vars()
            .into_iter()
            .map(|(name, format)| (name, format.format(&dt)))
            .collect();

        assert_eq!(rendered[0], ("date".to_string(), "08/01/2025".to_string()));
        assert_eq!(rendered[1], ("time".to_string(), "10:30:45".to_string()));
        assert_eq!(
            rendered[2],
            ("datetime".to_string(), "Wed Jan  8 10:30:45 2025".to_string())
        );
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert!(result.starts_with("2025-01-08T10:30:45.123"));
    }

    #[test]
    fn test_unix_formats() {
        let dt = fixed_datetime();
        let secs: i64 = TimestampFormat::Unix.format(&dt).parse().expect("numeric");
        let millis: i64 = TimestampFormat::UnixMillis.format(&dt).parse().expect("numeric");
        assert_eq!(millis, secs * 1000 + 123);
    }

    #[test]
    fn test_deserialization() {
        let format: TimestampFormat =
            serde_json::from_str(r#"{"Custom":"%Y-%m-%d"}"#).expect("deserialize Custom");
        assert_eq!(format, TimestampFormat::Custom("%Y-%m-%d".to_string()));
        assert_eq!(format.format(&fixed_datetime()), "2025-01-08");
    }
}
