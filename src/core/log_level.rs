//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Severity of a message, or the minimum severity a logger accepts.
///
/// Levels are plain integers: a larger value is more severe. The seven
/// named levels are spaced so applications can slot custom levels in
/// between them with [`LogLevel::custom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogLevel(i32);

impl LogLevel {
    /// Threshold of a logger that has not been configured yet.
    pub const UNDEFINED: LogLevel = LogLevel(i32::MIN);
    pub const TRACE: LogLevel = LogLevel(100);
    pub const DEBUG: LogLevel = LogLevel(200);
    pub const INFO: LogLevel = LogLevel(300);
    pub const NOTICE: LogLevel = LogLevel(400);
    pub const WARN: LogLevel = LogLevel(500);
    pub const ERROR: LogLevel = LogLevel(600);
    pub const FATAL: LogLevel = LogLevel(700);

    /// Named levels, weakest first.
    pub const DEFAULTS: [LogLevel; 7] = [
        LogLevel::TRACE,
        LogLevel::DEBUG,
        LogLevel::INFO,
        LogLevel::NOTICE,
        LogLevel::WARN,
        LogLevel::ERROR,
        LogLevel::FATAL,
    ];

    #[must_use]
    pub const fn custom(value: i32) -> Self {
        LogLevel(value)
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn is_undefined(self) -> bool {
        self.0 == i32::MIN
    }

    /// Upper-case name of a default level, `None` for custom levels.
    pub fn name(self) -> Option<&'static str> {
        match self {
            LogLevel::TRACE => Some("TRACE"),
            LogLevel::DEBUG => Some("DEBUG"),
            LogLevel::INFO => Some("INFO"),
            LogLevel::NOTICE => Some("NOTICE"),
            LogLevel::WARN => Some("WARN"),
            LogLevel::ERROR => Some("ERROR"),
            LogLevel::FATAL => Some("FATAL"),
            _ => None,
        }
    }

    #[cfg(feature = "color")]
    pub fn color_code(self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::TRACE => BrightBlack,
            LogLevel::DEBUG => Blue,
            LogLevel::INFO => Green,
            LogLevel::NOTICE => Cyan,
            LogLevel::WARN => Yellow,
            LogLevel::ERROR => Red,
            LogLevel::FATAL => BrightRed,
            _ => White,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::UNDEFINED
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "LEVEL:{}", self.0),
        }
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::TRACE),
            "DEBUG" => Ok(LogLevel::DEBUG),
            "INFO" => Ok(LogLevel::INFO),
            "NOTICE" => Ok(LogLevel::NOTICE),
            "WARN" => Ok(LogLevel::WARN),
            "ERROR" => Ok(LogLevel::ERROR),
            "FATAL" => Ok(LogLevel::FATAL),
            _ => Err(LoggerError::UnknownLevel(s.to_string())),
        }
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.name() {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_i32(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Value(i32),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Name(name) => name.parse().map_err(serde::de::Error::custom),
            Repr::Value(value) => Ok(LogLevel(value)),
        }
    }
}
