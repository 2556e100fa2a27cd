//! Logging macros with `format!`-style arguments.
//!
//! The arguments are only formatted when the level passes the logger's
//! threshold, and the reported source location is the macro call site.
//!
//! # Examples
//!
//! ```
//! use rust_logger_hierarchy::prelude::*;
//! use rust_logger_hierarchy::info;
//!
//! let context = LoggerContext::bare();
//! let logger = context.get("server");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at any level.
///
/// # Examples
///
/// ```
/// # use rust_logger_hierarchy::prelude::*;
/// # let logger = LoggerContext::bare().get("app");
/// use rust_logger_hierarchy::log;
/// log!(logger, LogLevel::INFO, "Simple message");
/// log!(logger, LogLevel::custom(450), "Between NOTICE and WARN: {}", 450);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_fmt($level, format_args!($($arg)+))
    };
}

/// Log a trace-level message.
///
/// ```
/// # use rust_logger_hierarchy::prelude::*;
/// # let logger = LoggerContext::bare().get("app");
/// use rust_logger_hierarchy::trace;
/// trace!(logger, "Entering function: calculate()");
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::TRACE, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::INFO, $($arg)+)
    };
}

/// Log a notice-level message.
///
/// ```
/// # use rust_logger_hierarchy::prelude::*;
/// # let logger = LoggerContext::bare().get("app");
/// use rust_logger_hierarchy::notice;
/// notice!(logger, "Configuration reloaded from {}", "/etc/app.ini");
/// ```
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::NOTICE, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::WARN, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use rust_logger_hierarchy::prelude::*;
/// # let logger = LoggerContext::bare().get("app");
/// use rust_logger_hierarchy::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::ERROR, $($arg)+)
    };
}

/// Log a fatal-level message. The process keeps running.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::FATAL, $($arg)+)
    };
}
