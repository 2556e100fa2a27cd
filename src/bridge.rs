//! Adapter from the `log` crate facade
//!
//! Records logged through `log::info!` and friends are routed to the logger
//! named after their target, with `::` path separators turned into dots.
//!
//! ```no_run
//! use rust_logger_hierarchy::bridge::LogBridge;
//! use rust_logger_hierarchy::LoggerContext;
//!
//! let context = LoggerContext::new();
//! LogBridge::new(context).init().expect("no other logger installed");
//! log::info!(target: "app::db", "connected");
//! ```

use crate::core::{LogLevel, Logger, LoggerContext};
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// Level of the hierarchy matching a `log` level.
pub fn level_from_log(level: Level) -> LogLevel {
    match level {
        Level::Error => LogLevel::ERROR,
        Level::Warn => LogLevel::WARN,
        Level::Info => LogLevel::INFO,
        Level::Debug => LogLevel::DEBUG,
        Level::Trace => LogLevel::TRACE,
    }
}

/// Logger name for a `log` target.
pub fn logger_name(target: &str) -> String {
    target.replace("::", ".")
}

/// `log::Log` implementation feeding a [`LoggerContext`].
#[derive(Debug, Clone)]
pub struct LogBridge {
    context: LoggerContext,
}

impl LogBridge {
    pub fn new(context: LoggerContext) -> Self {
        Self { context }
    }

    /// Install as the global `log` logger. Level filtering is left to the
    /// hierarchy, so the `log` max level is raised to `Trace`.
    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(LevelFilter::Trace);
        Ok(())
    }

    fn logger_for(&self, target: &str) -> Logger {
        self.context.get(&logger_name(target))
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.logger_for(metadata.target())
            .is_enabled(level_from_log(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        self.logger_for(record.target()).log_at(
            level_from_log(record.level()),
            *record.args(),
            record.file_static(),
            record.line(),
        );
    }

    fn flush(&self) {}
}
