//! Message structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::panic::Location;
use std::sync::Arc;

/// Snapshot of one accepted log call.
///
/// Built once, after the originating logger's threshold check passed, and
/// handed by reference to every outputter on the propagation chain.
#[derive(Debug, Clone)]
pub struct Message {
    pub level: LogLevel,
    pub text: String,
    pub timestamp: DateTime<Local>,
    pub file: Option<&'static str>,
    pub line: Option<u32>,
    /// Full dotted name of the logger the call was made on.
    pub logger: Arc<str>,
}

impl Message {
    pub fn new(level: LogLevel, text: String, logger: Arc<str>) -> Self {
        Self {
            level,
            text,
            timestamp: Local::now(),
            file: None,
            line: None,
            logger,
        }
    }

    #[must_use]
    pub fn with_location(mut self, file: &'static str, line: u32) -> Self {
        self.file = Some(file);
        self.line = Some(line);
        self
    }

    #[must_use]
    pub(crate) fn at(self, location: &'static Location<'static>) -> Self {
        self.with_location(location.file(), location.line())
    }

    /// Base name of the originating source file.
    pub fn file_name(&self) -> Option<&'static str> {
        self.file
            .map(|path| path.rsplit(['/', '\\']).next().unwrap_or(path))
    }
}
