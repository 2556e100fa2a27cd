//! Core logger types and traits

pub mod error;
pub mod formatter;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod outputter;
pub mod plugin;
pub mod timestamp;
pub(crate) mod tree;

pub use error::{LoggerError, Result};
pub use formatter::{BasicFormatter, Formatter};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerContext};
pub use message::Message;
pub use metrics::LoggerMetrics;
pub use outputter::{IoWriter, Outputter, SharedOutputter, StringOutputter, StringWriter, ThresholdOutputter};
pub use plugin::{bool_option, required_option, OutputPlugin, Options, SharedPlugin};
pub use timestamp::TimestampFormat;
