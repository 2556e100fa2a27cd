//! # Rust Logger Hierarchy
//!
//! A hierarchical logging facility with pluggable outputs.
//!
//! ## Features
//!
//! - **Logger Tree**: dotted names (`net.http.client`) form a tree rooted at
//!   `root`; thresholds are inherited down the tree
//! - **Propagation**: a message accepted by a logger fires its outputters and
//!   those of every ancestor, unless a logger on the way says `nopropagate`
//! - **Output Plugins**: named factories (`console`, `file`, `syslog`, or your
//!   own) turn configuration sections into outputters
//! - **Declarative Configuration**: INI-like text or serde, merged into or
//!   replacing the live tree
//!
//! ## Example
//!
//! ```no_run
//! use rust_logger_hierarchy::prelude::*;
//!
//! let context = LoggerContext::new();
//! let config: Config = "
//! [loggers]
//! root = INFO, console
//! net = DEBUG
//!
//! [console]
//! type = console
//! stream = stderr
//! format = $time [$level] $logger: $msg
//! ".parse()?;
//! context.reconfigure(&config)?;
//!
//! let http = context.get("net.http");
//! http.debug("accepted connection");
//! # Ok::<(), LoggerError>(())
//! ```

pub mod config;
pub mod core;
mod global;
pub mod macros;
pub mod plugins;

#[cfg(feature = "log-compat")]
pub mod bridge;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::core::{
        BasicFormatter, Formatter, LogLevel, Logger, LoggerContext, LoggerError, LoggerMetrics, Message,
        OutputPlugin, Options, Outputter, Result, SharedOutputter, TimestampFormat,
    };
}

pub use config::{Config, NOPROPAGATE};
pub use core::{
    bool_option, required_option, BasicFormatter, Formatter, IoWriter, LogLevel, Logger, LoggerContext,
    LoggerError, LoggerMetrics, Message, OutputPlugin, Options, Outputter, Result, SharedOutputter,
    SharedPlugin, StringOutputter, StringWriter, ThresholdOutputter, TimestampFormat,
};
pub use global::{
    context, get, register_output_plugin, root, setup, setup_default, setup_file, setup_reader, CONFIG_ENV,
};
