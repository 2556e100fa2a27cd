//! Process-wide default context
//!
//! Every setup entry point here replaces the whole default tree, so calling
//! one twice leaves exactly one copy of each configured output attached.

use crate::config::Config;
use crate::core::{Logger, LoggerContext, LoggerError, OutputPlugin, Result};
use once_cell::sync::Lazy;
use std::io::Read;
use std::path::Path;

/// Environment variable [`setup`] reads the configuration path from.
pub const CONFIG_ENV: &str = "LOGGER_HIERARCHY_CONFIG";

static DEFAULT_CONTEXT: Lazy<LoggerContext> = Lazy::new(LoggerContext::new);

/// The default context, created on first use with the built-in plugins.
pub fn context() -> &'static LoggerContext {
    &DEFAULT_CONTEXT
}

pub fn root() -> Logger {
    context().root()
}

pub fn get(name: &str) -> Logger {
    context().get(name)
}

pub fn register_output_plugin(name: impl Into<String>, plugin: impl OutputPlugin + 'static) {
    context().register_output_plugin(name, plugin);
}

pub fn setup_reader(reader: impl Read) -> Result<()> {
    context().reconfigure(&Config::from_reader(reader)?)
}

pub fn setup_file(path: impl AsRef<Path>) -> Result<()> {
    context().reconfigure(&Config::from_file(path)?)
}

/// Configure from the file named by `LOGGER_HIERARCHY_CONFIG`.
pub fn setup() -> Result<()> {
    let path = std::env::var_os(CONFIG_ENV).ok_or_else(|| LoggerError::EnvNotSet(CONFIG_ENV.to_string()))?;
    setup_file(path)
}

/// Everything from DEBUG up to stderr as `$time [$level] $logger: $msg`.
pub fn setup_default() -> Result<()> {
    context().reconfigure(&Config::default_console())
}
