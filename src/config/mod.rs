//! Declarative configuration
//!
//! A [`Config`] is a set of named sections of key/value options. The
//! reserved `loggers` section maps logger names to
//! `level[, output|nopropagate]*`; every other section declares an output
//! with a required `type` naming the plugin that builds it, an optional
//! `threshold`, and plugin-specific options.

mod ini;
mod resolver;

pub use resolver::NOPROPAGATE;

use crate::core::{LoggerError, Options, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Parsed configuration document.
///
/// # Example
///
/// ```
/// use rust_logger_hierarchy::Config;
///
/// let config: Config = "
/// [loggers]
/// root = INFO, console
///
/// [console]
/// type = console
/// stream = stderr
/// format = [$level] $msg
/// ".parse().unwrap();
///
/// assert_eq!(config.get("console", "stream"), Some("stderr"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    sections: BTreeMap<String, Options>,
}

impl Config {
    /// Name of the section mapping logger names to levels and outputs.
    pub const LOGGERS: &'static str = "loggers";

    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the INI-like text form.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self {
            sections: ini::parse(text)?,
        })
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| LoggerError::io_operation("reading configuration", "reader", e))?;
        Self::parse(&text)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("reading configuration", path.display().to_string(), e)
        })?;
        Self::parse(&text)
    }

    /// Parse `{"section": {"key": "value"}}` JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Set one option, creating the section if needed.
    pub fn set(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.sections
            .entry(section.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    pub fn section(&self, name: &str) -> Option<&Options> {
        self.sections.get(name)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key).map(String::as_str)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Options)> {
        self.sections.iter().map(|(name, options)| (name.as_str(), options))
    }

    /// Everything from DEBUG up, on stderr.
    pub fn default_console() -> Self {
        let mut config = Self::new();
        config
            .set(Self::LOGGERS, "root", "DEBUG, console")
            .set("console", "type", "console")
            .set("console", "stream", "stderr")
            .set("console", "format", "$time [$level] $logger: $msg");
        config
    }
}

impl FromStr for Config {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
