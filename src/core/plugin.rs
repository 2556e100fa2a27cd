//! Output plugins: factories turning option maps into outputters

use super::error::{LoggerError, Result};
use super::outputter::SharedOutputter;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Plugin-specific key/value options of one output section.
pub type Options = BTreeMap<String, String>;

pub trait OutputPlugin: Send + Sync {
    fn create_outputter(&self, options: &Options) -> Result<SharedOutputter>;
}

impl<F> OutputPlugin for F
where
    F: Fn(&Options) -> Result<SharedOutputter> + Send + Sync,
{
    fn create_outputter(&self, options: &Options) -> Result<SharedOutputter> {
        self(options)
    }
}

pub type SharedPlugin = Arc<dyn OutputPlugin>;

/// Name to plugin mapping. Lives inside the logger context and shares its lock.
#[derive(Default, Clone)]
pub(crate) struct PluginRegistry {
    plugins: HashMap<String, SharedPlugin>,
}

impl PluginRegistry {
    pub(crate) fn register(&mut self, name: impl Into<String>, plugin: SharedPlugin) {
        self.plugins.insert(name.into(), plugin);
    }

    pub(crate) fn lookup(&self, name: &str) -> Result<SharedPlugin> {
        self.plugins
            .get(name)
            .cloned()
            .ok_or_else(|| LoggerError::unknown_plugin(name))
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }
}

/// Fetch a required option.
pub fn required_option<'a>(options: &'a Options, plugin: &str, option: &str) -> Result<&'a str> {
    match options.get(option).map(String::as_str) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(LoggerError::missing_option(plugin, option)),
    }
}

/// Parse an optional `true`/`false` option.
pub fn bool_option(options: &Options, plugin: &str, option: &str) -> Result<bool> {
    match options.get(option).map(|v| v.to_ascii_lowercase()) {
        None => Ok(false),
        Some(value) => match value.as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(LoggerError::invalid_option(plugin, option, value)),
        },
    }
}
