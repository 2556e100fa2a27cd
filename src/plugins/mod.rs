//! Built-in output plugins
//!
//! `console`, `file` and `syslog` are registered on every
//! [`LoggerContext::new`]; `memory` is available for tests and must be
//! registered explicitly.

pub mod console;
pub mod file;
pub mod memory;
pub mod syslog;

pub use console::{ConsolePlugin, ConsoleWriter};
pub use file::{FilePlugin, FileWriter};
pub use memory::{MemoryOutputter, MemoryPlugin};
pub use syslog::{Facility, Severity, SyslogOutputter, SyslogPlugin};

use crate::core::{bool_option, required_option, BasicFormatter, LoggerContext, Options, Result};

pub(crate) fn register_builtin(context: &LoggerContext) {
    context.register_output_plugin(ConsolePlugin::NAME, ConsolePlugin);
    context.register_output_plugin(FilePlugin::NAME, FilePlugin);
    context.register_output_plugin(SyslogPlugin::NAME, SyslogPlugin);
}

/// Formatter from the required `format` option, one line per message.
pub(crate) fn line_formatter(options: &Options, plugin: &str) -> Result<BasicFormatter> {
    let template = format!("{}\n", required_option(options, plugin, "format")?);
    let formatter = BasicFormatter::new(&template)?;
    apply_color(formatter, bool_option(options, plugin, "color")?)
}

#[cfg(feature = "color")]
fn apply_color(formatter: BasicFormatter, enable: bool) -> Result<BasicFormatter> {
    Ok(formatter.with_colored_level(enable))
}

#[cfg(not(feature = "color"))]
fn apply_color(formatter: BasicFormatter, _enable: bool) -> Result<BasicFormatter> {
    Ok(formatter)
}
