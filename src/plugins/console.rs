//! Console output plugin
//!
//! Options: `format` (required template), `stream` (required: `stdout`,
//! `stderr` or a numeric file descriptor), `color` (optional boolean).

use super::line_formatter;
use crate::core::{
    required_option, IoWriter, LoggerError, OutputPlugin, Options, Result, SharedOutputter,
    StringOutputter, StringWriter,
};
use std::fs::File;
use std::io::Write;
use std::sync::Arc;

/// Stream a console outputter writes to.
pub enum ConsoleWriter {
    Stdout,
    Stderr,
    /// Any other already-open descriptor, e.g. one inherited from a parent process
    Descriptor(IoWriter<File>),
}

impl ConsoleWriter {
    /// Resolve the `stream` option.
    pub fn from_stream(stream: &str) -> Result<Self> {
        match stream {
            "stdout" => Ok(ConsoleWriter::Stdout),
            "stderr" => Ok(ConsoleWriter::Stderr),
            _ => {
                let fd: u32 = stream.parse().map_err(|_| {
                    LoggerError::invalid_option(ConsolePlugin::NAME, "stream", stream)
                })?;
                match fd {
                    1 => Ok(ConsoleWriter::Stdout),
                    2 => Ok(ConsoleWriter::Stderr),
                    _ => open_descriptor(fd).map(|file| ConsoleWriter::Descriptor(IoWriter::new(file))),
                }
            }
        }
    }
}

#[cfg(unix)]
fn open_descriptor(fd: u32) -> Result<File> {
    let path = format!("/dev/fd/{}", fd);
    std::fs::OpenOptions::new()
        .append(true)
        .open(&path)
        .map_err(|e| LoggerError::io_operation("opening console stream", path, e))
}

#[cfg(not(unix))]
fn open_descriptor(fd: u32) -> Result<File> {
    Err(LoggerError::invalid_option(
        ConsolePlugin::NAME,
        "stream",
        fd.to_string(),
    ))
}

impl StringWriter for ConsoleWriter {
    fn write_str(&self, s: &str) {
        match self {
            ConsoleWriter::Stdout => {
                let _ = std::io::stdout().lock().write_all(s.as_bytes());
            }
            ConsoleWriter::Stderr => {
                let _ = std::io::stderr().lock().write_all(s.as_bytes());
            }
            ConsoleWriter::Descriptor(writer) => writer.write_str(s),
        }
    }
}

/// Plugin registered as `console`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePlugin;

impl ConsolePlugin {
    pub const NAME: &'static str = "console";
}

impl OutputPlugin for ConsolePlugin {
    fn create_outputter(&self, options: &Options) -> Result<SharedOutputter> {
        let formatter = line_formatter(options, Self::NAME)?;
        let writer = ConsoleWriter::from_stream(required_option(options, Self::NAME, "stream")?)?;
        Ok(Arc::new(StringOutputter::new(formatter, writer)))
    }
}
