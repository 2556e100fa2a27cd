//! File output plugin
//!
//! Options: `format` (required template), `file` (required path, opened for
//! create-or-append), `lock` (optional boolean: hold an exclusive advisory
//! lock on the file around every write, for files shared between processes).

use super::line_formatter;
use crate::core::{
    bool_option, required_option, Formatter, LoggerError, OutputPlugin, Options, Result,
    SharedOutputter, StringOutputter, StringWriter,
};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Appends preformatted lines to an open file.
pub struct FileWriter {
    file: Mutex<File>,
    lock: bool,
}

impl FileWriter {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LoggerError::io_operation("opening log file", path.display().to_string(), e))?;
        Ok(Self {
            file: Mutex::new(file),
            lock: false,
        })
    }

    #[must_use]
    pub fn with_lock(mut self, lock: bool) -> Self {
        self.lock = lock;
        self
    }

    #[cfg(feature = "file-lock")]
    fn write_locked(&self, file: &mut File, s: &str) -> std::io::Result<()> {
        use fs2::FileExt;

        file.lock_exclusive()?;
        let result = file.write_all(s.as_bytes());
        let unlocked = FileExt::unlock(&*file);
        result.and(unlocked)
    }

    #[cfg(not(feature = "file-lock"))]
    fn write_locked(&self, file: &mut File, s: &str) -> std::io::Result<()> {
        file.write_all(s.as_bytes())
    }
}

impl StringWriter for FileWriter {
    fn write_str(&self, s: &str) {
        let mut file = self.file.lock();
        let _ = if self.lock {
            self.write_locked(&mut file, s)
        } else {
            file.write_all(s.as_bytes())
        };
    }
}

/// Plugin registered as `file`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilePlugin;

impl FilePlugin {
    pub const NAME: &'static str = "file";

    /// Outputter appending `formatter`'s output to `path`.
    pub fn open(path: impl AsRef<Path>, formatter: impl Formatter + 'static) -> Result<StringOutputter> {
        Ok(StringOutputter::new(formatter, FileWriter::open(path)?))
    }
}

impl OutputPlugin for FilePlugin {
    fn create_outputter(&self, options: &Options) -> Result<SharedOutputter> {
        let formatter = line_formatter(options, Self::NAME)?;
        let path = required_option(options, Self::NAME, "file")?;
        let writer = FileWriter::open(path)?.with_lock(bool_option(options, Self::NAME, "lock")?);
        Ok(Arc::new(StringOutputter::new(formatter, writer)))
    }
}
