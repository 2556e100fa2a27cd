//! Outputter trait and the generic outputters built on top of it

use super::formatter::Formatter;
use super::log_level::LogLevel;
use super::message::Message;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Destination of accepted messages.
///
/// One outputter may be attached to several loggers and fired from several
/// threads at once; implementations serialize their own I/O. Outputters never
/// report failure to the logging call.
pub trait Outputter: Send + Sync {
    fn output(&self, msg: &Message);
}

pub type SharedOutputter = Arc<dyn Outputter>;

impl<F> Outputter for F
where
    F: Fn(&Message) + Send + Sync,
{
    fn output(&self, msg: &Message) {
        self(msg)
    }
}

/// Forwards messages at or above `threshold` to the wrapped outputter.
pub struct ThresholdOutputter {
    threshold: LogLevel,
    inner: SharedOutputter,
}

impl ThresholdOutputter {
    pub fn new(threshold: LogLevel, inner: SharedOutputter) -> Self {
        Self { threshold, inner }
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }
}

impl Outputter for ThresholdOutputter {
    fn output(&self, msg: &Message) {
        if msg.level < self.threshold {
            return;
        }
        self.inner.output(msg);
    }
}

/// Sink for preformatted strings.
pub trait StringWriter: Send + Sync {
    fn write_str(&self, s: &str);
}

/// [`StringWriter`] over any byte sink; writes are serialized by a mutex
/// and write errors are dropped.
pub struct IoWriter<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> IoWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> StringWriter for IoWriter<W> {
    fn write_str(&self, s: &str) {
        let mut writer = self.writer.lock();
        let _ = writer.write_all(s.as_bytes()).and_then(|()| writer.flush());
    }
}

/// Formats each message and hands the text to a [`StringWriter`].
pub struct StringOutputter {
    formatter: Box<dyn Formatter>,
    writer: Box<dyn StringWriter>,
}

impl StringOutputter {
    pub fn new(formatter: impl Formatter + 'static, writer: impl StringWriter + 'static) -> Self {
        Self {
            formatter: Box::new(formatter),
            writer: Box::new(writer),
        }
    }
}

impl Outputter for StringOutputter {
    fn output(&self, msg: &Message) {
        self.writer.write_str(&self.formatter.format(msg));
    }
}
