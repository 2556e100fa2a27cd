//! In-memory outputter, mostly for tests
//!
//! ```
//! use rust_logger_hierarchy::prelude::*;
//! use rust_logger_hierarchy::plugins::{MemoryOutputter, MemoryPlugin};
//!
//! let context = LoggerContext::bare();
//! let sink = MemoryOutputter::new();
//! context.register_output_plugin("memory", MemoryPlugin::new(sink.clone()));
//!
//! let config: Config = "[loggers]\nroot = INFO, mem\n[mem]\ntype = memory\n".parse().unwrap();
//! context.apply(&config).unwrap();
//!
//! context.get("app").info("hello");
//! assert_eq!(sink.texts(), vec!["hello"]);
//! ```

use crate::core::{Message, OutputPlugin, Options, Outputter, Result, SharedOutputter};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects every message it receives. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemoryOutputter {
    messages: Arc<Mutex<Vec<Message>>>,
}

impl MemoryOutputter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.messages.lock().iter().map(|m| m.text.clone()).collect()
    }

    /// Drain the buffer.
    pub fn take(&self) -> Vec<Message> {
        std::mem::take(&mut *self.messages.lock())
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    pub fn clear(&self) {
        self.messages.lock().clear();
    }
}

impl Outputter for MemoryOutputter {
    fn output(&self, msg: &Message) {
        self.messages.lock().push(msg.clone());
    }
}

/// Plugin handing out outputters that all feed one [`MemoryOutputter`].
#[derive(Clone, Default)]
pub struct MemoryPlugin {
    sink: MemoryOutputter,
}

impl MemoryPlugin {
    pub fn new(sink: MemoryOutputter) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &MemoryOutputter {
        &self.sink
    }
}

impl OutputPlugin for MemoryPlugin {
    fn create_outputter(&self, _options: &Options) -> Result<SharedOutputter> {
        Ok(Arc::new(self.sink.clone()))
    }
}
