//! Logger context and logger handles
//!
//! A [`LoggerContext`] owns the logger tree and the output plugin registry
//! behind a single lock. [`Logger`] values are cheap handles onto one node of
//! that tree.

use super::{
    error::Result,
    log_level::LogLevel,
    message::Message,
    metrics::LoggerMetrics,
    outputter::{Outputter, SharedOutputter},
    plugin::{OutputPlugin, Options, PluginRegistry},
    tree::{NodeId, Tree, ROOT, ROOT_NAME},
};
use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::panic::{self, AssertUnwindSafe, Location};
use std::sync::Arc;

pub(crate) struct State {
    pub(crate) tree: Tree,
    pub(crate) plugins: PluginRegistry,
}

struct Shared {
    state: Mutex<State>,
    metrics: LoggerMetrics,
}

/// Process-wide (or test-local) logging state: the logger tree rooted at
/// `root` and the output plugins configuration can refer to.
///
/// # Example
///
/// ```
/// use rust_logger_hierarchy::prelude::*;
///
/// let context = LoggerContext::new();
/// let db = context.get("app.db");
/// assert_eq!(db.name(), "app.db");
/// assert!(db == context.get("app.db"));
///
/// context.root().set_threshold(LogLevel::INFO);
/// context.configure();
/// assert_eq!(db.threshold(), LogLevel::INFO);
/// ```
#[derive(Clone)]
pub struct LoggerContext {
    shared: Arc<Shared>,
}

impl LoggerContext {
    /// Context with the `console`, `file` and `syslog` plugins registered.
    #[must_use]
    pub fn new() -> Self {
        let context = Self::bare();
        crate::plugins::register_builtin(&context);
        context
    }

    /// Context with an empty plugin registry.
    #[must_use]
    pub fn bare() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    tree: Tree::new(0),
                    plugins: PluginRegistry::default(),
                }),
                metrics: LoggerMetrics::new(),
            }),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, State> {
        self.shared.state.lock()
    }

    #[must_use]
    pub fn root(&self) -> Logger {
        let generation = self.lock().tree.generation;
        self.handle(ROOT, Arc::from(""), generation)
    }

    /// Logger for a dotted name, created along with any missing ancestors.
    ///
    /// The same name always yields a handle on the same node.
    pub fn get(&self, name: &str) -> Logger {
        let (id, generation) = {
            let mut state = self.lock();
            (state.tree.resolve(name), state.tree.generation)
        };
        self.handle(id, Arc::from(name), generation)
    }

    fn handle(&self, id: NodeId, path: Arc<str>, generation: u64) -> Logger {
        Logger {
            shared: Arc::clone(&self.shared),
            id,
            path,
            generation,
        }
    }

    /// Register an output plugin, replacing any plugin of the same name.
    pub fn register_output_plugin(&self, name: impl Into<String>, plugin: impl OutputPlugin + 'static) {
        self.lock().plugins.register(name, Arc::new(plugin));
    }

    pub fn has_output_plugin(&self, name: &str) -> bool {
        self.lock().plugins.contains(name)
    }

    /// Build an outputter with a registered plugin.
    ///
    /// The plugin runs outside the context lock.
    pub fn create_outputter(&self, plugin: &str, options: &Options) -> Result<SharedOutputter> {
        let factory = self.lock().plugins.lookup(plugin)?;
        factory.create_outputter(options)
    }

    /// Inheritance pass from the root; loggers created afterwards copy their
    /// parent's threshold.
    pub fn configure(&self) {
        let mut state = self.lock();
        state.tree.inherit_thresholds(ROOT);
        state.tree.configured = true;
    }

    pub fn is_configured(&self) -> bool {
        self.lock().tree.configured
    }

    /// Discard every logger, threshold and attached outputter.
    ///
    /// Registered plugins are kept. Existing handles stay usable and refer to
    /// the node of the same name in the new tree.
    pub fn reset(&self) {
        let mut state = self.lock();
        let generation = state.tree.generation + 1;
        state.tree = Tree::new(generation);
    }

    /// Swap in a tree built elsewhere.
    pub(crate) fn replace_tree(&self, mut tree: Tree) {
        let mut state = self.lock();
        tree.generation = state.tree.generation + 1;
        state.tree = tree;
    }

    /// Full names of every logger in the tree, sorted.
    pub fn logger_names(&self) -> Vec<String> {
        self.lock().tree.names()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }
}

impl Default for LoggerContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("LoggerContext")
            .field("loggers", &state.tree.len())
            .field("configured", &state.tree.configured)
            .field("generation", &state.tree.generation)
            .finish()
    }
}

/// Handle on one node of a logger tree.
///
/// Cloning a handle is cheap; two handles compare equal when they refer to
/// the same node of the same context.
#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
    id: NodeId,
    /// Dotted path, empty for the root.
    path: Arc<str>,
    generation: u64,
}

impl Logger {
    /// Node of this handle in `tree`, looked up again by name if the tree
    /// was replaced since the handle was made.
    fn locate(&self, tree: &mut Tree) -> NodeId {
        if tree.generation == self.generation {
            self.id
        } else {
            tree.resolve(&self.path)
        }
    }

    /// Like [`Logger::locate`], but never creates the node.
    fn find(&self, tree: &Tree) -> Option<NodeId> {
        if tree.generation == self.generation {
            Some(self.id)
        } else {
            tree.find(&self.path)
        }
    }

    fn with_node<R>(&self, f: impl FnOnce(&mut Tree, NodeId) -> R) -> R {
        let mut state = self.shared.state.lock();
        let id = self.locate(&mut state.tree);
        f(&mut state.tree, id)
    }

    pub fn name(&self) -> &str {
        if self.path.is_empty() {
            ROOT_NAME
        } else {
            &self.path
        }
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Parent logger, `None` for the root.
    pub fn parent(&self) -> Option<Logger> {
        let (parent, path, generation) = self.with_node(|tree, id| {
            let parent = tree.node(id).parent?;
            let path = if parent == ROOT {
                Arc::from("")
            } else {
                Arc::clone(&tree.node(parent).name)
            };
            Some((parent, path, tree.generation))
        })?;
        Some(Logger {
            shared: Arc::clone(&self.shared),
            id: parent,
            path,
            generation,
        })
    }

    pub fn threshold(&self) -> LogLevel {
        self.with_node(|tree, id| tree.node(id).threshold)
    }

    pub fn set_threshold(&self, level: LogLevel) {
        self.with_node(|tree, id| tree.node_mut(id).threshold = level);
    }

    pub fn no_propagate(&self) -> bool {
        self.with_node(|tree, id| tree.node(id).no_propagate)
    }

    /// Stop messages accepted on this logger, or propagated to it, from
    /// reaching the outputters of its ancestors.
    pub fn set_no_propagate(&self, no_propagate: bool) {
        self.with_node(|tree, id| tree.node_mut(id).no_propagate = no_propagate);
    }

    /// Attach an outputter; outputters fire in attachment order.
    pub fn add_output(&self, outputter: SharedOutputter) {
        self.with_node(|tree, id| tree.node_mut(id).outputs.push(outputter));
    }

    pub fn add_outputter(&self, outputter: impl Outputter + 'static) {
        self.add_output(Arc::new(outputter));
    }

    pub fn clear_outputs(&self) {
        self.with_node(|tree, id| tree.node_mut(id).outputs.clear());
    }

    pub fn output_count(&self) -> usize {
        self.with_node(|tree, id| tree.node(id).outputs.len())
    }

    /// Inheritance pass over this logger's subtree.
    pub fn configure(&self) {
        self.with_node(|tree, id| tree.inherit_thresholds(id));
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.threshold()
    }

    /// Threshold check; on success returns the logger name and the outputters
    /// to fire, collected under the lock.
    fn accept(&self, level: LogLevel) -> Option<(Arc<str>, Vec<SharedOutputter>)> {
        let accepted = self.with_node(|tree, id| {
            let node = tree.node(id);
            if level < node.threshold {
                None
            } else {
                Some((Arc::clone(&node.name), tree.propagation_chain(id)))
            }
        });
        if accepted.is_none() {
            self.shared.metrics.record_filtered();
        }
        accepted
    }

    /// Fire every outputter outside the lock.
    ///
    /// **Per-Outputter Panic Isolation**: a panicking outputter is reported
    /// and skipped; the remaining outputters still receive the message.
    fn dispatch(&self, msg: &Message, outputs: &[SharedOutputter]) {
        for (idx, outputter) in outputs.iter().enumerate() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| outputter.output(msg)));
            if let Err(panic_info) = result {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Outputter #{} for '{}' panicked: {}. \
                     Other outputters continue to function.",
                    idx, msg.logger, panic_msg
                );
                self.shared.metrics.record_outputter_panic();
            }
        }
        self.shared.metrics.record_dispatched();
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        let location = Location::caller();
        let Some((name, outputs)) = self.accept(level) else {
            return;
        };
        let msg = Message::new(level, message.into(), name).at(location);
        self.dispatch(&msg, &outputs);
    }

    /// Like [`Logger::log`], but the arguments are only formatted when the
    /// level passes the threshold.
    #[track_caller]
    pub fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        let location = Location::caller();
        let Some((name, outputs)) = self.accept(level) else {
            return;
        };
        let msg = Message::new(level, args.to_string(), name).at(location);
        self.dispatch(&msg, &outputs);
    }

    /// Like [`Logger::log_fmt`] with an explicit source location, for
    /// records forwarded from other logging frontends.
    pub fn log_at(&self, level: LogLevel, args: fmt::Arguments<'_>, file: Option<&'static str>, line: Option<u32>) {
        let Some((name, outputs)) = self.accept(level) else {
            return;
        };
        let mut msg = Message::new(level, args.to_string(), name);
        msg.file = file;
        msg.line = line;
        self.dispatch(&msg, &outputs);
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::TRACE, message);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::DEBUG, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::INFO, message);
    }

    #[inline]
    #[track_caller]
    pub fn notice(&self, message: impl Into<String>) {
        self.log(LogLevel::NOTICE, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::WARN, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::ERROR, message);
    }

    /// Log at FATAL. Does not terminate the process.
    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::FATAL, message);
    }

    #[inline]
    #[track_caller]
    pub fn trace_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::TRACE, args);
    }

    #[inline]
    #[track_caller]
    pub fn debug_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::DEBUG, args);
    }

    #[inline]
    #[track_caller]
    pub fn info_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::INFO, args);
    }

    #[inline]
    #[track_caller]
    pub fn notice_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::NOTICE, args);
    }

    #[inline]
    #[track_caller]
    pub fn warn_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::WARN, args);
    }

    #[inline]
    #[track_caller]
    pub fn error_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::ERROR, args);
    }

    #[inline]
    #[track_caller]
    pub fn fatal_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::FATAL, args);
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        if !Arc::ptr_eq(&self.shared, &other.shared) {
            return false;
        }
        let state = self.shared.state.lock();
        match (self.find(&state.tree), other.find(&state.tree)) {
            (Some(a), Some(b)) => a == b,
            // neither node exists in the current tree yet
            (None, None) => self.path == other.path,
            _ => false,
        }
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("name", &self.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::MemoryOutputter;
    use std::thread;

    #[test]
    fn test_get_returns_same_node() {
        let context = LoggerContext::bare();
        let first = context.get("a.b");
        let second = context.get("a.b");

        assert_eq!(first, second);
        assert_ne!(first, context.get("a"));
        assert_eq!(first.parent().unwrap(), context.get("a"));
        assert_eq!(context.get("a").parent().unwrap(), context.root());
        assert!(context.root().parent().is_none());
        assert_eq!(context.get(""), context.root());
    }

    #[test]
    fn test_handles_from_different_contexts_differ() {
        let one = LoggerContext::bare();
        let two = LoggerContext::bare();
        assert_ne!(one.get("x"), two.get("x"));
    }

    #[test]
    fn test_names() {
        let context = LoggerContext::bare();
        assert_eq!(context.root().name(), "root");
        assert!(context.root().is_root());
        assert_eq!(context.get("svc.api").name(), "svc.api");
        assert_eq!(context.get("svc.api").parent().unwrap().name(), "svc");
        assert_eq!(context.logger_names(), vec!["svc", "svc.api"]);
    }

    #[test]
    fn test_threshold_gates_on_originating_logger() {
        let context = LoggerContext::bare();
        let memory = MemoryOutputter::new();
        let logger = context.get("worker");
        logger.add_outputter(memory.clone());
        logger.set_threshold(LogLevel::WARN);

        logger.info("dropped");
        logger.warn("kept");
        logger.fatal("also kept");

        assert_eq!(memory.texts(), vec!["kept", "also kept"]);
        assert_eq!(context.metrics().filtered(), 1);
        assert_eq!(context.metrics().dispatched(), 2);
    }

    #[test]
    fn test_undefined_threshold_accepts_everything() {
        let context = LoggerContext::bare();
        let memory = MemoryOutputter::new();
        context.root().add_outputter(memory.clone());

        context.get("fresh").log(LogLevel::custom(i32::MIN + 1), "weakest");
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_propagation_ignores_ancestor_thresholds() {
        let context = LoggerContext::bare();
        let root_sink = MemoryOutputter::new();
        let child_sink = MemoryOutputter::new();

        let root = context.root();
        root.set_threshold(LogLevel::ERROR);
        root.add_outputter(root_sink.clone());

        let child = context.get("chatty");
        child.set_threshold(LogLevel::TRACE);
        child.add_outputter(child_sink.clone());

        child.trace("fine detail");

        assert_eq!(child_sink.texts(), vec!["fine detail"]);
        assert_eq!(root_sink.texts(), vec!["fine detail"]);
    }

    #[test]
    fn test_no_propagate_dams_the_chain() {
        let context = LoggerContext::bare();
        let root_sink = MemoryOutputter::new();
        let mid_sink = MemoryOutputter::new();

        context.root().add_outputter(root_sink.clone());
        let mid = context.get("a.b");
        mid.add_outputter(mid_sink.clone());
        mid.set_no_propagate(true);

        context.get("a.b.c").info("deep");
        context.get("a").info("shallow");

        assert_eq!(mid_sink.texts(), vec!["deep"]);
        assert_eq!(root_sink.texts(), vec!["shallow"]);
    }

    #[test]
    fn test_message_fields() {
        let context = LoggerContext::bare();
        let memory = MemoryOutputter::new();
        context.root().add_outputter(memory.clone());

        let line = line!() + 1;
        context.get("svc.http").notice("listening");

        let messages = memory.messages();
        assert_eq!(messages.len(), 1);
        let msg = &messages[0];
        assert_eq!(msg.level, LogLevel::NOTICE);
        assert_eq!(&*msg.logger, "svc.http");
        assert_eq!(msg.file_name(), Some("logger.rs"));
        assert_eq!(msg.line, Some(line));
    }

    #[test]
    fn test_log_fmt_skips_formatting_when_filtered() {
        struct Loud;
        impl fmt::Display for Loud {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                panic!("formatted a filtered message");
            }
        }

        let context = LoggerContext::bare();
        let logger = context.get("quiet");
        logger.set_threshold(LogLevel::ERROR);
        logger.debug_fmt(format_args!("{}", Loud));

        let memory = MemoryOutputter::new();
        logger.add_outputter(memory.clone());
        logger.error_fmt(format_args!("code {}", 7));
        assert_eq!(memory.texts(), vec!["code 7"]);
    }

    #[test]
    fn test_panicking_outputter_is_isolated() {
        let context = LoggerContext::bare();
        let memory = MemoryOutputter::new();
        let root = context.root();
        root.add_outputter(|_: &Message| panic!("sink exploded"));
        root.add_outputter(memory.clone());

        root.error("still delivered");

        assert_eq!(memory.texts(), vec!["still delivered"]);
        assert_eq!(context.metrics().outputter_panics(), 1);
    }

    #[test]
    fn test_configure_from_subtree() {
        let context = LoggerContext::bare();
        let a = context.get("a");
        a.set_threshold(LogLevel::NOTICE);
        let leaf = context.get("a.b.c");
        let other = context.get("z");

        a.configure();

        assert_eq!(leaf.threshold(), LogLevel::NOTICE);
        assert!(other.threshold().is_undefined());
        assert!(!context.is_configured());
    }

    #[test]
    fn test_reset_keeps_handles_usable() {
        let context = LoggerContext::bare();
        let memory = MemoryOutputter::new();
        let logger = context.get("kept.handle");
        logger.add_outputter(memory.clone());
        logger.set_threshold(LogLevel::ERROR);

        context.reset();

        assert_eq!(logger.output_count(), 0);
        assert!(logger.threshold().is_undefined());
        assert!(!context.is_configured());
        assert_eq!(logger, context.get("kept.handle"));

        logger.add_outputter(memory.clone());
        logger.info("after reset");
        assert_eq!(memory.texts(), vec!["after reset"]);
    }

    #[test]
    fn test_comparing_stale_handles_creates_nothing() {
        let context = LoggerContext::bare();
        let first = context.get("gone.soon");
        let second = first.clone();
        let other = context.get("gone.later");

        context.reset();

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert!(context.logger_names().is_empty());

        let fresh = context.get("gone.soon");
        assert_eq!(first, fresh);
        assert_ne!(other, fresh);
        assert_eq!(context.logger_names(), vec!["gone", "gone.soon"]);
    }

    #[test]
    fn test_concurrent_get_creates_each_node_once() {
        let context = LoggerContext::bare();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let context = context.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        context.get(&format!("pool.worker{}.task", i % 5));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread panicked");
        }

        // pool + 5 workers + 5 tasks
        assert_eq!(context.logger_names().len(), 11);
    }
}
