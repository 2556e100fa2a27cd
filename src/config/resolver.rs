//! Applying a [`Config`] to a [`LoggerContext`]

use super::Config;
use crate::core::tree::{Tree, ROOT, ROOT_NAME};
use crate::core::{LogLevel, LoggerContext, LoggerError, Options, Result, SharedOutputter, ThresholdOutputter};
use std::collections::HashMap;
use std::sync::Arc;

/// Logger entry token that stops propagation to ancestors.
pub const NOPROPAGATE: &str = "nopropagate";

const TYPE_KEY: &str = "type";
const THRESHOLD_KEY: &str = "threshold";

impl LoggerContext {
    /// Merge a configuration into the live tree.
    ///
    /// Outputs named by a logger entry are appended to whatever the logger
    /// already has. Every output section is built before the tree is touched,
    /// but an error in the `loggers` section leaves the entries processed
    /// before it in place.
    pub fn apply(&self, config: &Config) -> Result<()> {
        let outputs = self.build_outputs(config)?;
        let loggers = loggers_section(config)?;

        let mut state = self.lock();
        apply_loggers(&mut state.tree, loggers, &outputs)?;
        state.tree.inherit_thresholds(ROOT);
        state.tree.configured = true;
        Ok(())
    }

    /// Replace the whole tree with one built from `config`.
    ///
    /// The new tree is assembled aside and swapped in only when the whole
    /// configuration resolved; on error the live tree is untouched. Existing
    /// logger handles follow the swap.
    pub fn reconfigure(&self, config: &Config) -> Result<()> {
        let outputs = self.build_outputs(config)?;
        let loggers = loggers_section(config)?;

        let mut tree = Tree::new(0);
        apply_loggers(&mut tree, loggers, &outputs)?;
        tree.inherit_thresholds(ROOT);
        tree.configured = true;

        self.replace_tree(tree);
        Ok(())
    }

    fn build_outputs(&self, config: &Config) -> Result<HashMap<String, SharedOutputter>> {
        let mut outputs = HashMap::new();
        for (name, options) in config.sections() {
            if name == Config::LOGGERS || name.is_empty() {
                continue;
            }
            outputs.insert(name.to_string(), self.build_output(options)?);
        }
        Ok(outputs)
    }

    fn build_output(&self, options: &Options) -> Result<SharedOutputter> {
        let plugin = options.get(TYPE_KEY).ok_or(LoggerError::TypeNotSpecified)?;
        let outputter = self.create_outputter(plugin, options)?;

        match options.get(THRESHOLD_KEY) {
            Some(threshold) => {
                let level: LogLevel = threshold
                    .parse()
                    .map_err(|_| LoggerError::InvalidThreshold(threshold.clone()))?;
                Ok(Arc::new(ThresholdOutputter::new(level, outputter)))
            }
            None => Ok(outputter),
        }
    }
}

fn loggers_section(config: &Config) -> Result<&Options> {
    config
        .section(Config::LOGGERS)
        .ok_or(LoggerError::LoggersSectionMissing)
}

fn apply_loggers(tree: &mut Tree, loggers: &Options, outputs: &HashMap<String, SharedOutputter>) -> Result<()> {
    for (name, entry) in loggers {
        let mut tokens = entry.split(',').map(str::trim).filter(|t| !t.is_empty());
        let level: LogLevel = tokens.next().unwrap_or_default().parse()?;

        let id = if name == ROOT_NAME { ROOT } else { tree.resolve(name) };
        tree.node_mut(id).threshold = level;

        for token in tokens {
            if token == NOPROPAGATE {
                tree.node_mut(id).no_propagate = true;
                continue;
            }
            let outputter = outputs
                .get(token)
                .ok_or_else(|| LoggerError::UnknownOutput(token.to_string()))?;
            tree.node_mut(id).outputs.push(Arc::clone(outputter));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::{MemoryOutputter, MemoryPlugin};

    fn context_with_memory() -> (LoggerContext, MemoryOutputter) {
        let context = LoggerContext::bare();
        let sink = MemoryOutputter::new();
        context.register_output_plugin("memory", MemoryPlugin::new(sink.clone()));
        (context, sink)
    }

    #[test]
    fn test_apply_sets_thresholds_and_outputs() {
        let (context, sink) = context_with_memory();
        let config: Config = "
            [loggers]
            root = WARN, mem
            net.http = DEBUG
            [mem]
            type = memory
        "
        .parse()
        .unwrap();

        context.apply(&config).unwrap();

        assert!(context.is_configured());
        assert_eq!(context.root().threshold(), LogLevel::WARN);
        assert_eq!(context.get("net").threshold(), LogLevel::WARN);
        assert_eq!(context.get("net.http").threshold(), LogLevel::DEBUG);
        assert_eq!(context.get("net.http.client").threshold(), LogLevel::DEBUG);

        context.get("net.http").debug("request");
        context.get("net").info("dropped");
        assert_eq!(sink.texts(), vec!["request"]);
    }

    #[test]
    fn test_level_names_case_insensitive() {
        let (context, _) = context_with_memory();
        let config: Config = "[loggers]\nroot = warn\na = Trace\n".parse().unwrap();
        context.apply(&config).unwrap();
        assert_eq!(context.root().threshold(), LogLevel::WARN);
        assert_eq!(context.get("a").threshold(), LogLevel::TRACE);
    }

    #[test]
    fn test_nopropagate_token() {
        let (context, sink) = context_with_memory();
        let config: Config = "
            [loggers]
            root = INFO, mem
            quiet = INFO, nopropagate
            [mem]
            type = memory
        "
        .parse()
        .unwrap();
        context.apply(&config).unwrap();

        assert!(context.get("quiet").no_propagate());
        context.get("quiet.child").info("swallowed");
        context.get("loud").info("heard");
        assert_eq!(sink.texts(), vec!["heard"]);
    }

    #[test]
    fn test_output_threshold_wraps() {
        let (context, sink) = context_with_memory();
        let config: Config = "
            [loggers]
            root = TRACE, mem
            [mem]
            type = memory
            threshold = error
        "
        .parse()
        .unwrap();
        context.apply(&config).unwrap();

        context.root().warn("below output threshold");
        context.root().error("passes");
        assert_eq!(sink.texts(), vec!["passes"]);
    }

    #[test]
    fn test_output_errors() {
        let (context, _) = context_with_memory();

        let missing_type: Config = "[loggers]\nroot = INFO\n[out]\nformat = $msg\n".parse().unwrap();
        assert!(matches!(context.apply(&missing_type), Err(LoggerError::TypeNotSpecified)));

        let empty_type: Config = "[loggers]\nroot = INFO\n[out]\ntype =\n".parse().unwrap();
        assert!(matches!(context.apply(&empty_type), Err(LoggerError::UnknownPlugin(p)) if p.is_empty()));

        let bogus: Config = "[loggers]\nroot = INFO\n[out]\ntype = bogus\n".parse().unwrap();
        assert!(matches!(context.apply(&bogus), Err(LoggerError::UnknownPlugin(p)) if p == "bogus"));

        let bad_threshold: Config = "[loggers]\nroot = INFO\n[out]\ntype = memory\nthreshold = loud\n"
            .parse()
            .unwrap();
        assert!(matches!(
            context.apply(&bad_threshold),
            Err(LoggerError::InvalidThreshold(t)) if t == "loud"
        ));

        // output failures happen before the tree is touched
        assert!(!context.is_configured());
        assert!(context.logger_names().is_empty());
    }

    #[test]
    fn test_loggers_section_errors() {
        let (context, _) = context_with_memory();

        let no_loggers: Config = "[out]\ntype = memory\n".parse().unwrap();
        assert!(matches!(context.apply(&no_loggers), Err(LoggerError::LoggersSectionMissing)));

        let bad_level: Config = "[loggers]\nroot = WARNING\n".parse().unwrap();
        assert!(matches!(context.apply(&bad_level), Err(LoggerError::UnknownLevel(l)) if l == "WARNING"));

        let empty_level: Config = "[loggers]\nroot = \n".parse().unwrap();
        assert!(matches!(context.apply(&empty_level), Err(LoggerError::UnknownLevel(_))));

        let bad_output: Config = "[loggers]\nroot = INFO, nowhere\n".parse().unwrap();
        assert!(matches!(context.apply(&bad_output), Err(LoggerError::UnknownOutput(o)) if o == "nowhere"));
    }

    #[test]
    fn test_apply_merges() {
        let (context, sink) = context_with_memory();
        let config: Config = "[loggers]\nroot = INFO, mem\n[mem]\ntype = memory\n".parse().unwrap();

        context.apply(&config).unwrap();
        context.apply(&config).unwrap();

        assert_eq!(context.root().output_count(), 2);
        context.root().info("twice");
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_reconfigure_replaces() {
        let (context, sink) = context_with_memory();
        let first: Config = "[loggers]\nroot = INFO, mem\nold = ERROR\n[mem]\ntype = memory\n"
            .parse()
            .unwrap();
        let second: Config = "[loggers]\nroot = WARN, mem\n[mem]\ntype = memory\n".parse().unwrap();

        let handle = context.get("old");
        context.reconfigure(&first).unwrap();
        assert_eq!(handle.threshold(), LogLevel::ERROR);

        context.reconfigure(&second).unwrap();
        context.reconfigure(&second).unwrap();

        assert_eq!(context.root().output_count(), 1);
        assert_eq!(handle.threshold(), LogLevel::WARN);
        handle.warn("once");
        assert_eq!(sink.texts(), vec!["once"]);
    }

    #[test]
    fn test_reconfigure_failure_keeps_live_tree() {
        let (context, _) = context_with_memory();
        let good: Config = "[loggers]\nroot = NOTICE, mem\n[mem]\ntype = memory\n".parse().unwrap();
        context.reconfigure(&good).unwrap();

        let bad: Config = "[loggers]\nroot = DEBUG\nlater = INFO, nowhere\n".parse().unwrap();
        assert!(context.reconfigure(&bad).is_err());

        assert_eq!(context.root().threshold(), LogLevel::NOTICE);
        assert_eq!(context.root().output_count(), 1);
    }

    #[test]
    fn test_anonymous_section_ignored() {
        let (context, _) = context_with_memory();
        let config: Config = "stray = value\n[loggers]\nroot = INFO\n".parse().unwrap();
        assert!(context.apply(&config).is_ok());
    }
}
