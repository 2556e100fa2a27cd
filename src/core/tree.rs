//! Arena-backed logger tree
//!
//! Nodes live in a `Vec` and refer to each other by index, so the parent
//! link is a plain `Option<NodeId>` and the whole tree is dropped at once on
//! reset. Index 0 is always the root.

use super::log_level::LogLevel;
use super::outputter::SharedOutputter;
use std::collections::HashMap;
use std::sync::Arc;

pub(crate) type NodeId = usize;

pub(crate) const ROOT: NodeId = 0;
pub(crate) const ROOT_NAME: &str = "root";

pub(crate) struct Node {
    pub(crate) name: Arc<str>,
    pub(crate) threshold: LogLevel,
    pub(crate) no_propagate: bool,
    pub(crate) parent: Option<NodeId>,
    children: HashMap<String, NodeId>,
    pub(crate) outputs: Vec<SharedOutputter>,
}

impl Node {
    fn new(name: Arc<str>, parent: Option<NodeId>, threshold: LogLevel) -> Self {
        Self {
            name,
            threshold,
            no_propagate: false,
            parent,
            children: HashMap::new(),
            outputs: Vec::new(),
        }
    }
}

pub(crate) struct Tree {
    nodes: Vec<Node>,
    /// Set once an inheritance pass has completed; new nodes then copy their
    /// parent's threshold instead of starting out undefined.
    pub(crate) configured: bool,
    /// Bumped every time the live tree is replaced, so that logger handles
    /// taken from an older tree know to look their node up again.
    pub(crate) generation: u64,
}

impl Tree {
    pub(crate) fn new(generation: u64) -> Self {
        Self {
            nodes: vec![Node::new(Arc::from(ROOT_NAME), None, LogLevel::UNDEFINED)],
            configured: false,
            generation,
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Find the node for a dotted path, creating it and any missing
    /// ancestors. The empty path is the root.
    pub(crate) fn resolve(&mut self, path: &str) -> NodeId {
        if path.is_empty() {
            return ROOT;
        }

        let mut current = ROOT;
        let mut end = 0;
        for (idx, part) in path.split('.').enumerate() {
            end += if idx == 0 { part.len() } else { part.len() + 1 };
            let existing = self.nodes[current].children.get(part).copied();
            current = match existing {
                Some(child) => child,
                None => self.insert_child(current, part, &path[..end]),
            };
        }
        current
    }

    /// Look a path up without creating anything.
    pub(crate) fn find(&self, path: &str) -> Option<NodeId> {
        if path.is_empty() {
            return Some(ROOT);
        }
        path.split('.')
            .try_fold(ROOT, |current, part| self.nodes[current].children.get(part).copied())
    }

    fn insert_child(&mut self, parent: NodeId, part: &str, full_name: &str) -> NodeId {
        let threshold = if self.configured {
            self.nodes[parent].threshold
        } else {
            LogLevel::UNDEFINED
        };
        let id = self.nodes.len();
        self.nodes
            .push(Node::new(Arc::from(full_name), Some(parent), threshold));
        self.nodes[parent].children.insert(part.to_string(), id);
        id
    }

    /// Give every undefined descendant of `from` the threshold of its nearest
    /// ancestor. Running it again changes nothing.
    pub(crate) fn inherit_thresholds(&mut self, from: NodeId) {
        let mut pending = vec![from];
        while let Some(id) = pending.pop() {
            let threshold = self.nodes[id].threshold;
            let children: Vec<NodeId> = self.nodes[id].children.values().copied().collect();
            for child in children {
                let node = &mut self.nodes[child];
                if node.threshold.is_undefined() {
                    node.threshold = threshold;
                }
                pending.push(child);
            }
        }
    }

    /// Outputters that fire for a message accepted on `id`, in firing order:
    /// the node's own, then each ancestor's until propagation is dammed.
    pub(crate) fn propagation_chain(&self, id: NodeId) -> Vec<SharedOutputter> {
        let mut outputs = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id];
            outputs.extend(node.outputs.iter().cloned());
            current = if node.no_propagate { None } else { node.parent };
        }
        outputs
    }

    /// Full names of every node except the root, sorted.
    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.nodes[1..].iter().map(|n| n.name.to_string()).collect();
        names.sort();
        names
    }
}
