// SPDX-License-Identifier: MIT OR Apache-2.0

//! The logger-name tree owned by each [`LogContext`](crate::LogContext).
//!
//! One [`LoggerNode`] exists per dotted-name path that has ever been requested, including
//! every intermediate path: asking for `a.b.c` creates `a`, `a.b` and `a.b.c`. Children
//! are owned by their parent; the parent link is a non-owning [`Weak`].
//!
//! Lookups of existing nodes walk the concurrent child maps without taking the tree lock.
//! Creating nodes and recomputing effective levels happen under the tree lock, so a new
//! node always inherits the effective level its parent has at that moment.
//!
//! Tree walks (level propagation, name collection, teardown) use an explicit work list, so
//! the depth of a name does not bound the thread's stack.

use crate::Level;
use crate::logger::Logger;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Weak};

/// The effective level of a root logger that has no explicit level.
pub(crate) const DEFAULT_ROOT_LEVEL: Level = Level::Info;

const NO_LEVEL: u8 = u8::MAX;

pub(crate) struct LoggerNode {
    /// Full dotted name; the root is `""`.
    name: String,
    parent: Weak<LoggerNode>,
    children: DashMap<String, Arc<LoggerNode>>,
    tree_lock: Arc<Mutex<()>>,
    /// Explicit level, or `NO_LEVEL`.  Written only under the tree lock.
    level: AtomicU8,
    /// Written only under the tree lock.
    effective_level: AtomicU8,
    materialized: AtomicBool,
}

impl LoggerNode {
    pub(crate) fn new_root(tree_lock: Arc<Mutex<()>>) -> Arc<LoggerNode> {
        Arc::new(LoggerNode {
            name: String::new(),
            parent: Weak::new(),
            children: DashMap::new(),
            tree_lock,
            level: AtomicU8::new(NO_LEVEL),
            effective_level: AtomicU8::new(DEFAULT_ROOT_LEVEL.to_u8()),
            materialized: AtomicBool::new(false),
        })
    }

    /// Caller must hold the tree lock.
    fn new_child_locked(parent: &Arc<LoggerNode>, segment: &str) -> Arc<LoggerNode> {
        let name = if parent.name.is_empty() {
            segment.to_owned()
        } else {
            format!("{}.{}", parent.name, segment)
        };
        Arc::new(LoggerNode {
            name,
            parent: Arc::downgrade(parent),
            children: DashMap::new(),
            tree_lock: parent.tree_lock.clone(),
            level: AtomicU8::new(NO_LEVEL),
            effective_level: AtomicU8::new(parent.effective_level.load(Ordering::Acquire)),
            materialized: AtomicBool::new(false),
        })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn parent(&self) -> Option<Arc<LoggerNode>> {
        self.parent.upgrade()
    }

    fn child(&self, segment: &str) -> Option<Arc<LoggerNode>> {
        self.children
            .get(segment)
            .map(|child| Arc::clone(child.value()))
    }

    /// Returns the node for `name`, creating it and any missing intermediate nodes.
    pub(crate) fn get_or_create(self: &Arc<Self>, name: &str) -> Arc<LoggerNode> {
        if let Some(node) = self.get_if_exists(name) {
            return node;
        }
        let _tree = self.tree_lock.lock();
        let mut node = Arc::clone(self);
        for segment in name.split('.') {
            node = match node.child(segment) {
                Some(child) => child,
                None => {
                    let child = LoggerNode::new_child_locked(&node, segment);
                    node.children.insert(segment.to_owned(), child.clone());
                    child
                }
            };
        }
        node
    }

    /// Returns the node for `name` if it has been created, without creating anything.
    pub(crate) fn get_if_exists(self: &Arc<Self>, name: &str) -> Option<Arc<LoggerNode>> {
        if name.is_empty() {
            return Some(Arc::clone(self));
        }
        let mut node = Arc::clone(self);
        for segment in name.split('.') {
            node = node.child(segment)?;
        }
        Some(node)
    }

    /// Returns this node's logger, materializing it on first request.
    pub(crate) fn get_or_create_logger(self: &Arc<Self>) -> Logger {
        if !self.materialized.swap(true, Ordering::AcqRel) {
            tracing::trace!(logger = %self.name, "logger materialized");
        }
        Logger::new(Arc::clone(self))
    }

    /// Returns this node's logger if it has been materialized.
    pub(crate) fn get_logger(self: &Arc<Self>) -> Option<Logger> {
        self.materialized
            .load(Ordering::Acquire)
            .then(|| Logger::new(Arc::clone(self)))
    }

    pub(crate) fn level(&self) -> Option<Level> {
        match self.level.load(Ordering::Acquire) {
            NO_LEVEL => None,
            value => Some(Level::from_u8(value)),
        }
    }

    pub(crate) fn effective_level(&self) -> Level {
        Level::from_u8(self.effective_level.load(Ordering::Acquire))
    }

    /// Sets or clears the explicit level and recomputes effective levels below this node.
    pub(crate) fn set_level(&self, level: Option<Level>) {
        let _tree = self.tree_lock.lock();
        self.level
            .store(level.map_or(NO_LEVEL, Level::to_u8), Ordering::Release);
        let effective = match (level, self.parent()) {
            (Some(level), _) => level,
            (None, Some(parent)) => parent.effective_level(),
            (None, None) => DEFAULT_ROOT_LEVEL,
        };
        self.propagate_locked(effective);
    }

    fn child_nodes(&self) -> impl Iterator<Item = Arc<LoggerNode>> + '_ {
        self.children.iter().map(|child| Arc::clone(child.value()))
    }

    /// Caller must hold the tree lock.
    fn propagate_locked(&self, effective: Level) {
        self.effective_level
            .store(effective.to_u8(), Ordering::Release);
        let mut pending: Vec<Arc<LoggerNode>> = self
            .child_nodes()
            .filter(|child| child.level().is_none())
            .collect();
        while let Some(node) = pending.pop() {
            node.effective_level
                .store(effective.to_u8(), Ordering::Release);
            pending.extend(node.child_nodes().filter(|child| child.level().is_none()));
        }
    }

    /// Appends the names of materialized loggers at or below this node.
    pub(crate) fn collect_logger_names(&self, names: &mut Vec<String>) {
        if self.materialized.load(Ordering::Acquire) {
            names.push(self.name.clone());
        }
        let mut pending: Vec<Arc<LoggerNode>> = self.child_nodes().collect();
        while let Some(node) = pending.pop() {
            if node.materialized.load(Ordering::Acquire) {
                names.push(node.name.clone());
            }
            pending.extend(node.child_nodes());
        }
    }

    fn take_children(&mut self) -> impl Iterator<Item = Arc<LoggerNode>> {
        std::mem::take(&mut self.children)
            .into_iter()
            .map(|(_, child)| child)
    }
}

impl Drop for LoggerNode {
    fn drop(&mut self) {
        // unlink uniquely owned subtrees one level at a time
        let mut pending: Vec<Arc<LoggerNode>> = self.take_children().collect();
        while let Some(node) = pending.pop() {
            if let Ok(mut node) = Arc::try_unwrap(node) {
                pending.extend(node.take_children());
            }
        }
    }
}

impl std::fmt::Debug for LoggerNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerNode")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("effective_level", &self.effective_level())
            .field("children", &self.children.len())
            .finish()
    }
}
