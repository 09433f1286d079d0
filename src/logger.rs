//SPDX-License-Identifier: MIT OR Apache-2.0
use crate::node::LoggerNode;
use crate::{Level, LogContext, LogContextError};
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/**
A named logger within one [`LogContext`].

Loggers are obtained from [`LogContext::logger`] and are cheap to clone. Two `Logger`s
compare equal exactly when they are the same logger: same name *and* same context.

A logger either has an explicit [`Level`] or inherits the effective level of its nearest
ancestor that has one. The root logger (named `""`) defaults to [`Level::Info`].

```
use logspace::{Level, LogContext};

let context = LogContext::create().unwrap();
let parent = context.logger("app");
let child = context.logger("app.db");

parent.set_level(Some(Level::Debug)).unwrap();
assert!(child.is_loggable(Level::Debug));
assert!(!child.is_loggable(Level::Trace));
```
*/
#[derive(Clone)]
pub struct Logger {
    node: Arc<LoggerNode>,
}

impl Logger {
    pub(crate) fn new(node: Arc<LoggerNode>) -> Logger {
        Logger { node }
    }

    /// The full dotted name of this logger.
    pub fn name(&self) -> &str {
        self.node.name()
    }

    /// The level set on this logger, or `None` if it inherits.
    pub fn level(&self) -> Option<Level> {
        self.node.level()
    }

    /// The level this logger actually filters at.
    pub fn effective_level(&self) -> Level {
        self.node.effective_level()
    }

    /// Whether a message at `level` passes this logger's threshold.
    pub fn is_loggable(&self, level: Level) -> bool {
        let effective = self.effective_level();
        effective != Level::Off && level >= effective
    }

    /**
    Sets (or with `None`, clears) this logger's level.

    Requires [`Permission::Control`](crate::Permission::Control).  Descendants that
    inherit are updated before this returns.
    */
    pub fn set_level(&self, level: Option<Level>) -> Result<(), LogContextError> {
        LogContext::check_access()?;
        self.node.set_level(level);
        Ok(())
    }

    /// The logger one segment up, or `None` for the root logger.
    pub fn parent(&self) -> Option<Logger> {
        self.node
            .parent()
            .map(|parent| parent.get_or_create_logger())
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Logger {}

impl Hash for Logger {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.node).hash(state);
    }
}

impl Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &self.level())
            .field("effective_level", &self.effective_level())
            .finish()
    }
}

/*
Boilerplate notes.

# Logger

Clone is cheap (one Arc) and loggers are handed out by value, so Clone makes sense. Copy's out.
PartialEq/Eq/Hash are provenance-based: the same node in the same context.  Two contexts
with a logger of the same name have *different* loggers.
Ord makes no sense.
Default makes no sense, a logger only exists inside a context.
Display is not very sensible; name() is there.
Send/Sync, yes.
*/
