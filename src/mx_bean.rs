// SPDX-License-Identifier: MIT OR Apache-2.0

//! Management view of one [`LogContext`](crate::LogContext)'s loggers.
//!
//! Every context owns exactly one [`LoggingMxBean`], created with it and reached through
//! [`LogContext::mx_bean`](crate::LogContext::mx_bean). It addresses loggers by name and
//! levels by their string form, which makes it a convenient surface for admin tooling.
//!
//! The bean does not keep its context alive. Once the context is gone, queries return
//! empty answers and [`set_logger_level`](LoggingMxBean::set_logger_level) fails.

use crate::context::LogContextInner;
use crate::{Level, LogContextError, Logger};
use std::sync::Weak;

/// Management handle for the loggers of one context.
///
/// Obtained from [`LogContext::mx_bean`](crate::LogContext::mx_bean).
pub struct LoggingMxBean {
    context: Weak<LogContextInner>,
}

impl LoggingMxBean {
    pub(crate) fn new(context: Weak<LogContextInner>) -> Self {
        LoggingMxBean { context }
    }

    fn existing_logger(context: &LogContextInner, name: &str) -> Option<Logger> {
        context.root.get_if_exists(name)?.get_logger()
    }

    /// Names of every logger created in this context, sorted.
    pub fn logger_names(&self) -> Vec<String> {
        let Some(context) = self.context.upgrade() else {
            return Vec::new();
        };
        let mut names = Vec::new();
        {
            let _tree = context.tree_lock.lock();
            context.root.collect_logger_names(&mut names);
        }
        names.sort();
        names
    }

    /**
    The explicit level of the logger `name`.

    Returns `None` if no such logger exists, and `Some("")` if it exists but inherits its level.
    */
    pub fn logger_level(&self, name: &str) -> Option<String> {
        let context = self.context.upgrade()?;
        let logger = Self::existing_logger(&context, name)?;
        Some(
            logger
                .level()
                .map(|level| level.name().to_string())
                .unwrap_or_default(),
        )
    }

    /**
    Sets the level of the existing logger `name` from a level name; `None` clears it.

    Fails with [`LogContextError::InvalidArgument`] for an unknown logger or level name, and
    with [`LogContextError::PermissionDenied`] unless [`Permission::Control`](crate::Permission::Control)
    is held.

    ```
    use logspace::LogContext;

    let context = LogContext::create().unwrap();
    let logger = context.logger("app");
    let bean = context.mx_bean();

    bean.set_logger_level("app", Some("warn")).unwrap();
    assert_eq!(bean.logger_level("app").as_deref(), Some("WARN"));

    bean.set_logger_level("app", None).unwrap();
    assert_eq!(bean.logger_level("app").as_deref(), Some(""));
    assert!(bean.set_logger_level("missing", Some("INFO")).is_err());
    # drop(logger);
    ```
    */
    pub fn set_logger_level(&self, name: &str, level: Option<&str>) -> Result<(), LogContextError> {
        let level = level.map(str::parse::<Level>).transpose()?;
        let logger = self
            .context
            .upgrade()
            .and_then(|context| Self::existing_logger(&context, name))
            .ok_or_else(|| LogContextError::InvalidArgument(format!("no logger named {name:?}")))?;
        logger.set_level(level)
    }

    /**
    The name of the nearest existing ancestor of the logger `name`.

    Returns `None` if no such logger exists, and `Some("")` for the root logger or when no
    ancestor logger has been created.
    */
    pub fn parent_logger_name(&self, name: &str) -> Option<String> {
        let context = self.context.upgrade()?;
        let logger = Self::existing_logger(&context, name)?;
        let mut node = context.root.get_if_exists(logger.name())?.parent();
        while let Some(ancestor) = node {
            if let Some(parent) = ancestor.get_logger() {
                return Some(parent.name().to_string());
            }
            node = ancestor.parent();
        }
        Some(String::new())
    }
}

impl std::fmt::Debug for LoggingMxBean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingMxBean")
            .field("context", &self.context.as_ptr())
            .finish()
    }
}
