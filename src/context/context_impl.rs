// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core LogContext implementation.

use crate::mx_bean::LoggingMxBean;
use crate::node::LoggerNode;
use crate::permission::{Permission, check_permission};
use crate::{LogContextError, Logger};
use parking_lot::Mutex;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

static SYSTEM_CONTEXT: OnceLock<LogContext> = OnceLock::new();

/// Internal context data.
///
/// Fixed at construction: the root and the lock are never replaced.
pub(crate) struct LogContextInner {
    pub(crate) root: Arc<LoggerNode>,
    /// Taken for any change, or any observation, spanning more than one node.
    /// Not reentrant.
    pub(crate) tree_lock: Arc<Mutex<()>>,
    pub(crate) mx_bean: LoggingMxBean,
}

/// An isolated logging namespace.
///
/// Each `LogContext` owns its own tree of loggers. A `LogContext` is a cheap handle
/// (Arc-based); clones refer to the same context, and equality is identity.
///
/// # Examples
///
/// ```rust
/// use logspace::LogContext;
///
/// let context = LogContext::create().unwrap();
/// assert!(context.logger_if_exists("a.b").is_none());
///
/// let first = context.logger("a.b");
/// let second = context.logger("a.b");
/// assert_eq!(first, second);
/// assert_eq!(context.logger_if_exists("a.b"), Some(first.clone()));
///
/// // another context has its own logger of the same name
/// let other = LogContext::create().unwrap();
/// assert_ne!(other.logger("a.b"), first);
/// ```
#[derive(Clone)]
pub struct LogContext {
    pub(crate) inner: Arc<LogContextInner>,
}

impl PartialEq for LogContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for LogContext {}

impl Hash for LogContext {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

impl std::fmt::Debug for LogContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogContext")
            .field("id", &Arc::as_ptr(&self.inner))
            .field("system", &self.is_system())
            .finish()
    }
}

impl LogContext {
    fn new_unchecked() -> LogContext {
        let inner = Arc::new_cyclic(|weak| {
            let tree_lock = Arc::new(Mutex::new(()));
            LogContextInner {
                root: LoggerNode::new_root(tree_lock.clone()),
                tree_lock,
                mx_bean: LoggingMxBean::new(weak.clone()),
            }
        });
        LogContext { inner }
    }

    /// Creates a new, empty log context.
    ///
    /// Requires [`Permission::CreateContext`]. The system context always exists before
    /// the first context created here.
    pub fn create() -> Result<LogContext, LogContextError> {
        SYSTEM_CONTEXT.get_or_init(Self::new_unchecked);
        check_permission(Permission::CreateContext)?;
        let context = Self::new_unchecked();
        tracing::debug!(id = ?Arc::as_ptr(&context.inner), "log context created");
        Ok(context)
    }

    /// The process-wide system context.
    ///
    /// Every call returns the same context for the lifetime of the process.
    pub fn system() -> LogContext {
        SYSTEM_CONTEXT.get_or_init(Self::new_unchecked).clone()
    }

    /// Whether this is the [system context](LogContext::system).
    pub fn is_system(&self) -> bool {
        SYSTEM_CONTEXT
            .get()
            .is_some_and(|system| system == self)
    }

    /// Returns the logger called `name`, creating it (and any missing ancestors) if needed.
    ///
    /// Repeated calls with the same name return the same logger.
    pub fn logger(&self, name: &str) -> Logger {
        self.inner.root.get_or_create(name).get_or_create_logger()
    }

    /// Returns the logger called `name` if it has been created in this context.
    ///
    /// Ancestors created only implicitly (`a` when only `a.b` was requested) have no logger
    /// yet and return `None`.
    pub fn logger_if_exists(&self, name: &str) -> Option<Logger> {
        self.inner.root.get_if_exists(name)?.get_logger()
    }

    /// The root logger, named `""`.
    pub fn root_logger(&self) -> Logger {
        self.inner.root.get_or_create_logger()
    }

    /// The monitoring handle for this context.
    pub fn mx_bean(&self) -> &LoggingMxBean {
        &self.inner.mx_bean
    }

    /**
    Checks that the caller may perform administrative operations, such as changing levels.

    Fails with [`LogContextError::PermissionDenied`] unless [`Permission::Control`] is held.
    */
    pub fn check_access() -> Result<(), LogContextError> {
        check_permission(Permission::Control)
    }
}
