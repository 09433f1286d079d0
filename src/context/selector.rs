// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide context selector.

use super::context_impl::LogContext;
use crate::LogContextError;
use crate::permission::{Permission, check_permission};
use arc_swap::ArcSwap;
use std::fmt::Debug;
use std::sync::{Arc, OnceLock};

/// Chooses the active [`LogContext`] for the caller.
///
/// Install one with [`LogContext::set_selector`]. The selector is consulted on every call
/// to [`LogContext::current`], from any thread, so implementations should be fast.
pub trait LogContextSelector: Debug + Send + Sync {
    /// The context that is active for the calling thread right now.
    fn log_context(&self) -> LogContext;
}

/// The selector installed at startup: always the [system context](LogContext::system).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLogContextSelector;

impl LogContextSelector for DefaultLogContextSelector {
    fn log_context(&self) -> LogContext {
        LogContext::system()
    }
}

static LOG_CONTEXT_SELECTOR: OnceLock<ArcSwap<Arc<dyn LogContextSelector>>> = OnceLock::new();

fn installed_selector() -> &'static ArcSwap<Arc<dyn LogContextSelector>> {
    LOG_CONTEXT_SELECTOR.get_or_init(|| {
        let default: Arc<dyn LogContextSelector> = Arc::new(DefaultLogContextSelector);
        ArcSwap::from_pointee(default)
    })
}

impl LogContext {
    /// Returns the currently active log context, as chosen by the installed selector.
    #[inline]
    pub fn current() -> LogContext {
        installed_selector().load_full().log_context()
    }

    /**
    Installs a new process-wide selector.

    Fails with [`LogContextError::InvalidArgument`] for `None`, then with
    [`LogContextError::PermissionDenied`] unless [`Permission::SetContextSelector`] is held.
    On failure the previous selector stays installed. On success every later call to
    [`LogContext::current`], on any thread, uses `selector`.

    ```
    use logspace::{LogContext, LogContextSelector};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Fixed(LogContext);
    impl LogContextSelector for Fixed {
        fn log_context(&self) -> LogContext {
            self.0.clone()
        }
    }

    let context = LogContext::create().unwrap();
    LogContext::set_selector(Some(Arc::new(Fixed(context.clone())))).unwrap();
    assert_eq!(LogContext::current(), context);

    assert!(LogContext::set_selector(None).is_err());
    assert_eq!(LogContext::current(), context);
    ```
    */
    pub fn set_selector(
        selector: Option<Arc<dyn LogContextSelector>>,
    ) -> Result<(), LogContextError> {
        let selector = selector.ok_or_else(|| {
            LogContextError::InvalidArgument("selector must not be None".to_string())
        })?;
        check_permission(Permission::SetContextSelector)?;
        tracing::debug!(?selector, "installing log context selector");
        let previous = installed_selector().swap(Arc::new(selector));
        drop(previous);
        Ok(())
    }

    /// Reinstalls the [`DefaultLogContextSelector`], under the same rules as [`set_selector`](LogContext::set_selector).
    pub fn reset_selector() -> Result<(), LogContextError> {
        Self::set_selector(Some(Arc::new(DefaultLogContextSelector)))
    }
}
