// SPDX-License-Identifier: MIT OR Apache-2.0

//! A selector that gives each thread its own scoped context.

use super::context_impl::LogContext;
use super::selector::{DefaultLogContextSelector, LogContextSelector};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

thread_local! {
    static THREAD_CONTEXTS: RefCell<Vec<LogContext>> = const { RefCell::new(Vec::new()) };
}

/// Selects the context most recently [entered](ThreadLocalLogContextSelector::enter) on
/// the calling thread, or asks a fallback selector when none is.
///
/// The per-thread stack is shared by every instance of this type; instances differ only
/// in their fallback. The fallback must not itself lead back to the installed selector.
///
/// ```rust
/// use logspace::{LogContext, LogContextSelector, ThreadLocalLogContextSelector};
///
/// let selector = ThreadLocalLogContextSelector::default();
/// let outer = LogContext::create().unwrap();
/// let inner = LogContext::create().unwrap();
///
/// let _outer = ThreadLocalLogContextSelector::enter(outer.clone());
/// {
///     let _inner = ThreadLocalLogContextSelector::enter(inner.clone());
///     assert_eq!(selector.log_context(), inner);
/// }
/// assert_eq!(selector.log_context(), outer);
///
/// // other threads are unaffected
/// let elsewhere = std::thread::spawn(move || selector.log_context()).join().unwrap();
/// assert_eq!(elsewhere, LogContext::system());
/// ```
#[derive(Debug, Clone)]
pub struct ThreadLocalLogContextSelector {
    fallback: Arc<dyn LogContextSelector>,
}

impl ThreadLocalLogContextSelector {
    /// A selector that defers to `fallback` on threads that have entered no context.
    pub fn new(fallback: Arc<dyn LogContextSelector>) -> Self {
        ThreadLocalLogContextSelector { fallback }
    }

    /// Makes `context` the calling thread's context until the returned guard is dropped.
    ///
    /// Guards nest; dropping one restores whatever was entered before it.
    pub fn enter(context: LogContext) -> ThreadContextGuard {
        let depth = THREAD_CONTEXTS.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(context);
            stack.len()
        });
        ThreadContextGuard {
            depth,
            _not_send: PhantomData,
        }
    }

    /// The innermost context entered on the calling thread, if any.
    pub fn thread_context() -> Option<LogContext> {
        THREAD_CONTEXTS
            .try_with(|stack| stack.borrow().last().cloned())
            .ok()
            .flatten()
    }
}

impl Default for ThreadLocalLogContextSelector {
    fn default() -> Self {
        Self::new(Arc::new(DefaultLogContextSelector))
    }
}

impl LogContextSelector for ThreadLocalLogContextSelector {
    fn log_context(&self) -> LogContext {
        Self::thread_context().unwrap_or_else(|| self.fallback.log_context())
    }
}

/// Restores the previous thread context when dropped.
///
/// Returned by [`ThreadLocalLogContextSelector::enter`]. Not `Send`: it must be dropped on
/// the thread that created it.
#[must_use = "the context is exited as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ThreadContextGuard {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ThreadContextGuard {
    fn drop(&mut self) {
        // the thread-local may already be gone during thread teardown
        let _ = THREAD_CONTEXTS.try_with(|stack| stack.borrow_mut().truncate(self.depth - 1));
    }
}
