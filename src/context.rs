// SPDX-License-Identifier: MIT OR Apache-2.0

//! Isolated logger namespaces and the process-wide choice of which one is active.
//!
//! A [`LogContext`] owns a complete logger-name tree. Loggers in different contexts never
//! share state, even when they have the same name, so several fully isolated logging
//! hierarchies can coexist in one process.
//!
//! # The active context
//!
//! [`LogContext::current`] asks the installed [`LogContextSelector`] which context is
//! active for the caller. Initially the [`DefaultLogContextSelector`] is installed, which
//! always answers with the [system context](LogContext::system):
//!
//! ```rust
//! use logspace::LogContext;
//!
//! assert_eq!(LogContext::current(), LogContext::system());
//! let logger = LogContext::current().logger("app.http");
//! assert_eq!(logger.name(), "app.http");
//! ```
//!
//! # Per-thread contexts
//!
//! [`ThreadLocalLogContextSelector`] lets a thread (a plugin host, a test, a request
//! handler) run with its own context for the duration of a scope:
//!
//! ```rust
//! use logspace::{LogContext, ThreadLocalLogContextSelector};
//! use std::sync::Arc;
//!
//! LogContext::set_selector(Some(Arc::new(ThreadLocalLogContextSelector::default()))).unwrap();
//!
//! let plugin = LogContext::create().unwrap();
//! {
//!     let _scope = ThreadLocalLogContextSelector::enter(plugin.clone());
//!     assert_eq!(LogContext::current(), plugin);
//! }
//! assert_eq!(LogContext::current(), LogContext::system());
//! ```

mod context_impl;
mod selector;
mod thread_local;

#[cfg(test)]
mod tests;

pub use context_impl::LogContext;
pub(crate) use context_impl::LogContextInner;
pub use selector::{DefaultLogContextSelector, LogContextSelector};
pub use thread_local::{ThreadContextGuard, ThreadLocalLogContextSelector};
