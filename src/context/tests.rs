// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tests for the context module.

use super::context_impl::LogContext;
use super::selector::{DefaultLogContextSelector, LogContextSelector};
use super::thread_local::ThreadLocalLogContextSelector;
use crate::permission::install_security_policy;
use crate::test_support::{GLOBAL_STATE_GUARD, deny_on_this_thread, reset_security_policy};
use crate::{Level, LogContextError, Permission};
use std::sync::Arc;

#[derive(Debug)]
struct FixedSelector(LogContext);

impl LogContextSelector for FixedSelector {
    fn log_context(&self) -> LogContext {
        self.0.clone()
    }
}

#[test]
fn test_lookup_scenario() {
    let context = LogContext::create().unwrap();
    assert!(context.logger_if_exists("a.b").is_none());

    let l1 = context.logger("a.b");
    let l2 = context.logger("a.b");
    assert_eq!(l1, l2);
    assert_eq!(context.logger_if_exists("a.b"), Some(l1));

    // the implicitly created ancestor has a node but no logger yet
    assert!(context.logger_if_exists("a").is_none());
    assert!(context.inner.root.get_if_exists("a").is_some());
}

#[test]
fn test_contexts_are_isolated() {
    let c1 = LogContext::create().unwrap();
    let c2 = LogContext::create().unwrap();
    assert_ne!(c1, c2);

    let l1 = c1.logger("shared.name");
    assert!(c2.logger_if_exists("shared.name").is_none());
    let l2 = c2.logger("shared.name");
    assert_ne!(l1, l2);

    l1.set_level(Some(Level::Error)).unwrap();
    assert_eq!(l2.level(), None);
    assert_eq!(l2.effective_level(), Level::Info);

    c1.root_logger().set_level(Some(Level::Trace)).unwrap();
    assert_eq!(c2.root_logger().effective_level(), Level::Info);
}

#[test]
fn test_system_context_is_stable() {
    let first = LogContext::system();
    let second = LogContext::system();
    assert_eq!(first, second);
    assert!(first.is_system());
    assert!(!LogContext::create().unwrap().is_system());
    assert_eq!(DefaultLogContextSelector.log_context(), first);
}

#[test]
#[allow(clippy::mutable_key_type)] // LogContext hash is based on Arc pointer, not interior state
fn test_context_hash() {
    use std::collections::HashSet;

    let c1 = LogContext::create().unwrap();
    let c2 = LogContext::create().unwrap();
    let set: HashSet<LogContext> = [c1.clone(), c1.clone(), c2.clone()].into_iter().collect();
    assert_eq!(set.len(), 2);
    assert!(set.contains(&c1));
    assert!(set.contains(&c2));
}

#[test]
fn test_concurrent_lookup_is_idempotent() {
    let context = LogContext::create().unwrap();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let context = context.clone();
            std::thread::spawn(move || context.logger("deep.tree.of.loggers"))
        })
        .collect();
    let loggers: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread should complete"))
        .collect();
    for logger in &loggers {
        assert_eq!(logger, &context.logger("deep.tree.of.loggers"));
    }
}

#[test]
fn test_create_denied() {
    let _guard = GLOBAL_STATE_GUARD.lock().unwrap_or_else(|e| e.into_inner());
    install_security_policy(Some(deny_on_this_thread(Permission::CreateContext))).unwrap();
    let result = LogContext::create();
    reset_security_policy();

    assert_eq!(
        result.unwrap_err(),
        LogContextError::PermissionDenied(Permission::CreateContext)
    );
}

#[test]
fn test_check_access() {
    let _guard = GLOBAL_STATE_GUARD.lock().unwrap_or_else(|e| e.into_inner());
    assert!(LogContext::check_access().is_ok());

    install_security_policy(Some(deny_on_this_thread(Permission::Control))).unwrap();
    let result = LogContext::check_access();
    reset_security_policy();

    assert_eq!(
        result,
        Err(LogContextError::PermissionDenied(Permission::Control))
    );
}

#[test]
fn test_selector_lifecycle() {
    let _guard = GLOBAL_STATE_GUARD.lock().unwrap_or_else(|e| e.into_inner());
    assert_eq!(LogContext::current(), LogContext::system());

    let custom = LogContext::create().unwrap();
    LogContext::set_selector(Some(Arc::new(FixedSelector(custom.clone())))).unwrap();
    assert_eq!(LogContext::current(), custom);

    let seen = std::thread::spawn(LogContext::current)
        .join()
        .expect("thread should complete");
    assert_eq!(seen, custom);

    // rejected replacements leave the selector in place
    assert!(matches!(
        LogContext::set_selector(None),
        Err(LogContextError::InvalidArgument(_))
    ));
    install_security_policy(Some(deny_on_this_thread(Permission::SetContextSelector))).unwrap();
    let denied = LogContext::reset_selector();
    reset_security_policy();
    assert_eq!(
        denied,
        Err(LogContextError::PermissionDenied(Permission::SetContextSelector))
    );
    assert_eq!(LogContext::current(), custom);

    LogContext::reset_selector().unwrap();
    assert_eq!(LogContext::current(), LogContext::system());
}

#[test]
fn test_none_selector_checked_before_permission() {
    let _guard = GLOBAL_STATE_GUARD.lock().unwrap_or_else(|e| e.into_inner());
    install_security_policy(Some(deny_on_this_thread(Permission::SetContextSelector))).unwrap();
    let result = LogContext::set_selector(None);
    reset_security_policy();
    assert!(matches!(result, Err(LogContextError::InvalidArgument(_))));
}

#[test]
fn test_thread_local_selector() {
    let selector = ThreadLocalLogContextSelector::new(Arc::new(DefaultLogContextSelector));
    assert!(ThreadLocalLogContextSelector::thread_context().is_none());
    assert_eq!(selector.log_context(), LogContext::system());

    let outer = LogContext::create().unwrap();
    let inner = LogContext::create().unwrap();
    let outer_guard = ThreadLocalLogContextSelector::enter(outer.clone());
    {
        let _inner_guard = ThreadLocalLogContextSelector::enter(inner.clone());
        assert_eq!(selector.log_context(), inner);
    }
    assert_eq!(selector.log_context(), outer);
    drop(outer_guard);
    assert_eq!(selector.log_context(), LogContext::system());
}

#[test]
fn test_thread_local_fallback() {
    let fallback = LogContext::create().unwrap();
    let selector = ThreadLocalLogContextSelector::new(Arc::new(FixedSelector(fallback.clone())));
    assert_eq!(selector.log_context(), fallback);
}
