// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access control for the operations that change process-wide logging state.
//!
//! Three operations are gated, each by its own [`Permission`]:
//!
//! | Permission                          | Gates                                                        |
//! |-------------------------------------|--------------------------------------------------------------|
//! | [`Permission::CreateContext`]       | [`LogContext::create`](crate::LogContext::create)            |
//! | [`Permission::SetContextSelector`]  | [`LogContext::set_selector`](crate::LogContext::set_selector)|
//! | [`Permission::Control`]             | [`LogContext::check_access`](crate::LogContext::check_access), level changes |
//!
//! Whether a permission is held is decided by the installed [`SecurityPolicy`]. Until one
//! is installed, every check passes. Replacing the policy itself requires
//! [`Permission::Control`] under the policy being replaced.
//!
//! ```
//! use logspace::{install_security_policy, LogContext, LogContextError, Permission};
//! use std::sync::Arc;
//!
//! install_security_policy(Some(Arc::new(|p: Permission| p != Permission::CreateContext))).unwrap();
//! assert_eq!(
//!     LogContext::create().unwrap_err(),
//!     LogContextError::PermissionDenied(Permission::CreateContext)
//! );
//!
//! install_security_policy(None).unwrap();
//! assert!(LogContext::create().is_ok());
//! ```

use crate::error::LogContextError;
use arc_swap::ArcSwap;
use std::fmt::Display;
use std::sync::{Arc, OnceLock};

/// A named right to perform one of the gated operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Create a new, isolated [`LogContext`](crate::LogContext).
    CreateContext,
    /// Replace the process-wide [`LogContextSelector`](crate::LogContextSelector).
    SetContextSelector,
    /// Administrative control over logger configuration, such as changing levels.
    Control,
}

impl Permission {
    /// The name used in diagnostics, such as `"createLogContext"`.
    pub const fn name(self) -> &'static str {
        match self {
            Permission::CreateContext => "createLogContext",
            Permission::SetContextSelector => "setLogContextSelector",
            Permission::Control => "control",
        }
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Decides whether the caller holds a [`Permission`].
///
/// The policy is consulted synchronously on the calling thread, so an implementation may
/// base its answer on the identity of the current thread. Any `Fn(Permission) -> bool`
/// closure is a policy.
pub trait SecurityPolicy: Send + Sync {
    fn permits(&self, permission: Permission) -> bool;
}

impl<F> SecurityPolicy for F
where
    F: Fn(Permission) -> bool + Send + Sync,
{
    fn permits(&self, permission: Permission) -> bool {
        self(permission)
    }
}

/// The policy in effect when none has been installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl SecurityPolicy for AllowAll {
    fn permits(&self, _permission: Permission) -> bool {
        true
    }
}

static SECURITY_POLICY: OnceLock<ArcSwap<Arc<dyn SecurityPolicy>>> = OnceLock::new();

fn security_policy() -> &'static ArcSwap<Arc<dyn SecurityPolicy>> {
    SECURITY_POLICY.get_or_init(|| {
        let allow_all: Arc<dyn SecurityPolicy> = Arc::new(AllowAll);
        ArcSwap::from_pointee(allow_all)
    })
}

/// Installs the process-wide security policy.
///
/// Requires [`Permission::Control`] under the policy currently installed; on failure that
/// policy stays in effect. `None` removes the installed policy, after which every check
/// passes. The new policy applies to every check that starts after this returns, on any thread.
pub fn install_security_policy(
    policy: Option<Arc<dyn SecurityPolicy>>,
) -> Result<(), LogContextError> {
    check_permission(Permission::Control)?;
    let policy: Arc<dyn SecurityPolicy> = match policy {
        Some(policy) => policy,
        None => Arc::new(AllowAll),
    };
    security_policy().store(Arc::new(policy));
    tracing::debug!("security policy installed");
    Ok(())
}

/// Fails with [`LogContextError::PermissionDenied`] unless the installed policy grants `permission`.
pub(crate) fn check_permission(permission: Permission) -> Result<(), LogContextError> {
    let policy = security_policy().load_full();
    if policy.permits(permission) {
        Ok(())
    } else {
        tracing::warn!(%permission, "permission check failed");
        Err(LogContextError::PermissionDenied(permission))
    }
}
