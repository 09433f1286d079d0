// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error type shared by every fallible operation in the crate.

use crate::permission::Permission;
use thiserror::Error;

/// Why a gated or validated operation failed.
///
/// Every failure is reported before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogContextError {
    /// The installed [`SecurityPolicy`](crate::SecurityPolicy) rejected the operation.
    ///
    /// No state was changed.
    #[error("permission denied: {0}")]
    PermissionDenied(Permission),

    /// A required argument was absent or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
