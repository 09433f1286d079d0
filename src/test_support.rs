// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers for tests that touch process-wide state.

use crate::permission::{Permission, SecurityPolicy, install_security_policy};
use std::sync::{Arc, Mutex};

/// Serializes tests that install a selector or a security policy.
pub(crate) static GLOBAL_STATE_GUARD: Mutex<()> = Mutex::new(());

/// A policy denying `denied` to the calling thread only, so tests running in parallel are unaffected.
pub(crate) fn deny_on_this_thread(denied: Permission) -> Arc<dyn SecurityPolicy> {
    let thread = std::thread::current().id();
    Arc::new(move |permission: Permission| {
        !(permission == denied && std::thread::current().id() == thread)
    })
}

/// Removes the installed policy from a fresh thread, which any thread-scoped denial leaves alone.
pub(crate) fn reset_security_policy() {
    std::thread::spawn(|| install_security_policy(None))
        .join()
        .expect("thread should complete")
        .expect("a fresh thread holds every permission");
}
