//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# logspace

logspace provides isolated, hierarchical logger namespaces for Rust.

# The problem

A process-wide logger registry works until two parts of the process want different
logging configurations for the same logger names. A plugin host wants each plugin's
`db` logger to be its own. A test harness wants every test to start from a clean tree.
An application server wants each deployment isolated from the others.

logspace solves this with *log contexts*. Each [`LogContext`] owns a complete tree of
loggers, keyed by dotted names (`app`, `app.db`, `app.db.pool`). Two contexts never share
a logger, a level, or a node.

# The API

```rust
use logspace::{Level, LogContext};

// the active context, chosen by the installed selector
let context = LogContext::current();
let logger = context.logger("app.db");

context.logger("app").set_level(Some(Level::Debug)).unwrap();
assert!(logger.is_loggable(Level::Debug));
```

Loggers are created on first request, together with every missing ancestor. Asking again
returns the same logger. [`LogContext::logger_if_exists`] looks a logger up without
creating it.

# Choosing the active context

[`LogContext::current`] consults the installed [`LogContextSelector`]. At startup that is
[`DefaultLogContextSelector`], which always selects the [system context](LogContext::system).
Install another with [`LogContext::set_selector`]; [`ThreadLocalLogContextSelector`] ships
with the crate for per-thread scoping.

# Access control

Creating a context, replacing the selector, and changing levels are gated by a
[`Permission`] each. An application that embeds untrusted code can install a
[`SecurityPolicy`] with [`install_security_policy`]; without one every operation is allowed.
Replacing the policy is itself gated by [`Permission::Control`].

# Diagnostics

logspace reports context creation, selector changes and denied permission checks through
[`tracing`](https://docs.rs/tracing). It never installs a subscriber itself.
*/

mod context;
mod error;
mod level;
mod logger;
mod mx_bean;
mod node;
pub mod permission;

#[cfg(test)]
mod test_support;

pub use context::{
    DefaultLogContextSelector, LogContext, LogContextSelector, ThreadContextGuard,
    ThreadLocalLogContextSelector,
};
pub use error::LogContextError;
pub use level::Level;
pub use logger::Logger;
pub use mx_bean::LoggingMxBean;
pub use permission::{AllowAll, Permission, SecurityPolicy, install_security_policy};
