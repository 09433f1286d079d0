// SPDX-License-Identifier: MIT OR Apache-2.0
use std::fmt::Display;
use std::str::FromStr;

use crate::LogContextError;

/// Severity of a log message, and the threshold a logger accepts.
///
/// Levels are totally ordered from [`Level::All`] (accept everything) to
/// [`Level::Off`] (accept nothing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Threshold that accepts every message
    All,
    /// Detailed debugging
    Trace,
    Debug,
    /// The default threshold of a root logger
    Info,
    /// Suspicious condition
    Warn,
    /// Runtime error
    Error,
    /// The application cannot continue
    Fatal,
    /// Threshold that accepts no message
    Off,
}

impl Level {
    const ALL_LEVELS: [Level; 8] = [
        Level::All,
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Off,
    ];

    /// The upper-case name used by [`Display`] and [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Level::All => "ALL",
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Off => "OFF",
        }
    }

    pub(crate) const fn to_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(value: u8) -> Level {
        Self::ALL_LEVELS
            .get(value as usize)
            .copied()
            .unwrap_or(Level::Off)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = LogContextError;

    /// Parses a level name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL_LEVELS
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LogContextError::InvalidArgument(format!("unknown level {s:?}")))
    }
}
