//! Severity levels and name resolution.

use std::fmt;

/// Severity of a log entry, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl Level {
    /// All levels in increasing severity.
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Panic,
    ];

    /// Match a symbolic level name.
    ///
    /// Matching is case-sensitive; `Error` is the only capitalized spelling
    /// accepted. Returns `None` for anything else.
    pub fn from_name(name: &str) -> Option<Level> {
        match name {
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" | "Error" => Some(Level::Error),
            "fatal" => Some(Level::Fatal),
            "panic" => Some(Level::Panic),
            _ => None,
        }
    }

    /// Resolve a level name, falling back to `Info` for unknown or empty names.
    pub fn resolve(name: &str) -> Level {
        Level::from_name(name).unwrap_or(Level::Info)
    }

    /// Three-letter label used by the console format.
    pub fn label(self) -> &'static str {
        match self {
            Level::Debug => "DBG",
            Level::Info => "INF",
            Level::Warn => "WRN",
            Level::Error => "ERR",
            Level::Fatal => "FTL",
            Level::Panic => "PNC",
        }
    }

    /// Closest `tracing` level. Fatal and panic share `ERROR`.
    pub fn as_tracing(self) -> tracing::Level {
        match self {
            Level::Debug => tracing::Level::DEBUG,
            Level::Info => tracing::Level::INFO,
            Level::Warn => tracing::Level::WARN,
            Level::Error | Level::Fatal | Level::Panic => tracing::Level::ERROR,
        }
    }

    /// Event target carrying this level through a `tracing` dispatch.
    pub(crate) fn target(self) -> &'static str {
        match self {
            Level::Debug => "relay::debug",
            Level::Info => "relay::info",
            Level::Warn => "relay::warn",
            Level::Error => "relay::error",
            Level::Fatal => "relay::fatal",
            Level::Panic => "relay::panic",
        }
    }

    pub(crate) fn from_target(target: &str) -> Option<Level> {
        Level::ALL.into_iter().find(|level| level.target() == target)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
        };
        f.write_str(name)
    }
}
