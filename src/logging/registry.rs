//! Sink registry.
//!
//! # Responsibilities
//! - Hold the base directory used to resolve relative log paths
//! - Hold the service version reported by the ping handler
//! - Track every log file opened by the logger factory
//! - Release all tracked handles at shutdown
//!
//! # Design Decisions
//! - Explicit object passed by `&mut`, never global state
//! - Bulk close attempts every sink and returns the failures instead of
//!   stopping at the first one
//! - Failed opens stay in the collection so shutdown bookkeeping matches
//!   what was logged at startup

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while opening or closing log sinks.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The log file could not be opened.
    #[error("failed to open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The log file could not be closed.
    #[error("failed to close log file {}: {source}", path.display())]
    Close {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SinkError {
    /// Path of the sink the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            SinkError::Open { path, .. } | SinkError::Close { path, .. } => path,
        }
    }
}

/// What a logger writes to when its file could not be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenFailurePolicy {
    /// Keep the broken file target; writes fail and are dropped.
    #[default]
    Discard,
    /// Write to stderr instead.
    Stderr,
}

/// Shared slot holding an open log file.
///
/// The registry and every logger bound to the sink share the slot. Once the
/// registry releases the file, writes through the slot return an error.
#[derive(Debug, Clone, Default)]
pub struct SinkHandle {
    file: Arc<Mutex<Option<File>>>,
}

impl SinkHandle {
    pub(crate) fn new(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(Some(file))),
        }
    }

    /// Handle with no file behind it.
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// Whether a file is currently held.
    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Write one complete entry.
    pub(crate) fn write_entry(&self, buf: &[u8]) -> io::Result<()> {
        match self.lock().as_mut() {
            Some(file) => file.write_all(buf),
            None => Err(closed_error()),
        }
    }

    /// Take the file out of the slot, leaving it empty.
    pub(crate) fn release(&self) -> Option<File> {
        self.lock().take()
    }

    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        // A panic while holding the lock cannot leave the Option half-written.
        self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "log sink is not open")
}

/// One tracked log destination.
#[derive(Debug)]
pub struct LogSink {
    name: PathBuf,
    handle: SinkHandle,
    open_error: Option<SinkError>,
}

impl LogSink {
    pub(crate) fn opened(name: PathBuf, handle: SinkHandle) -> Self {
        Self {
            name,
            handle,
            open_error: None,
        }
    }

    pub(crate) fn failed(error: SinkError) -> Self {
        Self {
            name: error.path().to_path_buf(),
            handle: SinkHandle::empty(),
            open_error: Some(error),
        }
    }

    /// Resolved path of the log file.
    pub fn name(&self) -> &Path {
        &self.name
    }

    pub fn handle(&self) -> &SinkHandle {
        &self.handle
    }

    /// The failure recorded when the file could not be opened.
    pub fn open_error(&self) -> Option<&SinkError> {
        self.open_error.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_open()
    }

    /// Release the handle, syncing it to disk first.
    ///
    /// `File` discards errors on drop, so a failed sync is what surfaces
    /// an OS-level close failure (EIO, ENOSPC on write-back).
    fn close(&self) -> Result<(), SinkError> {
        let close_error = |source| SinkError::Close {
            path: self.name.clone(),
            source,
        };
        let file = self.handle.release().ok_or_else(|| close_error(closed_error()))?;
        file.sync_all().map_err(close_error)?;
        drop(file);
        Ok(())
    }
}

/// Bookkeeping for every log sink opened by the logger factory.
///
/// Mutating operations take `&mut self`; the embedding service serializes
/// them, normally by confining them to startup and shutdown.
#[derive(Debug, Default)]
pub struct SinkRegistry {
    pub(crate) base_directory: PathBuf,
    service_version: String,
    pub(crate) open_failure: OpenFailurePolicy,
    pub(crate) sinks: Vec<LogSink>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory relative log paths are resolved against.
    pub fn set_base_directory(&mut self, path: impl Into<PathBuf>) {
        self.base_directory = path.into();
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Set the version string reported in ping responses.
    pub fn set_service_version(&mut self, version: impl Into<String>) {
        self.service_version = version.into();
    }

    pub fn service_version(&self) -> &str {
        &self.service_version
    }

    pub fn set_open_failure_policy(&mut self, policy: OpenFailurePolicy) {
        self.open_failure = policy;
    }

    pub fn open_failure_policy(&self) -> OpenFailurePolicy {
        self.open_failure
    }

    /// Tracked sinks in registration order.
    pub fn sinks(&self) -> &[LogSink] {
        &self.sinks
    }

    /// Forget every tracked sink without closing it.
    ///
    /// Loggers already bound to those sinks keep writing; their files are
    /// released when the last logger is dropped.
    pub fn reset(&mut self) {
        self.sinks.clear();
    }

    /// Close every tracked sink in registration order.
    ///
    /// A failure on one sink does not stop the others from being closed.
    /// Every failure is logged and returned.
    pub fn close_all(&mut self) -> Vec<SinkError> {
        let mut failures = Vec::new();
        for sink in &self.sinks {
            match sink.close() {
                Ok(()) => {
                    tracing::info!(path = %sink.name.display(), "Log file closed");
                }
                Err(err) => {
                    tracing::error!(error = %err, "Error closing log file");
                    failures.push(err);
                }
            }
        }
        failures
    }
}
