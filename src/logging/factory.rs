//! Logger factory.
//!
//! Resolves the output target for a logger, registers any file it opens,
//! and maps the level name to a threshold.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use super::level::Level;
use super::logger::{LogTarget, Logger};
use super::registry::{LogSink, OpenFailurePolicy, SinkError, SinkHandle, SinkRegistry};

/// Permission bits for newly created log files.
pub const LOG_FILE_MODE: u32 = 0o644;

/// Resolve a configured log path against the base directory.
///
/// An empty path means stderr and resolves to `None`.
pub fn resolve_log_path(base_directory: &Path, path: &str) -> Option<PathBuf> {
    if path.is_empty() {
        return None;
    }
    let path = Path::new(path);
    if path.is_absolute() {
        Some(path.to_path_buf())
    } else {
        Some(base_directory.join(path))
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).append(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(LOG_FILE_MODE);
    }
    options.open(path)
}

impl SinkRegistry {
    /// Build a logger writing to `path` at the threshold named by `level_name`.
    ///
    /// A non-empty path opens (or creates) the file for append and records it
    /// in the registry, even when the open fails. An open failure is logged
    /// and never returned; the logger then follows the registry's
    /// [`OpenFailurePolicy`].
    pub fn create_logger(&mut self, path: &str, level_name: &str) -> Logger {
        let level = Level::resolve(level_name);

        let Some(resolved) = resolve_log_path(&self.base_directory, path) else {
            return Logger::new(LogTarget::Stderr, level);
        };

        tracing::info!(path = %resolved.display(), "Trying to open log file");
        let target = match open_log_file(&resolved) {
            Ok(file) => {
                let handle = SinkHandle::new(file);
                self.sinks.push(LogSink::opened(resolved, handle.clone()));
                LogTarget::File(handle)
            }
            Err(source) => {
                let err = SinkError::Open {
                    path: resolved,
                    source,
                };
                tracing::error!(error = %err, "Error opening log file");
                self.sinks.push(LogSink::failed(err));
                match self.open_failure {
                    OpenFailurePolicy::Discard => LogTarget::File(SinkHandle::empty()),
                    OpenFailurePolicy::Stderr => LogTarget::Stderr,
                }
            }
        };

        Logger::new(target, level)
    }
}
