//! Leveled loggers bound to a single output target.
//!
//! Each logger owns its own `tracing` dispatch, so entries written through it
//! never reach the process-wide subscriber and vice versa.

use std::fmt;
use std::io;

use tracing::{Dispatch, Event, Subscriber};
use tracing_subscriber::fmt::format;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

use super::level::Level;
use super::registry::SinkHandle;

/// Timestamp layout of every console entry.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where a logger writes.
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(SinkHandle),
}

impl<'a> MakeWriter<'a> for LogTarget {
    type Writer = TargetWriter;

    fn make_writer(&'a self) -> Self::Writer {
        match self {
            LogTarget::Stderr => TargetWriter::Stderr(io::stderr()),
            LogTarget::File(handle) => TargetWriter::File(handle.clone()),
        }
    }
}

/// Writer handed out per entry by [`LogTarget`].
pub enum TargetWriter {
    Stderr(io::Stderr),
    File(SinkHandle),
}

impl io::Write for TargetWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            TargetWriter::Stderr(stderr) => io::Write::write(stderr, buf),
            TargetWriter::File(handle) => {
                handle.write_entry(buf)?;
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            TargetWriter::Stderr(stderr) => io::Write::flush(stderr),
            TargetWriter::File(_) => Ok(()),
        }
    }
}

/// Human-readable single-line format: `2006-01-02 15:04:05 WRN message key=value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let label = Level::from_target(metadata.target())
            .map(Level::label)
            .unwrap_or_else(|| metadata.level().as_str());

        write!(writer, "{} {} ", chrono::Local::now().format(TIME_FORMAT), label)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// A leveled logger.
///
/// Entries below the threshold are discarded. Cloning is cheap and clones
/// share the same target.
#[derive(Debug, Clone)]
pub struct Logger {
    level: Level,
    target: LogTarget,
    dispatch: Dispatch,
}

impl Logger {
    pub fn new(target: LogTarget, level: Level) -> Self {
        let subscriber = tracing_subscriber::fmt()
            .event_format(ConsoleFormat)
            .with_writer(target.clone())
            .with_max_level(level.as_tracing())
            .finish();

        Self {
            level,
            target,
            dispatch: Dispatch::new(subscriber),
        }
    }

    /// Minimum severity this logger emits.
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn target(&self) -> &LogTarget {
        &self.target
    }

    pub fn writes_to_stderr(&self) -> bool {
        matches!(self.target, LogTarget::Stderr)
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Write an entry at `level` if it passes the threshold.
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        if !self.enabled(level) {
            return;
        }
        tracing::dispatcher::with_default(&self.dispatch, || emit(level, &message));
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }

    /// Write the entry, then exit the process with status 1.
    ///
    /// Does nothing when fatal entries are filtered out.
    pub fn fatal(&self, message: impl fmt::Display) {
        if !self.enabled(Level::Fatal) {
            return;
        }
        self.log(Level::Fatal, &message);
        std::process::exit(1);
    }

    /// Write the entry, then panic with the same message.
    ///
    /// Does nothing when panic entries are filtered out.
    pub fn panic(&self, message: impl fmt::Display) {
        if !self.enabled(Level::Panic) {
            return;
        }
        self.log(Level::Panic, &message);
        panic!("{}", message);
    }
}

// Targets must be literals; they mirror `Level::target`.
fn emit(level: Level, message: &dyn fmt::Display) {
    match level {
        Level::Debug => tracing::event!(target: "relay::debug", tracing::Level::DEBUG, "{}", message),
        Level::Info => tracing::event!(target: "relay::info", tracing::Level::INFO, "{}", message),
        Level::Warn => tracing::event!(target: "relay::warn", tracing::Level::WARN, "{}", message),
        Level::Error => tracing::event!(target: "relay::error", tracing::Level::ERROR, "{}", message),
        Level::Fatal => tracing::event!(target: "relay::fatal", tracing::Level::ERROR, "{}", message),
        Level::Panic => tracing::event!(target: "relay::panic", tracing::Level::ERROR, "{}", message),
    }
}
