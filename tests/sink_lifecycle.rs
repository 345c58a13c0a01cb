//! Startup-to-shutdown behavior of the sink registry through the public API.

use std::fs;
use std::io;
use std::sync::{Arc, Mutex};

use relay_ops::logging::{Level, OpenFailurePolicy, SinkError, SinkRegistry};

/// In-memory writer for capturing the process-wide diagnostics.
#[derive(Clone, Default)]
struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl CapturedOutput {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_access_log_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("relay");
    fs::create_dir(&base).unwrap();

    let mut registry = SinkRegistry::new();
    registry.set_base_directory(&base);
    registry.set_service_version("0.1.0");

    let access = registry.create_logger("access.log", "warn");
    assert_eq!(access.level(), Level::Warn);
    assert_eq!(registry.sinks()[0].name(), base.join("access.log"));

    access.debug("GET /ping 204");
    let path = base.join("access.log");
    assert_eq!(fs::read_to_string(&path).unwrap(), "");

    access.warn("POST /write 503");
    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.trim_end().ends_with("WRN POST /write 503"));

    assert!(registry.close_all().is_empty());
}

#[test]
fn test_stderr_scenario() {
    let mut registry = SinkRegistry::new();
    let logger = registry.create_logger("", "bogus-level");

    assert!(registry.sinks().is_empty());
    assert!(logger.writes_to_stderr());
    assert_eq!(logger.level(), Level::Info);
    logger.info("to stderr");
}

#[test]
fn test_sinks_in_call_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = SinkRegistry::new();
    registry.set_base_directory(dir.path());

    let names = ["relay.log", "access.log", "debug.log", "audit.log"];
    let loggers: Vec<_> = names
        .iter()
        .map(|name| registry.create_logger(name, "debug"))
        .collect();

    assert_eq!(registry.sinks().len(), names.len());
    for (sink, name) in registry.sinks().iter().zip(names) {
        assert_eq!(sink.name(), dir.path().join(name));
        assert!(sink.is_open());
    }

    for (logger, name) in loggers.iter().zip(names) {
        logger.info(name);
    }
    for name in names {
        let contents = fs::read_to_string(dir.path().join(name)).unwrap();
        assert!(contents.contains(&format!("INF {name}")));
    }
}

#[test]
fn test_reset_then_close_all_closes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = SinkRegistry::new();
    registry.set_base_directory(dir.path());

    let logger = registry.create_logger("relay.log", "info");
    registry.reset();
    assert!(registry.close_all().is_empty());

    // The handle was never closed, so the logger still writes.
    logger.info("after reset");
    let contents = fs::read_to_string(dir.path().join("relay.log")).unwrap();
    assert!(contents.contains("after reset"));
}

#[test]
fn test_close_all_continues_past_failed_open() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = SinkRegistry::new();
    registry.set_base_directory(dir.path());
    registry.set_open_failure_policy(OpenFailurePolicy::Discard);

    registry.create_logger("first.log", "info");
    registry.create_logger("no/such/dir/second.log", "info");
    registry.create_logger("third.log", "info");

    let failures = registry.close_all();
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0], SinkError::Close { .. }));
    assert_eq!(failures[0].path(), dir.path().join("no/such/dir/second.log"));
    assert!(registry.sinks().iter().all(|sink| !sink.is_open()));

    // A second pass finds every handle already released.
    assert_eq!(registry.close_all().len(), 3);
}

#[test]
fn test_open_and_close_failures_are_reported_at_error_level() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = SinkRegistry::new();
    registry.set_base_directory(dir.path());

    let output = CapturedOutput::default();
    let writer = output.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();

    let failures = tracing::subscriber::with_default(subscriber, || {
        registry.create_logger("missing/x.log", "info");
        registry.close_all()
    });
    assert_eq!(failures.len(), 1);

    let report = output.contents();
    let errors: Vec<&str> = report.lines().filter(|line| line.contains("ERROR")).collect();
    assert_eq!(errors.len(), 2, "report was:\n{report}");
    assert!(errors[0].contains("Error opening log file"));
    assert!(errors[0].contains("missing/x.log"));
    assert!(errors[1].contains("Error closing log file"));
    assert!(errors[1].contains("missing/x.log"));
    assert!(report.contains("Trying to open log file"));
}
