//! JSON Event Sink
//!
//! Outputs reconcile events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{ReconcileEvent, ReconcileEventSink};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
    command: &'static str,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(command: &'static str, writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            command,
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON form of one event
pub fn event_json(command: &str, event: &ReconcileEvent) -> serde_json::Value {
    match event {
        ReconcileEvent::FetchSkipped { requirement_count } => serde_json::json!({
            "event": "fetch_skipped",
            "command": command,
            "requirements": requirement_count,
        }),

        ReconcileEvent::Resolving {
            unsatisfied,
            source_count,
        } => serde_json::json!({
            "event": "resolving",
            "command": command,
            "unsatisfied": unsatisfied,
            "sources": source_count,
        }),

        ReconcileEvent::Downloaded { packages } => serde_json::json!({
            "event": "downloaded",
            "command": command,
            "packages": packages.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
        }),

        ReconcileEvent::Installed { bin_dir } => serde_json::json!({
            "event": "installed",
            "command": command,
            "bin_dir": bin_dir.display().to_string(),
        }),

        ReconcileEvent::PackageRemoved { id } => serde_json::json!({
            "event": "package_removed",
            "command": command,
            "package": id.to_string(),
        }),

        ReconcileEvent::RemovalFailed { path, error } => serde_json::json!({
            "event": "removal_failed",
            "command": command,
            "path": path.display().to_string(),
            "error": error,
        }),

        ReconcileEvent::EnvironmentWritten {
            environment,
            path,
            package_count,
        } => serde_json::json!({
            "event": "environment_written",
            "command": command,
            "environment": environment.as_str(),
            "path": path.display().to_string(),
            "packages": package_count,
        }),

        ReconcileEvent::LoaderShimWritten { path } => serde_json::json!({
            "event": "loader_shim_written",
            "command": command,
            "path": path.display().to_string(),
        }),

        ReconcileEvent::Done {
            fetched,
            removed,
            environments,
        } => serde_json::json!({
            "event": "done",
            "command": command,
            "status": "success",
            "fetched": fetched,
            "removed": removed,
            "environments": environments,
        }),
    }
}

impl ReconcileEventSink for JsonEventSink {
    fn on_event(&self, event: ReconcileEvent) {
        self.write_event(event_json(self.command, &event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Environment, PackageId};
    use semver::Version;
    use std::path::PathBuf;
    use std::sync::Arc;

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn sink() -> (JsonEventSink, Arc<Mutex<Vec<u8>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = TestWriter {
            buffer: buffer.clone(),
        };
        (JsonEventSink::with_writer("install", writer), buffer)
    }

    fn lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<serde_json::Value> {
        String::from_utf8(buffer.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn json_sink_writes_one_object_per_line() {
        let (sink, buffer) = sink();

        sink.on_event(ReconcileEvent::PackageRemoved {
            id: PackageId::new("b", Version::new(2, 0, 0)),
        });
        sink.on_event(ReconcileEvent::EnvironmentWritten {
            environment: Environment::new("test"),
            path: PathBuf::from("/sb/environments/test.toml"),
            package_count: 2,
        });

        let events = lines(&buffer);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["event"], "package_removed");
        assert_eq!(events[0]["package"], "b@2.0.0");
        assert_eq!(events[1]["environment"], "test");
        assert_eq!(events[1]["command"], "install");
    }

    #[test]
    fn json_sink_outputs_done_event() {
        let (sink, buffer) = sink();

        sink.on_event(ReconcileEvent::Done {
            fetched: 3,
            removed: 1,
            environments: 2,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "done");
        assert_eq!(events[0]["status"], "success");
        assert_eq!(events[0]["fetched"], 3);
    }
}
