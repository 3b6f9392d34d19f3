//! Console Event Sink
//!
//! Human-readable progress lines.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{ReconcileEvent, ReconcileEventSink};

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    /// Print per-package lines, not just the summary
    verbose: bool,
}

impl ConsoleEventSink {
    pub fn stdout(verbose: bool) -> Self {
        Self::with_writer(io::stdout(), verbose)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, verbose: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            verbose,
        }
    }
}

/// One-line rendering of an event; `None` for events not worth a line
pub fn event_line(event: &ReconcileEvent) -> Option<String> {
    match event {
        ReconcileEvent::FetchSkipped { requirement_count } => Some(format!(
            "All {} dependencies are already installed",
            requirement_count
        )),
        ReconcileEvent::Resolving { unsatisfied, .. } => {
            Some(format!("Resolving {}", unsatisfied.join(", ")))
        }
        ReconcileEvent::Downloaded { packages } => Some(format!("Fetched {} packages", packages.len())),
        ReconcileEvent::Installed { .. } => None,
        ReconcileEvent::PackageRemoved { id } => Some(format!("Removed {}", id)),
        ReconcileEvent::RemovalFailed { path, error } => {
            Some(format!("Could not remove {}: {}", path.display(), error))
        }
        ReconcileEvent::EnvironmentWritten {
            environment,
            package_count,
            ..
        } => Some(format!(
            "Wrote environment '{}' ({} packages)",
            environment, package_count
        )),
        ReconcileEvent::LoaderShimWritten { .. } => None,
        ReconcileEvent::Done {
            fetched,
            removed,
            environments,
        } => Some(format!(
            "Done. {} fetched, {} removed, {} environments",
            fetched, removed, environments
        )),
    }
}

impl ReconcileEventSink for ConsoleEventSink {
    fn on_event(&self, event: ReconcileEvent) {
        let is_summary = matches!(
            event,
            ReconcileEvent::Done { .. } | ReconcileEvent::RemovalFailed { .. }
        );
        if !self.verbose && !is_summary {
            return;
        }
        if let Some(line) = event_line(&event) {
            if let Ok(mut writer) = self.writer.lock() {
                let _ = writeln!(writer, "{}", line);
            }
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::PackageId;
    use semver::Version;

    #[test]
    fn removal_line_names_package() {
        let line = event_line(&ReconcileEvent::PackageRemoved {
            id: PackageId::new("c", Version::new(1, 0, 0)),
        });
        assert_eq!(line.as_deref(), Some("Removed c@1.0.0"));
    }

    #[test]
    fn done_line_summarizes() {
        let line = event_line(&ReconcileEvent::Done {
            fetched: 2,
            removed: 0,
            environments: 1,
        });
        assert_eq!(
            line.as_deref(),
            Some("Done. 2 fetched, 0 removed, 1 environments")
        );
    }

    #[test]
    fn quiet_console_still_reports_done() {
        let buffer = std::sync::Arc::new(Mutex::new(Vec::new()));

        struct Shared(std::sync::Arc<Mutex<Vec<u8>>>);
        impl Write for Shared {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let sink = ConsoleEventSink::with_writer(Shared(buffer.clone()), false);
        sink.on_event(ReconcileEvent::FetchSkipped {
            requirement_count: 1,
        });
        sink.on_event(ReconcileEvent::Done {
            fetched: 0,
            removed: 0,
            environments: 1,
        });

        let out = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert_eq!(out, "Done. 0 fetched, 0 removed, 1 environments\n");
    }
}
