//! Reconcile Event Port
//!
//! Observable interface for fetch/install/cleanup/emit operations.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;

use crate::domain::value_objects::{Environment, PackageId};

/// Event emitted while reconciling a sandbox against its manifest
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileEvent {
    /// Every requirement already has a satisfying installed package
    FetchSkipped { requirement_count: usize },

    /// Some requirements are unsatisfied; the resolver is being consulted
    Resolving {
        unsatisfied: Vec<String>,
        source_count: usize,
    },

    /// The resolved bundle was downloaded into the cache
    Downloaded { packages: Vec<PackageId> },

    /// The installer finished
    Installed { bin_dir: PathBuf },

    /// All artifacts of a stale package were deleted
    PackageRemoved { id: PackageId },

    /// A stale artifact could not be deleted
    RemovalFailed { path: PathBuf, error: String },

    /// An environment bootstrap was written
    EnvironmentWritten {
        environment: Environment,
        path: PathBuf,
        package_count: usize,
    },

    /// The loader shim was written
    LoaderShimWritten { path: PathBuf },

    /// Terminal status of a successful install
    Done {
        fetched: usize,
        removed: usize,
        environments: usize,
    },
}

/// Trait for receiving reconcile events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait ReconcileEventSink: Send + Sync {
    /// Handle a reconcile event
    fn on_event(&self, event: ReconcileEvent);

    /// Check if this sink wants per-package events
    ///
    /// Summary-only sinks still receive `Done`.
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl ReconcileEventSink for NoopEventSink {
    fn on_event(&self, _event: ReconcileEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Test event sink that records all events
    struct RecordingEventSink {
        events: Arc<Mutex<Vec<ReconcileEvent>>>,
    }

    impl ReconcileEventSink for RecordingEventSink {
        fn on_event(&self, event: ReconcileEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn recording_sink_captures_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingEventSink {
            events: events.clone(),
        };

        sink.on_event(ReconcileEvent::FetchSkipped {
            requirement_count: 2,
        });
        sink.on_event(ReconcileEvent::Done {
            fetched: 0,
            removed: 0,
            environments: 1,
        });

        let recorded = events.lock().unwrap();
        assert_eq!(recorded.len(), 2);
        assert!(sink.wants_detailed_events());
    }

    #[test]
    fn noop_sink_wants_no_details() {
        let sink = NoopEventSink;
        assert!(!sink.wants_detailed_events());
    }
}
