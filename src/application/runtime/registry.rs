//! Process-scoped activation state

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::domain::entities::Registration;
use crate::domain::value_objects::Environment;

/// The bootstrap a process activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveBootstrap {
    pub marker: String,
    pub environment: Environment,
    pub registrations: Vec<Registration>,
    /// Effective search path, highest priority first
    pub search_path: Vec<PathBuf>,
}

impl ActiveBootstrap {
    pub fn registration(&self, name: &str) -> Option<&Registration> {
        self.registrations.iter().find(|reg| reg.name == name)
    }
}

/// Holds at most one activation for the lifetime of the registry.
///
/// Set once, never mutated afterwards.
#[derive(Debug, Default)]
pub struct ProcessRegistry {
    active: OnceLock<ActiveBootstrap>,
}

static GLOBAL: ProcessRegistry = ProcessRegistry::new();

impl ProcessRegistry {
    pub const fn new() -> Self {
        Self {
            active: OnceLock::new(),
        }
    }

    /// The registry shared by the whole process
    pub fn global() -> &'static ProcessRegistry {
        &GLOBAL
    }

    pub fn active(&self) -> Option<&ActiveBootstrap> {
        self.active.get()
    }

    /// Whether `marker` is the marker of the active bootstrap
    pub fn is_marked(&self, marker: &str) -> bool {
        self.active().is_some_and(|active| active.marker == marker)
    }

    /// Record `bootstrap` unless something is already active.
    ///
    /// Returns whichever bootstrap ends up active.
    pub(super) fn activate_once(&self, bootstrap: ActiveBootstrap) -> &ActiveBootstrap {
        self.active.get_or_init(|| bootstrap)
    }
}
