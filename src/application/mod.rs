//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ManifestReconciler` - fetch, install, cleanup and artifact generation
//! - `LoadPathEmitter` - renders resolved specs into bootstrap artifacts
//! - `activate` / `require_all` / `LoaderShim` - the runtime side of a sandbox

pub mod emitter;
pub mod reconcile;
pub mod runtime;

pub use emitter::LoadPathEmitter;
pub use reconcile::{
    CleanupReport, EnvironmentReport, FetchOutcome, InstallOptions, InstallReport,
    ManifestReconciler,
};
pub use runtime::{
    activate, require_all, ActiveBootstrap, LoaderShim, ProcessRegistry, RequiredFile,
    DEFAULT_REQUIRE_EXTENSIONS,
};
