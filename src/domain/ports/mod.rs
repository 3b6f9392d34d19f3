//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod bootstrap_repository;
pub mod file_system;
pub mod install_index_repository;
pub mod installer;
pub mod metadata_index;
pub mod package_loader;
pub mod reconcile_events;
pub mod resolver;

pub use bootstrap_repository::BootstrapRepository;
pub use file_system::{FileSystem, FsError, FsResult};
pub use install_index_repository::{
    InstallIndexError, InstallIndexRepository, InstallIndexResult,
};
pub use installer::Installer;
pub use metadata_index::MetadataIndex;
pub use package_loader::PackageLoader;
pub use reconcile_events::{NoopEventSink, ReconcileEvent, ReconcileEventSink};
pub use resolver::{Bundle, Resolver};
