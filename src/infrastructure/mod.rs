//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `repositories/` - TOML persistence (manifest, metadata, install index, bootstrap)
//! - `sandbox/` - Directory layout and the exclusive sandbox lock
//! - `source/` - Directory repository resolver and archive installer
//! - `events/` - Console and NDJSON event sinks
//! - `loader/` - The ambient package loader

pub mod events;
pub mod fs;
pub mod loader;
pub mod repositories;
pub mod sandbox;
pub mod source;

// Re-export for convenience
pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::LocalFs;
pub use loader::AmbientLoader;
pub use repositories::{
    TomlBootstrapRepository, TomlInstallIndexRepository, TomlManifestRepository,
    TomlMetadataIndex,
};
pub use sandbox::{SandboxLayout, SandboxLock};
pub use source::{ArchiveInstaller, DirectoryRepository};
