//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod bootstrap;
mod install_index;
mod manifest;
mod metadata;

pub use bootstrap::TomlBootstrapRepository;
pub use install_index::TomlInstallIndexRepository;
pub use manifest::{parse_manifest, TomlManifestRepository, MANIFEST_FILE};
pub use metadata::TomlMetadataIndex;

#[cfg(test)]
pub(crate) use metadata::render_spec;
