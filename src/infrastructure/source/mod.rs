//! Package sources: resolution, download and installation collaborators

mod archive;
mod directory;

pub use archive::ArchiveInstaller;
pub use directory::{DirectoryBundle, DirectoryRepository};
