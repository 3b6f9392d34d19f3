//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod environment;
mod hash;
mod load_path;
mod package_id;
mod source;

pub use config_warning::{warnings_for_unknown_keys, ConfigWarning};
pub use environment::{Environment, InvalidEnvironmentName};
pub use hash::ContentHash;
pub use load_path::LoadPath;
pub use package_id::{PackageId, ARCHIVE_EXTENSION, METADATA_EXTENSION};
pub use source::RepositoryLocator;
