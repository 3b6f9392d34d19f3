//! Reconcile Use Case
//!
//! Brings a sandbox in line with its manifest.
//!
//! This module handles:
//! - Deciding whether a fetch is needed, and fetching through the resolver
//! - Installing fetched archives
//! - Deleting packages the manifest no longer requires
//! - Regenerating every environment bootstrap and the loader shim

mod options;
mod result;
mod use_case;


pub use options::InstallOptions;
pub use result::{CleanupReport, EnvironmentReport, FetchOutcome, InstallReport};
pub use use_case::ManifestReconciler;
