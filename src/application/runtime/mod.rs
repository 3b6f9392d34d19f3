//! Runtime Use Case
//!
//! Consumes the artifacts written by `install` inside a running process.
//!
//! Activation is two-phase:
//! 1. `activate` reads an environment bootstrap, computes the effective
//!    search path and records it once per process in a `ProcessRegistry`
//! 2. `LoaderShim` stands in for the ambient package loader: it strips its
//!    own directory from the search path, delegates to the ambient loader
//!    and re-applies the pinned registrations while the marker is active
//!
//! `require_all` then locates every require file of the dependencies
//! visible in the active environment.

mod activate;
mod registry;
mod require;
mod shim;


pub use activate::activate;
pub use registry::{ActiveBootstrap, ProcessRegistry};
pub use require::{require_all, RequiredFile, DEFAULT_REQUIRE_EXTENSIONS};
pub use shim::LoaderShim;
