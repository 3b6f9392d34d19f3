//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod installed;
mod partitioner;
mod resolution;

pub use installed::{detect_stale, index_installed, unsatisfied};
pub use partitioner::{all_environments, select};
pub use resolution::resolve;
