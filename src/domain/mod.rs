//! Domain Layer
//!
//! The core of bundlebox - sandbox reconciliation rules without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Manifest, dependency specs, package records, artifacts
//! - `value_objects/` - Immutable value types (PackageId, Environment, LoadPath)
//! - `services/` - Partitioning, installed-state diffing, local resolution
//! - `ports/` - Interface definitions for infrastructure and collaborators
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
