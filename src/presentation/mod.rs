//! Presentation Layer
//!
//! This layer handles:
//! - Creating use cases with infrastructure dependencies
//! - Choosing how progress is reported (text/JSON)
//!
//! ## Structure
//!
//! - `factory` - Creates the reconciler and event sinks (dependency injection)
//!
//! ## Usage
//!
//! ```ignore
//! use bundlebox::presentation::factory;
//!
//! let reconciler = factory::create_reconciler(manifest, &project_root, &config);
//! let report = reconciler.install(&InstallOptions::new())?;
//! ```

pub mod factory;

pub use factory::{create_event_sink, create_reconciler, ConcreteReconciler};
