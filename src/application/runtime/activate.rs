//! Bootstrap activation

use std::path::PathBuf;

use crate::domain::ports::BootstrapRepository;
use crate::domain::value_objects::Environment;
use crate::error::{BundleError, BundleResult};
use crate::infrastructure::sandbox::SandboxLayout;

use super::registry::{ActiveBootstrap, ProcessRegistry};

/// Activate `environment` of the sandbox in `registry`.
///
/// Re-activating the active environment of the same sandbox is a no-op; any
/// other second activation fails with `AlreadyActivated`.
pub fn activate<'r, BR: BootstrapRepository>(
    registry: &'r ProcessRegistry,
    bootstrap_repo: &BR,
    sandbox: &SandboxLayout,
    environment: &Environment,
    ambient_path: &[PathBuf],
) -> BundleResult<&'r ActiveBootstrap> {
    let path = sandbox.bootstrap(environment);
    if !path.is_file() {
        return Err(BundleError::BootstrapMissing {
            environment: environment.to_string(),
            path,
        });
    }

    let artifact = bootstrap_repo.load_environment(&path)?;
    let bootstrap = ActiveBootstrap {
        marker: artifact.marker().to_string(),
        environment: artifact.environment().clone(),
        registrations: artifact.registrations().to_vec(),
        search_path: artifact.load_path().effective(ambient_path),
    };

    let active = registry.activate_once(bootstrap);
    if active.environment != *environment || active.marker != artifact.marker() {
        return Err(BundleError::AlreadyActivated {
            active: active.environment.to_string(),
            requested: environment.to_string(),
        });
    }

    tracing::debug!(
        environment = %environment,
        entries = active.search_path.len(),
        "activated bootstrap"
    );
    Ok(active)
}
