//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;
use std::sync::Arc;

use crate::application::ManifestReconciler;
use crate::config::{Config, OutputFormat};
use crate::domain::entities::Manifest;
use crate::domain::ports::{NoopEventSink, ReconcileEventSink};
use crate::infrastructure::{
    ArchiveInstaller, ConsoleEventSink, DirectoryRepository, JsonEventSink, LocalFs,
    SandboxLayout, TomlBootstrapRepository, TomlInstallIndexRepository, TomlMetadataIndex,
};

/// Type alias for the reconciler with all concrete dependencies
pub type ConcreteReconciler = ManifestReconciler<
    TomlInstallIndexRepository,
    TomlMetadataIndex,
    TomlBootstrapRepository,
    LocalFs,
>;

/// Create a reconciler for `manifest`.
///
/// Relative source paths resolve against `project_root`; the bin dir comes
/// from `config` when set there.
pub fn create_reconciler(
    manifest: Manifest,
    project_root: &Path,
    config: &Config,
) -> ConcreteReconciler {
    let sandbox = SandboxLayout::new(manifest.sandbox());
    let resolver = DirectoryRepository::new(project_root);
    let installer = ArchiveInstaller::new(sandbox);

    let reconciler = ManifestReconciler::new(
        manifest,
        Box::new(resolver),
        Box::new(installer),
        TomlInstallIndexRepository::new(),
        TomlMetadataIndex::new(),
        TomlBootstrapRepository::new(),
        LocalFs::new(),
    );

    match config.bin_dir(project_root) {
        Some(bin_dir) => reconciler.with_default_bin_dir(bin_dir),
        None => reconciler,
    }
}

/// Event sink for `command` under the configured output mode
pub fn create_event_sink(config: &Config, command: &'static str) -> Arc<dyn ReconcileEventSink> {
    match config.output.format {
        OutputFormat::Json => Arc::new(JsonEventSink::stdout(command)),
        OutputFormat::Text if config.output.verbosity == crate::config::Verbosity::Quiet => {
            Arc::new(NoopEventSink)
        }
        OutputFormat::Text => Arc::new(ConsoleEventSink::stdout(
            config.output.verbosity.is_verbose(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::RepositoryLocator;
    use std::path::PathBuf;

    fn manifest() -> Manifest {
        Manifest::new(
            vec![RepositoryLocator::new("repo")],
            Vec::new(),
            "/project/.bundlebox",
        )
    }

    #[test]
    fn reconciler_uses_manifest_sandbox() {
        let reconciler = create_reconciler(manifest(), Path::new("/project"), &Config::default());
        assert_eq!(
            reconciler.sandbox().root(),
            PathBuf::from("/project/.bundlebox")
        );
    }

    #[test]
    fn json_format_wants_every_event() {
        let mut config = Config::default();
        config.output.format = OutputFormat::Json;

        let sink = create_event_sink(&config, "install");
        assert!(sink.wants_detailed_events());
    }

    #[test]
    fn quiet_text_output_drops_details() {
        let mut config = Config::default();
        config.output.verbosity = crate::config::Verbosity::Quiet;

        let sink = create_event_sink(&config, "install");
        assert!(!sink.wants_detailed_events());
    }
}
