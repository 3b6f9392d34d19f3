//! Test environment builder for isolated bundlebox testing.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use super::fixtures::package_archive;

/// Result of running a bundlebox CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse every stdout line as JSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("stdout line is not JSON ({e}): {line}"))
            })
            .collect()
    }
}

/// A package to publish into the test repository
pub struct Package<'a> {
    pub name: &'a str,
    pub version: &'a str,
    pub dependencies: &'a [(&'a str, &'a str)],
    pub executable: Option<&'a str>,
}

impl<'a> Package<'a> {
    pub fn new(name: &'a str, version: &'a str) -> Self {
        Self {
            name,
            version,
            dependencies: &[],
            executable: None,
        }
    }

    pub fn depends_on(mut self, dependencies: &'a [(&'a str, &'a str)]) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_executable(mut self, name: &'a str) -> Self {
        self.executable = Some(name);
        self
    }

    pub fn full_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

/// Isolated test environment with temp directories.
///
/// Provides:
/// - Project directory holding `Bundlebox.toml`
/// - A directory repository the manifest points at
/// - An isolated home/config directory
pub struct TestEnv {
    pub project_root: TempDir,
    pub repo_root: TempDir,
    pub home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("Failed to create project dir"),
            repo_root: TempDir::new().expect("Failed to create repo dir"),
            home_dir: TempDir::new().expect("Failed to create home dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_bundlebox")),
        }
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Get path inside the default sandbox
    pub fn sandbox_path(&self, relative: &str) -> PathBuf {
        self.project_path(".bundlebox").join(relative)
    }

    /// Write `Bundlebox.toml` with the test repository as its only source
    pub fn write_manifest(&self, dependencies: &str) {
        let manifest = format!(
            "sources = [\"{}\"]\n\n{}",
            self.repo_root.path().display().to_string().replace('\\', "/"),
            dependencies
        );
        self.write_project_file("Bundlebox.toml", &manifest);
    }

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write project file");
    }

    /// Publish a package (metadata + archive) into the test repository
    pub fn publish(&self, package: Package<'_>) {
        let repo = self.repo_root.path();
        let specifications = repo.join("specifications");
        let cache = repo.join("cache");
        std::fs::create_dir_all(&specifications).unwrap();
        std::fs::create_dir_all(&cache).unwrap();

        let mut metadata = format!(
            "name = \"{}\"\nversion = \"{}\"\n",
            package.name, package.version
        );
        if package.executable.is_some() {
            metadata.push_str("bin_dir = \"exe\"\n");
        }
        for (name, version) in package.dependencies {
            metadata.push_str(&format!(
                "\n[[dependencies]]\nname = \"{}\"\nversion = \"{}\"\n",
                name, version
            ));
        }
        std::fs::write(
            specifications.join(format!("{}.toml", package.full_name())),
            metadata,
        )
        .unwrap();
        std::fs::write(
            cache.join(format!("{}.pkg", package.full_name())),
            package_archive(package.name, package.executable),
        )
        .unwrap();
    }

    /// Run bundlebox in the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.project_root.path(), args)
    }

    /// Run bundlebox from a specific directory
    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let output = Command::new(&self.bin)
            .current_dir(cwd)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env_remove("BUNDLEBOX_LOG")
            .env_remove("BUNDLEBOX_BIN_DIR")
            .env_remove("BUNDLEBOX_FORMAT")
            .env_remove("BUNDLEBOX_VERBOSITY")
            .output()
            .expect("Failed to execute bundlebox");

        output_to_result(output)
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
