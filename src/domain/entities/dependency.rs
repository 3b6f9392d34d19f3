//! Dependency entities
//!
//! `DependencySpec` is what the manifest declares; `Requirement` is the
//! environment-free form handed to resolvers.

use std::collections::BTreeSet;
use std::fmt;

use semver::{Version, VersionReq};

/// A declared dependency: name, version requirement and environment tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySpec {
    name: String,
    requirement: VersionReq,
    only: Option<BTreeSet<String>>,
    except: Option<BTreeSet<String>>,
    require: Vec<String>,
}

impl DependencySpec {
    /// Create a dependency visible in every environment.
    ///
    /// The require list defaults to the package name.
    pub fn new(name: impl Into<String>, requirement: VersionReq) -> Self {
        let name = name.into();
        Self {
            require: vec![name.clone()],
            name,
            requirement,
            only: None,
            except: None,
        }
    }

    /// Restrict visibility to the given environments
    pub fn with_only<I, S>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(envs.into_iter().map(Into::into).collect());
        self
    }

    /// Hide from the given environments
    pub fn with_except<I, S>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except = Some(envs.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the files loaded by `require_all`
    pub fn with_require(mut self, files: Vec<String>) -> Self {
        self.require = files;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requirement(&self) -> &VersionReq {
        &self.requirement
    }

    pub fn only(&self) -> Option<&BTreeSet<String>> {
        self.only.as_ref()
    }

    pub fn except(&self) -> Option<&BTreeSet<String>> {
        self.except.as_ref()
    }

    /// Files to load, in order, when the dependency is required
    pub fn require_files(&self) -> &[String] {
        &self.require
    }

    /// Whether the dependency is visible in `environment`.
    ///
    /// Visible iff (`only` unset or contains env) and (`except` unset or
    /// does not contain env).
    pub fn is_visible_in(&self, environment: &str) -> bool {
        let allowed = self
            .only
            .as_ref()
            .map_or(true, |only| only.contains(environment));
        let excluded = self
            .except
            .as_ref()
            .is_some_and(|except| except.contains(environment));
        allowed && !excluded
    }

    /// Every environment name mentioned by `only` and `except`
    pub fn environment_tags(&self) -> impl Iterator<Item = &str> {
        self.only
            .iter()
            .chain(self.except.iter())
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Environment-free requirement for resolvers
    pub fn to_requirement(&self) -> Requirement {
        Requirement::new(self.name.clone(), self.requirement.clone())
    }
}

/// A resolvable requirement: package name plus version constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    name: String,
    version_req: VersionReq,
}

impl Requirement {
    pub fn new(name: impl Into<String>, version_req: VersionReq) -> Self {
        Self {
            name: name.into(),
            version_req,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version_req(&self) -> &VersionReq {
        &self.version_req
    }

    /// Whether `version` satisfies this requirement
    pub fn is_satisfied_by(&self, version: &Version) -> bool {
        self.version_req.matches(version)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version_req)
    }
}
