//! Environment value object - a named partition of the dependency set
//!
//! `default` always exists. Other names come from the `only`/`except` tags
//! declared on dependencies.

use std::fmt;

use thiserror::Error;

/// Why a name cannot be used for an environment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEnvironmentName {
    #[error("environment name is empty")]
    Empty,

    #[error("environment name '{0}' contains a path separator")]
    PathSeparator(String),

    #[error("environment name '{0}' contains '..'")]
    ParentReference(String),

    #[error("environment name '{0}' contains a NUL byte")]
    Nul(String),

    /// Collides with another file in the bootstrap root
    #[error("environment name '{0}' is reserved")]
    Reserved(String),
}

/// Name of an environment (e.g. "default", "test")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Environment(String);

impl Environment {
    /// Name of the environment every manifest has
    pub const DEFAULT: &'static str = "default";

    /// File stems in `environments/` that belong to something else
    pub const RESERVED: &'static [&'static str] = &["loader-shim"];

    /// Validate a name that will become `environments/<name>.toml`
    pub fn parse(name: &str) -> Result<Self, InvalidEnvironmentName> {
        if name.is_empty() {
            return Err(InvalidEnvironmentName::Empty);
        }
        if name.contains(['/', '\\']) {
            return Err(InvalidEnvironmentName::PathSeparator(name.to_string()));
        }
        if name.contains("..") {
            return Err(InvalidEnvironmentName::ParentReference(name.to_string()));
        }
        if name.contains('\0') {
            return Err(InvalidEnvironmentName::Nul(name.to_string()));
        }
        if Self::RESERVED.contains(&name) {
            return Err(InvalidEnvironmentName::Reserved(name.to_string()));
        }
        Ok(Self::new(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The `default` environment
    pub fn default_env() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of this environment's bootstrap artifact
    pub fn bootstrap_file_name(&self) -> String {
        format!("{}.toml", self.0)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::default_env()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Environment {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Environment {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Environment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
