//! Project behavior configuration.
//!
//! A workspace root may hold a `wharf.toml` declaring the technology stacks
//! in use plus a validation block with a skip list and per-check option
//! tables. Its absence means "run every check".

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

/// Expected filename of the project behavior configuration.
pub const PROJECT_CONFIG_NAME: &str = "wharf.toml";

/// A declared technology stack, used to gate which checks apply.
///
/// Unknown names are preserved rather than rejected, so a project declaring
/// a stack this binary predates still gates correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stack {
    Deno,
    Node,
    Web,
    Other(String),
}

impl FromStr for Stack {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "deno" => Stack::Deno,
            "node" => Stack::Node,
            "web" => Stack::Web,
            _ => Stack::Other(s.to_string()),
        })
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stack::Deno => f.write_str("deno"),
            Stack::Node => f.write_str("node"),
            Stack::Web => f.write_str("web"),
            Stack::Other(name) => f.write_str(name),
        }
    }
}

impl<'de> Deserialize<'de> for Stack {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().expect("stack parsing is infallible"))
    }
}

/// Project configuration loaded from `wharf.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Technology stacks the project declares.
    pub stacks: Vec<Stack>,

    /// Validation behavior.
    pub validation: ValidationConfig,
}

/// The `[validation]` block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Check names never run for this project.
    pub skip: Vec<String>,

    /// Per-check option tables, keyed by check name.
    pub options: BTreeMap<String, toml::value::Table>,
}

impl ProjectConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Load the configuration for a workspace root directory.
    pub fn for_root(root: &Path) -> Self {
        Self::load_or_default(&root.join(PROJECT_CONFIG_NAME))
    }

    /// The option table declared for a check, if any.
    pub fn check_options(&self, name: &str) -> Option<&toml::value::Table> {
        self.validation.options.get(name)
    }
}
