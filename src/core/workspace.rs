//! Workspace discovery.
//!
//! The root config's workspace-membership field defines the workspace shape;
//! entries are literal relative paths or glob patterns expanding to member
//! directories. Member directories without a manifest, without a name, or
//! marked private are skipped.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::core::loader::{self, LoadError, LoadOptions};
use crate::core::package::PackageConfig;
use crate::util::fs;

/// Default version for members that do not declare one.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Error discovering a workspace.
///
/// Shape violations are user-configuration errors with no recoverable
/// fallback; the binary maps them to a diagnostic and exit code 1.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("workspace root `{dir}` does not declare workspace members")]
    MissingMembers { dir: PathBuf },

    #[error("workspace membership entries must be strings, found `{entry}` in `{dir}`")]
    MalformedMember { dir: PathBuf, entry: String },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to expand workspace pattern `{pattern}`: {reason}")]
    Pattern { pattern: String, reason: String },
}

/// A discovered, non-private, named workspace member.
#[derive(Debug, Clone)]
pub struct WorkspaceModule {
    pub name: String,
    pub version: String,
    pub config: PackageConfig,
}

impl WorkspaceModule {
    /// The member's directory.
    pub fn dir(&self) -> &Path {
        &self.config.base_dir
    }
}

/// The workspace root plus its discovered members.
#[derive(Debug)]
pub struct Workspace {
    pub root_dir: PathBuf,
    pub root: PackageConfig,
    pub modules: Vec<WorkspaceModule>,
}

impl Workspace {
    /// Discover the workspace rooted at `root_dir`.
    pub fn discover(root_dir: &Path, options: &LoadOptions) -> Result<Self, WorkspaceError> {
        let root = loader::load(root_dir, options)?;
        let root_dir = root.base_dir.clone();
        let patterns = member_patterns(&root, &root_dir)?;

        let mut modules = Vec::new();
        for dir in expand_patterns(&root_dir, &patterns)? {
            let Some(config) = loader::try_load(&dir, options)? else {
                tracing::debug!("skipping {}: no manifest", dir.display());
                continue;
            };
            let Some(name) = config.name().map(str::to_string) else {
                tracing::debug!("skipping {}: unnamed", dir.display());
                continue;
            };
            if config.is_private() {
                tracing::debug!("skipping {}: private", dir.display());
                continue;
            }
            let version = config.version().unwrap_or(DEFAULT_VERSION).to_string();
            modules.push(WorkspaceModule {
                name,
                version,
                config,
            });
        }

        Ok(Workspace {
            root_dir,
            root,
            modules,
        })
    }

    /// Find a module by name: exact match first, then suffix match on
    /// `"/" + name`. On an ambiguous suffix the first match in module order
    /// wins; no priority rule is applied.
    pub fn find_module(&self, name: &str) -> Option<&WorkspaceModule> {
        self.modules.iter().find(|m| m.name == name).or_else(|| {
            let suffix = format!("/{}", name);
            self.modules.iter().find(|m| m.name.ends_with(&suffix))
        })
    }
}

/// Validate the membership field's shape and collect its entries.
fn member_patterns(root: &PackageConfig, root_dir: &Path) -> Result<Vec<String>, WorkspaceError> {
    let Some(value) = root.workspaces() else {
        return Err(WorkspaceError::MissingMembers {
            dir: root_dir.to_path_buf(),
        });
    };

    let Value::Array(entries) = value else {
        return Err(WorkspaceError::MalformedMember {
            dir: root_dir.to_path_buf(),
            entry: value.to_string(),
        });
    };

    let mut patterns = Vec::new();
    for entry in entries {
        match entry.as_str() {
            Some(s) => patterns.push(s.to_string()),
            None => {
                return Err(WorkspaceError::MalformedMember {
                    dir: root_dir.to_path_buf(),
                    entry: entry.to_string(),
                })
            }
        }
    }
    Ok(patterns)
}

/// Expand membership entries to member directories. Literal entries are
/// joined to the root; glob entries expand to directories only.
fn expand_patterns(root_dir: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, WorkspaceError> {
    let mut dirs = Vec::new();
    for pattern in patterns {
        if pattern.contains(&['*', '?', '['][..]) {
            let expanded = fs::glob_dirs(root_dir, pattern).map_err(|e| WorkspaceError::Pattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
            dirs.extend(expanded);
        } else {
            dirs.push(root_dir.join(pattern));
        }
    }
    Ok(dirs)
}
