//! Wharf - workspace manifest management and validation for JS/TS monorepos
//!
//! This crate provides the core library functionality for Wharf: loading and
//! merging coexisting manifest formats with field provenance, cross-file
//! field updates, workspace discovery, dependency-graph cycle detection, and
//! a pluggable check pipeline gated by a project's declared stacks.

pub mod checks;
pub mod core;
pub mod graph;
pub mod util;

pub use self::core::{
    format::{FieldMappings, FormatKind},
    loader::{load, try_load, LoadError, LoadOptions},
    manifest::ManifestFile,
    package::PackageConfig,
    provenance::{FieldOrigin, TrackedField},
    workspace::{Workspace, WorkspaceError, WorkspaceModule},
    writer::{sync_field, update_field, update_version, TargetFiles, UpdateOptions, UpdateOutcome},
};

pub use checks::{run_checks, CheckRegistry, RunOptions, RunSummary};
pub use graph::{build_dependency_graph, detect_cycles, DependencyGraph};
pub use util::config::{ProjectConfig, Stack};
