//! Core data structures for Wharf.
//!
//! This module contains the foundational types used throughout Wharf:
//! - Manifest formats and the field-mapping table
//! - Parsed manifest snapshots and field provenance
//! - Merged package configurations, loading and writing
//! - Workspace discovery

pub mod format;
pub mod loader;
pub mod manifest;
pub mod package;
pub mod provenance;
pub mod workspace;
pub mod writer;

pub use format::{FieldMappings, FormatKind};
pub use loader::{load, try_load, LoadError, LoadOptions};
pub use manifest::ManifestFile;
pub use package::PackageConfig;
pub use provenance::{FieldOrigin, TrackedField};
pub use workspace::{Workspace, WorkspaceError, WorkspaceModule};
