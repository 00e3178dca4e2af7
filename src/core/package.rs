//! Merged per-package configuration with field provenance.
//!
//! A `PackageConfig` is the result of loading every manifest file in one
//! package directory and merging the tracked fields by format priority.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::core::format::{FieldMappings, FormatKind};
use crate::core::manifest::ManifestFile;
use crate::core::provenance::TrackedField;

/// The merged configuration of one package directory.
#[derive(Debug, Clone)]
pub struct PackageConfig {
    /// Tracked fields keyed by logical field name.
    fields: BTreeMap<String, TrackedField<Value>>,

    /// The directory the manifest files were loaded from.
    pub base_dir: PathBuf,

    /// The loaded manifest files, highest priority first.
    pub files: Vec<ManifestFile>,

    /// The field-mapping table the files were loaded with. The writer uses
    /// the same table to resolve property paths per target file.
    pub mappings: FieldMappings,
}

impl PackageConfig {
    pub fn new(base_dir: impl Into<PathBuf>, files: Vec<ManifestFile>, mappings: FieldMappings) -> Self {
        PackageConfig {
            fields: BTreeMap::new(),
            base_dir: base_dir.into(),
            files,
            mappings,
        }
    }

    /// Get a tracked field by logical name.
    pub fn field(&self, name: &str) -> Option<&TrackedField<Value>> {
        self.fields.get(name)
    }

    /// Get a tracked field mutably.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut TrackedField<Value>> {
        self.fields.get_mut(name)
    }

    /// Insert or replace a tracked field.
    pub fn set_field(&mut self, name: impl Into<String>, field: TrackedField<Value>) {
        self.fields.insert(name.into(), field);
    }

    /// Names of the fields that are defined, in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Get a loaded file by format.
    pub fn file(&self, format: FormatKind) -> Option<&ManifestFile> {
        self.files.iter().find(|f| f.format == format)
    }

    /// Get a mutable loaded file by path.
    pub fn file_by_path_mut(&mut self, path: &Path) -> Option<&mut ManifestFile> {
        self.files.iter_mut().find(|f| f.path == path)
    }

    /// The package name, when defined as a string.
    pub fn name(&self) -> Option<&str> {
        self.field("name").and_then(|f| f.value.as_str())
    }

    /// The package version, when defined as a string.
    pub fn version(&self) -> Option<&str> {
        self.field("version").and_then(|f| f.value.as_str())
    }

    /// The package description, when defined as a string.
    pub fn description(&self) -> Option<&str> {
        self.field("description").and_then(|f| f.value.as_str())
    }

    /// The declared license, when defined as a string.
    pub fn license(&self) -> Option<&str> {
        self.field("license").and_then(|f| f.value.as_str())
    }

    /// Whether the package is marked private.
    pub fn is_private(&self) -> bool {
        self.field("private")
            .map(|f| f.value == Value::Bool(true))
            .unwrap_or(false)
    }

    /// The raw exports value (string or object).
    pub fn exports(&self) -> Option<&Value> {
        self.field("exports").map(|f| &f.value)
    }

    /// The raw workspace-membership value.
    pub fn workspaces(&self) -> Option<&Value> {
        self.field("workspaces").map(|f| &f.value)
    }
}
