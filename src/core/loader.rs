//! Loading and merging manifest files from a package directory.
//!
//! The loader checks each candidate format in priority order, parses the
//! files it finds, and merges the tracked fields into a `PackageConfig`
//! with per-field provenance.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::format::{FieldMappings, FormatKind, TRACKED_FIELDS};
use crate::core::manifest::ManifestFile;
use crate::core::package::PackageConfig;
use crate::core::provenance::{FieldOrigin, TrackedField};
use crate::util::jsonpath;

/// Error loading a package configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No manifest file exists in the directory (or any searched ancestor).
    #[error("no manifest file found in `{dir}`")]
    NoManifest { dir: PathBuf },

    #[error("failed to read `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse `{path}`")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Options controlling a load.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Formats to consider; `None` means all formats.
    pub include: Option<Vec<FormatKind>>,

    /// Field-mapping table used for extraction (and later for writes).
    pub mappings: FieldMappings,

    /// Walk parent directories until a manifest is found.
    pub search_parents: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            include: None,
            mappings: FieldMappings::default(),
            search_parents: false,
        }
    }
}

/// Load and merge the manifest files of a package directory.
///
/// Fails with [`LoadError::NoManifest`] when the directory (and, with
/// `search_parents`, every ancestor) holds no manifest file.
pub fn load(base_dir: &Path, options: &LoadOptions) -> Result<PackageConfig, LoadError> {
    let mut dir = base_dir.to_path_buf();

    let files = loop {
        let files = load_dir(&dir, options)?;
        if !files.is_empty() {
            break files;
        }
        if !options.search_parents {
            return Err(LoadError::NoManifest { dir });
        }
        match dir.parent() {
            // The walk halts at the directory that is its own parent.
            Some(parent) if parent != dir => dir = parent.to_path_buf(),
            _ => {
                return Err(LoadError::NoManifest {
                    dir: base_dir.to_path_buf(),
                })
            }
        }
    };

    tracing::debug!(
        "loaded {} manifest file(s) from {}",
        files.len(),
        dir.display()
    );

    let mut config = PackageConfig::new(dir, files, options.mappings.clone());
    for field in TRACKED_FIELDS {
        if let Some(tracked) = extract_field(&config.files, &config.mappings, field) {
            config.set_field(field, tracked);
        }
    }
    Ok(config)
}

/// Non-throwing variant of [`load`]: absence of a manifest yields `None`,
/// anything else (I/O failure, parse failure) still propagates.
pub fn try_load(base_dir: &Path, options: &LoadOptions) -> Result<Option<PackageConfig>, LoadError> {
    match load(base_dir, options) {
        Ok(config) => Ok(Some(config)),
        Err(LoadError::NoManifest { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Extract one logical field from loaded files (highest priority first).
///
/// The first file whose mapping defines a property path with a present value
/// becomes the primary origin; every later definer is appended to the
/// alternate origins, never overwriting the primary.
pub fn extract_field(
    files: &[ManifestFile],
    mappings: &FieldMappings,
    field: &str,
) -> Option<TrackedField<serde_json::Value>> {
    let mut tracked: Option<TrackedField<serde_json::Value>> = None;

    for file in files {
        let Some(property_path) = mappings.property_path(file.format, field) else {
            continue;
        };
        let Some(value) = jsonpath::get_path(&file.tree, property_path) else {
            continue;
        };
        let origin = FieldOrigin {
            path: file.path.clone(),
            format: file.format,
            property_path: property_path.to_string(),
        };
        match tracked.as_mut() {
            None => tracked = Some(TrackedField::new(value.clone(), origin)),
            Some(t) => t.alternate_origins.push(origin),
        }
    }

    tracked
}

/// Read and parse every present manifest format in one directory.
fn load_dir(dir: &Path, options: &LoadOptions) -> Result<Vec<ManifestFile>, LoadError> {
    let mut files = Vec::new();

    for format in FormatKind::ALL {
        if let Some(include) = &options.include {
            if !include.contains(&format) {
                continue;
            }
        }

        let path = dir.join(format.file_name());
        if !path.exists() || !path.is_file() {
            continue;
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let file =
            ManifestFile::parse(&path, format, raw).map_err(|source| LoadError::Parse {
                path: path.clone(),
                source,
            })?;
        files.push(file);
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_no_manifest() {
        let tmp = TempDir::new().unwrap();
        let err = load(tmp.path(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::NoManifest { .. }));
    }

    #[test]
    fn test_try_load_swallows_only_no_manifest() {
        let tmp = TempDir::new().unwrap();
        assert!(try_load(tmp.path(), &LoadOptions::default())
            .unwrap()
            .is_none());

        write(tmp.path(), "deno.json", "{ not json");
        let err = try_load(tmp.path(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_load_single_manifest() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "deno.json",
            r#"{"name": "@scope/pkg", "version": "1.0.0"}"#,
        );

        let config = load(tmp.path(), &LoadOptions::default()).unwrap();
        assert_eq!(config.name(), Some("@scope/pkg"));
        assert_eq!(config.version(), Some("1.0.0"));
        assert_eq!(config.files.len(), 1);
        assert_eq!(config.base_dir, tmp.path());
    }

    #[test]
    fn test_priority_and_alternate_origins() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "deno.json",
            r#"{"name": "@scope/pkg", "version": "1.0.0"}"#,
        );
        write(
            tmp.path(),
            "jsr.json",
            r#"{"name": "@scope/pkg", "version": "1.0.1"}"#,
        );

        let config = load(tmp.path(), &LoadOptions::default()).unwrap();
        let version = config.field("version").unwrap();

        assert_eq!(version.value, json!("1.0.0"));
        assert_eq!(version.origin.format, FormatKind::DenoJson);
        assert_eq!(version.alternate_origins.len(), 1);
        assert_eq!(version.alternate_origins[0].format, FormatKind::JsrJson);
    }

    #[test]
    fn test_provenance_invariants() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "deno.json", r#"{"version": "1.0.0"}"#);
        write(tmp.path(), "jsr.json", r#"{"version": "1.0.1"}"#);
        write(tmp.path(), "package.json", r#"{"version": "1.0.2"}"#);

        let config = load(tmp.path(), &LoadOptions::default()).unwrap();
        let loaded: Vec<_> = config.files.iter().map(|f| f.path.clone()).collect();

        let field = config.field("version").unwrap();
        assert!(loaded.contains(&field.origin.path));
        assert!(!field.alternate_origins.contains(&field.origin));
        for alt in &field.alternate_origins {
            assert!(loaded.contains(&alt.path));
            assert!(field.origin.format.priority() <= alt.format.priority());
        }
    }

    #[test]
    fn test_include_filter() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "deno.json", r#"{"version": "1.0.0"}"#);
        write(tmp.path(), "package.json", r#"{"version": "2.0.0"}"#);

        let options = LoadOptions {
            include: Some(vec![FormatKind::PackageJson]),
            ..Default::default()
        };
        let config = load(tmp.path(), &options).unwrap();
        assert_eq!(config.files.len(), 1);
        assert_eq!(config.version(), Some("2.0.0"));
    }

    #[test]
    fn test_search_parents() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "deno.json", r#"{"name": "@scope/root"}"#);
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let err = load(&nested, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::NoManifest { .. }));

        let options = LoadOptions {
            search_parents: true,
            ..Default::default()
        };
        let config = load(&nested, &options).unwrap();
        assert_eq!(config.name(), Some("@scope/root"));
        assert_eq!(config.base_dir, tmp.path());
    }

    #[test]
    fn test_custom_mappings() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "package.json",
            r#"{"meta": {"label": "custom"}}"#,
        );

        let mut mappings = FieldMappings::empty();
        mappings.insert(FormatKind::PackageJson, "name", "meta.label");
        let options = LoadOptions {
            mappings,
            ..Default::default()
        };

        let config = load(tmp.path(), &options).unwrap();
        assert_eq!(config.name(), Some("custom"));
    }

    #[test]
    fn test_directory_named_like_manifest_is_skipped() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("deno.json")).unwrap();
        write(tmp.path(), "package.json", r#"{"name": "pkg"}"#);

        let config = load(tmp.path(), &LoadOptions::default()).unwrap();
        assert_eq!(config.files.len(), 1);
        assert_eq!(config.files[0].format, FormatKind::PackageJson);
    }
}
