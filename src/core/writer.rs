//! Cross-file field updates.
//!
//! The writer mutates a loaded `PackageConfig` and the manifest files behind
//! it. Each target file is rewritten independently: a target without a
//! mapped property path is skipped, a failing write is recorded and does not
//! abort the remaining targets, and after any successful write the in-memory
//! tracked field is refreshed. Partial failure is an expected outcome.

use std::path::PathBuf;

use serde_json::Value;

use crate::core::format::FormatKind;
use crate::core::manifest::serialize_tree;
use crate::core::package::PackageConfig;
use crate::core::provenance::{FieldOrigin, TrackedField};
use crate::util::jsonpath;

/// Which files an update should touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetFiles {
    /// Only the current primary-origin file (or the first loaded file when
    /// the field is absent and `create_if_missing` is set).
    Origin,
    /// Every file currently defining the field (or every loaded file when
    /// the field is absent and `create_if_missing` is set).
    All,
    /// The loaded files of the listed formats.
    Formats(Vec<FormatKind>),
}

/// Options for [`update_field`].
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub targets: TargetFiles,
    pub create_if_missing: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        UpdateOptions {
            targets: TargetFiles::Origin,
            create_if_missing: false,
        }
    }
}

/// A write that failed, with its stringified cause.
#[derive(Debug, Clone)]
pub struct FailedWrite {
    pub path: PathBuf,
    pub reason: String,
}

/// Per-file outcome of an update.
#[derive(Debug, Clone, Default)]
pub struct UpdateOutcome {
    /// Files rewritten successfully.
    pub updated: Vec<PathBuf>,

    /// Files whose write failed.
    pub failed: Vec<FailedWrite>,

    /// Targets lacking a mapped property path for the field.
    pub skipped: Vec<PathBuf>,
}

impl UpdateOutcome {
    /// Whether anything was written.
    pub fn changed(&self) -> bool {
        !self.updated.is_empty()
    }
}

/// Update one logical field across the resolved target files.
pub fn update_field(
    config: &mut PackageConfig,
    field: &str,
    value: Value,
    options: &UpdateOptions,
) -> UpdateOutcome {
    let mut outcome = UpdateOutcome::default();

    // Resolve targets (and their property paths) up front so the mutation
    // loop only touches one file at a time.
    let targets: Vec<(PathBuf, Option<String>)> = resolve_targets(config, field, options)
        .into_iter()
        .map(|path| {
            let property_path = config
                .files
                .iter()
                .find(|f| f.path == path)
                .and_then(|f| config.mappings.property_path(f.format, field))
                .map(str::to_string);
            (path, property_path)
        })
        .collect();

    for (path, property_path) in targets {
        let Some(property_path) = property_path else {
            outcome.skipped.push(path);
            continue;
        };

        let Some(file) = config.file_by_path_mut(&path) else {
            continue;
        };

        let mut tree = file.tree.clone();
        jsonpath::set_path(&mut tree, &property_path, value.clone());
        let text = serialize_tree(&tree);

        match std::fs::write(&path, &text) {
            Ok(()) => {
                file.tree = tree;
                file.raw = text;
                outcome.updated.push(path);
            }
            Err(e) => {
                tracing::warn!("failed to write {}: {}", path.display(), e);
                outcome.failed.push(FailedWrite {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    if !outcome.updated.is_empty() {
        refresh_field(config, field, value, &outcome.updated);
    }

    outcome
}

/// Update the version field in every file defining it.
pub fn update_version(config: &mut PackageConfig, version: &str) -> UpdateOutcome {
    update_field(
        config,
        "version",
        Value::String(version.to_string()),
        &UpdateOptions {
            targets: TargetFiles::All,
            create_if_missing: false,
        },
    )
}

/// Propagate a field's current primary value to every other file able to
/// hold it. Returns `None` when the field is not defined at all.
pub fn sync_field(config: &mut PackageConfig, field: &str) -> Option<UpdateOutcome> {
    let value = config.field(field)?.value.clone();
    Some(update_field(
        config,
        field,
        value,
        &UpdateOptions {
            targets: TargetFiles::All,
            create_if_missing: false,
        },
    ))
}

fn resolve_targets(config: &PackageConfig, field: &str, options: &UpdateOptions) -> Vec<PathBuf> {
    match &options.targets {
        TargetFiles::Origin => match config.field(field) {
            Some(tracked) => vec![tracked.origin.path.clone()],
            None if options.create_if_missing => config
                .files
                .first()
                .map(|f| vec![f.path.clone()])
                .unwrap_or_default(),
            None => Vec::new(),
        },
        TargetFiles::All => match config.field(field) {
            Some(tracked) => tracked.origins().map(|o| o.path.clone()).collect(),
            None if options.create_if_missing => {
                config.files.iter().map(|f| f.path.clone()).collect()
            }
            None => Vec::new(),
        },
        TargetFiles::Formats(kinds) => config
            .files
            .iter()
            .filter(|f| kinds.contains(&f.format))
            .map(|f| f.path.clone())
            .collect(),
    }
}

/// Refresh the in-memory tracked field after at least one successful write.
fn refresh_field(config: &mut PackageConfig, field: &str, value: Value, updated: &[PathBuf]) {
    if let Some(tracked) = config.field_mut(field) {
        tracked.value = value;
        return;
    }

    // The field did not exist before; synthesize it from the updated files,
    // which are already in priority order.
    let mut origins = updated.iter().filter_map(|path| {
        let file = config.files.iter().find(|f| f.path == *path)?;
        let property_path = config.mappings.property_path(file.format, field)?;
        Some(FieldOrigin {
            path: file.path.clone(),
            format: file.format,
            property_path: property_path.to_string(),
        })
    });

    if let Some(origin) = origins.next() {
        let mut tracked = TrackedField::new(value, origin);
        tracked.alternate_origins = origins.collect();
        config.set_field(field, tracked);
    }
}
