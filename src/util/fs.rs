//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;
use walkdir::WalkDir;

/// Directory names never descended into by source walks.
const SKIP_DIRS: [&str; 4] = ["node_modules", ".git", "vendor", "dist"];

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Expand a glob pattern relative to a base directory to directories only.
///
/// Results are sorted and deduplicated for deterministic traversal order.
pub fn glob_dirs(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = base.join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let mut results = Vec::new();
    for entry in
        glob(&pattern_str).with_context(|| format!("invalid glob pattern: {}", pattern))?
    {
        match entry {
            Ok(path) => {
                if path.is_dir() {
                    results.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("glob error: {}", e);
            }
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

/// Walk a directory for files with one of the given extensions, skipping
/// dependency/VCS directories and any path containing a skip pattern.
///
/// The walk is a finite lazy sequence fully drained here; results are sorted.
pub fn walk_source_files(root: &Path, extensions: &[&str], skip: &[String]) -> Vec<PathBuf> {
    let mut results: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !(entry.file_type().is_dir() && SKIP_DIRS.contains(&name.as_ref()))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .map(|ext| extensions.iter().any(|e| ext == *e))
                .unwrap_or(false)
        })
        .filter(|path| {
            let text = path.to_string_lossy();
            !skip.iter().any(|pattern| text.contains(pattern.as_str()))
        })
        .collect();

    results.sort();
    results
}

/// Get the relative path from `base` to `path`, for display.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}
