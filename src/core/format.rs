//! Manifest format kinds and the field-mapping table.
//!
//! A package directory may hold several manifest files at once. Formats are
//! ranked: when the same logical field is defined in more than one file, the
//! highest-ranked definer wins and the others are recorded as alternates.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A manifest file format, in a fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatKind {
    /// `deno.json` - primary build manifest
    DenoJson,
    /// `deno.jsonc` - comment-tolerant variant
    DenoJsonc,
    /// `jsr.json` - publishing manifest
    JsrJson,
    /// `jsr.jsonc` - publishing manifest, comment-tolerant
    JsrJsonc,
    /// `package.json` - legacy ecosystem manifest
    PackageJson,
}

impl FormatKind {
    /// All formats, highest priority first.
    pub const ALL: [FormatKind; 5] = [
        FormatKind::DenoJson,
        FormatKind::DenoJsonc,
        FormatKind::JsrJson,
        FormatKind::JsrJsonc,
        FormatKind::PackageJson,
    ];

    /// The expected on-disk filename for this format.
    pub fn file_name(&self) -> &'static str {
        match self {
            FormatKind::DenoJson => "deno.json",
            FormatKind::DenoJsonc => "deno.jsonc",
            FormatKind::JsrJson => "jsr.json",
            FormatKind::JsrJsonc => "jsr.jsonc",
            FormatKind::PackageJson => "package.json",
        }
    }

    /// Whether this format tolerates `//` and `/* */` comments.
    pub fn is_jsonc(&self) -> bool {
        matches!(self, FormatKind::DenoJsonc | FormatKind::JsrJsonc)
    }

    /// Rank in the priority order (0 = highest).
    pub fn priority(&self) -> usize {
        Self::ALL
            .iter()
            .position(|f| f == self)
            .unwrap_or(Self::ALL.len())
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

impl FromStr for FormatKind {
    type Err = FormatKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deno.json" | "deno-json" => Ok(FormatKind::DenoJson),
            "deno.jsonc" | "deno-jsonc" => Ok(FormatKind::DenoJsonc),
            "jsr.json" | "jsr-json" => Ok(FormatKind::JsrJson),
            "jsr.jsonc" | "jsr-jsonc" => Ok(FormatKind::JsrJsonc),
            "package.json" | "package-json" => Ok(FormatKind::PackageJson),
            _ => Err(FormatKindParseError(s.to_string())),
        }
    }
}

/// Error parsing a format kind name.
#[derive(Debug, Clone)]
pub struct FormatKindParseError(pub String);

impl fmt::Display for FormatKindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown manifest format '{}', valid values: deno.json, deno.jsonc, jsr.json, jsr.jsonc, package.json",
            self.0
        )
    }
}

impl std::error::Error for FormatKindParseError {}

/// Logical field names tracked across manifest formats.
pub const TRACKED_FIELDS: [&str; 7] = [
    "name",
    "version",
    "description",
    "license",
    "private",
    "exports",
    "workspaces",
];

/// Per-format mapping of logical field name to dotted property path.
///
/// A field with no mapping for a given format cannot be read from or written
/// to files of that format; the writer reports such targets as skipped.
#[derive(Debug, Clone)]
pub struct FieldMappings {
    paths: HashMap<FormatKind, HashMap<String, String>>,
}

impl FieldMappings {
    /// An empty mapping table.
    pub fn empty() -> Self {
        FieldMappings {
            paths: HashMap::new(),
        }
    }

    /// Look up the property path for a field in a given format.
    pub fn property_path(&self, format: FormatKind, field: &str) -> Option<&str> {
        self.paths
            .get(&format)
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    /// Insert or replace a mapping.
    pub fn insert(
        &mut self,
        format: FormatKind,
        field: impl Into<String>,
        path: impl Into<String>,
    ) {
        self.paths
            .entry(format)
            .or_default()
            .insert(field.into(), path.into());
    }
}

impl Default for FieldMappings {
    fn default() -> Self {
        let mut m = FieldMappings::empty();

        for format in [FormatKind::DenoJson, FormatKind::DenoJsonc] {
            m.insert(format, "name", "name");
            m.insert(format, "version", "version");
            m.insert(format, "description", "description");
            m.insert(format, "license", "license");
            m.insert(format, "exports", "exports");
            // Deno spells the membership field without the trailing `s`.
            m.insert(format, "workspaces", "workspace");
        }

        for format in [FormatKind::JsrJson, FormatKind::JsrJsonc] {
            m.insert(format, "name", "name");
            m.insert(format, "version", "version");
            m.insert(format, "license", "license");
            m.insert(format, "exports", "exports");
        }

        m.insert(FormatKind::PackageJson, "name", "name");
        m.insert(FormatKind::PackageJson, "version", "version");
        m.insert(FormatKind::PackageJson, "description", "description");
        m.insert(FormatKind::PackageJson, "license", "license");
        m.insert(FormatKind::PackageJson, "private", "private");
        m.insert(FormatKind::PackageJson, "exports", "exports");
        m.insert(FormatKind::PackageJson, "workspaces", "workspaces");

        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(FormatKind::DenoJson.priority() < FormatKind::DenoJsonc.priority());
        assert!(FormatKind::DenoJsonc.priority() < FormatKind::JsrJson.priority());
        assert!(FormatKind::JsrJsonc.priority() < FormatKind::PackageJson.priority());
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(
            "deno.json".parse::<FormatKind>().unwrap(),
            FormatKind::DenoJson
        );
        assert_eq!(
            "package.json".parse::<FormatKind>().unwrap(),
            FormatKind::PackageJson
        );
        assert!("Cargo.toml".parse::<FormatKind>().is_err());
    }

    #[test]
    fn test_default_mappings() {
        let m = FieldMappings::default();
        assert_eq!(
            m.property_path(FormatKind::DenoJson, "workspaces"),
            Some("workspace")
        );
        assert_eq!(
            m.property_path(FormatKind::PackageJson, "workspaces"),
            Some("workspaces")
        );
        // jsr.json has no description slot
        assert_eq!(m.property_path(FormatKind::JsrJson, "description"), None);
        // private only exists in package.json
        assert_eq!(m.property_path(FormatKind::DenoJson, "private"), None);
        assert_eq!(
            m.property_path(FormatKind::PackageJson, "private"),
            Some("private")
        );
    }

    #[test]
    fn test_mapping_override() {
        let mut m = FieldMappings::default();
        m.insert(FormatKind::PackageJson, "exports", "main");
        assert_eq!(
            m.property_path(FormatKind::PackageJson, "exports"),
            Some("main")
        );
    }
}
