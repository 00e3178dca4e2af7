//! Manifest cross-consistency check.
//!
//! When a member defines the same logical field in several manifest files,
//! the values must agree. Version disagreements additionally suggest the
//! pairwise-highest version; only literal versions are compared, never
//! ranges.

use anyhow::Result;
use semver::Version;
use serde_json::Value;

use crate::checks::{Check, CheckContext, CheckReport, Issue};
use crate::core::package::PackageConfig;
use crate::core::provenance::FieldOrigin;
use crate::util::jsonpath;

/// Flags fields whose values disagree across a member's manifest files.
pub struct ManifestConsistency;

impl Check for ManifestConsistency {
    fn name(&self) -> &'static str {
        "consistency"
    }

    fn description(&self) -> &'static str {
        "Verify fields agree across a package's manifest files"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckReport> {
        let mut report = CheckReport::new(self.name());

        for module in &ctx.workspace.modules {
            report.stats.count("modules", 1);
            let config = &module.config;

            let field_names: Vec<String> =
                config.field_names().map(str::to_string).collect();
            for field_name in field_names {
                let Some(field) = config.field(&field_name) else {
                    continue;
                };
                if field.alternate_origins.is_empty() {
                    continue;
                }
                report.stats.count("fields", 1);

                let mut disagreeing: Vec<(&FieldOrigin, Value)> = Vec::new();
                for alt in &field.alternate_origins {
                    let Some(value) = value_at(config, alt) else {
                        continue;
                    };
                    if value != field.value {
                        disagreeing.push((alt, value));
                    }
                }

                for (alt, value) in &disagreeing {
                    let mut message = format!(
                        "`{}` of `{}` differs: {} has {}, {} has {}",
                        field_name,
                        module.name,
                        field.origin.format,
                        field.value,
                        alt.format,
                        value,
                    );
                    if field_name == "version" {
                        let candidates = std::iter::once(&field.value)
                            .chain(disagreeing.iter().map(|(_, v)| v));
                        if let Some(highest) = highest_version(candidates) {
                            message.push_str(&format!("; highest is \"{}\"", highest));
                        }
                    }
                    report.add_issue(Issue::new(message).with_path(alt.path.clone()));
                }
            }
        }

        report.stats.count("mismatches", report.issues.len());
        Ok(report)
    }
}

/// Re-read the value behind an origin from its file's tree.
fn value_at(config: &PackageConfig, origin: &FieldOrigin) -> Option<Value> {
    let file = config.files.iter().find(|f| f.path == origin.path)?;
    jsonpath::get_path(&file.tree, &origin.property_path).cloned()
}

/// The highest parseable literal version among the candidates.
fn highest_version<'a>(values: impl Iterator<Item = &'a Value>) -> Option<Version> {
    values
        .filter_map(|v| v.as_str())
        .filter_map(|s| Version::parse(s).ok())
        .max()
}
