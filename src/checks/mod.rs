//! Pluggable workspace checks.
//!
//! A check inspects a discovered workspace and reports pass/fail plus
//! structured issues. Expected findings are data, never exceptions; only
//! unexpected I/O failures propagate out of a check.

pub mod consistency;
pub mod cycles;
pub mod docs;
pub mod exports;
pub mod license;
pub mod naming;
pub mod registry;
pub mod runner;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::core::workspace::Workspace;
use crate::util::config::Stack;

pub use registry::CheckRegistry;
pub use runner::{run_checks, RunOptions, RunSummary, SkippedCheck};

/// A named, pluggable workspace check.
pub trait Check {
    /// Unique check name; re-registration under the same name overwrites.
    fn name(&self) -> &'static str;

    /// One-line human description.
    fn description(&self) -> &'static str;

    /// Stacks this check requires. Empty means the check always applies.
    fn required_stacks(&self) -> &[Stack] {
        &[]
    }

    /// Run the check against a workspace.
    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckReport>;
}

/// Everything a check execution sees.
pub struct CheckContext<'a> {
    pub workspace: &'a Workspace,
    pub options: CheckOptions,
}

/// Per-check options merged from project configuration and call-level
/// overrides (call-level `fix` wins when present).
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Apply auto-corrections where the check supports them.
    pub fix: bool,

    /// Free-form option table from the project configuration.
    pub values: toml::value::Table,
}

impl CheckOptions {
    /// A string option, if declared.
    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_str())
    }

    /// A string-array option; missing or mistyped yields empty.
    pub fn str_list(&self, key: &str) -> Vec<String> {
        self.values
            .get(key)
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One finding reported by a check.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Issue {
    pub fn new(message: impl Into<String>) -> Self {
        Issue {
            message: message.into(),
            path: None,
            line: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Counters and timing gathered while a check ran.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckStats {
    pub counters: BTreeMap<String, usize>,

    /// How long the check took (in milliseconds for JSON).
    #[serde(serialize_with = "serialize_duration_ms")]
    pub duration: Duration,
}

impl CheckStats {
    /// Add to a named counter.
    pub fn count(&mut self, key: &str, n: usize) {
        *self.counters.entry(key.to_string()).or_insert(0) += n;
    }
}

fn serialize_duration_ms<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// The common result shape every check adapts its findings into.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub name: String,
    pub passed: bool,
    pub issues: Vec<Issue>,
    pub stats: CheckStats,
}

impl CheckReport {
    /// Create an empty passing report.
    pub fn new(name: impl Into<String>) -> Self {
        CheckReport {
            name: name.into(),
            passed: true,
            issues: Vec::new(),
            stats: CheckStats::default(),
        }
    }

    /// Record a finding; any issue fails the report.
    pub fn add_issue(&mut self, issue: Issue) {
        self.passed = false;
        self.issues.push(issue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_fails_on_issue() {
        let mut report = CheckReport::new("naming");
        assert!(report.passed);

        report.add_issue(Issue::new("bad name").with_path("packages/a"));
        assert!(!report.passed);
        assert_eq!(report.issues.len(), 1);
    }

    #[test]
    fn test_stats_counters() {
        let mut stats = CheckStats::default();
        stats.count("files", 3);
        stats.count("files", 2);
        assert_eq!(stats.counters["files"], 5);
    }

    #[test]
    fn test_options_accessors() {
        let mut values = toml::value::Table::new();
        values.insert(
            "header".to_string(),
            toml::Value::String("// x".to_string()),
        );
        values.insert(
            "exclude".to_string(),
            toml::Value::Array(vec![toml::Value::String("gen".to_string())]),
        );

        let options = CheckOptions { fix: false, values };
        assert_eq!(options.str_value("header"), Some("// x"));
        assert_eq!(options.str_list("exclude"), vec!["gen"]);
        assert!(options.str_list("missing").is_empty());
    }
}
