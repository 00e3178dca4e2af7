//! Check orchestration.
//!
//! Filters registered checks by `only`/`skip` lists and the project's
//! declared stacks, executes the survivors in registration order, and
//! aggregates the results. Checks run strictly sequentially; there is no
//! per-check isolation, so an unexpected error inside one check aborts the
//! whole run.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;

use crate::checks::{CheckContext, CheckOptions, CheckRegistry, CheckReport};
use crate::core::workspace::Workspace;
use crate::util::config::ProjectConfig;

/// Call-level options for a check run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// When non-empty, only these checks are considered; others are
    /// excluded silently.
    pub only: Vec<String>,

    /// Checks disabled for this call, in addition to the project skip list.
    pub skip: Vec<String>,

    /// Call-level fix override; wins over per-check option tables.
    pub fix: Option<bool>,
}

/// A check that was not run because its required stacks do not apply.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedCheck {
    pub name: String,
    pub reason: String,
}

/// Aggregate result of one check run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    /// Logical AND over every executed check; skipped and disabled entries
    /// do not affect it.
    pub passed: bool,

    pub results: Vec<CheckReport>,
    pub skipped: Vec<SkippedCheck>,
    pub disabled: Vec<String>,
}

/// Execute the registered checks against a workspace.
pub fn run_checks(
    registry: &CheckRegistry,
    workspace: &Workspace,
    project: &ProjectConfig,
    options: &RunOptions,
) -> Result<RunSummary> {
    let mut summary = RunSummary {
        passed: true,
        results: Vec::new(),
        skipped: Vec::new(),
        disabled: Vec::new(),
    };

    for check in registry.all() {
        let name = check.name();

        if !options.only.is_empty() && !options.only.iter().any(|n| n == name) {
            continue;
        }

        if project.validation.skip.iter().any(|n| n == name)
            || options.skip.iter().any(|n| n == name)
        {
            summary.disabled.push(name.to_string());
            continue;
        }

        let required = check.required_stacks();
        if !required.is_empty()
            && !project.stacks.is_empty()
            && !required.iter().any(|s| project.stacks.contains(s))
        {
            let reason = format!(
                "requires stack {}; project declares {}",
                join_display(required.iter()),
                join_display(project.stacks.iter()),
            );
            summary.skipped.push(SkippedCheck {
                name: name.to_string(),
                reason,
            });
            continue;
        }

        let check_options = merge_options(project, name, options);
        let ctx = CheckContext {
            workspace,
            options: check_options,
        };

        tracing::debug!("running check `{}`", name);
        let start = Instant::now();
        let mut report = check.run(&ctx)?;
        report.stats.duration = start.elapsed();

        summary.passed = summary.passed && report.passed;
        summary.results.push(report);
    }

    Ok(summary)
}

/// Merge a check's options: project configuration first, then call-level
/// overrides.
fn merge_options(project: &ProjectConfig, name: &str, options: &RunOptions) -> CheckOptions {
    let values = project.check_options(name).cloned().unwrap_or_default();
    let project_fix = values
        .get("fix")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    CheckOptions {
        fix: options.fix.unwrap_or(project_fix),
        values,
    }
}

fn join_display<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
