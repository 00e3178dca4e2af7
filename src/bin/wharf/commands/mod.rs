//! Command implementations

pub mod check;
pub mod completions;
pub mod license;
pub mod list;
pub mod set_version;
pub mod single;
pub mod sync;

use std::path::Path;

use anyhow::Result;

use wharf::core::loader::LoadOptions;
use wharf::core::workspace::Workspace;

/// Discover the workspace at `path`, mapping shape violations to a fatal
/// diagnostic (exit code 1 via main's error path).
pub fn discover_workspace(path: &Path) -> Result<Workspace> {
    Ok(Workspace::discover(path, &LoadOptions::default())?)
}

/// Print one check report in the shared human-readable shape.
pub fn print_report(report: &wharf::checks::CheckReport) {
    let status = if report.passed { "[OK]" } else { "[!!]" };
    let counters: Vec<String> = report
        .stats
        .counters
        .iter()
        .map(|(k, v)| format!("{} {}", v, k))
        .collect();
    println!("{} {} ({})", status, report.name, counters.join(", "));

    for issue in &report.issues {
        match issue.line {
            Some(line) => println!("     - {} (line {})", issue.message, line),
            None => println!("     - {}", issue.message),
        }
    }
}
