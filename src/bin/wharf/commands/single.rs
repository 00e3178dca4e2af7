//! Standalone execution of one named check.
//!
//! Each check's dedicated subcommand routes through here: load the project
//! configuration for per-check options, run just that check, print its
//! report, exit 1 on failure.

use anyhow::Result;

use crate::cli::WorkspaceArgs;
use wharf::checks::{run_checks, CheckRegistry, RunOptions};
use wharf::util::config::ProjectConfig;

pub fn execute(name: &str, args: &WorkspaceArgs, fix: bool) -> Result<()> {
    let ws = super::discover_workspace(&args.path)?;
    let project = ProjectConfig::for_root(&ws.root_dir);
    let registry = CheckRegistry::with_builtins();

    let options = RunOptions {
        only: vec![name.to_string()],
        skip: Vec::new(),
        fix: if fix { Some(true) } else { None },
    };

    let summary = run_checks(&registry, &ws, &project, &options)?;

    match summary.results.first() {
        Some(report) => {
            super::print_report(report);
            if !report.passed {
                std::process::exit(1);
            }
        }
        None => {
            // Stack-gated or project-disabled; report why instead of a result.
            if let Some(skipped) = summary.skipped.first() {
                println!("skipped: {}", skipped.reason);
            } else if summary.disabled.first().is_some() {
                println!("disabled by project configuration");
            } else {
                anyhow::bail!("unknown check `{}`", name);
            }
        }
    }

    Ok(())
}
