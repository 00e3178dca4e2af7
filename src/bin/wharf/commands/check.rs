//! `wharf check` command

use anyhow::Result;

use crate::cli::CheckArgs;
use wharf::checks::{run_checks, CheckRegistry, RunOptions};
use wharf::util::config::ProjectConfig;

pub fn execute(args: CheckArgs) -> Result<()> {
    let ws = super::discover_workspace(&args.path)?;
    let project = ProjectConfig::for_root(&ws.root_dir);
    let registry = CheckRegistry::with_builtins();

    let options = RunOptions {
        only: args.only,
        skip: args.skip,
        fix: if args.fix { Some(true) } else { None },
    };

    let summary = run_checks(&registry, &ws, &project, &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Checks:");
        for report in &summary.results {
            super::print_report(report);
        }

        if !summary.skipped.is_empty() {
            println!("\nSkipped:");
            for skipped in &summary.skipped {
                println!("  - {}: {}", skipped.name, skipped.reason);
            }
        }

        if !summary.disabled.is_empty() {
            println!("\nDisabled:");
            for name in &summary.disabled {
                println!("  - {}", name);
            }
        }

        let failed = summary.results.iter().filter(|r| !r.passed).count();
        let passed = summary.results.len() - failed;
        println!("\nSummary: {} passed, {} failed", passed, failed);
    }

    if !summary.passed {
        std::process::exit(1);
    }
    Ok(())
}
