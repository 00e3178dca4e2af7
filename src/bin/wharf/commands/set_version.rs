//! `wharf set-version` command

use anyhow::Result;

use crate::cli::SetVersionArgs;
use wharf::core::writer::{update_version, UpdateOutcome};
use wharf::util::fs::relative_path;

pub fn execute(args: SetVersionArgs) -> Result<()> {
    let mut ws = super::discover_workspace(&args.path)?;
    let root_dir = ws.root_dir.clone();
    let mut any_failed = false;

    if let Some(package) = &args.package {
        let Some(index) = ws
            .modules
            .iter()
            .position(|m| m.name == *package || m.name.ends_with(&format!("/{}", package)))
        else {
            anyhow::bail!("no workspace member matches `{}`", package);
        };
        let module = &mut ws.modules[index];
        let outcome = update_version(&mut module.config, &args.version);
        any_failed |= report(&module.name, &root_dir, &outcome);
    } else {
        // The root participates when it defines a version of its own.
        if ws.root.version().is_some() {
            let outcome = update_version(&mut ws.root, &args.version);
            any_failed |= report("(root)", &root_dir, &outcome);
        }
        for module in &mut ws.modules {
            let outcome = update_version(&mut module.config, &args.version);
            any_failed |= report(&module.name, &root_dir, &outcome);
        }
    }

    if any_failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the per-file outcome; returns whether any write failed.
fn report(name: &str, root: &std::path::Path, outcome: &UpdateOutcome) -> bool {
    for path in &outcome.updated {
        println!("updated {} ({})", relative_path(root, path).display(), name);
    }
    for path in &outcome.skipped {
        println!("skipped {} ({})", relative_path(root, path).display(), name);
    }
    for failure in &outcome.failed {
        eprintln!(
            "failed {} ({}): {}",
            relative_path(root, &failure.path).display(),
            name,
            failure.reason
        );
    }
    !outcome.failed.is_empty()
}
