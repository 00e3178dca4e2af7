//! `wharf sync` command

use anyhow::Result;

use crate::cli::SyncArgs;
use wharf::core::writer::sync_field;
use wharf::util::fs::relative_path;

pub fn execute(args: SyncArgs) -> Result<()> {
    let mut ws = super::discover_workspace(&args.path)?;
    let root_dir = ws.root_dir.clone();
    let mut any_failed = false;

    let selected: Vec<usize> = match &args.package {
        Some(package) => {
            let Some(index) = ws
                .modules
                .iter()
                .position(|m| m.name == *package || m.name.ends_with(&format!("/{}", package)))
            else {
                anyhow::bail!("no workspace member matches `{}`", package);
            };
            vec![index]
        }
        None => (0..ws.modules.len()).collect(),
    };

    for index in selected {
        let module = &mut ws.modules[index];
        match sync_field(&mut module.config, &args.field) {
            Some(outcome) => {
                for path in &outcome.updated {
                    println!(
                        "synced {} ({})",
                        relative_path(&root_dir, path).display(),
                        module.name
                    );
                }
                for failure in &outcome.failed {
                    eprintln!(
                        "failed {} ({}): {}",
                        relative_path(&root_dir, &failure.path).display(),
                        module.name,
                        failure.reason
                    );
                    any_failed = true;
                }
            }
            None => {
                println!("{}: field `{}` is not defined", module.name, args.field);
            }
        }
    }

    if any_failed {
        std::process::exit(1);
    }
    Ok(())
}
