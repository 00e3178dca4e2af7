//! `wharf list` command

use anyhow::Result;

use crate::cli::WorkspaceArgs;
use wharf::util::fs::relative_path;

pub fn execute(args: WorkspaceArgs) -> Result<()> {
    let ws = super::discover_workspace(&args.path)?;

    if ws.modules.is_empty() {
        println!("no workspace members found");
        return Ok(());
    }

    let name_width = ws
        .modules
        .iter()
        .map(|m| m.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let version_width = ws
        .modules
        .iter()
        .map(|m| m.version.len())
        .max()
        .unwrap_or(0)
        .max("VERSION".len());

    println!(
        "{:<name_width$}  {:<version_width$}  {:<24}  FORMATS",
        "NAME", "VERSION", "DIRECTORY"
    );
    for module in &ws.modules {
        let dir = relative_path(&ws.root_dir, module.dir());
        let formats: Vec<String> = module
            .config
            .files
            .iter()
            .map(|f| f.format.to_string())
            .collect();
        println!(
            "{:<name_width$}  {:<version_width$}  {:<24}  {}",
            module.name,
            module.version,
            dir.display().to_string(),
            formats.join(", ")
        );
    }

    Ok(())
}
