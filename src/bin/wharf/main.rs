//! Wharf CLI - workspace manifest management and validation

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("wharf=debug")
    } else {
        EnvFilter::new("wharf=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::List(args) => commands::list::execute(args),
        Commands::SetVersion(args) => commands::set_version::execute(args),
        Commands::Sync(args) => commands::sync::execute(args),
        Commands::Check(args) => commands::check::execute(args),
        Commands::Cycles(args) => commands::single::execute("cycles", &args, false),
        Commands::Exports(args) => commands::single::execute("exports", &args, false),
        Commands::Naming(args) => commands::single::execute("naming", &args, false),
        Commands::Docs(args) => commands::single::execute("docs", &args, false),
        Commands::License(args) => commands::license::execute(args),
        Commands::Consistency(args) => commands::single::execute("consistency", &args, false),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
