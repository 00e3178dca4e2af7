//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Wharf - workspace manifest management and validation for JS/TS monorepos
#[derive(Parser)]
#[command(name = "wharf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the discovered workspace members
    List(WorkspaceArgs),

    /// Set the version across every manifest file defining it
    SetVersion(SetVersionArgs),

    /// Propagate a field from its primary origin to sibling manifests
    Sync(SyncArgs),

    /// Run the configured checks against the workspace
    Check(CheckArgs),

    /// Detect circular dependencies between workspace packages
    Cycles(WorkspaceArgs),

    /// Verify exports point at real files and source files are exported
    Exports(WorkspaceArgs),

    /// Enforce scoped kebab-case package names
    Naming(WorkspaceArgs),

    /// Require doc comments on exported declarations
    Docs(WorkspaceArgs),

    /// Require a license header at the top of every source file
    License(LicenseArgs),

    /// Verify fields agree across each package's manifest files
    Consistency(WorkspaceArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct WorkspaceArgs {
    /// Workspace root directory (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub path: PathBuf,
}

#[derive(Args)]
pub struct SetVersionArgs {
    /// The version to write
    pub version: String,

    /// Workspace root directory (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Only update this package (exact name or `/name` suffix)
    #[arg(long)]
    pub package: Option<String>,
}

#[derive(Args)]
pub struct SyncArgs {
    /// The logical field to propagate (e.g. version, license)
    pub field: String,

    /// Workspace root directory (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Only sync this package (exact name or `/name` suffix)
    #[arg(long)]
    pub package: Option<String>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Workspace root directory (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Run only these checks
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip these checks for this run
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Apply auto-corrections where supported
    #[arg(long)]
    pub fix: bool,

    /// Emit machine-readable JSON instead of the human report
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct LicenseArgs {
    /// Workspace root directory (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Insert missing headers instead of reporting them
    #[arg(long)]
    pub fix: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
