//! `wharf license` command

use anyhow::Result;

use crate::cli::{LicenseArgs, WorkspaceArgs};

pub fn execute(args: LicenseArgs) -> Result<()> {
    let workspace_args = WorkspaceArgs { path: args.path };
    super::single::execute("license", &workspace_args, args.fix)
}
