//! Package naming convention check.

use anyhow::Result;
use regex::Regex;

use crate::checks::{Check, CheckContext, CheckReport, Issue};

/// Package names must be scoped and kebab-case, and the member directory
/// must match the unscoped part.
pub struct NamingConvention;

impl Check for NamingConvention {
    fn name(&self) -> &'static str {
        "naming"
    }

    fn description(&self) -> &'static str {
        "Enforce scoped kebab-case package names matching their directories"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckReport> {
        let mut report = CheckReport::new(self.name());
        let scoped = Regex::new(r"^@[a-z0-9][a-z0-9-]*/[a-z0-9][a-z0-9-]*$")
            .expect("naming pattern is valid");

        report.stats.count("modules", ctx.workspace.modules.len());

        for module in &ctx.workspace.modules {
            if !scoped.is_match(&module.name) {
                report.add_issue(
                    Issue::new(format!(
                        "package name `{}` is not a scoped kebab-case name (@scope/name)",
                        module.name
                    ))
                    .with_path(module.dir()),
                );
                continue;
            }

            let short = module.name.split('/').nth(1).unwrap_or(&module.name);
            let dir_name = module
                .dir()
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if dir_name != short {
                report.add_issue(
                    Issue::new(format!(
                        "package `{}` lives in directory `{}`, expected `{}`",
                        module.name, dir_name, short
                    ))
                    .with_path(module.dir()),
                );
            }
        }

        report.stats.count("violations", report.issues.len());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckOptions;
    use crate::core::loader::LoadOptions;
    use crate::core::workspace::Workspace;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn run_on(root: &Path) -> CheckReport {
        let ws = Workspace::discover(root, &LoadOptions::default()).unwrap();
        let ctx = CheckContext {
            workspace: &ws,
            options: CheckOptions::default(),
        };
        NamingConvention.run(&ctx).unwrap()
    }

    #[test]
    fn test_conforming_names_pass() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp.path().join("deno.json"),
            r#"{"workspace": ["packages/*"]}"#,
        );
        write(
            &tmp.path().join("packages/http-client/deno.json"),
            r#"{"name": "@scope/http-client"}"#,
        );

        let report = run_on(tmp.path());
        assert!(report.passed);
    }

    #[test]
    fn test_unscoped_name_flagged() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp.path().join("deno.json"),
            r#"{"workspace": ["packages/*"]}"#,
        );
        write(
            &tmp.path().join("packages/util/deno.json"),
            r#"{"name": "util"}"#,
        );

        let report = run_on(tmp.path());
        assert!(!report.passed);
        assert!(report.issues[0].message.contains("scoped"));
    }

    #[test]
    fn test_uppercase_name_flagged() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp.path().join("deno.json"),
            r#"{"workspace": ["packages/*"]}"#,
        );
        write(
            &tmp.path().join("packages/util/deno.json"),
            r#"{"name": "@scope/Util"}"#,
        );

        let report = run_on(tmp.path());
        assert!(!report.passed);
    }

    #[test]
    fn test_directory_mismatch_flagged() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp.path().join("deno.json"),
            r#"{"workspace": ["packages/*"]}"#,
        );
        write(
            &tmp.path().join("packages/misnamed/deno.json"),
            r#"{"name": "@scope/util"}"#,
        );

        let report = run_on(tmp.path());
        assert!(!report.passed);
        assert!(report.issues[0].message.contains("expected `util`"));
    }
}
