//! Documentation completeness check.
//!
//! Exported declarations must be preceded by a `/** ... */` doc comment.
//! The scan is line-based; re-export statements (`export ... from`) carry no
//! declaration of their own and are not required to be documented.

use anyhow::Result;
use regex::Regex;

use crate::checks::{Check, CheckContext, CheckReport, Issue};
use crate::util::config::Stack;
use crate::util::fs;

const REQUIRED_STACKS: &[Stack] = &[Stack::Deno, Stack::Node];

const DEFAULT_EXTENSIONS: [&str; 2] = ["ts", "js"];
const DEFAULT_EXCLUDE: [&str; 2] = ["_test.", ".test."];

/// Flags exported declarations lacking a doc comment.
pub struct DocCompleteness;

impl Check for DocCompleteness {
    fn name(&self) -> &'static str {
        "docs"
    }

    fn description(&self) -> &'static str {
        "Require doc comments on exported declarations"
    }

    fn required_stacks(&self) -> &[Stack] {
        REQUIRED_STACKS
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckReport> {
        let mut report = CheckReport::new(self.name());

        let extensions: Vec<String> = {
            let configured = ctx.options.str_list("extensions");
            if configured.is_empty() {
                DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
            } else {
                configured
            }
        };
        let ext_refs: Vec<&str> = extensions.iter().map(String::as_str).collect();

        let mut exclude: Vec<String> =
            DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect();
        exclude.extend(ctx.options.str_list("exclude"));

        let declaration = Regex::new(
            r"^export\s+(?:default\s+)?(?:abstract\s+)?(?:async\s+)?(?:function|class|const|let|var|interface|type|enum)\b",
        )
        .expect("declaration pattern is valid");

        for module in &ctx.workspace.modules {
            let files = fs::walk_source_files(module.dir(), &ext_refs, &exclude);
            report.stats.count("files", files.len());

            for file in files {
                let text = fs::read_to_string(&file)?;
                let mut last_nonblank: Option<&str> = None;

                for (index, line) in text.lines().enumerate() {
                    if declaration.is_match(line) {
                        report.stats.count("symbols", 1);

                        let documented = last_nonblank
                            .map(|prev| prev.trim_end().ends_with("*/"))
                            .unwrap_or(false);
                        if !documented {
                            let display = fs::relative_path(module.dir(), &file);
                            report.add_issue(
                                Issue::new(format!(
                                    "exported declaration in `{}` has no doc comment",
                                    display.display()
                                ))
                                .with_path(file.clone())
                                .with_line(index + 1),
                            );
                        }
                    }

                    if !line.trim().is_empty() {
                        last_nonblank = Some(line);
                    }
                }
            }
        }

        report.stats.count("undocumented", report.issues.len());
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
        DocCompleteness.run(&ctx).unwrap()
    }

    fn fixture(root: &Path, source: &str) {
        write(&root.join("deno.json"), r#"{"workspace": ["packages/*"]}"#);
        write(
            &root.join("packages/lib/deno.json"),
            r#"{"name": "@scope/lib"}"#,
        );
        write(&root.join("packages/lib/mod.ts"), source);
    }

    #[test]
    fn test_documented_export_passes() {
        let tmp = TempDir::new().unwrap();
        fixture(
            tmp.path(),
            "/** Adds two numbers. */\nexport function add(a: number, b: number) {\n  return a + b;\n}\n",
        );

        let report = run_on(tmp.path());
        assert!(report.passed, "issues: {:?}", report.issues);
        assert_eq!(report.stats.counters["symbols"], 1);
    }

    #[test]
    fn test_undocumented_export_flagged() {
        let tmp = TempDir::new().unwrap();
        fixture(tmp.path(), "export const value = 42;\n");

        let report = run_on(tmp.path());
        assert!(!report.passed);
        assert_eq!(report.issues[0].line, Some(1));
    }

    #[test]
    fn test_multiline_doc_comment_counts() {
        let tmp = TempDir::new().unwrap();
        fixture(
            tmp.path(),
            "/**\n * A thing.\n */\nexport class Thing {}\n",
        );

        let report = run_on(tmp.path());
        assert!(report.passed, "issues: {:?}", report.issues);
    }

    #[test]
    fn test_reexport_needs_no_doc() {
        let tmp = TempDir::new().unwrap();
        fixture(tmp.path(), "export { add } from \"./add.ts\";\n");

        let report = run_on(tmp.path());
        assert!(report.passed, "issues: {:?}", report.issues);
        assert_eq!(report.stats.counters.get("symbols"), None);
    }

    #[test]
    fn test_line_comment_is_not_a_doc() {
        let tmp = TempDir::new().unwrap();
        fixture(tmp.path(), "// not a doc comment\nexport const x = 1;\n");

        let report = run_on(tmp.path());
        assert!(!report.passed);
        assert_eq!(report.issues[0].line, Some(2));
    }
}
