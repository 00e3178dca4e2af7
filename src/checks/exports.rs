//! Export completeness check.
//!
//! Two directions: every exports-map entry must point at an existing file
//! (no dangling exports), and every source file of a member must be
//! reachable from the exports map, either as an entry target or re-exported
//! from one. Re-exports are found by scanning entry files line-wise; no
//! parse tree is built.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use anyhow::Result;
use regex::Regex;
use serde_json::Value;

use crate::checks::{Check, CheckContext, CheckReport, Issue};
use crate::util::config::Stack;
use crate::util::fs;

const REQUIRED_STACKS: &[Stack] = &[Stack::Deno];

/// Default source extensions considered by the check.
const DEFAULT_EXTENSIONS: [&str; 2] = ["ts", "js"];

/// Path fragments excluded from the source walk by default.
const DEFAULT_EXCLUDE: [&str; 2] = ["_test.", ".test."];

/// Verifies that declared exports exist and that source files are exported.
pub struct ExportCompleteness;

impl Check for ExportCompleteness {
    fn name(&self) -> &'static str {
        "exports"
    }

    fn description(&self) -> &'static str {
        "Verify exports point at real files and source files are exported"
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

        let export_re = Regex::new(
            r#"^\s*export\s+(?:\*|type\s*\{[^}]*\}|\{[^}]*\})\s*from\s*["']([^"']+)["']"#,
        )
        .expect("export pattern is valid");

        for module in &ctx.workspace.modules {
            report.stats.count("modules", 1);

            let Some(exports) = module.config.exports() else {
                report.add_issue(
                    Issue::new(format!("package `{}` declares no exports", module.name))
                        .with_path(module.dir()),
                );
                continue;
            };

            let entries = export_entries(exports);
            if entries.is_empty() {
                report.add_issue(
                    Issue::new(format!(
                        "package `{}` has an exports field with no usable entries",
                        module.name
                    ))
                    .with_path(module.dir()),
                );
                continue;
            }

            let mut reachable: HashSet<PathBuf> = HashSet::new();
            let mut entry_files: Vec<PathBuf> = Vec::new();

            for (key, target) in &entries {
                let path = resolve_relative(module.dir(), target);
                if !path.is_file() {
                    report.add_issue(
                        Issue::new(format!(
                            "export `{}` of `{}` points at missing file `{}`",
                            key, module.name, target
                        ))
                        .with_path(path),
                    );
                    continue;
                }
                reachable.insert(path.clone());
                entry_files.push(path);
            }

            // One level of re-export scanning: a file re-exported from an
            // entry file counts as reachable.
            for entry in &entry_files {
                let text = fs::read_to_string(entry)?;
                for line in text.lines() {
                    if let Some(caps) = export_re.captures(line) {
                        let specifier = &caps[1];
                        if specifier.starts_with('.') {
                            let dir = entry.parent().unwrap_or(Path::new("."));
                            reachable.insert(resolve_relative(dir, specifier));
                        }
                    }
                }
            }

            let files = fs::walk_source_files(module.dir(), &ext_refs, &exclude);
            report.stats.count("files", files.len());

            for file in files {
                if !reachable.contains(&file) {
                    let display = fs::relative_path(module.dir(), &file);
                    report.add_issue(
                        Issue::new(format!(
                            "`{}` is not reachable from the exports of `{}`",
                            display.display(),
                            module.name
                        ))
                        .with_path(file),
                    );
                }
            }
        }

        report.stats.count("issues", report.issues.len());
        Ok(report)
    }
}

/// Flatten an exports value to (key, target) pairs. A bare string is the
/// sole `"."` entry; object entries with non-string targets are ignored.
fn export_entries(exports: &Value) -> Vec<(String, String)> {
    match exports {
        Value::String(target) => vec![(".".to_string(), target.clone())],
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect(),
        _ => Vec::new(),
    }
}

/// Resolve a relative specifier against a base directory, folding `.` and
/// `..` components lexically.
fn resolve_relative(base: &Path, specifier: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for component in Path::new(specifier).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                path.pop();
            }
            Component::Normal(c) => path.push(c),
            _ => {}
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckOptions;
    use crate::core::loader::LoadOptions;
    use crate::core::workspace::Workspace;
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
        ExportCompleteness.run(&ctx).unwrap()
    }

    fn workspace_with_member(root: &Path, manifest: &str) {
        write(&root.join("deno.json"), r#"{"workspace": ["packages/*"]}"#);
        write(&root.join("packages/lib/deno.json"), manifest);
    }

    #[test]
    fn test_complete_exports_pass() {
        let tmp = TempDir::new().unwrap();
        workspace_with_member(
            tmp.path(),
            r#"{"name": "@scope/lib", "exports": "./mod.ts"}"#,
        );
        write(
            &tmp.path().join("packages/lib/mod.ts"),
            "export { add } from \"./add.ts\";\nexport * from \"./sub.ts\";\n",
        );
        write(&tmp.path().join("packages/lib/add.ts"), "export const add = 1;\n");
        write(&tmp.path().join("packages/lib/sub.ts"), "export const sub = 1;\n");

        let report = run_on(tmp.path());
        assert!(report.passed, "issues: {:?}", report.issues);
    }

    #[test]
    fn test_unreachable_file_flagged() {
        let tmp = TempDir::new().unwrap();
        workspace_with_member(
            tmp.path(),
            r#"{"name": "@scope/lib", "exports": "./mod.ts"}"#,
        );
        write(&tmp.path().join("packages/lib/mod.ts"), "export const x = 1;\n");
        write(
            &tmp.path().join("packages/lib/orphan.ts"),
            "export const y = 2;\n",
        );

        let report = run_on(tmp.path());
        assert!(!report.passed);
        assert!(report
            .issues
            .iter()
            .any(|i| i.message.contains("orphan.ts")));
    }

    #[test]
    fn test_dangling_export_flagged() {
        let tmp = TempDir::new().unwrap();
        workspace_with_member(
            tmp.path(),
            r#"{"name": "@scope/lib", "exports": {".": "./mod.ts", "./extra": "./extra.ts"}}"#,
        );
        write(&tmp.path().join("packages/lib/mod.ts"), "export const x = 1;\n");

        let report = run_on(tmp.path());
        assert!(!report.passed);
        assert!(report
            .issues
            .iter()
            .any(|i| i.message.contains("missing file `./extra.ts`")));
    }

    #[test]
    fn test_missing_exports_field_flagged() {
        let tmp = TempDir::new().unwrap();
        workspace_with_member(tmp.path(), r#"{"name": "@scope/lib"}"#);

        let report = run_on(tmp.path());
        assert!(!report.passed);
        assert!(report.issues[0].message.contains("declares no exports"));
    }

    #[test]
    fn test_test_files_are_ignored() {
        let tmp = TempDir::new().unwrap();
        workspace_with_member(
            tmp.path(),
            r#"{"name": "@scope/lib", "exports": "./mod.ts"}"#,
        );
        write(&tmp.path().join("packages/lib/mod.ts"), "export const x = 1;\n");
        write(
            &tmp.path().join("packages/lib/mod_test.ts"),
            "import { x } from \"./mod.ts\";\n",
        );

        let report = run_on(tmp.path());
        assert!(report.passed, "issues: {:?}", report.issues);
    }

    #[test]
    fn test_export_entries_shapes() {
        assert_eq!(
            export_entries(&serde_json::json!("./mod.ts")),
            vec![(".".to_string(), "./mod.ts".to_string())]
        );
        let entries = export_entries(&serde_json::json!({".": "./a.ts", "./b": "./b.ts"}));
        assert_eq!(entries.len(), 2);
        assert!(export_entries(&serde_json::json!(42)).is_empty());
    }

    #[test]
    fn test_resolve_relative() {
        let base = Path::new("/ws/packages/lib");
        assert_eq!(
            resolve_relative(base, "./mod.ts"),
            PathBuf::from("/ws/packages/lib/mod.ts")
        );
        assert_eq!(
            resolve_relative(base, "../other/mod.ts"),
            PathBuf::from("/ws/packages/other/mod.ts")
        );
    }
}
