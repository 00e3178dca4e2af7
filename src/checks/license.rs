//! License header check, with optional auto-fix.
//!
//! Every source file must start with the expected header line (a shebang
//! may precede it). This is the only check supporting `--fix`: with fix
//! enabled, missing headers are inserted and counted instead of reported.

use anyhow::Result;

use crate::checks::{Check, CheckContext, CheckReport, Issue};
use crate::util::fs;

const DEFAULT_HEADER: &str = "// Copyright (c) the project authors. MIT license.";

const DEFAULT_EXTENSIONS: [&str; 2] = ["ts", "js"];

/// Enforces (and optionally inserts) a license header line.
pub struct LicenseHeaders;

impl Check for LicenseHeaders {
    fn name(&self) -> &'static str {
        "license"
    }

    fn description(&self) -> &'static str {
        "Require a license header at the top of every source file"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckReport> {
        let mut report = CheckReport::new(self.name());

        let header = ctx
            .options
            .str_value("header")
            .unwrap_or(DEFAULT_HEADER)
            .to_string();

        let extensions: Vec<String> = {
            let configured = ctx.options.str_list("extensions");
            if configured.is_empty() {
                DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
            } else {
                configured
            }
        };
        let ext_refs: Vec<&str> = extensions.iter().map(String::as_str).collect();
        let exclude = ctx.options.str_list("exclude");

        for module in &ctx.workspace.modules {
            let files = fs::walk_source_files(module.dir(), &ext_refs, &exclude);
            report.stats.count("files", files.len());

            for file in files {
                let text = fs::read_to_string(&file)?;
                if has_header(&text, &header) {
                    continue;
                }

                if ctx.options.fix {
                    fs::write_string(&file, &insert_header(&text, &header))?;
                    report.stats.count("fixed", 1);
                } else {
                    let display = fs::relative_path(module.dir(), &file);
                    report.add_issue(
                        Issue::new(format!(
                            "`{}` is missing the license header",
                            display.display()
                        ))
                        .with_path(file)
                        .with_line(1),
                    );
                }
            }
        }

        report.stats.count("missing", report.issues.len());
        Ok(report)
    }
}

/// The header must be the first line, or the second when a shebang leads.
fn has_header(text: &str, header: &str) -> bool {
    let mut lines = text.lines();
    match lines.next() {
        Some(first) if first.starts_with("#!") => {
            lines.next().map(|l| l.trim_end() == header).unwrap_or(false)
        }
        Some(first) => first.trim_end() == header,
        None => false,
    }
}

fn insert_header(text: &str, header: &str) -> String {
    if let Some(rest) = text.strip_prefix("#!") {
        match rest.find('\n') {
            Some(i) => {
                let (shebang, body) = text.split_at(2 + i + 1);
                format!("{}{}\n{}", shebang, header, body)
            }
            None => format!("{}\n{}\n", text, header),
        }
    } else {
        format!("{}\n{}", header, text)
    }
}
