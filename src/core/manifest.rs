//! Manifest file parsing and serialization.
//!
//! One `ManifestFile` is an immutable snapshot of a single on-disk manifest:
//! its path, format, parsed tree, and the raw text it was parsed from. The
//! comment-tolerant formats are stripped of comments before parsing;
//! rewriting a file always emits the fixed pretty-printed style, so comments
//! in a hand-written `.jsonc` do not survive a rewrite.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::core::format::FormatKind;

/// A parsed snapshot of one manifest file.
#[derive(Debug, Clone)]
pub struct ManifestFile {
    /// Absolute or workspace-relative path of the file.
    pub path: PathBuf,

    /// Which manifest format this file is.
    pub format: FormatKind,

    /// The parsed key/value tree.
    pub tree: Value,

    /// The raw text the tree was parsed from.
    pub raw: String,
}

impl ManifestFile {
    /// Parse raw manifest text into a snapshot.
    pub fn parse(
        path: impl Into<PathBuf>,
        format: FormatKind,
        raw: String,
    ) -> Result<Self, serde_json::Error> {
        let tree = parse_tree(&raw, format)?;
        Ok(ManifestFile {
            path: path.into(),
            format,
            tree,
            raw,
        })
    }

    /// The directory holding this file.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

/// Parse manifest text into a generic tree, stripping comments for the
/// comment-tolerant formats.
pub fn parse_tree(raw: &str, format: FormatKind) -> Result<Value, serde_json::Error> {
    if format.is_jsonc() {
        serde_json::from_str(&strip_comments(raw))
    } else {
        serde_json::from_str(raw)
    }
}

/// Serialize a manifest tree in the fixed output style.
pub fn serialize_tree(tree: &Value) -> String {
    let mut out = serde_json::to_string_pretty(tree).unwrap_or_else(|_| "{}".to_string());
    out.push('\n');
    out
}

/// Replace `//` and `/* */` comments with spaces, leaving string literals
/// untouched. Offsets are preserved so parse errors still point at the
/// original text.
fn strip_comments(raw: &str) -> String {
    #[derive(PartialEq)]
    enum State {
        Normal,
        InString,
        LineComment,
        BlockComment,
    }

    let mut out = String::with_capacity(raw.len());
    let mut state = State::Normal;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Normal => match c {
                '"' => {
                    state = State::InString;
                    out.push(c);
                }
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                    out.push_str("  ");
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                    out.push_str("  ");
                }
                _ => out.push(c),
            },
            State::InString => {
                out.push(c);
                match c {
                    '\\' => {
                        if let Some(next) = chars.next() {
                            out.push(next);
                        }
                    }
                    '"' => state = State::Normal,
                    _ => {}
                }
            }
            State::LineComment => {
                if c == '\n' {
                    state = State::Normal;
                    out.push(c);
                } else {
                    out.push(' ');
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Normal;
                    out.push_str("  ");
                } else if c == '\n' {
                    out.push(c);
                } else {
                    out.push(' ');
                }
            }
        }
    }

    out
}
