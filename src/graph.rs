//! In-workspace dependency graph construction and cycle detection.
//!
//! The graph maps each member's package name to the ordered, deduplicated
//! list of other in-workspace packages it references; external dependencies
//! are ignored. It is rebuilt on every invocation and never persisted.

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use crate::core::workspace::WorkspaceModule;

/// Package name -> ordered in-workspace dependency names.
pub type DependencyGraph = BTreeMap<String, Vec<String>>;

/// Manifest keys holding direct-dependency maps (name -> requirement).
const DEPENDENCY_KEYS: [&str; 2] = ["dependencies", "devDependencies"];

/// Manifest key holding the import-alias map (alias -> specifier).
const IMPORTS_KEY: &str = "imports";

/// Build the dependency graph for a set of workspace modules.
pub fn build_dependency_graph(modules: &[WorkspaceModule]) -> DependencyGraph {
    let names: HashSet<&str> = modules.iter().map(|m| m.name.as_str()).collect();
    let mut graph = DependencyGraph::new();

    for module in modules {
        let mut deps: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut consider = |candidate: &str| {
            if candidate != module.name
                && names.contains(candidate)
                && seen.insert(candidate.to_string())
            {
                deps.push(candidate.to_string());
            }
        };

        for file in &module.config.files {
            for key in DEPENDENCY_KEYS {
                if let Some(map) = file.tree.get(key).and_then(Value::as_object) {
                    for dep_name in map.keys() {
                        consider(dep_name);
                    }
                }
            }

            if let Some(map) = file.tree.get(IMPORTS_KEY).and_then(Value::as_object) {
                for (alias, specifier) in map {
                    consider(alias.trim_end_matches('/'));
                    if let Some(name) = specifier.as_str().and_then(specifier_name) {
                        consider(name);
                    }
                }
            }
        }

        graph.insert(module.name.clone(), deps);
    }

    graph
}

/// Extract the package name from a `jsr:` or `npm:` specifier, dropping any
/// version suffix. Relative and URL specifiers reference no package.
fn specifier_name(specifier: &str) -> Option<&str> {
    let rest = specifier
        .strip_prefix("jsr:")
        .or_else(|| specifier.strip_prefix("npm:"))?;
    let rest = rest.strip_prefix('/').unwrap_or(rest);

    if let Some(scoped) = rest.strip_prefix('@') {
        // Scoped: the version separator is the second `@`.
        match scoped.find('@') {
            Some(i) => Some(&rest[..i + 1]),
            None => Some(rest),
        }
    } else {
        match rest.find('@') {
            Some(i) => Some(&rest[..i]),
            None => Some(rest),
        }
    }
}

/// Detect cycles with a depth-first search.
///
/// Uses a global visited set, a recursion stack, and an explicit path; on
/// reaching a neighbor already on the recursion stack, the cycle is the path
/// sliced from that neighbor's first occurrence, closed by re-appending the
/// neighbor. Overlapping cycles from a multiply-back-edged node are all
/// reported; there is no cross-cycle de-duplication beyond the visited set.
pub fn detect_cycles(graph: &DependencyGraph) -> Vec<Vec<String>> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut cycles = Vec::new();

    for node in graph.keys() {
        if !visited.contains(node.as_str()) {
            let mut stack: HashSet<&str> = HashSet::new();
            let mut path: Vec<&str> = Vec::new();
            visit(graph, node, &mut visited, &mut stack, &mut path, &mut cycles);
        }
    }

    cycles
}

fn visit<'a>(
    graph: &'a DependencyGraph,
    node: &'a str,
    visited: &mut HashSet<&'a str>,
    stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
    cycles: &mut Vec<Vec<String>>,
) {
    visited.insert(node);
    stack.insert(node);
    path.push(node);

    if let Some(deps) = graph.get(node) {
        for dep in deps {
            if stack.contains(dep.as_str()) {
                if let Some(start) = path.iter().position(|n| *n == dep) {
                    let mut cycle: Vec<String> =
                        path[start..].iter().map(|s| s.to_string()).collect();
                    cycle.push(dep.clone());
                    cycles.push(cycle);
                }
            } else if !visited.contains(dep.as_str()) && graph.contains_key(dep) {
                visit(graph, dep, visited, stack, path, cycles);
            }
        }
    }

    stack.remove(node);
    path.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::FieldMappings;
    use crate::core::manifest::ManifestFile;
    use crate::core::package::PackageConfig;
    use crate::core::FormatKind;

    fn module(name: &str, manifest: &str) -> WorkspaceModule {
        let file = ManifestFile::parse(
            format!("{}/deno.json", name),
            FormatKind::DenoJson,
            manifest.to_string(),
        )
        .unwrap();
        WorkspaceModule {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            config: PackageConfig::new(name, vec![file], FieldMappings::default()),
        }
    }

    fn graph_of(edges: &[(&str, &[&str])]) -> DependencyGraph {
        edges
            .iter()
            .map(|(n, deps)| {
                (
                    n.to_string(),
                    deps.iter().map(|d| d.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_specifier_name() {
        assert_eq!(specifier_name("jsr:@scope/pkg@^1.0.0"), Some("@scope/pkg"));
        assert_eq!(specifier_name("jsr:@scope/pkg"), Some("@scope/pkg"));
        assert_eq!(specifier_name("npm:lodash@4"), Some("lodash"));
        assert_eq!(specifier_name("npm:lodash"), Some("lodash"));
        assert_eq!(specifier_name("./local/mod.ts"), None);
        assert_eq!(specifier_name("https://example.com/mod.ts"), None);
    }

    #[test]
    fn test_build_graph_from_dependencies() {
        let a = module(
            "@scope/a",
            r#"{"name": "@scope/a", "imports": {"@scope/b": "jsr:@scope/b@^1.0.0"}}"#,
        );
        let b = module("@scope/b", r#"{"name": "@scope/b"}"#);

        let graph = build_dependency_graph(&[a, b]);
        assert_eq!(graph["@scope/a"], vec!["@scope/b"]);
        assert!(graph["@scope/b"].is_empty());
    }

    #[test]
    fn test_external_dependencies_ignored() {
        let a = module(
            "@scope/a",
            r#"{"name": "@scope/a", "imports": {"lodash": "npm:lodash@4", "@other/x": "jsr:@other/x@1"}}"#,
        );

        let graph = build_dependency_graph(&[a]);
        assert!(graph["@scope/a"].is_empty());
    }

    #[test]
    fn test_edges_deduplicated() {
        let a = module(
            "@scope/a",
            r#"{"name": "@scope/a",
                "imports": {"@scope/b": "jsr:@scope/b@^1.0.0"},
                "dependencies": {"@scope/b": "^1.0.0"}}"#,
        );
        let b = module("@scope/b", r#"{"name": "@scope/b"}"#);

        let graph = build_dependency_graph(&[a, b]);
        assert_eq!(graph["@scope/a"], vec!["@scope/b"]);
    }

    #[test]
    fn test_self_reference_is_not_an_edge() {
        let a = module(
            "@scope/a",
            r#"{"name": "@scope/a", "imports": {"@scope/a": "jsr:@scope/a@^1.0.0"}}"#,
        );

        let graph = build_dependency_graph(&[a]);
        assert!(graph["@scope/a"].is_empty());
    }

    #[test]
    fn test_detect_no_cycles() {
        let graph = graph_of(&[("a", &["b"]), ("b", &["c"]), ("c", &[])]);
        assert!(detect_cycles(&graph).is_empty());
    }

    #[test]
    fn test_detect_three_cycle() {
        let graph = graph_of(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        let cycles = detect_cycles(&graph);
        assert_eq!(cycles.len(), 1);

        let cycle = &cycles[0];
        // Closed back to its start.
        assert_eq!(cycle.first(), cycle.last());
        // Rotation-invariant membership.
        for name in ["a", "b", "c"] {
            assert!(cycle.contains(&name.to_string()));
        }
        assert_eq!(cycle.len(), 4);
    }

    #[test]
    fn test_detect_two_cycles() {
        let graph = graph_of(&[
            ("a", &["b"]),
            ("b", &["a"]),
            ("c", &["d"]),
            ("d", &["c"]),
        ]);
        let cycles = detect_cycles(&graph);
        assert_eq!(cycles.len(), 2);
    }

    #[test]
    fn test_overlapping_cycles_from_multiply_back_edged_node() {
        // b closes back to a both directly and through c.
        let graph = graph_of(&[("a", &["b"]), ("b", &["a", "c"]), ("c", &["a"])]);
        let cycles = detect_cycles(&graph);
        assert!(cycles.len() >= 2);
        for cycle in &cycles {
            assert_eq!(cycle.first(), cycle.last());
        }
    }

    #[test]
    fn test_self_loop_reported() {
        let graph = graph_of(&[("a", &["a"])]);
        let cycles = detect_cycles(&graph);
        assert_eq!(cycles, vec![vec!["a".to_string(), "a".to_string()]]);
    }
}
