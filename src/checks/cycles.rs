//! Circular dependency check.

use anyhow::Result;

use crate::checks::{Check, CheckContext, CheckReport, Issue};
use crate::graph::{build_dependency_graph, detect_cycles};

/// Detects dependency cycles between workspace packages.
pub struct CircularDependencies;

impl Check for CircularDependencies {
    fn name(&self) -> &'static str {
        "cycles"
    }

    fn description(&self) -> &'static str {
        "Detect circular dependencies between workspace packages"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckReport> {
        let mut report = CheckReport::new(self.name());

        let graph = build_dependency_graph(&ctx.workspace.modules);
        let edge_count: usize = graph.values().map(Vec::len).sum();
        let cycles = detect_cycles(&graph);

        report.stats.count("packages", graph.len());
        report.stats.count("edges", edge_count);
        report.stats.count("cycles", cycles.len());

        for cycle in cycles {
            report.add_issue(Issue::new(format!(
                "circular dependency: {}",
                cycle.join(" -> ")
            )));
        }

        Ok(report)
    }
}
