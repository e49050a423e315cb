mod circular;
mod complexity;
mod coupling;
mod dead_code;
mod depth;
pub mod findings;
mod hubs;
mod orphans;
mod recommendations;
mod unused_props;

use crate::error::CoreError;
use crate::graph::Graph;
use findings::Findings;

/// Runs every graph algorithm over a frozen `Graph` and assembles `Findings`.
/// None of these passes mutate the graph — `Graph`'s fields are read through
/// shared references only.
pub struct AnalysisEngine;

impl AnalysisEngine {
    pub fn analyze(graph: &Graph) -> Result<Findings, CoreError> {
        graph.validate()?;

        let orphan_components = orphans::find_orphans(graph);
        let unused_props = unused_props::find_unused_props(graph);
        let circular_dependencies = circular::find_circular_dependencies(graph);
        let component_complexity = complexity::compute_component_complexity(graph);
        let dependency_depth = Some(depth::compute_dependency_depth(graph));
        let hub_components = hubs::find_hubs(graph);
        let dead_code = dead_code::find_dead_code(graph);
        let (coupling, high_coupling) = coupling::compute_coupling(graph);

        let mut findings = Findings {
            orphan_components,
            unused_props,
            circular_dependencies,
            component_complexity,
            dependency_depth,
            hub_components,
            dead_code,
            coupling,
            high_coupling,
            recommendations: Vec::new(),
        };

        findings.recommendations = recommendations::build_recommendations(&findings);
        Ok(findings)
    }
}
