use crate::graph::Graph;

use super::findings::{ComplexityBucket, ComponentComplexity};

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Per-node structural complexity score (distinct from the per-function
/// cyclomatic complexity ASTAnalyzer computes): weights out-degree, in-degree,
/// declared prop count, and unused-prop count.
pub fn compute_component_complexity(graph: &Graph) -> Vec<ComponentComplexity> {
    let mut findings: Vec<ComponentComplexity> = graph
        .nodes_sorted()
        .into_iter()
        .map(|n| {
            let unused_count = n.unused_props().len();
            let score = 2.0 * n.out_degree as f64
                + 1.5 * n.in_degree as f64
                + 0.5 * n.props_declared.len() as f64
                + unused_count as f64;
            let score = round2(score);
            ComponentComplexity {
                file_id: n.id.clone(),
                name: n.name.clone(),
                score,
                bucket: ComplexityBucket::from_score(score),
            }
        })
        .collect();

    findings.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.file_id.cmp(&b.file_id))
    });
    findings
}
