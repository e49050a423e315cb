use crate::graph::Graph;

use super::findings::UnusedProps;

/// For each node with `uses_rest_spread = false` and at least one declared
/// prop never referenced in the body, emit an unused-props finding. Sorted
/// by unused count descending.
pub fn find_unused_props(graph: &Graph) -> Vec<UnusedProps> {
    let mut findings: Vec<UnusedProps> = graph
        .nodes_sorted()
        .into_iter()
        .filter_map(|n| {
            if n.uses_rest_spread {
                return None;
            }
            let mut unused: Vec<String> = n.unused_props().into_iter().collect();
            if unused.is_empty() {
                return None;
            }
            unused.sort();
            let declared_count = n.props_declared.len();
            let usage_rate = if declared_count == 0 {
                0.0
            } else {
                (n.props_used.len() as f64 / declared_count as f64) * 100.0
            };
            Some(UnusedProps {
                file_id: n.id.clone(),
                name: n.name.clone(),
                unused,
                declared_count,
                usage_rate,
            })
        })
        .collect();

    findings.sort_by(|a, b| b.unused.len().cmp(&a.unused.len()).then_with(|| a.file_id.cmp(&b.file_id)));
    findings
}
