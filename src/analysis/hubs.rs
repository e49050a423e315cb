use std::collections::{BTreeSet, VecDeque};

use crate::file_id::FileId;
use crate::graph::Graph;

use super::findings::HubComponent;

const INDIRECT_IMPACT_DEPTH: u32 = 3;

/// Nodes whose total degree is at least one standard deviation above the
/// mean. Direct impact rewards in-degree (how many places depend on this
/// node); indirect impact walks the reverse graph (dependents-of-dependents)
/// up to depth 3, weighting farther nodes less.
pub fn find_hubs(graph: &Graph) -> Vec<HubComponent> {
    let stats = graph.metadata.total_degree_stats;
    let threshold = stats.mean + stats.stddev;

    let mut hubs: Vec<HubComponent> = graph
        .nodes_sorted()
        .into_iter()
        .filter(|n| (n.in_degree + n.out_degree) as f64 >= threshold)
        .map(|n| HubComponent {
            file_id: n.id.clone(),
            name: n.name.clone(),
            total_degree: n.in_degree + n.out_degree,
            direct_impact: 2.0 * n.in_degree as f64,
            indirect_impact: indirect_impact(graph, &n.id),
        })
        .collect();

    hubs.sort_by(|a, b| {
        b.total_degree
            .cmp(&a.total_degree)
            .then_with(|| a.file_id.cmp(&b.file_id))
    });
    hubs
}

fn indirect_impact(graph: &Graph, hub: &FileId) -> f64 {
    let mut visited: BTreeSet<FileId> = BTreeSet::from([hub.clone()]);
    let mut queue: VecDeque<(FileId, u32)> = VecDeque::new();
    queue.push_back((hub.clone(), 0));

    let mut total = 0.0;
    while let Some((current, depth)) = queue.pop_front() {
        if depth >= INDIRECT_IMPACT_DEPTH {
            continue;
        }
        let Some(node) = graph.node(&current) else {
            continue;
        };
        for dependent in &node.in_edges {
            if visited.insert(dependent.clone()) {
                let next_depth = depth + 1;
                total += 1.0 / (next_depth as f64 + 1.0);
                queue.push_back((dependent.clone(), next_depth));
            }
        }
    }
    total
}
