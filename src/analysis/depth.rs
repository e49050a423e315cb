use std::collections::BTreeSet;

use crate::file_id::FileId;
use crate::graph::Graph;

use super::findings::DependencyDepth;

/// Maximum forward-reachable depth from each node, via DFS with an
/// active-visit set that suppresses cycles (a node already on the current
/// path contributes depth 0 rather than recursing infinitely).
pub fn compute_dependency_depth(graph: &Graph) -> DependencyDepth {
    let mut ids: Vec<FileId> = graph.file_index.keys().cloned().collect();
    ids.sort();

    let distribution: Vec<(FileId, u32)> = ids
        .iter()
        .map(|id| {
            let mut active = BTreeSet::new();
            (id.clone(), max_depth_from(graph, id, &mut active))
        })
        .collect();

    let max_depth = distribution.iter().map(|(_, d)| *d).max().unwrap_or(0);
    let average_depth = if distribution.is_empty() {
        0.0
    } else {
        distribution.iter().map(|(_, d)| *d as f64).sum::<f64>() / distribution.len() as f64
    };

    let threshold = max_depth as f64 * 0.8;
    let deepest: Vec<FileId> = distribution
        .iter()
        .filter(|(_, d)| *d as f64 >= threshold && max_depth > 0)
        .map(|(id, _)| id.clone())
        .collect();

    DependencyDepth {
        distribution,
        average_depth,
        max_depth,
        deepest,
    }
}

fn max_depth_from(graph: &Graph, id: &FileId, active: &mut BTreeSet<FileId>) -> u32 {
    if active.contains(id) {
        return 0;
    }
    let Some(node) = graph.node(id) else {
        return 0;
    };
    if node.out_edges.is_empty() {
        return 0;
    }

    active.insert(id.clone());
    let max_child = node
        .out_edges
        .keys()
        .map(|target| 1 + max_depth_from(graph, target, active))
        .max()
        .unwrap_or(0);
    active.remove(id);
    max_child
}
