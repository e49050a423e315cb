use crate::graph::Graph;

use super::findings::{OrphanComponent, OrphanReason};

/// Every node with `in_degree = 0`, tagged `isolated` when it also has no
/// outgoing edges, else `entry_point`. Sorted by `out_degree` descending.
pub fn find_orphans(graph: &Graph) -> Vec<OrphanComponent> {
    let mut orphans: Vec<OrphanComponent> = graph
        .nodes_sorted()
        .into_iter()
        .filter(|n| n.in_degree == 0)
        .map(|n| OrphanComponent {
            file_id: n.id.clone(),
            name: n.name.clone(),
            reason: if n.out_degree == 0 {
                OrphanReason::Isolated
            } else {
                OrphanReason::EntryPoint
            },
            out_degree: n.out_degree,
        })
        .collect();

    orphans.sort_by(|a, b| b.out_degree.cmp(&a.out_degree).then_with(|| a.file_id.cmp(&b.file_id)));
    orphans
}
