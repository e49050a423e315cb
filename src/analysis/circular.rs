use std::collections::BTreeSet;

use crate::file_id::FileId;
use crate::graph::Graph;

use super::findings::CircularDependency;

/// DFS with an explicit recursion-stack set: each back-edge into a node
/// currently on the stack yields a cycle (the stack slice from that node's
/// first occurrence to the current node, closed by repeating the start).
///
/// Cycles are normalized by rotating to their lexicographically smallest
/// `FileId` so that two discoveries of the same cycle compare equal, then
/// deduplicated. Sorted by severity descending.
pub fn find_circular_dependencies(graph: &Graph) -> Vec<CircularDependency> {
    let mut cycles: Vec<Vec<FileId>> = Vec::new();
    let mut visited: BTreeSet<FileId> = BTreeSet::new();

    let mut ids: Vec<FileId> = graph.file_index.keys().cloned().collect();
    ids.sort();

    for start in &ids {
        if visited.contains(start) {
            continue;
        }
        let mut stack: Vec<FileId> = Vec::new();
        let mut on_stack: BTreeSet<FileId> = BTreeSet::new();
        dfs(graph, start, &mut stack, &mut on_stack, &mut visited, &mut cycles);
    }

    let mut seen: BTreeSet<Vec<FileId>> = BTreeSet::new();
    let mut findings = Vec::new();
    for cycle in cycles {
        let normalized = normalize_cycle(&cycle);
        if !seen.insert(normalized.clone()) {
            continue;
        }
        let severity = severity_of(graph, &normalized);
        findings.push(CircularDependency {
            files: normalized,
            severity,
        });
    }

    findings.sort_by(|a, b| b.severity.cmp(&a.severity).then_with(|| a.files.cmp(&b.files)));
    findings
}

fn dfs(
    graph: &Graph,
    current: &FileId,
    stack: &mut Vec<FileId>,
    on_stack: &mut BTreeSet<FileId>,
    visited: &mut BTreeSet<FileId>,
    cycles: &mut Vec<Vec<FileId>>,
) {
    visited.insert(current.clone());
    stack.push(current.clone());
    on_stack.insert(current.clone());

    if let Some(node) = graph.node(current) {
        let mut targets: Vec<&FileId> = node.out_edges.keys().collect();
        targets.sort();
        for target in targets {
            if on_stack.contains(target) {
                let start_pos = stack.iter().position(|id| id == target).expect("back-edge target must be on stack");
                let mut cycle: Vec<FileId> = stack[start_pos..].to_vec();
                cycle.push(target.clone());
                cycles.push(cycle);
            } else if !visited.contains(target) {
                dfs(graph, target, stack, on_stack, visited, cycles);
            }
        }
    }

    stack.pop();
    on_stack.remove(current);
}

/// Rotate a cycle (closed: first == last) so its lexicographically smallest
/// element leads, preserving traversal direction.
fn normalize_cycle(cycle: &[FileId]) -> Vec<FileId> {
    let open = &cycle[..cycle.len() - 1];
    let min_idx = open
        .iter()
        .enumerate()
        .min_by_key(|(_, id)| id.clone())
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut rotated: Vec<FileId> = open[min_idx..].iter().chain(open[..min_idx].iter()).cloned().collect();
    let first = rotated[0].clone();
    rotated.push(first);
    rotated
}

fn severity_of(graph: &Graph, cycle: &[FileId]) -> u32 {
    let length = (cycle.len() - 1) as u32;
    let degree_sum: u32 = cycle[..cycle.len() - 1]
        .iter()
        .filter_map(|id| graph.node(id))
        .map(|n| n.in_degree + n.out_degree)
        .sum();
    10 * length + degree_sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cycle_rotates_to_minimum() {
        let a = FileId::from("/proj/b.jsx");
        let b = FileId::from("/proj/c.jsx");
        let c = FileId::from("/proj/a.jsx");
        let cycle = vec![a.clone(), b.clone(), c.clone(), a.clone()];
        let normalized = normalize_cycle(&cycle);
        assert_eq!(normalized.first(), Some(&c));
        assert_eq!(normalized.last(), Some(&c));
    }
}
