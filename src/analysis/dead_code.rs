use crate::graph::Graph;

use super::findings::{DeadCodeNode, DeadCodeReason};

const ENTRY_POINT_PATTERNS: &[&str] = &["page", "route", "app", "main", "index", "layout"];

fn matches_entry_point_pattern(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    ENTRY_POINT_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Nodes with no incoming and no outgoing edges are confidently dead.
/// Nodes with no incoming edges but some outgoing edges are *probably* dead
/// unless their name looks like an entry point (`page`, `route`, `app`,
/// `main`, `index`, `layout`), which is treated as a weaker (0.6) signal.
pub fn find_dead_code(graph: &Graph) -> Vec<DeadCodeNode> {
    let mut dead: Vec<DeadCodeNode> = graph
        .nodes_sorted()
        .into_iter()
        .filter_map(|n| {
            if n.in_degree == 0 && n.out_degree == 0 {
                Some(DeadCodeNode {
                    file_id: n.id.clone(),
                    name: n.name.clone(),
                    reason: DeadCodeReason::Isolated,
                    confidence: 0.9,
                })
            } else if n.in_degree == 0 && n.out_degree > 0 && !matches_entry_point_pattern(&n.name) {
                Some(DeadCodeNode {
                    file_id: n.id.clone(),
                    name: n.name.clone(),
                    reason: DeadCodeReason::UnusedEntryPoint,
                    confidence: 0.6,
                })
            } else {
                None
            }
        })
        .collect();

    dead.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.file_id.cmp(&b.file_id))
    });
    dead
}
