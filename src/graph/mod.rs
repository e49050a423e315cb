pub mod build;
pub mod node;

use std::collections::BTreeMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Directed;

use crate::error::CoreError;
use crate::file_id::FileId;
use node::ComponentNode;

/// Summary statistics over a degree distribution (in-, out-, or total-degree).
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeStats {
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    pub median: f64,
    pub stddev: f64,
}

fn stats_of(mut values: Vec<u32>) -> DegreeStats {
    if values.is_empty() {
        return DegreeStats::default();
    }
    values.sort_unstable();
    let n = values.len();
    let min = values[0];
    let max = values[n - 1];
    let sum: u64 = values.iter().map(|&v| v as u64).sum();
    let mean = sum as f64 / n as f64;
    let median = if n % 2 == 0 {
        (values[n / 2 - 1] as f64 + values[n / 2] as f64) / 2.0
    } else {
        values[n / 2] as f64
    };
    let variance = values.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / n as f64;
    DegreeStats {
        min,
        max,
        mean,
        median,
        stddev: variance.sqrt(),
    }
}

/// Structural metadata computed once by [`build::GraphBuilder`] and exposed
/// read-only thereafter, per §4.3.
#[derive(Debug, Clone)]
pub struct GraphMetadata {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub in_degree_stats: DegreeStats,
    pub out_degree_stats: DegreeStats,
    pub total_degree_stats: DegreeStats,
    pub connected_component_count: usize,
    pub largest_component_size: usize,
    pub isolated: Vec<FileId>,
    pub leaf: Vec<FileId>,
    pub root: Vec<FileId>,
}

/// The frozen dependency graph. Built once by [`build::GraphBuilder::build`],
/// then treated as immutable by every downstream consumer.
pub struct Graph {
    pub graph: StableGraph<ComponentNode, (), Directed>,
    pub file_index: BTreeMap<FileId, NodeIndex>,
    pub metadata: GraphMetadata,
}

impl Graph {
    pub fn node(&self, id: &FileId) -> Option<&ComponentNode> {
        self.file_index.get(id).map(|&idx| &self.graph[idx])
    }

    /// Nodes in ascending `FileId` order — the canonical iteration order every
    /// serialization and analysis pass uses to stay deterministic.
    pub fn nodes_sorted(&self) -> Vec<&ComponentNode> {
        let mut ids: Vec<&FileId> = self.file_index.keys().collect();
        ids.sort();
        ids.into_iter().map(|id| &self.graph[self.file_index[id]]).collect()
    }

    pub fn node_count(&self) -> usize {
        self.file_index.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Validates the invariants of §3 that must hold for every frozen graph.
    /// A malformed graph is a programming error in `GraphBuilder`, not user
    /// input — this is the `AnalysisEngine` precondition check of §4.4.
    pub fn validate(&self) -> Result<(), CoreError> {
        for node in self.graph.node_weights() {
            if node.out_degree as usize != node.out_edges.len() {
                return Err(CoreError::InvalidGraph(format!(
                    "node {} out_degree {} does not match out_edges len {}",
                    node.id.display(),
                    node.out_degree,
                    node.out_edges.len()
                )));
            }
            if node.in_degree as usize != node.in_edges.len() {
                return Err(CoreError::InvalidGraph(format!(
                    "node {} in_degree {} does not match in_edges len {}",
                    node.id.display(),
                    node.in_degree,
                    node.in_edges.len()
                )));
            }
            for target in node.out_edges.keys() {
                if !self.file_index.contains_key(target) {
                    return Err(CoreError::InvalidGraph(format!(
                        "edge target {} not in node set",
                        target.display()
                    )));
                }
            }
        }
        Ok(())
    }
}
