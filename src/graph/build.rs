use std::collections::{BTreeMap, BTreeSet, VecDeque};

use petgraph::stable_graph::StableGraph;

use crate::analyzer::facts::FileFacts;
use crate::analyzer::derive_placeholder_name;
use crate::file_id::FileId;

use super::node::{ComponentNode, EdgeInfo};
use super::{stats_of, Graph, GraphMetadata};

/// Assembles [`FileFacts`] into the frozen [`Graph`].
///
/// The determinism contract requires the facts sequence to be sorted by
/// `FileId` before iteration — [`crate::analyzer::analyze_all`] already
/// returns facts in that order, but `build` re-sorts defensively since it
/// must hold regardless of caller.
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn build(mut facts: Vec<FileFacts>) -> Graph {
        facts.sort_by(|a, b| a.file_id.cmp(&b.file_id));

        let mut graph = StableGraph::new();
        let mut file_index = BTreeMap::new();

        // Pass 1 — node creation.
        for f in &facts {
            let node = ComponentNode::from_facts(f);
            let idx = graph.add_node(node);
            file_index.insert(f.file_id.clone(), idx);
        }

        // Pass 2 — edge creation, merging parallel edges and creating
        // placeholders for targets analysis never produced a node for.
        for f in &facts {
            let source_idx = file_index[&f.file_id];
            for (target, import_edge) in &f.imports {
                let target_idx = *file_index.entry(target.clone()).or_insert_with(|| {
                    let placeholder = ComponentNode::placeholder(target.clone(), derive_placeholder_name(target));
                    graph.add_node(placeholder)
                });

                if graph.find_edge(source_idx, target_idx).is_none() {
                    graph.add_edge(source_idx, target_idx, ());
                }

                let usage = f.component_usages.get(target).cloned();

                let source_node = &mut graph[source_idx];
                let entry = source_node.out_edges.entry(target.clone()).or_insert_with(|| EdgeInfo {
                    specifiers: Vec::new(),
                    source_specifier: import_edge.source_specifier.clone(),
                    usage: None,
                });
                for kind in &import_edge.kinds {
                    entry.specifiers.push(format!("{:?}", kind));
                }
                if let Some(u) = usage {
                    entry.usage = Some(u);
                }
                source_node.out_degree = source_node.out_edges.len() as u32;

                let target_node = &mut graph[target_idx];
                target_node.in_edges.insert(f.file_id.clone());
                target_node.in_degree = target_node.in_edges.len() as u32;
            }
        }

        // Pass 3 — structural metadata.
        let n = graph.node_count();
        let group_ids = label_connected_components(&graph, &file_index);
        for (id, idx) in &file_index {
            if let Some(&group) = group_ids.get(id) {
                graph[*idx].component_group_id = group;
            }
        }

        for idx in graph.node_indices() {
            let node = &mut graph[idx];
            node.degree_centrality = if n > 1 {
                (node.in_degree + node.out_degree) as f64 / (n - 1) as f64
            } else {
                0.0
            };
        }

        let metadata = compute_metadata(&graph, &file_index);

        Graph {
            graph,
            file_index,
            metadata,
        }
    }
}

/// Weakly-connected-component labeling via BFS on the undirected projection.
/// Component ids are assigned in order of the smallest `FileId` encountered
/// in each component, giving a stable, input-order-independent labeling.
fn label_connected_components(
    graph: &StableGraph<ComponentNode, (), petgraph::Directed>,
    file_index: &BTreeMap<FileId, petgraph::stable_graph::NodeIndex>,
) -> BTreeMap<FileId, u32> {
    let mut visited = BTreeSet::new();
    let mut components: Vec<Vec<FileId>> = Vec::new();

    // Iterate ids in sorted order so the discovery order — and therefore the
    // canonical ordering used to assign group ids — is deterministic.
    let mut ids: Vec<&FileId> = file_index.keys().collect();
    ids.sort();

    for &id in &ids {
        if visited.contains(id) {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(id.clone());
        visited.insert(id.clone());

        while let Some(current) = queue.pop_front() {
            component.push(current.clone());
            let idx = file_index[&current];
            let node = &graph[idx];

            for target in node.out_edges.keys() {
                if visited.insert(target.clone()) {
                    queue.push_back(target.clone());
                }
            }
            for source in &node.in_edges {
                if visited.insert(source.clone()) {
                    queue.push_back(source.clone());
                }
            }
        }
        component.sort();
        components.push(component);
    }

    components.sort_by(|a, b| a[0].cmp(&b[0]));

    let mut labels = BTreeMap::new();
    for (group_id, component) in components.into_iter().enumerate() {
        for id in component {
            labels.insert(id, group_id as u32);
        }
    }
    labels
}

fn compute_metadata(
    graph: &StableGraph<ComponentNode, (), petgraph::Directed>,
    file_index: &BTreeMap<FileId, petgraph::stable_graph::NodeIndex>,
) -> GraphMetadata {
    let node_count = graph.node_count();
    let edge_count = graph.edge_count();
    let density = if node_count > 1 {
        edge_count as f64 / (node_count * (node_count - 1)) as f64
    } else {
        0.0
    };

    let mut in_degrees = Vec::with_capacity(node_count);
    let mut out_degrees = Vec::with_capacity(node_count);
    let mut total_degrees = Vec::with_capacity(node_count);
    let mut isolated = Vec::new();
    let mut leaf = Vec::new();
    let mut root = Vec::new();

    let mut ids: Vec<&FileId> = file_index.keys().collect();
    ids.sort();

    for &id in &ids {
        let node = &graph[file_index[id]];
        in_degrees.push(node.in_degree);
        out_degrees.push(node.out_degree);
        total_degrees.push(node.in_degree + node.out_degree);

        if node.in_degree == 0 && node.out_degree == 0 {
            isolated.push(id.clone());
        } else if node.out_degree == 0 {
            leaf.push(id.clone());
        } else if node.in_degree == 0 {
            root.push(id.clone());
        }
    }

    let mut group_sizes: BTreeMap<u32, usize> = BTreeMap::new();
    for &id in &ids {
        let node = &graph[file_index[id]];
        *group_sizes.entry(node.component_group_id).or_insert(0) += 1;
    }

    GraphMetadata {
        node_count,
        edge_count,
        density,
        in_degree_stats: stats_of(in_degrees),
        out_degree_stats: stats_of(out_degrees),
        total_degree_stats: stats_of(total_degrees),
        connected_component_count: group_sizes.len(),
        largest_component_size: group_sizes.values().copied().max().unwrap_or(0),
        isolated,
        leaf,
        root,
    }
}
