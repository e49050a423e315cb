use std::collections::{BTreeMap, BTreeSet};

use crate::analyzer::facts::{ComponentUsage, FileFacts};
use crate::file_id::FileId;

/// Per-target edge metadata kept on the source node, mirroring `ImportEdge`
/// but also carrying the usage information JSX/template scanning produced.
#[derive(Debug, Clone, Default)]
pub struct EdgeInfo {
    pub specifiers: Vec<String>,
    pub source_specifier: String,
    pub usage: Option<ComponentUsage>,
}

/// One node in the frozen dependency graph — either a fully-analyzed
/// component/export-bearing file, or a placeholder standing in for a
/// resolved-but-unparseable import target.
#[derive(Debug, Clone)]
pub struct ComponentNode {
    pub id: FileId,
    pub name: String,
    pub is_component: bool,
    pub props_declared: BTreeSet<String>,
    pub props_used: BTreeSet<String>,
    pub uses_rest_spread: bool,
    pub cyclomatic_complexity: u32,
    pub out_edges: BTreeMap<FileId, EdgeInfo>,
    pub in_edges: BTreeSet<FileId>,
    pub in_degree: u32,
    pub out_degree: u32,
    pub component_group_id: u32,
    pub degree_centrality: f64,
}

impl ComponentNode {
    pub fn from_facts(facts: &FileFacts) -> Self {
        Self {
            id: facts.file_id.clone(),
            name: facts.component_name.clone(),
            is_component: facts.is_component,
            props_declared: facts.props_declared.clone(),
            props_used: facts.props_used.clone(),
            uses_rest_spread: facts.uses_rest_spread,
            cyclomatic_complexity: facts.cyclomatic_complexity,
            out_edges: BTreeMap::new(),
            in_edges: BTreeSet::new(),
            in_degree: 0,
            out_degree: 0,
            component_group_id: 0,
            degree_centrality: 0.0,
        }
    }

    /// Empty node standing in for a resolved-but-unanalyzed import target —
    /// preserves invariant (1) of §3: every edge endpoint exists as a node.
    pub fn placeholder(id: FileId, name: String) -> Self {
        Self {
            id,
            name,
            is_component: false,
            props_declared: BTreeSet::new(),
            props_used: BTreeSet::new(),
            uses_rest_spread: false,
            cyclomatic_complexity: 0,
            out_edges: BTreeMap::new(),
            in_edges: BTreeSet::new(),
            in_degree: 0,
            out_degree: 0,
            component_group_id: 0,
            degree_centrality: 0.0,
        }
    }

    /// `props_declared \ props_used`, empty whenever rest-spread disables
    /// unused-prop reporting for this node.
    pub fn unused_props(&self) -> BTreeSet<String> {
        if self.uses_rest_spread {
            return BTreeSet::new();
        }
        self.props_declared.difference(&self.props_used).cloned().collect()
    }
}
