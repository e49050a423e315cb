use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::analysis::findings::{
    CircularDependency, ComplexityBucket, ComponentComplexity, Coupling, CouplingBucket, DeadCodeNode,
    DeadCodeReason, DependencyDepth, Findings, HubComponent, OrphanComponent, OrphanReason, Priority,
    Recommendation, UnusedProps,
};
use crate::framework::Framework;
use crate::graph::Graph;
use crate::CoreResult;

#[derive(Debug, Serialize)]
pub struct NodeJson {
    id: String,
    name: String,
    #[serde(rename = "propsDeclared")]
    props_declared: Vec<String>,
    #[serde(rename = "propsUsedInBody")]
    props_used_in_body: Vec<String>,
    #[serde(rename = "unusedProps")]
    unused_props: Vec<String>,
    #[serde(rename = "inDegree")]
    in_degree: u32,
    #[serde(rename = "outDegree")]
    out_degree: u32,
    #[serde(rename = "cyclomaticComplexity")]
    cyclomatic_complexity: u32,
    dependencies: Vec<String>,
    dependents: Vec<String>,
    #[serde(rename = "relativePath")]
    relative_path: String,
}

#[derive(Debug, Serialize)]
pub struct EdgeJson {
    source: String,
    target: String,
    metadata: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct DegreeStatsJson {
    min: u32,
    max: u32,
    mean: f64,
    median: f64,
    stddev: f64,
}

#[derive(Debug, Serialize)]
pub struct MetadataJson {
    #[serde(rename = "nodeCount")]
    node_count: usize,
    #[serde(rename = "edgeCount")]
    edge_count: usize,
    density: f64,
    #[serde(rename = "inDegreeStats")]
    in_degree_stats: DegreeStatsJson,
    #[serde(rename = "outDegreeStats")]
    out_degree_stats: DegreeStatsJson,
    #[serde(rename = "totalDegreeStats")]
    total_degree_stats: DegreeStatsJson,
    #[serde(rename = "connectedComponentCount")]
    connected_component_count: usize,
    #[serde(rename = "largestComponentSize")]
    largest_component_size: usize,
    isolated: Vec<String>,
    leaf: Vec<String>,
    root: Vec<String>,
    #[serde(rename = "generatedAt")]
    generated_at: u64,
    #[serde(rename = "projectPath")]
    project_path: String,
    framework: String,
}

#[derive(Debug, Serialize)]
pub struct CoreResultJson {
    nodes: BTreeMap<String, NodeJson>,
    edges: Vec<EdgeJson>,
    metadata: MetadataJson,
    analysis: FindingsJson,
    #[serde(rename = "parseFailures")]
    parse_failures: Vec<ParseFailureJson>,
}

#[derive(Debug, Serialize)]
pub struct ParseFailureJson {
    #[serde(rename = "fileId")]
    file_id: String,
    reason: String,
}

pub fn to_json(result: &CoreResult, project_path: &str, framework: Framework) -> CoreResultJson {
    CoreResultJson {
        nodes: build_nodes(&result.graph),
        edges: build_edges(&result.graph),
        metadata: build_metadata(&result.graph, project_path, framework),
        analysis: FindingsJson::from(&result.findings),
        parse_failures: result
            .parse_failures
            .iter()
            .map(|f| ParseFailureJson {
                file_id: f.file_id.to_string_lossy().to_string(),
                reason: f.reason.to_string(),
            })
            .collect(),
    }
}

fn build_nodes(graph: &Graph) -> BTreeMap<String, NodeJson> {
    let mut nodes = BTreeMap::new();
    for node in graph.nodes_sorted() {
        let id = node.id.to_string_lossy().to_string();
        let mut unused: Vec<String> = node.unused_props().into_iter().collect();
        unused.sort();
        let mut dependencies: Vec<String> = node.out_edges.keys().map(|f| f.to_string_lossy().to_string()).collect();
        dependencies.sort();
        let mut dependents: Vec<String> = node.in_edges.iter().map(|f| f.to_string_lossy().to_string()).collect();
        dependents.sort();

        nodes.insert(
            id.clone(),
            NodeJson {
                id,
                name: node.name.clone(),
                props_declared: node.props_declared.iter().cloned().collect(),
                props_used_in_body: node.props_used.iter().cloned().collect(),
                unused_props: unused,
                in_degree: node.in_degree,
                out_degree: node.out_degree,
                cyclomatic_complexity: node.cyclomatic_complexity,
                dependencies,
                dependents,
                relative_path: node.id.to_string_lossy().to_string(),
            },
        );
    }
    nodes
}

fn build_edges(graph: &Graph) -> Vec<EdgeJson> {
    let mut edges = Vec::new();
    for node in graph.nodes_sorted() {
        for (target, info) in &node.out_edges {
            let mut metadata = BTreeMap::new();
            metadata.insert("sourceSpecifier".to_string(), serde_json::json!(info.source_specifier));
            metadata.insert("specifiers".to_string(), serde_json::json!(info.specifiers));
            if let Some(usage) = &info.usage {
                metadata.insert("usageCount".to_string(), serde_json::json!(usage.usage_count));
                metadata.insert(
                    "passedProps".to_string(),
                    serde_json::json!(usage.passed_props.iter().collect::<Vec<_>>()),
                );
            }
            edges.push(EdgeJson {
                source: node.id.to_string_lossy().to_string(),
                target: target.to_string_lossy().to_string(),
                metadata,
            });
        }
    }
    edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));
    edges
}

fn degree_stats_json(stats: crate::graph::DegreeStats) -> DegreeStatsJson {
    DegreeStatsJson {
        min: stats.min,
        max: stats.max,
        mean: stats.mean,
        median: stats.median,
        stddev: stats.stddev,
    }
}

fn build_metadata(graph: &Graph, project_path: &str, framework: Framework) -> MetadataJson {
    let m = &graph.metadata;
    let generated_at = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    MetadataJson {
        node_count: m.node_count,
        edge_count: m.edge_count,
        density: m.density,
        in_degree_stats: degree_stats_json(m.in_degree_stats),
        out_degree_stats: degree_stats_json(m.out_degree_stats),
        total_degree_stats: degree_stats_json(m.total_degree_stats),
        connected_component_count: m.connected_component_count,
        largest_component_size: m.largest_component_size,
        isolated: m.isolated.iter().map(|f| f.to_string_lossy().to_string()).collect(),
        leaf: m.leaf.iter().map(|f| f.to_string_lossy().to_string()).collect(),
        root: m.root.iter().map(|f| f.to_string_lossy().to_string()).collect(),
        generated_at,
        project_path: project_path.to_string(),
        framework: framework.to_string(),
    }
}

#[derive(Debug, Serialize)]
pub struct FindingsJson {
    #[serde(rename = "orphanComponents")]
    orphan_components: Vec<serde_json::Value>,
    #[serde(rename = "unusedProps")]
    unused_props: Vec<serde_json::Value>,
    #[serde(rename = "circularDependencies")]
    circular_dependencies: Vec<serde_json::Value>,
    #[serde(rename = "componentComplexity")]
    component_complexity: Vec<serde_json::Value>,
    #[serde(rename = "dependencyDepth")]
    dependency_depth: Option<serde_json::Value>,
    #[serde(rename = "hubComponents")]
    hub_components: Vec<serde_json::Value>,
    #[serde(rename = "deadCode")]
    dead_code: Vec<serde_json::Value>,
    coupling: Vec<serde_json::Value>,
    #[serde(rename = "highCoupling")]
    high_coupling: Vec<serde_json::Value>,
    recommendations: Vec<serde_json::Value>,
}

impl From<&Findings> for FindingsJson {
    fn from(f: &Findings) -> Self {
        FindingsJson {
            orphan_components: f.orphan_components.iter().map(orphan_json).collect(),
            unused_props: f.unused_props.iter().map(unused_props_json).collect(),
            circular_dependencies: f.circular_dependencies.iter().map(circular_json).collect(),
            component_complexity: f.component_complexity.iter().map(complexity_json).collect(),
            dependency_depth: f.dependency_depth.as_ref().map(depth_json),
            hub_components: f.hub_components.iter().map(hub_json).collect(),
            dead_code: f.dead_code.iter().map(dead_code_json).collect(),
            coupling: f.coupling.iter().map(coupling_json).collect(),
            high_coupling: f.high_coupling.iter().map(coupling_json).collect(),
            recommendations: f.recommendations.iter().map(recommendation_json).collect(),
        }
    }
}

fn orphan_json(o: &OrphanComponent) -> serde_json::Value {
    serde_json::json!({
        "fileId": o.file_id.to_string_lossy(),
        "name": o.name,
        "reason": match o.reason { OrphanReason::Isolated => "isolated", OrphanReason::EntryPoint => "entry_point" },
        "outDegree": o.out_degree,
    })
}

fn unused_props_json(u: &UnusedProps) -> serde_json::Value {
    serde_json::json!({
        "fileId": u.file_id.to_string_lossy(),
        "name": u.name,
        "unused": u.unused,
        "declaredCount": u.declared_count,
        "usageRate": u.usage_rate,
    })
}

fn circular_json(c: &CircularDependency) -> serde_json::Value {
    serde_json::json!({
        "files": c.files.iter().map(|f| f.to_string_lossy().to_string()).collect::<Vec<_>>(),
        "severity": c.severity,
    })
}

fn bucket_name(bucket: ComplexityBucket) -> &'static str {
    match bucket {
        ComplexityBucket::VeryLow => "very_low",
        ComplexityBucket::Low => "low",
        ComplexityBucket::Medium => "medium",
        ComplexityBucket::High => "high",
        ComplexityBucket::VeryHigh => "very_high",
    }
}

fn complexity_json(c: &ComponentComplexity) -> serde_json::Value {
    serde_json::json!({
        "fileId": c.file_id.to_string_lossy(),
        "name": c.name,
        "score": c.score,
        "bucket": bucket_name(c.bucket),
    })
}

fn depth_json(d: &DependencyDepth) -> serde_json::Value {
    let mut distribution: Vec<(String, u32)> =
        d.distribution.iter().map(|(f, depth)| (f.to_string_lossy().to_string(), *depth)).collect();
    distribution.sort();
    let mut deepest: Vec<String> = d.deepest.iter().map(|f| f.to_string_lossy().to_string()).collect();
    deepest.sort();
    serde_json::json!({
        "distribution": distribution,
        "averageDepth": d.average_depth,
        "maxDepth": d.max_depth,
        "deepest": deepest,
    })
}

fn hub_json(h: &HubComponent) -> serde_json::Value {
    serde_json::json!({
        "fileId": h.file_id.to_string_lossy(),
        "name": h.name,
        "totalDegree": h.total_degree,
        "directImpact": h.direct_impact,
        "indirectImpact": h.indirect_impact,
    })
}

fn dead_code_json(d: &DeadCodeNode) -> serde_json::Value {
    serde_json::json!({
        "fileId": d.file_id.to_string_lossy(),
        "name": d.name,
        "reason": match d.reason { DeadCodeReason::Isolated => "isolated", DeadCodeReason::UnusedEntryPoint => "unused_entry_point" },
        "confidence": d.confidence,
    })
}

fn coupling_bucket_name(bucket: CouplingBucket) -> &'static str {
    match bucket {
        CouplingBucket::Low => "low",
        CouplingBucket::Medium => "medium",
        CouplingBucket::High => "high",
        CouplingBucket::VeryHigh => "very_high",
    }
}

fn coupling_json(c: &Coupling) -> serde_json::Value {
    serde_json::json!({
        "fileId": c.file_id.to_string_lossy(),
        "afferent": c.afferent,
        "efferent": c.efferent,
        "instability": c.instability,
        "bucket": coupling_bucket_name(c.bucket),
    })
}

fn priority_name(p: Priority) -> &'static str {
    match p {
        Priority::Critical => "critical",
        Priority::High => "high",
        Priority::Medium => "medium",
        Priority::Low => "low",
    }
}

fn recommendation_json(r: &Recommendation) -> serde_json::Value {
    serde_json::json!({
        "type": r.recommendation_type,
        "priority": priority_name(r.priority),
        "title": r.title,
        "description": r.description,
        "subjects": r.subjects,
    })
}
