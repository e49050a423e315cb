use crate::file_id::FileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrphanReason {
    Isolated,
    EntryPoint,
}

#[derive(Debug, Clone)]
pub struct OrphanComponent {
    pub file_id: FileId,
    pub name: String,
    pub reason: OrphanReason,
    pub out_degree: u32,
}

#[derive(Debug, Clone)]
pub struct UnusedProps {
    pub file_id: FileId,
    pub name: String,
    pub unused: Vec<String>,
    pub declared_count: usize,
    pub usage_rate: f64,
}

#[derive(Debug, Clone)]
pub struct CircularDependency {
    /// Files forming the cycle, normalized so the lexicographically smallest
    /// `FileId` is first, closed by repeating that first file at the end.
    pub files: Vec<FileId>,
    pub severity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ComplexityBucket {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ComplexityBucket {
    pub fn from_score(score: f64) -> Self {
        if score < 5.0 {
            ComplexityBucket::VeryLow
        } else if score < 10.0 {
            ComplexityBucket::Low
        } else if score < 15.0 {
            ComplexityBucket::Medium
        } else if score < 20.0 {
            ComplexityBucket::High
        } else {
            ComplexityBucket::VeryHigh
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComponentComplexity {
    pub file_id: FileId,
    pub name: String,
    pub score: f64,
    pub bucket: ComplexityBucket,
}

#[derive(Debug, Clone)]
pub struct DependencyDepth {
    pub distribution: Vec<(FileId, u32)>,
    pub average_depth: f64,
    pub max_depth: u32,
    pub deepest: Vec<FileId>,
}

#[derive(Debug, Clone)]
pub struct HubComponent {
    pub file_id: FileId,
    pub name: String,
    pub total_degree: u32,
    pub direct_impact: f64,
    pub indirect_impact: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadCodeReason {
    Isolated,
    UnusedEntryPoint,
}

#[derive(Debug, Clone)]
pub struct DeadCodeNode {
    pub file_id: FileId,
    pub name: String,
    pub reason: DeadCodeReason,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CouplingBucket {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl CouplingBucket {
    pub fn from_total(total: u32) -> Self {
        if total < 5 {
            CouplingBucket::Low
        } else if total < 10 {
            CouplingBucket::Medium
        } else if total < 15 {
            CouplingBucket::High
        } else {
            CouplingBucket::VeryHigh
        }
    }
}

#[derive(Debug, Clone)]
pub struct Coupling {
    pub file_id: FileId,
    pub afferent: u32,
    pub efferent: u32,
    pub instability: f64,
    pub bucket: CouplingBucket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone)]
pub struct Recommendation {
    pub recommendation_type: String,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub subjects: Vec<String>,
}

/// The immutable, whole-graph output of the analysis stage.
#[derive(Debug, Clone, Default)]
pub struct Findings {
    pub orphan_components: Vec<OrphanComponent>,
    pub unused_props: Vec<UnusedProps>,
    pub circular_dependencies: Vec<CircularDependency>,
    pub component_complexity: Vec<ComponentComplexity>,
    pub dependency_depth: Option<DependencyDepth>,
    pub hub_components: Vec<HubComponent>,
    pub dead_code: Vec<DeadCodeNode>,
    pub coupling: Vec<Coupling>,
    pub high_coupling: Vec<Coupling>,
    pub recommendations: Vec<Recommendation>,
}
