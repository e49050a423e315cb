use super::findings::{Findings, Priority, Recommendation};

const MAX_SUBJECTS: usize = 5;

fn subjects<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    names.into_iter().take(MAX_SUBJECTS).map(String::from).collect()
}

/// Turn the already-computed findings into a prioritized, human-facing
/// recommendation list. Each rule below inspects one finding category; the
/// final sort enforces `critical > high > medium > low`.
pub fn build_recommendations(findings: &Findings) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if !findings.circular_dependencies.is_empty() {
        let worst = &findings.circular_dependencies[0];
        let worst_names: Vec<String> = worst.files.iter().map(|f| f.to_string_lossy().to_string()).collect();
        recs.push(Recommendation {
            recommendation_type: "circular_dependency".into(),
            priority: Priority::Critical,
            title: "Break circular dependencies".into(),
            description: format!(
                "{} circular dependency chain(s) detected; the most severe involves {} files.",
                findings.circular_dependencies.len(),
                worst.files.len().saturating_sub(1)
            ),
            subjects: subjects(worst_names.iter().map(|s| s.as_str())),
        });
    }

    let isolated_dead: Vec<&str> = findings
        .dead_code
        .iter()
        .filter(|d| matches!(d.reason, super::findings::DeadCodeReason::Isolated))
        .map(|d| d.name.as_str())
        .collect();
    if !isolated_dead.is_empty() {
        recs.push(Recommendation {
            recommendation_type: "dead_code".into(),
            priority: Priority::High,
            title: "Remove unreachable components".into(),
            description: format!("{} component(s) have no incoming or outgoing dependencies.", isolated_dead.len()),
            subjects: subjects(isolated_dead),
        });
    }

    if !findings.hub_components.is_empty() {
        let names: Vec<&str> = findings.hub_components.iter().map(|h| h.name.as_str()).collect();
        recs.push(Recommendation {
            recommendation_type: "hub_component".into(),
            priority: Priority::Medium,
            title: "Consider splitting highly-connected components".into(),
            description: format!("{} component(s) exceed the hub degree threshold.", findings.hub_components.len()),
            subjects: subjects(names),
        });
    }

    if !findings.unused_props.is_empty() {
        let names: Vec<&str> = findings.unused_props.iter().map(|u| u.name.as_str()).collect();
        recs.push(Recommendation {
            recommendation_type: "unused_props".into(),
            priority: Priority::Medium,
            title: "Remove unused declared props".into(),
            description: format!("{} component(s) declare props that are never read.", findings.unused_props.len()),
            subjects: subjects(names),
        });
    }

    if !findings.high_coupling.is_empty() {
        let names: Vec<String> = findings
            .high_coupling
            .iter()
            .map(|c| c.file_id.to_string_lossy().to_string())
            .collect();
        recs.push(Recommendation {
            recommendation_type: "high_coupling".into(),
            priority: Priority::Low,
            title: "Reduce coupling on highly-connected files".into(),
            description: format!("{} file(s) have combined afferent/efferent coupling of 5 or more.", findings.high_coupling.len()),
            subjects: subjects(names.iter().map(|s| s.as_str())),
        });
    }

    recs.sort_by(|a, b| b.priority.cmp(&a.priority));
    recs
}
