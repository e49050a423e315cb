use crate::graph::Graph;

use super::findings::{Coupling, CouplingBucket};

/// Afferent/efferent coupling and instability per node. `high_coupling`
/// selects nodes whose total (afferent + efferent) reaches 5 or more.
pub fn compute_coupling(graph: &Graph) -> (Vec<Coupling>, Vec<Coupling>) {
    let mut all: Vec<Coupling> = graph
        .nodes_sorted()
        .into_iter()
        .map(|n| {
            let afferent = n.in_degree;
            let efferent = n.out_degree;
            let total = afferent + efferent;
            let instability = if total == 0 {
                0.0
            } else {
                efferent as f64 / total as f64
            };
            Coupling {
                file_id: n.id.clone(),
                afferent,
                efferent,
                instability,
                bucket: CouplingBucket::from_total(total),
            }
        })
        .collect();

    all.sort_by(|a, b| {
        (b.afferent + b.efferent)
            .cmp(&(a.afferent + a.efferent))
            .then_with(|| a.file_id.cmp(&b.file_id))
    });

    let high_coupling: Vec<Coupling> = all.iter().filter(|c| c.afferent + c.efferent >= 5).cloned().collect();

    (all, high_coupling)
}
