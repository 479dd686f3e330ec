use serde::Serialize;

use crate::index::Cluster;

/// One line of the final read-out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    /// Position of the cluster in creation order.
    pub id: usize,
    pub template: String,
    pub count: usize,
    pub frequency: f64,
    pub wildcards: usize,
    pub example: String,
}

/// Render `clusters` (given in creation order) for output, skipping those
/// with fewer than `min_members` members. `total_lines` is the number of
/// ingested lines and only feeds `frequency`.
pub fn summarize<'a>(
    clusters: impl IntoIterator<Item = &'a Cluster>,
    total_lines: u64,
    min_members: usize,
    wildcard: &str,
) -> Vec<ClusterSummary> {
    clusters
        .into_iter()
        .enumerate()
        .filter(|(_, c)| c.count() >= min_members)
        .map(|(id, c)| ClusterSummary {
            id,
            template: c.pattern().render(wildcard),
            count: c.count(),
            frequency: if total_lines == 0 {
                0.0
            } else {
                c.count() as f64 / total_lines as f64
            },
            wildcards: c.pattern().wildcard_count(),
            example: c.example().to_line(),
        })
        .collect()
}
