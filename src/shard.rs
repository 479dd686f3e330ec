//! Parallel clustering by length-bucket sharding.
//!
//! Lines of different token counts never share a cluster, so partitioning the
//! input by length and running one independent [`Clusterer`] per partition
//! loses nothing. Each partition keeps its lines in arrival order and every
//! cluster remembers the ordinal of the line that created it, which lets the
//! per-shard outputs be stitched back into global creation order. The result
//! is identical to sequential ingestion.

use ahash::AHashMap;
use rayon::prelude::*;
use tracing::debug;

use crate::clusterer::Clusterer;
use crate::config::ClusterOpts;
use crate::error::ClusterResult;
use crate::index::Cluster;
use crate::pattern::TokenSequence;
use crate::summary::{self, ClusterSummary};

type Shard = Vec<(u64, TokenSequence)>;

pub fn cluster_sharded<S: AsRef<str> + Sync>(
    lines: &[S],
    opts: &ClusterOpts,
) -> ClusterResult<Vec<ClusterSummary>> {
    opts.validate()?;
    let tokenizer = opts.tokenizer();
    let seqs: Vec<TokenSequence> = lines
        .par_iter()
        .map(|l| tokenizer.tokenize(l.as_ref()))
        .collect();

    let shards = partition_by_length(seqs);
    debug!(lines = lines.len(), shards = shards.len(), "clustering shards");

    let per_shard: Vec<Vec<Cluster>> = shards
        .into_par_iter()
        .map(|shard| -> ClusterResult<Vec<Cluster>> {
            let mut engine = Clusterer::new(opts)?;
            for (origin, seq) in shard {
                engine.ingest_at(seq, origin);
            }
            Ok(engine.into_clusters())
        })
        .collect::<ClusterResult<_>>()?;

    let mut clusters: Vec<Cluster> = per_shard.into_iter().flatten().collect();
    clusters.sort_by_key(Cluster::origin);

    Ok(summary::summarize(
        &clusters,
        lines.len() as u64,
        opts.min_members,
        &opts.wildcard,
    ))
}

/// Group sequences by length, keeping each one's input ordinal.
fn partition_by_length(seqs: Vec<TokenSequence>) -> Vec<Shard> {
    let mut by_len: AHashMap<usize, Shard> = AHashMap::new();
    for (origin, seq) in seqs.into_iter().enumerate() {
        by_len.entry(seq.len()).or_default().push((origin as u64, seq));
    }
    let mut shards: Vec<(usize, Shard)> = by_len.into_iter().collect();
    shards.sort_unstable_by_key(|(len, _)| *len);
    shards.into_iter().map(|(_, shard)| shard).collect()
}
