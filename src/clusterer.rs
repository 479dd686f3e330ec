use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::ClusterOpts;
use crate::distance::distance_within;
use crate::error::ClusterResult;
use crate::index::{Cluster, ClusterId, ClusterIndex};
use crate::pattern::TokenSequence;
use crate::summary::{self, ClusterSummary};
use crate::tokenizer::Tokenizer;

/// Where an ingested line ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Joined { id: ClusterId, distance: f64 },
    Created { id: ClusterId },
}

impl Placement {
    pub fn id(&self) -> ClusterId {
        match *self {
            Placement::Joined { id, .. } | Placement::Created { id } => id,
        }
    }
}

/// Single-pass log clusterer.
///
/// Each line joins the closest existing cluster of the same length when its
/// distance is at most `max_distance`, otherwise it starts a new cluster.
/// Ties go to the cluster created first. Decisions are never revisited, so
/// the outcome depends on arrival order.
pub struct Clusterer {
    index: ClusterIndex,
    tokenizer: Tokenizer,
    max_distance: f64,
    min_members: usize,
    wildcard: String,
    lines: u64,
}

impl Clusterer {
    pub fn new(opts: &ClusterOpts) -> ClusterResult<Self> {
        opts.validate()?;
        Ok(Self {
            index: ClusterIndex::new(),
            tokenizer: opts.tokenizer(),
            max_distance: opts.max_distance,
            min_members: opts.min_members,
            wildcard: opts.wildcard.clone(),
            lines: 0,
        })
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Number of lines ingested so far.
    pub fn lines_seen(&self) -> u64 {
        self.lines
    }

    pub fn index(&self) -> &ClusterIndex {
        &self.index
    }

    pub fn process_line(&mut self, line: &str) -> Placement {
        let seq = self.tokenizer.tokenize(line);
        self.ingest(seq)
    }

    pub fn ingest(&mut self, seq: TokenSequence) -> Placement {
        let origin = self.lines;
        self.ingest_at(seq, origin)
    }

    /// Tokenize a batch on the rayon pool, then ingest it in order. The
    /// outcome is the same as feeding the lines one by one.
    pub fn ingest_batch<S: AsRef<str> + Sync>(&mut self, lines: &[S]) {
        let tokenizer = &self.tokenizer;
        let seqs: Vec<TokenSequence> = lines
            .par_iter()
            .map(|l| tokenizer.tokenize(l.as_ref()))
            .collect();
        for seq in seqs {
            self.ingest(seq);
        }
    }

    /// Ingest a line whose position in the overall input is `origin`.
    pub(crate) fn ingest_at(&mut self, seq: TokenSequence, origin: u64) -> Placement {
        self.lines += 1;
        match self.closest(&seq) {
            Some((id, distance)) => {
                trace!(cluster = id.get(), distance, "line joined cluster");
                self.index.update(id, &seq);
                Placement::Joined { id, distance }
            }
            None => {
                let len = seq.len();
                let id = self.index.insert_new(seq, origin);
                debug!(cluster = id.get(), tokens = len, origin, "new cluster");
                Placement::Created { id }
            }
        }
    }

    /// Closest cluster within `max_distance`, earliest created on ties.
    fn closest(&self, seq: &TokenSequence) -> Option<(ClusterId, f64)> {
        let mut best: Option<(ClusterId, f64)> = None;
        for cluster in self.index.candidates(seq.len()) {
            // Only a strictly smaller distance can displace the current best,
            // so anything above it need not be scanned to the end.
            let bound = best.map_or(self.max_distance, |(_, d)| d);
            let Some(d) = distance_within(seq, cluster.pattern(), bound) else {
                continue;
            };
            if best.map_or(true, |(_, b)| d < b) {
                best = Some((cluster.id(), d));
            }
            if d == 0.0 {
                break;
            }
        }
        best
    }

    /// Clusters with at least `min_members` members, in creation order.
    pub fn result(&self) -> Vec<ClusterSummary> {
        summary::summarize(self.index.all(), self.lines, self.min_members, &self.wildcard)
    }

    pub fn into_clusters(self) -> Vec<Cluster> {
        self.index.into_clusters()
    }
}
