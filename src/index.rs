use ahash::AHashMap;
use serde::Serialize;

use crate::pattern::{Pattern, TokenSequence};

/// Handle to a cluster inside the [`ClusterIndex`] that created it.
/// Ids are handed out in creation order starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClusterId(usize);

impl ClusterId {
    pub fn get(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    id: ClusterId,
    pattern: Pattern,
    count: usize,
    example: TokenSequence,
    origin: u64,
}

impl Cluster {
    pub fn id(&self) -> ClusterId {
        self.id
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// The line that created the cluster.
    pub fn example(&self) -> &TokenSequence {
        &self.example
    }

    /// Ordinal of the input line that created the cluster.
    pub fn origin(&self) -> u64 {
        self.origin
    }
}

/// Owns every cluster of one engine, bucketed by token count.
///
/// Clusters live in a creation-ordered arena; each bucket lists the ids of its
/// clusters in the order they were created, so candidate iteration (and the
/// tie-breaking that depends on it) is deterministic.
#[derive(Debug, Default)]
pub struct ClusterIndex {
    clusters: Vec<Cluster>,
    buckets: AHashMap<usize, Vec<ClusterId>>,
}

impl ClusterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of distinct line lengths seen so far.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Clusters whose pattern has `length` slots, oldest first.
    pub fn candidates(&self, length: usize) -> impl Iterator<Item = &Cluster> + '_ {
        self.buckets
            .get(&length)
            .map(|ids| ids.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |id| &self.clusters[id.0])
    }

    /// Start a new cluster whose pattern is `seq` verbatim.
    pub fn insert_new(&mut self, seq: TokenSequence, origin: u64) -> ClusterId {
        let id = ClusterId(self.clusters.len());
        self.buckets.entry(seq.len()).or_default().push(id);
        self.clusters.push(Cluster {
            id,
            pattern: Pattern::from_sequence(&seq),
            count: 1,
            example: seq,
            origin,
        });
        id
    }

    /// Count `seq` as a member of `id` and widen its pattern to cover it.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this index or `seq` has a different
    /// length than the cluster's pattern.
    pub fn update(&mut self, id: ClusterId, seq: &TokenSequence) {
        let cluster = &mut self.clusters[id.0];
        cluster.pattern.absorb(seq);
        cluster.count += 1;
    }

    pub fn get(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(id.0)
    }

    /// Every cluster exactly once, in creation order.
    pub fn all(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }

    pub fn into_clusters(self) -> Vec<Cluster> {
        self.clusters
    }
}
