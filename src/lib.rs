pub mod error;
pub mod config;
pub mod masking;
pub mod tokenizer;
pub mod pattern;
pub mod distance;
pub mod index;
pub mod summary;
pub mod clusterer;
pub mod shard;

pub use clusterer::{Clusterer, Placement};
pub use config::ClusterOpts;
pub use error::{ClusterError, ClusterResult};
pub use index::{Cluster, ClusterId, ClusterIndex};
pub use pattern::{Pattern, Slot, Token, TokenSequence};
pub use summary::ClusterSummary;
