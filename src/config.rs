use serde::Deserialize;
use std::path::Path;

use crate::error::{ClusterError, ClusterResult};
use crate::pattern::DEFAULT_WILDCARD;
use crate::tokenizer::{Tokenizer, DEFAULT_DELIMITERS};

/// Settings shared by the engine, the sharded driver and the binary.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// max_distance = 0.3
/// min_members = 2
/// delimiters = " \t,;"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusterOpts {
    /// Highest distance at which a line still joins an existing cluster.
    pub max_distance: f64,
    /// Clusters with fewer members are left out of the read-out.
    pub min_members: usize,
    /// Characters that separate tokens.
    pub delimiters: String,
    /// Replace numbers, addresses, ids and similar tokens by placeholders
    /// before clustering.
    pub mask_variables: bool,
    /// Marker printed for wildcard slots.
    pub wildcard: String,
}

impl Default for ClusterOpts {
    fn default() -> Self {
        Self {
            max_distance: 0.5,
            min_members: 1,
            delimiters: DEFAULT_DELIMITERS.to_string(),
            mask_variables: false,
            wildcard: DEFAULT_WILDCARD.to_string(),
        }
    }
}

impl ClusterOpts {
    pub fn from_toml_str(s: &str) -> ClusterResult<Self> {
        let opts: ClusterOpts = toml::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn load(path: impl AsRef<Path>) -> ClusterResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ClusterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> ClusterResult<()> {
        if !(0.0..=1.0).contains(&self.max_distance) {
            return Err(ClusterError::InvalidThreshold(self.max_distance));
        }
        if self.delimiters.is_empty() {
            return Err(ClusterError::InvalidConfig("delimiter set is empty".into()));
        }
        if self.wildcard.is_empty() {
            return Err(ClusterError::InvalidConfig("wildcard marker is empty".into()));
        }
        Ok(())
    }

    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new(&self.delimiters).with_masking(self.mask_variables)
    }
}
