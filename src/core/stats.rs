use serde::{Serialize, Deserialize};
use crate::query::cache::CacheStats;

/// Snapshot of index health for monitoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub documents: usize,
    pub terms: usize,
    pub postings: usize,

    // Bumped on every rebuild and incremental change
    pub generation: u64,
    pub initialized: bool,

    pub cache: CacheStats,
}
