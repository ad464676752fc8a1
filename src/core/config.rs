use serde::{Deserialize, Serialize};
use crate::core::error::Result;

/// What the lifecycle manager does when a new document is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationPolicy {
    /// Build lazily if never built, then add the new document directly
    #[default]
    Incremental,
    /// Rebuild from the store, then add the new document directly.
    /// Costs O(corpus) per creation; covers stores that do not yet
    /// return a document right after it was written.
    RebuildThenAdd,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub creation_policy: CreationPolicy,

    pub trending_limit: usize,                  // Size of the trending feed

    pub parallel_build_threshold: usize,        // Corpus size that switches rebuilds to rayon
    pub query_cache_capacity: usize,            // 0 disables the cache
}

impl Default for Config {
    fn default() -> Self {
        Config {
            creation_policy: CreationPolicy::Incremental,
            trending_limit: 5,
            parallel_build_threshold: 1024,
            query_cache_capacity: 256,
        }
    }
}

impl Config {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    #[test]
    fn partial_json_fills_defaults() {
        let config = Config::from_json(r#"{"creation_policy": "rebuild_then_add"}"#).unwrap();
        assert_eq!(config.creation_policy, CreationPolicy::RebuildThenAdd);
        assert_eq!(config.trending_limit, 5);
        assert_eq!(config.query_cache_capacity, 256);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Config::from_json("{ trending_limit: }").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
    }
}
