use crate::core::types::Document;

/// Scorer trait
pub trait Scorer: Send + Sync {
    fn score(&self, doc: &Document) -> u64;

    fn name(&self) -> &str;
}

/// Engagement score used for the trending feed:
/// `2 * upvotes + replies`. Downvotes do not count against a post.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendingScorer;

impl TrendingScorer {
    pub const UPVOTE_WEIGHT: u64 = 2;
    pub const REPLY_WEIGHT: u64 = 1;
}

impl Scorer for TrendingScorer {
    fn score(&self, doc: &Document) -> u64 {
        Self::UPVOTE_WEIGHT * doc.upvote_count as u64 + Self::REPLY_WEIGHT * doc.reply_count as u64
    }

    fn name(&self) -> &str {
        "trending"
    }
}
