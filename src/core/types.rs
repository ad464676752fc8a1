use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub Uuid);

impl DocId {
    pub fn generate() -> Self {
        DocId(Uuid::new_v4())
    }

    pub fn from_u128(id: u128) -> Self {
        DocId(Uuid::from_u128(id))
    }
}

impl From<Uuid> for DocId {
    fn from(id: Uuid) -> Self {
        DocId(id)
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A forum post as seen by the index and the ranker.
///
/// Only `title`, `description` and `tags` are indexed. The engagement
/// counters belong to the caller and are read by the trending ranker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub upvote_count: u32,
    #[serde(default)]
    pub downvote_count: u32,
    #[serde(default)]
    pub reply_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(id: DocId, title: impl Into<String>) -> Self {
        Document {
            id,
            title: title.into(),
            description: None,
            tags: Vec::new(),
            upvote_count: 0,
            downvote_count: 0,
            reply_count: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_engagement(mut self, upvotes: u32, downvotes: u32, replies: u32) -> Self {
        self.upvote_count = upvotes;
        self.downvote_count = downvotes;
        self.reply_count = replies;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Text fields in indexing order: title, description, then each tag
    pub fn indexed_text(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str())
            .chain(self.description.as_deref())
            .chain(self.tags.iter().map(String::as_str))
    }
}
