use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque identifier for a feed item, compared as a string key.
///
/// Upstream APIs are inconsistent about id types (some emit JSON strings,
/// some integers), so deserialization accepts both and normalizes to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Str(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => ItemId(n.to_string()),
            RawId::Str(s) => ItemId(s),
        })
    }
}

/// One blog post as delivered by the upstream feed.
///
/// The layout core only ever looks at `id`; everything else is carried
/// untouched so the presentation layer can render full cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, alias = "imageUrl", alias = "image_url")]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "publishedAt", alias = "published_at")]
    pub published: Option<DateTime<Utc>>,
}

/// Upstream response envelope for one fixed-size page of posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub skip: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    /// Number of posts requested per page.
    pub page_size: usize,
    /// How long a fetched page stays fresh before a refetch hits the network.
    pub cache_ttl_seconds: i64,
    pub follow_redirects: bool,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Cardwall/0.1".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            retry_delay_seconds: 2,
            page_size: 12,
            cache_ttl_seconds: 300,
            follow_redirects: true,
            max_redirects: 5,
        }
    }
}

/// Number of columns on the wall. Columns are created once and never
/// added or removed at runtime.
pub const COLUMN_COUNT: usize = 4;

#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub column_count: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            column_count: COLUMN_COUNT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CardwallError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Upstream returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    #[error("Feed returned no posts")]
    EmptyFeed,

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, CardwallError>;
