use crate::fetcher::Fetcher;
use crate::types::{CardwallError, FetchConfig, Post, Result};
use async_trait::async_trait;
use tracing::debug;

/// Seam between the wall and whatever supplies its posts.
///
/// The wall only ever sees a complete item list or a failure, never partial
/// data; presentation of fetch failures belongs to the caller.
#[async_trait]
pub trait FeedProvider: Send + Sync {
    /// Unique identifier for this source.
    fn source_id(&self) -> String;

    /// Fetch the current list of posts.
    async fn fetch(&mut self) -> Result<Vec<Post>>;

    /// Recommended polling interval for this source.
    fn poll_interval_ms(&self) -> u64;
}

/// Production provider: one REST endpoint, fetched through the caching
/// [`Fetcher`].
pub struct RestFeed {
    url: String,
    fetcher: Fetcher,
    poll_interval_ms: u64,
}

impl RestFeed {
    pub fn new(url: &str, config: FetchConfig) -> Result<Self> {
        // Poll no faster than the cache goes stale; anything quicker would
        // only ever be served from cache.
        let poll_interval_ms = (config.cache_ttl_seconds.max(1) as u64) * 1000;
        let fetcher = Fetcher::new(url, config)?;
        Ok(Self {
            url: url.to_string(),
            fetcher,
            poll_interval_ms,
        })
    }
}

/// Mock provider for development and testing: replays a scripted sequence of
/// fetch outcomes, then keeps repeating the last one.
pub struct MockFeed {
    name: String,
    script: Vec<Result<Vec<Post>>>,
    cursor: usize,
}

impl MockFeed {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            script: Vec::new(),
            cursor: 0,
        }
    }

    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        self.script.push(Ok(posts));
        self
    }

    pub fn with_failure(mut self, error: CardwallError) -> Self {
        self.script.push(Err(error));
        self
    }
}

#[async_trait]
impl FeedProvider for MockFeed {
    fn source_id(&self) -> String {
        format!("mock_{}", self.name)
    }

    async fn fetch(&mut self) -> Result<Vec<Post>> {
        let index = self.cursor.min(self.script.len().saturating_sub(1));
        self.cursor += 1;
        match self.script.get(index) {
            Some(Ok(posts)) => Ok(posts.clone()),
            Some(Err(e)) => Err(CardwallError::General(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    fn poll_interval_ms(&self) -> u64 {
        0
    }
}

#[async_trait]
impl FeedProvider for RestFeed {
    fn source_id(&self) -> String {
        format!("rest_{}", self.url)
    }

    async fn fetch(&mut self) -> Result<Vec<Post>> {
        let page = self.fetcher.fetch_page().await?;
        debug!("Provider {} delivered {} posts", self.source_id(), page.posts.len());
        Ok(page.posts)
    }

    fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms
    }
}
