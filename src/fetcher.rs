use crate::types::{CardwallError, FeedPage, FetchConfig, Result};
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

struct CachedPage {
    page: FeedPage,
    fetched_at: DateTime<Utc>,
}

/// Retrieves one page of posts from the upstream REST feed.
///
/// The last successful page is held for `cache_ttl_seconds`; a call inside
/// that window returns the cached page without touching the network, which is
/// the only staleness policy the wall has.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
    feed_url: Url,
    cache: Option<CachedPage>,
}

impl Fetcher {
    pub fn new(feed_url: &str, config: FetchConfig) -> Result<Self> {
        let feed_url = Url::parse(feed_url)?;
        let redirects = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(redirects)
            .build()?;

        Ok(Self {
            client,
            config,
            feed_url,
            cache: None,
        })
    }

    /// Fetch the current page of posts, serving from cache when still fresh.
    pub async fn fetch_page(&mut self) -> Result<FeedPage> {
        if let Some(cached) = &self.cache {
            let age = Utc::now() - cached.fetched_at;
            if age < ChronoDuration::seconds(self.config.cache_ttl_seconds) {
                debug!(
                    "Serving cached page ({} posts, {}s old)",
                    cached.page.posts.len(),
                    age.num_seconds()
                );
                return Ok(cached.page.clone());
            }
        }

        let page = self.fetch_fresh().await?;
        self.cache = Some(CachedPage {
            page: page.clone(),
            fetched_at: Utc::now(),
        });
        Ok(page)
    }

    /// Drop the cached page so the next fetch goes upstream.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    async fn fetch_fresh(&self) -> Result<FeedPage> {
        let mut url = self.feed_url.clone();
        url.query_pairs_mut()
            .append_pair("limit", &self.config.page_size.to_string());

        debug!("Fetching feed page: {}", url);

        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: Duration::from_secs(self.config.retry_delay_seconds),
            initial_interval: Duration::from_secs(self.config.retry_delay_seconds),
            max_interval: Duration::from_secs(self.config.retry_delay_seconds * 32),
            multiplier: 2.0,
            max_elapsed_time: Some(Duration::from_secs(self.config.retry_delay_seconds * 60)),
            ..Default::default()
        };

        let mut last_error = CardwallError::General("No fetch attempted".to_string());

        for attempt in 0..=self.config.max_retries {
            match self.fetch_once(&url).await {
                Ok(page) => {
                    info!("Fetched feed page with {} posts", page.posts.len());
                    return Ok(page);
                }
                Err(e) => {
                    warn!("Attempt {} failed for {}: {}", attempt + 1, url, e);
                    last_error = e;
                    if attempt < self.config.max_retries {
                        if let Some(delay) = backoff.next_backoff() {
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                    }
                }
            }
        }

        Err(last_error)
    }

    async fn fetch_once(&self, url: &Url) -> Result<FeedPage> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CardwallError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let page: FeedPage = serde_json::from_str(&body)?;

        if page.posts.is_empty() {
            return Err(CardwallError::EmptyFeed);
        }

        Ok(page)
    }

    pub fn update_config(&mut self, config: FetchConfig) {
        self.config = config;
        self.cache = None;
    }
}
