use cardwall::{BoardConfig, FeedProvider, FetchConfig, RestFeed, Wall};
use std::env;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let feed_url =
        env::var("FEED_URL").unwrap_or_else(|_| "https://dummyjson.com/posts".to_string());

    info!("Starting cardwall against feed: {}", feed_url);

    let mut provider = RestFeed::new(&feed_url, FetchConfig::default())?;
    let mut wall = Wall::new(&BoardConfig::default());

    match provider.fetch().await {
        Ok(posts) => {
            info!("Fetched {} posts", posts.len());
            wall.on_items_fetched(posts);
        }
        Err(e) => {
            // Leave the wall as-is; an empty board is still a valid board.
            error!("Feed fetch failed: {}", e);
        }
    }

    for (column_id, posts) in wall.columns() {
        info!("{}: {} cards", column_id, posts.len());
        for post in posts {
            info!("  [{}] {}", post.id, post.title);
        }
    }

    Ok(())
}
