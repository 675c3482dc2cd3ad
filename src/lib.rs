pub mod board;
pub mod fetcher;
pub mod provider;
pub mod types;
pub mod wall;

pub use board::{least_loaded, Board, Column};
pub use fetcher::Fetcher;
pub use provider::{FeedProvider, MockFeed, RestFeed};
pub use types::*;
pub use wall::Wall;
