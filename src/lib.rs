pub mod config;
pub mod engine;
pub mod error;
pub mod market_data;
pub mod telemetry;

pub use engine::types::{CombinedBook, FillResult, OrderBook, PriceLevel, Side};
pub use market_data::adapters::{FetchOutcome, SnapshotProvider};
pub use market_data::aggregator::BookAggregator;
pub use market_data::rate_limiter::RateLimiter;
