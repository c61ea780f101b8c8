// Shared trait + outcome for venue snapshot providers

use crate::engine::types::{OrderBook, VenueStatus};
use crate::error::FetchError;

/// Result of one snapshot attempt against a venue.
#[derive(Debug)]
pub enum FetchOutcome {
    Fresh(OrderBook),
    // cooldown not elapsed, no request was sent
    RateLimited,
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn status(&self) -> VenueStatus {
        match self {
            FetchOutcome::Fresh(_) => VenueStatus::Fresh,
            FetchOutcome::RateLimited => VenueStatus::RateLimited,
            FetchOutcome::Failed(_) => VenueStatus::Failed,
        }
    }

    /// Collapse to the plain book contract: anything but fresh data is an empty book.
    pub fn into_book(self) -> OrderBook {
        match self {
            FetchOutcome::Fresh(book) => book,
            FetchOutcome::RateLimited | FetchOutcome::Failed(_) => OrderBook::empty(),
        }
    }
}

impl From<Result<OrderBook, FetchError>> for FetchOutcome {
    fn from(result: Result<OrderBook, FetchError>) -> Self {
        match result {
            Ok(book) => FetchOutcome::Fresh(book),
            Err(e) => FetchOutcome::Failed(e),
        }
    }
}

#[async_trait::async_trait]
pub trait SnapshotProvider: Send + Sync {
    fn venue(&self) -> &'static str;

    async fn fetch_snapshot(&self) -> FetchOutcome;

    // Rate limiting, transport and parse failures all look like an empty book here.
    async fn fetch(&self) -> OrderBook {
        self.fetch_snapshot().await.into_book()
    }
}

pub mod http;
pub mod coinbase;
pub mod coinbase_types;
pub mod gemini;
pub mod gemini_types;

pub use coinbase::CoinbaseAdapter;
pub use gemini::GeminiAdapter;
pub use http::VenueHttp;
