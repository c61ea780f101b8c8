// Coinbase Exchange level-2 REST snapshot

use serde_json::Value;
use tracing::{debug, instrument};

use super::coinbase_types::CoinbaseBook;
use super::{FetchOutcome, SnapshotProvider, VenueHttp};
use crate::engine::types::{OrderBook, PriceLevel};
use crate::error::FetchError;
use crate::market_data::normaliser::Normaliser;
use crate::market_data::rate_limiter::RateLimiter;

pub const DEFAULT_BASE_URL: &str = "https://api.exchange.coinbase.com";
pub const DEFAULT_PRODUCT: &str = "BTC-USD";

pub struct CoinbaseAdapter {
    pub product: String,  // e.g. "BTC-USD"
    pub book_url: String, // "{base}/products/{product}/book?level=2"
    http: VenueHttp,
    limiter: RateLimiter,
    normaliser: Normaliser,
}

impl CoinbaseAdapter {
    pub fn new(base_url: &str, product: &str, http: VenueHttp, limiter: RateLimiter) -> Self {
        Self {
            product: product.to_string(),
            book_url: format!("{}/products/{}/book?level=2", base_url.trim_end_matches('/'), product),
            http,
            limiter,
            normaliser: Normaliser::new("coinbase"),
        }
    }

    async fn fetch_book(&self) -> Result<OrderBook, FetchError> {
        let raw: CoinbaseBook = self.http.get_json(&self.book_url).await?;
        debug!(product = %self.product, sequence = ?raw.sequence, "Decoded coinbase book");
        Ok(self.norm_book(&raw))
    }

    pub fn norm_book(&self, raw: &CoinbaseBook) -> OrderBook {
        OrderBook {
            bids: self.normaliser.side(&raw.bids, Self::norm_level),
            asks: self.normaliser.side(&raw.asks, Self::norm_level),
        }
    }

    // ["price", "size", num_orders]
    fn norm_level(norm: &Normaliser, entry: &Value) -> Option<PriceLevel> {
        norm.level(entry.get(0)?, entry.get(1)?)
    }
}

#[async_trait::async_trait]
impl SnapshotProvider for CoinbaseAdapter {
    fn venue(&self) -> &'static str {
        "coinbase"
    }

    #[instrument(level = "debug", skip(self), fields(venue = "coinbase"))]
    async fn fetch_snapshot(&self) -> FetchOutcome {
        if !self.limiter.allow() {
            return FetchOutcome::RateLimited;
        }
        self.fetch_book().await.into()
    }
}
