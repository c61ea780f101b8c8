// Gemini v1 public book snapshot

use serde_json::Value;
use tracing::instrument;

use super::gemini_types::GeminiBook;
use super::{FetchOutcome, SnapshotProvider, VenueHttp};
use crate::engine::types::{OrderBook, PriceLevel};
use crate::error::FetchError;
use crate::market_data::normaliser::Normaliser;
use crate::market_data::rate_limiter::RateLimiter;

pub const DEFAULT_BASE_URL: &str = "https://api.gemini.com";
pub const DEFAULT_SYMBOL: &str = "BTCUSD";

pub struct GeminiAdapter {
    pub symbol: String,   // e.g. "BTCUSD"
    pub book_url: String, // "{base}/v1/book/{symbol}"
    http: VenueHttp,
    limiter: RateLimiter,
    normaliser: Normaliser,
}

impl GeminiAdapter {
    pub fn new(base_url: &str, symbol: &str, http: VenueHttp, limiter: RateLimiter) -> Self {
        Self {
            symbol: symbol.to_string(),
            book_url: format!("{}/v1/book/{}", base_url.trim_end_matches('/'), symbol),
            http,
            limiter,
            normaliser: Normaliser::new("gemini"),
        }
    }

    async fn fetch_book(&self) -> Result<OrderBook, FetchError> {
        let raw: GeminiBook = self.http.get_json(&self.book_url).await?;
        Ok(self.norm_book(&raw))
    }

    pub fn norm_book(&self, raw: &GeminiBook) -> OrderBook {
        OrderBook {
            bids: self.normaliser.side(&raw.bids, Self::norm_level),
            asks: self.normaliser.side(&raw.asks, Self::norm_level),
        }
    }

    fn norm_level(norm: &Normaliser, entry: &Value) -> Option<PriceLevel> {
        norm.level(entry.get("price")?, entry.get("amount")?)
    }
}

#[async_trait::async_trait]
impl SnapshotProvider for GeminiAdapter {
    fn venue(&self) -> &'static str {
        "gemini"
    }

    #[instrument(level = "debug", skip(self), fields(venue = "gemini"))]
    async fn fetch_snapshot(&self) -> FetchOutcome {
        if !self.limiter.allow() {
            return FetchOutcome::RateLimited;
        }
        self.fetch_book().await.into()
    }
}
