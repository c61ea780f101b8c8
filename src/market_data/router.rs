// Router wires configured venues -> aggregator -> fill walk
use tracing::{info, warn};

use crate::config::Settings;
use crate::engine::fill::{simulate_buy, simulate_sell};
use crate::engine::types::{CombinedBook, FillResult};
use crate::error::FetchError;
use crate::market_data::adapters::{CoinbaseAdapter, GeminiAdapter, SnapshotProvider, VenueHttp};
use crate::market_data::aggregator::BookAggregator;
use crate::market_data::rate_limiter::RateLimiter;

/// Both sides of one estimate plus the book they were walked against.
#[derive(Debug, Clone)]
pub struct CostEstimate {
    pub buy: FillResult,
    pub sell: FillResult,
    pub book: CombinedBook,
}

/// One provider per enabled venue, each with its own limiter.
pub fn build_providers(settings: &Settings) -> Result<Vec<Box<dyn SnapshotProvider>>, FetchError> {
    let http = VenueHttp::new(settings.request_timeout())?;
    let mut providers: Vec<Box<dyn SnapshotProvider>> = Vec::new();

    if settings.coinbase.enabled {
        providers.push(Box::new(CoinbaseAdapter::new(
            &settings.coinbase.base_url,
            &settings.coinbase.market,
            http.clone(),
            RateLimiter::with_cooldown(settings.cooldown()),
        )));
    }
    if settings.gemini.enabled {
        providers.push(Box::new(GeminiAdapter::new(
            &settings.gemini.base_url,
            &settings.gemini.market,
            http,
            RateLimiter::with_cooldown(settings.cooldown()),
        )));
    }
    Ok(providers)
}

/// Walk an already combined book on both sides.
pub fn estimate(book: CombinedBook, qty: f64) -> CostEstimate {
    let buy = simulate_buy(&book.asks, qty);
    let sell = simulate_sell(&book.bids, qty);
    CostEstimate { buy, sell, book }
}

/// Fetch every venue once, combine, and walk both sides for `qty`.
pub async fn run_cycle(
    providers: &[Box<dyn SnapshotProvider>],
    aggregator: &BookAggregator,
    qty: f64,
) -> CostEstimate {
    let book = aggregator.combine(providers).await;
    if book.fresh_venues() == 0 {
        warn!("No venue returned fresh data - estimates will be zero");
    }

    let est = estimate(book, qty);
    for fill in [&est.buy, &est.sell] {
        if !fill.is_complete() {
            warn!(
                side = ?fill.side,
                requested = fill.requested,
                filled = fill.filled,
                "Insufficient visible liquidity - estimate covers filled quantity only"
            );
        }
    }
    info!(qty, buy = est.buy.notional, sell = est.sell.notional, "Estimate complete");
    est
}
