use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::engine::types::{CombinedBook, VenueReport};
use crate::error::FetchError;
use crate::market_data::adapters::http::DEFAULT_TIMEOUT;
use crate::market_data::adapters::{FetchOutcome, SnapshotProvider};

/// Fans out to every venue concurrently and concatenates what comes back.
pub struct BookAggregator {
    /// Upper bound on a single venue's fetch, on top of any transport timeout.
    pub timeout: Duration,
}

impl BookAggregator {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub async fn combine(&self, providers: &[Box<dyn SnapshotProvider>]) -> CombinedBook {
        let outcomes = join_all(providers.iter().map(|p| self.fetch_bounded(p.as_ref()))).await;
        let combined = combine_outcomes(outcomes);
        info!(
            venues = combined.venues.len(),
            fresh = combined.fresh_venues(),
            bids = combined.bids.len(),
            asks = combined.asks.len(),
            "Combined venue books"
        );
        combined
    }

    async fn fetch_bounded(&self, provider: &dyn SnapshotProvider) -> (&'static str, FetchOutcome) {
        let outcome = match tokio::time::timeout(self.timeout, provider.fetch_snapshot()).await {
            Ok(outcome) => outcome,
            Err(_) => FetchOutcome::Failed(FetchError::Timeout(self.timeout)),
        };
        (provider.venue(), outcome)
    }
}

impl Default for BookAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

/// Concatenate venue outcomes in the order given. Same-price levels stay separate.
pub fn combine_outcomes(outcomes: Vec<(&'static str, FetchOutcome)>) -> CombinedBook {
    let mut combined = CombinedBook::default();

    for (venue, outcome) in outcomes {
        let status = outcome.status();
        match &outcome {
            FetchOutcome::Fresh(book) => {
                debug!(venue, bids = book.bids.len(), asks = book.asks.len(), "Fresh snapshot");
            }
            FetchOutcome::RateLimited => {
                warn!(venue, "Venue rate limited - contributes no levels this cycle");
            }
            FetchOutcome::Failed(e) => {
                warn!(venue, kind = e.kind(), error = %e, "Venue fetch failed - contributes no levels");
            }
        }
        let outcome_label = match &outcome {
            FetchOutcome::Fresh(_) => "fresh",
            FetchOutcome::RateLimited => "rate_limited",
            FetchOutcome::Failed(e) => e.kind(),
        };
        metrics::counter!("lobx_venue_fetch_total", "venue" => venue, "outcome" => outcome_label).increment(1);

        let book = outcome.into_book();
        combined.venues.push(VenueReport {
            venue,
            status,
            bid_levels: book.bids.len(),
            ask_levels: book.asks.len(),
        });
        combined.bids.extend(book.bids);
        combined.asks.extend(book.asks);
    }

    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{OrderBook, PriceLevel, VenueStatus};

    struct FixedVenue {
        name: &'static str,
        book: OrderBook,
        delay: Duration,
    }

    #[async_trait::async_trait]
    impl SnapshotProvider for FixedVenue {
        fn venue(&self) -> &'static str {
            self.name
        }

        async fn fetch_snapshot(&self) -> FetchOutcome {
            tokio::time::sleep(self.delay).await;
            FetchOutcome::Fresh(self.book.clone())
        }
    }

    fn venue(name: &'static str, asks: &[(f64, f64)]) -> Box<dyn SnapshotProvider> {
        Box::new(FixedVenue {
            name,
            book: OrderBook {
                bids: vec![],
                asks: asks.iter().map(|&(p, q)| PriceLevel::new(p, q)).collect(),
            },
            delay: Duration::ZERO,
        })
    }

    #[tokio::test]
    async fn test_same_price_levels_are_not_merged() {
        let providers = vec![venue("a", &[(100.0, 1.0)]), venue("b", &[(100.0, 1.0)])];
        let combined = BookAggregator::default().combine(&providers).await;
        assert_eq!(combined.asks, vec![PriceLevel::new(100.0, 1.0), PriceLevel::new(100.0, 1.0)]);
        assert_eq!(combined.fresh_venues(), 2);
    }

    #[tokio::test]
    async fn test_slow_venue_times_out_as_empty() {
        let slow: Box<dyn SnapshotProvider> = Box::new(FixedVenue {
            name: "slow",
            book: OrderBook { bids: vec![], asks: vec![PriceLevel::new(1.0, 1.0)] },
            delay: Duration::from_secs(30),
        });
        let providers = vec![venue("fast", &[(100.0, 2.0)]), slow];

        let combined = BookAggregator::new(Duration::from_millis(50)).combine(&providers).await;
        assert_eq!(combined.asks, vec![PriceLevel::new(100.0, 2.0)]);
        assert_eq!(combined.venues[1].venue, "slow");
        assert_eq!(combined.venues[1].status, VenueStatus::Failed);
        assert_eq!(combined.venues[1].ask_levels, 0);
    }

    #[test]
    fn test_combine_outcomes_collapses_failures() {
        let combined = combine_outcomes(vec![
            ("limited", FetchOutcome::RateLimited),
            ("down", FetchOutcome::Failed(FetchError::Status { status: 503 })),
        ]);
        assert!(combined.bids.is_empty());
        assert!(combined.asks.is_empty());
        let statuses: Vec<_> = combined.venues.iter().map(|v| v.status).collect();
        assert_eq!(statuses, vec![VenueStatus::RateLimited, VenueStatus::Failed]);
    }

    #[tokio::test]
    async fn test_no_providers() {
        let combined = BookAggregator::default().combine(&[]).await;
        assert_eq!(combined, CombinedBook::default());
    }
}
