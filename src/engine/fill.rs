use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use tracing::{debug, instrument, trace, warn};

use crate::engine::types::{FillResult, PriceLevel, Side, FILL_EPSILON};

/// Cost of buying `qty` by lifting asks cheapest first.
#[instrument(level = "debug", skip(asks), fields(levels = asks.len()))]
pub fn simulate_buy(asks: &[PriceLevel], qty: f64) -> FillResult {
    let mut sorted = asks.to_vec();
    // stable: equal prices keep their concatenation order
    sorted.sort_by_key(|level| OrderedFloat(level.price));
    walk(Side::BUY, &sorted, qty)
}

/// Revenue from selling `qty` into bids, highest first.
#[instrument(level = "debug", skip(bids), fields(levels = bids.len()))]
pub fn simulate_sell(bids: &[PriceLevel], qty: f64) -> FillResult {
    let mut sorted = bids.to_vec();
    sorted.sort_by_key(|level| Reverse(OrderedFloat(level.price)));
    walk(Side::SELL, &sorted, qty)
}

// Greedy walk over levels that are already in best-price-first order.
fn walk(side: Side, levels: &[PriceLevel], qty: f64) -> FillResult {
    let mut result = FillResult { side, requested: qty, filled: 0.0, notional: 0.0 };

    // also rejects NaN
    if !(qty > 0.0) {
        debug!(?side, qty, "Non-positive quantity, nothing to walk");
        return result;
    }

    let mut remaining_qty = qty;
    // residue below this is float noise, not missing liquidity
    let done_below = qty * FILL_EPSILON;
    for level in levels {
        let take = remaining_qty.min(level.quantity);
        result.notional += take * level.price;
        result.filled += take;
        remaining_qty -= take;

        trace!(?side, price = level.price, qty = take, remaining = remaining_qty, "Consumed level");

        if remaining_qty <= done_below { break; }
    }

    if remaining_qty > done_below {
        warn!(
            ?side,
            requested = qty,
            filled = result.filled,
            shortfall = remaining_qty,
            "Walk exhausted visible liquidity - partial fill"
        );
    } else {
        debug!(?side, qty, notional = result.notional, "Walk fully filled");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn levels(raw: &[(f64, f64)]) -> Vec<PriceLevel> {
        raw.iter().map(|&(p, q)| PriceLevel::new(p, q)).collect()
    }

    #[test]
    fn test_buy_takes_cheapest_first() {
        let asks = levels(&[(101.0, 5.0), (100.0, 5.0)]);
        let result = simulate_buy(&asks, 5.0);
        assert_eq!(result.notional, 500.0);
        assert_eq!(result.filled, 5.0);
        assert!(result.is_complete());
    }

    #[test]
    fn test_sell_takes_highest_first() {
        let bids = levels(&[(99.0, 5.0), (100.0, 5.0)]);
        let result = simulate_sell(&bids, 5.0);
        assert_eq!(result.notional, 500.0);
        assert_eq!(result.average_price(), Some(100.0));
    }

    #[test]
    fn test_walk_spans_levels() {
        let asks = levels(&[(102.0, 1.0), (100.0, 2.0), (101.0, 2.0)]);
        let result = simulate_buy(&asks, 4.0);
        // 2 @ 100 + 2 @ 101
        assert_eq!(result.notional, 402.0);
        assert_eq!(result.filled, 4.0);
    }

    #[test]
    fn test_partial_liquidity_returns_what_existed() {
        let asks = levels(&[(100.0, 3.0)]);
        let result = simulate_buy(&asks, 10.0);
        assert_eq!(result.notional, 300.0);
        assert_eq!(result.filled, 3.0);
        assert!(!result.is_complete());
        assert_eq!(result.shortfall(), 7.0);
    }

    #[test]
    fn test_exact_cover_by_fractional_levels_is_complete() {
        let mut asks: Vec<PriceLevel> = (0..10).map(|i| PriceLevel::new(100.0 + i as f64, 0.1)).collect();
        asks.push(PriceLevel::new(500.0, 1.0));

        let result = simulate_buy(&asks, 1.0);

        assert!(result.is_complete());
        assert_eq!(result.shortfall(), 0.0);
        // the 500 level is never touched
        assert!((result.notional - 104.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_and_negative_quantity() {
        let asks = levels(&[(100.0, 3.0)]);
        assert_eq!(simulate_buy(&asks, 0.0).notional, 0.0);
        assert_eq!(simulate_buy(&asks, -2.0).notional, 0.0);
        assert_eq!(simulate_sell(&asks, -2.0).filled, 0.0);
        assert_eq!(simulate_buy(&asks, f64::NAN).notional, 0.0);
    }

    #[test]
    fn test_empty_side_is_distinguishable_from_free_fill() {
        let result = simulate_buy(&[], 1.0);
        assert_eq!(result.notional, 0.0);
        assert_eq!(result.filled, 0.0);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_input_slice_is_untouched() {
        let asks = levels(&[(101.0, 1.0), (100.0, 1.0)]);
        simulate_buy(&asks, 1.0);
        assert_eq!(asks[0].price, 101.0);
    }

    proptest! {
        #[test]
        fn prop_filled_bounded_by_request_and_depth(
            raw in prop::collection::vec((1.0f64..1_000.0, 0.001f64..50.0), 0..40),
            qty in 0.0f64..500.0,
        ) {
            let asks = levels(&raw);
            let depth: f64 = asks.iter().map(|l| l.quantity).sum();
            let result = simulate_buy(&asks, qty);
            prop_assert!(result.filled <= qty + 1e-9);
            prop_assert!(result.filled <= depth + 1e-9);
            prop_assert!(result.notional >= 0.0);
        }

        #[test]
        fn prop_average_price_within_book_range(
            raw in prop::collection::vec((1.0f64..1_000.0, 0.001f64..50.0), 1..40),
            qty in 0.001f64..500.0,
        ) {
            let bids = levels(&raw);
            let lo = bids.iter().map(|l| l.price).fold(f64::INFINITY, f64::min);
            let hi = bids.iter().map(|l| l.price).fold(f64::NEG_INFINITY, f64::max);
            let result = simulate_sell(&bids, qty);
            if let Some(avg) = result.average_price() {
                prop_assert!(avg >= lo * (1.0 - 1e-9));
                prop_assert!(avg <= hi * (1.0 + 1e-9));
            }
        }

        #[test]
        fn prop_buy_never_cheaper_than_best_ask(
            raw in prop::collection::vec((1.0f64..1_000.0, 0.001f64..50.0), 1..40),
            qty in 0.001f64..500.0,
        ) {
            let asks = levels(&raw);
            let best = asks.iter().map(|l| l.price).fold(f64::INFINITY, f64::min);
            let result = simulate_buy(&asks, qty);
            prop_assert!(result.notional + 1e-6 >= result.filled * best);
        }
    }
}
