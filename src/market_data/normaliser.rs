// Convert wire values into PriceLevels.
// Venues quote as decimal strings ("64123.45") or bare JSON numbers; both are accepted.

use serde_json::Value;
use tracing::debug;

use crate::engine::types::PriceLevel;

pub struct Normaliser {
    pub venue: &'static str,
}

impl Normaliser {
    pub fn new(venue: &'static str) -> Self {
        Self { venue }
    }

    pub fn parse_decimal(&self, v: &Value) -> Option<f64> {
        let parsed = match v {
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Number(n) => n.as_f64(),
            _ => None,
        };
        parsed.filter(|x| x.is_finite())
    }

    pub fn level(&self, price: &Value, quantity: &Value) -> Option<PriceLevel> {
        let level = PriceLevel::new(self.parse_decimal(price)?, self.parse_decimal(quantity)?);
        level.is_valid().then_some(level)
    }

    // Keep every entry that maps cleanly; drop the rest one by one.
    pub fn side<T>(&self, raw: &[T], map: impl Fn(&Self, &T) -> Option<PriceLevel>) -> Vec<PriceLevel> {
        let levels: Vec<PriceLevel> = raw.iter().filter_map(|entry| map(self, entry)).collect();
        let dropped = raw.len() - levels.len();
        if dropped > 0 {
            debug!(venue = self.venue, dropped, kept = levels.len(), "Dropped malformed levels");
            metrics::counter!("lobx_levels_dropped_total", "venue" => self.venue).increment(dropped as u64);
        }
        levels
    }
}
