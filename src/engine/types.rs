#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    BUY,
    SELL
}

// One (price, quantity) entry as published by a venue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceLevel {
    pub price: f64,
    pub quantity: f64,
}

impl PriceLevel {
    pub fn new(price: f64, quantity: f64) -> Self {
        Self { price, quantity }
    }

    /// A level is usable only when both price and quantity are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.price.is_finite() && self.price > 0.0 && self.quantity.is_finite() && self.quantity > 0.0
    }
}

// Normalized snapshot from a single venue. Level order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBook {
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

impl OrderBook {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

// What happened to one venue during a combine cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueStatus { Fresh, RateLimited, Failed }

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueReport {
    pub venue: &'static str,
    pub status: VenueStatus,
    pub bid_levels: usize,
    pub ask_levels: usize,
}

/// Concatenation of every venue's book for one request cycle.
///
/// Levels from different venues are never merged, even at identical prices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedBook {
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
    pub venues: Vec<VenueReport>,
}

impl CombinedBook {
    pub fn fresh_venues(&self) -> usize {
        self.venues.iter().filter(|v| v.status == VenueStatus::Fresh).count()
    }
}

/// Relative slack when deciding a walk covered the request; summed level sizes
/// rarely land on the requested quantity bit for bit.
pub const FILL_EPSILON: f64 = 1e-9;

/// Outcome of walking one side of a book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillResult {
    pub side: Side,
    pub requested: f64,
    pub filled: f64,
    pub notional: f64,
}

impl FillResult {
    pub fn is_complete(&self) -> bool {
        self.requested <= 0.0 || self.filled >= self.requested * (1.0 - FILL_EPSILON)
    }

    pub fn shortfall(&self) -> f64 {
        if self.is_complete() {
            return 0.0;
        }
        self.requested - self.filled
    }

    pub fn average_price(&self) -> Option<f64> {
        if self.filled > 0.0 {
            Some(self.notional / self.filled)
        } else {
            None
        }
    }
}
