// Market data module entrypoint
pub mod adapters;      // venue-specific snapshot providers (Coinbase, Gemini)
pub mod normaliser;    // converts wire values -> PriceLevel
pub mod rate_limiter;  // single-winner cooldown gate per venue
pub mod aggregator;    // concurrent fan-out + concatenation of venue books
pub mod router;        // wires venues -> aggregator -> fill walk
