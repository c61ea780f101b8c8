// Engine module entrypoint
pub mod types;  // price levels, books, fill results
pub mod fill;   // greedy best-price-first walk over one side

pub use fill::{simulate_buy, simulate_sell};
