// Source: https://api.exchange.coinbase.com/products/{product}/book?level=2
// Each level is ["price", "size", num_orders]; price and size are decimal strings.
use serde_json::Value;

#[derive(Debug, serde::Deserialize)]
pub struct CoinbaseBook {
    #[serde(default)]
    pub bids: Vec<Value>,
    #[serde(default)]
    pub asks: Vec<Value>,
    #[serde(default)]
    pub sequence: Option<u64>,
}
