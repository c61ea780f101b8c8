// Source: https://api.gemini.com/v1/book/{symbol}
// Each level is {"price": "...", "amount": "...", "timestamp": "..."}.
use serde_json::Value;

#[derive(Debug, serde::Deserialize)]
pub struct GeminiBook {
    #[serde(default)]
    pub bids: Vec<Value>,
    #[serde(default)]
    pub asks: Vec<Value>,
}
