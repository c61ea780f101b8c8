//! Layered settings: built-in defaults, then an optional file, then `LOBX_*`
//! environment variables (nested keys use `__`, e.g. `LOBX_GEMINI__MARKET`).

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::market_data::adapters::{coinbase, gemini};

#[derive(Debug, Clone, Deserialize)]
pub struct VenueSettings {
    pub enabled: bool,
    pub base_url: String,
    /// Venue-native market name, e.g. `BTC-USD` on Coinbase, `BTCUSD` on Gemini.
    pub market: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub asset: String,
    pub cooldown_ms: u64,
    pub request_timeout_ms: u64,
    pub log_filter: String,
    pub coinbase: VenueSettings,
    pub gemini: VenueSettings,
}

// `LOBX_` then `__` between nested keys
fn env_source() -> Environment {
    Environment::with_prefix("LOBX")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, env_source())
    }

    pub fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("asset", "BTC")?
            .set_default("cooldown_ms", 2_000_i64)?
            .set_default("request_timeout_ms", 5_000_i64)?
            .set_default("log_filter", "warn,lobx_cost=info")?
            .set_default("coinbase.enabled", true)?
            .set_default("coinbase.base_url", coinbase::DEFAULT_BASE_URL)?
            .set_default("coinbase.market", coinbase::DEFAULT_PRODUCT)?
            .set_default("gemini.enabled", true)?
            .set_default("gemini.base_url", gemini::DEFAULT_BASE_URL)?
            .set_default("gemini.market", gemini::DEFAULT_SYMBOL)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(env);

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "request_timeout_ms",
                reason: "must be greater than zero".into(),
            });
        }
        if self.asset.trim().is_empty() {
            return Err(ConfigError::Invalid { key: "asset", reason: "must not be empty".into() });
        }
        for (key, venue) in [("coinbase.base_url", &self.coinbase), ("gemini.base_url", &self.gemini)] {
            if venue.enabled && !venue.base_url.starts_with("http") {
                return Err(ConfigError::Invalid {
                    key,
                    reason: format!("expected an http(s) URL, got `{}`", venue.base_url),
                });
            }
        }
        Ok(())
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
