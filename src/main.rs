use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, warn};

use lobx_cost::config::Settings;
use lobx_cost::market_data::aggregator::BookAggregator;
use lobx_cost::market_data::router::{build_providers, run_cycle};
use lobx_cost::telemetry;

/// Estimate the cost of a market buy and the revenue of a market sell
/// across the combined Coinbase + Gemini books.
#[derive(Parser, Debug)]
#[command(name = "lobx-cost", version)]
struct Cli {
    /// Quantity of the asset to buy and to sell
    #[arg(long, default_value_t = 10.0, value_parser = parse_qty, allow_negative_numbers = true)]
    qty: f64,

    /// Asset label used in the output (defaults to the configured asset)
    #[arg(long)]
    asset: Option<String>,

    /// Optional settings file (TOML/JSON/YAML)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_qty(s: &str) -> Result<f64, String> {
    let qty: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{s}` is not a valid quantity"))?;
    if !qty.is_finite() {
        return Err(format!("quantity must be finite, got `{s}`"));
    }
    Ok(qty)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // load .env

    // exits non-zero with a usage message on a malformed --qty
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    telemetry::init_tracing(&settings.log_filter);
    debug!(?settings, "Loaded settings");

    if cli.qty <= 0.0 {
        warn!(qty = cli.qty, "Non-positive quantity - both estimates will be zero");
    }

    let asset = cli.asset.unwrap_or_else(|| settings.asset.clone());
    let providers = build_providers(&settings).context("building venue HTTP client")?;
    let aggregator = BookAggregator::new(settings.request_timeout());

    let est = run_cycle(&providers, &aggregator, cli.qty).await;

    println!("To buy {} {}: ${}", cli.qty, asset, est.buy.notional);
    println!("To sell {} {}: ${}", cli.qty, asset, est.sell.notional);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qty_defaults_to_ten() {
        let cli = Cli::try_parse_from(["lobx-cost"]).unwrap();
        assert_eq!(cli.qty, 10.0);
        assert!(cli.asset.is_none());
    }

    #[test]
    fn test_qty_flag() {
        let cli = Cli::try_parse_from(["lobx-cost", "--qty", "0.5"]).unwrap();
        assert_eq!(cli.qty, 0.5);
        let cli = Cli::try_parse_from(["lobx-cost", "--qty", "-1"]).unwrap();
        assert_eq!(cli.qty, -1.0);
    }

    #[test]
    fn test_malformed_qty_fails_fast() {
        assert!(Cli::try_parse_from(["lobx-cost", "--qty", "ten"]).is_err());
        assert!(Cli::try_parse_from(["lobx-cost", "--qty", "inf"]).is_err());
        assert!(Cli::try_parse_from(["lobx-cost", "--qty"]).is_err());
    }
}
