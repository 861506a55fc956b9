#![allow(dead_code)]

mod config;
mod models;
mod scanner;
mod signals;

use anyhow::Context;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::{ScanConfig, Timeframe};
use crate::models::candle::{Candle, TickerQuote};
use crate::scanner::sources::{CandleSource, Scanner, TickerSource};

/// On-disk market snapshot: candle history plus ticker data per symbol,
/// captured by whatever fetch tooling sits outside this crate.
#[derive(Debug, Deserialize)]
struct MarketSnapshot {
    timeframe: Option<Timeframe>,
    symbols: Vec<SymbolData>,
}

#[derive(Debug, Deserialize)]
struct SymbolData {
    symbol: String,
    ticker: TickerQuote,
    candles: Vec<Candle>,
}

impl MarketSnapshot {
    fn symbol_names(&self) -> Vec<String> {
        self.symbols.iter().map(|s| s.symbol.clone()).collect()
    }

    fn find(&self, symbol: &str) -> anyhow::Result<&SymbolData> {
        self.symbols
            .iter()
            .find(|s| s.symbol == symbol)
            .with_context(|| format!("no snapshot data for {symbol}"))
    }
}

impl CandleSource for MarketSnapshot {
    fn candles(&self, symbol: &str, _timeframe: Timeframe) -> anyhow::Result<Vec<Candle>> {
        Ok(self.find(symbol)?.candles.clone())
    }
}

impl TickerSource for MarketSnapshot {
    fn ticker(&self, symbol: &str) -> anyhow::Result<TickerQuote> {
        Ok(self.find(symbol)?.ticker)
    }
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("================================================");
    info!("  KUMOSCAN — Ichimoku cloud breakout scanner");
    info!("================================================");

    let mut config = ScanConfig::load_or_default();

    let path = std::env::args()
        .nth(1)
        .context("usage: kumoscan <snapshot.json>")?;
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading market snapshot {path}"))?;
    let snapshot: MarketSnapshot =
        serde_json::from_str(&raw).with_context(|| format!("parsing market snapshot {path}"))?;

    // A snapshot is captured for one timeframe; when it says which, that
    // wins over the environment.
    if let Some(tf) = snapshot.timeframe {
        if tf != config.timeframe {
            warn!(
                "snapshot timeframe {} overrides configured {}",
                tf.as_str(),
                config.timeframe.as_str()
            );
            config.timeframe = tf;
        }
    }
    config.validate()?;

    info!(
        timeframe = config.timeframe.as_str(),
        symbols = snapshot.symbols.len(),
        max_results = config.max_results,
        "starting scan"
    );

    let scanner = Scanner::new(config);
    let results = scanner.scan(&snapshot.symbol_names(), &snapshot, &snapshot);

    if results.is_empty() {
        info!("no symbols met the breakout criteria");
        return Ok(());
    }

    for (i, candidate) in results.iter().enumerate() {
        info!(
            "#{:<2} {:<12} {:<18} price={:<12} dist={:>+6.2}% potential={:>3} vol24h={:.0}",
            i + 1,
            candidate.symbol,
            format!("{:?}", candidate.status),
            candidate.price,
            candidate.distance_pct,
            candidate.potential,
            candidate.volume_24h
        );
    }

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
