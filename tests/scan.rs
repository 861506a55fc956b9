//! End-to-end scanner tests over synthetic candle series.
//!
//! Builds deterministic market scenarios (flat bases, rallies, seeded
//! random walks), runs the full pipeline — indicators → scorer →
//! classifier → ranker — and checks admission decisions and invariants.

use std::collections::HashMap;

use anyhow::Context;
use chrono::{Duration, TimeZone, Utc};

use kumoscan::config::{ScanConfig, Timeframe};
use kumoscan::models::candle::{Candle, TickerQuote};
use kumoscan::models::snapshot::BreakoutStatus;
use kumoscan::scanner::analyzer::analyze;
use kumoscan::scanner::sources::{CandleSource, Scanner, TickerSource};
use kumoscan::signals::{cloud, momentum};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Simple deterministic PRNG (LCG) for reproducible scenarios.
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    /// Returns a float in [0, 1).
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 11) as f64) / ((1u64 << 53) as f64)
    }
    /// Returns a float in [-1, 1).
    fn next_signed(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }
}

fn make_candles(closes: &[f64], volume: f64) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume,
            open_time: start + Duration::days(i as i64),
            close_time: start + Duration::days(i as i64 + 1),
        })
        .collect()
}

/// 52 flat candles anchor the displaced cloud at exactly 100, then a
/// 26-candle rally to 100.8 turns momentum and volume flow bullish.
fn breakout_series() -> Vec<Candle> {
    let mut closes = vec![100.0; 52];
    for i in 0..26 {
        closes.push(100.0 + 0.8 * (i + 1) as f64 / 26.0);
    }
    make_candles(&closes, 1_000.0)
}

// ---------------------------------------------------------------------------
// Single-symbol analysis scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_fresh_breakout_is_admitted() {
    let profile = Timeframe::Daily.profile();
    let candles = breakout_series();

    let candidate =
        analyze("ALPHA", &candles, 100.8, 2_500_000.0, &profile).expect("should be admitted");

    assert_eq!(candidate.status, BreakoutStatus::FreshBreakout);
    assert!((candidate.distance_pct - 0.8).abs() < 1e-9);
    assert!(candidate.potential >= 80, "potential {}", candidate.potential);
    assert!(candidate.momentum.macd_line > candidate.momentum.signal_line);
    assert_eq!(
        candidate.momentum.histogram,
        candidate.momentum.macd_line - candidate.momentum.signal_line
    );
    assert!(candidate.cloud.cloud_top >= candidate.cloud.cloud_bottom);
    assert_eq!(candidate.cloud.cloud_top, 100.0);
}

#[test]
fn test_thin_volume_fails_the_gate() {
    let profile = Timeframe::Daily.profile();
    let candles = breakout_series();

    // Same setup, 24h volume below the 1M daily threshold.
    assert!(analyze("ALPHA", &candles, 100.8, 900_000.0, &profile).is_none());
}

#[test]
fn test_stale_breakout_is_rejected() {
    let profile = Timeframe::Daily.profile();
    let candles = breakout_series();

    // 5% above the ceiling: too extended, regardless of the other gates.
    assert!(analyze("ALPHA", &candles, 105.0, 2_500_000.0, &profile).is_none());
}

#[test]
fn test_insufficient_history_yields_nothing() {
    let profile = Timeframe::Daily.profile();
    let candles = breakout_series();

    assert!(analyze("ALPHA", &candles[..77], 100.8, 2_500_000.0, &profile).is_none());
}

#[test]
fn test_analysis_is_deterministic() {
    let profile = Timeframe::Daily.profile();
    let candles = breakout_series();

    let first = analyze("ALPHA", &candles, 100.8, 2_500_000.0, &profile);
    let second = analyze("ALPHA", &candles, 100.8, 2_500_000.0, &profile);
    assert_eq!(first, second);
}

#[test]
fn test_candle_serde_round_trip() {
    let candles = breakout_series();
    let json = serde_json::to_string(&candles).unwrap();
    let back: Vec<Candle> = serde_json::from_str(&json).unwrap();
    assert_eq!(candles, back);
}

// ---------------------------------------------------------------------------
// Random-walk sweep: invariants hold on arbitrary series
// ---------------------------------------------------------------------------

#[test]
fn test_random_walks_never_violate_invariants() {
    let profile = Timeframe::Daily.profile();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut admitted = 0usize;
    let mut status_counts: HashMap<String, usize> = HashMap::new();

    for seed in 0..200u64 {
        let mut rng = Rng::new(seed * 7919 + 1);
        let mut close = 100.0;
        let mut candles = Vec::with_capacity(profile.min_candles + 10);
        for i in 0..profile.min_candles + 10 {
            close *= 1.0 + rng.next_signed() * 0.02;
            let spread = close * 0.01 * (rng.next_f64() + 0.2);
            candles.push(Candle {
                open: close,
                high: close + spread,
                low: close - spread,
                close,
                volume: 500.0 + rng.next_f64() * 1_000.0,
                open_time: start + Duration::days(i as i64),
                close_time: start + Duration::days(i as i64 + 1),
            });
        }
        let last_price = close * (1.0 + rng.next_signed() * 0.02);
        let volume_24h = rng.next_f64() * 3_000_000.0;

        let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
        let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

        let snapshot = cloud::cloud(&highs, &lows, &profile).expect("enough history");
        assert!(snapshot.cloud_top >= snapshot.cloud_bottom, "seed {seed}");

        let m = momentum::macd(&closes, &profile).expect("enough history");
        assert_eq!(m.histogram, m.macd_line - m.signal_line, "seed {seed}");

        if let Some(c) = analyze("RW", &candles, last_price, volume_24h, &profile) {
            admitted += 1;
            assert!(c.potential <= 100, "seed {seed}");
            match c.status {
                BreakoutStatus::FreshBreakout => assert!(c.distance_pct <= 1.0),
                BreakoutStatus::RecentBreakout => {
                    assert!(c.distance_pct > 1.0 && c.distance_pct <= 3.0)
                }
                BreakoutStatus::Ready | BreakoutStatus::InCloud => {
                    assert!(c.price >= c.cloud.cloud_bottom && c.price <= c.cloud.cloud_top)
                }
                _ => assert!(c.price < c.cloud.cloud_bottom && c.distance_pct >= -10.0),
            }
            *status_counts.entry(format!("{:?}", c.status)).or_default() += 1;
        }
    }

    println!("admitted {admitted}/200 random walks: {status_counts:?}");
}

// ---------------------------------------------------------------------------
// Scanner sweep: fault isolation and ranking
// ---------------------------------------------------------------------------

struct Fixture {
    candles: HashMap<String, Vec<Candle>>,
    tickers: HashMap<String, TickerQuote>,
}

impl CandleSource for Fixture {
    fn candles(&self, symbol: &str, _timeframe: Timeframe) -> anyhow::Result<Vec<Candle>> {
        self.candles
            .get(symbol)
            .cloned()
            .with_context(|| format!("no candles for {symbol}"))
    }
}

impl TickerSource for Fixture {
    fn ticker(&self, symbol: &str) -> anyhow::Result<TickerQuote> {
        self.tickers
            .get(symbol)
            .copied()
            .with_context(|| format!("no ticker for {symbol}"))
    }
}

fn make_fixture() -> (Vec<String>, Fixture) {
    let mut candles = HashMap::new();
    let mut tickers = HashMap::new();

    // Two clean breakouts separated by their volume tier.
    candles.insert("ALPHA".to_string(), breakout_series());
    tickers.insert(
        "ALPHA".to_string(),
        TickerQuote {
            last_price: 100.8,
            volume_24h: 4_000_000.0,
        },
    );
    candles.insert("BETA".to_string(), breakout_series());
    tickers.insert(
        "BETA".to_string(),
        TickerQuote {
            last_price: 100.8,
            volume_24h: 1_500_000.0,
        },
    );

    // GHOST has a ticker but no candle data: the source errors.
    tickers.insert(
        "GHOST".to_string(),
        TickerQuote {
            last_price: 1.0,
            volume_24h: 5_000_000.0,
        },
    );

    // THIN has too little history to analyze.
    candles.insert(
        "THIN".to_string(),
        make_candles(&vec![100.0; 30], 1_000.0),
    );
    tickers.insert(
        "THIN".to_string(),
        TickerQuote {
            last_price: 100.0,
            volume_24h: 5_000_000.0,
        },
    );

    let symbols = ["ALPHA", "BETA", "GHOST", "THIN"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    (symbols, Fixture { candles, tickers })
}

#[test]
fn test_scan_isolates_failures_and_ranks() {
    let (symbols, fixture) = make_fixture();
    let scanner = Scanner::new(ScanConfig::default());

    let results = scanner.scan(&symbols, &fixture, &fixture);

    println!(
        "scan results: {:?}",
        results
            .iter()
            .map(|c| (c.symbol.as_str(), c.potential))
            .collect::<Vec<_>>()
    );
    assert_eq!(results.len(), 2, "GHOST and THIN must be skipped, not fatal");
    assert_eq!(results[0].symbol, "ALPHA");
    assert_eq!(results[1].symbol, "BETA");
    assert!(results[0].potential > results[1].potential);
}

#[test]
fn test_scan_respects_max_results() {
    let (symbols, fixture) = make_fixture();
    let config = ScanConfig {
        max_results: 1,
        ..ScanConfig::default()
    };
    let scanner = Scanner::new(config);

    let results = scanner.scan(&symbols, &fixture, &fixture);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].symbol, "ALPHA");
}

#[test]
fn test_scan_of_empty_universe_is_empty() {
    let fixture = Fixture {
        candles: HashMap::new(),
        tickers: HashMap::new(),
    };
    let scanner = Scanner::new(ScanConfig::default());
    assert!(scanner.scan(&[], &fixture, &fixture).is_empty());
}
