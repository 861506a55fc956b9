use tracing::debug;

use crate::config::TimeframeProfile;
use crate::models::candle::Candle;
use crate::models::snapshot::BreakoutCandidate;
use crate::scanner::classifier;
use crate::signals::{cloud, momentum, scorer, volume_flow};

/// Analyze one symbol's candle series against its ticker data.
///
/// The three indicator passes are independent of each other; their
/// snapshots feed the scorer and the classifier. Returns None when the
/// symbol lacks history, any snapshot is absent, the position classifies
/// as nothing, or the admission gate fails — a failure here is local to
/// this symbol and never an error.
///
/// Pure: identical inputs produce identical results.
pub fn analyze(
    symbol: &str,
    candles: &[Candle],
    last_price: f64,
    volume_24h: f64,
    profile: &TimeframeProfile,
) -> Option<BreakoutCandidate> {
    if candles.len() < profile.min_candles {
        debug!(
            symbol,
            have = candles.len(),
            need = profile.min_candles,
            "skipping: insufficient history"
        );
        return None;
    }

    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();

    let cloud = cloud::cloud(&highs, &lows, profile)?;
    let momentum = momentum::macd(&closes, profile)?;
    let flow = volume_flow::obv(&closes, &volumes)?;

    let flow_rising = flow[flow.len() - 1] > flow[flow.len() - 2];
    let high_volume = volume_24h > profile.volume_threshold;
    let trend = volume_flow::flow_trend(&flow);

    let potential =
        scorer::breakout_potential(last_price, &cloud, &momentum, trend, volume_24h, profile);

    let classification = classifier::classify(
        last_price,
        &cloud,
        &momentum,
        flow_rising,
        high_volume,
        potential,
    )?;

    if !classification.admitted {
        debug!(
            symbol,
            status = ?classification.status,
            potential,
            "skipping: admission gate failed"
        );
        return None;
    }

    Some(BreakoutCandidate {
        symbol: symbol.to_string(),
        price: last_price,
        volume_24h,
        timeframe: profile.timeframe,
        cloud,
        momentum,
        flow_latest: flow[flow.len() - 1],
        status: classification.status,
        label: classification.status.label().to_string(),
        distance_pct: classification.distance_pct,
        potential,
    })
}
