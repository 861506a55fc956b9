use serde::{Deserialize, Serialize};

use crate::config::Timeframe;

/// Ichimoku cloud state derived from one candle series.
///
/// The conversion and base lines describe present price structure; the two
/// leading spans are anchored `displacement` periods in the past, so
/// `cloud_top`/`cloud_bottom` are the boundaries governing current price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloudSnapshot {
    pub conversion_line: f64, // tenkan-sen
    pub base_line: f64,       // kijun-sen
    pub leading_span_a: f64,
    pub leading_span_b: f64,
    pub cloud_top: f64,
    pub cloud_bottom: f64,
}

impl CloudSnapshot {
    /// Signed distance from the cloud ceiling, as a percentage of the
    /// ceiling. Positive above the cloud, negative below.
    /// None when the ceiling is non-positive.
    pub fn distance_from_top_pct(&self, price: f64) -> Option<f64> {
        if self.cloud_top <= 0.0 {
            return None;
        }
        Some((price - self.cloud_top) / self.cloud_top * 100.0)
    }

    /// Where price sits inside the cloud, 0.0 at the floor to 1.0 at the
    /// ceiling. A zero-height cloud with price on it counts as the ceiling.
    pub fn position_in_cloud(&self, price: f64) -> f64 {
        let height = self.cloud_top - self.cloud_bottom;
        if height > 0.0 {
            (price - self.cloud_bottom) / height
        } else {
            1.0
        }
    }
}

/// MACD state for the most recent candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumSnapshot {
    pub macd_line: f64,
    pub signal_line: f64,
    pub histogram: f64, // macd_line - signal_line
    pub bullish_crossover: bool,
}

impl MomentumSnapshot {
    /// Momentum counts as bullish on a fresh crossover or while the MACD
    /// line holds above the signal line with a positive histogram.
    pub fn is_bullish(&self) -> bool {
        self.bullish_crossover || (self.macd_line > self.signal_line && self.histogram > 0.0)
    }
}

/// Grading of the trailing On-Balance-Volume slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowTrend {
    StrongUp,
    Up,
    Neutral,
    Down,
}

/// Mutually-exclusive breakout stage, ordered here from highest ranking
/// priority to lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreakoutStatus {
    Imminent,
    Ready,
    FreshBreakout,
    RecentBreakout,
    Approaching,
    Building,
    InCloud,
}

impl BreakoutStatus {
    /// Ranking priority. Higher sorts first.
    pub fn priority(&self) -> u8 {
        match self {
            BreakoutStatus::Imminent => 5,
            BreakoutStatus::Ready => 4,
            BreakoutStatus::FreshBreakout => 3,
            BreakoutStatus::RecentBreakout => 2,
            BreakoutStatus::Approaching => 1,
            BreakoutStatus::Building => 0,
            BreakoutStatus::InCloud => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BreakoutStatus::Imminent => "Breakout imminent just below the cloud",
            BreakoutStatus::Ready => "Primed at the cloud ceiling",
            BreakoutStatus::FreshBreakout => "Fresh breakout above the cloud",
            BreakoutStatus::RecentBreakout => "Holding a recent breakout",
            BreakoutStatus::Approaching => "Approaching the cloud from below",
            BreakoutStatus::Building => "Building pressure under the cloud",
            BreakoutStatus::InCloud => "Climbing inside the cloud",
        }
    }
}

/// One admitted scan result. Built fresh per symbol, never shared or
/// mutated; ownership passes to the caller's result collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakoutCandidate {
    pub symbol: String,
    pub price: f64,
    pub volume_24h: f64,
    pub timeframe: Timeframe,
    pub cloud: CloudSnapshot,
    pub momentum: MomentumSnapshot,
    pub flow_latest: f64, // last cumulative OBV value
    pub status: BreakoutStatus,
    pub label: String,
    pub distance_pct: f64,  // signed distance from the cloud ceiling
    pub potential: u8,      // 0-100
}
