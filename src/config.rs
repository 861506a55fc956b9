use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Scan timeframe. Periods scale roughly linearly with candles-per-day so
/// every timeframe looks back over the same calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "4h")]
    FourHour,
    #[serde(rename = "1h")]
    Hourly,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown timeframe {0:?} (expected 1d, 4h or 1h)")]
pub struct ParseTimeframeError(String);

impl FromStr for Timeframe {
    type Err = ParseTimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(Timeframe::Daily),
            "4h" => Ok(Timeframe::FourHour),
            "1h" => Ok(Timeframe::Hourly),
            other => Err(ParseTimeframeError(other.to_string())),
        }
    }
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Daily => "1d",
            Timeframe::FourHour => "4h",
            Timeframe::Hourly => "1h",
        }
    }

    /// Indicator periods and thresholds for this timeframe.
    pub fn profile(&self) -> TimeframeProfile {
        match self {
            Timeframe::Daily => TimeframeProfile {
                timeframe: *self,
                conversion_period: 9,
                base_period: 26,
                span_b_period: 52,
                displacement: 26,
                macd_fast: 12,
                macd_slow: 26,
                macd_signal: 9,
                min_candles: 78,
                volume_threshold: 1_000_000.0,
            },
            Timeframe::FourHour => TimeframeProfile {
                timeframe: *self,
                conversion_period: 36,
                base_period: 104,
                span_b_period: 208,
                displacement: 104,
                macd_fast: 48,
                macd_slow: 104,
                macd_signal: 36,
                min_candles: 312,
                volume_threshold: 500_000.0,
            },
            Timeframe::Hourly => TimeframeProfile {
                timeframe: *self,
                conversion_period: 72,
                base_period: 208,
                span_b_period: 416,
                displacement: 208,
                macd_fast: 72,
                macd_slow: 156,
                macd_signal: 54,
                min_candles: 624,
                volume_threshold: 200_000.0,
            },
        }
    }
}

/// Per-timeframe indicator configuration. Immutable once built.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeframeProfile {
    pub timeframe: Timeframe,
    pub conversion_period: usize, // tenkan-sen window
    pub base_period: usize,       // kijun-sen window
    pub span_b_period: usize,     // senkou span B window
    pub displacement: usize,      // cloud projection offset (= base_period)
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub min_candles: usize,    // span_b_period + displacement
    pub volume_threshold: f64, // 24h quote volume significance floor
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub timeframe: Timeframe,
    pub max_results: usize,
    /// Overrides the profile's volume threshold when set.
    pub volume_threshold: Option<f64>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::Daily,
            max_results: 30,
            volume_threshold: None,
        }
    }
}

impl ScanConfig {
    /// Load configuration from environment variables (.env file) with defaults.
    ///
    /// Optional env vars:
    ///   SCAN_TIMEFRAME — 1d, 4h or 1h (default: 1d)
    ///   SCAN_MAX_RESULTS — shortlist cap (default: 30)
    ///   SCAN_VOLUME_THRESHOLD — overrides the per-timeframe volume floor
    ///   RUST_LOG — log level (default: info)
    pub fn load_or_default() -> Self {
        let _ = dotenv::dotenv();

        let mut config = Self::default();

        if let Ok(tf) = std::env::var("SCAN_TIMEFRAME") {
            match tf.parse() {
                Ok(tf) => config.timeframe = tf,
                Err(e) => tracing::warn!("SCAN_TIMEFRAME ignored: {e}"),
            }
        }

        if let Ok(max) = std::env::var("SCAN_MAX_RESULTS") {
            if let Ok(max) = max.parse() {
                config.max_results = max;
            }
        }

        if let Ok(vol) = std::env::var("SCAN_VOLUME_THRESHOLD") {
            if let Ok(vol) = vol.parse::<f64>() {
                config.volume_threshold = Some(vol);
            }
        }

        config
    }

    /// Effective profile for this scan, with the volume override applied.
    pub fn profile(&self) -> TimeframeProfile {
        let mut profile = self.timeframe.profile();
        if let Some(vol) = self.volume_threshold {
            profile.volume_threshold = vol;
        }
        profile
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.max_results > 0, "max_results must be positive");
        if let Some(vol) = self.volume_threshold {
            anyhow::ensure!(
                vol.is_finite() && vol >= 0.0,
                "volume threshold must be a non-negative number, got {vol}"
            );
        }
        let profile = self.profile();
        anyhow::ensure!(
            profile.min_candles == profile.span_b_period + profile.displacement,
            "min_candles must cover span B plus displacement"
        );
        Ok(())
    }
}
