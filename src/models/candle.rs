use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV time bucket. Series are ordered oldest→newest and candles are
/// never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Last traded price and 24-hour traded volume for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickerQuote {
    pub last_price: f64,
    pub volume_24h: f64,
}
