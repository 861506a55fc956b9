use crate::config::TimeframeProfile;
use crate::models::snapshot::CloudSnapshot;

/// Midpoint of the highest high and lowest low over the trailing `period`
/// elements. The shared primitive behind every Ichimoku line.
///
/// Returns None on mismatched inputs or when fewer than `period` samples
/// are available.
pub fn line(highs: &[f64], lows: &[f64], period: usize) -> Option<f64> {
    if period == 0 || highs.len() != lows.len() || highs.len() < period {
        return None;
    }
    let start = highs.len() - period;
    let highest = highs[start..].iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = lows[start..].iter().copied().fold(f64::INFINITY, f64::min);
    Some((highest + lowest) / 2.0)
}

/// Build the Ichimoku cloud snapshot for the most recent candle.
///
/// The conversion and base lines read the full current series. The cloud
/// boundary acting on current price is anchored in the past: the spans are
/// recomputed on the prefix ending `displacement` candles ago, because the
/// cloud is projected forward by that many periods. A prefix too short for
/// a line's period falls back to the full-series line.
pub fn cloud(highs: &[f64], lows: &[f64], profile: &TimeframeProfile) -> Option<CloudSnapshot> {
    if highs.len() != lows.len() || highs.len() < profile.min_candles {
        return None;
    }

    let conversion_line = line(highs, lows, profile.conversion_period)?;
    let base_line = line(highs, lows, profile.base_period)?;

    // min_candles >= span_b_period + displacement keeps this prefix long
    // enough for every line; the fallbacks only fire on degenerate profiles.
    let past = highs.len() - profile.displacement;
    let past_highs = &highs[..past];
    let past_lows = &lows[..past];

    let past_conversion =
        line(past_highs, past_lows, profile.conversion_period).unwrap_or(conversion_line);
    let past_base = line(past_highs, past_lows, profile.base_period).unwrap_or(base_line);

    let leading_span_a = (past_conversion + past_base) / 2.0;
    let leading_span_b = line(past_highs, past_lows, profile.span_b_period)
        .or_else(|| line(highs, lows, profile.span_b_period))?;

    Some(CloudSnapshot {
        conversion_line,
        base_line,
        leading_span_a,
        leading_span_b,
        cloud_top: leading_span_a.max(leading_span_b),
        cloud_bottom: leading_span_a.min(leading_span_b),
    })
}
