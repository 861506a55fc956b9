use crate::config::TimeframeProfile;
use crate::models::snapshot::MomentumSnapshot;

/// Exponential moving average over the whole input.
///
/// Seeded with the first raw sample rather than a leading SMA. This is a
/// preserved behavioral contract: warm-up values differ from the textbook
/// form, and historical scan results depend on it.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    if values.is_empty() || period == 0 {
        return None;
    }
    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = values[0];
    for &value in &values[1..] {
        ema = value * k + ema * (1.0 - k);
    }
    Some(ema)
}

/// MACD snapshot for the most recent close.
///
/// The signal line is an EMA over the MACD history, one sample per prefix
/// of `closes` starting at index `slow - 1`, each defined by its own full
/// prefix. Because every prefix seeds from the same first close, one
/// running pair of fast/slow EMAs reproduces the per-prefix values exactly.
pub fn macd(closes: &[f64], profile: &TimeframeProfile) -> Option<MomentumSnapshot> {
    if profile.macd_fast == 0 || profile.macd_slow == 0 || profile.macd_signal == 0 {
        return None;
    }
    if closes.len() < profile.macd_slow {
        return None;
    }

    let k_fast = 2.0 / (profile.macd_fast as f64 + 1.0);
    let k_slow = 2.0 / (profile.macd_slow as f64 + 1.0);

    let mut ema_fast = closes[0];
    let mut ema_slow = closes[0];
    let mut history = Vec::with_capacity(closes.len() - profile.macd_slow + 1);

    for (i, &close) in closes.iter().enumerate() {
        if i > 0 {
            ema_fast = close * k_fast + ema_fast * (1.0 - k_fast);
            ema_slow = close * k_slow + ema_slow * (1.0 - k_slow);
        }
        if i + 1 >= profile.macd_slow {
            history.push(ema_fast - ema_slow);
        }
    }

    let macd_line = *history.last()?;
    let signal_line = ema(&history, profile.macd_signal)?;

    // A crossover means the previous MACD sample still sat at or below the
    // previous signal. With a single history sample there is no previous
    // pair to compare, so no crossover can be claimed.
    let n = history.len();
    let bullish_crossover = n >= 2
        && macd_line > signal_line
        && ema(&history[..n - 1], profile.macd_signal)
            .map_or(false, |prev_signal| history[n - 2] <= prev_signal);

    Some(MomentumSnapshot {
        macd_line,
        signal_line,
        histogram: macd_line - signal_line,
        bullish_crossover,
    })
}
