use crate::models::snapshot::FlowTrend;

/// Cumulative On-Balance-Volume series, one value per input candle.
///
/// Starts at the first candle's volume; each up-close adds that candle's
/// volume, each down-close subtracts it, a flat close carries the running
/// value unchanged. None on mismatched inputs or fewer than two samples.
pub fn obv(closes: &[f64], volumes: &[f64]) -> Option<Vec<f64>> {
    if closes.len() != volumes.len() || closes.len() < 2 {
        return None;
    }

    let mut flow = Vec::with_capacity(closes.len());
    flow.push(volumes[0]);
    for i in 1..closes.len() {
        let prev = flow[i - 1];
        let next = if closes[i] > closes[i - 1] {
            prev + volumes[i]
        } else if closes[i] < closes[i - 1] {
            prev - volumes[i]
        } else {
            prev
        };
        flow.push(next);
    }
    Some(flow)
}

/// Grade the trailing five flow samples.
///
/// Counts rising transitions and rises exceeding 2% of the prior value's
/// magnitude (OBV runs negative, so the percentage is taken against the
/// magnitude; a zero prior never counts as strong).
pub fn flow_trend(flow: &[f64]) -> FlowTrend {
    if flow.len() < 5 {
        return FlowTrend::Neutral;
    }

    let recent = &flow[flow.len() - 5..];
    let mut up_count = 0;
    let mut strong_count = 0;
    for pair in recent.windows(2) {
        let rise = pair[1] - pair[0];
        if rise > 0.0 {
            up_count += 1;
            if pair[0] != 0.0 && rise > pair[0].abs() * 0.02 {
                strong_count += 1;
            }
        }
    }

    if up_count >= 4 && strong_count >= 2 {
        FlowTrend::StrongUp
    } else if up_count >= 3 {
        FlowTrend::Up
    } else if up_count >= 2 {
        FlowTrend::Neutral
    } else {
        FlowTrend::Down
    }
}
