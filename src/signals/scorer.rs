use crate::config::TimeframeProfile;
use crate::models::snapshot::{CloudSnapshot, FlowTrend, MomentumSnapshot};

/// Fuse cloud position, momentum, volume flow and traded volume into a
/// 0-100 breakout potential.
///
/// Components and caps:
///   - Cloud distance:  35
///   - MACD momentum:   25
///   - OBV flow trend:  20
///   - 24h volume:      10
///   - Line ordering:   10
pub fn breakout_potential(
    price: f64,
    cloud: &CloudSnapshot,
    momentum: &MomentumSnapshot,
    trend: FlowTrend,
    volume_24h: f64,
    profile: &TimeframeProfile,
) -> u8 {
    let mut score = 0u32;

    // 1. Cloud distance (max 35). Peaks just around the ceiling, tapers in
    // both directions, floor tier for stale breakouts.
    if let Some(dist) = cloud.distance_from_top_pct(price) {
        score += match dist {
            d if (-0.5..=1.0).contains(&d) => 35,
            d if d > 3.0 => 10,
            d if d > 1.0 => 25,
            d if d >= -2.0 => 28,
            d if d >= -5.0 => 20,
            d if d >= -10.0 => 12,
            _ => 5,
        };
    }

    // 2. MACD momentum (max 25).
    score += if momentum.bullish_crossover {
        25
    } else if momentum.macd_line > momentum.signal_line && momentum.histogram > 0.0 {
        20
    } else if momentum.histogram > 0.0 {
        12
    } else if momentum.macd_line > momentum.signal_line {
        8
    } else {
        0
    };

    // 3. OBV flow trend (max 20).
    score += match trend {
        FlowTrend::StrongUp => 20,
        FlowTrend::Up => 14,
        FlowTrend::Neutral => 6,
        FlowTrend::Down => 0,
    };

    // 4. 24h traded volume (max 10), tiered by threshold multiples.
    let threshold = profile.volume_threshold;
    score += if volume_24h > threshold * 3.0 {
        10
    } else if volume_24h > threshold * 2.0 {
        8
    } else if volume_24h > threshold {
        6
    } else if volume_24h > threshold * 0.7 {
        3
    } else {
        0
    };

    // 5. Line ordering (max 10).
    if price > cloud.conversion_line {
        score += 3;
    }
    if price > cloud.base_line {
        score += 4;
    }
    if cloud.conversion_line > cloud.base_line {
        score += 3;
    }

    score.min(100) as u8
}
