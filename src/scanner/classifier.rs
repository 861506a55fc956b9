use crate::models::snapshot::{BreakoutStatus, CloudSnapshot, MomentumSnapshot};

/// Outcome of the position state machine for one symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub status: BreakoutStatus,
    pub admitted: bool,
    pub distance_pct: f64,
}

/// Map (price, cloud, momentum, flow, volume) to a breakout stage.
///
/// Stages are mutually exclusive and evaluated top-down: above the cloud,
/// inside it, then below it, each band keyed on the distance from the
/// ceiling. Stale breakouts (more than 3% above) and deep laggards (more
/// than 10% below, or low in the cloud) classify as nothing. Every named
/// stage shares the base gate — bullish MACD, rising flow, significant
/// volume — with the stage-specific extras from the decision table.
pub fn classify(
    price: f64,
    cloud: &CloudSnapshot,
    momentum: &MomentumSnapshot,
    flow_rising: bool,
    high_volume: bool,
    potential: u8,
) -> Option<Classification> {
    let distance_pct = cloud.distance_from_top_pct(price)?;
    let gate = momentum.is_bullish() && flow_rising && high_volume;

    let (status, admitted) = if price > cloud.cloud_top {
        if distance_pct <= 1.0 {
            (BreakoutStatus::FreshBreakout, gate)
        } else if distance_pct <= 3.0 {
            (BreakoutStatus::RecentBreakout, gate)
        } else {
            return None; // stale breakout
        }
    } else if price >= cloud.cloud_bottom {
        let position = cloud.position_in_cloud(price);
        if position >= 0.7 {
            (BreakoutStatus::Ready, gate && price > cloud.base_line)
        } else if position >= 0.4 {
            (BreakoutStatus::InCloud, gate && potential > 75)
        } else {
            return None;
        }
    } else if distance_pct >= -2.0 {
        (
            BreakoutStatus::Imminent,
            gate && price > cloud.conversion_line && potential > 80,
        )
    } else if distance_pct >= -5.0 {
        (
            BreakoutStatus::Approaching,
            gate && price > cloud.conversion_line && potential > 70,
        )
    } else if distance_pct >= -10.0 {
        (BreakoutStatus::Building, gate && potential > 85)
    } else {
        return None;
    };

    Some(Classification {
        status,
        admitted,
        distance_pct,
    })
}
