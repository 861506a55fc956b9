use crate::models::snapshot::BreakoutCandidate;

/// Order admitted candidates: status priority first, breakout potential as
/// the tiebreak. The sort is stable, so equal candidates keep their scan
/// order.
pub fn rank(candidates: &mut Vec<BreakoutCandidate>) {
    candidates.sort_by(|a, b| {
        b.status
            .priority()
            .cmp(&a.status.priority())
            .then(b.potential.cmp(&a.potential))
    });
}

/// Rank and truncate to the configured shortlist size.
pub fn rank_top(mut candidates: Vec<BreakoutCandidate>, max_results: usize) -> Vec<BreakoutCandidate> {
    rank(&mut candidates);
    candidates.truncate(max_results);
    candidates
}
