/// Overall-progress percentages that earn a celebration, in ascending order.
pub const MILESTONE_THRESHOLDS: [u8; 6] = [10, 25, 50, 75, 90, 100];

/// Lowest threshold `m` with `previous < m <= current`.
///
/// Without a previous value there is no baseline, so nothing is crossed.
pub fn crossed_milestone(previous: Option<f64>, current: f64) -> Option<u8> {
    let previous = previous?;

    MILESTONE_THRESHOLDS.into_iter().find(|m| {
        let m = f64::from(*m);
        previous < m && m <= current
    })
}

/// First threshold strictly above `current`.
pub fn next_milestone(current: f64) -> Option<u8> {
    MILESTONE_THRESHOLDS
        .into_iter()
        .find(|m| f64::from(*m) > current)
}
