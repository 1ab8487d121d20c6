//! Temporal clustering test shared by the fan-in and fan-out detectors.

use chrono::{DateTime, Duration, Utc};

use crate::graph::Transfer;

/// Return true iff at least one pair of consecutive timestamps (sorted
/// ascending) is within `window_hours` of each other. Fewer than two
/// entries is never clustered.
pub fn is_clustered(transfers: &[Transfer], window_hours: i64) -> bool {
    if transfers.len() < 2 {
        return false;
    }

    let mut timestamps: Vec<DateTime<Utc>> = transfers.iter().map(|(_, ts)| *ts).collect();
    timestamps.sort();

    let window = Duration::hours(window_hours);
    timestamps
        .windows(2)
        .any(|pair| pair[1] - pair[0] <= window)
}
