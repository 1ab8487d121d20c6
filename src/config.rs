//! Detector tunables.

/// Configuration for the four pattern detectors.
///
/// Defaults reproduce the baseline contract in the crate's detection
/// specification; changing them changes detector sensitivity but never
/// the scoring tables or the admission rules in [`crate::scoring`].
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub min_cycle_length: usize,
    pub max_cycle_length: usize,
    pub fan_threshold: usize,
    pub temporal_window_hours: i64,
    pub shell_min_chain_length: usize,
    pub shell_max_transactions: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_cycle_length: 3,
            max_cycle_length: 5,
            fan_threshold: 10,
            temporal_window_hours: 72,
            shell_min_chain_length: 3,
            shell_max_transactions: 3,
        }
    }
}
