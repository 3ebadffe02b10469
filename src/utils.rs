//! Assorted helpers for the benchmark harness.

use serde::{Deserialize, Serialize};

/// Column widths for the scaling experiment.
///
/// Takes `floor(full_width * k / num_points)` for `k = 1..=num_points`, then
/// sorts, deduplicates and drops zero widths. Small `full_width` values can
/// therefore yield fewer than `num_points` checkpoints; the last checkpoint
/// is always `full_width` when `num_points > 0` and `full_width > 0`.
pub fn width_checkpoints(full_width: usize, num_points: usize) -> Vec<usize> {
    if num_points == 0 {
        return Vec::new();
    }
    let mut widths: Vec<usize> = (1..=num_points)
        .map(|k| (full_width as u128 * k as u128 / num_points as u128) as usize)
        .filter(|&w| w > 0)
        .collect();
    widths.sort_unstable();
    widths.dedup();
    widths
}

/// Mean and sample standard deviation of a set of timings, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingStats {
    pub mean: f64,
    /// Sample standard deviation (`ddof = 1`); zero for fewer than two samples.
    pub std: f64,
}

impl TimingStats {
    /// Returns `None` for an empty slice.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let std = if samples.len() > 1 {
            let ss = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
            (ss / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        Some(Self { mean, std })
    }
}
