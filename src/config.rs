//! Harness configuration.

use serde::{Deserialize, Serialize};

use crate::error::{OccError, Result};

/// Repetition and checkpoint settings for one benchmark run.
///
/// Input and output locations are not part of this struct: the harness is
/// handed a matrix (or a path) and a [`crate::sink::TimingSink`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Timed repetitions per method on the full matrix.
    pub full_runs: usize,
    /// Timed repetitions per method at each scaling checkpoint.
    pub scale_runs: usize,
    /// Number of fractional width steps for the scaling experiment.
    /// Zero disables it.
    pub checkpoints: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            full_runs: 20,
            scale_runs: 10,
            checkpoints: 6,
        }
    }
}

impl HarnessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.full_runs == 0 {
            return Err(OccError::InvalidConfig {
                reason: "full_runs must be at least 1".to_string(),
            });
        }
        if self.scale_runs == 0 && self.checkpoints > 0 {
            return Err(OccError::InvalidConfig {
                reason: "scale_runs must be at least 1 when checkpoints are requested".to_string(),
            });
        }
        Ok(())
    }
}
