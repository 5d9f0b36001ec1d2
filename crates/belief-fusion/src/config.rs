//! Fusion configuration.

use serde::{Deserialize, Serialize};

use crate::error::{FusionError, FusionResult};
use crate::rules::FusionRule;

/// Conflict level at which Dempster's rule starts emitting advisories.
pub const DEFAULT_HIGH_CONFLICT_THRESHOLD: f64 = 0.9;

/// Tunables for a [`Fuser`](crate::Fuser).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Conflict `K` at or above which Dempster's rule reports high conflict
    pub high_conflict_threshold: f64,

    /// Rule used when the caller does not name one
    pub default_rule: FusionRule,
}

impl FusionConfig {
    /// Check that the threshold lies in `(0, 1]`.
    pub fn validate(&self) -> FusionResult<()> {
        let threshold = self.high_conflict_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(FusionError::InvalidConfig(format!(
                "high_conflict_threshold must be in (0, 1], got {}",
                threshold
            )));
        }
        Ok(())
    }
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            high_conflict_threshold: DEFAULT_HIGH_CONFLICT_THRESHOLD,
            default_rule: FusionRule::Dempster,
        }
    }
}
