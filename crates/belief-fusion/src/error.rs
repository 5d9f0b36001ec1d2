//! Fusion error types.
//!
//! Construction failures live beside [`BeliefMass`](crate::BeliefMass) as
//! [`ValidationError`]; everything that can go wrong when comparing or
//! combining masses is a [`FusionError`].

use thiserror::Error;

use crate::frame::Frame;
use crate::mass::ValidationError;

/// Errors raised by conflict measurement and fusion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FusionError {
    #[error("Incompatible frames of discernment: {left} vs {right}")]
    IncompatibleFrames { left: Frame, right: Frame },

    #[error(
        "Total conflict (K={conflict:.4}). Cannot use Dempster's rule. \
         Consider Yager's rule or Dubois-Prade rule instead."
    )]
    TotalConflict { conflict: f64 },

    #[error("Cannot fuse empty list of belief masses")]
    EmptyInput,

    #[error("Unknown fusion rule: {0}")]
    UnknownRule(String),

    #[error("Invalid fusion config: {0}")]
    InvalidConfig(String),

    #[error("Fused belief mass is invalid: {0}")]
    Validation(#[from] ValidationError),
}

impl FusionError {
    /// Returns true if the fused output failed re-validation.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the sources contradict each other completely. Callers
    /// can retry with a rule that redistributes conflict.
    pub const fn is_total_conflict(&self) -> bool {
        matches!(self, Self::TotalConflict { .. })
    }
}

/// Result alias for fusion operations.
pub type FusionResult<T> = Result<T, FusionError>;
