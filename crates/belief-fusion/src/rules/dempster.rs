//! Dempster's rule of combination.
//!
//! Conflicting mass is discarded and the agreement is renormalized by
//! `1 - K`. Undefined when the sources contradict each other completely.

use crate::conflict::calculate_conflict;
use crate::error::{FusionError, FusionResult};
use crate::fusion::Advisory;
use crate::mass::BeliefMass;

use super::{combined_epsilon, conjunctive, DisjointPairs};

/// Combine two masses with Dempster's rule.
///
/// A high-conflict advisory is pushed onto `advisories` (and logged) when
/// `K >= high_conflict_threshold`; the combination still completes.
///
/// # Errors
///
/// - `FusionError::IncompatibleFrames` if the frames differ.
/// - `FusionError::TotalConflict` if `K >= 1 - ε`, with `ε` the looser of the
///   two operands' tolerances.
pub fn fuse(
    m1: &BeliefMass,
    m2: &BeliefMass,
    high_conflict_threshold: f64,
    advisories: &mut Vec<Advisory>,
) -> FusionResult<BeliefMass> {
    let conflict = calculate_conflict(m1, m2)?;
    let epsilon = combined_epsilon(m1, m2);

    if conflict >= 1.0 - epsilon {
        return Err(FusionError::TotalConflict { conflict });
    }

    if conflict >= high_conflict_threshold {
        tracing::warn!(
            conflict,
            threshold = high_conflict_threshold,
            "High conflict, Dempster result may be unreliable"
        );
        advisories.push(Advisory::HighConflict {
            conflict,
            threshold: high_conflict_threshold,
        });
    }

    let normalization = 1.0 - conflict;
    let normalized = conjunctive(m1, m2, DisjointPairs::Discard)
        .into_iter()
        .map(|(focal_set, mass)| (focal_set, mass / normalization))
        .collect();

    Ok(BeliefMass::from_parts(
        normalized,
        Some(m1.frame().clone()),
        epsilon,
    )?)
}
