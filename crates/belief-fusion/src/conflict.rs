//! Conflict between two sources of evidence.
//!
//! `K = Σ m₁(A) · m₂(B)` over all focal-set pairs with `A ∩ B = ∅`.

use crate::error::{FusionError, FusionResult};
use crate::mass::BeliefMass;

/// Fail unless both masses share the same frame.
pub(crate) fn ensure_same_frame(m1: &BeliefMass, m2: &BeliefMass) -> FusionResult<()> {
    if m1.frame() != m2.frame() {
        return Err(FusionError::IncompatibleFrames {
            left: m1.frame().clone(),
            right: m2.frame().clone(),
        });
    }
    Ok(())
}

/// Total mass the two sources assign to mutually exclusive focal sets.
///
/// # Errors
///
/// `FusionError::IncompatibleFrames` if the frames differ.
pub fn calculate_conflict(m1: &BeliefMass, m2: &BeliefMass) -> FusionResult<f64> {
    ensure_same_frame(m1, m2)?;

    let mut conflict = 0.0;
    for (set_a, mass_a) in m1 {
        for (set_b, mass_b) in m2 {
            if set_a.is_disjoint(set_b) {
                conflict += mass_a * mass_b;
            }
        }
    }

    Ok(conflict)
}
