//! Yager's rule of combination.
//!
//! Agreement is kept unnormalized and the conflict mass is assigned to the
//! whole frame, i.e. turned into ignorance. Never fails on conflict.

use crate::conflict::calculate_conflict;
use crate::error::FusionResult;
use crate::mass::BeliefMass;

use super::{combined_epsilon, conjunctive, DisjointPairs};

/// Combine two masses with Yager's rule.
pub fn fuse(m1: &BeliefMass, m2: &BeliefMass) -> FusionResult<BeliefMass> {
    let conflict = calculate_conflict(m1, m2)?;
    let mut combined = conjunctive(m1, m2, DisjointPairs::Discard);

    if conflict > 0.0 {
        *combined.entry(m1.frame().clone()).or_insert(0.0) += conflict;
    }

    Ok(BeliefMass::from_parts(
        combined,
        Some(m1.frame().clone()),
        combined_epsilon(m1, m2),
    )?)
}
