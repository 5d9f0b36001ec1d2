//! Dubois-Prade rule of combination.
//!
//! Each disjoint pair `(A, B)` hands its product to `A ∪ B`: when two sources
//! disagree, at least one of them is right.

use crate::conflict::ensure_same_frame;
use crate::error::FusionResult;
use crate::mass::BeliefMass;

use super::{combined_epsilon, conjunctive, DisjointPairs};

/// Combine two masses with the Dubois-Prade rule.
pub fn fuse(m1: &BeliefMass, m2: &BeliefMass) -> FusionResult<BeliefMass> {
    ensure_same_frame(m1, m2)?;

    let combined = conjunctive(m1, m2, DisjointPairs::ToUnion);

    Ok(BeliefMass::from_parts(
        combined,
        Some(m1.frame().clone()),
        combined_epsilon(m1, m2),
    )?)
}
