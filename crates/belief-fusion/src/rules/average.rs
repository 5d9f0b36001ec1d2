//! Mass averaging.
//!
//! Not a Dempster-Shafer combination rule; useful as a baseline when
//! comparing the normative rules.

use std::collections::BTreeMap;

use crate::conflict::ensure_same_frame;
use crate::error::FusionResult;
use crate::frame::FocalSet;
use crate::mass::BeliefMass;

use super::combined_epsilon;

/// Average two masses focal set by focal set, treating absence as zero.
pub fn fuse(m1: &BeliefMass, m2: &BeliefMass) -> FusionResult<BeliefMass> {
    ensure_same_frame(m1, m2)?;

    let averaged: BTreeMap<FocalSet, f64> = m1
        .focal_sets()
        .chain(m2.focal_sets())
        .map(|focal_set| {
            let mean = (m1.mass(focal_set) + m2.mass(focal_set)) / 2.0;
            (focal_set.clone(), mean)
        })
        .collect();

    Ok(BeliefMass::from_parts(
        averaged,
        Some(m1.frame().clone()),
        combined_epsilon(m1, m2),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::LabelSet;

    #[test]
    fn test_basic_average() {
        let m1 = BeliefMass::new([(LabelSet::from(["A"]), 0.8), (LabelSet::from(["B"]), 0.2)])
            .unwrap();
        let m2 = BeliefMass::new([(LabelSet::from(["A"]), 0.6), (LabelSet::from(["B"]), 0.4)])
            .unwrap();

        let result = fuse(&m1, &m2).unwrap();

        assert!((result.mass("A") - 0.7).abs() < 1e-6);
        assert!((result.mass("B") - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_absent_focal_sets_count_as_zero() {
        let theta = LabelSet::from(["A", "B"]);
        let m1 = BeliefMass::with_frame([(LabelSet::from(["A"]), 1.0)], theta.clone()).unwrap();
        let m2 = BeliefMass::with_frame([(theta.clone(), 1.0)], theta.clone()).unwrap();

        let result = fuse(&m1, &m2).unwrap();

        assert_eq!(result.len(), 2);
        assert!((result.mass("A") - 0.5).abs() < 1e-6);
        assert!((result.mass(&theta) - 0.5).abs() < 1e-6);
    }
}
