//! Combination rules.
//!
//! Dempster, Yager and Dubois-Prade share the conjunctive core: every pair of
//! focal sets sends the product of its masses to the intersection. They
//! differ only in what happens to pairs whose intersection is empty.
//! Averaging is a non-normative baseline that skips the core entirely.

pub mod average;
pub mod dempster;
pub mod dubois_prade;
pub mod yager;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FusionError;
use crate::frame::FocalSet;
use crate::mass::BeliefMass;

/// The available fusion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionRule {
    /// Normalized conjunctive combination; fails on total conflict.
    #[default]
    Dempster,

    /// Conflict becomes ignorance (mass on the whole frame).
    Yager,

    /// Conflict moves to the union of the disagreeing focal sets.
    DuboisPrade,

    /// Arithmetic mean of the two mass functions.
    Average,
}

impl FusionRule {
    pub const ALL: [FusionRule; 4] = [
        FusionRule::Dempster,
        FusionRule::Yager,
        FusionRule::DuboisPrade,
        FusionRule::Average,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dempster => "dempster",
            Self::Yager => "yager",
            Self::DuboisPrade => "dubois_prade",
            Self::Average => "average",
        }
    }

    /// Whether the rule can refuse to combine contradictory sources.
    pub const fn can_fail_on_conflict(&self) -> bool {
        matches!(self, Self::Dempster)
    }
}

impl fmt::Display for FusionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FusionRule {
    type Err = FusionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| FusionError::UnknownRule(s.to_string()))
    }
}

/// Tolerance for a combination of `m1` and `m2`: the looser of the two.
pub(crate) fn combined_epsilon(m1: &BeliefMass, m2: &BeliefMass) -> f64 {
    m1.epsilon().max(m2.epsilon())
}

/// Where the product of a disjoint focal-set pair goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DisjointPairs {
    Discard,
    ToUnion,
}

/// The conjunctive core shared by the normative rules.
pub(crate) fn conjunctive(
    m1: &BeliefMass,
    m2: &BeliefMass,
    disjoint: DisjointPairs,
) -> BTreeMap<FocalSet, f64> {
    let mut combined: BTreeMap<FocalSet, f64> = BTreeMap::new();

    for (set_a, mass_a) in m1 {
        for (set_b, mass_b) in m2 {
            let product = mass_a * mass_b;
            let intersection = set_a.intersection(set_b);

            if !intersection.is_empty() {
                *combined.entry(intersection).or_insert(0.0) += product;
            } else if disjoint == DisjointPairs::ToUnion {
                *combined.entry(set_a.union(set_b)).or_insert(0.0) += product;
            }
        }
    }

    combined
}
