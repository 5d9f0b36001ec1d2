//! Fusion dispatcher.
//!
//! The [`Fuser`] checks frame compatibility, routes to the selected rule and
//! folds lists of sources left to right. Advisories travel beside the result
//! rather than through the error path.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::config::FusionConfig;
use crate::conflict::{calculate_conflict, ensure_same_frame};
use crate::error::{FusionError, FusionResult};
use crate::mass::BeliefMass;
use crate::rules::{self, FusionRule};

/// A non-fatal observation made while fusing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Advisory {
    /// Dempster's rule ran on strongly contradictory sources.
    HighConflict { conflict: f64, threshold: f64 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighConflict { conflict, .. } => write!(
                f,
                "High conflict (K={:.4}). Result may be unreliable. \
                 Consider examining sources or using alternative fusion rule.",
                conflict
            ),
        }
    }
}

/// The result of one pairwise fusion.
#[derive(Debug, Clone, PartialEq)]
pub struct FusionOutcome {
    /// The combined belief mass
    pub mass: BeliefMass,

    /// Rule that produced it
    pub rule: FusionRule,

    /// Conflict `K` between the two inputs
    pub conflict: f64,

    /// Advisories raised along the way (empty in the common case)
    pub advisories: Vec<Advisory>,
}

impl FusionOutcome {
    pub fn has_advisories(&self) -> bool {
        !self.advisories.is_empty()
    }
}

/// Routes fusion requests to the combination rules.
#[derive(Debug, Clone, Default)]
pub struct Fuser {
    config: FusionConfig,
}

impl Fuser {
    /// Create a fuser after validating its configuration.
    pub fn new(config: FusionConfig) -> FusionResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Fuse two belief masses with `rule`.
    ///
    /// # Errors
    ///
    /// - `FusionError::IncompatibleFrames` if the frames differ, before any
    ///   rule runs.
    /// - `FusionError::TotalConflict` from Dempster's rule.
    pub fn fuse(
        &self,
        m1: &BeliefMass,
        m2: &BeliefMass,
        rule: FusionRule,
    ) -> FusionResult<FusionOutcome> {
        ensure_same_frame(m1, m2)?;

        let conflict = calculate_conflict(m1, m2)?;
        tracing::debug!(
            rule = %rule,
            left_focal_sets = m1.len(),
            right_focal_sets = m2.len(),
            conflict,
            "Fusing belief masses"
        );

        let mut advisories = Vec::new();
        let mass = match rule {
            FusionRule::Dempster => rules::dempster::fuse(
                m1,
                m2,
                self.config.high_conflict_threshold,
                &mut advisories,
            )?,
            FusionRule::Yager => rules::yager::fuse(m1, m2)?,
            FusionRule::DuboisPrade => rules::dubois_prade::fuse(m1, m2)?,
            FusionRule::Average => rules::average::fuse(m1, m2)?,
        };

        Ok(FusionOutcome {
            mass,
            rule,
            conflict,
            advisories,
        })
    }

    /// Fuse two belief masses with the configured default rule.
    pub fn fuse_default(&self, m1: &BeliefMass, m2: &BeliefMass) -> FusionResult<FusionOutcome> {
        self.fuse(m1, m2, self.config.default_rule)
    }

    /// Fold `masses` left to right with `rule`.
    ///
    /// A single source is returned as-is, borrowed and not re-validated.
    ///
    /// # Errors
    ///
    /// `FusionError::EmptyInput` for an empty slice, otherwise whatever the
    /// first failing pairwise fusion returns.
    pub fn fuse_all<'a>(
        &self,
        masses: &'a [BeliefMass],
        rule: FusionRule,
    ) -> FusionResult<Cow<'a, BeliefMass>> {
        let (first, rest) = masses.split_first().ok_or(FusionError::EmptyInput)?;

        let mut result = Cow::Borrowed(first);
        for (step, next) in rest.iter().enumerate() {
            tracing::trace!(step = step + 1, sources = masses.len(), rule = %rule, "Fold step");
            result = Cow::Owned(self.fuse(&result, next, rule)?.mass);
        }

        Ok(result)
    }

    /// Fold `masses` with the configured default rule.
    pub fn fuse_all_default<'a>(
        &self,
        masses: &'a [BeliefMass],
    ) -> FusionResult<Cow<'a, BeliefMass>> {
        self.fuse_all(masses, self.config.default_rule)
    }
}
