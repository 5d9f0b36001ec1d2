//! # belief-fusion
//!
//! Dempster-Shafer evidence fusion.
//!
//! Uncertain evidence is expressed as a [`BeliefMass`]: probability mass
//! spread over subsets (focal sets) of a finite frame of discernment. Two or
//! more masses over the same frame are combined into one with a
//! [`FusionRule`].
//!
//! ## Key Guarantees
//!
//! 1. **Validated once**: every `BeliefMass`, including each fusion result,
//!    passes the same construction checks and is immutable afterwards
//! 2. **Closed rule set**: Dempster, Yager, Dubois-Prade and averaging,
//!    dispatched by an exhaustive `match`
//! 3. **Advisories are not errors**: high conflict under Dempster's rule is
//!    logged and reported beside the result
//! 4. **Pure**: no I/O, no shared state
//!
//! ## Example
//!
//! ```
//! use belief_fusion::{fuse_beliefs, BeliefMass, FusionRule, LabelSet};
//!
//! let claim = LabelSet::from(["true", "false"]);
//! let source_a = BeliefMass::new([(LabelSet::singleton("true"), 0.9), (claim.clone(), 0.1)])?;
//! let source_b = BeliefMass::new([(LabelSet::singleton("true"), 0.7), (claim.clone(), 0.3)])?;
//!
//! let fused = fuse_beliefs(&source_a, &source_b, FusionRule::Dempster)?;
//! assert!(fused.mass("true") > 0.9);
//! # Ok::<(), belief_fusion::FusionError>(())
//! ```

pub mod config;
pub mod conflict;
pub mod error;
pub mod frame;
pub mod fusion;
pub mod mass;
pub mod rules;

// Re-export main types at crate root
pub use config::FusionConfig;
pub use conflict::calculate_conflict;
pub use error::{FusionError, FusionResult};
pub use frame::{FocalSet, Frame, LabelSet};
pub use fusion::{Advisory, Fuser, FusionOutcome};
pub use mass::{
    calculate_belief, calculate_plausibility, BeliefMass, BeliefMassBuilder, MassKey,
    ValidationError, DEFAULT_EPSILON,
};
pub use rules::FusionRule;

use std::borrow::Cow;

/// Fuse two belief masses with the given rule and the default configuration.
///
/// High conflict under Dempster's rule is reported as a `tracing` warning;
/// use [`Fuser::fuse`] to receive advisories as values.
///
/// # Errors
///
/// - `FusionError::IncompatibleFrames` if the frames differ
/// - `FusionError::TotalConflict` if Dempster's rule meets `K >= 1 - ε`
pub fn fuse_beliefs(
    m1: &BeliefMass,
    m2: &BeliefMass,
    rule: FusionRule,
) -> FusionResult<BeliefMass> {
    Fuser::default().fuse(m1, m2, rule).map(|outcome| outcome.mass)
}

/// Fuse an ordered list of belief masses, left to right.
///
/// With exactly one input, that input is returned borrowed: no rule runs and
/// nothing is re-validated.
///
/// # Errors
///
/// `FusionError::EmptyInput` if `masses` is empty, or the first error of a
/// pairwise fusion.
pub fn fuse_multiple(masses: &[BeliefMass], rule: FusionRule) -> FusionResult<Cow<'_, BeliefMass>> {
    Fuser::default().fuse_all(masses, rule)
}
