//! Belief mass functions (basic probability assignments).
//!
//! A [`BeliefMass`] distributes one unit of probability over focal sets of a
//! frame. All invariants are checked once, in [`BeliefMass::new`] and
//! friends; the value is immutable afterwards.

use std::borrow::Cow;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use thiserror::Error;

use crate::frame::{FocalSet, Frame, LabelSet};

/// Default tolerance for mass sums and range checks.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Errors raised while constructing a belief mass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Belief mass cannot be empty")]
    EmptyMasses,

    #[error("Mass {mass} for focal set {focal_set} out of range [0, 1]")]
    MassOutOfRange { focal_set: FocalSet, mass: f64 },

    #[error("Focal set {focal_set} not in frame {frame}")]
    FocalSetOutsideFrame { focal_set: FocalSet, frame: Frame },

    #[error("Masses sum to {total}, must sum to 1.0 (±{epsilon})")]
    InvalidSum { total: f64, epsilon: f64 },

    #[error("Focal set {focal_set} assigned more than once")]
    DuplicateFocalSet { focal_set: FocalSet },

    #[error("Tolerance {epsilon} must be finite and positive")]
    InvalidEpsilon { epsilon: f64 },
}

/// Anything that names a focal set for lookup: the set itself, or a single
/// label standing for its singleton.
pub trait MassKey {
    fn focal_set(&self) -> Cow<'_, LabelSet>;
}

impl MassKey for LabelSet {
    fn focal_set(&self) -> Cow<'_, LabelSet> {
        Cow::Borrowed(self)
    }
}

impl MassKey for str {
    fn focal_set(&self) -> Cow<'_, LabelSet> {
        Cow::Owned(LabelSet::singleton(self))
    }
}

impl MassKey for String {
    fn focal_set(&self) -> Cow<'_, LabelSet> {
        self.as_str().focal_set()
    }
}

/// A validated belief mass function over a frame of discernment.
///
/// # Examples
///
/// ```
/// use belief_fusion::{BeliefMass, LabelSet};
///
/// let theta = LabelSet::from(["true", "false"]);
/// let m = BeliefMass::new([
///     (LabelSet::singleton("true"), 0.7),
///     (theta.clone(), 0.3),
/// ])
/// .unwrap();
///
/// assert_eq!(m.frame(), &theta);
/// assert_eq!(m.uncertainty_interval(&LabelSet::singleton("true")), (0.7, 1.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BeliefMass {
    masses: BTreeMap<FocalSet, f64>,
    frame: Frame,
    epsilon: f64,
}

impl BeliefMass {
    /// Create a belief mass whose frame is the union of its focal sets.
    pub fn new<I>(masses: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (FocalSet, f64)>,
    {
        Self::builder().assign_all(masses).build()
    }

    /// Create a belief mass over an explicit frame.
    pub fn with_frame<I>(masses: I, frame: Frame) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (FocalSet, f64)>,
    {
        Self::builder().assign_all(masses).frame(frame).build()
    }

    /// Total ignorance: all mass on the whole frame.
    pub fn vacuous(frame: Frame) -> Result<Self, ValidationError> {
        Self::with_frame([(frame.clone(), 1.0)], frame)
    }

    /// Start the full `(masses, frame?, epsilon?)` construction.
    pub fn builder() -> BeliefMassBuilder {
        BeliefMassBuilder::new()
    }

    /// Validate and, within tolerance, renormalize.
    pub(crate) fn from_parts(
        masses: BTreeMap<FocalSet, f64>,
        frame: Option<Frame>,
        epsilon: f64,
    ) -> Result<Self, ValidationError> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ValidationError::InvalidEpsilon { epsilon });
        }

        if masses.is_empty() {
            return Err(ValidationError::EmptyMasses);
        }

        let frame = frame.unwrap_or_else(|| {
            masses
                .keys()
                .fold(LabelSet::default(), |frame, focal_set| frame.union(focal_set))
        });

        for (focal_set, &mass) in &masses {
            if !(0.0..=1.0 + epsilon).contains(&mass) {
                return Err(ValidationError::MassOutOfRange {
                    focal_set: focal_set.clone(),
                    mass,
                });
            }
            if !focal_set.is_subset(&frame) {
                return Err(ValidationError::FocalSetOutsideFrame {
                    focal_set: focal_set.clone(),
                    frame,
                });
            }
        }

        let total: f64 = masses.values().sum();
        let drift = (total - 1.0).abs();
        if drift > epsilon {
            return Err(ValidationError::InvalidSum { total, epsilon });
        }

        let masses = if drift < epsilon && total != 1.0 {
            tracing::debug!(total, epsilon, "Rescaling belief mass to exact normalization");
            let factor = 1.0 / total;
            masses
                .into_iter()
                .map(|(focal_set, mass)| (focal_set, mass * factor))
                .collect()
        } else {
            masses
        };

        Ok(Self {
            masses,
            frame,
            epsilon,
        })
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Number of focal sets.
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Always false for a constructed value.
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Focal sets paired with their masses, in label order.
    pub fn iter(&self) -> btree_map::Iter<'_, FocalSet, f64> {
        self.masses.iter()
    }

    pub fn focal_sets(&self) -> impl Iterator<Item = &FocalSet> {
        self.masses.keys()
    }

    /// Mass of a focal set, or of the singleton for a bare label. Absent keys
    /// have zero mass.
    pub fn mass<K: MassKey + ?Sized>(&self, key: &K) -> f64 {
        let focal_set = key.focal_set();
        self.masses.get(&*focal_set).copied().unwrap_or(0.0)
    }

    /// Whether the stored masses still sum to one within tolerance.
    pub fn is_valid(&self) -> bool {
        let total: f64 = self.masses.values().sum();
        (total - 1.0).abs() < self.epsilon
    }

    /// Lower probability: `Bel(A) = Σ m(B)` for all `B ⊆ A`.
    pub fn belief(&self, proposition: &LabelSet) -> f64 {
        self.masses
            .iter()
            .filter(|(focal_set, _)| focal_set.is_subset(proposition))
            .map(|(_, mass)| mass)
            .sum()
    }

    /// Upper probability: `Pl(A) = Σ m(B)` for all `B ∩ A ≠ ∅`.
    pub fn plausibility(&self, proposition: &LabelSet) -> f64 {
        self.masses
            .iter()
            .filter(|(focal_set, _)| !focal_set.is_disjoint(proposition))
            .map(|(_, mass)| mass)
            .sum()
    }

    /// The interval `[Bel(A), Pl(A)]`.
    pub fn uncertainty_interval(&self, proposition: &LabelSet) -> (f64, f64) {
        (self.belief(proposition), self.plausibility(proposition))
    }
}

impl<'a> IntoIterator for &'a BeliefMass {
    type Item = (&'a FocalSet, &'a f64);
    type IntoIter = btree_map::Iter<'a, FocalSet, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for BeliefMass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BeliefMass(")?;
        for (i, (focal_set, mass)) in self.masses.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:.4}", focal_set, mass)?;
        }
        write!(f, ")")
    }
}

/// Builder for the full `(masses, frame?, epsilon?)` construction form.
#[derive(Debug, Clone)]
pub struct BeliefMassBuilder {
    masses: Vec<(FocalSet, f64)>,
    frame: Option<Frame>,
    epsilon: f64,
}

impl BeliefMassBuilder {
    pub fn new() -> Self {
        Self {
            masses: Vec::new(),
            frame: None,
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Assign mass to a focal set.
    pub fn assign(mut self, focal_set: impl Into<FocalSet>, mass: f64) -> Self {
        self.masses.push((focal_set.into(), mass));
        self
    }

    pub fn assign_all<I>(mut self, masses: I) -> Self
    where
        I: IntoIterator<Item = (FocalSet, f64)>,
    {
        self.masses.extend(masses);
        self
    }

    /// Set the frame explicitly instead of inferring it.
    pub fn frame(mut self, frame: impl Into<Frame>) -> Self {
        self.frame = Some(frame.into());
        self
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<BeliefMass, ValidationError> {
        let mut masses = BTreeMap::new();
        for (focal_set, mass) in self.masses {
            if masses.contains_key(&focal_set) {
                return Err(ValidationError::DuplicateFocalSet { focal_set });
            }
            masses.insert(focal_set, mass);
        }
        BeliefMass::from_parts(masses, self.frame, self.epsilon)
    }
}

impl Default for BeliefMassBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Belief in a proposition (free-function form of [`BeliefMass::belief`]).
pub fn calculate_belief(mass: &BeliefMass, proposition: &LabelSet) -> f64 {
    mass.belief(proposition)
}

/// Plausibility of a proposition (free-function form of
/// [`BeliefMass::plausibility`]).
pub fn calculate_plausibility(mass: &BeliefMass, proposition: &LabelSet) -> f64 {
    mass.plausibility(proposition)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set<const N: usize>(labels: [&str; N]) -> LabelSet {
        LabelSet::from(labels)
    }

    fn three_way() -> BeliefMass {
        BeliefMass::with_frame(
            [
                (set(["A"]), 0.4),
                (set(["B"]), 0.3),
                (set(["A", "B"]), 0.2),
                (set(["A", "B", "C"]), 0.1),
            ],
            set(["A", "B", "C"]),
        )
        .unwrap()
    }

    #[test]
    fn test_simple_belief_mass() {
        let theta = set(["true", "false"]);
        let m = BeliefMass::new([(set(["true"]), 0.7), (theta, 0.3)]).unwrap();

        assert!(m.is_valid());
        assert_eq!(m.len(), 2);
        assert_eq!(m.epsilon(), DEFAULT_EPSILON);
    }

    #[test]
    fn test_frame_inference() {
        let m = BeliefMass::new([
            (set(["A"]), 0.5),
            (set(["B"]), 0.3),
            (set(["A", "B"]), 0.2),
        ])
        .unwrap();

        assert_eq!(m.frame(), &set(["A", "B"]));
    }

    #[test]
    fn test_explicit_frame_may_be_larger() {
        let m = BeliefMass::with_frame([(set(["A"]), 1.0)], set(["A", "B", "C"])).unwrap();
        assert_eq!(m.frame().len(), 3);
    }

    #[test]
    fn test_empty_masses_rejected() {
        let err = BeliefMass::new(Vec::<(LabelSet, f64)>::new()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyMasses);
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_mass_out_of_range_rejected() {
        let err = BeliefMass::new([(set(["A"]), 1.5)]).unwrap_err();
        assert!(matches!(err, ValidationError::MassOutOfRange { mass, .. } if mass == 1.5));
        assert!(err.to_string().contains("out of range"));

        let err = BeliefMass::new([(set(["A"]), 1.1), (set(["B"]), -0.1)]).unwrap_err();
        assert!(matches!(err, ValidationError::MassOutOfRange { .. }));
    }

    #[test]
    fn test_nan_mass_rejected() {
        let err = BeliefMass::new([(set(["A"]), f64::NAN)]).unwrap_err();
        assert!(matches!(err, ValidationError::MassOutOfRange { .. }));
    }

    #[test]
    fn test_invalid_sum_rejected() {
        let err = BeliefMass::new([(set(["A"]), 0.5), (set(["B"]), 0.3)]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSum { .. }));
        assert!(err.to_string().contains("must sum to 1.0"));
    }

    #[test]
    fn test_focal_set_outside_frame_rejected() {
        let err = BeliefMass::with_frame([(set(["X"]), 1.0)], set(["A", "B"])).unwrap_err();
        assert!(matches!(err, ValidationError::FocalSetOutsideFrame { .. }));
    }

    #[test]
    fn test_duplicate_focal_set_rejected() {
        let err = BeliefMass::builder()
            .assign(set(["A"]), 0.5)
            .assign(set(["A"]), 0.5)
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateFocalSet { .. }));
    }

    #[test]
    fn test_invalid_epsilon_rejected() {
        for epsilon in [0.0, -1e-6, f64::NAN, f64::INFINITY] {
            let err = BeliefMass::builder()
                .assign(set(["A"]), 1.0)
                .epsilon(epsilon)
                .build()
                .unwrap_err();
            assert!(matches!(err, ValidationError::InvalidEpsilon { .. }));
        }
    }

    #[test]
    fn test_floating_point_drift_is_rescaled() {
        let m = BeliefMass::new([
            (set(["A"]), 0.333333333),
            (set(["B"]), 0.333333333),
            (set(["C"]), 0.333333333),
        ])
        .unwrap();

        let total: f64 = m.iter().map(|(_, mass)| mass).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(m.is_valid());
    }

    #[test]
    fn test_drift_beyond_custom_epsilon_rejected() {
        let err = BeliefMass::builder()
            .assign(set(["A"]), 0.5)
            .assign(set(["B"]), 0.49)
            .epsilon(1e-3)
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSum { .. }));

        let m = BeliefMass::builder()
            .assign(set(["A"]), 0.5)
            .assign(set(["B"]), 0.4995)
            .epsilon(1e-3)
            .build()
            .unwrap();
        assert!((m.mass("A") + m.mass("B") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_belief_calculation() {
        let m = three_way();
        assert!((m.belief(&set(["A", "B"])) - 0.9).abs() < 1e-6);
        assert!((m.belief(&set(["A"])) - 0.4).abs() < 1e-6);
        assert!((calculate_belief(&m, &set(["A", "B", "C"])) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_plausibility_calculation() {
        let m = three_way();
        assert!((m.plausibility(&set(["A"])) - 0.7).abs() < 1e-6);
        assert!((m.plausibility(&set(["A", "B"])) - 1.0).abs() < 1e-6);
        assert!((calculate_plausibility(&m, &set(["C"])) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_uncertainty_interval() {
        let m = BeliefMass::new([
            (set(["A"]), 0.5),
            (set(["B"]), 0.3),
            (set(["A", "B"]), 0.2),
        ])
        .unwrap();

        let (bel, pl) = m.uncertainty_interval(&set(["A"]));
        assert!((bel - 0.5).abs() < 1e-6);
        assert!((pl - 0.7).abs() < 1e-6);
        assert!(bel <= pl);
    }

    #[test]
    fn test_lookup_by_set_or_label() {
        let m = BeliefMass::new([(set(["A"]), 0.7), (set(["A", "B"]), 0.3)]).unwrap();

        assert_eq!(m.mass("A"), 0.7);
        assert_eq!(m.mass(&set(["A", "B"])), 0.3);
        assert_eq!(m.mass(&"A".to_string()), 0.7);
        assert_eq!(m.mass("B"), 0.0);
        assert_eq!(m.mass("unknown"), 0.0);
    }

    #[test]
    fn test_vacuous() {
        let theta = set(["A", "B", "C"]);
        let m = BeliefMass::vacuous(theta.clone()).unwrap();

        assert_eq!(m.mass(&theta), 1.0);
        assert_eq!(m.uncertainty_interval(&set(["A"])), (0.0, 1.0));
    }

    #[test]
    fn test_singleton_frame() {
        let m = BeliefMass::new([(set(["A"]), 1.0)]).unwrap();
        assert!(m.is_valid());
        assert_eq!(m.frame(), &set(["A"]));
    }

    #[test]
    fn test_display() {
        let m = BeliefMass::new([(set(["A"]), 0.7), (set(["A", "B"]), 0.3)]).unwrap();
        assert_eq!(m.to_string(), "BeliefMass({A}: 0.7000, {A, B}: 0.3000)");
    }
}
