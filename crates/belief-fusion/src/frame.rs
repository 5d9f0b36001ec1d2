//! Frames of discernment and focal sets.
//!
//! Both are finite sets of hypothesis labels. A [`Frame`] is the universe
//! under consideration; a [`FocalSet`] is any subset of it that carries mass.
//! They share one representation, [`LabelSet`].

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An immutable, ordered set of hypothesis labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(BTreeSet<String>);

/// The frame of discernment.
pub type Frame = LabelSet;

/// A subset of the frame that receives mass.
pub type FocalSet = LabelSet;

impl LabelSet {
    /// Create a set from any collection of labels.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    /// The set containing exactly one label.
    pub fn singleton(label: impl Into<String>) -> Self {
        let mut labels = BTreeSet::new();
        labels.insert(label.into());
        Self(labels)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_subset(&self, other: &LabelSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn is_disjoint(&self, other: &LabelSet) -> bool {
        self.0.is_disjoint(&other.0)
    }

    pub fn intersection(&self, other: &LabelSet) -> LabelSet {
        Self(self.0.intersection(&other.0).cloned().collect())
    }

    pub fn union(&self, other: &LabelSet) -> LabelSet {
        Self(self.0.union(&other.0).cloned().collect())
    }
}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for LabelSet {
    fn from(labels: [S; N]) -> Self {
        Self::new(labels)
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, label) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", label)?;
        }
        write!(f, "}}")
    }
}
