//! Premise (support) sets.

use smallvec::SmallVec;
use std::fmt;

use crate::id::PremiseId;
use crate::projection::Beliefs;

/// A sorted, duplicate-free set of premises supporting a contribution.
///
/// Most contributions rest on one or two premises, so the set stays inline
/// up to four entries. Ordering is lexicographic over sorted premise ids,
/// which gives merge a deterministic tie-break between equally sized sets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PremiseSet {
    premises: SmallVec<[PremiseId; 4]>,
}

impl PremiseSet {
    /// The empty set: a contribution nobody can retract.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A set holding one premise.
    pub fn single(premise: PremiseId) -> Self {
        let mut premises = SmallVec::new();
        premises.push(premise);
        Self { premises }
    }

    /// Insert a premise, keeping the set sorted.
    pub fn insert(&mut self, premise: PremiseId) {
        if let Err(pos) = self.premises.binary_search(&premise) {
            self.premises.insert(pos, premise);
        }
    }

    /// Whether `premise` is in the set.
    pub fn contains(&self, premise: PremiseId) -> bool {
        self.premises.binary_search(&premise).is_ok()
    }

    /// `self ∪ other`.
    pub fn union(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for &p in other.iter() {
            out.insert(p);
        }
        out
    }

    /// Whether every premise of `self` is also in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.premises.iter().all(|&p| other.contains(p))
    }

    /// Whether every premise is currently believed.
    pub fn all_believed(&self, beliefs: &dyn Beliefs) -> bool {
        self.premises.iter().all(|&p| beliefs.is_believed(p))
    }

    /// Number of premises.
    pub fn len(&self) -> usize {
        self.premises.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.premises.is_empty()
    }

    /// Iterate premises in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &PremiseId> {
        self.premises.iter()
    }
}

impl FromIterator<PremiseId> for PremiseSet {
    fn from_iter<I: IntoIterator<Item = PremiseId>>(iter: I) -> Self {
        let mut set = Self::empty();
        for p in iter {
            set.insert(p);
        }
        set
    }
}

impl fmt::Display for PremiseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, p) in self.premises.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, "}}")
    }
}
