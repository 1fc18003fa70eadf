//! Cell content: the lattice a cell accumulates into.
//!
//! ```text
//!                 Contradiction(premises)      top
//!                /          |          \
//!     Value / Supported / Tms (partial information)
//!                \          |          /
//!                         Nothing              bottom
//!
//!                         Disposed             absorbing, outside the order
//! ```

use std::fmt;

use crate::error::MergeError;
use crate::merge::Merge;
use crate::support::PremiseSet;
use crate::value::Value;

/// A base value together with the premises it rests on.
#[derive(Clone, Debug, PartialEq)]
pub struct Supported {
    /// The base value.
    pub value: Value,
    /// Premises the value depends on.
    pub support: PremiseSet,
}

impl Supported {
    /// Pair a value with its support.
    pub fn new(value: impl Into<Value>, support: PremiseSet) -> Self {
        Self {
            value: value.into(),
            support,
        }
    }
}

impl fmt::Display for Supported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.value, self.support)
    }
}

/// Truth-maintenance store: every supported contribution a cell accepted.
///
/// Contributions are retained (minus the ones another entry subsumes) so
/// that retracting a premise can recompute the cell from what remains.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tms {
    entries: Vec<Supported>,
}

impl Tms {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contributions in acceptance order.
    pub fn entries(&self) -> &[Supported] {
        &self.entries
    }

    /// Number of retained contributions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no contributions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Union of every entry's support.
    pub fn premises(&self) -> PremiseSet {
        self.entries
            .iter()
            .fold(PremiseSet::empty(), |acc, e| acc.union(&e.support))
    }

    /// Add a contribution.
    ///
    /// A contribution whose value is implied by an existing entry with a
    /// subset of its support is redundant and dropped. Otherwise it is
    /// appended and every entry it subsumes is removed. Returns whether
    /// the store changed.
    pub fn assimilate<M: Merge + ?Sized>(
        &mut self,
        incoming: Supported,
        merge: &M,
    ) -> Result<bool, MergeError> {
        for existing in &self.entries {
            if subsumes(existing, &incoming, merge)? {
                return Ok(false);
            }
        }
        let mut keep = Vec::with_capacity(self.entries.len() + 1);
        for existing in self.entries.drain(..) {
            if !subsumes(&incoming, &existing, merge)? {
                keep.push(existing);
            }
        }
        keep.push(incoming);
        self.entries = keep;
        Ok(true)
    }
}

/// `a` subsumes `b` when `a` carries at least `b`'s information on no
/// more premises.
fn subsumes<M: Merge + ?Sized>(a: &Supported, b: &Supported, merge: &M) -> Result<bool, MergeError> {
    Ok(a.support.is_subset(&b.support) && merge.implies(&a.value, &b.value)?)
}

/// The content of a cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Content {
    /// No information yet.
    #[default]
    Nothing,
    /// An unconditional base value.
    Value(Value),
    /// A value resting on premises. Cells fold these into a [`Tms`];
    /// strongest-value projections produce them.
    Supported(Supported),
    /// Retained supported contributions.
    Tms(Tms),
    /// Irreconcilable information, tagged with the offending premises.
    Contradiction(PremiseSet),
    /// Tombstone. Absorbs every later merge.
    Disposed,
}

impl Content {
    /// Whether this is `Nothing`.
    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    /// Whether this is a contradiction.
    pub fn is_contradiction(&self) -> bool {
        matches!(self, Self::Contradiction(_))
    }

    /// Whether this is the disposal tombstone.
    pub fn is_disposed(&self) -> bool {
        matches!(self, Self::Disposed)
    }

    /// Whether a propagator can compute from this content: a definite
    /// value, supported or not.
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Value(_) | Self::Supported(_))
    }

    /// The base value of a usable content.
    pub fn base_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Supported(s) => Some(&s.value),
            _ => None,
        }
    }

    /// Premises behind this content. Empty for unconditional values.
    pub fn support(&self) -> PremiseSet {
        match self {
            Self::Supported(s) => s.support.clone(),
            Self::Tms(t) => t.premises(),
            Self::Contradiction(p) => p.clone(),
            _ => PremiseSet::empty(),
        }
    }

    /// Short name of the lattice position, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Nothing => "nothing",
            Self::Value(_) => "value",
            Self::Supported(_) => "supported",
            Self::Tms(_) => "tms",
            Self::Contradiction(_) => "contradiction",
            Self::Disposed => "disposed",
        }
    }
}

impl From<Value> for Content {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<Supported> for Content {
    fn from(s: Supported) -> Self {
        Self::Supported(s)
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nothing => write!(f, "nothing"),
            Self::Value(v) => write!(f, "{v}"),
            Self::Supported(s) => write!(f, "{s}"),
            Self::Tms(t) => write!(f, "tms[{}]", t.len()),
            Self::Contradiction(p) => write!(f, "contradiction {p}"),
            Self::Disposed => write!(f, "disposed"),
        }
    }
}
