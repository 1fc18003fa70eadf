//! Event kinds a propagator can register interest in on a cell.

/// A cell event that can wake a neighbor propagator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The cell's content changed through a merge.
    Updated,
    /// The cell was disposed.
    Disposed,
}

impl EventKind {
    fn bit(self) -> u8 {
        match self {
            Self::Updated => 1 << 0,
            Self::Disposed => 1 << 1,
        }
    }
}

/// Compact set of [`EventKind`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct InterestSet {
    bits: u8,
}

impl InterestSet {
    /// No events.
    pub fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Every event kind. The default registration for propagators.
    pub fn all() -> Self {
        Self {
            bits: EventKind::Updated.bit() | EventKind::Disposed.bit(),
        }
    }

    /// Add an event kind.
    pub fn insert(&mut self, kind: EventKind) {
        self.bits |= kind.bit();
    }

    /// Whether the set includes `kind`.
    pub fn contains(&self, kind: EventKind) -> bool {
        self.bits & kind.bit() != 0
    }

    /// Union of two sets.
    pub fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl FromIterator<EventKind> for InterestSet {
    fn from_iter<I: IntoIterator<Item = EventKind>>(iter: I) -> Self {
        let mut set = Self::empty();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}
