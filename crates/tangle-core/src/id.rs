//! Strongly-typed identifiers for network nodes, relations, and premises.
//!
//! Cells and propagators live in generational arenas: their ids carry the
//! slot index plus the slot generation at allocation time, so an id that
//! outlives its node never resolves to whatever reuses the slot.

use std::fmt;

macro_rules! generational_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            index: u32,
            generation: u32,
        }

        impl $name {
            /// Build an id from an arena slot index and its generation.
            pub fn new(index: u32, generation: u32) -> Self {
                Self { index, generation }
            }

            /// Arena slot index.
            pub fn index(&self) -> u32 {
                self.index
            }

            /// Slot generation this id was issued for.
            pub fn generation(&self) -> u32 {
                self.generation
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}v{}"), self.index, self.generation)
            }
        }
    };
}

generational_id!(
    /// Identifies a cell in a network arena.
    CellId,
    "c"
);

generational_id!(
    /// Identifies a propagator in a network arena.
    PropagatorId,
    "p"
);

/// Identifies a node in the relation (scope) hierarchy.
///
/// Relations are allocated sequentially and never reused within a network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationId(pub u32);

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

impl From<u32> for RelationId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies an interned premise (a named assumption).
///
/// Ordering follows interning order, which premise sets use as their
/// canonical sort key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PremiseId(pub u32);

impl fmt::Display for PremiseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for PremiseId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a registered propagator constructor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstructorId(pub u32);

impl fmt::Display for ConstructorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k{}", self.0)
    }
}

/// Either kind of graph node, for operations that accept both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    /// A cell.
    Cell(CellId),
    /// A propagator.
    Propagator(PropagatorId),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell(id) => write!(f, "{id}"),
            Self::Propagator(id) => write!(f, "{id}"),
        }
    }
}

impl From<CellId> for NodeId {
    fn from(id: CellId) -> Self {
        Self::Cell(id)
    }
}

impl From<PropagatorId> for NodeId {
    fn from(id: PropagatorId) -> Self {
        Self::Propagator(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generational_ids_differ_by_generation() {
        let a = CellId::new(3, 0);
        let b = CellId::new(3, 1);
        assert_ne!(a, b);
        assert_eq!(a.index(), b.index());
        assert_eq!(b.generation(), 1);
    }

    #[test]
    fn display_formats() {
        assert_eq!(CellId::new(2, 5).to_string(), "c2v5");
        assert_eq!(PropagatorId::new(0, 1).to_string(), "p0v1");
        assert_eq!(RelationId(7).to_string(), "r7");
        assert_eq!(PremiseId(1).to_string(), "#1");
        assert_eq!(NodeId::from(CellId::new(1, 0)).to_string(), "c1v0");
    }
}
