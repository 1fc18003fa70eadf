//! Cell storage nodes.

use indexmap::{IndexMap, IndexSet};
use tangle_core::{Content, EventKind, InterestSet, PropagatorId, RelationId};

/// A cell as stored in the network arena.
///
/// Content only changes through the network's merge path or disposal.
/// `strongest` caches the projection propagators read.
#[derive(Debug)]
pub struct CellNode {
    pub(crate) name: String,
    pub(crate) content: Content,
    pub(crate) strongest: Content,
    pub(crate) neighbors: IndexMap<PropagatorId, InterestSet>,
    pub(crate) writers: IndexSet<PropagatorId>,
    pub(crate) relation: RelationId,
    pub(crate) constant: bool,
    pub(crate) changed_at: u64,
}

impl CellNode {
    pub(crate) fn new(name: String, relation: RelationId) -> Self {
        Self {
            name,
            content: Content::Nothing,
            strongest: Content::Nothing,
            neighbors: IndexMap::new(),
            writers: IndexSet::new(),
            relation,
            constant: false,
            changed_at: 0,
        }
    }

    /// Cell name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accumulated content.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Strongest-value projection of the content.
    pub fn strongest(&self) -> &Content {
        &self.strongest
    }

    /// Relation the cell was created under.
    pub fn relation(&self) -> RelationId {
        self.relation
    }

    /// Whether the cell was created as a constant.
    pub fn is_constant(&self) -> bool {
        self.constant
    }

    /// Whether the cell has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.content.is_disposed()
    }

    /// Network clock value at the last content change.
    pub fn changed_at(&self) -> u64 {
        self.changed_at
    }

    /// Registered neighbor propagators and their interests.
    pub fn neighbors(&self) -> impl Iterator<Item = (PropagatorId, InterestSet)> + '_ {
        self.neighbors.iter().map(|(&p, &i)| (p, i))
    }

    /// Propagators that declare this cell as an output.
    pub fn writers(&self) -> impl Iterator<Item = PropagatorId> + '_ {
        self.writers.iter().copied()
    }

    /// Neighbors interested in `kind`.
    pub(crate) fn interested(&self, kind: EventKind) -> impl Iterator<Item = PropagatorId> + '_ {
        self.neighbors
            .iter()
            .filter(move |(_, interest)| interest.contains(kind))
            .map(|(&p, _)| p)
    }

    /// Register `propagator`, widening its interests if already present.
    pub(crate) fn add_neighbor(&mut self, propagator: PropagatorId, interests: InterestSet) {
        let entry = self
            .neighbors
            .entry(propagator)
            .or_insert_with(InterestSet::empty);
        *entry = entry.union(interests);
    }

    /// Deregister `propagator`. No-op when it was never registered.
    pub(crate) fn remove_neighbor(&mut self, propagator: PropagatorId) -> bool {
        self.neighbors.shift_remove(&propagator).is_some()
    }
}
