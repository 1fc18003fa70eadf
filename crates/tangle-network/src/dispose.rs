//! Disposal: marking cells and propagators dead, cascading through the
//! graph, and the deferred cleanup that actually frees them.
//!
//! Disposal is two-phase. Marking is immediate: content becomes
//! [`Content::Disposed`], neighbors are alerted, and the node joins the
//! disposal queue. Freeing waits for [`Network::cleanup_disposed_items`],
//! which the runtime calls once a drain reaches quiescence, so nothing is
//! removed from under a running propagator.
//!
//! [`Network::mark_for_disposal`] skips the first phase: the node only
//! joins the queue and keeps working until cleanup marks and frees it.

use indexmap::IndexSet;
use tracing::debug;

use tangle_core::{CellId, Content, NodeId, PropagatorId, RelationId};

use crate::error::NetworkError;
use crate::network::Network;

/// What [`Network::cleanup_disposed_items`] freed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Cells removed from the registry.
    pub cells: usize,
    /// Propagators removed from the registry. Schedulers drop these from
    /// their queues.
    pub propagators: Vec<PropagatorId>,
    /// Relations removed from the hierarchy.
    pub relations: usize,
}

impl CleanupReport {
    /// Whether nothing was freed.
    pub fn is_empty(&self) -> bool {
        self.cells == 0 && self.propagators.is_empty() && self.relations == 0
    }
}

/// What [`Network::prune`] swept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Neighbor entries pointing at removed propagators.
    pub neighbors: usize,
    /// Writer entries pointing at removed propagators.
    pub writers: usize,
    /// Premise index entries pointing at removed cells.
    pub premise_entries: usize,
    /// Relation member entries pointing at removed nodes.
    pub relation_members: usize,
    /// Relations whose parent had been removed.
    pub relations: usize,
}

impl PruneReport {
    /// Total number of entries swept.
    pub fn total(&self) -> usize {
        self.neighbors + self.writers + self.premise_entries + self.relation_members + self.relations
    }
}

impl Network {
    /// Dispose a cell or a propagator.
    pub fn dispose(&mut self, node: NodeId) -> Result<(), NetworkError> {
        match node {
            NodeId::Cell(cell) => self.dispose_cell(cell),
            NodeId::Propagator(propagator) => self.dispose_propagator(propagator),
        }
    }

    /// Queue `node` for the next cleanup without marking it now.
    pub fn mark_for_disposal(&mut self, node: NodeId) -> Result<(), NetworkError> {
        match node {
            NodeId::Cell(id) if !self.cells.contains(id) => {
                return Err(NetworkError::UnknownCell { id });
            }
            NodeId::Propagator(id) if !self.propagators.contains(id) => {
                return Err(NetworkError::UnknownPropagator { id });
            }
            _ => {}
        }
        self.disposal_queue.insert(node);
        Ok(())
    }

    fn is_marked_disposed(&self, node: NodeId) -> bool {
        match node {
            NodeId::Cell(id) => self.cells.get(id).is_none_or(|n| n.content.is_disposed()),
            NodeId::Propagator(id) => self.propagators.get(id).is_none_or(|n| n.disposed),
        }
    }

    /// Mark `cell` disposed and alert its neighbors.
    ///
    /// The neighbors find a disposed boundary on their next activation and
    /// dispose themselves. Disposing twice is a no-op.
    pub fn dispose_cell(&mut self, cell: CellId) -> Result<(), NetworkError> {
        let node = self
            .cells
            .get_mut(cell)
            .ok_or(NetworkError::UnknownCell { id: cell })?;
        if node.content.is_disposed() {
            return Ok(());
        }
        node.content = Content::Disposed;
        node.strongest = Content::Disposed;
        self.clock += 1;
        node.changed_at = self.clock;
        self.alerts.extend(node.neighbors.keys().copied());
        self.disposal_queue.insert(NodeId::Cell(cell));
        debug!(cell = %cell, name = %node.name, "cell disposed");
        Ok(())
    }

    /// Mark a propagator disposed, detach it from its boundary cells, and
    /// dispose everything built under its relation.
    pub fn dispose_propagator(&mut self, id: PropagatorId) -> Result<(), NetworkError> {
        let node = self
            .propagators
            .get_mut(id)
            .ok_or(NetworkError::UnknownPropagator { id })?;
        if node.disposed {
            return Ok(());
        }
        node.disposed = true;
        node.body = None;
        let relation = node.relation;
        let inputs = node.inputs.clone();
        let outputs = node.outputs.clone();
        debug!(propagator = %id, name = %node.name, "propagator disposed");

        for cell in inputs {
            self.remove_neighbor(cell, id);
        }
        for cell in outputs {
            if let Some(node) = self.cells.get_mut(cell) {
                node.writers.shift_remove(&id);
            }
        }
        self.alerts.shift_remove(&id);
        self.disposal_queue.insert(NodeId::Propagator(id));
        self.dispose_relation_members(relation)
    }

    /// Dispose every propagator, then every cell, created under
    /// `relation` or any of its descendants.
    ///
    /// A member cell that is still the input or output of a live
    /// propagator outside the subtree is left alone.
    pub fn dispose_relation_members(&mut self, relation: RelationId) -> Result<(), NetworkError> {
        if self.relations.get(relation).is_none() {
            return Err(NetworkError::UnknownRelation { id: relation });
        }
        let mut propagators = Vec::new();
        let mut cells = Vec::new();
        for r in self.relations.subtree(relation) {
            if let Some(rel) = self.relations.get(r) {
                propagators.extend_from_slice(rel.propagators());
                cells.extend_from_slice(rel.cells());
            }
        }
        for p in propagators {
            if self.propagators.contains(p) {
                self.dispose_propagator(p)?;
            }
        }
        for c in cells {
            if self.cells.contains(c) && !self.has_live_boundary_user(c) {
                self.dispose_cell(c)?;
            }
        }
        Ok(())
    }

    /// Dispose the members of `relation` and schedule the relation itself
    /// (with its descendants) for removal at the next cleanup.
    pub fn retire_relation(&mut self, relation: RelationId) -> Result<(), NetworkError> {
        self.dispose_relation_members(relation)?;
        if relation != self.relations.root() {
            self.retired_relations.push(relation);
        }
        Ok(())
    }

    /// Propagator `id` found a disposed boundary: dispose it, then every
    /// output no live propagator still writes.
    pub(crate) fn cascade_dispose(&mut self, id: PropagatorId) -> Result<(), NetworkError> {
        let outputs = self
            .propagators
            .get(id)
            .map(|n| n.outputs.clone())
            .unwrap_or_default();
        self.dispose_propagator(id)?;
        for cell in outputs {
            let orphaned = self
                .cells
                .get(cell)
                .is_some_and(|n| !n.is_disposed() && !self.has_live_writer(n.writers.iter().copied()));
            if orphaned {
                self.dispose_cell(cell)?;
            }
        }
        Ok(())
    }

    fn has_live_writer(&self, mut writers: impl Iterator<Item = PropagatorId>) -> bool {
        writers.any(|w| self.propagators.get(w).is_some_and(|p| !p.disposed))
    }

    fn has_live_boundary_user(&self, cell: CellId) -> bool {
        let Some(node) = self.cells.get(cell) else {
            return false;
        };
        node.neighbors
            .keys()
            .chain(node.writers.iter())
            .any(|&p| self.propagators.get(p).is_some_and(|n| !n.disposed))
    }

    /// Nodes marked for disposal and not yet freed.
    pub fn pending_disposal(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.disposal_queue.iter().copied()
    }

    /// Free everything in the disposal queue and every retired relation.
    ///
    /// Runs only at quiescence. Disposed cells leave the registry, their
    /// relation, and the premise index; disposed propagators leave the
    /// registry and their parent relation, and their own relation is
    /// removed.
    pub fn cleanup_disposed_items(&mut self) -> CleanupReport {
        let mut report = CleanupReport::default();
        let unmarked: Vec<NodeId> = self
            .disposal_queue
            .iter()
            .copied()
            .filter(|&node| !self.is_marked_disposed(node))
            .collect();
        for node in unmarked {
            if let Err(error) = self.dispose(node) {
                debug!(node = ?node, %error, "queued node already gone");
            }
        }
        let queue = std::mem::take(&mut self.disposal_queue);
        let mut removed_cells = IndexSet::new();

        for node in queue {
            match node {
                NodeId::Cell(cell) => {
                    if let Some(node) = self.cells.remove(cell) {
                        self.relations.forget_cell(node.relation, cell);
                        removed_cells.insert(cell);
                        report.cells += 1;
                    }
                }
                NodeId::Propagator(id) => {
                    if let Some(node) = self.propagators.remove(id) {
                        for &cell in &node.inputs {
                            self.remove_neighbor(cell, id);
                        }
                        for &cell in &node.outputs {
                            if let Some(c) = self.cells.get_mut(cell) {
                                c.writers.shift_remove(&id);
                            }
                        }
                        let parent = self.relations.get(node.relation).and_then(|r| r.parent());
                        if let Some(parent) = parent {
                            self.relations.forget_propagator(parent, id);
                        }
                        if self.relations.remove(node.relation).is_some() {
                            report.relations += 1;
                        }
                        report.propagators.push(id);
                    }
                }
            }
        }

        for relation in std::mem::take(&mut self.retired_relations) {
            for r in self.relations.subtree(relation).into_iter().rev() {
                if self.relations.remove(r).is_some() {
                    report.relations += 1;
                }
            }
        }

        if !removed_cells.is_empty() {
            self.premises.retain_cells(|c| !removed_cells.contains(&c));
        }
        if !report.is_empty() {
            debug!(
                cells = report.cells,
                propagators = report.propagators.len(),
                relations = report.relations,
                "disposed items cleaned up"
            );
        }
        report
    }

    /// Sweep stale references: neighbor and writer entries for removed
    /// propagators, premise index entries for removed cells, relation
    /// members that no longer exist, and orphaned relations.
    pub fn prune(&mut self) -> PruneReport {
        let mut report = PruneReport::default();
        let propagators = &self.propagators;
        for node in self.cells.values_mut() {
            let before = node.neighbors.len();
            node.neighbors.retain(|p, _| propagators.contains(*p));
            report.neighbors += before - node.neighbors.len();
            let before = node.writers.len();
            node.writers.retain(|p| propagators.contains(*p));
            report.writers += before - node.writers.len();
        }
        let cells = &self.cells;
        report.premise_entries = self.premises.retain_cells(|c| cells.contains(c));
        for relation in self.relations.iter_mut() {
            report.relation_members +=
                relation.retain_members(|c| cells.contains(c), |p| propagators.contains(p));
        }

        loop {
            let orphans = self.relations.orphans();
            if orphans.is_empty() {
                break;
            }
            for r in orphans {
                if self.relations.remove(r).is_some() {
                    report.relations += 1;
                }
            }
        }
        let live: IndexSet<RelationId> = self.relations.iter().map(|r| r.id()).collect();
        for relation in self.relations.iter_mut() {
            relation.retain_children(|c| live.contains(&c));
        }

        if report.total() > 0 {
            debug!(swept = report.total(), "network pruned");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagator::PropagatorKind;
    use crate::Activation;
    use crate::ActivateError;
    use crate::Propagator;

    struct Noop;

    impl Propagator for Noop {
        fn activate(&mut self, _ctx: &mut Activation<'_>) -> Result<(), ActivateError> {
            Ok(())
        }
    }

    #[test]
    fn disposing_a_cell_alerts_neighbors() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        let b = net.construct_cell("b");
        let p = net
            .add_propagator("p", &[a], &[b], PropagatorKind::Custom, Box::new(Noop))
            .unwrap();
        net.take_alerts();
        net.dispose_cell(a).unwrap();
        assert_eq!(net.take_alerts(), vec![p]);
        assert!(net.is_disposed(a).unwrap());
    }

    #[test]
    fn activation_with_disposed_input_cascades() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        let b = net.construct_cell("b");
        let p = net
            .add_propagator("p", &[a], &[b], PropagatorKind::Custom, Box::new(Noop))
            .unwrap();
        net.dispose_cell(a).unwrap();
        assert_eq!(
            net.activate(p).unwrap(),
            crate::ActivationOutcome::Disposed
        );
        assert!(net.find_propagator_by_id(p).unwrap().is_disposed());
        assert!(net.is_disposed(b).unwrap());
    }

    #[test]
    fn output_with_another_live_writer_survives_cascade() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        let x = net.construct_cell("x");
        let b = net.construct_cell("b");
        let p = net
            .add_propagator("p", &[a], &[b], PropagatorKind::Custom, Box::new(Noop))
            .unwrap();
        net.add_propagator("q", &[x], &[b], PropagatorKind::Custom, Box::new(Noop))
            .unwrap();
        net.dispose_cell(a).unwrap();
        net.activate(p).unwrap();
        assert!(!net.is_disposed(b).unwrap());
    }

    #[test]
    fn cleanup_frees_queued_nodes() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        let b = net.construct_cell("b");
        let p = net
            .add_propagator("p", &[a], &[b], PropagatorKind::Custom, Box::new(Noop))
            .unwrap();
        net.dispose_propagator(p).unwrap();
        net.dispose_cell(a).unwrap();
        let report = net.cleanup_disposed_items();
        assert_eq!(report.cells, 1);
        assert_eq!(report.propagators, vec![p]);
        assert_eq!(report.relations, 1);
        assert!(net.find_cell_by_id(a).is_none());
        assert!(net.find_propagator_by_id(p).is_none());
        assert_eq!(net.find_cell_by_id(b).unwrap().writers().count(), 0);
        assert!(net.cleanup_disposed_items().is_empty());
    }

    #[test]
    fn marked_cell_is_only_disposed_by_cleanup() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        let b = net.construct_cell("b");
        let p = net
            .add_propagator("p", &[a], &[b], PropagatorKind::Custom, Box::new(Noop))
            .unwrap();
        net.take_alerts();

        net.mark_for_disposal(NodeId::Cell(a)).unwrap();
        assert!(!net.is_disposed(a).unwrap());
        assert_eq!(net.pending_disposal().collect::<Vec<_>>(), vec![NodeId::Cell(a)]);
        assert!(net.take_alerts().is_empty());

        let report = net.cleanup_disposed_items();
        assert_eq!(report.cells, 1);
        assert!(net.find_cell_by_id(a).is_none());
        assert!(net.take_alerts().contains(&p));
    }

    #[test]
    fn marking_an_unknown_node_fails() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        net.dispose_cell(a).unwrap();
        net.cleanup_disposed_items();
        assert_eq!(
            net.mark_for_disposal(NodeId::Cell(a)),
            Err(NetworkError::UnknownCell { id: a })
        );
    }

    #[test]
    fn retired_relation_members_are_disposed_and_removed() {
        let mut net = Network::new();
        let root = net.current_relation();
        let scope = net.create_relation("scope", root);
        net.enter_scope(scope).unwrap();
        let inner = net.construct_cell("inner");
        net.exit_scope();
        net.retire_relation(scope).unwrap();
        assert!(net.is_disposed(inner).unwrap());
        let report = net.cleanup_disposed_items();
        assert_eq!(report.cells, 1);
        assert_eq!(report.relations, 1);
        assert!(net.relations().get(scope).is_none());
    }

    #[test]
    fn prune_sweeps_stale_neighbors() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        let stale = PropagatorId::new(99, 0);
        net.add_neighbor(a, stale, tangle_core::InterestSet::all())
            .unwrap();
        let report = net.prune();
        assert_eq!(report.neighbors, 1);
        assert_eq!(net.find_cell_by_id(a).unwrap().neighbors().count(), 0);
        assert_eq!(net.prune().total(), 0);
    }
}
