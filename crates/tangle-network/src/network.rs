//! The network: arena-backed registries of cells, propagators, relations,
//! premises, and constructors, plus the merge path every write goes through.
//!
//! Cross-references are ids, never pointers, so cyclic graphs need no
//! special ownership treatment. The network does not schedule anything
//! itself: writes that wake propagators land in an alert outbox which the
//! runtime drains into its scheduler, and disposed nodes land in a disposal
//! queue that is only acted on by [`Network::cleanup_disposed_items`].

use indexmap::IndexSet;
use tracing::{debug, trace};

use tangle_core::{
    BelievedStrongest, CellId, Content, EventKind, Freshness, InterestSet, LatticeMerge, Merge,
    NodeId, PremiseSet, PropagatorId, RelationId, Strongest, Supported, UsableFreshness, Value,
};

use crate::arena::Arena;
use crate::cell::CellNode;
use crate::error::{ActivateError, NetworkError};
use crate::premise::PremiseRegistry;
use crate::propagator::{Activation, ActivationOutcome, Propagator, PropagatorKind, PropagatorNode};
use crate::relation::RelationTree;
use crate::subnet::ConstructorRegistry;

/// A propagator network.
pub struct Network {
    pub(crate) cells: Arena<CellId, CellNode>,
    pub(crate) propagators: Arena<PropagatorId, PropagatorNode>,
    pub(crate) relations: RelationTree,
    pub(crate) scope: Vec<RelationId>,
    pub(crate) premises: PremiseRegistry,
    pub(crate) constructors: ConstructorRegistry,
    pub(crate) merge: Box<dyn Merge>,
    pub(crate) projection: Box<dyn Strongest>,
    pub(crate) freshness: Box<dyn Freshness>,
    pub(crate) alerts: IndexSet<PropagatorId>,
    pub(crate) disposal_queue: IndexSet<NodeId>,
    pub(crate) retired_relations: Vec<RelationId>,
    pub(crate) clock: u64,
}

impl Network {
    /// An empty network with the default merge, strongest, and freshness
    /// policies.
    pub fn new() -> Self {
        Self {
            cells: Arena::new(),
            propagators: Arena::new(),
            relations: RelationTree::new(),
            scope: Vec::new(),
            premises: PremiseRegistry::new(),
            constructors: ConstructorRegistry::new(),
            merge: Box::new(LatticeMerge),
            projection: Box::new(BelievedStrongest),
            freshness: Box::new(UsableFreshness),
            alerts: IndexSet::new(),
            disposal_queue: IndexSet::new(),
            retired_relations: Vec::new(),
            clock: 0,
        }
    }

    // ── Policies ────────────────────────────────────────────────────

    /// Install a merge policy. Existing content is left as merged so far.
    pub fn set_merge(&mut self, merge: Box<dyn Merge>) {
        self.merge = merge;
    }

    /// Install a strongest-value projection and re-project every cell,
    /// alerting neighbors of cells whose projection changed.
    pub fn set_strongest(&mut self, projection: Box<dyn Strongest>) -> Result<(), NetworkError> {
        self.projection = projection;
        for cell in self.cells.ids() {
            if self.reproject(cell)? {
                self.touch(cell);
            }
        }
        Ok(())
    }

    /// Install a freshness predicate.
    pub fn set_freshness(&mut self, freshness: Box<dyn Freshness>) {
        self.freshness = freshness;
    }

    /// The installed merge policy.
    pub fn merge_policy(&self) -> &dyn Merge {
        &*self.merge
    }

    /// The installed freshness predicate.
    pub fn freshness(&self) -> &dyn Freshness {
        &*self.freshness
    }

    // ── Cells ───────────────────────────────────────────────────────

    /// Create an empty cell under the active relation.
    pub fn construct_cell(&mut self, name: impl Into<String>) -> CellId {
        let relation = self.current_relation();
        let id = self.cells.insert(CellNode::new(name.into(), relation));
        self.relations.add_cell(relation, id);
        id
    }

    /// Create a cell seeded with `value` that ignores every later write
    /// that would change it.
    pub fn construct_constant(&mut self, name: impl Into<String>, value: impl Into<Value>) -> CellId {
        let id = self.construct_cell(name);
        let content = Content::Value(value.into());
        self.clock += 1;
        if let Some(node) = self.cells.get_mut(id) {
            node.content = content.clone();
            node.strongest = content;
            node.constant = true;
            node.changed_at = self.clock;
        }
        id
    }

    /// Merge `content` into `cell`.
    ///
    /// Returns whether the content changed. A change re-projects the
    /// strongest value and alerts every neighbor interested in
    /// [`EventKind::Updated`]. Writes into a disposed cell are no-ops;
    /// writing [`Content::Disposed`] disposes the cell.
    pub fn add_content(&mut self, cell: CellId, content: Content) -> Result<bool, NetworkError> {
        if content.is_disposed() {
            let was_live = !self.is_disposed(cell)?;
            self.dispose_cell(cell)?;
            return Ok(was_live);
        }
        let node = self
            .cells
            .get_mut(cell)
            .ok_or(NetworkError::UnknownCell { id: cell })?;
        if node.content.is_disposed() {
            return Ok(false);
        }
        let merged = self
            .merge
            .merge(&node.content, &content)
            .map_err(|source| NetworkError::Merge { cell, source })?;
        if merged == node.content {
            return Ok(false);
        }
        if node.constant {
            debug!(cell = %cell, name = %node.name, incoming = %content, "ignored write to constant cell");
            return Ok(false);
        }
        let premises = match &merged {
            Content::Tms(tms) => tms.premises(),
            _ => PremiseSet::empty(),
        };
        node.content = merged;
        for &premise in premises.iter() {
            self.premises.index(premise, cell);
        }
        self.reproject(cell)?;
        self.touch(cell);
        Ok(true)
    }

    /// Merge an unconditional value into `cell`.
    pub fn update(&mut self, cell: CellId, value: impl Into<Value>) -> Result<bool, NetworkError> {
        self.add_content(cell, Content::Value(value.into()))
    }

    /// Merge `value` into `cell` as a contribution resting on `premise`.
    pub fn tell(
        &mut self,
        cell: CellId,
        value: impl Into<Value>,
        premise: &str,
    ) -> Result<bool, NetworkError> {
        let premise = self.premises.intern(premise);
        self.add_content(
            cell,
            Content::Supported(Supported::new(value, PremiseSet::single(premise))),
        )
    }

    /// Strongest value of `cell`.
    pub fn strongest(&self, cell: CellId) -> Result<Content, NetworkError> {
        self.cells
            .get(cell)
            .map(|n| n.strongest.clone())
            .ok_or(NetworkError::UnknownCell { id: cell })
    }

    /// Raw accumulated content of `cell`.
    pub fn content(&self, cell: CellId) -> Result<&Content, NetworkError> {
        self.cells
            .get(cell)
            .map(|n| &n.content)
            .ok_or(NetworkError::UnknownCell { id: cell })
    }

    /// Name given to `cell` at construction.
    pub fn cell_name(&self, cell: CellId) -> Result<&str, NetworkError> {
        self.cells
            .get(cell)
            .map(CellNode::name)
            .ok_or(NetworkError::UnknownCell { id: cell })
    }

    /// Whether the strongest value of `cell` is a contradiction.
    pub fn is_contradiction(&self, cell: CellId) -> Result<bool, NetworkError> {
        Ok(self.strongest(cell)?.is_contradiction())
    }

    /// Whether `cell` has been disposed.
    pub fn is_disposed(&self, cell: CellId) -> Result<bool, NetworkError> {
        Ok(self.content(cell)?.is_disposed())
    }

    /// Register `propagator` as a neighbor of `cell`.
    pub fn add_neighbor(
        &mut self,
        cell: CellId,
        propagator: PropagatorId,
        interests: InterestSet,
    ) -> Result<(), NetworkError> {
        let node = self
            .cells
            .get_mut(cell)
            .ok_or(NetworkError::UnknownCell { id: cell })?;
        node.add_neighbor(propagator, interests);
        Ok(())
    }

    /// Deregister `propagator` from `cell`. Safe for unknown cells and for
    /// propagators that were never registered.
    pub fn remove_neighbor(&mut self, cell: CellId, propagator: PropagatorId) -> bool {
        self.cells
            .get_mut(cell)
            .is_some_and(|node| node.remove_neighbor(propagator))
    }

    /// Re-run the strongest projection for `cell`. Returns whether the
    /// projection changed.
    pub(crate) fn reproject(&mut self, cell: CellId) -> Result<bool, NetworkError> {
        let node = self
            .cells
            .get_mut(cell)
            .ok_or(NetworkError::UnknownCell { id: cell })?;
        let projected = self
            .projection
            .strongest(&node.content, &self.premises, &*self.merge)
            .map_err(|source| NetworkError::Merge { cell, source })?;
        if projected == node.strongest {
            return Ok(false);
        }
        node.strongest = projected;
        Ok(true)
    }

    /// Stamp `cell` as changed now and alert its update-interested
    /// neighbors.
    pub(crate) fn touch(&mut self, cell: CellId) {
        self.clock += 1;
        if let Some(node) = self.cells.get_mut(cell) {
            node.changed_at = self.clock;
            self.alerts.extend(node.interested(EventKind::Updated));
        }
    }

    // ── Propagators ─────────────────────────────────────────────────

    /// Register a propagator body.
    ///
    /// The propagator gets its own relation under the active one, becomes
    /// a neighbor of each input and a writer of each output, and is alerted
    /// once so it can fire on whatever its inputs already hold.
    pub fn add_propagator(
        &mut self,
        name: impl Into<String>,
        inputs: &[CellId],
        outputs: &[CellId],
        kind: PropagatorKind,
        body: Box<dyn Propagator>,
    ) -> Result<PropagatorId, NetworkError> {
        if let Some(&missing) = inputs.iter().chain(outputs).find(|&&c| !self.cells.contains(c)) {
            return Err(NetworkError::UnknownCell { id: missing });
        }
        let name = name.into();
        let parent = self.current_relation();
        let relation = self.relations.create(name.clone(), parent);
        let id = self.propagators.insert(PropagatorNode {
            name,
            kind,
            relation,
            inputs: inputs.iter().copied().collect(),
            outputs: outputs.iter().copied().collect(),
            effectful: false,
            disposed: false,
            last_fired: 0,
            activations: 0,
            body: Some(body),
        });
        self.relations.set_owner(relation, id);
        self.relations.add_propagator(parent, id);
        for &cell in inputs {
            if let Some(node) = self.cells.get_mut(cell) {
                node.add_neighbor(id, InterestSet::all());
            }
        }
        for &cell in outputs {
            if let Some(node) = self.cells.get_mut(cell) {
                node.writers.insert(id);
            }
        }
        self.alerts.insert(id);
        trace!(propagator = %id, ?kind, "propagator added");
        Ok(id)
    }

    /// Mark a propagator as having externally visible side effects.
    pub fn set_effectful(&mut self, id: PropagatorId, effectful: bool) -> Result<(), NetworkError> {
        let node = self
            .propagators
            .get_mut(id)
            .ok_or(NetworkError::UnknownPropagator { id })?;
        node.effectful = effectful;
        Ok(())
    }

    /// The body's own informativeness hint, if it gives one.
    pub fn informativeness_hint(&self, id: PropagatorId) -> Option<f64> {
        self.propagators
            .get(id)
            .and_then(|n| n.body.as_ref())
            .and_then(|body| body.informativeness())
    }

    /// Queue an alert for `id`.
    pub fn alert(&mut self, id: PropagatorId) {
        self.alerts.insert(id);
    }

    /// Drain the alert outbox, in the order alerts were raised.
    pub fn take_alerts(&mut self) -> Vec<PropagatorId> {
        self.alerts.drain(..).collect()
    }

    /// Alerts waiting in the outbox, oldest first.
    pub fn pending_alerts(&self) -> impl Iterator<Item = PropagatorId> + '_ {
        self.alerts.iter().copied()
    }

    /// Whether any alert is waiting in the outbox.
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }

    /// Activate one propagator.
    ///
    /// A propagator with a disposed (or already removed) input or output
    /// disposes itself instead of running, cascading to outputs nothing
    /// else can still compute.
    pub fn activate(&mut self, id: PropagatorId) -> Result<ActivationOutcome, ActivateError> {
        let Some(node) = self.propagators.get(id) else {
            return Ok(ActivationOutcome::Skipped);
        };
        if node.disposed || node.body.is_none() {
            return Ok(ActivationOutcome::Skipped);
        }
        let boundary_gone = node
            .inputs
            .iter()
            .chain(node.outputs.iter())
            .any(|&c| self.cells.get(c).is_none_or(CellNode::is_disposed));
        if boundary_gone {
            self.cascade_dispose(id)?;
            return Ok(ActivationOutcome::Disposed);
        }

        self.clock += 1;
        let now = self.clock;
        let Some(node) = self.propagators.get_mut(id) else {
            return Ok(ActivationOutcome::Skipped);
        };
        node.last_fired = now;
        node.activations += 1;
        let relation = node.relation;
        let inputs = node.inputs.clone();
        let outputs = node.outputs.clone();
        let Some(mut body) = node.body.take() else {
            return Ok(ActivationOutcome::Skipped);
        };

        let result = {
            let mut ctx = Activation::new(self, id, relation, inputs, outputs);
            body.activate(&mut ctx)
        };

        if let Some(node) = self.propagators.get_mut(id) {
            if !node.disposed {
                node.body = Some(body);
            }
        }
        result.map(|()| ActivationOutcome::Fired)
    }

    // ── Scope ───────────────────────────────────────────────────────

    /// The relation new cells and propagators attach to.
    pub fn current_relation(&self) -> RelationId {
        self.scope.last().copied().unwrap_or(self.relations.root())
    }

    /// Make `relation` the active scope until the matching
    /// [`exit_scope`](Self::exit_scope).
    pub fn enter_scope(&mut self, relation: RelationId) -> Result<(), NetworkError> {
        if self.relations.get(relation).is_none() {
            return Err(NetworkError::UnknownRelation { id: relation });
        }
        self.scope.push(relation);
        Ok(())
    }

    /// Leave the innermost scope.
    pub fn exit_scope(&mut self) {
        self.scope.pop();
    }

    /// Create a relation under `parent`.
    pub fn create_relation(&mut self, name: impl Into<String>, parent: RelationId) -> RelationId {
        self.relations.create(name, parent)
    }

    // ── Introspection ───────────────────────────────────────────────

    /// Look up a cell.
    pub fn find_cell_by_id(&self, id: CellId) -> Option<&CellNode> {
        self.cells.get(id)
    }

    /// Look up a propagator.
    pub fn find_propagator_by_id(&self, id: PropagatorId) -> Option<&PropagatorNode> {
        self.propagators.get(id)
    }

    /// Live cell ids in slot order.
    pub fn cell_ids(&self) -> Vec<CellId> {
        self.cells.ids()
    }

    /// Live propagator ids in slot order.
    pub fn propagator_ids(&self) -> Vec<PropagatorId> {
        self.propagators.ids()
    }

    /// Number of cells in the registry (disposed ones included until
    /// cleanup).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of propagators in the registry.
    pub fn propagator_count(&self) -> usize {
        self.propagators.len()
    }

    /// The relation hierarchy.
    pub fn relations(&self) -> &RelationTree {
        &self.relations
    }

    /// The premise registry.
    pub fn premises(&self) -> &PremiseRegistry {
        &self.premises
    }

    /// Logical clock, advanced on every content change and activation.
    pub fn clock(&self) -> u64 {
        self.clock
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("cells", &self.cells.len())
            .field("propagators", &self.propagators.len())
            .field("relations", &self.relations.len())
            .field("premises", &self.premises.len())
            .field("pending_alerts", &self.alerts.len())
            .field("pending_disposal", &self.disposal_queue.len())
            .finish()
    }
}
