//! Round-based scheduling with deferred effects.
//!
//! Each round runs in three stages:
//!
//! 1. commit actions queued with [`Scheduler::defer_commit`];
//! 2. ordinary propagators until none is pending;
//! 3. effectful propagators, each at most once per round.
//!
//! An effectful propagator alerted again after it fired this round is
//! held until [`Scheduler::end_round`] and fires in the next round.

use indexmap::IndexSet;
use tangle_core::PropagatorId;
use tangle_network::Network;

use super::{CommitAction, Scheduler};

/// Staged scheduler. See the module docs for the round structure.
#[derive(Default)]
pub struct StagedScheduler {
    ordinary: IndexSet<PropagatorId>,
    effects: IndexSet<PropagatorId>,
    fired_effects: IndexSet<PropagatorId>,
    deferred: IndexSet<PropagatorId>,
    commits: Vec<CommitAction>,
}

impl StagedScheduler {
    /// An empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    fn pop_effect(&mut self) -> Option<PropagatorId> {
        let id = self.effects.shift_remove_index(0)?;
        self.fired_effects.insert(id);
        Some(id)
    }
}

impl Scheduler for StagedScheduler {
    fn name(&self) -> &'static str {
        "staged"
    }

    fn alert(&mut self, id: PropagatorId, net: &Network) {
        let effectful = net
            .find_propagator_by_id(id)
            .is_some_and(|p| p.is_effectful());
        if !effectful {
            self.ordinary.insert(id);
        } else if self.fired_effects.contains(&id) {
            self.deferred.insert(id);
        } else {
            self.effects.insert(id);
        }
    }

    fn next(&mut self, _net: &Network) -> Option<PropagatorId> {
        self.ordinary
            .shift_remove_index(0)
            .or_else(|| self.pop_effect())
    }

    fn drain_batch(&mut self, _net: &Network) -> Vec<PropagatorId> {
        if !self.ordinary.is_empty() {
            return self.ordinary.drain(..).collect();
        }
        let mut batch = Vec::with_capacity(self.effects.len());
        while let Some(id) = self.pop_effect() {
            batch.push(id);
        }
        batch
    }

    fn remove(&mut self, id: PropagatorId) {
        self.ordinary.shift_remove(&id);
        self.effects.shift_remove(&id);
        self.deferred.shift_remove(&id);
        self.fired_effects.shift_remove(&id);
    }

    fn has_pending(&self) -> bool {
        !self.ordinary.is_empty()
            || !self.effects.is_empty()
            || !self.deferred.is_empty()
            || !self.commits.is_empty()
    }

    fn pending(&self) -> Vec<PropagatorId> {
        self.ordinary
            .iter()
            .chain(&self.effects)
            .chain(&self.deferred)
            .copied()
            .collect()
    }

    fn clear(&mut self) {
        self.ordinary.clear();
        self.effects.clear();
        self.fired_effects.clear();
        self.deferred.clear();
        self.commits.clear();
    }

    fn end_round(&mut self, _net: &Network) {
        self.fired_effects.clear();
        self.effects.extend(self.deferred.drain(..));
    }

    fn defer_commit(&mut self, action: CommitAction) -> Option<CommitAction> {
        self.commits.push(action);
        None
    }

    fn take_commit_actions(&mut self) -> Vec<CommitAction> {
        std::mem::take(&mut self.commits)
    }
}

impl std::fmt::Debug for StagedScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedScheduler")
            .field("ordinary", &self.ordinary)
            .field("effects", &self.effects)
            .field("fired_effects", &self.fired_effects)
            .field("deferred", &self.deferred)
            .field("commits", &self.commits.len())
            .finish()
    }
}
