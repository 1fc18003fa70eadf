//! The [`Runtime`]: a network plus the scheduler that drives it.
//!
//! A drain runs in rounds. Each round runs queued commit actions, then
//! pops and activates propagators until the scheduler is empty, then
//! closes the round. The drain ends at quiescence (or on cancel), after
//! which disposed items are cleaned up.
//!
//! ```text
//! write ──► Network::add_content ──► alert outbox
//!                                        │ feed_alerts
//!                                        ▼
//!                     Scheduler::next ──► Network::activate ──► writes …
//! ```

use std::time::Instant;

use tracing::{debug, info, trace, warn};

use tangle_core::{CellId, Content, Freshness, Merge, NodeId, PropagatorError, PropagatorId, Strongest, Value};
use tangle_network::{
    ActivateError, ActivationOutcome, CellNode, Network, NetworkError, PropagatorNode, PruneReport,
};

use crate::cancel::CancelHandle;
use crate::config::{BatchMode, RuntimeConfig};
use crate::error::{ActivationError, ConfigError, EngineError};
use crate::metrics::DrainMetrics;
use crate::scheduler::{CommitAction, InformativenessScheduler, Scheduler, SimpleScheduler};

/// A propagator network and its active scheduler.
pub struct Runtime {
    network: Network,
    scheduler: Box<dyn Scheduler>,
    config: RuntimeConfig,
    commits: Vec<CommitAction>,
    cancel: CancelHandle,
    last_metrics: DrainMetrics,
    drains: u32,
}

impl Runtime {
    /// A runtime with the default config and a [`SimpleScheduler`].
    pub fn new() -> Self {
        Self {
            network: Network::new(),
            scheduler: Box::new(SimpleScheduler::new()),
            config: RuntimeConfig::default(),
            commits: Vec::new(),
            cancel: CancelHandle::new(),
            last_metrics: DrainMetrics::default(),
            drains: 0,
        }
    }

    /// A runtime with an explicit, validated config.
    pub fn with_config(config: RuntimeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// The active config.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The underlying network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Mutable access to the underlying network, for operations the
    /// runtime does not wrap.
    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    /// Metrics from the most recent drain.
    pub fn last_metrics(&self) -> &DrainMetrics {
        &self.last_metrics
    }

    // ── Cells ───────────────────────────────────────────────────────

    /// Create an empty cell.
    pub fn construct_cell(&mut self, name: impl Into<String>) -> CellId {
        self.network.construct_cell(name)
    }

    /// Create a constant cell.
    pub fn construct_constant(&mut self, name: impl Into<String>, value: impl Into<Value>) -> CellId {
        self.network.construct_constant(name, value)
    }

    /// Merge an unconditional value into `cell`. Does not drain.
    pub fn update(&mut self, cell: CellId, value: impl Into<Value>) -> Result<bool, NetworkError> {
        self.network.update(cell, value)
    }

    /// Merge arbitrary content into `cell`. Does not drain.
    pub fn add_content(&mut self, cell: CellId, content: Content) -> Result<bool, NetworkError> {
        self.network.add_content(cell, content)
    }

    /// Merge `value` into `cell` supported by `premise`. Does not drain.
    pub fn tell(&mut self, cell: CellId, value: impl Into<Value>, premise: &str) -> Result<bool, NetworkError> {
        self.network.tell(cell, value, premise)
    }

    /// Strongest value of `cell`.
    pub fn strongest(&self, cell: CellId) -> Result<Content, NetworkError> {
        self.network.strongest(cell)
    }

    /// Whether `cell` currently holds a contradiction.
    pub fn is_contradiction(&self, cell: CellId) -> Result<bool, NetworkError> {
        self.network.is_contradiction(cell)
    }

    /// Dispose a cell; neighbors notice on their next activation.
    pub fn dispose_cell(&mut self, cell: CellId) -> Result<(), NetworkError> {
        self.network.dispose_cell(cell)
    }

    // ── Propagators ─────────────────────────────────────────────────

    /// Build a primitive propagator computing `output` from `inputs`.
    pub fn primitive(
        &mut self,
        name: impl Into<String>,
        inputs: &[CellId],
        output: CellId,
        f: impl Fn(&[Value]) -> Result<Option<Value>, PropagatorError> + 'static,
    ) -> Result<PropagatorId, NetworkError> {
        self.network.primitive(name, inputs, output, f)
    }

    /// Build a compound propagator.
    pub fn compound_propagator(
        &mut self,
        name: impl Into<String>,
        inputs: &[CellId],
        outputs: &[CellId],
        builder: impl FnOnce(&mut Network, &[CellId], &[CellId]) -> Result<(), ActivateError> + 'static,
    ) -> Result<PropagatorId, NetworkError> {
        self.network.compound_propagator(name, inputs, outputs, builder)
    }

    /// Build a constraint propagator.
    pub fn constraint_propagator(
        &mut self,
        name: impl Into<String>,
        cells: &[CellId],
        builder: impl FnOnce(&mut Network, &[CellId], &[CellId]) -> Result<(), ActivateError> + 'static,
    ) -> Result<PropagatorId, NetworkError> {
        self.network.constraint_propagator(name, cells, builder)
    }

    /// Build an apply-subnet propagator driven by `constructor`.
    pub fn apply_subnet(
        &mut self,
        name: impl Into<String>,
        constructor: CellId,
        inputs: &[CellId],
        outputs: &[CellId],
    ) -> Result<PropagatorId, NetworkError> {
        self.network.apply_subnet(name, constructor, inputs, outputs)
    }

    /// Queue `id` for activation on the next drain.
    pub fn alert_propagator(&mut self, id: PropagatorId) -> Result<(), NetworkError> {
        if self.network.find_propagator_by_id(id).is_none() {
            return Err(NetworkError::UnknownPropagator { id });
        }
        self.network.alert(id);
        Ok(())
    }

    // ── Truth maintenance ───────────────────────────────────────────

    /// Retract a premise everywhere. Does not drain.
    pub fn kick_out(&mut self, premise: &str) -> Result<Vec<CellId>, NetworkError> {
        self.network.kick_out(premise)
    }

    /// Reinstate a retracted premise. Does not drain.
    pub fn bring_in(&mut self, premise: &str) -> Result<Vec<CellId>, NetworkError> {
        self.network.bring_in(premise)
    }

    // ── Disposal & traversal ────────────────────────────────────────

    /// Dispose a cell or propagator.
    pub fn dispose(&mut self, node: NodeId) -> Result<(), NetworkError> {
        self.network.dispose(node)
    }

    /// Queue a node for disposal by the cleanup closing the next drain.
    /// It keeps working until then.
    pub fn mark_for_disposal(&mut self, node: NodeId) -> Result<(), NetworkError> {
        self.network.mark_for_disposal(node)
    }

    /// Look up a cell.
    pub fn find_cell_by_id(&self, id: CellId) -> Option<&CellNode> {
        self.network.find_cell_by_id(id)
    }

    /// Look up a propagator.
    pub fn find_propagator_by_id(&self, id: PropagatorId) -> Option<&PropagatorNode> {
        self.network.find_propagator_by_id(id)
    }

    /// Nodes reachable forward from `start`.
    pub fn downstream(&self, start: NodeId) -> Vec<NodeId> {
        self.network.downstream(start)
    }

    /// Nodes that can influence `start`.
    pub fn upstream(&self, start: NodeId) -> Vec<NodeId> {
        self.network.upstream(start)
    }

    /// Sweep stale references now.
    pub fn prune(&mut self) -> PruneReport {
        self.network.prune()
    }

    // ── Policies ────────────────────────────────────────────────────

    /// Install a merge policy.
    pub fn set_merge(&mut self, merge: Box<dyn Merge>) {
        self.network.set_merge(merge);
    }

    /// Install a strongest-value projection.
    pub fn set_strongest(&mut self, projection: Box<dyn Strongest>) -> Result<(), NetworkError> {
        self.network.set_strongest(projection)
    }

    /// Install a freshness predicate.
    pub fn set_freshness(&mut self, freshness: Box<dyn Freshness>) {
        self.network.set_freshness(freshness);
    }

    // ── Scheduling ──────────────────────────────────────────────────

    /// Swap the scheduler. Work pending in the old one moves across.
    pub fn set_scheduler(&mut self, scheduler: Box<dyn Scheduler>) {
        let mut old = std::mem::replace(&mut self.scheduler, scheduler);
        let pending = old.pending();
        for id in &pending {
            self.scheduler.alert(*id, &self.network);
        }
        for action in old.take_commit_actions() {
            if let Some(action) = self.scheduler.defer_commit(action) {
                self.commits.push(action);
            }
        }
        info!(
            from = old.name(),
            to = self.scheduler.name(),
            moved = pending.len(),
            "scheduler swapped"
        );
    }

    /// Name of the active scheduler.
    pub fn scheduler_name(&self) -> &'static str {
        self.scheduler.name()
    }

    /// An [`InformativenessScheduler`] tuned by this runtime's config.
    pub fn informativeness_scheduler(&self) -> InformativenessScheduler {
        InformativenessScheduler::with_config(self.config.informativeness)
    }

    /// Drop every pending alert and commit action.
    pub fn clear_all_tasks(&mut self) {
        self.scheduler.clear();
        self.network.take_alerts();
        self.commits.clear();
    }

    /// Queue a network mutation to run atomically at the start of the
    /// next round. Schedulers without rounds run it at the start of the
    /// next drain.
    pub fn schedule_commit(
        &mut self,
        action: impl FnOnce(&mut Network) -> Result<(), NetworkError> + 'static,
    ) {
        if let Some(action) = self.scheduler.defer_commit(Box::new(action)) {
            self.commits.push(action);
        }
    }

    /// A handle that stops a running drain before its next activation.
    ///
    /// Only a request made while a drain is running counts. One left over
    /// from between drains is discarded when the next drain starts.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Ids currently pending in the scheduler or the network outbox.
    pub fn pending(&self) -> Vec<PropagatorId> {
        let mut ids = self.scheduler.pending();
        for id in self.network.pending_alerts() {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }
}

// ── Drain ──────────────────────────────────────────────────────────

impl Runtime {
    /// Run the network to quiescence.
    ///
    /// Propagator failures are wrapped in [`ActivationError`] and passed
    /// to `handler`; the drain carries on and the failing propagator is
    /// not retried. A propagator misusing the network aborts the drain
    /// with [`EngineError::Fatal`]. Unless cancelled, the drain closes
    /// with [`Network::cleanup_disposed_items`].
    pub fn execute_all_tasks_sequential(
        &mut self,
        mut handler: impl FnMut(ActivationError),
    ) -> Result<DrainMetrics, EngineError> {
        let started = Instant::now();
        let mut metrics = DrainMetrics::default();
        if self.cancel.take() {
            debug!("stale cancel request discarded");
        }
        self.feed_alerts();

        'rounds: loop {
            if self.cancel.take() {
                metrics.cancelled = true;
                break;
            }
            self.run_commits()?;
            metrics.rounds += 1;
            loop {
                let batch = match self.config.batch_mode {
                    BatchMode::Sequential => self.scheduler.next(&self.network).into_iter().collect(),
                    BatchMode::Simultaneous => self.scheduler.drain_batch(&self.network),
                };
                if batch.is_empty() {
                    break;
                }
                for (i, &id) in batch.iter().enumerate() {
                    if self.cancel.take() {
                        for &rest in &batch[i..] {
                            self.scheduler.alert(rest, &self.network);
                        }
                        self.feed_alerts();
                        metrics.cancelled = true;
                        break 'rounds;
                    }
                    if let Err(error) = self.activate_one(id, &mut handler, &mut metrics) {
                        for &rest in &batch[i + 1..] {
                            self.scheduler.alert(rest, &self.network);
                        }
                        self.feed_alerts();
                        return Err(error);
                    }
                    if self.config.batch_mode == BatchMode::Sequential {
                        self.feed_alerts();
                    }
                }
                self.feed_alerts();
            }
            self.scheduler.end_round(&self.network);
            self.feed_alerts();
            if !self.scheduler.has_pending() && self.commits.is_empty() {
                break;
            }
        }

        if !metrics.cancelled {
            metrics.disposed_cleaned = self.cleanup();
            self.drains = self.drains.wrapping_add(1);
            if let Some(n) = self.config.prune_interval {
                if n > 0 && self.drains % n == 0 {
                    self.network.prune();
                }
            }
        } else {
            debug!(pending = self.scheduler.pending().len(), "drain cancelled");
        }
        metrics.total_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.last_metrics = metrics.clone();
        Ok(metrics)
    }

    /// Drain, collecting propagator failures instead of handling them.
    pub fn run(&mut self) -> Result<Vec<ActivationError>, EngineError> {
        let mut failures = Vec::new();
        self.execute_all_tasks_sequential(|e| failures.push(e))?;
        Ok(failures)
    }

    /// Perform exactly one activation.
    ///
    /// Returns the id activated, or `None` once the network is quiescent
    /// (in which case disposed items have been cleaned up). Commit
    /// actions and round boundaries are handled as in a full drain.
    pub fn steppable_run_task(
        &mut self,
        mut handler: impl FnMut(ActivationError),
    ) -> Result<Option<PropagatorId>, EngineError> {
        let mut metrics = DrainMetrics::default();
        self.feed_alerts();
        for _ in 0..2 {
            self.run_commits()?;
            if let Some(id) = self.scheduler.next(&self.network) {
                self.activate_one(id, &mut handler, &mut metrics)?;
                self.feed_alerts();
                return Ok(Some(id));
            }
            self.scheduler.end_round(&self.network);
            self.feed_alerts();
            if !self.scheduler.has_pending() && self.commits.is_empty() {
                break;
            }
        }
        self.cleanup();
        Ok(None)
    }

    fn feed_alerts(&mut self) {
        for id in self.network.take_alerts() {
            self.scheduler.alert(id, &self.network);
        }
    }

    fn run_commits(&mut self) -> Result<(), EngineError> {
        let mut actions = std::mem::take(&mut self.commits);
        actions.extend(self.scheduler.take_commit_actions());
        for action in actions {
            action(&mut self.network).map_err(EngineError::Commit)?;
        }
        self.feed_alerts();
        Ok(())
    }

    fn activate_one(
        &mut self,
        id: PropagatorId,
        handler: &mut impl FnMut(ActivationError),
        metrics: &mut DrainMetrics,
    ) -> Result<(), EngineError> {
        let name = match self.network.find_propagator_by_id(id) {
            Some(node) => node.name().to_string(),
            None => return Ok(()),
        };
        match self.network.activate(id) {
            Ok(ActivationOutcome::Fired) => {
                trace!(propagator = %id, name = %name, "activated");
                metrics.record(&name);
                self.scheduler.on_fired(id, &self.network);
                Ok(())
            }
            Ok(ActivationOutcome::Disposed) => {
                debug!(propagator = %id, name = %name, "disposed on activation");
                Ok(())
            }
            Ok(ActivationOutcome::Skipped) => Ok(()),
            Err(ActivateError::Propagator(source)) => {
                warn!(propagator = %id, name = %name, error = %source, "activation failed");
                metrics.record(&name);
                metrics.failures += 1;
                self.scheduler.on_fired(id, &self.network);
                handler(ActivationError {
                    propagator: id,
                    name,
                    source,
                });
                Ok(())
            }
            Err(ActivateError::Network(source)) => Err(EngineError::Fatal {
                propagator: id,
                source,
            }),
        }
    }

    fn cleanup(&mut self) -> usize {
        let report = self.network.cleanup_disposed_items();
        for &id in &report.propagators {
            self.scheduler.remove(id);
        }
        report.cells + report.propagators.len()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("network", &self.network)
            .field("scheduler", &self.scheduler.name())
            .field("config", &self.config)
            .field("commits", &self.commits.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::config::InformativenessConfig;
    use crate::scheduler::StagedScheduler;

    #[test]
    fn adder_reaches_quiescence() {
        let mut rt = Runtime::new();
        let a = rt.construct_cell("a");
        let b = rt.construct_cell("b");
        let c = rt.construct_cell("c");
        rt.network_mut().adder(a, b, c).unwrap();
        rt.update(a, 1).unwrap();
        rt.update(b, 2).unwrap();
        let metrics = rt.execute_all_tasks_sequential(|_| {}).unwrap();
        assert_eq!(rt.strongest(c).unwrap(), Content::Value(Value::from(3)));
        assert!(metrics.activations >= 1);
        assert_eq!(metrics.failures, 0);
        assert_eq!(rt.last_metrics(), &metrics);
    }

    #[test]
    fn propagator_failure_goes_to_handler() {
        let mut rt = Runtime::new();
        let a = rt.construct_cell("a");
        let b = rt.construct_cell("b");
        rt.primitive("boom", &[a], b, |_| Err(PropagatorError::failed("boom")))
            .unwrap();
        rt.update(a, 1).unwrap();
        let failures = rt.run().unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].name, "boom");
        assert_eq!(rt.last_metrics().failures, 1);
    }

    #[test]
    fn merge_failure_inside_activation_is_fatal() {
        let mut rt = Runtime::new();
        let a = rt.construct_cell("a");
        let b = rt.construct_cell("b");
        rt.update(b, true).unwrap();
        rt.network_mut().identity(a, b).unwrap();
        rt.update(a, 1).unwrap();
        let err = rt.run().unwrap_err();
        assert!(matches!(err, EngineError::Fatal { .. }));
    }

    #[test]
    fn steppable_runs_one_activation() {
        let mut rt = Runtime::new();
        let a = rt.construct_cell("a");
        let b = rt.construct_cell("b");
        let c = rt.construct_cell("c");
        rt.network_mut().identity(a, b).unwrap();
        rt.network_mut().identity(b, c).unwrap();
        rt.run().unwrap();
        rt.update(a, 5).unwrap();

        assert!(rt.steppable_run_task(|_| {}).unwrap().is_some());
        assert_eq!(rt.strongest(b).unwrap(), Content::Value(Value::from(5)));
        assert_eq!(rt.strongest(c).unwrap(), Content::Nothing);
        assert!(rt.steppable_run_task(|_| {}).unwrap().is_some());
        assert_eq!(rt.strongest(c).unwrap(), Content::Value(Value::from(5)));
        assert_eq!(rt.steppable_run_task(|_| {}).unwrap(), None);
    }

    #[test]
    fn cancel_leaves_work_queued() {
        let mut rt = Runtime::new();
        let a = rt.construct_cell("a");
        let b = rt.construct_cell("b");
        let c = rt.construct_cell("c");
        let handle = rt.cancel_handle();
        rt.primitive("stop", &[a], b, move |v| {
            handle.cancel();
            Ok(Some(v[0].clone()))
        })
        .unwrap();
        let q = rt.network_mut().identity(b, c).unwrap();
        rt.update(a, 1).unwrap();

        let metrics = rt.execute_all_tasks_sequential(|_| {}).unwrap();
        assert!(metrics.cancelled);
        assert_eq!(metrics.activations, 1);
        assert_eq!(rt.strongest(b).unwrap(), Content::Value(Value::from(1)));
        assert_eq!(rt.strongest(c).unwrap(), Content::Nothing);
        assert_eq!(rt.pending(), vec![q]);

        let metrics = rt.execute_all_tasks_sequential(|_| {}).unwrap();
        assert!(!metrics.cancelled);
        assert_eq!(rt.strongest(c).unwrap(), Content::Value(Value::from(1)));
    }

    #[test]
    fn cancel_between_drains_is_discarded() {
        let mut rt = Runtime::new();
        let a = rt.construct_cell("a");
        let b = rt.construct_cell("b");
        rt.network_mut().identity(a, b).unwrap();
        rt.update(a, 1).unwrap();
        let handle = rt.cancel_handle();
        handle.cancel();
        let metrics = rt.execute_all_tasks_sequential(|_| {}).unwrap();
        assert!(!metrics.cancelled);
        assert!(!handle.is_cancelled());
        assert_eq!(rt.strongest(b).unwrap(), Content::Value(Value::from(1)));
    }

    #[test]
    fn fatal_error_requeues_rest_of_batch() {
        let mut rt = Runtime::with_config(RuntimeConfig {
            batch_mode: BatchMode::Simultaneous,
            ..RuntimeConfig::default()
        })
        .unwrap();
        let a = rt.construct_cell("a");
        let bad = rt.construct_cell("bad");
        let b = rt.construct_cell("b");
        rt.update(bad, true).unwrap();
        rt.network_mut().identity(a, bad).unwrap();
        let good = rt.network_mut().identity(a, b).unwrap();
        rt.update(a, 1).unwrap();

        let err = rt.run().unwrap_err();
        assert!(matches!(err, EngineError::Fatal { .. }));
        assert_eq!(rt.pending(), vec![good]);

        rt.run().unwrap();
        assert_eq!(rt.strongest(b).unwrap(), Content::Value(Value::from(1)));
    }

    #[test]
    fn commit_runs_before_propagation() {
        let mut rt = Runtime::new();
        rt.set_scheduler(Box::new(StagedScheduler::new()));
        let a = rt.construct_cell("a");
        let b = rt.construct_cell("b");
        rt.network_mut().identity(a, b).unwrap();
        rt.schedule_commit(move |net| net.update(a, 9).map(|_| ()));
        rt.run().unwrap();
        assert_eq!(rt.strongest(b).unwrap(), Content::Value(Value::from(9)));
    }

    #[test]
    fn commit_without_rounds_runs_next_drain() {
        let mut rt = Runtime::new();
        let a = rt.construct_cell("a");
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        rt.schedule_commit(move |net| {
            flag.set(true);
            net.update(a, 1).map(|_| ())
        });
        assert!(!ran.get());
        rt.run().unwrap();
        assert!(ran.get());
    }

    #[test]
    fn scheduler_swap_moves_pending_work() {
        let mut rt = Runtime::new();
        let a = rt.construct_cell("a");
        let b = rt.construct_cell("b");
        let c = rt.construct_cell("c");
        rt.network_mut().identity(a, b).unwrap();
        let q = rt.network_mut().identity(a, c).unwrap();
        rt.update(a, 1).unwrap();
        rt.steppable_run_task(|_| {}).unwrap();
        rt.set_scheduler(Box::new(StagedScheduler::new()));
        assert_eq!(rt.scheduler_name(), "staged");
        assert_eq!(rt.pending(), vec![q]);
        rt.run().unwrap();
        assert_eq!(rt.strongest(c).unwrap(), Content::Value(Value::from(1)));
    }

    #[test]
    fn clear_all_tasks_drops_pending_work() {
        let mut rt = Runtime::new();
        let a = rt.construct_cell("a");
        let b = rt.construct_cell("b");
        rt.network_mut().identity(a, b).unwrap();
        rt.update(a, 1).unwrap();
        assert!(!rt.pending().is_empty());
        rt.clear_all_tasks();
        assert!(rt.pending().is_empty());
        rt.run().unwrap();
        assert_eq!(rt.strongest(b).unwrap(), Content::Nothing);
    }

    #[test]
    fn informativeness_scheduler_follows_config() {
        let mut rt = Runtime::with_config(RuntimeConfig {
            informativeness: InformativenessConfig {
                aging_rate: 0.5,
                ..InformativenessConfig::default()
            },
            ..RuntimeConfig::default()
        })
        .unwrap();
        let scheduler = rt.informativeness_scheduler();
        assert_eq!(scheduler.config().aging_rate, 0.5);
        rt.set_scheduler(Box::new(scheduler));
        assert_eq!(rt.scheduler_name(), "informativeness");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = RuntimeConfig {
            prune_interval: Some(0),
            ..RuntimeConfig::default()
        };
        assert_eq!(
            Runtime::with_config(cfg).unwrap_err(),
            ConfigError::ZeroPruneInterval
        );
    }
}
