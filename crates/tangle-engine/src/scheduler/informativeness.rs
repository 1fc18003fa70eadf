//! Priority scheduling by informativeness, with aging for fairness.
//!
//! Priority is `informativeness + age`. Informativeness comes from, in
//! order: a per-propagator override set on the scheduler, the body's own
//! [`Propagator::informativeness`](tangle_network::Propagator::informativeness)
//! hint, or the scheduler's global [`Informativeness`] scorer. The default
//! scorer is [`ChangeHeuristic`]:
//!
//! - `change_boost` if any input changed since the propagator last fired;
//! - plus `numeric_weight × Σ 1 / (1 + |x|)` over fresh numeric inputs,
//!   or, when no input is numeric, the count of fresh inputs.
//!
//! Every pop ages the propagators left waiting by `aging_rate`, so a
//! low-priority propagator cannot be starved by a stream of
//! higher-priority alerts. Ties go to the earliest alert.
//!
//! Priorities shift with every activation, so selection is a linear scan
//! rather than a heap.

use indexmap::IndexMap;
use tangle_core::{PropagatorId, Value};
use tangle_network::Network;

use super::Scheduler;
use crate::config::InformativenessConfig;

/// Global informativeness scorer for propagators without an override or
/// a hint of their own.
pub trait Informativeness {
    /// Expected information gain from firing `id` now. Higher fires
    /// sooner.
    fn score(&self, id: PropagatorId, net: &Network) -> f64;
}

/// The default scorer: a boost for changed inputs plus a numeric or
/// fresh-count term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChangeHeuristic {
    /// Added when any input changed since the propagator last fired.
    pub change_boost: f64,
    /// Scale of the numeric term.
    pub numeric_weight: f64,
}

impl ChangeHeuristic {
    /// Weights taken from `config`.
    pub fn from_config(config: &InformativenessConfig) -> Self {
        Self {
            change_boost: config.change_boost,
            numeric_weight: config.numeric_weight,
        }
    }
}

impl Default for ChangeHeuristic {
    fn default() -> Self {
        Self::from_config(&InformativenessConfig::default())
    }
}

impl Informativeness for ChangeHeuristic {
    fn score(&self, id: PropagatorId, net: &Network) -> f64 {
        let Some(node) = net.find_propagator_by_id(id) else {
            return 0.0;
        };
        let changed = node.inputs().iter().any(|&c| {
            net.find_cell_by_id(c)
                .is_some_and(|cell| cell.changed_at() > node.last_fired())
        });
        let mut score = if changed { self.change_boost } else { 0.0 };

        let mut fresh = 0usize;
        let mut numeric = None;
        for &cell in node.inputs() {
            let Ok(content) = net.strongest(cell) else {
                continue;
            };
            if !net.freshness().is_fresh(&content) {
                continue;
            }
            fresh += 1;
            if let Some(m) = content.base_value().and_then(Value::magnitude) {
                *numeric.get_or_insert(0.0) += 1.0 / (1.0 + m);
            }
        }
        score += match numeric {
            Some(sum) => self.numeric_weight * sum,
            None => fresh as f64,
        };
        score
    }
}

/// Informativeness-ordered scheduler.
pub struct InformativenessScheduler {
    config: InformativenessConfig,
    heuristic: Box<dyn Informativeness>,
    ages: IndexMap<PropagatorId, f64>,
    overrides: IndexMap<PropagatorId, f64>,
}

impl InformativenessScheduler {
    /// A scheduler with the default tuning.
    pub fn new() -> Self {
        Self::with_config(InformativenessConfig::default())
    }

    /// A scheduler with explicit tuning. Validate the config first; an
    /// invalid one is accepted as is.
    pub fn with_config(config: InformativenessConfig) -> Self {
        Self {
            config,
            heuristic: Box::new(ChangeHeuristic::from_config(&config)),
            ages: IndexMap::new(),
            overrides: IndexMap::new(),
        }
    }

    /// Replace the global scorer.
    pub fn with_heuristic(mut self, heuristic: impl Informativeness + 'static) -> Self {
        self.heuristic = Box::new(heuristic);
        self
    }

    /// The tuning in use.
    pub fn config(&self) -> &InformativenessConfig {
        &self.config
    }

    /// Pin the informativeness of `id`, bypassing the scorer.
    pub fn set_override(&mut self, id: PropagatorId, informativeness: f64) {
        self.overrides.insert(id, informativeness);
    }

    /// Drop a pinned informativeness.
    pub fn clear_override(&mut self, id: PropagatorId) {
        self.overrides.shift_remove(&id);
    }

    /// Current age of a pending propagator.
    pub fn age(&self, id: PropagatorId) -> Option<f64> {
        self.ages.get(&id).copied()
    }

    /// Informativeness of `id` without age.
    pub fn informativeness(&self, id: PropagatorId, net: &Network) -> f64 {
        if let Some(&pinned) = self.overrides.get(&id) {
            return pinned;
        }
        if let Some(hint) = net.informativeness_hint(id) {
            return hint;
        }
        self.heuristic.score(id, net)
    }

    /// Priority of a pending propagator: informativeness plus age.
    pub fn priority(&self, id: PropagatorId, net: &Network) -> f64 {
        self.informativeness(id, net) + self.ages.get(&id).copied().unwrap_or(0.0)
    }
}

impl Default for InformativenessScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InformativenessScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InformativenessScheduler")
            .field("config", &self.config)
            .field("ages", &self.ages)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

impl Scheduler for InformativenessScheduler {
    fn name(&self) -> &'static str {
        "informativeness"
    }

    fn alert(&mut self, id: PropagatorId, _net: &Network) {
        self.ages.entry(id).or_insert(0.0);
    }

    fn next(&mut self, net: &Network) -> Option<PropagatorId> {
        let mut best: Option<(usize, f64)> = None;
        for (index, (&id, &age)) in self.ages.iter().enumerate() {
            let priority = self.informativeness(id, net) + age;
            if best.is_none_or(|(_, top)| priority > top) {
                best = Some((index, priority));
            }
        }
        let (index, _) = best?;
        let (id, _) = self.ages.shift_remove_index(index)?;
        let rate = self.config.aging_rate;
        for age in self.ages.values_mut() {
            *age += rate;
        }
        Some(id)
    }

    fn remove(&mut self, id: PropagatorId) {
        self.ages.shift_remove(&id);
        self.overrides.shift_remove(&id);
    }

    fn has_pending(&self) -> bool {
        !self.ages.is_empty()
    }

    fn pending(&self) -> Vec<PropagatorId> {
        self.ages.keys().copied().collect()
    }

    fn clear(&mut self) {
        self.ages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangle_network::{ActivateError, Activation, Propagator, PropagatorKind};

    struct Noop;

    impl Propagator for Noop {
        fn activate(&mut self, _ctx: &mut Activation<'_>) -> Result<(), ActivateError> {
            Ok(())
        }
    }

    fn noop(net: &mut Network, name: &str, inputs: &[tangle_core::CellId]) -> PropagatorId {
        net.add_propagator(name, inputs, &[], PropagatorKind::Custom, Box::new(Noop))
            .unwrap()
    }

    #[test]
    fn smaller_magnitude_inputs_fire_first() {
        let mut net = Network::new();
        let big = net.construct_cell("big");
        let small = net.construct_cell("small");
        net.update(big, 1000).unwrap();
        net.update(small, 0.5).unwrap();
        let p_big = noop(&mut net, "big", &[big]);
        let p_small = noop(&mut net, "small", &[small]);

        let mut s = InformativenessScheduler::new();
        s.alert(p_big, &net);
        s.alert(p_small, &net);
        assert_eq!(s.next(&net), Some(p_small));
        assert_eq!(s.next(&net), Some(p_big));
    }

    #[test]
    fn ties_go_to_earliest_alert() {
        let mut net = Network::new();
        let a = noop(&mut net, "a", &[]);
        let b = noop(&mut net, "b", &[]);
        let mut s = InformativenessScheduler::new();
        s.alert(b, &net);
        s.alert(a, &net);
        assert_eq!(s.next(&net), Some(b));
    }

    #[test]
    fn overrides_beat_heuristic() {
        let mut net = Network::new();
        let a = noop(&mut net, "a", &[]);
        let b = noop(&mut net, "b", &[]);
        let mut s = InformativenessScheduler::new();
        s.set_override(b, 10.0);
        s.alert(a, &net);
        s.alert(b, &net);
        assert_eq!(s.next(&net), Some(b));
        s.clear_override(b);
        assert_eq!(s.informativeness(b, &net), 0.0);
    }

    #[test]
    fn waiting_propagators_age() {
        let mut net = Network::new();
        let hot = noop(&mut net, "hot", &[]);
        let cold = noop(&mut net, "cold", &[]);
        let mut s = InformativenessScheduler::with_config(InformativenessConfig {
            aging_rate: 0.5,
            ..InformativenessConfig::default()
        });
        s.set_override(hot, 1.0);
        s.set_override(cold, 0.0);
        s.alert(cold, &net);
        s.alert(hot, &net);

        assert_eq!(s.next(&net), Some(hot));
        assert_eq!(s.age(cold), Some(0.5));
        s.alert(hot, &net);
        assert_eq!(s.next(&net), Some(hot));
        s.alert(hot, &net);
        // cold: 0 + 1.0 ties hot: 1.0 + 0; cold was alerted first.
        assert_eq!(s.next(&net), Some(cold));
    }

    struct Pinned(PropagatorId);

    impl Informativeness for Pinned {
        fn score(&self, id: PropagatorId, _net: &Network) -> f64 {
            if id == self.0 {
                5.0
            } else {
                0.0
            }
        }
    }

    #[test]
    fn custom_heuristic_changes_pop_order() {
        let mut net = Network::new();
        let big = net.construct_cell("big");
        let small = net.construct_cell("small");
        net.update(big, 1000).unwrap();
        net.update(small, 0.5).unwrap();
        let p_big = noop(&mut net, "big", &[big]);
        let p_small = noop(&mut net, "small", &[small]);

        let mut s = InformativenessScheduler::new().with_heuristic(Pinned(p_big));
        s.alert(p_small, &net);
        s.alert(p_big, &net);
        assert_eq!(s.informativeness(p_big, &net), 5.0);
        assert_eq!(s.next(&net), Some(p_big));
        assert_eq!(s.next(&net), Some(p_small));
    }

    #[test]
    fn remove_drops_override() {
        let mut net = Network::new();
        let p = noop(&mut net, "p", &[]);
        let mut s = InformativenessScheduler::new();
        s.set_override(p, 10.0);
        s.alert(p, &net);
        s.remove(p);
        assert!(!s.has_pending());
        assert_eq!(s.informativeness(p, &net), 0.0);
    }

    #[test]
    fn change_boost_applies_until_fired() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        let p = noop(&mut net, "p", &[a]);
        let s = InformativenessScheduler::with_config(InformativenessConfig {
            numeric_weight: 0.0,
            ..InformativenessConfig::default()
        });
        assert_eq!(s.informativeness(p, &net), 0.0);
        net.update(a, 1).unwrap();
        assert_eq!(s.informativeness(p, &net), 1.0);
        net.activate(p).unwrap();
        assert_eq!(s.informativeness(p, &net), 0.0);
    }
}
