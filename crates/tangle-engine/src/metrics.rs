//! Per-drain metrics.
//!
//! [`DrainMetrics`] is returned from every drain and kept as the
//! runtime's [`last_metrics`](crate::runtime::Runtime::last_metrics).

/// Counters collected during one drain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrainMetrics {
    /// Propagator bodies that ran, failures included.
    pub activations: u64,
    /// Activations whose logic returned an error.
    pub failures: u64,
    /// Rounds (commit actions, then work to quiescence, then round end).
    pub rounds: u32,
    /// Cells and propagators freed by the closing cleanup.
    pub disposed_cleaned: usize,
    /// Whether a cancel request stopped the drain early.
    pub cancelled: bool,
    /// Wall-clock time for the drain, in microseconds.
    pub total_us: u64,
    /// Activation counts per propagator name, in order of first firing.
    pub propagator_activations: Vec<(String, u32)>,
}

impl DrainMetrics {
    pub(crate) fn record(&mut self, name: &str) {
        self.activations += 1;
        match self
            .propagator_activations
            .iter_mut()
            .find(|(n, _)| n == name)
        {
            Some((_, count)) => *count += 1,
            None => self.propagator_activations.push((name.to_string(), 1)),
        }
    }

    /// Activations recorded for propagators named `name`.
    pub fn activations_of(&self, name: &str) -> u32 {
        self.propagator_activations
            .iter()
            .find(|(n, _)| n == name)
            .map_or(0, |(_, c)| *c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = DrainMetrics::default();
        assert_eq!(m.activations, 0);
        assert_eq!(m.failures, 0);
        assert_eq!(m.rounds, 0);
        assert!(!m.cancelled);
        assert!(m.propagator_activations.is_empty());
    }

    #[test]
    fn record_groups_by_name() {
        let mut m = DrainMetrics::default();
        m.record("adder");
        m.record("divider");
        m.record("adder");
        assert_eq!(m.activations, 3);
        assert_eq!(m.activations_of("adder"), 2);
        assert_eq!(m.activations_of("divider"), 1);
        assert_eq!(m.activations_of("missing"), 0);
        assert_eq!(m.propagator_activations[0].0, "adder");
    }
}
