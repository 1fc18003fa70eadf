//! Runtime configuration and validation.

use crate::error::ConfigError;

// ── BatchMode ──────────────────────────────────────────────────────

/// How a drain takes work from the scheduler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BatchMode {
    /// Pop and activate one propagator at a time; alerts raised by an
    /// activation are visible to the very next pop.
    #[default]
    Sequential,
    /// Snapshot every pending propagator into a batch, activate the whole
    /// batch, then collect the alerts it raised.
    Simultaneous,
}

// ── InformativenessConfig ──────────────────────────────────────────

/// Tuning for [`InformativenessScheduler`](crate::scheduler::InformativenessScheduler).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InformativenessConfig {
    /// Added when any input changed since the propagator last fired.
    /// Default: 1.0.
    pub change_boost: f64,
    /// Added to every waiting propagator's age each time another one
    /// fires. Default: 0.1.
    pub aging_rate: f64,
    /// Scale of the numeric heuristic (inputs closer to zero score
    /// higher). Default: 1.0.
    pub numeric_weight: f64,
}

impl Default for InformativenessConfig {
    fn default() -> Self {
        Self {
            change_boost: 1.0,
            aging_rate: 0.1,
            numeric_weight: 1.0,
        }
    }
}

impl InformativenessConfig {
    /// Check every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.aging_rate.is_finite() || self.aging_rate <= 0.0 {
            return Err(ConfigError::InvalidAgingRate {
                value: self.aging_rate,
            });
        }
        if !self.change_boost.is_finite() || self.change_boost < 0.0 {
            return Err(ConfigError::InvalidChangeBoost {
                value: self.change_boost,
            });
        }
        if !self.numeric_weight.is_finite() || self.numeric_weight < 0.0 {
            return Err(ConfigError::InvalidNumericWeight {
                value: self.numeric_weight,
            });
        }
        Ok(())
    }
}

// ── RuntimeConfig ──────────────────────────────────────────────────

/// Configuration for a [`Runtime`](crate::runtime::Runtime).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RuntimeConfig {
    /// How drains take work from the scheduler.
    pub batch_mode: BatchMode,
    /// Run [`Network::prune`](tangle_network::Network::prune) after every
    /// n-th drain. `None` never prunes automatically.
    pub prune_interval: Option<u32>,
    /// Tuning for the scheduler returned by
    /// [`Runtime::informativeness_scheduler`](crate::runtime::Runtime::informativeness_scheduler).
    pub informativeness: InformativenessConfig,
}

impl RuntimeConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prune_interval == Some(0) {
            return Err(ConfigError::ZeroPruneInterval);
        }
        self.informativeness.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        RuntimeConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_prune_interval_rejected() {
        let cfg = RuntimeConfig {
            prune_interval: Some(0),
            ..RuntimeConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroPruneInterval));
    }

    #[test]
    fn aging_rate_must_be_positive() {
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = InformativenessConfig {
                aging_rate: value,
                ..InformativenessConfig::default()
            };
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::InvalidAgingRate { .. })
            ));
        }
    }

    #[test]
    fn zero_boost_is_allowed() {
        let cfg = InformativenessConfig {
            change_boost: 0.0,
            numeric_weight: 0.0,
            ..InformativenessConfig::default()
        };
        cfg.validate().unwrap();
    }
}
