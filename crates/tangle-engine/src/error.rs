//! Engine error types.

use tangle_core::{PropagatorError, PropagatorId};
use tangle_network::NetworkError;
use thiserror::Error;

/// Invariant violations detected by
/// [`RuntimeConfig::validate`](crate::config::RuntimeConfig::validate).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Aging rate is NaN, infinite, zero, or negative.
    #[error("aging rate must be finite and positive, got {value}")]
    InvalidAgingRate {
        /// The rejected value.
        value: f64,
    },
    /// Change boost is NaN, infinite, or negative.
    #[error("change boost must be finite and non-negative, got {value}")]
    InvalidChangeBoost {
        /// The rejected value.
        value: f64,
    },
    /// Numeric weight is NaN, infinite, or negative.
    #[error("numeric weight must be finite and non-negative, got {value}")]
    InvalidNumericWeight {
        /// The rejected value.
        value: f64,
    },
    /// `prune_interval` was `Some(0)`.
    #[error("prune interval must be at least 1 drain")]
    ZeroPruneInterval,
}

/// A propagator's own logic failed during a drain. Handed to the drain's
/// error handler; the drain carries on and the propagator is not retried.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("propagator '{name}' ({propagator}) failed: {source}")]
pub struct ActivationError {
    /// The failing propagator.
    pub propagator: PropagatorId,
    /// Its name.
    pub name: String,
    /// What went wrong.
    #[source]
    pub source: PropagatorError,
}

/// Errors that stop the engine.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EngineError {
    /// A propagator misused the network mid-drain. The drain stops;
    /// network state is left as it was at the failing write.
    #[error("fatal error in propagator {propagator}: {source}")]
    Fatal {
        /// The propagator that was running.
        propagator: PropagatorId,
        /// The underlying network error.
        #[source]
        source: NetworkError,
    },
    /// A commit action failed.
    #[error("commit action failed: {0}")]
    Commit(#[source] NetworkError),
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The per-thread runtime was entered while already in use.
    #[error("default runtime is already borrowed on this thread")]
    Reentrant,
}
