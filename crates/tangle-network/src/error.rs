//! Errors from network construction and mutation.

use tangle_core::{
    ArithmeticError, CellId, ConstructorId, MergeError, PropagatorError, PropagatorId, RelationId,
};
use thiserror::Error;

/// Programming and configuration errors raised synchronously by the
/// network. None of these are deferred to the scheduler.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NetworkError {
    /// The cell id does not resolve (never existed or already cleaned up).
    #[error("unknown cell {id}")]
    UnknownCell {
        /// The stale or foreign id.
        id: CellId,
    },
    /// The propagator id does not resolve.
    #[error("unknown propagator {id}")]
    UnknownPropagator {
        /// The stale or foreign id.
        id: PropagatorId,
    },
    /// The relation id does not resolve.
    #[error("unknown relation {id}")]
    UnknownRelation {
        /// The missing relation.
        id: RelationId,
    },
    /// No constructor is registered under this id.
    #[error("unknown constructor {id}")]
    UnknownConstructor {
        /// The missing constructor.
        id: ConstructorId,
    },
    /// A primitive propagator was constructed without inputs.
    #[error("propagator '{name}' needs at least one input")]
    NoInputs {
        /// Name of the rejected propagator.
        name: String,
    },
    /// A propagator constructor was applied to the wrong number of cells.
    #[error("propagator '{name}' expects {expected} cells, got {got}")]
    CellArity {
        /// Name of the rejected propagator.
        name: String,
        /// Expected cell count.
        expected: usize,
        /// Supplied cell count.
        got: usize,
    },
    /// Merging into a cell failed.
    #[error("merge into cell {cell} failed: {source}")]
    Merge {
        /// The cell being written.
        cell: CellId,
        /// The merge policy's error.
        #[source]
        source: MergeError,
    },
}

/// Failure of a single propagator activation.
///
/// `Propagator` failures are isolated: the scheduler reports them and
/// keeps draining. `Network` failures are programming errors and abort
/// the drain.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ActivateError {
    /// User logic inside the propagator failed.
    #[error(transparent)]
    Propagator(#[from] PropagatorError),
    /// The propagator misused the network.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl From<ArithmeticError> for ActivateError {
    fn from(e: ArithmeticError) -> Self {
        Self::Propagator(PropagatorError::Arithmetic(e))
    }
}

impl ActivateError {
    /// Whether this error must stop the drain.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
