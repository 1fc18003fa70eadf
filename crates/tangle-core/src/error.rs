//! Error types shared across the Tangle workspace.
//!
//! Contradiction and disposal are lattice values, not errors; the types
//! here cover the genuinely exceptional cases: values with no merge rule,
//! arithmetic on mismatched shapes, and failures raised by user logic
//! inside a propagator.

use thiserror::Error;

/// Errors from the merge policy.
///
/// A missing handler is a programming error: the caller combined two value
/// shapes the installed policy has no rule for. It is reported to the
/// writer immediately and never degrades to `Nothing`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    /// No merge rule exists for this pair of value shapes.
    #[error("no merge handler for {old} and {new}")]
    NoHandler {
        /// Shape of the value already in the cell.
        old: &'static str,
        /// Shape of the incoming value.
        new: &'static str,
    },
}

/// Errors from the arithmetic pack.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ArithmeticError {
    /// The operator has no definition for this combination of shapes.
    #[error("'{op}' is not defined for {left} and {right}")]
    ShapeMismatch {
        /// Operator symbol.
        op: &'static str,
        /// Shape of the left operand.
        left: &'static str,
        /// Shape of the right operand.
        right: &'static str,
    },
    /// Element-wise tuple arithmetic on tuples of different lengths.
    #[error("tuple arity mismatch: {left} vs {right}")]
    TupleArity {
        /// Length of the left tuple.
        left: usize,
        /// Length of the right tuple.
        right: usize,
    },
    /// An operator received the wrong number of operands.
    #[error("'{op}' expects {expected} operands, got {got}")]
    Arity {
        /// Operator symbol.
        op: &'static str,
        /// Expected operand count.
        expected: usize,
        /// Actual operand count.
        got: usize,
    },
}

/// Errors raised by user logic inside a propagator activation.
///
/// The scheduler wraps these with the propagator's identity and hands them
/// to the caller's error handler; the drain continues with the next
/// propagator.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PropagatorError {
    /// The propagator's function failed.
    #[error("execution failed: {reason}")]
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// Arithmetic on the propagator's inputs failed.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    /// A user-defined constraint was violated.
    #[error("constraint violation: {constraint}")]
    ConstraintViolation {
        /// Description of the violated constraint.
        constraint: String,
    },
}

impl PropagatorError {
    /// Shorthand for [`PropagatorError::ExecutionFailed`].
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_shapes() {
        let e = MergeError::NoHandler {
            old: "number",
            new: "bool",
        };
        assert_eq!(e.to_string(), "no merge handler for number and bool");

        let e = PropagatorError::from(ArithmeticError::ShapeMismatch {
            op: "+",
            left: "number",
            right: "text",
        });
        assert_eq!(e.to_string(), "'+' is not defined for number and text");
    }

    #[test]
    fn failed_shorthand() {
        assert_eq!(
            PropagatorError::failed("boom"),
            PropagatorError::ExecutionFailed {
                reason: "boom".into()
            }
        );
    }
}
