//! Base values carried by cells.
//!
//! [`Value`] is a closed set of shapes. Merge and arithmetic rules are
//! selected by matching on the shape of both operands rather than through
//! open-ended runtime registration.

use std::fmt;
use std::sync::Arc;

use crate::id::ConstructorId;

/// Handle to a propagator constructor stored in a cell.
///
/// The constructor body lives in the network's constructor registry; the
/// value only carries its id (identity for comparisons) and a name for
/// diagnostics.
#[derive(Clone, Debug)]
pub struct ConstructorRef {
    id: ConstructorId,
    name: Arc<str>,
}

impl ConstructorRef {
    /// Create a handle for a registered constructor.
    pub fn new(id: ConstructorId, name: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Registry id of the constructor.
    pub fn id(&self) -> ConstructorId {
        self.id
    }

    /// Diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for ConstructorRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// A base value: the information a contribution carries once its support
/// layer is stripped.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A real number.
    Number(f64),
    /// A boolean.
    Bool(bool),
    /// A string.
    Text(String),
    /// A closed numeric interval `[lo, hi]`: partial knowledge of a number.
    Interval {
        /// Lower bound (inclusive).
        lo: f64,
        /// Upper bound (inclusive).
        hi: f64,
    },
    /// A fixed-arity composite, merged element-wise.
    Tuple(Vec<Value>),
    /// A propagator constructor, consumed by apply-subnet propagators.
    Constructor(ConstructorRef),
}

impl Value {
    /// Interval constructor that orders its bounds.
    pub fn interval(a: f64, b: f64) -> Self {
        Self::Interval {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    /// Short name of the value's shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::Text(_) => "text",
            Self::Interval { .. } => "interval",
            Self::Tuple(_) => "tuple",
            Self::Constructor(_) => "constructor",
        }
    }

    /// The number, if this is a `Number`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The constructor handle, if this is a `Constructor`.
    pub fn as_constructor(&self) -> Option<&ConstructorRef> {
        match self {
            Self::Constructor(c) => Some(c),
            _ => None,
        }
    }

    /// Magnitude used by numeric scheduling heuristics.
    ///
    /// Intervals report the magnitude of their nearest bound to zero;
    /// non-numeric shapes report `None`.
    pub fn magnitude(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(n.abs()),
            Self::Interval { lo, hi } => {
                if *lo <= 0.0 && *hi >= 0.0 {
                    Some(0.0)
                } else {
                    Some(lo.abs().min(hi.abs()))
                }
            }
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<ConstructorRef> for Value {
    fn from(v: ConstructorRef) -> Self {
        Self::Constructor(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Interval { lo, hi } => write!(f, "[{lo}, {hi}]"),
            Self::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Self::Constructor(c) => write!(f, "<{}>", c.name()),
        }
    }
}
