//! Arithmetic pack for primitive propagators.
//!
//! Each operator is defined per pair of shapes: numbers, intervals
//! (interval arithmetic, numbers promoted to degenerate intervals when
//! mixed), and tuples (element-wise). `Ok(None)` means "no result", such
//! as division by zero; primitive propagators skip the write in that case.

use crate::error::ArithmeticError;
use crate::value::Value;

/// Operators provided by the pack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a × b`
    Mul,
    /// `a ÷ b`
    Div,
    /// `a = b`, producing a boolean.
    Eq,
}

impl Op {
    /// Operator symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Eq => "=",
        }
    }

    /// Apply the operator to exactly two operands.
    pub fn apply(self, args: &[Value]) -> Result<Option<Value>, ArithmeticError> {
        match args {
            [a, b] => binary(self, a, b),
            _ => Err(ArithmeticError::Arity {
                op: self.symbol(),
                expected: 2,
                got: args.len(),
            }),
        }
    }
}

/// `a + b`
pub fn add(a: &Value, b: &Value) -> Result<Option<Value>, ArithmeticError> {
    binary(Op::Add, a, b)
}

/// `a - b`
pub fn sub(a: &Value, b: &Value) -> Result<Option<Value>, ArithmeticError> {
    binary(Op::Sub, a, b)
}

/// `a × b`
pub fn mul(a: &Value, b: &Value) -> Result<Option<Value>, ArithmeticError> {
    binary(Op::Mul, a, b)
}

/// `a ÷ b`; `None` when `b` is (or may be) zero.
pub fn div(a: &Value, b: &Value) -> Result<Option<Value>, ArithmeticError> {
    binary(Op::Div, a, b)
}

/// `a = b`
pub fn eq(a: &Value, b: &Value) -> Result<Option<Value>, ArithmeticError> {
    binary(Op::Eq, a, b)
}

fn binary(op: Op, a: &Value, b: &Value) -> Result<Option<Value>, ArithmeticError> {
    if op == Op::Eq {
        return Ok(Some(Value::Bool(a == b)));
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(number_op(op, *x, *y).map(Value::Number)),
        (Value::Tuple(xs), Value::Tuple(ys)) => {
            if xs.len() != ys.len() {
                return Err(ArithmeticError::TupleArity {
                    left: xs.len(),
                    right: ys.len(),
                });
            }
            let mut out = Vec::with_capacity(xs.len());
            for (x, y) in xs.iter().zip(ys) {
                match binary(op, x, y)? {
                    Some(v) => out.push(v),
                    None => return Ok(None),
                }
            }
            Ok(Some(Value::Tuple(out)))
        }
        _ => match (bounds(a), bounds(b)) {
            (Some(x), Some(y)) => {
                Ok(interval_op(op, x, y).map(|(lo, hi)| Value::Interval { lo, hi }))
            }
            _ => Err(ArithmeticError::ShapeMismatch {
                op: op.symbol(),
                left: a.shape(),
                right: b.shape(),
            }),
        },
    }
}

fn number_op(op: Op, x: f64, y: f64) -> Option<f64> {
    match op {
        Op::Add => Some(x + y),
        Op::Sub => Some(x - y),
        Op::Mul => Some(x * y),
        Op::Div => (y != 0.0).then(|| x / y),
        Op::Eq => None,
    }
}

fn bounds(v: &Value) -> Option<(f64, f64)> {
    match v {
        Value::Number(n) => Some((*n, *n)),
        Value::Interval { lo, hi } => Some((*lo, *hi)),
        _ => None,
    }
}

fn interval_op(op: Op, (a, b): (f64, f64), (c, d): (f64, f64)) -> Option<(f64, f64)> {
    match op {
        Op::Add => Some((a + c, b + d)),
        Op::Sub => Some((a - d, b - c)),
        Op::Mul => Some(span([a * c, a * d, b * c, b * d])),
        Op::Div => {
            if c <= 0.0 && d >= 0.0 {
                None
            } else {
                interval_op(Op::Mul, (a, b), (1.0 / d, 1.0 / c))
            }
        }
        Op::Eq => None,
    }
}

fn span(products: [f64; 4]) -> (f64, f64) {
    products
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_arithmetic() {
        assert_eq!(add(&Value::from(2), &Value::from(3)).unwrap(), Some(Value::from(5)));
        assert_eq!(div(&Value::from(40), &Value::from(8)).unwrap(), Some(Value::from(5)));
        assert_eq!(div(&Value::from(1), &Value::from(0)).unwrap(), None);
    }

    #[test]
    fn interval_arithmetic() {
        let a = Value::interval(1.0, 2.0);
        let b = Value::interval(3.0, 4.0);
        assert_eq!(add(&a, &b).unwrap(), Some(Value::interval(4.0, 6.0)));
        assert_eq!(sub(&a, &b).unwrap(), Some(Value::interval(-3.0, -1.0)));
        assert_eq!(mul(&a, &b).unwrap(), Some(Value::interval(3.0, 8.0)));
        assert_eq!(mul(&a, &Value::from(2)).unwrap(), Some(Value::interval(2.0, 4.0)));
        assert_eq!(div(&a, &Value::interval(-1.0, 1.0)).unwrap(), None);
    }

    #[test]
    fn tuple_arithmetic_is_elementwise() {
        let a = Value::Tuple(vec![Value::from(1), Value::from(2)]);
        let b = Value::Tuple(vec![Value::from(10), Value::from(20)]);
        assert_eq!(
            add(&a, &b).unwrap(),
            Some(Value::Tuple(vec![Value::from(11), Value::from(22)]))
        );
        let short = Value::Tuple(vec![Value::from(1)]);
        assert!(matches!(add(&a, &short), Err(ArithmeticError::TupleArity { .. })));
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let err = add(&Value::from(1), &Value::from("x")).unwrap_err();
        assert_eq!(
            err,
            ArithmeticError::ShapeMismatch {
                op: "+",
                left: "number",
                right: "text"
            }
        );
    }

    #[test]
    fn apply_checks_arity() {
        assert!(matches!(
            Op::Add.apply(&[Value::from(1)]),
            Err(ArithmeticError::Arity { got: 1, .. })
        ));
        assert_eq!(
            Op::Eq.apply(&[Value::from(1), Value::from(1)]).unwrap(),
            Some(Value::Bool(true))
        );
    }
}
