//! The merge policy: how new information joins a cell's content.
//!
//! [`Merge`] is split into two layers. `merge_values` decides how two base
//! values combine (the only method a custom policy usually overrides); the
//! provided methods lift that rule over premise sets and the content
//! lattice:
//!
//! 1. `Nothing` on either side yields the other side.
//! 2. `Disposed` on either side yields `Disposed`.
//! 3. Agreeing supported values yield the more strongly supported one
//!    (fewer premises, ties broken by premise order).
//! 4. Disagreeing values yield a contradiction over the union of premises.
//! 5. When one value implies the other, the more informative side wins;
//!    otherwise the refined value carries the union of premises.

use crate::content::{Content, Supported, Tms};
use crate::error::MergeError;
use crate::support::PremiseSet;
use crate::value::Value;

/// Relative tolerance for numeric equality.
const NUMBER_TOLERANCE: f64 = 1e-9;

/// A join over cell content.
pub trait Merge: 'static {
    /// Combine two base values.
    ///
    /// Returns `Ok(Some(v))` with the combined value, `Ok(None)` when the
    /// values contradict each other, and `Err(NoHandler)` when the policy
    /// has no rule for this pair of shapes.
    fn merge_values(&self, old: &Value, new: &Value) -> Result<Option<Value>, MergeError> {
        lattice_merge_values(old, new)
    }

    /// Whether `a` carries at least the information in `b`.
    fn implies(&self, a: &Value, b: &Value) -> Result<bool, MergeError> {
        Ok(self.merge_values(a, b)?.as_ref() == Some(a))
    }

    /// Combine two supported values (rules 3–5).
    fn merge_supported(&self, a: &Supported, b: &Supported) -> Result<Content, MergeError> {
        let Some(merged) = self.merge_values(&a.value, &b.value)? else {
            return Ok(Content::Contradiction(a.support.union(&b.support)));
        };
        let a_holds = merged == a.value;
        let b_holds = merged == b.value;
        let chosen = match (a_holds, b_holds) {
            (true, true) => stronger(a, b).clone(),
            (true, false) => a.clone(),
            (false, true) => b.clone(),
            (false, false) => Supported::new(merged, a.support.union(&b.support)),
        };
        Ok(Content::Supported(chosen))
    }

    /// Merge incoming content into a cell's current content.
    ///
    /// Any supported contribution promotes the result to a [`Tms`] so that
    /// retracting a premise can later recompute the cell.
    fn merge(&self, old: &Content, new: &Content) -> Result<Content, MergeError> {
        Ok(match (old, new) {
            (Content::Disposed, _) | (_, Content::Disposed) => Content::Disposed,
            (Content::Nothing, Content::Supported(s)) | (Content::Supported(s), Content::Nothing) => {
                let mut tms = Tms::new();
                tms.assimilate(s.clone(), self)?;
                Content::Tms(tms)
            }
            (Content::Nothing, other) | (other, Content::Nothing) => other.clone(),
            (Content::Contradiction(a), Content::Contradiction(b)) => {
                Content::Contradiction(a.union(b))
            }
            (Content::Contradiction(a), _) => Content::Contradiction(a.clone()),
            (_, Content::Contradiction(b)) => Content::Contradiction(old.support().union(b)),
            (Content::Value(a), Content::Value(b)) => match self.merge_values(a, b)? {
                Some(v) => Content::Value(v),
                None => Content::Contradiction(PremiseSet::empty()),
            },
            (Content::Tms(current), incoming) => {
                let mut tms = current.clone();
                for entry in as_entries(incoming) {
                    tms.assimilate(entry, self)?;
                }
                Content::Tms(tms)
            }
            (current, incoming) => {
                let mut tms = Tms::new();
                for entry in as_entries(current).into_iter().chain(as_entries(incoming)) {
                    tms.assimilate(entry, self)?;
                }
                Content::Tms(tms)
            }
        })
    }
}

/// The default merge policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct LatticeMerge;

impl Merge for LatticeMerge {}

/// Contributions a content adds to a [`Tms`].
fn as_entries(content: &Content) -> Vec<Supported> {
    match content {
        Content::Value(v) => vec![Supported::new(v.clone(), PremiseSet::empty())],
        Content::Supported(s) => vec![s.clone()],
        Content::Tms(t) => t.entries().to_vec(),
        _ => Vec::new(),
    }
}

/// The more strongly supported of two agreeing values.
fn stronger<'a>(a: &'a Supported, b: &'a Supported) -> &'a Supported {
    match a.support.len().cmp(&b.support.len()) {
        std::cmp::Ordering::Less => a,
        std::cmp::Ordering::Greater => b,
        std::cmp::Ordering::Equal => {
            if a.support <= b.support {
                a
            } else {
                b
            }
        }
    }
}

fn numbers_agree(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= NUMBER_TOLERANCE * scale
}

/// Default base-value rules.
///
/// Numbers agree within a relative tolerance, numbers refine intervals
/// that contain them, intervals intersect, tuples merge element-wise, and
/// a different constructor replaces the previous one so behaviour stored
/// in a cell can be swapped.
pub fn lattice_merge_values(old: &Value, new: &Value) -> Result<Option<Value>, MergeError> {
    use Value::*;
    Ok(match (old, new) {
        (Number(a), Number(b)) => numbers_agree(*a, *b).then(|| old.clone()),
        (Number(n), Interval { lo, hi }) | (Interval { lo, hi }, Number(n)) => {
            (*lo <= *n && *n <= *hi).then_some(Number(*n))
        }
        (Interval { lo: a_lo, hi: a_hi }, Interval { lo: b_lo, hi: b_hi }) => {
            let lo = a_lo.max(*b_lo);
            let hi = a_hi.min(*b_hi);
            if lo > hi {
                None
            } else if numbers_agree(lo, *a_lo) && numbers_agree(hi, *a_hi) {
                Some(old.clone())
            } else if numbers_agree(lo, *b_lo) && numbers_agree(hi, *b_hi) {
                Some(new.clone())
            } else {
                Some(Interval { lo, hi })
            }
        }
        (Bool(a), Bool(b)) => (a == b).then(|| old.clone()),
        (Text(a), Text(b)) => (a == b).then(|| old.clone()),
        (Tuple(a), Tuple(b)) => {
            if a.len() != b.len() {
                return Ok(None);
            }
            let mut items = Vec::with_capacity(a.len());
            for (x, y) in a.iter().zip(b) {
                match lattice_merge_values(x, y)? {
                    Some(v) => items.push(v),
                    None => return Ok(None),
                }
            }
            Some(Tuple(items))
        }
        (Constructor(a), Constructor(b)) => {
            if a == b {
                Some(old.clone())
            } else {
                Some(new.clone())
            }
        }
        _ => {
            return Err(MergeError::NoHandler {
                old: old.shape(),
                new: new.shape(),
            })
        }
    })
}
