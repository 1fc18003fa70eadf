//! Test utilities and propagator fixtures for Tangle development.
//!
//! Provides reusable [`Propagator`](tangle_network::Propagator) bodies in
//! [`fixtures`] and small helpers for reading cells in assertions.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::RefCell;
use std::rc::Rc;

use tangle_core::{CellId, Value};
use tangle_network::Network;

pub use fixtures::{CountingPropagator, FailingPropagator, RecordingEffect, SelfAlerting};

/// Shared, ordered record of which fixture fired, by label.
pub type FireLog = Rc<RefCell<Vec<String>>>;

/// A fresh, empty [`FireLog`].
pub fn fire_log() -> FireLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// The strongest value of `cell` as a number, if it is one.
pub fn number(net: &Network, cell: CellId) -> Option<f64> {
    net.strongest(cell)
        .ok()
        .and_then(|c| c.base_value().and_then(Value::as_number))
}

/// Activate alerted propagators straight off the network's outbox until
/// none remain, with no scheduler involved. Returns the number of
/// activations attempted.
///
/// Panics on any activation error; intended for tests only.
pub fn fire_all(net: &mut Network) -> usize {
    let mut fired = 0;
    while net.has_alerts() {
        for p in net.take_alerts() {
            if let Err(e) = net.activate(p) {
                panic!("activation of {p} failed: {e}");
            }
            fired += 1;
        }
    }
    fired
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_reads_plain_values() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        assert_eq!(number(&net, a), None);
        net.update(a, 2.5).unwrap();
        assert_eq!(number(&net, a), Some(2.5));
    }

    #[test]
    fn fire_all_reaches_quiescence() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        let b = net.construct_cell("b");
        net.identity(a, b).unwrap();
        net.update(a, 1).unwrap();
        assert!(fire_all(&mut net) >= 1);
        assert_eq!(number(&net, b), Some(1.0));
        assert_eq!(fire_all(&mut net), 0);
    }
}
