//! Breadth-first reachability over the bipartite cell/propagator graph.

use std::collections::VecDeque;

use indexmap::IndexSet;
use tangle_core::NodeId;

use crate::network::Network;

impl Network {
    /// Every node reachable from `start` by following data flow forward:
    /// cell → the propagators reading it → the cells they write.
    ///
    /// `start` itself is excluded. Disposed nodes are traversed like any
    /// other until cleanup removes them.
    pub fn downstream(&self, start: NodeId) -> Vec<NodeId> {
        self.traverse(start, |net, node, out| match node {
            NodeId::Cell(c) => {
                if let Some(cell) = net.cells.get(c) {
                    out.extend(cell.neighbors.keys().map(|&p| NodeId::Propagator(p)));
                }
            }
            NodeId::Propagator(p) => {
                if let Some(prop) = net.propagators.get(p) {
                    out.extend(prop.outputs.iter().map(|&c| NodeId::Cell(c)));
                }
            }
        })
    }

    /// Every node that can influence `start`: cell → the propagators
    /// writing it → the cells they read.
    pub fn upstream(&self, start: NodeId) -> Vec<NodeId> {
        self.traverse(start, |net, node, out| match node {
            NodeId::Cell(c) => {
                if let Some(cell) = net.cells.get(c) {
                    out.extend(cell.writers.iter().map(|&p| NodeId::Propagator(p)));
                }
            }
            NodeId::Propagator(p) => {
                if let Some(prop) = net.propagators.get(p) {
                    out.extend(prop.inputs.iter().map(|&c| NodeId::Cell(c)));
                }
            }
        })
    }

    fn traverse(
        &self,
        start: NodeId,
        step: impl Fn(&Network, NodeId, &mut Vec<NodeId>),
    ) -> Vec<NodeId> {
        let mut seen = IndexSet::new();
        seen.insert(start);
        let mut queue = VecDeque::from([start]);
        let mut next = Vec::new();
        while let Some(node) = queue.pop_front() {
            next.clear();
            step(self, node, &mut next);
            for &n in &next {
                if seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen.into_iter().skip(1).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActivateError, Activation, Propagator, PropagatorKind};

    struct Noop;

    impl Propagator for Noop {
        fn activate(&mut self, _ctx: &mut Activation<'_>) -> Result<(), ActivateError> {
            Ok(())
        }
    }

    #[test]
    fn chain_is_walked_in_both_directions() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        let b = net.construct_cell("b");
        let c = net.construct_cell("c");
        let p = net
            .add_propagator("p", &[a], &[b], PropagatorKind::Custom, Box::new(Noop))
            .unwrap();
        let q = net
            .add_propagator("q", &[b], &[c], PropagatorKind::Custom, Box::new(Noop))
            .unwrap();

        let forward: Vec<NodeId> = vec![p.into(), b.into(), q.into(), c.into()];
        assert_eq!(net.downstream(a.into()), forward);
        let backward: Vec<NodeId> = vec![q.into(), b.into(), p.into(), a.into()];
        assert_eq!(net.upstream(c.into()), backward);
        assert!(net.downstream(c.into()).is_empty());
    }

    #[test]
    fn cycles_terminate() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        let b = net.construct_cell("b");
        net.add_propagator("ab", &[a], &[b], PropagatorKind::Custom, Box::new(Noop))
            .unwrap();
        net.add_propagator("ba", &[b], &[a], PropagatorKind::Custom, Box::new(Noop))
            .unwrap();
        let reached = net.downstream(a.into());
        assert_eq!(reached.len(), 3);
        assert!(!reached.contains(&NodeId::from(a)));
    }
}
