//! FIFO scheduling.

use indexmap::IndexSet;
use tangle_core::PropagatorId;
use tangle_network::Network;

use super::Scheduler;

/// Fires propagators in the order they were first alerted.
#[derive(Debug, Default)]
pub struct SimpleScheduler {
    queue: IndexSet<PropagatorId>,
}

impl SimpleScheduler {
    /// An empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for SimpleScheduler {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn alert(&mut self, id: PropagatorId, _net: &Network) {
        self.queue.insert(id);
    }

    fn next(&mut self, _net: &Network) -> Option<PropagatorId> {
        self.queue.shift_remove_index(0)
    }

    fn drain_batch(&mut self, _net: &Network) -> Vec<PropagatorId> {
        self.queue.drain(..).collect()
    }

    fn remove(&mut self, id: PropagatorId) {
        self.queue.shift_remove(&id);
    }

    fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    fn pending(&self) -> Vec<PropagatorId> {
        self.queue.iter().copied().collect()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(n: u32) -> PropagatorId {
        PropagatorId::new(n, 0)
    }

    #[test]
    fn fifo_without_duplicates() {
        let net = Network::new();
        let mut s = SimpleScheduler::new();
        s.alert(pid(2), &net);
        s.alert(pid(1), &net);
        s.alert(pid(2), &net);
        assert_eq!(s.pending(), vec![pid(2), pid(1)]);
        assert_eq!(s.next(&net), Some(pid(2)));
        assert_eq!(s.next(&net), Some(pid(1)));
        assert_eq!(s.next(&net), None);
    }

    #[test]
    fn remove_and_clear() {
        let net = Network::new();
        let mut s = SimpleScheduler::new();
        s.alert(pid(0), &net);
        s.alert(pid(1), &net);
        s.remove(pid(0));
        assert_eq!(s.pending(), vec![pid(1)]);
        s.clear();
        assert!(!s.has_pending());
    }

    #[test]
    fn commit_actions_are_handed_back() {
        let mut s = SimpleScheduler::new();
        assert!(s.defer_commit(Box::new(|_| Ok(()))).is_some());
        assert!(s.take_commit_actions().is_empty());
    }
}
