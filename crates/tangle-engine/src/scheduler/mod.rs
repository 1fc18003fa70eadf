//! Scheduling strategies.
//!
//! A [`Scheduler`] holds the set of alerted propagators and decides which
//! fires next. It never activates anything itself; the
//! [`Runtime`](crate::runtime::Runtime) pops, activates, and feeds the
//! alerts each activation raised back in.
//!
//! | Strategy | Order |
//! |----------|-------|
//! | [`SimpleScheduler`] | FIFO by first alert |
//! | [`StagedScheduler`] | commit actions, ordinary work, then each effectful propagator once per round |
//! | [`InformativenessScheduler`] | highest informativeness + age first |

mod informativeness;
mod simple;
mod staged;

pub use informativeness::{ChangeHeuristic, Informativeness, InformativenessScheduler};
pub use simple::SimpleScheduler;
pub use staged::StagedScheduler;

use tangle_core::PropagatorId;
use tangle_network::{Network, NetworkError};

/// A deferred network mutation run atomically at the start of a round.
pub type CommitAction = Box<dyn FnOnce(&mut Network) -> Result<(), NetworkError>>;

/// Holds alerted propagators and picks the next to fire.
///
/// Entries are keyed by propagator id: alerting a pending propagator
/// again does not queue it twice.
pub trait Scheduler {
    /// Strategy name, for logs.
    fn name(&self) -> &'static str;

    /// Queue `id`.
    fn alert(&mut self, id: PropagatorId, net: &Network);

    /// Pop the next propagator to fire.
    fn next(&mut self, net: &Network) -> Option<PropagatorId>;

    /// Pop everything currently pending, in firing order.
    fn drain_batch(&mut self, net: &Network) -> Vec<PropagatorId> {
        let mut batch = Vec::new();
        while let Some(id) = self.next(net) {
            batch.push(id);
        }
        batch
    }

    /// Drop `id` if pending.
    fn remove(&mut self, id: PropagatorId);

    /// Whether anything is pending, including work held for a later
    /// round and queued commit actions.
    fn has_pending(&self) -> bool;

    /// Pending ids, in the order they would be handed to another
    /// scheduler.
    fn pending(&self) -> Vec<PropagatorId>;

    /// Drop all pending work.
    fn clear(&mut self);

    /// Called after `id`'s body ran.
    fn on_fired(&mut self, _id: PropagatorId, _net: &Network) {}

    /// Called when a round reaches quiescence.
    fn end_round(&mut self, _net: &Network) {}

    /// Offer a commit action. Schedulers without rounds hand it back so
    /// the caller can run it immediately.
    fn defer_commit(&mut self, action: CommitAction) -> Option<CommitAction> {
        Some(action)
    }

    /// Commit actions due at the start of the next round.
    fn take_commit_actions(&mut self) -> Vec<CommitAction> {
        Vec::new()
    }
}
