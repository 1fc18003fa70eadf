//! Network-wide premise retraction and reinstatement.

use tracing::debug;

use tangle_core::CellId;

use crate::error::NetworkError;
use crate::network::Network;

impl Network {
    /// Retract a premise everywhere.
    ///
    /// Every cell that ever accepted a contribution under `premise` is
    /// re-projected; cells whose strongest value changed alert their
    /// neighbors and are returned. Retracting a premise nobody has used
    /// interns it as already retracted.
    pub fn kick_out(&mut self, premise: &str) -> Result<Vec<CellId>, NetworkError> {
        let id = self.premises.intern(premise);
        if !self.premises.set_believed(id, false) {
            return Ok(Vec::new());
        }
        let changed = self.refresh_premise_cells(id)?;
        debug!(premise, changed = changed.len(), "premise kicked out");
        Ok(changed)
    }

    /// Reinstate a retracted premise. The inverse of
    /// [`kick_out`](Self::kick_out).
    pub fn bring_in(&mut self, premise: &str) -> Result<Vec<CellId>, NetworkError> {
        let id = self.premises.intern(premise);
        if !self.premises.set_believed(id, true) {
            return Ok(Vec::new());
        }
        let changed = self.refresh_premise_cells(id)?;
        debug!(premise, changed = changed.len(), "premise brought in");
        Ok(changed)
    }

    fn refresh_premise_cells(&mut self, premise: tangle_core::PremiseId) -> Result<Vec<CellId>, NetworkError> {
        let mut changed = Vec::new();
        for cell in self.premises.cells_for(premise) {
            if !self.cells.contains(cell) || self.is_disposed(cell)? {
                continue;
            }
            if self.reproject(cell)? {
                self.touch(cell);
                changed.push(cell);
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangle_core::{Content, PremiseSet, Supported, Value};

    #[test]
    fn kick_out_falls_back_to_other_support() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        net.tell(a, 5, "fst").unwrap();
        net.tell(a, 6, "snd").unwrap();
        assert!(net.is_contradiction(a).unwrap());

        assert_eq!(net.kick_out("snd").unwrap(), vec![a]);
        let fst = net.premises().lookup("fst").unwrap();
        assert_eq!(
            net.strongest(a).unwrap(),
            Content::Supported(Supported::new(5, PremiseSet::single(fst)))
        );
        assert_eq!(net.premises().retracted(), vec!["snd"]);
    }

    #[test]
    fn kick_out_is_idempotent() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        net.tell(a, 1, "p").unwrap();
        assert_eq!(net.kick_out("p").unwrap(), vec![a]);
        assert!(net.kick_out("p").unwrap().is_empty());
        assert_eq!(net.strongest(a).unwrap(), Content::Nothing);
    }

    #[test]
    fn bring_in_restores_value() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        net.tell(a, 2, "p").unwrap();
        net.kick_out("p").unwrap();
        net.take_alerts();
        assert_eq!(net.bring_in("p").unwrap(), vec![a]);
        assert_eq!(net.strongest(a).unwrap().base_value(), Some(&Value::from(2)));
    }

    #[test]
    fn unknown_premise_is_interned_as_retracted() {
        let mut net = Network::new();
        assert!(net.kick_out("ghost").unwrap().is_empty());
        assert_eq!(net.premises().retracted(), vec!["ghost"]);
    }
}
