//! Compound and constraint propagators: lazily built subnetworks.
//!
//! The builder runs at most once, with the propagator's own relation as
//! the active scope, so everything it creates is torn down with the
//! propagator.

use tracing::debug;

use tangle_core::{CellId, PropagatorId};

use crate::error::{ActivateError, NetworkError};
use crate::network::Network;
use crate::propagator::{Activation, Propagator, PropagatorKind};

/// Builds a subnetwork over a compound's inputs and outputs.
pub type Builder = Box<dyn FnOnce(&mut Network, &[CellId], &[CellId]) -> Result<(), ActivateError>>;

/// When a lazily built propagator is ready to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildTrigger {
    /// Every input is fresh.
    AllInputs,
    /// At least one cell is fresh. Constraints use this so any side of the
    /// relation can drive the others.
    AnyInput,
}

/// Body shared by compound and constraint propagators.
pub struct Compound {
    builder: Option<Builder>,
    trigger: BuildTrigger,
}

impl Compound {
    /// A body that builds with `builder` once `trigger` is met.
    pub fn new(builder: Builder, trigger: BuildTrigger) -> Self {
        Self {
            builder: Some(builder),
            trigger,
        }
    }

    /// Whether the builder has run.
    pub fn is_built(&self) -> bool {
        self.builder.is_none()
    }
}

impl Propagator for Compound {
    fn activate(&mut self, ctx: &mut Activation<'_>) -> Result<(), ActivateError> {
        if self.is_built() {
            return Ok(());
        }
        let contents = ctx.read_inputs()?;
        let ready = match self.trigger {
            BuildTrigger::AllInputs => contents.iter().all(|c| ctx.is_fresh(c)),
            BuildTrigger::AnyInput => contents.iter().any(|c| ctx.is_fresh(c)),
        };
        if !ready {
            return Ok(());
        }
        let Some(builder) = self.builder.take() else {
            return Ok(());
        };
        let id = ctx.id();
        let relation = ctx.relation();
        let inputs = ctx.inputs().to_vec();
        let outputs = ctx.outputs().to_vec();
        let net = ctx.network();
        net.enter_scope(relation)?;
        let result = builder(net, &inputs, &outputs);
        net.exit_scope();
        debug!(propagator = %id, relation = %relation, ok = result.is_ok(), "subnetwork built");
        result
    }
}

impl Network {
    /// A propagator that builds its subnetwork the first time every input
    /// is fresh.
    pub fn compound_propagator(
        &mut self,
        name: impl Into<String>,
        inputs: &[CellId],
        outputs: &[CellId],
        builder: impl FnOnce(&mut Network, &[CellId], &[CellId]) -> Result<(), ActivateError> + 'static,
    ) -> Result<PropagatorId, NetworkError> {
        self.add_propagator(
            name,
            inputs,
            outputs,
            PropagatorKind::Compound,
            Box::new(Compound::new(Box::new(builder), BuildTrigger::AllInputs)),
        )
    }

    /// A compound whose inputs and outputs are the same cells. Builds the
    /// first time any of them is fresh; the builder receives the cells as
    /// both argument lists.
    pub fn constraint_propagator(
        &mut self,
        name: impl Into<String>,
        cells: &[CellId],
        builder: impl FnOnce(&mut Network, &[CellId], &[CellId]) -> Result<(), ActivateError> + 'static,
    ) -> Result<PropagatorId, NetworkError> {
        self.add_propagator(
            name,
            cells,
            cells,
            PropagatorKind::Constraint,
            Box::new(Compound::new(Box::new(builder), BuildTrigger::AnyInput)),
        )
    }
}
