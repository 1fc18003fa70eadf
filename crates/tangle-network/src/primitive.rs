//! Primitive propagators: stateless functions of their inputs' strongest
//! values.

use std::rc::Rc;

use tracing::trace;

use tangle_core::{CellId, Content, Op, PremiseSet, PropagatorError, PropagatorId, Supported, Value};

use crate::error::{ActivateError, NetworkError};
use crate::network::Network;
use crate::propagator::{Activation, Propagator, PropagatorKind};

/// The function a primitive applies. `Ok(None)` means "no output this
/// time" (division by zero, for instance) and writes nothing.
pub type PrimitiveFn = Rc<dyn Fn(&[Value]) -> Result<Option<Value>, PropagatorError>>;

/// Body of a primitive propagator.
///
/// Fires only when every input is fresh. The output carries the union of
/// the inputs' supports, so derived values inherit their premises.
pub struct Primitive {
    f: PrimitiveFn,
}

impl Primitive {
    /// Wrap a function.
    pub fn new(f: PrimitiveFn) -> Self {
        Self { f }
    }
}

impl Propagator for Primitive {
    fn activate(&mut self, ctx: &mut Activation<'_>) -> Result<(), ActivateError> {
        let contents = ctx.read_inputs()?;
        if !contents.iter().all(|c| ctx.is_fresh(c)) {
            return Ok(());
        }
        let mut values = Vec::with_capacity(contents.len());
        let mut support = PremiseSet::empty();
        for content in &contents {
            let Some(value) = content.base_value() else {
                return Ok(());
            };
            values.push(value.clone());
            support = support.union(&content.support());
        }
        let Some(result) = (self.f)(&values)? else {
            trace!(propagator = %ctx.id(), "primitive produced no output");
            return Ok(());
        };
        let content = if support.is_empty() {
            Content::Value(result)
        } else {
            Content::Supported(Supported::new(result, support))
        };
        let outputs = ctx.outputs().to_vec();
        for out in outputs {
            ctx.write(out, content.clone())?;
        }
        Ok(())
    }
}

/// A named, reusable primitive. Applying it to cells `[i1, …, in, out]`
/// builds a propagator reading `i1..in` and writing `out`.
#[derive(Clone)]
pub struct PrimitiveConstructor {
    name: String,
    f: PrimitiveFn,
}

/// Build a [`PrimitiveConstructor`] from a closure.
pub fn primitive_propagator(
    name: impl Into<String>,
    f: impl Fn(&[Value]) -> Result<Option<Value>, PropagatorError> + 'static,
) -> PrimitiveConstructor {
    PrimitiveConstructor {
        name: name.into(),
        f: Rc::new(f),
    }
}

impl PrimitiveConstructor {
    /// A constructor for one of the built-in arithmetic operators.
    pub fn from_op(op: Op) -> Self {
        primitive_propagator(op.symbol(), move |values| Ok(op.apply(values)?))
    }

    /// Constructor name, used for every propagator it builds.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build a propagator over `cells`; the last cell is the output.
    pub fn apply(&self, net: &mut Network, cells: &[CellId]) -> Result<PropagatorId, NetworkError> {
        match cells.split_last() {
            Some((&output, inputs)) if !inputs.is_empty() => net.add_propagator(
                self.name.clone(),
                inputs,
                &[output],
                PropagatorKind::Primitive,
                Box::new(Primitive::new(Rc::clone(&self.f))),
            ),
            _ => Err(NetworkError::NoInputs {
                name: self.name.clone(),
            }),
        }
    }
}

impl std::fmt::Debug for PrimitiveConstructor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimitiveConstructor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Network {
    /// Build a primitive propagator computing `output` from `inputs`.
    pub fn primitive(
        &mut self,
        name: impl Into<String>,
        inputs: &[CellId],
        output: CellId,
        f: impl Fn(&[Value]) -> Result<Option<Value>, PropagatorError> + 'static,
    ) -> Result<PropagatorId, NetworkError> {
        let cells: Vec<CellId> = inputs.iter().copied().chain([output]).collect();
        primitive_propagator(name, f).apply(self, &cells)
    }
}
