//! Constructor registry and the apply-subnet propagator.
//!
//! A constructor is a named subnetwork factory stored in a cell as a
//! [`Value::Constructor`]. An apply-subnet propagator instantiates whatever
//! constructor its constructor cell currently holds; when that changes it
//! tears the previous instantiation down and builds the new one.
//!
//! Output cells keep whatever the previous subnetwork wrote. If the new
//! subnetwork writes a different value, the cell's merge policy decides
//! the outcome; under the default lattice merge that is a contradiction.

use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use tangle_core::{
    CellId, ConstructorId, ConstructorRef, PropagatorError, PropagatorId, RelationId, Value,
};

use crate::error::{ActivateError, NetworkError};
use crate::network::Network;
use crate::propagator::{Activation, Propagator, PropagatorKind};

/// Builds one instantiation of a subnetwork over `(inputs, outputs)`.
pub type SubnetFactory = Rc<dyn Fn(&mut Network, &[CellId], &[CellId]) -> Result<(), ActivateError>>;

/// Registered subnetwork constructors.
#[derive(Default)]
pub struct ConstructorRegistry {
    entries: IndexMap<ConstructorId, (ConstructorRef, SubnetFactory)>,
    next_id: u32,
}

impl ConstructorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`.
    pub fn register(&mut self, name: &str, factory: SubnetFactory) -> ConstructorRef {
        let id = ConstructorId(self.next_id);
        self.next_id += 1;
        let handle = ConstructorRef::new(id, name);
        self.entries.insert(id, (handle.clone(), factory));
        handle
    }

    /// Factory for `id`.
    pub fn factory(&self, id: ConstructorId) -> Option<SubnetFactory> {
        self.entries.get(&id).map(|(_, f)| Rc::clone(f))
    }

    /// Handle for `id`.
    pub fn get(&self, id: ConstructorId) -> Option<&ConstructorRef> {
        self.entries.get(&id).map(|(r, _)| r)
    }

    /// Number of registered constructors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ConstructorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.values().map(|(r, _)| r))
            .finish()
    }
}

/// Body of an apply-subnet propagator. Its first input is the
/// constructor cell; the rest are handed to the subnetwork.
#[derive(Debug, Default)]
pub struct ApplySubnet {
    current: Option<(ConstructorId, RelationId)>,
}

impl ApplySubnet {
    /// A body with nothing instantiated yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Propagator for ApplySubnet {
    fn activate(&mut self, ctx: &mut Activation<'_>) -> Result<(), ActivateError> {
        let Some((&constructor_cell, inputs)) = ctx.inputs().split_first() else {
            return Ok(());
        };
        let inputs = inputs.to_vec();
        let content = ctx.strongest(constructor_cell)?;
        if !ctx.is_fresh(&content) {
            return Ok(());
        }
        let handle = match content.base_value() {
            Some(Value::Constructor(handle)) => handle.clone(),
            Some(other) => {
                return Err(PropagatorError::failed(format!(
                    "constructor cell holds a {}, not a constructor",
                    other.shape()
                ))
                .into())
            }
            None => return Ok(()),
        };
        if self.current.is_some_and(|(id, _)| id == handle.id()) {
            return Ok(());
        }

        let id = ctx.id();
        let owner = ctx.relation();
        let outputs = ctx.outputs().to_vec();
        let net = ctx.network();
        if let Some((previous, relation)) = self.current.take() {
            debug!(propagator = %id, from = %previous, to = %handle.id(), "swapping subnetwork");
            net.retire_relation(relation)?;
        }
        net.enter_scope(owner)?;
        let result = net.instantiate(&handle, &inputs, &outputs);
        net.exit_scope();
        let relation = result?;
        self.current = Some((handle.id(), relation));
        Ok(())
    }
}

impl Network {
    /// Register a subnetwork constructor. Store the returned handle in a
    /// cell to select it.
    pub fn register_constructor(
        &mut self,
        name: &str,
        factory: impl Fn(&mut Network, &[CellId], &[CellId]) -> Result<(), ActivateError> + 'static,
    ) -> ConstructorRef {
        self.constructors.register(name, Rc::new(factory))
    }

    /// Build one instantiation of `constructor` under a fresh child of the
    /// active relation. Returns that relation; retiring it tears the
    /// instantiation down.
    pub fn instantiate(
        &mut self,
        constructor: &ConstructorRef,
        inputs: &[CellId],
        outputs: &[CellId],
    ) -> Result<RelationId, ActivateError> {
        let factory = self
            .constructors
            .factory(constructor.id())
            .ok_or(NetworkError::UnknownConstructor { id: constructor.id() })?;
        let relation = self.create_relation(constructor.name(), self.current_relation());
        self.enter_scope(relation)?;
        let result = factory(self, inputs, outputs);
        self.exit_scope();
        result.map(|()| relation)
    }

    /// The registered constructors.
    pub fn constructors(&self) -> &ConstructorRegistry {
        &self.constructors
    }

    /// A propagator that instantiates the constructor held by
    /// `constructor` over `inputs` and `outputs`.
    pub fn apply_subnet(
        &mut self,
        name: impl Into<String>,
        constructor: CellId,
        inputs: &[CellId],
        outputs: &[CellId],
    ) -> Result<PropagatorId, NetworkError> {
        let all_inputs: Vec<CellId> = std::iter::once(constructor).chain(inputs.iter().copied()).collect();
        self.add_propagator(
            name,
            &all_inputs,
            outputs,
            PropagatorKind::ApplySubnet,
            Box::new(ApplySubnet::new()),
        )
    }
}

#[cfg(test)]
mod tests {
    use tangle_core::{Content, Op};

    use super::*;
    use crate::primitive::PrimitiveConstructor;

    fn fire_all(net: &mut Network) {
        while net.has_alerts() {
            for p in net.take_alerts() {
                net.activate(p).unwrap();
            }
        }
    }

    #[test]
    fn instantiates_selected_constructor() {
        let mut net = Network::new();
        let doubler = net.register_constructor("double", |net, ins, outs| {
            PrimitiveConstructor::from_op(Op::Add).apply(net, &[ins[0], ins[0], outs[0]])?;
            Ok(())
        });
        let k = net.construct_cell("k");
        let x = net.construct_cell("x");
        let y = net.construct_cell("y");
        net.apply_subnet("apply", k, &[x], &[y]).unwrap();
        net.update(x, 3).unwrap();
        fire_all(&mut net);
        assert_eq!(net.strongest(y).unwrap(), Content::Nothing);

        net.update(k, doubler).unwrap();
        fire_all(&mut net);
        assert_eq!(net.strongest(y).unwrap(), Content::Value(Value::from(6)));
    }

    #[test]
    fn non_constructor_value_is_a_propagator_error() {
        let mut net = Network::new();
        let k = net.construct_cell("k");
        let y = net.construct_cell("y");
        let p = net.apply_subnet("apply", k, &[], &[y]).unwrap();
        net.update(k, 1).unwrap();
        let err = net.activate(p).unwrap_err();
        assert!(!err.is_fatal());
    }

    #[test]
    fn instantiate_builds_under_child_relation() {
        let mut net = Network::new();
        let copy = net.register_constructor("copy", |net, ins, outs| {
            net.identity(ins[0], outs[0])?;
            Ok(())
        });
        let a = net.construct_cell("a");
        let b = net.construct_cell("b");
        let relation = net.instantiate(&copy, &[a], &[b]).unwrap();
        let rel = net.relations().get(relation).unwrap();
        assert_eq!(rel.name(), "copy");
        assert_eq!(rel.propagators().len(), 1);
        assert_eq!(rel.parent(), Some(net.relations().root()));
    }

    #[test]
    fn registry_hands_out_distinct_ids() {
        let mut net = Network::new();
        let a = net.register_constructor("a", |_, _, _| Ok(()));
        let b = net.register_constructor("b", |_, _, _| Ok(()));
        assert_ne!(a, b);
        assert_eq!(net.constructors().len(), 2);
        assert_eq!(net.constructors().get(b.id()).unwrap().name(), "b");
    }
}
