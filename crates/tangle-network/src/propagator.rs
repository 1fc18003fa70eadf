//! The [`Propagator`] trait, its stored node, and the activation context.
//!
//! A propagator never owns its cells. The network stores the declared
//! inputs and outputs alongside the boxed body, registers the propagator
//! as a neighbor of each input and a writer of each output, and hands the
//! body an [`Activation`] when the scheduler fires it.

use smallvec::SmallVec;
use tangle_core::{CellId, Content, PropagatorId, RelationId};

use crate::error::{ActivateError, NetworkError};
use crate::network::Network;

/// Cell lists are short; most propagators touch three cells or fewer.
pub type CellList = SmallVec<[CellId; 4]>;

/// The activation behaviour of a propagator.
///
/// # Contract
///
/// - Read inputs through [`Activation::strongest`] (or
///   [`Activation::read_inputs`]); unusable inputs mean "do nothing yet".
/// - Write only through [`Activation::write`], which merges.
/// - Disposed boundaries never reach `activate`: the network disposes the
///   propagator instead.
///
/// # Examples
///
/// ```
/// use tangle_core::{Content, Value};
/// use tangle_network::{Activation, ActivateError, Network, Propagator, PropagatorKind};
///
/// struct Negate;
///
/// impl Propagator for Negate {
///     fn activate(&mut self, ctx: &mut Activation<'_>) -> Result<(), ActivateError> {
///         let input = ctx.strongest(ctx.inputs()[0])?;
///         if let Some(n) = input.base_value().and_then(Value::as_number) {
///             let out = ctx.outputs()[0];
///             ctx.write(out, Content::Value(Value::Number(-n)))?;
///         }
///         Ok(())
///     }
/// }
///
/// let mut net = Network::new();
/// let a = net.construct_cell("a");
/// let b = net.construct_cell("b");
/// net.add_propagator("negate", &[a], &[b], PropagatorKind::Custom, Box::new(Negate)).unwrap();
/// ```
pub trait Propagator: 'static {
    /// Run one activation.
    fn activate(&mut self, ctx: &mut Activation<'_>) -> Result<(), ActivateError>;

    /// Fixed scheduling priority for informativeness-ordered schedulers.
    /// `None` lets the scheduler's heuristic decide.
    fn informativeness(&self) -> Option<f64> {
        None
    }
}

/// Which of the standard shapes a propagator has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropagatorKind {
    /// Stateless function of its inputs.
    Primitive,
    /// Lazily builds an internal subnetwork once inputs are usable.
    Compound,
    /// Compound whose inputs and outputs are the same cells.
    Constraint,
    /// Instantiates the subnetwork named by a constructor cell.
    ApplySubnet,
    /// Anything else.
    Custom,
}

/// A propagator as stored in the network arena.
pub struct PropagatorNode {
    pub(crate) name: String,
    pub(crate) kind: PropagatorKind,
    pub(crate) relation: RelationId,
    pub(crate) inputs: CellList,
    pub(crate) outputs: CellList,
    pub(crate) effectful: bool,
    pub(crate) disposed: bool,
    pub(crate) last_fired: u64,
    pub(crate) activations: u64,
    pub(crate) body: Option<Box<dyn Propagator>>,
}

impl PropagatorNode {
    /// Propagator name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shape of the propagator.
    pub fn kind(&self) -> PropagatorKind {
        self.kind
    }

    /// The relation this propagator owns.
    pub fn relation(&self) -> RelationId {
        self.relation
    }

    /// Declared inputs.
    pub fn inputs(&self) -> &[CellId] {
        &self.inputs
    }

    /// Declared outputs.
    pub fn outputs(&self) -> &[CellId] {
        &self.outputs
    }

    /// Whether the propagator has externally visible side effects.
    pub fn is_effectful(&self) -> bool {
        self.effectful
    }

    /// Whether the propagator has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Network clock value at the last activation (0 if never fired).
    pub fn last_fired(&self) -> u64 {
        self.last_fired
    }

    /// Number of times the body has run.
    pub fn activation_count(&self) -> u64 {
        self.activations
    }
}

impl std::fmt::Debug for PropagatorNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropagatorNode")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("relation", &self.relation)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("effectful", &self.effectful)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

/// What happened when the network was asked to activate a propagator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The body ran.
    Fired,
    /// A boundary cell was disposed; the propagator disposed itself.
    Disposed,
    /// The propagator is gone, already disposed, or currently running.
    Skipped,
}

/// Context handed to [`Propagator::activate`].
pub struct Activation<'a> {
    network: &'a mut Network,
    propagator: PropagatorId,
    relation: RelationId,
    inputs: CellList,
    outputs: CellList,
}

impl<'a> Activation<'a> {
    pub(crate) fn new(
        network: &'a mut Network,
        propagator: PropagatorId,
        relation: RelationId,
        inputs: CellList,
        outputs: CellList,
    ) -> Self {
        Self {
            network,
            propagator,
            relation,
            inputs,
            outputs,
        }
    }

    /// Id of the running propagator.
    pub fn id(&self) -> PropagatorId {
        self.propagator
    }

    /// The running propagator's own relation.
    pub fn relation(&self) -> RelationId {
        self.relation
    }

    /// Declared inputs.
    pub fn inputs(&self) -> &[CellId] {
        &self.inputs
    }

    /// Declared outputs.
    pub fn outputs(&self) -> &[CellId] {
        &self.outputs
    }

    /// Strongest value of any cell.
    pub fn strongest(&self, cell: CellId) -> Result<Content, NetworkError> {
        self.network.strongest(cell)
    }

    /// Strongest values of all inputs, in declaration order.
    pub fn read_inputs(&self) -> Result<Vec<Content>, NetworkError> {
        self.inputs.iter().map(|&c| self.network.strongest(c)).collect()
    }

    /// Whether `content` counts as ready input under the network's
    /// freshness predicate.
    pub fn is_fresh(&self, content: &Content) -> bool {
        self.network.freshness().is_fresh(content)
    }

    /// Merge `content` into `cell`. Returns whether the cell changed.
    pub fn write(&mut self, cell: CellId, content: Content) -> Result<bool, NetworkError> {
        self.network.add_content(cell, content)
    }

    /// The whole network, for builders that create cells and propagators.
    pub fn network(&mut self) -> &mut Network {
        self.network
    }
}
