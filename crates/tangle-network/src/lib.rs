//! Cell and propagator registries for Tangle networks.
//!
//! A [`Network`] owns every cell, propagator, relation, premise, and
//! subnetwork constructor. Cells accumulate partial information through a
//! pluggable merge; propagators are boxed [`Propagator`] bodies woken when
//! cells they read change. Scheduling lives in `tangle-engine`: the network
//! only records which propagators were alerted.
//!
//! ```text
//! Network
//! ├── Arena<CellId, CellNode>            content, strongest, neighbors, writers
//! ├── Arena<PropagatorId, PropagatorNode> body, inputs, outputs, relation
//! ├── RelationTree                        scopes built subnetworks hang off
//! ├── PremiseRegistry                     belief flags + premise → cells
//! ├── ConstructorRegistry                 apply-subnet factories
//! └── alert outbox / disposal queue
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod cell;
pub mod compound;
pub mod dispose;
pub mod error;
pub mod library;
pub mod network;
pub mod premise;
pub mod primitive;
pub mod propagator;
pub mod relation;
pub mod subnet;
pub mod traversal;
pub mod truth;

pub use cell::CellNode;
pub use compound::{BuildTrigger, Builder, Compound};
pub use dispose::{CleanupReport, PruneReport};
pub use error::{ActivateError, NetworkError};
pub use network::Network;
pub use premise::PremiseRegistry;
pub use primitive::{primitive_propagator, Primitive, PrimitiveConstructor, PrimitiveFn};
pub use propagator::{
    Activation, ActivationOutcome, CellList, Propagator, PropagatorKind, PropagatorNode,
};
pub use relation::{Relation, RelationTree};
pub use subnet::{ApplySubnet, ConstructorRegistry, SubnetFactory};
