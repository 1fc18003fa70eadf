//! Core types and traits for the Tangle propagator runtime.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the value lattice that cells accumulate, premise (support) sets, the
//! truth-maintenance store kept per cell, the pluggable merge / strongest /
//! freshness contracts, the arithmetic pack used by primitive propagators,
//! and the error types shared by the rest of the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod content;
pub mod error;
pub mod event;
pub mod id;
pub mod merge;
pub mod ops;
pub mod projection;
pub mod support;
pub mod value;

pub use content::{Content, Supported, Tms};
pub use error::{ArithmeticError, MergeError, PropagatorError};
pub use event::{EventKind, InterestSet};
pub use id::{CellId, ConstructorId, NodeId, PremiseId, PropagatorId, RelationId};
pub use merge::{LatticeMerge, Merge};
pub use ops::Op;
pub use projection::{AllBelieved, Beliefs, BelievedStrongest, Freshness, Strongest, UsableFreshness};
pub use support::PremiseSet;
pub use value::{ConstructorRef, Value};
