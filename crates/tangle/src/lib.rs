//! Tangle: propagator networks with truth maintenance.
//!
//! This is the facade crate re-exporting the public API of the Tangle
//! sub-crates. Most users only need `tangle` as a dependency.
//!
//! # Quick start
//!
//! ```rust
//! use tangle::prelude::*;
//!
//! let mut rt = Runtime::new();
//! let x = rt.construct_cell("x");
//! let y = rt.construct_cell("y");
//! let product = rt.construct_cell("product");
//! rt.network_mut().product_constraint(x, y, product).unwrap();
//!
//! rt.tell(x, 8, "fst").unwrap();
//! rt.tell(product, 40, "snd").unwrap();
//! rt.run().unwrap();
//! assert_eq!(rt.strongest(y).unwrap().base_value(), Some(&Value::from(5)));
//!
//! // A conflicting claim contradicts; retracting it restores the answer.
//! rt.tell(product, 5, "red").unwrap();
//! rt.run().unwrap();
//! assert!(rt.is_contradiction(product).unwrap());
//! rt.kick_out("red").unwrap();
//! rt.run().unwrap();
//! assert!(!rt.is_contradiction(product).unwrap());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tangle-core` | Ids, values, content lattice, merge and projection policies |
//! | [`network`] | `tangle-network` | Cells, propagators, relations, disposal, standard propagators |
//! | [`engine`] | `tangle-engine` | Schedulers, the runtime, drains and metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and policies (`tangle-core`).
///
/// Contains the [`types::Value`] and [`types::Content`] lattice and the
/// [`types::Merge`], [`types::Strongest`] and [`types::Freshness`]
/// policy traits.
pub use tangle_core as types;

/// The propagator graph (`tangle-network`).
///
/// [`network::Network`] owns cells and propagators; implement
/// [`network::Propagator`] for custom bodies.
pub use tangle_network as network;

/// Scheduling and execution (`tangle-engine`).
///
/// [`engine::Runtime`] drives a network to quiescence with a swappable
/// [`engine::Scheduler`].
pub use tangle_engine as engine;

/// Common imports for typical Tangle usage.
///
/// ```rust
/// use tangle::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tangle_core::{
        CellId, ConstructorRef, Content, NodeId, PremiseSet, PropagatorId, Supported, Value,
    };

    // Policies
    pub use tangle_core::{Freshness, LatticeMerge, Merge, Strongest};

    // Errors
    pub use tangle_core::{MergeError, PropagatorError};
    pub use tangle_engine::{ActivationError, EngineError};
    pub use tangle_network::{ActivateError, NetworkError};

    // Network
    pub use tangle_network::{Activation, Network, Propagator, PropagatorKind};

    // Engine
    pub use tangle_engine::{
        BatchMode, ChangeHeuristic, DrainMetrics, Informativeness, InformativenessScheduler,
        Runtime, RuntimeConfig, Scheduler, SimpleScheduler, StagedScheduler,
    };
}
