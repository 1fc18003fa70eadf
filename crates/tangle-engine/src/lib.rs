//! Schedulers and the runtime that drives Tangle networks to quiescence.
//!
//! [`Runtime`] pairs a [`Network`](tangle_network::Network) with a
//! swappable [`Scheduler`]. Writes only record alerts; nothing fires until
//! a drain ([`Runtime::execute_all_tasks_sequential`]) or a single step
//! ([`Runtime::steppable_run_task`]) is requested.
//!
//! Execution is single-threaded and cooperative. The only cross-thread
//! type is [`CancelHandle`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod error;
pub mod global;
pub mod metrics;
pub mod runtime;
pub mod scheduler;

pub use cancel::CancelHandle;
pub use config::{BatchMode, InformativenessConfig, RuntimeConfig};
pub use error::{ActivationError, ConfigError, EngineError};
pub use global::{reset_runtime, with_runtime};
pub use metrics::DrainMetrics;
pub use runtime::Runtime;
pub use scheduler::{
    ChangeHeuristic, CommitAction, Informativeness, InformativenessScheduler, Scheduler,
    SimpleScheduler, StagedScheduler,
};
