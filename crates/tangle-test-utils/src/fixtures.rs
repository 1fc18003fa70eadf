//! Reusable propagator test fixtures.
//!
//! - [`CountingPropagator`]: forwards its first input to every output and
//!   counts activations.
//! - [`FailingPropagator`]: fails deterministically after N calls.
//! - [`RecordingEffect`]: appends a label to a [`FireLog`] on every
//!   activation; meant to be marked effectful.
//! - [`SelfAlerting`]: re-alerts itself a fixed number of times, with a
//!   fixed informativeness, for fairness tests.

use std::cell::Cell;
use std::rc::Rc;

use tangle_core::PropagatorError;
use tangle_network::{ActivateError, Activation, Propagator};

use crate::FireLog;

/// Forwards the strongest value of its first input to each output and
/// counts activations.
pub struct CountingPropagator {
    calls: Rc<Cell<usize>>,
}

impl CountingPropagator {
    /// Returns the body and a handle to its call counter.
    pub fn new() -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (
            Self {
                calls: Rc::clone(&calls),
            },
            calls,
        )
    }
}

impl Propagator for CountingPropagator {
    fn activate(&mut self, ctx: &mut Activation<'_>) -> Result<(), ActivateError> {
        self.calls.set(self.calls.get() + 1);
        let Some(&input) = ctx.inputs().first() else {
            return Ok(());
        };
        let content = ctx.strongest(input)?;
        if !ctx.is_fresh(&content) {
            return Ok(());
        }
        let outputs = ctx.outputs().to_vec();
        for out in outputs {
            ctx.write(out, content.clone())?;
        }
        Ok(())
    }
}

/// Fails deterministically after a configurable number of successful
/// calls.
pub struct FailingPropagator {
    pub succeed_count: usize,
    calls: Rc<Cell<usize>>,
}

impl FailingPropagator {
    /// A propagator that succeeds `succeed_count` times, then fails.
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// Handle to the call counter.
    pub fn calls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }
}

impl Propagator for FailingPropagator {
    fn activate(&mut self, _ctx: &mut Activation<'_>) -> Result<(), ActivateError> {
        let n = self.calls.get();
        self.calls.set(n + 1);
        if n >= self.succeed_count {
            return Err(PropagatorError::failed(format!(
                "deliberate failure after {} successful calls",
                self.succeed_count
            ))
            .into());
        }
        Ok(())
    }
}

/// Records `label` in a shared log each time it fires.
pub struct RecordingEffect {
    pub label: String,
    log: FireLog,
}

impl RecordingEffect {
    pub fn new(label: impl Into<String>, log: &FireLog) -> Self {
        Self {
            label: label.into(),
            log: Rc::clone(log),
        }
    }
}

impl Propagator for RecordingEffect {
    fn activate(&mut self, _ctx: &mut Activation<'_>) -> Result<(), ActivateError> {
        self.log.borrow_mut().push(self.label.clone());
        Ok(())
    }
}

/// Logs `label` and re-alerts itself until `remaining` runs out.
pub struct SelfAlerting {
    pub label: String,
    pub remaining: u32,
    pub priority: f64,
    log: FireLog,
}

impl SelfAlerting {
    pub fn new(label: impl Into<String>, remaining: u32, priority: f64, log: &FireLog) -> Self {
        Self {
            label: label.into(),
            remaining,
            priority,
            log: Rc::clone(log),
        }
    }
}

impl Propagator for SelfAlerting {
    fn activate(&mut self, ctx: &mut Activation<'_>) -> Result<(), ActivateError> {
        self.log.borrow_mut().push(self.label.clone());
        if self.remaining > 0 {
            self.remaining -= 1;
            let id = ctx.id();
            ctx.network().alert(id);
        }
        Ok(())
    }

    fn informativeness(&self) -> Option<f64> {
        Some(self.priority)
    }
}
