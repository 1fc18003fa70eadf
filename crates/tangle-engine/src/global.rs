//! The default per-thread runtime.
//!
//! Code that does not want to thread a [`Runtime`] through every call can
//! use the one owned by the current thread. [`reset_runtime`] replaces it
//! with a fresh one, dropping every cell, propagator, premise, and pending
//! task.

use std::cell::RefCell;

use tracing::info;

use crate::error::EngineError;
use crate::runtime::Runtime;

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::new());
}

/// Run `f` against this thread's default runtime.
///
/// Fails with [`EngineError::Reentrant`] when called from inside another
/// `with_runtime` on the same thread.
pub fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> R) -> Result<R, EngineError> {
    RUNTIME.with(|cell| {
        let mut runtime = cell.try_borrow_mut().map_err(|_| EngineError::Reentrant)?;
        Ok(f(&mut runtime))
    })
}

/// Replace this thread's default runtime with a fresh one.
pub fn reset_runtime() -> Result<(), EngineError> {
    RUNTIME.with(|cell| {
        let mut runtime = cell.try_borrow_mut().map_err(|_| EngineError::Reentrant)?;
        *runtime = Runtime::new();
        Ok::<(), EngineError>(())
    })?;
    info!("default runtime reset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_persists_until_reset() {
        reset_runtime().unwrap();
        let a = with_runtime(|rt| {
            let a = rt.construct_cell("a");
            rt.update(a, 1).unwrap();
            a
        })
        .unwrap();
        let found = with_runtime(|rt| rt.find_cell_by_id(a).is_some()).unwrap();
        assert!(found);

        reset_runtime().unwrap();
        let found = with_runtime(|rt| rt.find_cell_by_id(a).is_some()).unwrap();
        assert!(!found);
    }

    #[test]
    fn nested_use_is_reported() {
        let inner = with_runtime(|_| with_runtime(|_| ())).unwrap();
        assert_eq!(inner, Err(EngineError::Reentrant));
        assert_eq!(
            with_runtime(|_| reset_runtime()).unwrap(),
            Err(EngineError::Reentrant)
        );
    }
}
