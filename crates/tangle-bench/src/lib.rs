//! Benchmark profiles for Tangle networks.
//!
//! Each profile builds a ready-to-drain [`Runtime`]:
//!
//! - [`chain_profile`]: a line of identity propagators
//! - [`sum_ladder_profile`]: chained sum constraints solved backwards
//! - [`random_dag_profile`]: seeded acyclic arithmetic network

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tangle_core::CellId;
use tangle_engine::Runtime;
use tangle_network::NetworkError;

/// `len` cells joined by identities, head set to 1. Returns the runtime
/// and the head and tail cells.
pub fn chain_profile(len: usize) -> Result<(Runtime, CellId, CellId), NetworkError> {
    let mut rt = Runtime::new();
    let head = rt.construct_cell("c0");
    let mut tail = head;
    for i in 1..len.max(1) {
        let next = rt.construct_cell(format!("c{i}"));
        rt.network_mut().identity(tail, next)?;
        tail = next;
    }
    rt.update(head, 1)?;
    Ok((rt, head, tail))
}

/// `rungs` sum constraints `t[i] = t[i+1] + step[i]` with only the top
/// total and every step known, so the drain solves downwards. Returns
/// the runtime and the bottom cell.
pub fn sum_ladder_profile(rungs: usize) -> Result<(Runtime, CellId), NetworkError> {
    let mut rt = Runtime::new();
    let top = rt.construct_cell("t0");
    rt.tell(top, rungs as f64 * 2.0, "top")?;
    let mut upper = top;
    for i in 0..rungs {
        let lower = rt.construct_cell(format!("t{}", i + 1));
        let step = rt.construct_cell(format!("step{i}"));
        rt.network_mut().sum_constraint(lower, step, upper)?;
        rt.tell(step, 2, &format!("step{i}"))?;
        upper = lower;
    }
    Ok((rt, upper))
}

/// A seeded acyclic network: `sources` told inputs and `ops`
/// add/subtract/multiply propagators, each writing a fresh cell from
/// earlier ones. Products take source operands only, so values stay
/// small. Returns the runtime and every cell in creation order.
pub fn random_dag_profile(
    seed: u64,
    sources: usize,
    ops: usize,
) -> Result<(Runtime, Vec<CellId>), NetworkError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let sources = sources.max(1);
    let mut rt = Runtime::new();
    let mut cells = Vec::with_capacity(sources + ops);
    for i in 0..sources {
        let c = rt.construct_cell(format!("in{i}"));
        rt.tell(c, rng.random_range(-9i32..=9), &format!("in{i}"))?;
        cells.push(c);
    }
    for i in 0..ops {
        let op = rng.random_range(0..3u8);
        let available = if op == 2 { sources } else { cells.len() };
        let a = cells[rng.random_range(0..available)];
        let b = cells[rng.random_range(0..available)];
        let out = rt.construct_cell(format!("n{i}"));
        let net = rt.network_mut();
        match op {
            0 => net.adder(a, b, out)?,
            1 => net.subtractor(a, b, out)?,
            _ => net.multiplier(a, b, out)?,
        };
        cells.push(out);
    }
    Ok((rt, cells))
}
