//! Quiescent state is independent of scheduling: random acyclic
//! arithmetic networks reach the same fixpoint under every scheduler and
//! batch mode.

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tangle_core::{CellId, Content};
use tangle_engine::{
    BatchMode, InformativenessScheduler, Runtime, RuntimeConfig, Scheduler, SimpleScheduler,
    StagedScheduler,
};

/// Wiring of a generated network: seeds and `(op, lhs, rhs)` triples,
/// each writing a fresh cell. Operands always precede their output.
#[derive(Debug)]
struct Layout {
    seeds: Vec<i32>,
    ops: Vec<(u8, usize, usize)>,
}

impl Layout {
    fn generate(seed: u64, sources: usize, ops: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let seeds = (0..sources).map(|_| rng.random_range(-9..=9)).collect();
        let ops = (0..ops)
            .map(|i| {
                let op = rng.random_range(0..3u8);
                // Products only over sources keep every value an exact
                // integer.
                let available = if op == 2 { sources } else { sources + i };
                (op, rng.random_range(0..available), rng.random_range(0..available))
            })
            .collect();
        Self { seeds, ops }
    }

    /// Build on `rt`, inputs written before any propagator exists when
    /// `values_first` is set, after otherwise.
    fn build(&self, rt: &mut Runtime, values_first: bool) -> Vec<CellId> {
        let mut cells: Vec<CellId> = (0..self.seeds.len())
            .map(|i| rt.construct_cell(format!("in{i}")))
            .collect();
        if values_first {
            self.write_seeds(rt, &cells);
        }
        for (i, &(op, lhs, rhs)) in self.ops.iter().enumerate() {
            let out = rt.construct_cell(format!("n{i}"));
            let (a, b) = (cells[lhs], cells[rhs]);
            let net = rt.network_mut();
            match op {
                0 => net.adder(a, b, out),
                1 => net.subtractor(a, b, out),
                _ => net.multiplier(a, b, out),
            }
            .unwrap();
            cells.push(out);
        }
        if !values_first {
            self.write_seeds(rt, &cells);
        }
        cells
    }

    fn write_seeds(&self, rt: &mut Runtime, cells: &[CellId]) {
        for (i, &v) in self.seeds.iter().enumerate() {
            rt.tell(cells[i], v, &format!("in{i}")).unwrap();
        }
    }
}

fn settle(
    layout: &Layout,
    scheduler: Box<dyn Scheduler>,
    batch_mode: BatchMode,
    values_first: bool,
) -> Vec<Content> {
    let mut rt = Runtime::with_config(RuntimeConfig {
        batch_mode,
        ..RuntimeConfig::default()
    })
    .unwrap();
    rt.set_scheduler(scheduler);
    let cells = layout.build(&mut rt, values_first);
    assert!(rt.run().unwrap().is_empty());
    cells.iter().map(|&c| rt.strongest(c).unwrap()).collect()
}

fn schedulers() -> Vec<Box<dyn Scheduler>> {
    vec![
        Box::new(SimpleScheduler::new()),
        Box::new(StagedScheduler::new()),
        Box::new(InformativenessScheduler::new()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn fixpoint_is_schedule_independent(
        seed in any::<u64>(),
        sources in 1usize..5,
        ops in 1usize..24,
    ) {
        let layout = Layout::generate(seed, sources, ops);
        let reference = settle(&layout, Box::new(SimpleScheduler::new()), BatchMode::Sequential, true);
        for mode in [BatchMode::Sequential, BatchMode::Simultaneous] {
            for values_first in [true, false] {
                for scheduler in schedulers() {
                    let name = scheduler.name();
                    let got = settle(&layout, scheduler, mode, values_first);
                    prop_assert_eq!(&got, &reference, "{} {:?} values_first={}", name, mode, values_first);
                }
            }
        }
    }

    #[test]
    fn same_seed_same_network(seed in any::<u64>()) {
        let a = Layout::generate(seed, 3, 12);
        let b = Layout::generate(seed, 3, 12);
        prop_assert_eq!(a.seeds, b.seeds);
        prop_assert_eq!(a.ops, b.ops);
    }
}
