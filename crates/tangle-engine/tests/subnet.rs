//! Swapping the subnetwork behind an `apply_subnet` propagator.

use tangle_core::{CellId, ConstructorRef, Merge, MergeError, Value};
use tangle_engine::Runtime;
use tangle_network::NetworkError;
use tangle_test_utils::number;

/// Newest value wins outright.
struct Latest;

impl Merge for Latest {
    fn merge_values(&self, _old: &Value, new: &Value) -> Result<Option<Value>, MergeError> {
        Ok(Some(new.clone()))
    }
}

struct Swappable {
    rt: Runtime,
    k: CellId,
    y: CellId,
    double: ConstructorRef,
    square: ConstructorRef,
}

fn swappable() -> Result<Swappable, NetworkError> {
    let mut rt = Runtime::new();
    let net = rt.network_mut();
    let double = net.register_constructor("double", |net, ins, outs| {
        net.adder(ins[0], ins[0], outs[0])?;
        Ok(())
    });
    let square = net.register_constructor("square", |net, ins, outs| {
        net.multiplier(ins[0], ins[0], outs[0])?;
        Ok(())
    });
    let k = rt.construct_cell("k");
    let x = rt.construct_cell("x");
    let y = rt.construct_cell("y");
    rt.apply_subnet("apply", k, &[x], &[y])?;
    rt.update(x, 3)?;
    Ok(Swappable {
        rt,
        k,
        y,
        double,
        square,
    })
}

#[test]
fn swapping_constructor_rebuilds_the_subnetwork() {
    let Swappable {
        mut rt,
        k,
        y,
        double,
        square,
    } = swappable().unwrap();
    rt.set_merge(Box::new(Latest));

    rt.update(k, double).unwrap();
    rt.run().unwrap();
    assert_eq!(number(rt.network(), y), Some(6.0));
    assert_eq!(rt.network().propagator_count(), 2);

    rt.update(k, square).unwrap();
    rt.run().unwrap();
    assert_eq!(number(rt.network(), y), Some(9.0));
    // The adder was torn down with its relation; only `apply` and the
    // multiplier remain.
    assert_eq!(rt.network().propagator_count(), 2);
    let names: Vec<&str> = rt
        .network()
        .propagator_ids()
        .into_iter()
        .filter_map(|p| rt.find_propagator_by_id(p).map(|n| n.name()))
        .collect();
    assert_eq!(names, vec!["apply", "multiplier"]);
}

#[test]
fn reselecting_the_same_constructor_is_a_no_op() {
    let Swappable {
        mut rt, k, double, ..
    } = swappable().unwrap();
    rt.update(k, double.clone()).unwrap();
    rt.run().unwrap();
    let before = rt.network().propagator_count();
    rt.update(k, double).unwrap();
    rt.run().unwrap();
    assert_eq!(rt.network().propagator_count(), before);
}

#[test]
fn old_output_lingers_under_the_lattice_merge() {
    let Swappable {
        mut rt,
        k,
        y,
        double,
        square,
    } = swappable().unwrap();

    rt.update(k, double).unwrap();
    rt.run().unwrap();
    assert_eq!(number(rt.network(), y), Some(6.0));

    // The old subnetwork's 6 is still in `y` when the new one writes 9.
    rt.update(k, square).unwrap();
    rt.run().unwrap();
    assert!(rt.is_contradiction(y).unwrap());
}

#[test]
fn non_constructor_in_selector_reports_a_failure() {
    let Swappable { mut rt, k, .. } = swappable().unwrap();
    rt.update(k, 1).unwrap();
    let failures = rt.run().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].name, "apply");
}
