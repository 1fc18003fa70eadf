//! Standard propagators over the arithmetic pack.

use tangle_core::{CellId, Op, PropagatorId};

use crate::error::NetworkError;
use crate::network::Network;
use crate::primitive::primitive_propagator;

impl Network {
    fn op_propagator(
        &mut self,
        name: &str,
        op: Op,
        a: CellId,
        b: CellId,
        out: CellId,
    ) -> Result<PropagatorId, NetworkError> {
        primitive_propagator(name, move |values| Ok(op.apply(values)?)).apply(self, &[a, b, out])
    }

    /// `out = a + b`
    pub fn adder(&mut self, a: CellId, b: CellId, out: CellId) -> Result<PropagatorId, NetworkError> {
        self.op_propagator("adder", Op::Add, a, b, out)
    }

    /// `out = a - b`
    pub fn subtractor(&mut self, a: CellId, b: CellId, out: CellId) -> Result<PropagatorId, NetworkError> {
        self.op_propagator("subtractor", Op::Sub, a, b, out)
    }

    /// `out = a * b`
    pub fn multiplier(&mut self, a: CellId, b: CellId, out: CellId) -> Result<PropagatorId, NetworkError> {
        self.op_propagator("multiplier", Op::Mul, a, b, out)
    }

    /// `out = a / b`; writes nothing when `b` is zero.
    pub fn divider(&mut self, a: CellId, b: CellId, out: CellId) -> Result<PropagatorId, NetworkError> {
        self.op_propagator("divider", Op::Div, a, b, out)
    }

    /// `out = (a == b)`
    pub fn equalizer(&mut self, a: CellId, b: CellId, out: CellId) -> Result<PropagatorId, NetworkError> {
        self.op_propagator("equalizer", Op::Eq, a, b, out)
    }

    /// Copies `input` into `out`.
    pub fn identity(&mut self, input: CellId, out: CellId) -> Result<PropagatorId, NetworkError> {
        primitive_propagator("identity", |values| Ok(values.first().cloned())).apply(self, &[input, out])
    }

    /// `a + b = total`, solvable for any one unknown.
    pub fn sum_constraint(&mut self, a: CellId, b: CellId, total: CellId) -> Result<PropagatorId, NetworkError> {
        self.constraint_propagator("sum", &[a, b, total], move |net, _, _| {
            net.adder(a, b, total)?;
            net.subtractor(total, a, b)?;
            net.subtractor(total, b, a)?;
            Ok(())
        })
    }

    /// `x * y = product`, solvable for any one unknown with a non-zero
    /// divisor.
    pub fn product_constraint(&mut self, x: CellId, y: CellId, product: CellId) -> Result<PropagatorId, NetworkError> {
        self.constraint_propagator("product", &[x, y, product], move |net, _, _| {
            net.multiplier(x, y, product)?;
            net.divider(product, x, y)?;
            net.divider(product, y, x)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use tangle_core::{Content, Value};

    use super::*;

    fn fire_all(net: &mut Network) {
        while net.has_alerts() {
            for p in net.take_alerts() {
                net.activate(p).unwrap();
            }
        }
    }

    fn number(net: &Network, cell: CellId) -> Option<f64> {
        net.strongest(cell).unwrap().base_value().and_then(Value::as_number)
    }

    #[test]
    fn sum_constraint_solves_each_side() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        let b = net.construct_cell("b");
        let c = net.construct_cell("c");
        net.sum_constraint(a, b, c).unwrap();
        net.update(a, 2).unwrap();
        net.update(c, 7).unwrap();
        fire_all(&mut net);
        assert_eq!(number(&net, b), Some(5.0));
    }

    #[test]
    fn identity_copies() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        let b = net.construct_cell("b");
        net.identity(a, b).unwrap();
        net.update(a, "hi").unwrap();
        fire_all(&mut net);
        assert_eq!(net.strongest(b).unwrap(), Content::Value(Value::from("hi")));
    }

    #[test]
    fn equalizer_yields_bool() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        let b = net.construct_cell("b");
        let eq = net.construct_cell("eq");
        net.equalizer(a, b, eq).unwrap();
        net.update(a, 1).unwrap();
        net.update(b, 2).unwrap();
        fire_all(&mut net);
        assert_eq!(net.strongest(eq).unwrap(), Content::Value(Value::Bool(false)));
    }

    #[test]
    fn divider_by_zero_is_silent() {
        let mut net = Network::new();
        let a = net.construct_cell("a");
        let b = net.construct_cell("b");
        let q = net.construct_cell("q");
        net.divider(a, b, q).unwrap();
        net.update(a, 1).unwrap();
        net.update(b, 0).unwrap();
        fire_all(&mut net);
        assert_eq!(net.strongest(q).unwrap(), Content::Nothing);
    }
}
