use std::collections::HashMap;

use num_bigint::BigUint;

use crate::bdd::Diagram;
use crate::gate::{Gate, GateId};
use crate::types::{Lit, Var};

impl Diagram {
    /// Position of every constraint variable in the diagram order.
    fn levels(&self) -> HashMap<Var, usize> {
        self.terms()
            .iter()
            .enumerate()
            .map(|(i, t)| (t.lit.var(), i))
            .collect()
    }

    /// Number of assignments to the constraint variables accepted by the diagram.
    pub fn sat_count(&self) -> BigUint {
        let n = self.terms().len();
        let levels = self.levels();
        let graph = self.graph();
        let root = self.root();

        // level[g]: first variable position `g` depends on (n for constants),
        // count[g]: models of `g` over the variables at positions level[g]..n.
        let mut level: Vec<usize> = Vec::with_capacity(root.index() + 1);
        let mut count: Vec<BigUint> = Vec::with_capacity(root.index() + 1);
        let scaled = |level: &[usize], count: &[BigUint], g: GateId, from: usize| -> BigUint {
            count[g.index()].clone() << (level[g.index()] - from)
        };

        for id in graph.ids().take(root.index() + 1) {
            let (l, c) = match graph.gate(id) {
                Gate::Const(b) => (n, BigUint::from(b as u8)),
                Gate::Leaf(lit) => {
                    let l = levels[&lit.var()];
                    (l, BigUint::from(1u8) << (n - l - 1))
                }
                Gate::Ite(lit, high, low) => {
                    let l = levels[&lit.var()];
                    let c = scaled(&level, &count, high, l + 1) + scaled(&level, &count, low, l + 1);
                    (l, c)
                }
                Gate::And(a, b) | Gate::Or(a, b) => {
                    // One operand is the selector leaf at the top level,
                    // the other one depends only on later variables.
                    let (sel, rest) = if level[a.index()] <= level[b.index()] { (a, b) } else { (b, a) };
                    debug_assert!(matches!(graph.gate(sel), Gate::Leaf(_)));
                    let l = level[sel.index()];
                    let rest = scaled(&level, &count, rest, l + 1);
                    let c = match graph.gate(id) {
                        Gate::And(..) => rest,
                        _ => (BigUint::from(1u8) << (n - l - 1)) + rest,
                    };
                    (l, c)
                }
            };
            level.push(l);
            count.push(c);
        }

        scaled(&level, &count, root, 0)
    }

    /// Returns one satisfying partial assignment, if any exists.
    ///
    /// Variables not mentioned in the result can take any value.
    pub fn one_sat(&self) -> Option<Vec<Lit>> {
        let graph = self.graph();
        if self.is_zero() {
            return None;
        }

        let mut path = Vec::new();
        let mut current = self.root();

        loop {
            match graph.gate(current) {
                Gate::Const(_) => break,
                Gate::Leaf(lit) => {
                    path.push(lit);
                    break;
                }
                Gate::Ite(lit, high, low) => {
                    // Prefer high branch if satisfiable, otherwise take low
                    if high != GateId::FALSE {
                        path.push(lit);
                        current = high;
                    } else {
                        path.push(-lit);
                        current = low;
                    }
                }
                Gate::And(a, b) => {
                    let (sel, rest) = if matches!(graph.gate(a), Gate::Leaf(_)) { (a, b) } else { (b, a) };
                    if let Gate::Leaf(lit) = graph.gate(sel) {
                        path.push(lit);
                    }
                    current = rest;
                }
                Gate::Or(a, b) => {
                    let sel = if matches!(graph.gate(a), Gate::Leaf(_)) { a } else { b };
                    current = sel;
                }
            }
        }

        Some(path)
    }
}
