//! Gate DAG of a decision diagram.
//!
//! Gates live in an arena ([`GateGraph`]) and are referenced by [`GateId`]
//! handles. Every gate is hash-consed through a unique table keyed by the gate
//! itself (combinator kind plus children), so two construction paths that
//! arrive at the same sub-function share one gate.
//!
//! Children are always allocated before their parents, hence a parent's id is
//! strictly larger than the ids of its children. Evaluation and model counting
//! rely on this and work in a single forward pass.

use std::fmt::{Display, Formatter};

use log::trace;

use crate::cache::Cache;
use crate::signal::Signal;
use crate::types::{Lit, Var};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GateId(u32);

impl GateId {
    pub const FALSE: GateId = GateId(0);
    pub const TRUE: GateId = GateId(1);
    /// Returned by construction requests after the clause budget ran out.
    pub(crate) const PLACEHOLDER: GateId = GateId(u32::MAX);

    pub(crate) const fn from_index(index: usize) -> Self {
        GateId(index as u32)
    }

    pub const fn from_bool(value: bool) -> Self {
        if value {
            GateId::TRUE
        } else {
            GateId::FALSE
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_const(self) -> bool {
        self.0 <= 1
    }
}

impl Display for GateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            GateId::FALSE => write!(f, "@0"),
            GateId::TRUE => write!(f, "@1"),
            GateId::PLACEHOLDER => write!(f, "@#"),
            GateId(i) => write!(f, "@{}", i),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Gate {
    Const(bool),
    Leaf(Lit),
    And(GateId, GateId),
    Or(GateId, GateId),
    /// `if lit then high else low`.
    Ite(Lit, GateId, GateId),
}

// Getters
impl Gate {
    pub fn children(&self) -> Vec<GateId> {
        match *self {
            Gate::Const(_) | Gate::Leaf(_) => vec![],
            Gate::And(a, b) | Gate::Or(a, b) | Gate::Ite(_, a, b) => vec![a, b],
        }
    }
}

#[derive(Debug, Clone)]
struct GateNode {
    gate: Gate,
    signal: Option<Signal>,
}

pub struct GateGraph {
    nodes: Vec<GateNode>,
    unique: Cache<Gate, GateId>,
    shortcut: bool,
}

impl GateGraph {
    /// Creates a graph holding just the two constants.
    ///
    /// With `shortcut`, ITE requests with a constant child degenerate into
    /// AND/OR gates over a literal leaf.
    pub fn new(shortcut: bool) -> Self {
        let nodes = vec![
            GateNode {
                gate: Gate::Const(false),
                signal: Some(Signal::zero()),
            },
            GateNode {
                gate: Gate::Const(true),
                signal: Some(Signal::one()),
            },
        ];
        Self {
            nodes,
            unique: Cache::new(),
            shortcut,
        }
    }

    /// Number of allocated gates, constants included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 2
    }

    pub fn gate(&self, id: GateId) -> Gate {
        self.nodes[id.index()].gate
    }

    /// CNF signal of a materialized gate.
    pub fn signal(&self, id: GateId) -> Option<Signal> {
        self.nodes[id.index()].signal
    }

    pub(crate) fn set_signal(&mut self, id: GateId, signal: Signal) {
        self.nodes[id.index()].signal = Some(signal);
    }

    /// Ids of all allocated gates in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = GateId> {
        (0..self.nodes.len() as u32).map(GateId)
    }

    pub fn unique_hits(&self) -> usize {
        self.unique.hits()
    }

    pub fn unique_misses(&self) -> usize {
        self.unique.misses()
    }

    fn intern(&mut self, gate: Gate) -> GateId {
        if let Some(id) = self.unique.get(&gate) {
            trace!("unique: {:?} -> {}", gate, id);
            return id;
        }
        let id = GateId(self.nodes.len() as u32);
        self.nodes.push(GateNode { gate, signal: None });
        self.unique.insert(gate, id);
        trace!("new gate {} = {:?}", id, gate);
        id
    }

    pub fn leaf(&mut self, lit: Lit) -> GateId {
        self.intern(Gate::Leaf(lit))
    }

    pub fn mk_and(&mut self, a: GateId, b: GateId) -> GateId {
        if a == GateId::FALSE || b == GateId::FALSE {
            return GateId::FALSE;
        }
        if a == GateId::TRUE {
            return b;
        }
        if b == GateId::TRUE || a == b {
            return a;
        }
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        self.intern(Gate::And(a, b))
    }

    pub fn mk_or(&mut self, a: GateId, b: GateId) -> GateId {
        if a == GateId::TRUE || b == GateId::TRUE {
            return GateId::TRUE;
        }
        if a == GateId::FALSE {
            return b;
        }
        if b == GateId::FALSE || a == b {
            return a;
        }
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        self.intern(Gate::Or(a, b))
    }

    pub fn mk_ite(&mut self, lit: Lit, high: GateId, low: GateId) -> GateId {
        if high == low {
            return high;
        }
        if self.shortcut {
            return match (high, low) {
                (GateId::TRUE, GateId::FALSE) => self.leaf(lit),
                (GateId::FALSE, GateId::TRUE) => self.leaf(-lit),
                (GateId::FALSE, _) => {
                    let sel = self.leaf(-lit);
                    self.mk_and(sel, low)
                }
                (_, GateId::TRUE) => {
                    let sel = self.leaf(-lit);
                    self.mk_or(sel, high)
                }
                (GateId::TRUE, _) => {
                    let sel = self.leaf(lit);
                    self.mk_or(sel, low)
                }
                (_, GateId::FALSE) => {
                    let sel = self.leaf(lit);
                    self.mk_and(sel, high)
                }
                _ => self.intern(Gate::Ite(lit, high, low)),
            };
        }
        self.intern(Gate::Ite(lit, high, low))
    }

    /// Value of `root` under `assignment`.
    pub fn eval(&self, root: GateId, assignment: impl Fn(Var) -> bool) -> bool {
        let mut values: Vec<bool> = Vec::with_capacity(root.index() + 1);
        for node in &self.nodes[..=root.index()] {
            let value = match node.gate {
                Gate::Const(b) => b,
                Gate::Leaf(lit) => lit.eval(assignment(lit.var())),
                Gate::And(a, b) => values[a.index()] && values[b.index()],
                Gate::Or(a, b) => values[a.index()] || values[b.index()],
                Gate::Ite(lit, high, low) => {
                    if lit.eval(assignment(lit.var())) {
                        values[high.index()]
                    } else {
                        values[low.index()]
                    }
                }
            };
            values.push(value);
        }
        values[root.index()]
    }

    /// Gates reachable from `root`, in increasing id order.
    pub fn descendants(&self, root: GateId) -> Vec<GateId> {
        let mut reachable = vec![false; root.index() + 1];
        reachable[root.index()] = true;
        for i in (0..=root.index()).rev() {
            if reachable[i] {
                for child in self.nodes[i].gate.children() {
                    reachable[child.index()] = true;
                }
            }
        }
        reachable
            .iter()
            .enumerate()
            .filter(|(_, &r)| r)
            .map(|(i, _)| GateId(i as u32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn lit(x: i32) -> Lit {
        Lit::from_dimacs(x)
    }

    #[test]
    fn test_constants() {
        let graph = GateGraph::new(true);
        assert_eq!(graph.len(), 2);
        assert!(graph.is_empty());
        assert_eq!(graph.gate(GateId::FALSE), Gate::Const(false));
        assert_eq!(graph.gate(GateId::TRUE), Gate::Const(true));
        assert_eq!(graph.signal(GateId::TRUE), Some(Signal::one()));
    }

    #[test]
    fn test_structural_sharing() {
        let mut graph = GateGraph::new(false);
        let a = graph.leaf(lit(1));
        let b = graph.leaf(lit(2));
        let f = graph.mk_ite(lit(3), a, b);
        let g = graph.mk_ite(lit(3), a, b);
        assert_eq!(f, g);
        let h = graph.mk_and(a, b);
        assert_eq!(h, graph.mk_and(b, a));
        assert_eq!(graph.len(), 6);
        assert!(graph.unique_hits() >= 2);
    }

    #[test]
    fn test_ite_reduction() {
        let mut graph = GateGraph::new(false);
        let a = graph.leaf(lit(1));
        assert_eq!(graph.mk_ite(lit(2), a, a), a);

        let f = graph.mk_ite(lit(2), GateId::TRUE, GateId::FALSE);
        assert_eq!(graph.gate(f), Gate::Ite(lit(2), GateId::TRUE, GateId::FALSE));
    }

    #[test]
    fn test_ite_shortcut() {
        let mut graph = GateGraph::new(true);
        let a = graph.leaf(lit(1));

        let f = graph.mk_ite(lit(2), GateId::TRUE, GateId::FALSE);
        assert_eq!(graph.gate(f), Gate::Leaf(lit(2)));
        let f = graph.mk_ite(lit(2), GateId::FALSE, GateId::TRUE);
        assert_eq!(graph.gate(f), Gate::Leaf(lit(-2)));

        let f = graph.mk_ite(lit(2), GateId::FALSE, a);
        let not2 = graph.leaf(lit(-2));
        assert_eq!(graph.gate(f), Gate::And(a, not2));

        let f = graph.mk_ite(lit(2), a, GateId::TRUE);
        assert_eq!(graph.gate(f), Gate::Or(a, not2));
    }

    #[test]
    fn test_eval() {
        let mut graph = GateGraph::new(true);
        // x1 ? (x2 & x3) : x3
        let x3 = graph.leaf(lit(3));
        let high = graph.mk_ite(lit(2), x3, GateId::FALSE);
        let root = graph.mk_ite(lit(1), high, x3);

        for bits in 0..8u32 {
            let value = |v: Var| bits & (1 << (v.id() - 1)) != 0;
            let (x1, x2, x3) = (value(Var::new(1)), value(Var::new(2)), value(Var::new(3)));
            let expected = if x1 { x2 && x3 } else { x3 };
            assert_eq!(graph.eval(root, value), expected, "bits = {:03b}", bits);
        }
    }

    #[test]
    fn test_descendants() {
        let mut graph = GateGraph::new(true);
        let unused = graph.leaf(lit(5));
        let x3 = graph.leaf(lit(3));
        let root = graph.mk_ite(lit(1), x3, GateId::FALSE);
        let reachable = graph.descendants(root);
        assert!(!reachable.contains(&unused));
        assert!(reachable.contains(&x3));
        assert!(reachable.contains(&root));
    }
}
