//! Decision-diagram encoding of pseudo-Boolean constraints.
//!
//! # Construction
//!
//! A diagram node is identified by `(i, s)`: the index `i` of the next
//! undecided term and the weight `s` accumulated by the terms already decided.
//! The node is an if-then-else over the `i`-th literal:
//!
//! ```text
//! node(i, s) = ite(l_i, node(i + 1, s + w_i), node(i + 1, s))
//! ```
//!
//! Before a node is allocated the request is resolved against the bounds:
//! if `s` together with everything still reachable can no longer violate
//! the constraint the request becomes the constant `TRUE`, if it can no
//! longer satisfy it the request becomes `FALSE`. Remaining requests are
//! memoized by `(i, s)`, so the diagram holds at most `n * (B + 1)` nodes
//! for `n` terms and bound `B`. Gates are additionally hash-consed by their
//! children (see [`GateGraph`]), which merges different sums that lead to the
//! same sub-function.
//!
//! Two constructions are available (see [`Construction`]): the production one
//! keeps an explicit stack of frames and never recurses, the reference one is
//! a plain recursive definition with less pruning.
//!
//! # Materialization
//!
//! While the diagram grows, every new gate receives a fresh variable and its
//! Tseitin definition. The root is asserted with a unit clause. For monotone
//! constraints (single bound) with the shortcut enabled only the
//! `gate -> definition` half is emitted, which suffices because every gate
//! occurs positively below the asserted root.
//!
//! # Budget
//!
//! In limited mode the clause count is checked after every materialized gate.
//! Once the ceiling is exceeded construction stops, nothing is written to the
//! clause database and the encoder reports [`EncodeError::TooBig`].
//!
//! Constraints whose diagram is a constant are exempt: they compile to no
//! clause at all or to the single empty clause, whatever the ceiling.

use log::{debug, info, trace};

use crate::cache::Cache;
use crate::config::{Construction, EncoderConfig};
use crate::constraint::{PbConstraint, WeightedLit};
use crate::db::{AuxVarManager, ClauseBuffer, ClauseDatabase};
use crate::error::EncodeError;
use crate::gate::{Gate, GateGraph, GateId};
use crate::signal::Signal;
use crate::types::Var;

/// Counters collected during one construction.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BddStats {
    /// Gates allocated, constants included.
    pub gates: usize,
    /// Construction requests that had to be expanded into a node.
    pub expanded: usize,
    pub sum_cache_hits: usize,
    pub sum_cache_misses: usize,
    pub unique_hits: usize,
    pub unique_misses: usize,
    /// Clauses produced (also when aborted).
    pub clauses: u64,
}

/// A built diagram, detached from any clause database.
pub struct Diagram {
    graph: GateGraph,
    root: GateId,
    terms: Vec<WeightedLit>,
    stats: BddStats,
}

impl Diagram {
    pub fn root(&self) -> GateId {
        self.root
    }

    pub fn graph(&self) -> &GateGraph {
        &self.graph
    }

    /// Terms of the constraint in diagram order.
    pub fn terms(&self) -> &[WeightedLit] {
        &self.terms
    }

    pub fn stats(&self) -> &BddStats {
        &self.stats
    }

    pub fn is_zero(&self) -> bool {
        self.root == GateId::FALSE
    }

    pub fn is_one(&self) -> bool {
        self.root == GateId::TRUE
    }

    /// Number of non-constant gates reachable from the root.
    pub fn size(&self) -> usize {
        self.graph
            .descendants(self.root)
            .into_iter()
            .filter(|id| !id.is_const())
            .count()
    }

    /// Number of reachable if-then-else, AND and OR gates (leaves excluded).
    pub fn num_decisions(&self) -> usize {
        self.graph
            .descendants(self.root)
            .into_iter()
            .filter(|&id| !matches!(self.graph.gate(id), Gate::Const(_) | Gate::Leaf(_)))
            .count()
    }

    pub fn eval(&self, assignment: impl Fn(Var) -> bool) -> bool {
        self.graph.eval(self.root, assignment)
    }
}

#[derive(Debug, Clone)]
pub struct BddEncoder {
    limit: Option<u64>,
    use_monotonic_shortcut: bool,
    construction: Construction,
    too_big: bool,
    stats: BddStats,
}

impl Default for BddEncoder {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl BddEncoder {
    pub fn unlimited() -> Self {
        Self {
            limit: None,
            use_monotonic_shortcut: true,
            construction: Construction::Iterative,
            too_big: false,
            stats: BddStats::default(),
        }
    }

    pub fn limited(max_clauses: u64) -> Self {
        Self {
            limit: Some(max_clauses),
            ..Self::unlimited()
        }
    }

    /// Encoder following `config`; `limited` selects whether `max_clauses` applies.
    pub fn from_config(config: &EncoderConfig, limited: bool) -> Self {
        let encoder = if limited {
            Self::limited(config.max_clauses)
        } else {
            Self::unlimited()
        };
        encoder
            .with_monotonic_shortcut(config.use_monotonic_shortcut)
            .with_construction(config.construction)
    }

    pub fn with_monotonic_shortcut(mut self, on: bool) -> Self {
        self.use_monotonic_shortcut = on;
        self
    }

    pub fn with_construction(mut self, construction: Construction) -> Self {
        self.construction = construction;
        self
    }

    pub fn is_limited(&self) -> bool {
        self.limit.is_some()
    }

    /// Whether the last call ran out of clause budget. Always false when unlimited.
    pub fn was_too_big(&self) -> bool {
        self.limit.is_some() && self.too_big
    }

    /// Statistics of the last call.
    pub fn stats(&self) -> &BddStats {
        &self.stats
    }

    /// Encodes `constraint` into `db`, drawing gate variables from `aux`.
    ///
    /// # Errors
    ///
    /// [`EncodeError::TooBig`] if the encoder is limited and the encoding needs
    /// more clauses than allowed. `db` is left untouched in that case.
    pub fn encode<D>(
        &mut self,
        constraint: &PbConstraint,
        db: &mut D,
        aux: &mut dyn AuxVarManager,
    ) -> Result<(), EncodeError>
    where
        D: ClauseDatabase + ?Sized,
    {
        debug!("bdd encode: {} (limit = {:?})", constraint, self.limit);
        self.too_big = false;
        self.stats = BddStats::default();

        let mut buffer = ClauseBuffer::new();
        // Set when the encoding is nothing or the empty clause.
        let mut constant = true;
        if constraint.is_infeasible() {
            buffer.add_empty();
        } else if !constraint.is_trivial() {
            let emitter = Emitter {
                aux,
                buffer: &mut buffer,
                one_sided: self.use_monotonic_shortcut && constraint.is_monotone(),
                limit: self.limit,
                materialized: 0,
            };
            let mut builder = Builder::new(constraint, self.use_monotonic_shortcut, Some(emitter));
            let root = builder.build(self.construction);
            if builder.stop {
                self.too_big = true;
                constant = false;
            } else {
                constant = root.is_const();
                builder.assert_root(root);
            }
            self.stats = builder.stats();
        }

        self.stats.clauses = buffer.len();
        if let Some(limit) = self.limit.filter(|_| !constant) {
            if self.too_big || buffer.len() > limit {
                self.too_big = true;
                info!("bdd encoding aborted: {} clauses exceed limit {}", buffer.len(), limit);
                return Err(EncodeError::TooBig {
                    clauses: buffer.len(),
                    limit,
                });
            }
        }

        debug!("bdd encode: {} clauses", buffer.len());
        buffer.flush_into(db);
        Ok(())
    }

    /// Builds the diagram of `constraint` without emitting clauses.
    pub fn build_diagram(&mut self, constraint: &PbConstraint) -> Diagram {
        let mut builder = Builder::new(constraint, self.use_monotonic_shortcut, None);
        let root = if constraint.is_infeasible() {
            GateId::FALSE
        } else if constraint.is_trivial() {
            GateId::TRUE
        } else {
            builder.build(self.construction)
        };
        self.stats = builder.stats();
        Diagram {
            graph: builder.graph,
            root,
            terms: constraint.terms().to_vec(),
            stats: self.stats.clone(),
        }
    }
}

/// Turns freshly allocated gates into clauses.
struct Emitter<'a> {
    aux: &'a mut dyn AuxVarManager,
    buffer: &'a mut ClauseBuffer,
    one_sided: bool,
    limit: Option<u64>,
    /// Gates with a smaller index already carry a signal.
    materialized: usize,
}

impl Emitter<'_> {
    /// Materializes all pending gates. Returns false once the budget is exceeded.
    fn materialize(&mut self, graph: &mut GateGraph) -> bool {
        while self.materialized < graph.len() {
            let id = GateId::from_index(self.materialized);
            self.materialized += 1;
            if graph.signal(id).is_some() {
                continue;
            }
            let signal = self.define(graph, graph.gate(id));
            graph.set_signal(id, signal);
            if let Some(limit) = self.limit {
                if self.buffer.len() > limit {
                    return false;
                }
            }
        }
        true
    }

    fn define(&mut self, graph: &GateGraph, gate: Gate) -> Signal {
        let sig = |id: GateId| {
            graph
                .signal(id)
                .unwrap_or_else(|| unreachable!("child {} materialized after its parent", id))
        };
        match gate {
            Gate::Const(b) => Signal::from(b),
            Gate::Leaf(lit) => Signal::from(lit),
            Gate::And(a, b) => {
                let y = Signal::from(self.aux.new_variable().pos());
                let (a, b) = (sig(a), sig(b));
                self.buffer.add(&[!y, a]);
                self.buffer.add(&[!y, b]);
                if !self.one_sided {
                    self.buffer.add(&[y, !a, !b]);
                }
                y
            }
            Gate::Or(a, b) => {
                let y = Signal::from(self.aux.new_variable().pos());
                let (a, b) = (sig(a), sig(b));
                self.buffer.add(&[!y, a, b]);
                if !self.one_sided {
                    self.buffer.add(&[y, !a]);
                    self.buffer.add(&[y, !b]);
                }
                y
            }
            Gate::Ite(lit, high, low) => {
                let y = Signal::from(self.aux.new_variable().pos());
                let x = Signal::from(lit);
                let (high, low) = (sig(high), sig(low));
                self.buffer.add(&[!y, !x, high]);
                self.buffer.add(&[!y, x, low]);
                if !self.one_sided {
                    self.buffer.add(&[y, !x, !high]);
                    self.buffer.add(&[y, x, !low]);
                }
                y
            }
        }
    }
}

/// One frame of the explicit construction stack.
#[derive(Debug, Copy, Clone)]
struct Frame {
    index: usize,
    current_sum: i64,
    high: Option<GateId>,
    low: Option<GateId>,
}

impl Frame {
    fn new(index: usize, current_sum: i64) -> Self {
        Self {
            index,
            current_sum,
            high: None,
            low: None,
        }
    }

    fn deliver(&mut self, child: GateId) {
        if self.high.is_none() {
            self.high = Some(child);
        } else {
            self.low = Some(child);
        }
    }
}

struct Builder<'a> {
    terms: &'a [WeightedLit],
    /// `rest[i]` is the total weight of `terms[i..]`.
    rest: Vec<i64>,
    geq: Option<i64>,
    leq: Option<i64>,
    graph: GateGraph,
    sums: Cache<(usize, i64), GateId>,
    emitter: Option<Emitter<'a>>,
    stop: bool,
    expanded: usize,
}

impl<'a> Builder<'a> {
    fn new(constraint: &'a PbConstraint, shortcut: bool, emitter: Option<Emitter<'a>>) -> Self {
        let terms = constraint.terms();
        let mut rest = vec![0i64; terms.len() + 1];
        for i in (0..terms.len()).rev() {
            // Bounded by the total, which fits into i64.
            rest[i] = rest[i + 1] + terms[i].weight as i64;
        }
        Self {
            terms,
            rest,
            geq: constraint.geq(),
            leq: constraint.leq(),
            graph: GateGraph::new(shortcut),
            sums: Cache::new(),
            emitter,
            stop: false,
            expanded: 0,
        }
    }

    fn stats(&self) -> BddStats {
        BddStats {
            gates: self.graph.len(),
            expanded: self.expanded,
            sum_cache_hits: self.sums.hits(),
            sum_cache_misses: self.sums.misses(),
            unique_hits: self.graph.unique_hits(),
            unique_misses: self.graph.unique_misses(),
            clauses: self.emitter.as_ref().map_or(0, |e| e.buffer.len()),
        }
    }

    fn build(&mut self, construction: Construction) -> GateId {
        let root = match construction {
            Construction::Iterative => self.build_iterative(),
            Construction::Recursive => self.build_recursive(0, 0),
        };
        debug!(
            "built diagram: root = {}, {} gates, {} expanded",
            root,
            self.graph.len(),
            self.expanded
        );
        root
    }

    /// Asserts the root with a unit clause.
    fn assert_root(&mut self, root: GateId) {
        let Some(emitter) = self.emitter.as_mut() else {
            return;
        };
        match self.graph.signal(root) {
            Some(signal) => emitter.buffer.add(&[signal]),
            None => panic!("root {} is not materialized", root),
        }
    }

    /// Resolves `(index, sum)` to a constant or an already built node.
    fn resolve(&mut self, index: usize, sum: i64) -> Option<GateId> {
        let max = sum + self.rest[index];
        if self.leq.is_some_and(|k| sum > k) || self.geq.is_some_and(|k| max < k) {
            return Some(GateId::FALSE);
        }
        if self.leq.map_or(true, |k| max <= k) && self.geq.map_or(true, |k| sum >= k) {
            return Some(GateId::TRUE);
        }
        self.sums.get(&(index, sum))
    }

    fn mk_node(&mut self, index: usize, sum: i64, high: GateId, low: GateId) -> GateId {
        let node = self.graph.mk_ite(self.terms[index].lit, high, low);
        trace!("node({}, {}) = {}", index, sum, node);
        self.sums.insert((index, sum), node);
        if let Some(emitter) = self.emitter.as_mut() {
            if !emitter.materialize(&mut self.graph) {
                info!(
                    "clause budget exceeded at node ({}, {}) after {} clauses",
                    index,
                    sum,
                    emitter.buffer.len()
                );
                self.stop = true;
            }
        }
        node
    }

    fn build_iterative(&mut self) -> GateId {
        if let Some(root) = self.resolve(0, 0) {
            return root;
        }
        let mut stack = vec![Frame::new(0, 0)];
        self.expanded += 1;
        let mut root = GateId::PLACEHOLDER;

        while let Some(&frame) = stack.last() {
            if self.stop {
                return GateId::PLACEHOLDER;
            }
            let weight = self.terms[frame.index].weight as i64;
            let child_sum = match (frame.high, frame.low) {
                (None, _) => frame.current_sum + weight,
                (Some(_), None) => frame.current_sum,
                (Some(high), Some(low)) => {
                    stack.pop();
                    let node = self.mk_node(frame.index, frame.current_sum, high, low);
                    match stack.last_mut() {
                        Some(parent) => parent.deliver(node),
                        None => root = node,
                    }
                    continue;
                }
            };
            let next = frame.index + 1;
            match self.resolve(next, child_sum) {
                Some(child) => {
                    if let Some(top) = stack.last_mut() {
                        top.deliver(child);
                    }
                }
                None => {
                    stack.push(Frame::new(next, child_sum));
                    self.expanded += 1;
                }
            }
        }

        if self.stop {
            GateId::PLACEHOLDER
        } else {
            root
        }
    }

    /// Reference construction: prunes only on an exceeded upper bound and
    /// decides everything else at the terminal level.
    fn build_recursive(&mut self, index: usize, sum: i64) -> GateId {
        if self.stop {
            return GateId::PLACEHOLDER;
        }
        if self.leq.is_some_and(|k| sum > k) {
            return GateId::FALSE;
        }
        if index == self.terms.len() {
            return GateId::from_bool(self.geq.map_or(true, |k| sum >= k));
        }
        if let Some(node) = self.sums.get(&(index, sum)) {
            return node;
        }
        self.expanded += 1;

        let weight = self.terms[index].weight as i64;
        let high = self.build_recursive(index + 1, sum + weight);
        let low = self.build_recursive(index + 1, sum);
        if self.stop {
            return GateId::PLACEHOLDER;
        }
        self.mk_node(index, sum, high, low)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::constraint::Comparator;
    use crate::db::{Cnf, VarCounter};
    use crate::types::Lit;

    fn lit(x: i32) -> Lit {
        Lit::from_dimacs(x)
    }

    fn assignment(bits: u32) -> impl Fn(Var) -> bool {
        move |v: Var| bits & (1 << (v.id() - 1)) != 0
    }

    fn card_leq(n: i32, k: i64) -> PbConstraint {
        PbConstraint::cardinality((1..=n).map(lit), Comparator::Leq(k)).unwrap()
    }

    #[test]
    fn test_unit_weights_scenario() {
        let c = card_leq(3, 1);
        let diagram = BddEncoder::unlimited().build_diagram(&c);
        // x1 = T, x2 = T, x3 = F
        assert!(!diagram.eval(assignment(0b011)));
        // x1 = T only
        assert!(diagram.eval(assignment(0b001)));
    }

    #[test]
    fn test_weighted_scenario() {
        // 2*x1 + 3*x2 <= 4
        let c = PbConstraint::new([(lit(1), 2), (lit(2), 3)], Comparator::Leq(4)).unwrap();
        let diagram = BddEncoder::unlimited().build_diagram(&c);
        assert!(!diagram.eval(assignment(0b11)));
        assert!(diagram.eval(assignment(0b01)));
        assert!(diagram.eval(assignment(0b10)));
    }

    #[test]
    fn test_diagram_matches_constraint() {
        let c = PbConstraint::new(
            [(lit(1), 3), (lit(-2), 2), (lit(3), 5), (lit(4), 1), (lit(-5), 4)],
            Comparator::Range { lo: 4, hi: 9 },
        )
        .unwrap();
        for construction in [Construction::Iterative, Construction::Recursive] {
            for shortcut in [true, false] {
                let diagram = BddEncoder::unlimited()
                    .with_construction(construction)
                    .with_monotonic_shortcut(shortcut)
                    .build_diagram(&c);
                for bits in 0..32 {
                    assert_eq!(
                        diagram.eval(assignment(bits)),
                        c.is_satisfied_by(assignment(bits)),
                        "{:?}, shortcut = {}, bits = {:05b}",
                        construction,
                        shortcut,
                        bits
                    );
                }
            }
        }
    }

    #[test]
    fn test_node_sharing() {
        // x1 + x2 + x3 + x4 <= 2
        let c = card_leq(4, 2);
        let diagram = BddEncoder::unlimited().build_diagram(&c);
        // A non-shared unfolding has 2^4 - 1 decision nodes.
        assert!(diagram.num_decisions() < 15);
        assert!(diagram.num_decisions() <= 4 * 3);
        assert_eq!(diagram.num_decisions(), 5);
        assert!(diagram.stats().sum_cache_hits > 0);
    }

    #[test]
    fn test_node_count_bound() {
        let n = 40;
        let k = 7;
        let c = card_leq(n, k);
        let mut encoder = BddEncoder::unlimited();
        let diagram = encoder.build_diagram(&c);
        assert!(diagram.stats().expanded <= (n as usize) * (k as usize + 1));
        assert!(diagram.size() <= 2 * (n as usize) * (k as usize + 1));
    }

    #[test]
    fn test_deep_diagram_is_iterative() {
        let n = 20_000;
        let c = card_leq(n, 1);
        let diagram = BddEncoder::unlimited().build_diagram(&c);
        assert!(!diagram.is_zero());
        assert!(!diagram.is_one());
        assert!(diagram.stats().expanded <= 2 * n as usize);
    }

    #[test]
    fn test_constant_diagrams() {
        let c = PbConstraint::new([(lit(1), 0)], Comparator::Leq(-1)).unwrap();
        assert!(BddEncoder::unlimited().build_diagram(&c).is_zero());
        let c = PbConstraint::new([(lit(1), 0)], Comparator::Leq(0)).unwrap();
        assert!(BddEncoder::unlimited().build_diagram(&c).is_one());
    }

    #[test]
    fn test_encode_trivial_and_infeasible() {
        let mut vars = VarCounter::new(1);

        let c = PbConstraint::new([(lit(1), 0)], Comparator::Geq(0)).unwrap();
        let mut cnf = Cnf::new();
        BddEncoder::unlimited().encode(&c, &mut cnf, &mut vars).unwrap();
        assert!(cnf.is_empty());

        let c = PbConstraint::new([(lit(1), 0)], Comparator::Leq(-1)).unwrap();
        let mut cnf = Cnf::new();
        BddEncoder::unlimited().encode(&c, &mut cnf, &mut vars).unwrap();
        assert!(cnf.has_empty_clause());
    }

    #[test]
    fn test_encode_allocates_one_var_per_gate() {
        let c = card_leq(4, 2);
        let mut vars = VarCounter::new(4);
        let mut cnf = Cnf::new();
        let mut encoder = BddEncoder::unlimited();
        encoder.encode(&c, &mut cnf, &mut vars).unwrap();
        // Five decision gates, leaves reuse the input literals.
        assert_eq!(vars.max_var(), 4 + 5);
        assert_eq!(encoder.stats().clauses, cnf.len() as u64);
        assert!(cnf.clauses().contains(&vec![Lit::from_dimacs(vars.max_var() as i32)]));
    }

    #[test]
    fn test_shortcut_halves_clauses() {
        let c = card_leq(6, 3);
        let count = |shortcut: bool| {
            let mut cnf = Cnf::new();
            BddEncoder::unlimited()
                .with_monotonic_shortcut(shortcut)
                .encode(&c, &mut cnf, &mut VarCounter::new(6))
                .unwrap();
            cnf.len()
        };
        assert!(count(true) < count(false));
    }

    #[test]
    fn test_budget_exceeded() {
        let c = card_leq(10, 5);
        let mut cnf = Cnf::new();
        let mut encoder = BddEncoder::limited(3);
        let res = encoder.encode(&c, &mut cnf, &mut VarCounter::new(10));
        assert!(matches!(res, Err(EncodeError::TooBig { limit: 3, .. })));
        assert!(encoder.was_too_big());
        assert!(cnf.is_empty());
    }

    #[test]
    fn test_budget_exact_fit() {
        let c = card_leq(5, 2);
        let mut cnf = Cnf::new();
        BddEncoder::unlimited()
            .encode(&c, &mut cnf, &mut VarCounter::new(5))
            .unwrap();
        let needed = cnf.len() as u64;

        let mut encoder = BddEncoder::limited(needed);
        let mut cnf = Cnf::new();
        encoder.encode(&c, &mut cnf, &mut VarCounter::new(5)).unwrap();
        assert!(!encoder.was_too_big());
        assert_eq!(cnf.len() as u64, needed);

        let mut encoder = BddEncoder::limited(needed - 1);
        let mut cnf = Cnf::new();
        assert!(encoder.encode(&c, &mut cnf, &mut VarCounter::new(5)).is_err());
        assert!(encoder.was_too_big());
        assert!(cnf.is_empty());
    }

    #[test]
    fn test_constant_result_ignores_budget() {
        let mut vars = VarCounter::new(2);

        // Infeasible after normalization.
        let c = PbConstraint::new([(lit(1), 0)], Comparator::Leq(-1)).unwrap();
        let mut encoder = BddEncoder::limited(0);
        let mut cnf = Cnf::new();
        encoder.encode(&c, &mut cnf, &mut vars).unwrap();
        assert!(!encoder.was_too_big());
        assert_eq!(cnf.len(), 1);
        assert!(cnf.has_empty_clause());

        // 7*x1 + 7*x2 in [3, 5]: only the diagram finds it unsatisfiable.
        let c = PbConstraint::new([(lit(1), 7), (lit(2), 7)], Comparator::Range { lo: 3, hi: 5 }).unwrap();
        assert!(!c.is_infeasible());
        for construction in [Construction::Iterative, Construction::Recursive] {
            let mut encoder = BddEncoder::limited(0).with_construction(construction);
            let mut cnf = Cnf::new();
            encoder.encode(&c, &mut cnf, &mut vars).unwrap();
            assert!(!encoder.was_too_big());
            assert_eq!(cnf.len(), 1);
            assert!(cnf.has_empty_clause());
        }

        // Trivial constraints need no clause at all.
        let c = PbConstraint::new([(lit(1), 0)], Comparator::Geq(0)).unwrap();
        let mut cnf = Cnf::new();
        BddEncoder::limited(0).encode(&c, &mut cnf, &mut vars).unwrap();
        assert!(cnf.is_empty());

        // Anything else still counts.
        let mut encoder = BddEncoder::limited(0);
        assert!(encoder.encode(&card_leq(2, 1), &mut Cnf::new(), &mut vars).is_err());
        assert!(encoder.was_too_big());
    }

    #[test]
    fn test_unlimited_never_too_big() {
        let c = card_leq(12, 6);
        let mut encoder = BddEncoder::unlimited();
        encoder.encode(&c, &mut Cnf::new(), &mut VarCounter::new(12)).unwrap();
        assert!(!encoder.was_too_big());
    }

    #[test]
    fn test_deterministic_output() {
        let c = PbConstraint::new([(lit(1), 3), (lit(2), 2), (lit(3), 5), (lit(4), 1)], Comparator::Eq(6)).unwrap();
        let run = || {
            let mut cnf = Cnf::new();
            BddEncoder::unlimited()
                .encode(&c, &mut cnf, &mut VarCounter::new(4))
                .unwrap();
            cnf
        };
        assert_eq!(run(), run());
    }
}
