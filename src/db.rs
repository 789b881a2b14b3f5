//! Variable and clause sinks.
//!
//! The encoders draw fresh variables from an [`AuxVarManager`] and deliver
//! clauses to a [`ClauseDatabase`]; both are owned by the caller and typically
//! outlive many encode calls. Inside one call clauses are collected in a
//! [`ClauseBuffer`] and only handed over once the call succeeds.

use std::fmt::Write as _;

use log::trace;

use crate::signal::Signal;
use crate::types::{Lit, Var};

/// Source of fresh variables. Ids are increasing and never reused.
pub trait AuxVarManager {
    fn new_variable(&mut self) -> Var;
}

/// Clause sink. One call per clause; an empty clause makes the formula unsatisfiable.
pub trait ClauseDatabase {
    fn add_clause(&mut self, clause: &[Lit]);
}

/// Hands out variables `first, first + 1, ...`.
#[derive(Debug, Clone)]
pub struct VarCounter {
    next: u32,
}

impl VarCounter {
    /// Counter whose first variable is `max_var + 1`.
    pub fn new(max_var: u32) -> Self {
        Self { next: max_var + 1 }
    }

    /// Largest variable handed out so far (or the initial `max_var`).
    pub fn max_var(&self) -> u32 {
        self.next - 1
    }
}

impl AuxVarManager for VarCounter {
    fn new_variable(&mut self) -> Var {
        let var = Var::new(self.next);
        self.next += 1;
        var
    }
}

/// In-memory CNF.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Cnf {
    clauses: Vec<Vec<Lit>>,
}

impl Cnf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clauses(&self) -> &[Vec<Lit>] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Contains the empty clause.
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(|c| c.is_empty())
    }

    pub fn max_var(&self) -> u32 {
        self.clauses
            .iter()
            .flatten()
            .map(|l| l.var().id())
            .max()
            .unwrap_or(0)
    }

    /// Renders the clauses in DIMACS CNF format.
    pub fn to_dimacs(&self, num_vars: u32) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(out, "p cnf {} {}", num_vars.max(self.max_var()), self.clauses.len())?;
        for clause in &self.clauses {
            for lit in clause {
                write!(out, "{} ", lit.to_dimacs())?;
            }
            writeln!(out, "0")?;
        }
        Ok(out)
    }
}

impl From<Vec<Vec<Lit>>> for Cnf {
    fn from(clauses: Vec<Vec<Lit>>) -> Self {
        Self { clauses }
    }
}

impl ClauseDatabase for Cnf {
    fn add_clause(&mut self, clause: &[Lit]) {
        self.clauses.push(clause.to_vec());
    }
}

impl ClauseDatabase for Vec<Vec<Lit>> {
    fn add_clause(&mut self, clause: &[Lit]) {
        self.push(clause.to_vec());
    }
}

/// Per-call clause buffer with a running count.
///
/// Clauses are given as [`Signal`]s: a clause containing constant one is
/// dropped, constant zero literals are removed.
#[derive(Debug, Default)]
pub(crate) struct ClauseBuffer {
    clauses: Vec<Vec<Lit>>,
}

impl ClauseBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> u64 {
        self.clauses.len() as u64
    }

    pub(crate) fn add(&mut self, clause: &[Signal]) {
        if clause.iter().any(|s| s.is_one()) {
            return;
        }
        let clause: Vec<Lit> = clause.iter().filter_map(|s| s.lit()).collect();
        trace!("clause {:?}", clause);
        self.clauses.push(clause);
    }

    pub(crate) fn add_empty(&mut self) {
        self.clauses.push(Vec::new());
    }

    /// Moves all clauses into `db`, in insertion order.
    pub(crate) fn flush_into<D>(&mut self, db: &mut D)
    where
        D: ClauseDatabase + ?Sized,
    {
        for clause in self.clauses.drain(..) {
            db.add_clause(&clause);
        }
    }
}
