//! Test helpers: a tiny DPLL checker and random constraints.

#![allow(dead_code)]

use pb_bdd::constraint::{Comparator, PbConstraint};
use pb_bdd::types::{Lit, Var};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

pub fn lit(x: i32) -> Lit {
    Lit::from_dimacs(x)
}

/// Assignment of variables `1..=n` read from the bits of `bits`.
pub fn assignment(bits: u64) -> impl Fn(Var) -> bool {
    move |v: Var| bits & (1 << (v.id() - 1)) != 0
}

/// Assumptions fixing variables `1..=n` as in `bits`.
pub fn assumptions(n: u32, bits: u64) -> Vec<Lit> {
    (1..=n)
        .map(|i| Lit::new(Var::new(i), bits & (1 << (i - 1)) == 0))
        .collect()
}

/// Whether `clauses` has a model extending `assumptions`.
pub fn satisfiable(clauses: &[Vec<Lit>], assumptions: &[Lit]) -> bool {
    let num_vars = clauses
        .iter()
        .flatten()
        .chain(assumptions)
        .map(|l| l.var().id() as usize)
        .max()
        .unwrap_or(0);
    let mut values: Vec<Option<bool>> = vec![None; num_vars + 1];
    for &l in assumptions {
        let v = l.var().id() as usize;
        match values[v] {
            Some(b) if b != l.is_positive() => return false,
            _ => values[v] = Some(l.is_positive()),
        }
    }
    dpll(clauses, values)
}

fn value_of(values: &[Option<bool>], l: Lit) -> Option<bool> {
    values[l.var().id() as usize].map(|b| l.eval(b))
}

fn dpll(clauses: &[Vec<Lit>], mut values: Vec<Option<bool>>) -> bool {
    // Unit propagation to fixpoint.
    loop {
        let mut changed = false;
        for clause in clauses {
            let mut unassigned = None;
            let mut num_unassigned = 0;
            let mut satisfied = false;
            for &l in clause {
                match value_of(&values, l) {
                    Some(true) => {
                        satisfied = true;
                        break;
                    }
                    Some(false) => {}
                    None => {
                        num_unassigned += 1;
                        unassigned = Some(l);
                    }
                }
            }
            if satisfied {
                continue;
            }
            match (num_unassigned, unassigned) {
                (0, _) => return false,
                (1, Some(l)) => {
                    values[l.var().id() as usize] = Some(l.is_positive());
                    changed = true;
                }
                _ => {}
            }
        }
        if !changed {
            break;
        }
    }

    let branch = clauses
        .iter()
        .flatten()
        .find(|&&l| value_of(&values, l).is_none())
        .copied();
    match branch {
        None => true,
        Some(l) => {
            // False first: once the inputs are fixed, auxiliary variables are
            // either forced by propagation or free to stay false.
            let v = l.var().id() as usize;
            let mut off = values.clone();
            off[v] = Some(false);
            if dpll(clauses, off) {
                return true;
            }
            values[v] = Some(true);
            dpll(clauses, values)
        }
    }
}

/// Random constraint over variables `1..=n` with signed coefficients.
pub fn random_constraint(rng: &mut ChaCha8Rng, n: u32) -> PbConstraint {
    let terms: Vec<(Lit, i64)> = (1..=n)
        .map(|i| {
            let l = Lit::new(Var::new(i), rng.gen_bool(0.3));
            (l, rng.gen_range(-4..=9))
        })
        .collect();
    let total: i64 = terms.iter().map(|&(_, w)| w.abs()).sum();
    let a = rng.gen_range(-2..=total + 2);
    let b = rng.gen_range(-2..=total + 2);
    let comparator = match rng.gen_range(0..4) {
        0 => Comparator::Leq(a),
        1 => Comparator::Geq(a),
        2 => Comparator::Eq(a.clamp(0, total)),
        _ => Comparator::Range {
            lo: a.min(b),
            hi: a.max(b),
        },
    };
    PbConstraint::new(terms, comparator).unwrap()
}

/// Random constraint over variables `1..=n` with coefficients drawn from
/// `-magnitude..=magnitude`. Bounds sit next to sums that some assignment
/// actually reaches, so neighbouring values have to be told apart.
pub fn random_wide_constraint(rng: &mut ChaCha8Rng, n: u32, magnitude: i64) -> PbConstraint {
    let terms: Vec<(Lit, i64)> = (1..=n)
        .map(|i| {
            let l = Lit::new(Var::new(i), rng.gen_bool(0.3));
            (l, rng.gen_range(-magnitude..=magnitude))
        })
        .collect();
    let a = reachable_sum(rng, &terms) + rng.gen_range(-1..=1);
    let b = reachable_sum(rng, &terms) + rng.gen_range(-1..=1);
    let comparator = match rng.gen_range(0..4) {
        0 => Comparator::Leq(a),
        1 => Comparator::Geq(a),
        2 => Comparator::Eq(a),
        _ => Comparator::Range {
            lo: a.min(b),
            hi: a.max(b),
        },
    };
    PbConstraint::new(terms, comparator).unwrap()
}

/// Weighted sum under a random assignment.
fn reachable_sum(rng: &mut ChaCha8Rng, terms: &[(Lit, i64)]) -> i64 {
    terms.iter().filter(|_| rng.gen_bool(0.5)).map(|&(_, w)| w).sum()
}

pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
