//! Pseudo-Boolean constraints.
//!
//! A [`PbConstraint`] is built from arbitrary signed integer coefficients and
//! normalised on construction:
//!
//! - every variable occurs at most once (repeated and opposite occurrences are merged),
//! - every coefficient is strictly positive (a negative coefficient negates the literal
//!   and moves the constant into the bounds),
//! - bounds are clamped to the reachable range `0..=total`, sides that can no longer be
//!   violated are dropped.
//!
//! The order of first occurrences is preserved since it fixes the variable order of the
//! decision diagram.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::error::ConstraintError;
use crate::types::{Lit, Var};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct WeightedLit {
    pub lit: Lit,
    /// Always > 0.
    pub weight: u64,
}

impl WeightedLit {
    pub fn new(lit: Lit, weight: u64) -> Self {
        assert!(weight > 0, "Weights must be positive");
        Self { lit, weight }
    }
}

impl fmt::Display for WeightedLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*{}", self.weight, self.lit)
    }
}

/// Relation between the weighted sum and its bound(s).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Comparator {
    Leq(i64),
    Geq(i64),
    Eq(i64),
    /// `lo <= sum <= hi`.
    Range { lo: i64, hi: i64 },
}

impl Comparator {
    fn bounds(self) -> (Option<i64>, Option<i64>) {
        match self {
            Comparator::Leq(k) => (None, Some(k)),
            Comparator::Geq(k) => (Some(k), None),
            Comparator::Eq(k) => (Some(k), Some(k)),
            Comparator::Range { lo, hi } => (Some(lo), Some(hi)),
        }
    }
}

/// A normalised pseudo-Boolean constraint `geq <= sum(w_i * l_i) <= leq`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PbConstraint {
    terms: Vec<WeightedLit>,
    total: u64,
    geq: Option<i64>,
    leq: Option<i64>,
    infeasible: bool,
}

impl PbConstraint {
    /// Builds and normalises a constraint.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::NoLiterals`] if `terms` is empty,
    /// - [`ConstraintError::CoefficientOverflow`] if the absolute coefficients
    ///   of the normalised terms sum up beyond `i64::MAX`.
    pub fn new(
        terms: impl IntoIterator<Item = (Lit, i64)>,
        comparator: Comparator,
    ) -> Result<Self, ConstraintError> {
        // sum = offset + coeffs . x
        let mut coeffs: Vec<(Var, i128)> = Vec::new();
        let mut position: HashMap<Var, usize> = HashMap::new();
        let mut offset: i128 = 0;
        let mut seen_any = false;

        for (lit, w) in terms {
            seen_any = true;
            let w = w as i128;
            let index = *position.entry(lit.var()).or_insert_with(|| {
                coeffs.push((lit.var(), 0));
                coeffs.len() - 1
            });
            if lit.is_positive() {
                coeffs[index].1 += w;
            } else {
                // w*~x = w - w*x
                offset += w;
                coeffs[index].1 -= w;
            }
        }
        if !seen_any {
            return Err(ConstraintError::NoLiterals);
        }

        let mut terms = Vec::with_capacity(coeffs.len());
        let mut total: i128 = 0;
        for (var, c) in coeffs {
            if c == 0 {
                continue;
            }
            let lit = if c > 0 {
                var.pos()
            } else {
                // c*x = c + |c|*~x
                offset += c;
                var.neg()
            };
            total += c.abs();
            if total > i64::MAX as i128 {
                return Err(ConstraintError::CoefficientOverflow);
            }
            terms.push(WeightedLit::new(lit, c.unsigned_abs() as u64));
        }

        let (geq, leq) = comparator.bounds();
        let geq = geq.map(|k| k as i128 - offset);
        let leq = leq.map(|k| k as i128 - offset);

        let mut infeasible = false;
        if let Some(k) = leq {
            infeasible |= k < 0;
        }
        if let Some(k) = geq {
            infeasible |= k > total;
        }
        if let (Some(lo), Some(hi)) = (geq, leq) {
            infeasible |= lo > hi;
        }

        let (geq, leq) = if infeasible {
            (None, None)
        } else {
            // Both are now within 0..=total, which fits into i64.
            let leq = leq.filter(|&k| k < total).map(|k| k as i64);
            let geq = geq.filter(|&k| k > 0).map(|k| k as i64);
            (geq, leq)
        };

        let constraint = Self {
            terms,
            total: total as u64,
            geq,
            leq,
            infeasible,
        };
        debug!("normalized {:?} into {}", comparator, constraint);
        Ok(constraint)
    }

    /// Constraint over unit weights: `lits ⋈ k`.
    pub fn cardinality(
        lits: impl IntoIterator<Item = Lit>,
        comparator: Comparator,
    ) -> Result<Self, ConstraintError> {
        Self::new(lits.into_iter().map(|l| (l, 1)), comparator)
    }

    pub fn terms(&self) -> &[WeightedLit] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sum of all weights.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Upper bound, if it can be violated at all.
    pub fn leq(&self) -> Option<i64> {
        self.leq
    }

    /// Lower bound, if it can be violated at all.
    pub fn geq(&self) -> Option<i64> {
        self.geq
    }

    /// No assignment satisfies the constraint.
    pub fn is_infeasible(&self) -> bool {
        self.infeasible
    }

    /// Every assignment satisfies the constraint.
    pub fn is_trivial(&self) -> bool {
        !self.infeasible && self.leq.is_none() && self.geq.is_none()
    }

    /// Only one side is constrained.
    pub fn is_monotone(&self) -> bool {
        self.leq.is_none() || self.geq.is_none()
    }

    /// True if all weights are equal.
    pub fn is_cardinality(&self) -> bool {
        self.terms.windows(2).all(|w| w[0].weight == w[1].weight)
    }

    /// Weighted sum of the true literals under `assignment`.
    pub fn sum_under(&self, assignment: impl Fn(Var) -> bool) -> u64 {
        self.terms
            .iter()
            .filter(|t| t.lit.eval(assignment(t.lit.var())))
            .map(|t| t.weight)
            .sum()
    }

    pub fn is_satisfied_by(&self, assignment: impl Fn(Var) -> bool) -> bool {
        if self.infeasible {
            return false;
        }
        let sum = self.sum_under(assignment) as i64;
        self.geq.map_or(true, |k| sum >= k) && self.leq.map_or(true, |k| sum <= k)
    }

    /// Variables in diagram order.
    pub fn vars(&self) -> impl Iterator<Item = Var> + '_ {
        self.terms.iter().map(|t| t.lit.var())
    }
}

impl fmt::Display for PbConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.infeasible {
            return write!(f, "false");
        }
        if let Some(k) = self.geq {
            write!(f, "{} <= ", k)?;
        }
        if self.terms.is_empty() {
            write!(f, "0")?;
        }
        for (i, t) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", t)?;
        }
        if let Some(k) = self.leq {
            write!(f, " <= {}", k)?;
        }
        Ok(())
    }
}
