//! Adder-network encoding of pseudo-Boolean constraints.
//!
//! Upper bounds `sum(w_i * l_i) <= k` are compiled as follows:
//!
//! - a literal with `w_i > k` is fixed false by a unit clause;
//! - equal weights `w` turn the constraint into a cardinality constraint
//!   `sum(l_i) <= k / w`, encoded with a totalizer whose `k / w + 1`-th output
//!   is forbidden;
//! - otherwise the *polynomial watchdog* is used. With `P = 2^p` the largest
//!   power of two not above the largest weight, a constant tare `T` is added so
//!   that `sum + T >= m * P` iff `sum > k`. Literals are sorted into one bucket
//!   per weight bit. Bucket `i` is counted by a totalizer and merged with every
//!   second output of the counter of bit `i - 1`, so counter `i` holds, in
//!   unary, the part of `sum + T` carried by bits `0..=i` divided by `2^i`.
//!   Output `m` of the last counter is the watchdog and is forbidden.
//!
//! Lower bounds are rewritten into upper bounds over the negated literals.
//! Only the upward direction of every counter is encoded (a true input count
//! forces the matching outputs), which is all the forbidden-output clauses
//! need. The network is a tree, no sharing is attempted.

use log::{debug, trace};

use crate::constraint::PbConstraint;
use crate::db::{AuxVarManager, ClauseBuffer, ClauseDatabase};
use crate::error::EncodeError;
use crate::signal::Signal;

#[derive(Debug, Clone, Default)]
pub struct AdderNetworkEncoder {
    clauses: u64,
    aux_vars: u64,
}

impl AdderNetworkEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never true: the adder network has no clause ceiling.
    pub fn was_too_big(&self) -> bool {
        false
    }

    /// Clauses produced by the last call.
    pub fn clauses(&self) -> u64 {
        self.clauses
    }

    /// Auxiliary variables drawn by the last call.
    pub fn aux_vars(&self) -> u64 {
        self.aux_vars
    }

    /// Encodes `constraint` into `db`, drawing counter variables from `aux`.
    ///
    /// Always succeeds; the `Result` matches the other encoders.
    pub fn encode<D>(
        &mut self,
        constraint: &PbConstraint,
        db: &mut D,
        aux: &mut dyn AuxVarManager,
    ) -> Result<(), EncodeError>
    where
        D: ClauseDatabase + ?Sized,
    {
        debug!("adder network encode: {}", constraint);

        let mut buffer = ClauseBuffer::new();
        let mut network = Network {
            aux,
            buffer: &mut buffer,
            aux_vars: 0,
        };

        if constraint.is_infeasible() {
            network.buffer.add_empty();
        } else {
            if let Some(k) = constraint.leq() {
                let inputs: Vec<_> = constraint
                    .terms()
                    .iter()
                    .map(|t| (Signal::from(t.lit), t.weight))
                    .collect();
                network.at_most(&inputs, k as u64);
            }
            if let Some(k) = constraint.geq() {
                // sum(w * l) >= k  <=>  sum(w * ~l) <= total - k
                let inputs: Vec<_> = constraint
                    .terms()
                    .iter()
                    .map(|t| (Signal::from(-t.lit), t.weight))
                    .collect();
                network.at_most(&inputs, constraint.total() - k as u64);
            }
        }

        self.aux_vars = network.aux_vars;
        self.clauses = buffer.len();
        debug!(
            "adder network encode: {} clauses, {} aux vars",
            self.clauses, self.aux_vars
        );
        buffer.flush_into(db);
        Ok(())
    }
}

struct Network<'a> {
    aux: &'a mut dyn AuxVarManager,
    buffer: &'a mut ClauseBuffer,
    aux_vars: u64,
}

impl Network<'_> {
    fn fresh(&mut self) -> Signal {
        self.aux_vars += 1;
        Signal::from(self.aux.new_variable().pos())
    }

    /// Forbids `sum(w * s) > k`.
    fn at_most(&mut self, inputs: &[(Signal, u64)], k: u64) {
        let mut kept = Vec::with_capacity(inputs.len());
        for &(s, w) in inputs {
            if w > k {
                trace!("weight {} of {} exceeds bound {}", w, s, k);
                self.buffer.add(&[!s]);
            } else {
                kept.push((s, w));
            }
        }

        let total: u64 = kept.iter().map(|&(_, w)| w).sum();
        if total <= k {
            return;
        }

        let w0 = kept[0].1;
        if kept.iter().all(|&(_, w)| w == w0) {
            let c = (k / w0) as usize;
            debug!("cardinality: {} inputs, at most {}", kept.len(), c);
            let lits: Vec<Signal> = kept.iter().map(|&(s, _)| s).collect();
            let counter = self.totalizer(&lits, c + 1);
            if let Some(&out) = counter.get(c) {
                self.buffer.add(&[!out]);
            }
        } else {
            self.polynomial_watchdog(&kept, k);
        }
    }

    fn polynomial_watchdog(&mut self, inputs: &[(Signal, u64)], k: u64) {
        let max_weight = inputs.iter().map(|&(_, w)| w).max().unwrap_or(1);
        let p = (u64::BITS - 1 - max_weight.leading_zeros()) as usize;
        let big_p = 1u64 << p;
        let m = (k + 1).div_ceil(big_p);
        let tare = m * big_p - (k + 1);
        debug!(
            "polynomial watchdog: {} inputs, bound {}, p = {}, m = {}, tare = {}",
            inputs.len(),
            k,
            p,
            m,
            tare
        );

        let mut carry: Vec<Signal> = Vec::new();
        for bit in 0..=p {
            let cap = outputs_needed(m, p - bit);
            let mut bucket: Vec<Signal> = inputs
                .iter()
                .filter(|&&(_, w)| (w >> bit) & 1 == 1)
                .map(|&(s, _)| s)
                .collect();
            if (tare >> bit) & 1 == 1 {
                bucket.push(Signal::one());
            }
            let counter = self.totalizer(&bucket, cap);
            // Every second output: count >= 2, >= 4, ...
            let halved: Vec<Signal> = carry.iter().skip(1).step_by(2).copied().collect();
            carry = self.unary_adder(&counter, &halved, cap);
            trace!("bit {}: bucket {}, counter {}", bit, bucket.len(), carry.len());
        }

        if let Some(&watchdog) = carry.get(m as usize - 1) {
            self.buffer.add(&[!watchdog]);
        }
    }

    /// Unary counter of `inputs`, truncated to `cap` outputs.
    ///
    /// Output `j` is forced true whenever at least `j + 1` inputs are true.
    fn totalizer(&mut self, inputs: &[Signal], cap: usize) -> Vec<Signal> {
        if cap == 0 {
            return Vec::new();
        }
        match inputs.len() {
            0 => Vec::new(),
            1 => inputs.to_vec(),
            n => {
                let (left, right) = inputs.split_at(n / 2);
                let left = self.totalizer(left, cap);
                let right = self.totalizer(right, cap);
                self.unary_adder(&left, &right, cap)
            }
        }
    }

    /// Merges two unary counters into one with at most `cap` outputs.
    fn unary_adder(&mut self, u: &[Signal], v: &[Signal], cap: usize) -> Vec<Signal> {
        if u.is_empty() {
            return v[..v.len().min(cap)].to_vec();
        }
        if v.is_empty() {
            return u[..u.len().min(cap)].to_vec();
        }

        let len = (u.len() + v.len()).min(cap);
        let w: Vec<Signal> = (0..len).map(|_| self.fresh()).collect();
        for a in 0..=u.len().min(len) {
            for b in 0..=v.len().min(len - a) {
                if a + b == 0 {
                    continue;
                }
                // u >= a and v >= b implies w >= a + b
                let mut clause = Vec::with_capacity(3);
                if a > 0 {
                    clause.push(!u[a - 1]);
                }
                if b > 0 {
                    clause.push(!v[b - 1]);
                }
                clause.push(w[a + b - 1]);
                self.buffer.add(&clause);
            }
        }
        w
    }
}

/// Outputs of the counter at `shift` halvings below the watchdog.
fn outputs_needed(m: u64, shift: usize) -> usize {
    let n = (m as u128) << shift.min(64);
    n.min(usize::MAX as u128) as usize
}
