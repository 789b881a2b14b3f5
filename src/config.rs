//! Encoder configuration.

use std::fmt;

/// Encoding strategy.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Totalizer / polynomial watchdog network. Never runs out of budget.
    AdderNetwork,
    /// Decision diagram without a clause ceiling.
    BddUnlimited,
    /// Decision diagram aborting once `max_clauses` is exceeded.
    BddLimited,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::AdderNetwork => "adder-network",
            Strategy::BddUnlimited => "bdd-unlimited",
            Strategy::BddLimited => "bdd-limited",
        };
        write!(f, "{}", name)
    }
}

/// How the decision diagram is constructed.
///
/// Both produce diagrams accepting the same assignments.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Construction {
    /// Explicit work-stack; depth is bounded by heap, not by the call stack.
    #[default]
    Iterative,
    /// Plain recursion with less pruning. Reference oracle for small inputs.
    Recursive,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EncoderConfig {
    /// Strategy tried first.
    pub strategy: Strategy,
    /// Clause ceiling for [`Strategy::BddLimited`].
    pub max_clauses: u64,
    /// Degenerate constant-child ITE nodes into AND/OR gates and emit
    /// one-sided gate definitions for monotone diagrams.
    pub use_monotonic_shortcut: bool,
    /// Strategies tried in order after `strategy` reports overflow.
    pub fallback_order: Vec<Strategy>,
    pub construction: Construction,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::BddLimited,
            max_clauses: 1_000_000,
            use_monotonic_shortcut: true,
            fallback_order: vec![Strategy::AdderNetwork],
            construction: Construction::Iterative,
        }
    }
}

impl EncoderConfig {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_clauses(mut self, max_clauses: u64) -> Self {
        self.max_clauses = max_clauses;
        self
    }

    pub fn with_monotonic_shortcut(mut self, on: bool) -> Self {
        self.use_monotonic_shortcut = on;
        self
    }

    pub fn with_fallback_order(mut self, order: impl IntoIterator<Item = Strategy>) -> Self {
        self.fallback_order = order.into_iter().collect();
        self
    }

    pub fn with_construction(mut self, construction: Construction) -> Self {
        self.construction = construction;
        self
    }

    /// The primary strategy followed by the fallbacks, without repetitions.
    pub fn strategy_order(&self) -> Vec<Strategy> {
        let mut order = vec![self.strategy];
        for &s in &self.fallback_order {
            if !order.contains(&s) {
                order.push(s);
            }
        }
        order
    }
}
