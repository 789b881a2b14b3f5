//! Type-safe wrappers for SAT variables and literals.
//!
//! Variables are 1-indexed and literals follow the DIMACS convention: a
//! positive integer is the variable itself, a negative integer its negation.
//! This is the representation exchanged with [`ClauseDatabase`][crate::db::ClauseDatabase]
//! and [`AuxVarManager`][crate::db::AuxVarManager].
use std::fmt;
use std::ops::Neg;

/// A variable identifier (1-indexed).
///
/// # Invariants
///
/// - Variable IDs must be >= 1 (0 is the DIMACS clause terminator)
/// - Variable IDs must be < `i32::MAX` so that both literals fit into an `i32`
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a new variable with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id == 0` or `id >= i32::MAX`.
    pub fn new(id: u32) -> Self {
        assert_ne!(id, 0, "Variable IDs must be >= 1");
        assert!(id < i32::MAX as u32, "Variable ID {} is too large", id);
        Var(id)
    }

    /// Returns the raw variable ID as a `u32`.
    pub fn id(self) -> u32 {
        self.0
    }

    /// Positive literal of this variable.
    pub fn pos(self) -> Lit {
        Lit(self.0 as i32)
    }

    /// Negative literal of this variable.
    pub fn neg(self) -> Lit {
        Lit(-(self.0 as i32))
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

/// A literal: a variable together with a polarity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit(i32);

impl Lit {
    pub fn new(var: Var, negated: bool) -> Self {
        if negated {
            var.neg()
        } else {
            var.pos()
        }
    }

    /// Creates a literal from its signed DIMACS representation.
    ///
    /// # Panics
    ///
    /// Panics if `value == 0` or `value` is `i32::MIN`/`i32::MAX` in magnitude.
    pub fn from_dimacs(value: i32) -> Self {
        assert_ne!(value, 0, "Literal 0 is not a valid DIMACS literal");
        assert!(
            value.unsigned_abs() < i32::MAX as u32,
            "Literal {} is out of range",
            value
        );
        Lit(value)
    }

    pub fn to_dimacs(self) -> i32 {
        self.0
    }

    pub fn var(self) -> Var {
        Var(self.0.unsigned_abs())
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negated(self) -> bool {
        self.0 < 0
    }

    /// Value of this literal under the given value of its variable.
    pub fn eval(self, value: bool) -> bool {
        value != self.is_negated()
    }
}

impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Lit(-self.0)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negated() {
            write!(f, "~")?;
        }
        write!(f, "{}", self.var())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_creation() {
        let v1 = Var::new(1);
        let v2 = Var::new(2);
        assert_eq!(v1.id(), 1);
        assert_eq!(v2.id(), 2);
        assert!(v1 < v2);
    }

    #[test]
    #[should_panic(expected = "Variable IDs must be >= 1")]
    fn test_var_zero_panics() {
        Var::new(0);
    }

    #[test]
    fn test_lit_polarity() {
        let x = Var::new(3);
        assert_eq!(x.pos().to_dimacs(), 3);
        assert_eq!(x.neg().to_dimacs(), -3);
        assert_eq!(-x.pos(), x.neg());
        assert_eq!(x.neg().var(), x);
        assert!(x.pos().is_positive());
        assert!(x.neg().is_negated());
        assert_eq!(Lit::new(x, true), x.neg());
    }

    #[test]
    fn test_lit_eval() {
        let x = Lit::from_dimacs(5);
        assert!(x.eval(true));
        assert!(!x.eval(false));
        assert!((-x).eval(false));
        assert!(!(-x).eval(true));
    }

    #[test]
    fn test_display() {
        assert_eq!(Lit::from_dimacs(-7).to_string(), "~x7");
        assert_eq!(Var::new(2).to_string(), "x2");
    }
}
