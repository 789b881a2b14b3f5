use std::fmt::{Debug, Display, Formatter};
use std::ops::Not;

use crate::types::Lit;

/// Output of a gate or network node: a literal or one of the two constants.
///
/// Packed into an `i32`: literals keep their DIMACS value, the constants sit at
/// `±i32::MAX`, so negation is a sign flip for both.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Signal(i32);

const MAGIC: i32 = i32::MAX;

// Constructors
impl Signal {
    pub const fn zero() -> Self {
        Self(-MAGIC)
    }

    pub const fn one() -> Self {
        Self(MAGIC)
    }

    pub fn from_lit(lit: Lit) -> Self {
        Self(lit.to_dimacs())
    }
}

// Getters
impl Signal {
    /// The literal behind this signal, `None` for constants.
    pub fn lit(self) -> Option<Lit> {
        if self.is_const() {
            None
        } else {
            Some(Lit::from_dimacs(self.0))
        }
    }
}

// Checks
impl Signal {
    pub const fn is_const(&self) -> bool {
        self.0 == MAGIC || self.0 == -MAGIC
    }

    pub const fn is_one(&self) -> bool {
        self.0 == MAGIC
    }
}

impl From<bool> for Signal {
    fn from(b: bool) -> Self {
        if b {
            Self::one()
        } else {
            Self::zero()
        }
    }
}

impl From<Lit> for Signal {
    fn from(lit: Lit) -> Self {
        Self::from_lit(lit)
    }
}

impl Not for Signal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.lit() {
            None => write!(f, "{}", self.is_one() as u8),
            Some(lit) => write!(f, "{}", lit),
        }
    }
}

impl Debug for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const() {
        let zero = Signal::zero();
        let one = Signal::one();

        assert!(zero.is_const());
        assert!(one.is_const());
        assert!(one.is_one());
        assert!(!zero.is_one());

        assert_eq!(zero, !one);
        assert_eq!(one, !zero);
        assert_eq!(Signal::from(true), one);
        assert_eq!(zero.lit(), None);
    }

    #[test]
    fn test_lit() {
        let x = Lit::from_dimacs(4);
        let s = Signal::from(x);
        assert!(!s.is_const());
        assert_eq!(s.lit(), Some(x));
        assert_eq!((!s).lit(), Some(-x));
        assert_eq!(s.to_string(), "x4");
        assert_eq!(Signal::one().to_string(), "1");
    }
}
