//! Error types.
//!
//! Validation failures are reported while building a [`PbConstraint`][crate::constraint::PbConstraint];
//! encoding failures are reported by the encoders and the dispatcher.
//! An unsatisfiable constraint is *not* an error: it compiles to clauses
//! that force unsatisfiability.

use thiserror::Error;

use crate::config::Strategy;

/// Rejected constraint input.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConstraintError {
    /// The constraint was given without any terms.
    #[error("constraint has no literals")]
    NoLiterals,

    /// The absolute coefficients do not sum up within `i64::MAX`.
    #[error("sum of coefficients overflows the accumulator")]
    CoefficientOverflow,
}

/// Failure of an encode call.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EncodeError {
    /// The clause budget of a limited encoder was exceeded.
    ///
    /// Recoverable: fall back to another strategy or relax the limit.
    #[error("encoding needs more than {limit} clauses (aborted at {clauses})")]
    TooBig { clauses: u64, limit: u64 },

    /// Every configured strategy reported [`EncodeError::TooBig`].
    #[error("no strategy could encode the constraint (tried {attempted:?})")]
    EncodingInfeasible { attempted: Vec<Strategy> },
}
