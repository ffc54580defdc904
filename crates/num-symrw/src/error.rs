//! Error type for the handful of numeric-construction paths that can
//! reasonably be surfaced to a caller instead of asserted away.

use std::fmt;

/// Errors produced by fallible numeric construction.
///
/// Most arithmetic in this crate is total and panics on the programmer-error
/// cases spec'd as "fails hard" (division by zero on exact types). This type
/// covers the few call sites, like [`crate::Rational::new`], where a caller
/// can hand in untrusted values and deserves a `Result` instead of a panic.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    /// An exact (Integer or Rational) division by zero was requested.
    DivisionByZero,
    /// A Rational was constructed with a zero denominator.
    InvalidRational {
        /// The numerator supplied.
        numerator: String,
        /// The (invalid) denominator supplied.
        denominator: String,
    },
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::InvalidRational {
                numerator,
                denominator,
            } => write!(
                f,
                "invalid rational {numerator}/{denominator}: denominator must be nonzero"
            ),
        }
    }
}

impl std::error::Error for NumericError {}
