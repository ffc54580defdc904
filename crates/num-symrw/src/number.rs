//! `Number`: the Integer | Real | Rational union, with the pairwise
//! arithmetic promotion table.

use std::fmt;

use crate::integer::Integer;
use crate::rational::Rational;

/// A numeric value: one of the three non-Complex numeric kinds.
///
/// `Complex`'s real/imaginary components are typed as `Number` rather than
/// as the full expression tree, which is how this crate structurally
/// enforces "Complex's components are never themselves Complex."
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// Arbitrary-precision integer.
    Integer(Integer),
    /// Double-precision float.
    Real(f64),
    /// Reduced rational.
    Rational(Rational),
}

impl Number {
    /// Whether this number is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Integer(i) => i.is_zero(),
            Self::Real(r) => *r == 0.0,
            Self::Rational(r) => r.is_zero(),
        }
    }

    /// Simplify a constructed `Rational` down to `Integer` when its
    /// denominator reduced to 1 or its numerator reduced to 0 — the
    /// collapse the source performs inline after every Rational-producing
    /// arithmetic step.
    fn collapse_rational(r: Rational) -> Self {
        if r.is_zero() {
            Self::Integer(Integer::from(0))
        } else if r.is_integral() {
            Self::Integer(r.numerator().clone())
        } else {
            Self::Rational(r)
        }
    }

    fn as_rational(&self) -> Rational {
        match self {
            Self::Integer(i) => {
                Rational::new(i.clone(), Integer::from(1)).expect("denominator 1 is never zero")
            }
            Self::Rational(r) => r.clone(),
            Self::Real(_) => unreachable!("caller must not request Rational view of a Real"),
        }
    }

    /// `self + other`, promoting to the narrower sufficient type.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Self::Integer(a.clone() + b.clone()),
            (Self::Real(_), _) | (_, Self::Real(_)) => Self::Real(self.to_f64() + other.to_f64()),
            _ => Self::collapse_rational(self.as_rational().add(&other.as_rational())),
        }
    }

    /// `self - other`.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// `self * other`, promoting to the narrower sufficient type.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Self::Integer(a.clone() * b.clone()),
            _ if matches!(self, Self::Real(_)) || matches!(other, Self::Real(_)) => {
                Self::Real(self.to_f64() * other.to_f64())
            }
            _ => Self::collapse_rational(self.as_rational().mul(&other.as_rational())),
        }
    }

    /// `self / other`.
    ///
    /// # Panics
    /// Panics on exact (Integer or Rational) division by zero — a
    /// programmer error per the error taxonomy. Division involving a `Real`
    /// follows ordinary IEEE-754 semantics (may produce `inf`/`NaN`), never
    /// panics.
    #[must_use]
    pub fn div(&self, other: &Self) -> Self {
        if matches!(self, Self::Real(_)) || matches!(other, Self::Real(_)) {
            return Self::Real(self.to_f64() / other.to_f64());
        }
        assert!(!other.is_zero(), "division by zero");
        Self::collapse_rational(self.as_rational().div(&other.as_rational()))
    }

    /// `-self`.
    #[must_use]
    pub fn neg(&self) -> Self {
        match self {
            Self::Integer(i) => Self::Integer(-i.clone()),
            Self::Real(r) => Self::Real(-r),
            Self::Rational(r) => Self::Rational(r.neg()),
        }
    }

    /// Lossy conversion to `f64`, used when either operand of a binary op is
    /// a `Real` and the whole operation must promote to `Real`.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        reason = "Integer -> Real promotion is an intentional precision-losing conversion"
    )]
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Integer(i) => i.value().to_string().parse().unwrap_or(f64::NAN),
            Self::Real(r) => *r,
            Self::Rational(r) => r.to_f64(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Rational(r) => write!(f, "{r}"),
        }
    }
}
