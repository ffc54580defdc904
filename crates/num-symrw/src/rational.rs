//! Arbitrary-precision rational number, always kept in lowest terms with a
//! positive denominator.

use std::fmt;

use crate::error::NumericError;
use crate::integer::Integer;

/// A reduced rational number: `numerator / denominator`.
///
/// Construction always reduces by the gcd and normalizes the sign onto the
/// numerator, so `denominator` is never negative. This type does not itself
/// collapse a unit denominator down to a bare integer — that simplification
/// is a [`crate::Number`]-level concern, the same way the source only
/// special-cases it in the arithmetic methods, not the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numerator: Integer,
    denominator: Integer,
}

impl Rational {
    /// Build a `Rational` from a numerator and denominator, reducing to
    /// lowest terms and normalizing the denominator to be positive.
    ///
    /// # Errors
    /// Returns [`NumericError::InvalidRational`] if `denominator` is zero.
    pub fn new(numerator: Integer, denominator: Integer) -> Result<Self, NumericError> {
        if denominator.is_zero() {
            return Err(NumericError::InvalidRational {
                numerator: numerator.to_string(),
                denominator: denominator.to_string(),
            });
        }
        let divisor = numerator.gcd(&denominator);
        let mut n = numerator
            .checked_div(&divisor)
            .expect("gcd divides the numerator exactly by construction");
        let mut d = denominator
            .checked_div(&divisor)
            .expect("gcd divides the denominator exactly by construction");
        if d.is_negative() {
            n = -n;
            d = -d;
        }
        Ok(Self {
            numerator: n,
            denominator: d,
        })
    }

    /// The (reduced) numerator.
    #[must_use]
    pub const fn numerator(&self) -> &Integer {
        &self.numerator
    }

    /// The (reduced, positive) denominator.
    #[must_use]
    pub const fn denominator(&self) -> &Integer {
        &self.denominator
    }

    /// Whether this rational's value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Whether this rational reduced to a unit denominator (i.e. is
    /// integral). Callers that want the Integer-collapse behavior described
    /// in the data model check this after construction.
    #[must_use]
    pub fn is_integral(&self) -> bool {
        self.denominator == Integer::from(1)
    }

    /// Lossy conversion to `f64`, used when promoting against a `Real`.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        reason = "promotion to Real is an intentional precision-losing conversion"
    )]
    pub fn to_f64(&self) -> f64 {
        let num: f64 = self.numerator.value().to_string().parse().unwrap_or(f64::NAN);
        let den: f64 = self.denominator.value().to_string().parse().unwrap_or(f64::NAN);
        num / den
    }

    /// `self + other`.
    ///
    /// # Panics
    /// Never panics in practice: a product of two nonzero denominators is
    /// always nonzero, so the internal reduction always succeeds.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let numerator = self.numerator.clone() * other.denominator.clone()
            + other.numerator.clone() * self.denominator.clone();
        let denominator = self.denominator.clone() * other.denominator.clone();
        Self::new(numerator, denominator).expect("product of two nonzero denominators is nonzero")
    }

    /// `self - other`.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// `self * other`.
    ///
    /// # Panics
    /// Never panics in practice, for the same reason as [`Self::add`].
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let numerator = self.numerator.clone() * other.numerator.clone();
        let denominator = self.denominator.clone() * other.denominator.clone();
        Self::new(numerator, denominator).expect("product of two nonzero denominators is nonzero")
    }

    /// `self / other`.
    ///
    /// # Panics
    /// Panics if `other` is zero — exact division by zero is a programmer
    /// error per the numeric error taxonomy, not a recoverable condition.
    #[must_use]
    pub fn div(&self, other: &Self) -> Self {
        assert!(!other.is_zero(), "division by zero");
        self.mul(&Self {
            numerator: other.denominator.clone(),
            denominator: other.numerator.clone(),
        })
    }

    /// `-self`.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            numerator: -self.numerator.clone(),
            denominator: self.denominator.clone(),
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational[{}, {}]", self.numerator, self.denominator)
    }
}
