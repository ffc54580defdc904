//! Arbitrary-precision integer value.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::error::NumericError;

/// An arbitrary-precision integer.
///
/// Wraps [`BigInt`] rather than a machine word, per the arbitrary-precision
/// requirement on the `Integer` expression variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer(BigInt);

impl Integer {
    /// Build an `Integer` from a `BigInt`.
    #[must_use]
    pub const fn from_bigint(value: BigInt) -> Self {
        Self(value)
    }

    /// The underlying arbitrary-precision value.
    #[must_use]
    pub const fn value(&self) -> &BigInt {
        &self.0
    }

    /// Whether this integer is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Whether this integer is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Truncating remainder, mirroring the source's `__mod__` (defined only
    /// between two Integers).
    #[must_use]
    pub fn rem(&self, other: &Self) -> Self {
        Self(&self.0 % &other.0)
    }

    /// Exact (truncating) division. Fails when `other` is zero rather than
    /// silently producing a garbage quotient — the caller decides whether to
    /// surface that as a [`NumericError`] or treat it as a programmer error.
    ///
    /// # Errors
    /// Returns [`NumericError::DivisionByZero`] if `other` is zero.
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumericError> {
        if other.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        #[allow(
            clippy::integer_division,
            reason = "exact integer division is the intended operation here, guarded above"
        )]
        Ok(Self(&self.0 / &other.0))
    }

    /// Greatest common divisor via the binary (Stein's) algorithm, as named
    /// explicitly for Rational reduction.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        fn stein_gcd(x: BigInt, y: BigInt) -> BigInt {
            let x = x.abs();
            let y = y.abs();
            if x.is_zero() && y.is_zero() {
                return BigInt::zero();
            }
            if x.is_zero() {
                return y;
            }
            if y.is_zero() {
                return x;
            }
            let x_even = (&x % 2) == BigInt::zero();
            let y_even = (&y % 2) == BigInt::zero();
            #[allow(
                clippy::integer_division,
                reason = "halving even operands is exact by construction"
            )]
            if x_even && y_even {
                2 * stein_gcd(x / 2, y / 2)
            } else if x_even {
                stein_gcd(x / 2, y)
            } else if y_even {
                stein_gcd(x, y / 2)
            } else if x >= y {
                stein_gcd((x - &y) / 2, y)
            } else {
                stein_gcd((y - &x) / 2, x)
            }
        }
        Self(stein_gcd(self.0.clone(), other.0.clone()))
    }

    /// Non-negative integer power, via binary exponentiation.
    #[must_use]
    pub fn pow(&self, exponent: u32) -> Self {
        let mut result = BigInt::from(1);
        let mut base = self.0.clone();
        let mut exp = exponent;
        while exp > 0 {
            if exp & 1 == 1 {
                result *= &base;
            }
            if exp > 1 {
                base = &base * &base;
            }
            exp >>= 1;
        }
        Self(result)
    }

    /// Least common multiple, derived from [`Self::gcd`].
    ///
    /// # Panics
    /// Panics if both `self` and `other` are zero (the gcd is zero, and the
    /// division below is undefined).
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        let product = self.clone() * other.clone();
        let divisor = self.gcd(other);
        product
            .checked_div(&divisor)
            .expect("lcm undefined when both operands are zero")
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self(BigInt::from(value))
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Integer {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Integer {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Integer {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Neg for Integer {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}
