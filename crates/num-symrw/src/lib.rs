//! Arbitrary-precision numeric tower backing `symrw`'s `Integer`, `Real`,
//! and `Rational` expression variants.
//!
//! Split out of the main crate the way the teacher pulls its own numeric
//! core into a dedicated crate — here a single `BigInt`-backed tower rather
//! than a pluggable backend selection, since this spec calls for exactly one
//! arbitrary-precision integer type.

mod error;
mod integer;
mod number;
mod rational;

pub use error::NumericError;
pub use integer::Integer;
pub use number::Number;
pub use rational::Rational;
