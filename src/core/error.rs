//! Error surface for the numeric-construction paths that can reasonably be
//! reported to a caller instead of asserted away.
//!
//! The type itself lives in the numeric backend crate (`num-symrw`), since
//! that is where the fallible constructors (`Rational::new`) live; it is
//! re-exported here so callers reach it as `symrw::error::NumericError`.

pub use num_symrw::NumericError;
