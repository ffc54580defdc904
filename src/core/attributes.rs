//! Algebraic attribute bitset and the static default-attribute-by-name
//! table.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A small bitset of algebraic attributes attached to a head symbol or a
/// constructed `Function`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Attributes(u16);

impl Attributes {
    /// Commutative: argument order is irrelevant, canonical sort imposed.
    pub const ORDERLESS: Self = Self(1 << 0);
    /// Associative: nested same-head calls are spliced on construction.
    pub const FLAT: Self = Self(1 << 1);
    /// `f[x]` is declared equivalent to `x` (applied only via rules here).
    pub const ONE_IDENTITY: Self = Self(1 << 2);
    /// Represents a numeric value (set on every number, and on a Function
    /// whose `NumericFunction` head has all-Numeric arguments).
    pub const NUMERIC: Self = Self(1 << 3);
    /// A Function is Numeric iff this attribute is set on its head and
    /// every argument is Numeric.
    pub const NUMERIC_FUNCTION: Self = Self(1 << 4);
    /// Arguments are not evaluated before the head sees them.
    pub const HOLD: Self = Self(1 << 5);
    /// Metadata consumed by rule guards; a declared-constant head.
    pub const CONSTANT: Self = Self(1 << 6);
    /// Metadata consumed by rule guards; the head should not be redefined.
    pub const PROTECTED: Self = Self(1 << 7);

    /// The empty attribute set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Whether `self` contains every flag in `other`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// `self` with `other`'s flags also set.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// The static default attribute set assigned by head-symbol name, per
    /// the data model's default-attribute table.
    #[must_use]
    pub fn default_for_name(name: &str) -> Self {
        match name {
            "Times" | "Plus" | "And" | "Or" => {
                Self::FLAT.union(Self::ORDERLESS).union(Self::ONE_IDENTITY)
            }
            "Pi" | "E" => Self::CONSTANT,
            _ => Self::empty(),
        }
    }
}

impl BitOr for Attributes {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Attributes {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::ORDERLESS, "Orderless"),
            (Self::FLAT, "Flat"),
            (Self::ONE_IDENTITY, "OneIdentity"),
            (Self::NUMERIC, "Numeric"),
            (Self::NUMERIC_FUNCTION, "NumericFunction"),
            (Self::HOLD, "Hold"),
            (Self::CONSTANT, "Constant"),
            (Self::PROTECTED, "Protected"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}
