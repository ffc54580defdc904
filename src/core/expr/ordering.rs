//! Canonical ordering used to sort the argument list of an Orderless head.

use std::cmp::Ordering;

use super::Expr;

/// Type ordinal used as the tie-break once the lexicographic string-form
/// comparison is equal. The data model names four classes explicitly
/// (`Integer < Real < Symbol < Function`); the remaining variants are
/// slotted in alongside their nearest numeric/pattern kin.
fn type_ordinal(expr: &Expr) -> u8 {
    match expr {
        Expr::Integer(_) => 0,
        Expr::Real(_) => 1,
        Expr::Rational(_) => 2,
        Expr::Complex { .. } => 3,
        Expr::Symbol(_) => 4,
        Expr::Function { .. } => 5,
        Expr::Blank(_) => 6,
        Expr::BoundPattern { .. } => 7,
    }
}

/// Canonical key: lexicographic on string form, tie-broken by type ordinal.
#[must_use]
pub fn expr_cmp(a: &Expr, b: &Expr) -> Ordering {
    a.to_string()
        .cmp(&b.to_string())
        .then_with(|| type_ordinal(a).cmp(&type_ordinal(b)))
}
