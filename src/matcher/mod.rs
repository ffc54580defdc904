//! Attributed pattern matching: enumerates bindings of pattern variables to
//! subterms, modulo associativity (Flat) and commutativity (Orderless).
//!
//! The matcher works entirely in terms of owned `Arc<Expr>` rather than
//! borrowed `&Expr`. Sequence matching under Flat synthesizes brand-new
//! grouped sub-expressions that don't live anywhere in the original target
//! tree, and threading a borrow lifetime through that would infect every
//! return type in this module; `Arc` cloning is a refcount bump, not a deep
//! copy, so there is no real cost to paying for it uniformly.

mod sequence;

use std::sync::Arc;

use crate::core::attributes::Attributes;
use crate::core::bindings::Bindings;
use crate::core::expr::{number_to_expr, Expr};

/// Enumerate every way `pattern` matches `target`, lazily.
///
/// Consumers that only need the first match (every caller in this crate)
/// should call `.next()` once; the combinatorial modes in [`sequence`] do
/// not materialize anything beyond what is pulled.
#[must_use]
pub fn match_pattern(pattern: &Expr, target: &Expr) -> Box<dyn Iterator<Item = Bindings>> {
    match_with_bindings(Arc::new(pattern.clone()), Arc::new(target.clone()), Bindings::new())
}

fn match_with_bindings(
    pattern: Arc<Expr>,
    target: Arc<Expr>,
    bindings: Bindings,
) -> Box<dyn Iterator<Item = Bindings>> {
    match pattern.as_ref() {
        Expr::Blank(None) => Box::new(std::iter::once(bindings)),

        Expr::Blank(Some(head)) => {
            if target.head() == **head {
                Box::new(std::iter::once(bindings))
            } else {
                Box::new(std::iter::empty())
            }
        }

        Expr::BoundPattern { name, base } => {
            let name = *name;
            let base = Arc::clone(base);
            let target_for_check = Arc::clone(&target);
            Box::new(
                match_with_bindings(base, target, bindings).filter_map(move |b| {
                    match b.lookup(name) {
                        Some(existing) if **existing == *target_for_check => Some(b),
                        Some(_) => None,
                        None => Some(b.bind(name, Arc::clone(&target_for_check))),
                    }
                }),
            )
        }

        // Component-wise: the real and imaginary parts are matched
        // independently rather than the whole node compared at once. With
        // `Number` excluding Blank/BoundPattern this collapses to structural
        // equality of each part, but the shape mirrors how the two
        // components are meant to be checked.
        Expr::Complex {
            real: rp,
            imaginary: ip,
        } => {
            let Expr::Complex {
                real: rt,
                imaginary: it,
            } = target.as_ref()
            else {
                return Box::new(std::iter::empty());
            };
            let real_pat = Arc::new(number_to_expr(rp.clone()));
            let real_target = Arc::new(number_to_expr(rt.clone()));
            let imag_pat = Arc::new(number_to_expr(ip.clone()));
            let imag_target = Arc::new(number_to_expr(it.clone()));
            Box::new(
                match_with_bindings(real_pat, real_target, bindings).flat_map(move |b| {
                    match_with_bindings(Arc::clone(&imag_pat), Arc::clone(&imag_target), b)
                }),
            )
        }

        Expr::Function {
            head: head_pattern,
            args: arg_patterns,
            ..
        } => {
            let Expr::Function {
                head: target_head,
                args: target_args,
                ..
            } = target.as_ref()
            else {
                return Box::new(std::iter::empty());
            };
            let attrs = head_pattern.attributes();
            let orderless = attrs.contains(Attributes::ORDERLESS);
            let flat = attrs.contains(Attributes::FLAT);
            let head_pattern = Arc::clone(head_pattern);
            let target_head = Arc::clone(target_head);
            let arg_patterns = arg_patterns.clone();
            let target_args = target_args.clone();
            Box::new(
                match_with_bindings(head_pattern, Arc::clone(&target_head), bindings).flat_map(
                    move |b| {
                        sequence::match_sequence(
                            arg_patterns.clone(),
                            target_args.clone(),
                            Arc::clone(&target_head),
                            b,
                            orderless,
                            flat,
                        )
                    },
                ),
            )
        }

        // Integer, Real, Rational, Symbol: a literal non-pattern expression
        // matches only its structural equal.
        _ => {
            if *pattern == *target {
                Box::new(std::iter::once(bindings))
            } else {
                Box::new(std::iter::empty())
            }
        }
    }
}
