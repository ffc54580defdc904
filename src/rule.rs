//! Rule abstraction: a pattern paired with a replacement (substitution
//! expression or host callback) and an optional guard list.
//!
//! Two rule kinds, per the external interfaces: [`SubstitutionRule`]
//! (right-hand side is an `Expr` whose pattern-variables get substituted)
//! and [`LambdaRule`] (right-hand side is a host-language callback taking
//! the match's bindings, used for primitive arithmetic and numeric
//! predicates so callbacks stay pure and never touch mutable state).

use std::fmt;
use std::rc::Rc;

use crate::core::bindings::Bindings;
use crate::core::expr::Expr;
use crate::core::symbol::symb;
use crate::kernel::Kernel;
use crate::matcher::match_pattern;

/// Common rule behavior: request the first match, evaluate guards under the
/// kernel, and produce a replacement or signal "unchanged".
///
/// Guards are evaluated by the kernel (not locally), since a guard may be an
/// arbitrary expression requiring full rewriting (e.g. `RealQ[x]` dispatching
/// through other rules) — the "guards referencing the global kernel -> pass
/// the kernel explicitly" redesign hint from the data model, realized here as
/// an explicit `&Kernel` parameter rather than a module-level singleton.
pub trait Rule: fmt::Display {
    /// Try to rewrite `expr` against this rule's pattern and guards.
    ///
    /// Returns `None` ("unchanged") if the pattern has no match, or if it
    /// matches but a guard fails. Per the rule-application contract, only the
    /// *first* match is tried; a guard failure does not fall back to a later
    /// match.
    fn apply(&self, kernel: &Kernel, expr: &Expr) -> Option<Expr>;
}

fn guards_pass(kernel: &Kernel, guards: &[Expr], bindings: &Bindings) -> bool {
    let true_symbol = Expr::Symbol(symb("True"));
    guards
        .iter()
        .all(|guard| kernel.evaluate_guard(&guard.substitute(bindings)) == true_symbol)
}

/// A rule whose right-hand side is a substitution expression: pattern
/// variables bound by the match are replaced by their matched values.
pub struct SubstitutionRule {
    pattern: Expr,
    rhs: Expr,
    guards: Vec<Expr>,
}

impl SubstitutionRule {
    /// A substitution rule with no guards.
    #[must_use]
    pub fn new(pattern: Expr, rhs: Expr) -> Self {
        Self::with_guards(pattern, rhs, Vec::new())
    }

    /// A substitution rule that only fires when every guard evaluates to
    /// the symbol `True` under the match's bindings.
    #[must_use]
    pub fn with_guards(pattern: Expr, rhs: Expr, guards: Vec<Expr>) -> Self {
        Self {
            pattern,
            rhs,
            guards,
        }
    }
}

impl Rule for SubstitutionRule {
    fn apply(&self, kernel: &Kernel, expr: &Expr) -> Option<Expr> {
        let bindings = match_pattern(&self.pattern, expr).next()?;
        if guards_pass(kernel, &self.guards, &bindings) {
            Some(self.rhs.substitute(&bindings))
        } else {
            None
        }
    }
}

impl fmt::Display for SubstitutionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.pattern, self.rhs)
    }
}

/// A rule whose right-hand side is a host-language callback taking the
/// match's bindings and returning the replacement expression.
///
/// Used for primitive arithmetic and numeric predicates — things that
/// cannot be expressed as a substitution template. The callback is an
/// `Rc<dyn Fn>` rather than a plain function pointer so a `LambdaRule` can
/// close over data (e.g. a constant table) without the crate prescribing a
/// particular closure shape; `Rc` rather than `Arc` since the engine is
/// single-threaded (`# CONCURRENCY & RESOURCE MODEL`).
#[derive(Clone)]
pub struct LambdaRule {
    pattern: Expr,
    callback: Rc<dyn Fn(&Bindings) -> Expr>,
    guards: Vec<Expr>,
}

impl LambdaRule {
    /// A lambda rule with no guards.
    pub fn new(pattern: Expr, callback: impl Fn(&Bindings) -> Expr + 'static) -> Self {
        Self::with_guards(pattern, callback, Vec::new())
    }

    /// A lambda rule that only fires when every guard evaluates to the
    /// symbol `True` under the match's bindings.
    pub fn with_guards(
        pattern: Expr,
        callback: impl Fn(&Bindings) -> Expr + 'static,
        guards: Vec<Expr>,
    ) -> Self {
        Self {
            pattern,
            callback: Rc::new(callback),
            guards,
        }
    }
}

impl Rule for LambdaRule {
    fn apply(&self, kernel: &Kernel, expr: &Expr) -> Option<Expr> {
        let bindings = match_pattern(&self.pattern, expr).next()?;
        if guards_pass(kernel, &self.guards, &bindings) {
            Some((self.callback)(&bindings))
        } else {
            None
        }
    }
}

impl fmt::Display for LambdaRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> <native>", self.pattern)
    }
}
