//! The pattern-matcher's binding environment: an associative map from
//! pattern-variable names to matched expressions.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::expr::Expr;
use super::symbol::Symbol;

/// A set of (name, expression) pairs with unique names.
///
/// Immutable from the matcher's perspective: every extension produces a new
/// `Bindings` (via [`Self::bind`] or [`Self::union`]) rather than mutating
/// in place, even though the backing map is a plain owned `FxHashMap`.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    map: FxHashMap<Symbol, Arc<Expr>>,
}

impl Bindings {
    /// An empty binding environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `(name, expr)`, returning the extended environment.
    ///
    /// Whether it is meaningful to call this when `name` is already bound is
    /// the pattern matcher's concern, not this type's — see
    /// [`Self::contains`] for matcher-side linear-pattern enforcement. A
    /// direct `bind` of an already-bound name simply overwrites.
    #[must_use]
    pub fn bind(mut self, name: Symbol, expr: Arc<Expr>) -> Self {
        self.map.insert(name, expr);
        self
    }

    /// Look up a binding, returning `None` if absent. The soft counterpart
    /// to [`Self::get`] — used by the matcher, which treats "not yet bound"
    /// as ordinary control flow, not an error.
    #[must_use]
    pub fn lookup(&self, name: Symbol) -> Option<&Arc<Expr>> {
        self.map.get(&name)
    }

    /// Look up a binding, panicking if it is absent.
    ///
    /// Reserved for callers (substitution, lambda-rule callbacks) for which
    /// an unbound name is a broken invariant rather than recoverable input —
    /// the "fails hard" programmer-error path in the error taxonomy.
    ///
    /// # Panics
    /// Panics if `name` is not bound.
    #[must_use]
    #[allow(
        clippy::panic,
        reason = "programmer-error path per the error taxonomy: an unbound lookup here is a broken invariant the caller controls, not recoverable input"
    )]
    pub fn get(&self, name: Symbol) -> &Arc<Expr> {
        self.map
            .get(&name)
            .unwrap_or_else(|| panic!("unbound pattern variable '{name}'"))
    }

    /// Whether `name` is bound.
    #[must_use]
    pub fn contains(&self, name: Symbol) -> bool {
        self.map.contains_key(&name)
    }

    /// Remove a binding, returning the value if it was present.
    ///
    /// Not named in the matcher's own operation list but present in the
    /// original implementation and useful for rule authors assembling
    /// bindings by hand outside of matching.
    pub fn remove(&mut self, name: Symbol) -> Option<Arc<Expr>> {
        self.map.remove(&name)
    }

    /// Merge two binding environments. On a name clash, `self`'s value wins
    /// (the resolved, documented policy — see the numbered open-question
    /// resolution for `Bindings.union`).
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut map = other.map.clone();
        for (name, expr) in &self.map {
            map.insert(*name, expr.clone());
        }
        Self { map }
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
