//! Type-safe, globally-interned `Symbol` handles.
//!
//! Symbols are interned globally for O(1) equality comparisons: each unique
//! name exists exactly once, and every handle sharing that name shares the
//! same id.

mod interned;
mod registry;

pub(crate) use interned::InternedSymbol;
pub use registry::{
    clear_symbols, declare_attributes, declared_attributes, remove_symbol, symb, symb_get,
    symb_new, symbol_count, symbol_exists, symbol_names,
};
pub(crate) use registry::{lookup_by_id, symb_interned};

use std::sync::Arc;

/// Errors produced by explicit (non-idempotent) symbol construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// Attempted to create a symbol with a name that is already registered.
    DuplicateName(String),
    /// Attempted to get a symbol that does not exist.
    NotFound(String),
}

impl std::fmt::Display for SymbolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(name) => {
                write!(
                    f,
                    "symbol '{name}' is already registered; use symb_get() to retrieve it"
                )
            }
            Self::NotFound(name) => {
                write!(f, "symbol '{name}' not found; use symb() to create it first")
            }
        }
    }
}

impl std::error::Error for SymbolError {}

/// A lightweight, `Copy`-able handle to an interned symbol.
///
/// Equality and hashing are O(1) id comparisons; the name (if any) is
/// fetched from the global registry on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub(crate) u64);

impl Symbol {
    pub(crate) const fn from_id(id: u64) -> Self {
        Self(id)
    }

    /// The symbol's unique id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// The symbol's name, or `None` if it has been evicted from the registry
    /// by `remove_symbol`/`clear_symbols`.
    #[must_use]
    pub fn name(self) -> Option<Arc<str>> {
        lookup_by_id(self.0).and_then(|s| s.name_arc())
    }

    /// Whether this symbol carries a given attribute, from the per-symbol
    /// declared table (see [`declare_attributes`]).
    #[must_use]
    pub fn has_attribute(self, attr: crate::core::attributes::Attributes) -> bool {
        declared_attributes(self).contains(attr)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "${}", self.0),
        }
    }
}
