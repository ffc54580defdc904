//! Interned symbol implementation.
//!
//! Contains the `InternedSymbol` type that is stored in the global registry.
//! The numeric id embedded here is the `slotmap` key's ffi-encoded form —
//! decoupling `InternedSymbol` from the key type itself lets a `Symbol`
//! handle (just a `u64`) outlive its registry entry and still carry a
//! meaningful id for `Display`/debugging.

use std::sync::Arc;

/// An interned symbol — the actual data stored in the registry.
///
/// Cheap to clone: only an id and an `Arc`.
#[derive(Debug, Clone)]
pub struct InternedSymbol {
    id: u64,
    name: Option<Arc<str>>,
}

impl InternedSymbol {
    /// Create a new named interned symbol for a given registry-assigned id.
    pub(crate) fn new_named(name: &str, id: u64) -> Self {
        Self {
            id,
            name: Some(Arc::from(name)),
        }
    }

    /// The symbol's unique id as a `u64`, for display and external use.
    #[inline]
    pub(crate) const fn id(&self) -> u64 {
        self.id
    }

    /// The symbol's name.
    pub(crate) fn name_arc(&self) -> Option<Arc<str>> {
        self.name.clone()
    }
}

impl PartialEq for InternedSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for InternedSymbol {}

impl std::hash::Hash for InternedSymbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for InternedSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(n) => write!(f, "{n}"),
            None => write!(f, "${}", self.id),
        }
    }
}

impl PartialOrd for InternedSymbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InternedSymbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (&self.name, &other.name) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => self.id.cmp(&other.id),
        }
    }
}
