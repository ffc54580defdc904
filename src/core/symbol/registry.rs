//! Global symbol registry management.
//!
//! Sharded to minimize lock contention, `FxHash` for fast name lookups, per
//! the teacher's `core/symbol/registry.rs`. Backing storage is a single
//! `slotmap::SlotMap` rather than a parallel id-indexed `Vec`, since a
//! slotmap key's ffi-encoded form already is a dense, reusable id.

use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use rustc_hash::{FxHashMap, FxHasher};
use slotmap::{DefaultKey, Key, KeyData, SlotMap};

use crate::core::attributes::Attributes;

use super::interned::InternedSymbol;
use super::{Symbol, SymbolError};

const NUM_SHARDS: usize = 16;

struct RegistryShard {
    name_to_key: FxHashMap<Arc<str>, DefaultKey>,
}

struct SymbolRegistry {
    shards: [RwLock<RegistryShard>; NUM_SHARDS],
    slots: RwLock<SlotMap<DefaultKey, InternedSymbol>>,
    attributes: RwLock<FxHashMap<u64, Attributes>>,
}

impl SymbolRegistry {
    fn new() -> Self {
        let shards: [RwLock<RegistryShard>; NUM_SHARDS] = std::array::from_fn(|_| {
            RwLock::new(RegistryShard {
                name_to_key: FxHashMap::default(),
            })
        });
        Self {
            shards,
            slots: RwLock::new(SlotMap::new()),
            attributes: RwLock::new(FxHashMap::default()),
        }
    }

    fn get_shard(&self, name: &str) -> &RwLock<RegistryShard> {
        let mut hasher = FxHasher::default();
        name.hash(&mut hasher);
        let hash = hasher.finish();
        // Only the low bits are needed for sharding (hash % NUM_SHARDS).
        #[allow(
            clippy::cast_possible_truncation,
            reason = "only the low bits of the hash are used to select a shard"
        )]
        let shard_idx = (hash as usize) % NUM_SHARDS;
        &self.shards[shard_idx]
    }
}

static REGISTRY: std::sync::LazyLock<SymbolRegistry> = std::sync::LazyLock::new(SymbolRegistry::new);

fn key_for_id(id: u64) -> DefaultKey {
    KeyData::from_ffi(id).into()
}

/// Look up an `InternedSymbol` by id, for `Symbol` -> `Expr` conversion.
///
/// # Panics
/// Panics if the global registry lock is poisoned.
pub(crate) fn lookup_by_id(id: u64) -> Option<InternedSymbol> {
    let slots = REGISTRY.slots.read().expect("Global symbol registry poisoned");
    slots.get(key_for_id(id)).cloned()
}

/// Create a new named symbol; errors if the name is already registered.
///
/// # Errors
/// Returns [`SymbolError::DuplicateName`] if `name` is already registered.
///
/// # Panics
/// Panics if any global registry lock is poisoned.
pub fn symb_new(name: &str) -> Result<Symbol, SymbolError> {
    let shard_lock = REGISTRY.get_shard(name);
    let mut shard = shard_lock
        .write()
        .expect("Global symbol registry shard poisoned");
    if shard.name_to_key.contains_key(name) {
        return Err(SymbolError::DuplicateName(name.to_owned()));
    }

    let mut slots = REGISTRY
        .slots
        .write()
        .expect("Global symbol registry poisoned");
    let key = slots.insert_with_key(|key| InternedSymbol::new_named(name, key.data().as_ffi()));
    drop(slots);

    shard.name_to_key.insert(Arc::from(name), key);
    drop(shard);

    Ok(Symbol::from_id(key.data().as_ffi()))
}

/// Get an existing symbol by name.
///
/// # Errors
/// Returns [`SymbolError::NotFound`] if `name` is not registered.
///
/// # Panics
/// Panics if the global registry shard lock is poisoned.
pub fn symb_get(name: &str) -> Result<Symbol, SymbolError> {
    let shard_lock = REGISTRY.get_shard(name);
    let shard = shard_lock
        .read()
        .expect("Global symbol registry shard poisoned");
    shard
        .name_to_key
        .get(name)
        .map(|key| Symbol::from_id(key.data().as_ffi()))
        .ok_or_else(|| SymbolError::NotFound(name.to_owned()))
}

/// Check whether a symbol with this name exists.
///
/// # Panics
/// Panics if the global registry shard lock is poisoned.
#[must_use]
pub fn symbol_exists(name: &str) -> bool {
    let shard_lock = REGISTRY.get_shard(name);
    let shard = shard_lock
        .read()
        .expect("Global symbol registry shard poisoned");
    shard.name_to_key.contains_key(name)
}

/// Create or get a symbol (never errors).
#[must_use]
pub fn symb(name: &str) -> Symbol {
    let interned = symb_interned(name);
    Symbol::from_id(interned.id())
}

/// Get or create an interned symbol.
///
/// # Panics
/// Panics if any global registry lock is poisoned, or if a shard and the
/// backing slotmap have fallen out of sync (an invariant violation, never
/// expected).
pub(crate) fn symb_interned(name: &str) -> InternedSymbol {
    let shard_lock = REGISTRY.get_shard(name);

    // Fast path: read lock, common case of an already-interned name.
    {
        let shard = shard_lock
            .read()
            .expect("Global symbol registry shard poisoned");
        if let Some(&key) = shard.name_to_key.get(name) {
            let slots = REGISTRY
                .slots
                .read()
                .expect("Global symbol registry poisoned");
            if let Some(sym) = slots.get(key) {
                return sym.clone();
            }
        }
    }

    // Slow path: write lock, insert if still missing after re-check.
    let mut shard = shard_lock
        .write()
        .expect("Global symbol registry shard poisoned");
    if let Some(&key) = shard.name_to_key.get(name) {
        let slots = REGISTRY
            .slots
            .read()
            .expect("Global symbol registry poisoned");
        return slots
            .get(key)
            .cloned()
            .expect("shard and slotmap must stay consistent");
    }

    let mut slots = REGISTRY
        .slots
        .write()
        .expect("Global symbol registry poisoned");
    let key = slots.insert_with_key(|key| InternedSymbol::new_named(name, key.data().as_ffi()));
    let interned = slots
        .get(key)
        .cloned()
        .expect("just-inserted key must resolve");
    drop(slots);

    shard.name_to_key.insert(Arc::from(name), key);
    interned
}

/// Remove a symbol from the global registry.
///
/// Returns `true` if it existed and was removed.
///
/// # Panics
/// Panics if any global registry lock is poisoned.
pub fn remove_symbol(name: &str) -> bool {
    let shard_lock = REGISTRY.get_shard(name);
    let mut shard = shard_lock
        .write()
        .expect("Global symbol registry shard poisoned");
    let Some(key) = shard.name_to_key.remove(name) else {
        return false;
    };
    drop(shard);

    let mut slots = REGISTRY
        .slots
        .write()
        .expect("Global symbol registry poisoned");
    let id = key.data().as_ffi();
    slots.remove(key);
    drop(slots);

    REGISTRY
        .attributes
        .write()
        .expect("Global symbol attribute table poisoned")
        .remove(&id);
    true
}

/// Clear every symbol from the global registry (tests only).
///
/// # Panics
/// Panics if any global registry lock is poisoned.
pub fn clear_symbols() {
    for shard_lock in &REGISTRY.shards {
        shard_lock
            .write()
            .expect("Global symbol registry shard poisoned")
            .name_to_key
            .clear();
    }
    REGISTRY
        .slots
        .write()
        .expect("Global symbol registry poisoned")
        .clear();
    REGISTRY
        .attributes
        .write()
        .expect("Global symbol attribute table poisoned")
        .clear();
}

/// Number of registered symbols.
///
/// # Panics
/// Panics if any global registry shard lock is poisoned.
#[must_use]
pub fn symbol_count() -> usize {
    REGISTRY
        .shards
        .iter()
        .map(|shard_lock| {
            shard_lock
                .read()
                .expect("Global symbol registry shard poisoned")
                .name_to_key
                .len()
        })
        .sum()
}

/// All registered symbol names, sorted.
///
/// # Panics
/// Panics if any global registry shard lock is poisoned.
#[must_use]
pub fn symbol_names() -> Vec<String> {
    let mut names = Vec::new();
    for shard_lock in &REGISTRY.shards {
        let shard = shard_lock
            .read()
            .expect("Global symbol registry shard poisoned");
        names.extend(shard.name_to_key.keys().map(|name| (**name).to_owned()));
    }
    names.sort_unstable();
    names
}

/// Declare an attribute set for a symbol, consulted at Function-construction
/// time together with the static default-by-name table. This is additive to
/// the teacher's registry: this spec's symbols carry user-declarable
/// attributes (`Hold`, `Protected`, `Constant`, `NumericFunction`, ...) that
/// the teacher's symbols never needed.
///
/// # Panics
/// Panics if the global attribute table lock is poisoned.
pub fn declare_attributes(symbol: Symbol, attrs: Attributes) {
    REGISTRY
        .attributes
        .write()
        .expect("Global symbol attribute table poisoned")
        .insert(symbol.id(), attrs);
}

/// The attribute set declared for a symbol, if any.
///
/// # Panics
/// Panics if the global attribute table lock is poisoned.
#[must_use]
pub fn declared_attributes(symbol: Symbol) -> Attributes {
    REGISTRY
        .attributes
        .read()
        .expect("Global symbol attribute table poisoned")
        .get(&symbol.id())
        .copied()
        .unwrap_or_else(Attributes::empty)
}
