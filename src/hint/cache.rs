//! Classification cache.
//!
//! Sign classification is memoized per hint *identity*, not per hint value —
//! re-classifying the same `RawHint` object on every call of a hot decorated
//! function would otherwise repeat a match that never changes. The cache
//! keys by the address of an `Arc<RawHint>`, which is object identity for a
//! reference-counted value. A bare address alone would invite an ABA
//! problem once the original `Arc` drops and the allocator hands the same
//! address to an unrelated hint, so every entry also holds a clone of the
//! `Arc` it was classified from: as long as the cache lives, that clone
//! keeps the allocation's address from ever being reused, which rules the
//! collision out entirely rather than merely tolerating it.

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

use super::{classify, RawHint, Sign};

static CLASSIFICATION_CACHE: Lazy<DashMap<usize, (Arc<RawHint>, Sign)>> = Lazy::new(DashMap::new);

/// Classify `hint`, memoizing by the identity of the `Arc` it is held in.
pub fn classify_cached(hint: &Arc<RawHint>) -> Sign {
    let key = Arc::as_ptr(hint) as usize;
    if let Some(entry) = CLASSIFICATION_CACHE.get(&key) {
        return entry.1;
    }
    let sign = classify(hint);
    CLASSIFICATION_CACHE.insert(key, (hint.clone(), sign));
    sign
}
