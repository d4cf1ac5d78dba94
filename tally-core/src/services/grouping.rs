//! Grouping primitives shared by the analytics queries
//!
//! Every grouped result is an [`IndexMap`], so keys come out in the order
//! they were first seen.

use std::hash::Hash;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::domain::result::{Error, Result};

/// Bucket `items` by `key_fn` and fold each bucket into an accumulator.
///
/// A bucket starts at `identity()` the first time its key is seen, then
/// `reduce_fn` folds every item of that bucket into it in iteration order.
pub fn group_reduce<T, K, V, I, F, Z, R>(
    items: I,
    mut key_fn: F,
    identity: Z,
    mut reduce_fn: R,
) -> IndexMap<K, V>
where
    I: IntoIterator<Item = T>,
    K: Hash + Eq,
    F: FnMut(&T) -> K,
    Z: Fn() -> V,
    R: FnMut(&mut V, T),
{
    let mut groups: IndexMap<K, V> = IndexMap::new();
    for item in items {
        let key = key_fn(&item);
        let acc = groups.entry(key).or_insert_with(&identity);
        reduce_fn(acc, item);
    }
    groups
}

/// Collect key/value pairs into a map, failing on the first repeated key.
///
/// `describe` renders the offending key for the `DuplicateKey` error.
pub fn collect_unique<K, V, I, D>(pairs: I, describe: D) -> Result<IndexMap<K, V>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Hash + Eq,
    D: Fn(&K) -> String,
{
    let mut map = IndexMap::new();
    for (key, value) in pairs {
        match map.entry(key) {
            Entry::Occupied(entry) => {
                return Err(Error::duplicate_key(describe(entry.key())));
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }
    Ok(map)
}
