//! mapset: interchangeable key/value containers behind one map contract.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: let callers swap storage strategies without touching call sites,
//!   and compare how each strategy performs on the same workload.
//! - Layers:
//!   - MapSet<K, V>: the contract (put/get/contains_key/len/clear and the
//!     positionally aligned keys/values/entries views).
//!   - BstMap<K, V, C>: unbalanced binary search tree ordered by an injected
//!     comparator. Iteration is pre-order.
//!   - ChainList<K, V, C>: association list, most recent insertion first.
//!   - ChainedHashMap<K, V, B, S>: separate chaining over a slot table whose
//!     buckets are `BstMap`s (`TreeHashMap`) or `ChainList`s
//!     (`ListHashMap`). Doubles capacity once the entry count passes half
//!     the slot count.
//!   - WordCounter<M>: word frequencies over any `MapSet<String, u64>`, with
//!     a plain-text report format.
//!
//! Constraints
//! - Tree nodes and list links live in `SlotMap` arenas and link to each
//!   other by key, so there is no `unsafe` and no recursion on the hot
//!   paths. A degenerate (sorted-input) tree does not overflow the stack.
//! - Reads return borrows; absence is `None`, never an error.
//! - Containers are `Send` when their keys, values, comparator and hasher
//!   are. Mutation from several threads needs an outer lock.
//!
//! Comparator and hasher agreement
//! - Key identity is decided by the comparator (`Ordering::Equal`). In a
//!   hash map the hasher must agree: keys that compare `Equal` must hash
//!   the same. This is not checked; violating it makes reads miss.
//!
//! Reentrancy policy
//! - Every container holds a debug-only `ReentryCheck`. User code (the
//!   comparator, the hasher) runs inside container operations; if it
//!   reaches back into the same container, debug builds panic with both
//!   operation names. Release builds compile the check away.
//!
//! Counters
//! - `ChainedHashMap::len` is the number of distinct keys. `collisions`
//!   counts keys that landed in an already occupied slot, so
//!   `len - collisions == occupied_slots` at all times. Growth rebuilds
//!   the table and recomputes both.
//!
//! Notes and non-goals
//! - No removal of individual keys and no tree balancing.
//! - Iteration order is backend specific and never sorted across buckets.

mod bst_map;
mod chain_list;
mod chained_hash_map;
mod comparator;
mod map_set;
#[cfg(test)]
mod map_set_proptest;
mod pair;
mod reentrancy;
mod word_counter;

// Public surface
pub use bst_map::BstMap;
pub use chain_list::ChainList;
pub use chained_hash_map::{
    Bucket, ChainedHashMap, HashMapBuilder, ListHashMap, TreeHashMap, DEFAULT_INITIAL_CAPACITY,
};
pub use comparator::{Ascending, Comparator, Descending};
pub use map_set::MapSet;
pub use pair::KeyValuePair;
pub use word_counter::{tokenize, Backend, ReportError, WordCounter, REPORT_HEADER};

/// Iterators returned by `BstMap::iter` and `ChainList::iter`.
pub mod iter {
    pub use crate::bst_map::Iter as TreeIter;
    pub use crate::chain_list::Iter as ListIter;
}
