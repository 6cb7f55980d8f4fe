//! ChainedHashMap: separate-chaining hash table whose buckets are themselves
//! maps.
//!
//! Each slot is `Option<B>`: empty, or a bucket of the kind fixed by the `B`
//! type parameter (`BstMap` or `ChainList`). The table tracks two counters:
//! `entries` (every distinct key) and `collisions` (every key that landed in
//! an already occupied slot). `entries - collisions` is therefore always the
//! number of occupied slots.
//!
//! Growth is checked at the start of every `put`: once `entries` exceeds
//! half the slot count the table doubles, then the insert proceeds against
//! the larger table. Rehashing drains each old bucket in slot order (and in
//! the bucket's own traversal order) and places every pair again, so both
//! counters are recomputed from scratch.

use crate::bst_map::BstMap;
use crate::chain_list::ChainList;
use crate::comparator::{Ascending, Comparator};
use crate::map_set::MapSet;
use crate::pair::KeyValuePair;
use crate::reentrancy::ReentryCheck;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;
use hashbrown::hash_map::DefaultHashBuilder;
use log::{debug, trace, warn};

/// Slot count used by `HashMapBuilder` when none is given.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// A map that can serve as one slot of a `ChainedHashMap`.
pub trait Bucket<K, V>: MapSet<K, V> {
    type Comparator: Comparator<K> + Clone;

    /// A new, empty bucket ordering its keys with `comparator`.
    fn empty(comparator: Self::Comparator) -> Self;

    /// Move every pair out in the bucket's traversal order.
    fn drain_pairs(&mut self) -> Vec<KeyValuePair<K, V>>;
}

impl<K, V, C> Bucket<K, V> for BstMap<K, V, C>
where
    C: Comparator<K> + Clone,
{
    type Comparator = C;

    fn empty(comparator: C) -> Self {
        BstMap::with_comparator(comparator)
    }

    fn drain_pairs(&mut self) -> Vec<KeyValuePair<K, V>> {
        self.drain()
    }
}

impl<K, V, C> Bucket<K, V> for ChainList<K, V, C>
where
    C: Comparator<K> + Clone,
{
    type Comparator = C;

    fn empty(comparator: C) -> Self {
        ChainList::with_comparator(comparator)
    }

    fn drain_pairs(&mut self) -> Vec<KeyValuePair<K, V>> {
        self.drain()
    }
}

/// Hash table with ordered-map buckets.
pub type TreeHashMap<K, V, C = Ascending, S = DefaultHashBuilder> =
    ChainedHashMap<K, V, BstMap<K, V, C>, S>;

/// Hash table with linked-list buckets.
pub type ListHashMap<K, V, C = Ascending, S = DefaultHashBuilder> =
    ChainedHashMap<K, V, ChainList<K, V, C>, S>;

#[inline]
fn slot_index<K, S>(hasher: &S, key: &K, capacity: usize) -> usize
where
    K: Hash + ?Sized,
    S: BuildHasher,
{
    (hasher.hash_one(key) % capacity as u64) as usize
}

struct Table<B> {
    slots: Vec<Option<B>>,
    entries: usize,
    collisions: usize,
}

impl<B> Table<B> {
    fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            entries: 0,
            collisions: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Put `key` into slot `index`, updating the counters from what the
    /// bucket reports.
    fn place<K, V>(&mut self, index: usize, key: K, value: V, comparator: &B::Comparator) -> Option<V>
    where
        B: Bucket<K, V>,
    {
        if let Some(bucket) = self.slots[index].as_mut() {
            let previous = bucket.put(key, value);
            if previous.is_none() {
                self.entries += 1;
                self.collisions += 1;
            }
            return previous;
        }
        let mut bucket = B::empty(comparator.clone());
        bucket.put(key, value);
        self.slots[index] = Some(bucket);
        self.entries += 1;
        None
    }

    /// Double the slot count and re-place every pair. The replacement table
    /// is built aside and only swapped in once complete.
    fn grow<K, V, S>(&mut self, hasher: &S, comparator: &B::Comparator)
    where
        K: Hash,
        S: BuildHasher,
        B: Bucket<K, V>,
    {
        let capacity = self.capacity() * 2;
        let mut next = Table::with_capacity(capacity);
        for bucket in self.slots.iter_mut().flatten() {
            for pair in bucket.drain_pairs() {
                let (key, value) = pair.into_parts();
                let index = slot_index(hasher, &key, capacity);
                next.place(index, key, value, comparator);
            }
        }
        *self = next;
    }
}

pub struct ChainedHashMap<K, V, B, S = DefaultHashBuilder>
where
    B: Bucket<K, V>,
{
    table: Table<B>,
    initial_capacity: usize,
    comparator: B::Comparator,
    hasher: S,
    reentry: ReentryCheck,
    _pd: PhantomData<(K, V)>,
}

impl<K, V, B> ChainedHashMap<K, V, B>
where
    K: Hash,
    B: Bucket<K, V>,
{
    /// Empty map with `capacity` slots, the comparator's default value and
    /// the default hasher.
    pub fn new(capacity: usize) -> Self
    where
        B::Comparator: Default,
    {
        Self::with_comparator(capacity, Default::default())
    }

    pub fn with_comparator(capacity: usize, comparator: B::Comparator) -> Self {
        Self::with_comparator_and_hasher(capacity, comparator, DefaultHashBuilder::default())
    }
}

impl<K, V, B, S> ChainedHashMap<K, V, B, S>
where
    K: Hash,
    B: Bucket<K, V>,
    S: BuildHasher,
{
    /// A zero `capacity` is raised to one slot.
    pub fn with_comparator_and_hasher(capacity: usize, comparator: B::Comparator, hasher: S) -> Self {
        if capacity == 0 {
            warn!("hash map configured with 0 slots; using 1");
        }
        let capacity = capacity.max(1);
        Self {
            table: Table::with_capacity(capacity),
            initial_capacity: capacity,
            comparator,
            hasher,
            reentry: ReentryCheck::new(),
            _pd: PhantomData,
        }
    }

    /// Current slot count.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Slot count the map was configured with; `clear` returns to it.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Keys that landed in an already occupied slot. Diagnostic only.
    pub fn collisions(&self) -> usize {
        self.table.collisions
    }

    /// Number of non-empty slots.
    pub fn occupied_slots(&self) -> usize {
        self.table.occupied()
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Slot `key` hashes to under the current capacity.
    pub fn slot_of(&self, key: &K) -> usize {
        slot_index(&self.hasher, key, self.table.capacity())
    }

    /// The bucket at `index`, if that slot is occupied.
    pub fn bucket(&self, index: usize) -> Option<&B> {
        self.table.slots.get(index)?.as_ref()
    }

    fn lookup(&self, key: &K) -> Option<&B> {
        self.table.slots[self.slot_of(key)].as_ref()
    }
}

impl<K, V, B, S> MapSet<K, V> for ChainedHashMap<K, V, B, S>
where
    K: Hash,
    B: Bucket<K, V>,
    S: BuildHasher,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        let _busy = self.reentry.enter("put");
        if self.table.entries > self.table.capacity() / 2 {
            let from = self.table.capacity();
            self.table.grow::<K, V, S>(&self.hasher, &self.comparator);
            debug!(
                "hash map grew from {} to {} slots: {} entries, {} collisions after rehash",
                from,
                self.table.capacity(),
                self.table.entries,
                self.table.collisions
            );
        }
        let index = slot_index(&self.hasher, &key, self.table.capacity());
        let previous = self.table.place(index, key, value, &self.comparator);
        trace!(
            "put into slot {} of {}: {}",
            index,
            self.table.capacity(),
            if previous.is_some() { "overwrite" } else { "new key" }
        );
        previous
    }

    fn get(&self, key: &K) -> Option<&V> {
        let _busy = self.reentry.enter("get");
        self.lookup(key)?.get(key)
    }

    fn contains_key(&self, key: &K) -> bool {
        let _busy = self.reentry.enter("contains_key");
        self.lookup(key).is_some_and(|b| b.contains_key(key))
    }

    fn len(&self) -> usize {
        self.table.entries
    }

    fn clear(&mut self) {
        let _busy = self.reentry.enter("clear");
        debug!(
            "hash map cleared: {} entries dropped, {} slots reset to {}",
            self.table.entries,
            self.table.capacity(),
            self.initial_capacity
        );
        self.table = Table::with_capacity(self.initial_capacity);
    }

    fn entries(&self) -> Vec<&KeyValuePair<K, V>> {
        let _busy = self.reentry.enter("entries");
        let mut out = Vec::with_capacity(self.table.entries);
        for bucket in self.table.slots.iter().flatten() {
            out.extend(bucket.entries());
        }
        out
    }
}

/// One line per slot: `[i] -` when empty, otherwise `[i] ` and the bucket.
impl<K, V, B, S> fmt::Display for ChainedHashMap<K, V, B, S>
where
    B: Bucket<K, V> + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.table.slots.iter().enumerate() {
            match slot {
                Some(bucket) => writeln!(f, "[{}] {}", i, bucket.to_string().trim_end())?,
                None => writeln!(f, "[{}] -", i)?,
            }
        }
        Ok(())
    }
}

/// Configuration for a `ChainedHashMap`: slot count, comparator and hasher.
///
/// ```
/// use mapset::{HashMapBuilder, ListHashMap, MapSet};
///
/// let mut m: ListHashMap<String, u32> = HashMapBuilder::new().capacity(5).build();
/// m.put("w".to_string(), 1);
/// assert_eq!(m.capacity(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct HashMapBuilder<C = Ascending, S = DefaultHashBuilder> {
    capacity: usize,
    comparator: C,
    hasher: S,
}

impl Default for HashMapBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_INITIAL_CAPACITY,
            comparator: Ascending,
            hasher: DefaultHashBuilder::default(),
        }
    }
}

impl HashMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C, S> HashMapBuilder<C, S> {
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn comparator<T>(self, comparator: T) -> HashMapBuilder<T, S> {
        HashMapBuilder {
            capacity: self.capacity,
            comparator,
            hasher: self.hasher,
        }
    }

    pub fn hasher<T: BuildHasher>(self, hasher: T) -> HashMapBuilder<C, T> {
        HashMapBuilder {
            capacity: self.capacity,
            comparator: self.comparator,
            hasher,
        }
    }

    pub fn build<K, V, B>(self) -> ChainedHashMap<K, V, B, S>
    where
        K: Hash,
        B: Bucket<K, V, Comparator = C>,
        S: BuildHasher,
    {
        ChainedHashMap::with_comparator_and_hasher(self.capacity, self.comparator, self.hasher)
    }
}
