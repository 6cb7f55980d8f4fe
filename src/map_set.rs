//! MapSet: the contract every backend implements.

use crate::pair::KeyValuePair;

/// Key/value mapping shared by `BstMap`, `ChainList` and `ChainedHashMap`.
///
/// `keys`, `values` and `entries` come from one traversal, so position `i`
/// of each refers to the same entry. The traversal order is backend
/// specific and is not sorted in general.
///
/// Missing keys and empty maps are normal outcomes: reads return `None` or
/// an empty `Vec`, never an error.
pub trait MapSet<K, V> {
    /// Insert or update. Returns the previous value when `key` was already
    /// present; `None` means a new key was added.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    fn get(&self, key: &K) -> Option<&V>;

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Number of distinct keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    fn entries(&self) -> Vec<&KeyValuePair<K, V>>;

    fn keys<'a>(&'a self) -> Vec<&'a K>
    where
        V: 'a,
    {
        self.entries().into_iter().map(KeyValuePair::key).collect()
    }

    fn values<'a>(&'a self) -> Vec<&'a V>
    where
        K: 'a,
    {
        self.entries().into_iter().map(KeyValuePair::value).collect()
    }
}

impl<K, V, M> MapSet<K, V> for Box<M>
where
    M: MapSet<K, V> + ?Sized,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        (**self).put(key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        (**self).get(key)
    }

    fn contains_key(&self, key: &K) -> bool {
        (**self).contains_key(key)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn entries(&self) -> Vec<&KeyValuePair<K, V>> {
        (**self).entries()
    }

    fn keys<'a>(&'a self) -> Vec<&'a K>
    where
        V: 'a,
    {
        (**self).keys()
    }

    fn values<'a>(&'a self) -> Vec<&'a V>
    where
        K: 'a,
    {
        (**self).values()
    }
}
