//! ChainList: singly linked association list, most recent insertion first.
//!
//! Links live in a `SlotMap` arena. Keys are matched with the injected
//! comparator (`Equal` means same key), so any key type works. A re-put
//! unlinks the old pair and pushes a fresh one at the head, which moves the
//! key to the front of the iteration order.

use crate::comparator::{Ascending, Comparator};
use crate::map_set::MapSet;
use crate::pair::KeyValuePair;
use crate::reentrancy::ReentryCheck;
use core::cmp::Ordering;
use core::fmt;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    struct LinkKey;
}

#[derive(Clone, Debug)]
struct Link<K, V> {
    pair: KeyValuePair<K, V>,
    next: Option<LinkKey>,
}

#[derive(Clone)]
pub struct ChainList<K, V, C = Ascending> {
    comparator: C,
    head: Option<LinkKey>,
    links: SlotMap<LinkKey, Link<K, V>>,
    reentry: ReentryCheck,
}

impl<K: Ord, V> ChainList<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(Ascending)
    }
}

impl<K: Ord, V> Default for ChainList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Head-to-tail iterator over a `ChainList`.
pub struct Iter<'a, K, V> {
    links: &'a SlotMap<LinkKey, Link<K, V>>,
    at: Option<LinkKey>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a KeyValuePair<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let link = &self.links[self.at?];
        self.at = link.next;
        Some(&link.pair)
    }
}

impl<K, V, C> ChainList<K, V, C>
where
    C: Comparator<K>,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            comparator,
            head: None,
            links: SlotMap::with_key(),
            reentry: ReentryCheck::new(),
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            links: &self.links,
            at: self.head,
        }
    }

    /// Locate `key`, returning its link and the link before it (if any).
    fn scan(&self, key: &K) -> Option<(Option<LinkKey>, LinkKey)> {
        let mut prev = None;
        let mut at = self.head;
        while let Some(cur) = at {
            let link = &self.links[cur];
            if self.comparator.compare(key, link.pair.key()) == Ordering::Equal {
                return Some((prev, cur));
            }
            prev = Some(cur);
            at = link.next;
        }
        None
    }

    /// Move every pair out head-to-tail, leaving the list empty.
    pub fn drain(&mut self) -> Vec<KeyValuePair<K, V>> {
        let _busy = self.reentry.enter("drain");
        let mut out = Vec::with_capacity(self.links.len());
        let mut at = self.head.take();
        while let Some(cur) = at {
            let Some(link) = self.links.remove(cur) else {
                break;
            };
            at = link.next;
            out.push(link.pair);
        }
        debug_assert!(self.links.is_empty());
        out
    }
}

impl<K, V, C> MapSet<K, V> for ChainList<K, V, C>
where
    C: Comparator<K>,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        let _busy = self.reentry.enter("put");
        let mut previous = None;
        if let Some((prev, at)) = self.scan(&key) {
            if let Some(old) = self.links.remove(at) {
                match prev {
                    Some(p) => self.links[p].next = old.next,
                    None => self.head = old.next,
                }
                previous = Some(old.pair.into_parts().1);
            }
        }
        let next = self.head;
        let pair = KeyValuePair::new(key, value);
        self.head = Some(self.links.insert(Link { pair, next }));
        previous
    }

    fn get(&self, key: &K) -> Option<&V> {
        let _busy = self.reentry.enter("get");
        let (_, at) = self.scan(key)?;
        Some(self.links[at].pair.value())
    }

    fn contains_key(&self, key: &K) -> bool {
        let _busy = self.reentry.enter("contains_key");
        self.scan(key).is_some()
    }

    fn len(&self) -> usize {
        self.links.len()
    }

    fn clear(&mut self) {
        let _busy = self.reentry.enter("clear");
        self.head = None;
        self.links.clear();
    }

    fn entries(&self) -> Vec<&KeyValuePair<K, V>> {
        let _busy = self.reentry.enter("entries");
        let mut out = Vec::with_capacity(self.links.len());
        out.extend(self.iter());
        out
    }
}

impl<'a, K, V, C> IntoIterator for &'a ChainList<K, V, C>
where
    C: Comparator<K>,
{
    type Item = &'a KeyValuePair<K, V>;
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders `a: 1 -> b: 2`, head first.
impl<K, V, C> fmt::Display for ChainList<K, V, C>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut at = self.head;
        let mut first = true;
        while let Some(cur) = at {
            let link = &self.links[cur];
            if !first {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", link.pair)?;
            first = false;
            at = link.next;
        }
        Ok(())
    }
}
