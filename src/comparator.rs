//! Three-way key ordering injected into tree and list backends.
//!
//! Every backend treats two keys as the same key exactly when the comparator
//! returns `Ordering::Equal`. When a comparator is used inside a hashed map
//! it must agree with `K: Hash`: keys that compare equal must hash equally.
//! This is not checked at runtime.

use core::cmp::Ordering;

pub trait Comparator<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// Natural ascending order for `K: Ord`. For strings this is byte-wise
/// lexicographic order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Ascending;

impl<K: ?Sized + Ord> Comparator<K> for Ascending {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Reverse of `Ascending`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Descending;

impl<K: ?Sized + Ord> Comparator<K> for Descending {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}
