//! KeyValuePair: the entry type shared by every backend.

use core::fmt;

/// An owned key with a replaceable value. The key never changes after
/// construction; the value slot is overwritten in place on re-put.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyValuePair<K, V> {
    key: K,
    value: V,
}

impl<K, V> KeyValuePair<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Overwrite the value, returning the one it replaced.
    pub fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for KeyValuePair<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: replacing the value hands back the previous one and leaves
    /// the key untouched.
    #[test]
    fn replace_value_returns_previous() {
        let mut p = KeyValuePair::new("w".to_string(), 2);
        assert_eq!(p.replace_value(3), 2);
        assert_eq!(p.key(), "w");
        assert_eq!(*p.value(), 3);

        *p.value_mut() += 1;
        assert_eq!(p.into_parts(), ("w".to_string(), 4));
    }

    #[test]
    fn display_renders_key_colon_value() {
        let p = KeyValuePair::new("cool", 6);
        assert_eq!(p.to_string(), "cool: 6");
    }
}
