//! BstMap: unbalanced binary search tree ordered by an injected comparator.
//!
//! Nodes live in a `SlotMap` arena and link to their children by arena key,
//! so the tree owns every node directly and no traversal recurses. Depth is
//! a function of insertion order alone: sorted input degrades the tree to a
//! chain.

use crate::comparator::{Ascending, Comparator};
use crate::map_set::MapSet;
use crate::pair::KeyValuePair;
use crate::reentrancy::ReentryCheck;
use core::cmp::Ordering;
use core::fmt;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    struct NodeKey;
}

#[derive(Clone, Debug)]
struct Node<K, V> {
    pair: KeyValuePair<K, V>,
    left: Option<NodeKey>,
    right: Option<NodeKey>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Self {
        Self {
            pair: KeyValuePair::new(key, value),
            left: None,
            right: None,
        }
    }
}

#[derive(Clone)]
pub struct BstMap<K, V, C = Ascending> {
    comparator: C,
    root: Option<NodeKey>,
    nodes: SlotMap<NodeKey, Node<K, V>>, // arena; its len is the map's size
    reentry: ReentryCheck,
}

impl<K: Ord, V> BstMap<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(Ascending)
    }
}

impl<K: Ord, V> Default for BstMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order iterator over a `BstMap`: node, left subtree, right subtree.
pub struct Iter<'a, K, V> {
    nodes: &'a SlotMap<NodeKey, Node<K, V>>,
    stack: Vec<NodeKey>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a KeyValuePair<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let at = self.stack.pop()?;
        let node = &self.nodes[at];
        // Right goes under left so the whole left subtree comes out first.
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some(&node.pair)
    }
}

impl<K, V, C> BstMap<K, V, C>
where
    C: Comparator<K>,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            comparator,
            root: None,
            nodes: SlotMap::with_key(),
            reentry: ReentryCheck::new(),
        }
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Walk from the root towards `key`. Returns the matching node, or the
    /// last node visited together with the side a new leaf would hang from.
    fn descend(&self, key: &K) -> Option<Descent> {
        let mut at = self.root?;
        loop {
            let node = &self.nodes[at];
            let next = match self.comparator.compare(key, node.pair.key()) {
                Ordering::Equal => return Some(Descent::Found(at)),
                Ordering::Less => node.left.ok_or(Descent::Left(at)),
                Ordering::Greater => node.right.ok_or(Descent::Right(at)),
            };
            match next {
                Ok(child) => at = child,
                Err(vacant) => return Some(vacant),
            }
        }
    }

    fn find(&self, key: &K) -> Option<&KeyValuePair<K, V>> {
        match self.descend(key)? {
            Descent::Found(at) => Some(&self.nodes[at].pair),
            Descent::Left(_) | Descent::Right(_) => None,
        }
    }

    /// Mutable access to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let _busy = self.reentry.enter("get_mut");
        match self.descend(key)? {
            Descent::Found(at) => Some(self.nodes[at].pair.value_mut()),
            Descent::Left(_) | Descent::Right(_) => None,
        }
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Number of nodes on the longest root-to-leaf path. Empty tree is 0.
    pub fn depth(&self) -> usize {
        let _busy = self.reentry.enter("depth");
        let mut deepest = 0;
        let mut stack: Vec<(NodeKey, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((at, level)) = stack.pop() {
            deepest = deepest.max(level);
            let node = &self.nodes[at];
            stack.extend(node.left.map(|c| (c, level + 1)));
            stack.extend(node.right.map(|c| (c, level + 1)));
        }
        deepest
    }

    /// Move every pair out in pre-order, leaving the tree empty.
    pub fn drain(&mut self) -> Vec<KeyValuePair<K, V>> {
        let _busy = self.reentry.enter("drain");
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeKey> = self.root.take().into_iter().collect();
        while let Some(at) = stack.pop() {
            if let Some(node) = self.nodes.remove(at) {
                stack.extend(node.right);
                stack.extend(node.left);
                out.push(node.pair);
            }
        }
        debug_assert!(self.nodes.is_empty());
        out
    }
}

/// Outcome of a descent: the key's node, or where a new leaf would go.
#[derive(Copy, Clone, Debug)]
enum Descent {
    Found(NodeKey),
    Left(NodeKey),
    Right(NodeKey),
}

impl<K, V, C> MapSet<K, V> for BstMap<K, V, C>
where
    C: Comparator<K>,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        let _busy = self.reentry.enter("put");
        let Some(descent) = self.descend(&key) else {
            let root = self.nodes.insert(Node::leaf(key, value));
            self.root = Some(root);
            return None;
        };
        match descent {
            Descent::Found(at) => Some(self.nodes[at].pair.replace_value(value)),
            Descent::Left(parent) => {
                let leaf = self.nodes.insert(Node::leaf(key, value));
                self.nodes[parent].left = Some(leaf);
                None
            }
            Descent::Right(parent) => {
                let leaf = self.nodes.insert(Node::leaf(key, value));
                self.nodes[parent].right = Some(leaf);
                None
            }
        }
    }

    fn get(&self, key: &K) -> Option<&V> {
        let _busy = self.reentry.enter("get");
        self.find(key).map(KeyValuePair::value)
    }

    fn contains_key(&self, key: &K) -> bool {
        let _busy = self.reentry.enter("contains_key");
        self.find(key).is_some()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn clear(&mut self) {
        let _busy = self.reentry.enter("clear");
        self.root = None;
        self.nodes.clear();
    }

    fn entries(&self) -> Vec<&KeyValuePair<K, V>> {
        let _busy = self.reentry.enter("entries");
        let mut out = Vec::with_capacity(self.nodes.len());
        out.extend(self.iter());
        out
    }
}

impl<'a, K, V, C> IntoIterator for &'a BstMap<K, V, C>
where
    C: Comparator<K>,
{
    type Item = &'a KeyValuePair<K, V>;
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Indented structural dump, one node per line in pre-order:
///
/// ```text
/// root: b: 2
///     left: a: 1
///     right: c: 3
/// ```
impl<K, V, C> fmt::Display for BstMap<K, V, C>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root else {
            return writeln!(f, "root: -");
        };
        let mut stack = vec![(root, 0usize, "root")];
        while let Some((at, level, label)) = stack.pop() {
            let node = &self.nodes[at];
            writeln!(f, "{:indent$}{}: {}", "", label, node.pair, indent = level * 4)?;
            stack.extend(node.right.map(|c| (c, level + 1, "right")));
            stack.extend(node.left.map(|c| (c, level + 1, "left")));
        }
        Ok(())
    }
}
