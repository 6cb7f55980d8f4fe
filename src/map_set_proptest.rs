#![cfg(test)]

// Property tests for every MapSet backend, kept inside the crate so the
// hash map checks can use the test hashers.

use crate::bst_map::BstMap;
use crate::chain_list::ChainList;
use crate::chained_hash_map::test_hashers::ConstBuildHasher;
use crate::chained_hash_map::{Bucket, ChainedHashMap, ListHashMap, TreeHashMap};
use crate::comparator::{Ascending, Comparator, Descending};
use crate::map_set::MapSet;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};
use std::hash::BuildHasher;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Get(usize),
    Contains(String),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            3 => idx.clone().prop_map(OpI::Get),
            2 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            1 => Just(OpI::Clear),
            2 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

/// Backend-specific checks run alongside the shared state machine.
trait Audit: MapSet<String, i32> {
    /// Taken just before each put: `(len, capacity)`.
    fn snapshot(&self) -> (usize, usize) {
        (self.len(), 0)
    }

    fn audit(&self, _before_put: Option<(usize, usize)>) -> Result<(), TestCaseError> {
        Ok(())
    }
}

impl<C> Audit for BstMap<String, i32, C>
where
    C: Comparator<String>,
{
    fn audit(&self, _before_put: Option<(usize, usize)>) -> Result<(), TestCaseError> {
        let depth = self.depth();
        prop_assert!(depth <= self.len());
        prop_assert_eq!(depth == 0, self.is_empty());
        Ok(())
    }
}

impl<C> Audit for ChainList<String, i32, C> where C: Comparator<String> {}

impl<B, S> Audit for ChainedHashMap<String, i32, B, S>
where
    B: Bucket<String, i32>,
    S: BuildHasher,
{
    fn snapshot(&self) -> (usize, usize) {
        (self.len(), self.capacity())
    }

    fn audit(&self, before_put: Option<(usize, usize)>) -> Result<(), TestCaseError> {
        prop_assert_eq!(self.len() - self.collisions(), self.occupied_slots());
        prop_assert!(self.capacity() >= self.initial_capacity());
        if let Some((len, capacity)) = before_put {
            let expected = if len > capacity / 2 { capacity * 2 } else { capacity };
            prop_assert_eq!(self.capacity(), expected, "growth rule");
        }
        Ok(())
    }
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `put` returns the previous value exactly when the model had the key.
// - `get`/`contains_key` parity with the model, including never-inserted keys.
// - `keys`/`values`/`entries` line up by position and cover each key once.
// - `clear` empties the map and it stays usable.
// - `len`/`is_empty` parity after each op, plus the backend's own audit.
fn run_state_machine<M>(sut: &mut M, pool: &[String], ops: Vec<OpI>) -> Result<(), TestCaseError>
where
    M: Audit,
{
    let mut model: HashMap<String, i32> = HashMap::new();
    for op in ops {
        let mut before_put = None;
        match op {
            OpI::Put(i, v) => {
                let k = pool[i].clone();
                before_put = Some(sut.snapshot());
                let expected = model.insert(k.clone(), v);
                prop_assert_eq!(sut.put(k, v), expected);
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                prop_assert!(sut.entries().is_empty());
            }
            OpI::Iterate => {
                let keys = sut.keys();
                let values = sut.values();
                let entries = sut.entries();
                prop_assert_eq!(keys.len(), model.len());
                prop_assert_eq!(values.len(), model.len());
                prop_assert_eq!(entries.len(), model.len());
                for (i, pair) in entries.iter().enumerate() {
                    prop_assert_eq!(pair.key(), keys[i]);
                    prop_assert_eq!(pair.value(), values[i]);
                    prop_assert_eq!(model.get(pair.key()), Some(pair.value()));
                }
                let unique: BTreeSet<_> = keys.iter().collect();
                prop_assert_eq!(unique.len(), keys.len());
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        sut.audit(before_put)?;
    }
    Ok(())
}

fn hash_map<B, S>(capacity: usize, hasher: S) -> ChainedHashMap<String, i32, B, S>
where
    B: Bucket<String, i32, Comparator = Ascending>,
    S: BuildHasher,
{
    ChainedHashMap::with_comparator_and_hasher(capacity, Ascending, hasher)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_tree_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: BstMap<String, i32> = BstMap::new();
        run_state_machine(&mut sut, &pool, ops)?;
    }

    #[test]
    fn prop_tree_descending_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: BstMap<String, i32, Descending> = BstMap::with_comparator(Descending);
        run_state_machine(&mut sut, &pool, ops)?;
    }

    #[test]
    fn prop_list_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: ChainList<String, i32> = ChainList::new();
        run_state_machine(&mut sut, &pool, ops)?;
    }

    #[test]
    fn prop_tree_hash_state_machine((pool, ops) in arb_scenario(), capacity in 0usize..8) {
        let mut sut: TreeHashMap<String, i32> = TreeHashMap::new(capacity);
        run_state_machine(&mut sut, &pool, ops)?;
    }

    #[test]
    fn prop_list_hash_state_machine((pool, ops) in arb_scenario(), capacity in 0usize..8) {
        let mut sut: ListHashMap<String, i32> = ListHashMap::new(capacity);
        run_state_machine(&mut sut, &pool, ops)?;
    }
}

// Property: Same state-machine invariants under worst-case collision
// behavior (constant hasher). Every key shares slot 0, so bucket equality
// resolution and the collision counter carry the whole load.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_tree_hash_with_collisions((pool, ops) in arb_scenario(), capacity in 1usize..6) {
        let mut sut: TreeHashMap<String, i32, Ascending, ConstBuildHasher> =
            hash_map(capacity, ConstBuildHasher);
        run_state_machine(&mut sut, &pool, ops)?;
        prop_assert!(sut.occupied_slots() <= 1);
    }

    #[test]
    fn prop_list_hash_with_collisions((pool, ops) in arb_scenario(), capacity in 1usize..6) {
        let mut sut: ListHashMap<String, i32, Ascending, ConstBuildHasher> =
            hash_map(capacity, ConstBuildHasher);
        run_state_machine(&mut sut, &pool, ops)?;
        prop_assert!(sut.occupied_slots() <= 1);
    }
}
