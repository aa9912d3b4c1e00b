#![cfg(test)]

// Property tests kept inside the crate so they can reach internals
// (notably the tree's invariant checker) without feature gates.

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap as StdHashMap};

use crate::map::HashMap;
use crate::seq::PriorityQueue;
use crate::tree::TreeMap;

// Pool-indexed operations to improve shrinking: indices shrink to
// earlier keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => idx.prop_map(OpI::Get),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: TreeMap state-machine equivalence against std BTreeMap.
// Invariants exercised across random operation sequences:
// - put/remove/get parity with the model, including replacement.
// - In-order iteration equals the model's sorted iteration.
// - ceiling/floor parity with the model's range queries.
// - Red-black balance invariants hold after every operation.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_tree_map_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: TreeMap<String, i32> = TreeMap::new();
        let mut model: BTreeMap<String, i32> = BTreeMap::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = pool[i].clone();
                    prop_assert_eq!(sut.put(k.clone(), v), model.insert(k, v));
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.remove(k), model.remove(k));
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k), model.get(k));
                    let ceiling = sut.ceiling_entry(k).map(|(k, _)| k);
                    prop_assert_eq!(ceiling, model.range(k.clone()..).next().map(|(k, _)| k));
                    let floor = sut.floor_entry(k).map(|(k, _)| k);
                    prop_assert_eq!(floor, model.range(..=k.clone()).next_back().map(|(k, _)| k));
                }
                OpI::Iterate => {
                    let s: Vec<(&String, &i32)> = sut.entries().collect();
                    let m: Vec<(&String, &i32)> = model.iter().collect();
                    prop_assert_eq!(s, m);
                }
            }

            // Post-conditions after each op
            prop_assert_eq!(sut.len(), model.len());
            if let Err(e) = sut.check_invariants() {
                prop_assert!(false, "balance broken: {}", e);
            }
            prop_assert_eq!(sut.first_key(), model.keys().next());
            prop_assert_eq!(sut.last_key(), model.keys().next_back());
        }
    }
}

fn arb_hash_scenario() -> impl Strategy<Value = (Vec<Option<String>>, Vec<OpI>)> {
    // A None in the pool exercises the null key alongside the
    // string-routed keys.
    proptest::collection::vec(prop_oneof![4 => "[a-z]{0,5}".prop_map(Some), 1 => Just(None)], 1..=8)
        .prop_flat_map(|pool| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let op = prop_oneof![
                4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
                3 => idx.clone().prop_map(OpI::Remove),
                2 => idx.prop_map(OpI::Get),
                1 => Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
        })
}

// Property: HashMap state-machine equivalence against std HashMap,
// covering the text route, the null key, and replacement-in-place.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_hash_map_state_machine((pool, ops) in arb_hash_scenario()) {
        let mut sut: HashMap<Option<String>, i32> = HashMap::new();
        let mut model: StdHashMap<Option<String>, i32> = StdHashMap::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = pool[i].clone();
                    prop_assert_eq!(sut.put(k.clone(), v), model.insert(k, v));
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.remove(k), model.remove(k));
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k), model.get(k));
                    prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
                }
                OpI::Iterate => {
                    let s: BTreeSet<Option<String>> = sut.keys().cloned().collect();
                    let m: BTreeSet<Option<String>> = model.keys().cloned().collect();
                    prop_assert_eq!(s, m);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }
    }
}

// Property: draining the priority queue through poll yields the input
// in sorted order, whatever the offer order.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_heap_drains_sorted(mut values in proptest::collection::vec(any::<i32>(), 0..100)) {
        let mut q: PriorityQueue<i32> = values.iter().copied().collect();
        let mut drained = Vec::with_capacity(values.len());
        while let Some(v) = q.poll() {
            drained.push(v);
        }
        values.sort_unstable();
        prop_assert_eq!(drained, values);
    }
}
