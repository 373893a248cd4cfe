#![cfg(test)]

// Property tests for HashedDictionary kept inside the crate so they can
// reach the table internals when needed.

use crate::capacity::{is_prime, MAX_LOAD_FACTOR};
use crate::{CollisionPolicy, DictionaryError, HashedDictionary};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Add(usize, i32),
    Get(usize),
    Absent(String),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Add(i, v)),
            2 => idx.clone().prop_map(OpI::Get),
            // Upper-case keys never appear in the pool.
            1 => "[A-Z]{1,5}".prop_map(OpI::Absent),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn assert_table_shape<V>(d: &HashedDictionary<String, V>) -> Result<(), TestCaseError> {
    prop_assert!(is_prime(d.table_size()), "size {} not prime", d.table_size());
    prop_assert!(d.len() as f64 <= MAX_LOAD_FACTOR * d.table_size() as f64);
    Ok(())
}

// Property: under separate chaining the dictionary behaves like
// std::collections::HashMap.
// - `add` returns the previous value exactly when the model had one.
// - `get_value` agrees with the model for pool keys and misses absent keys.
// - `key_iter` yields each live key once and its key set equals the model's.
// - `len` matches the model; size stays prime and load stays within bound.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_chain_matches_model((pool, ops) in arb_scenario()) {
        let mut sut: HashedDictionary<String, i32> = HashedDictionary::builder()
            .collision_policy(CollisionPolicy::Chain)
            .build()
            .unwrap();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Add(i, v) => {
                    let k = pool[i].clone();
                    let prev = sut.add(k.clone(), v).unwrap();
                    prop_assert_eq!(prev, model.insert(k, v));
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get_value(k.as_str()), model.get(k));
                }
                OpI::Absent(s) => {
                    prop_assert_eq!(sut.get_value(s.as_str()), None);
                }
                OpI::Iterate => {
                    let keys: Vec<&String> = sut.key_iter().collect();
                    let s_keys: BTreeSet<&String> = keys.iter().copied().collect();
                    prop_assert_eq!(s_keys.len(), keys.len(), "duplicate key yielded");
                    let m_keys: BTreeSet<&String> = model.keys().collect();
                    prop_assert_eq!(s_keys, m_keys);
                }
            }
            prop_assert_eq!(sut.len(), model.len());
            assert_table_shape(&sut)?;
        }
    }
}

// Property: with the default head-replacing policy the structural
// invariants still hold even though colliding keys evict each other.
// - A key that is retrievable before `add` is overwritten in place: the old
//   value comes back, `len` is unchanged and the new value is visible.
// - A fresh insertion returns `None` and bumps `len` by one unless growth
//   rebuilt the table.
// - Every enumerated key is distinct and retrievable, and enumeration
//   yields at most `len` keys.
// - Absent keys are never found; collision_count never decreases.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_replace_head_invariants((pool, ops) in arb_scenario()) {
        let mut sut: HashedDictionary<String, i32> = HashedDictionary::new();
        let mut collisions = 0;

        for op in ops {
            match op {
                OpI::Add(i, v) => {
                    let k = pool[i].clone();
                    let before = sut.get_value(k.as_str()).copied();
                    let len = sut.len();
                    let size = sut.table_size();
                    let prev = sut.add(k.clone(), v).unwrap();
                    match before {
                        Some(old) => {
                            prop_assert_eq!(prev, Some(old));
                            prop_assert_eq!(sut.len(), len);
                            prop_assert_eq!(sut.get_value(k.as_str()), Some(&v));
                        }
                        None => {
                            prop_assert_eq!(prev, None);
                            if sut.table_size() == size {
                                prop_assert_eq!(sut.len(), len + 1);
                                prop_assert_eq!(sut.get_value(k.as_str()), Some(&v));
                            } else {
                                prop_assert!(sut.len() <= len + 1);
                            }
                        }
                    }
                }
                OpI::Get(i) => {
                    // A hit means the key heads its slot, so enumeration sees it.
                    if sut.contains_key(pool[i].as_str()) {
                        let keys: Vec<&String> = sut.key_iter().collect();
                        prop_assert!(keys.contains(&&pool[i]));
                    }
                }
                OpI::Absent(s) => {
                    prop_assert_eq!(sut.get_value(s.as_str()), None);
                }
                OpI::Iterate => {
                    let mut it = sut.key_iter();
                    let mut seen = BTreeSet::new();
                    while let Ok(k) = it.try_next() {
                        prop_assert!(seen.insert(k.clone()), "duplicate key yielded");
                        prop_assert!(sut.get_value(k.as_str()).is_some());
                    }
                    prop_assert!(seen.len() <= sut.len());
                    prop_assert_eq!(it.try_next(), Err(DictionaryError::Exhausted));
                }
            }
            prop_assert!(sut.collision_count() >= collisions);
            collisions = sut.collision_count();
            assert_table_shape(&sut)?;
        }
    }
}

// Property: growth under separate chaining keeps every pair, whatever the
// insertion order, and the final size is the first prime reached by
// repeated doubling.
proptest! {
    #[test]
    fn prop_growth_preserves_pairs(keys in proptest::collection::btree_set(any::<u64>(), 1..400)) {
        let mut sut: HashedDictionary<u64, u64> = HashedDictionary::builder()
            .collision_policy(CollisionPolicy::Chain)
            .build()
            .unwrap();
        for &k in &keys {
            prop_assert_eq!(sut.add(k, !k).unwrap(), None);
        }
        prop_assert_eq!(sut.len(), keys.len());
        for &k in &keys {
            prop_assert_eq!(sut.get_value(&k), Some(&!k));
        }

        let mut size = crate::capacity::DEFAULT_CAPACITY;
        while keys.len() as f64 > MAX_LOAD_FACTOR * size as f64 {
            size = crate::capacity::grown_size(size).unwrap();
        }
        prop_assert_eq!(sut.table_size(), size);
    }
}
