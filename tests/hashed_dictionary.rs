// HashedDictionary integration test suite.
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Retrieval: a key that does not share a slot with a newer key is found.
// - Overwrite: re-adding a key returns the old value and keeps `len`.
// - Sizing: table sizes are prime, growth goes to next_prime(2 * size).
// - Load: `len <= 0.5 * table_size` after every insertion.
// - Head replacement: under the default policy a new key evicts the chain
//   at its slot; under `CollisionPolicy::Chain` nothing is evicted.
use hashed_dictionary::capacity::{is_prime, MAX_SIZE};
use hashed_dictionary::{CollisionPolicy, Dictionary, DictionaryError, HashedDictionary};
use std::collections::BTreeSet;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn candidates() -> impl Iterator<Item = String> {
    let letters = (b'a'..=b'z').map(|c| (c as char).to_string());
    let pairs = (b'a'..=b'z')
        .flat_map(|a| (b'a'..=b'z').map(move |b| format!("{}{}", a as char, b as char)));
    letters.chain(pairs)
}

/// First `n` candidate keys such that, for each `(size, prefix)` limit, the
/// first `prefix` picked keys land in distinct slots of a `size`-slot table.
fn spread_keys(n: usize, limits: &[(usize, usize)]) -> Vec<String> {
    let layouts: Vec<(HashedDictionary<String, ()>, usize)> = limits
        .iter()
        .map(|&(size, prefix)| {
            let d: HashedDictionary<String, ()> = HashedDictionary::with_capacity(size).unwrap();
            assert_eq!(d.table_size(), size, "layout sizes must be prime");
            (d, prefix)
        })
        .collect();
    let mut picked: Vec<String> = Vec::new();
    for candidate in candidates() {
        if picked.len() == n {
            break;
        }
        let clash = layouts.iter().any(|(d, prefix)| {
            picked.len() < *prefix
                && picked
                    .iter()
                    .any(|p| d.bucket_index(p) == d.bucket_index(&candidate))
        });
        if !clash {
            picked.push(candidate);
        }
    }
    assert_eq!(picked.len(), n, "not enough spread keys");
    picked
}

/// Two distinct keys sharing a slot in a table of `size`.
fn colliding_pair(size: usize) -> (String, String) {
    let layout: HashedDictionary<String, ()> = HashedDictionary::with_capacity(size).unwrap();
    let keys: Vec<String> = candidates().collect();
    for (i, a) in keys.iter().enumerate() {
        if let Some(b) = keys[..i]
            .iter()
            .find(|b| layout.bucket_index(*b) == layout.bucket_index(a))
        {
            return (b.clone(), a.clone());
        }
    }
    panic!("no colliding pair for size {size}");
}

// Test: the two-key scenario followed by growth.
// Assumes: the first three keys use distinct slots at size 5 and all six
// use distinct slots at sizes 11 and 23.
// Verifies: the third insertion grows 5 -> 11, the sixth 11 -> 23, and all
// six keys stay retrievable with their values.
#[test]
fn growth_scenario_from_capacity_five() {
    init_logging();
    let keys = spread_keys(6, &[(5, 3), (11, 6), (23, 6)]);
    let mut d: HashedDictionary<String, i32> = HashedDictionary::with_capacity(5).unwrap();
    assert_eq!(d.table_size(), 5);

    assert_eq!(d.add(keys[0].clone(), 1).unwrap(), None);
    assert_eq!(d.add(keys[1].clone(), 2).unwrap(), None);
    assert_eq!(d.get_value(keys[0].as_str()), Some(&1));
    assert_eq!(d.get_value(keys[1].as_str()), Some(&2));
    assert_eq!(d.len(), 2);
    assert_eq!(d.table_size(), 5);

    d.add(keys[2].clone(), 3).unwrap();
    assert_eq!(d.table_size(), 11);
    d.add(keys[3].clone(), 4).unwrap();
    d.add(keys[4].clone(), 5).unwrap();
    assert_eq!(d.table_size(), 11);
    d.add(keys[5].clone(), 6).unwrap();
    assert_eq!(d.table_size(), 23);

    assert_eq!(d.len(), 6);
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(d.get_value(k.as_str()), Some(&(i as i32 + 1)), "key {k}");
    }
}

// Test: overwrite of an existing key.
// Verifies: `add` returns the old value, lookup sees the new one, len is unchanged.
#[test]
fn overwrite_returns_previous_value() {
    let mut d = HashedDictionary::new();
    assert_eq!(d.add("x".to_string(), 1).unwrap(), None);
    assert_eq!(d.len(), 1);
    assert_eq!(d.add("x".to_string(), 2).unwrap(), Some(1));
    assert_eq!(d.get_value("x"), Some(&2));
    assert_eq!(d.len(), 1);
}

// Test: lookups of keys never inserted.
// Verifies: absence is reported as None, including for keys that share a
// slot with a stored key.
#[test]
fn missing_keys_are_absent() {
    let (a, b) = colliding_pair(5);
    let mut d: HashedDictionary<String, i32> = HashedDictionary::new();
    assert_eq!(d.get_value("never"), None);
    d.add(a.clone(), 1).unwrap();
    assert_eq!(d.get_value(b.as_str()), None);
    assert!(!d.contains_key(b.as_str()));
}

// Test: default head-replacing insertion.
// Assumes: `a` and `b` share a slot in a 5-slot table.
// Verifies: adding `b` makes `a` unreachable, still counts as an insertion,
// and costs one collision step.
#[test]
fn colliding_key_replaces_chain_head() {
    init_logging();
    let (a, b) = colliding_pair(5);
    let mut d = HashedDictionary::new();
    d.add(a.clone(), 1).unwrap();
    assert_eq!(d.add(b.clone(), 2).unwrap(), None);

    assert_eq!(d.get_value(a.as_str()), None);
    assert_eq!(d.get_value(b.as_str()), Some(&2));
    assert_eq!(d.len(), 2);
    assert_eq!(d.collision_count(), 1);

    // Re-adding the evicted key is a fresh insertion again.
    assert_eq!(d.add(a.clone(), 3).unwrap(), None);
    assert_eq!(d.get_value(a.as_str()), Some(&3));
}

// Test: growth under the default policy re-inserts through head replacement.
// Assumes: `a` and `b` use distinct slots at size 5 but share one at size
// 11; `c` uses its own slot at both sizes.
// Verifies: both `a` and `b` are retrievable before growth; after the third
// insertion grows the table to 11, only the one re-inserted last (the higher
// old slot) survives, and `len` counts all three re-insertions.
#[test]
fn growth_replays_head_replacement() {
    init_logging();
    let small: HashedDictionary<String, ()> = HashedDictionary::with_capacity(5).unwrap();
    let large: HashedDictionary<String, ()> = HashedDictionary::with_capacity(11).unwrap();
    let keys: Vec<String> = candidates().collect();
    let (a, b) = keys
        .iter()
        .enumerate()
        .find_map(|(i, a)| {
            keys[..i]
                .iter()
                .find(|b| {
                    small.bucket_index(*b) != small.bucket_index(a)
                        && large.bucket_index(*b) == large.bucket_index(a)
                })
                .map(|b| (b.clone(), a.clone()))
        })
        .expect("pair distinct at 5 and colliding at 11");
    let c = keys
        .iter()
        .find(|c| {
            [&a, &b].iter().all(|k| {
                small.bucket_index(*k) != small.bucket_index(*c)
                    && large.bucket_index(*k) != large.bucket_index(*c)
            })
        })
        .expect("key clear of both at 5 and 11")
        .clone();

    let mut d: HashedDictionary<String, i32> = HashedDictionary::new();
    d.add(b.clone(), 1).unwrap();
    d.add(a.clone(), 2).unwrap();
    assert_eq!(d.get_value(a.as_str()), Some(&2));
    assert_eq!(d.get_value(b.as_str()), Some(&1));
    assert_eq!(d.table_size(), 5);

    let (survivor, lost) = if small.bucket_index(&a) > small.bucket_index(&b) {
        (&a, &b)
    } else {
        (&b, &a)
    };
    let survivor_value = *d.get_value(survivor.as_str()).unwrap();

    d.add(c.clone(), 3).unwrap();
    assert_eq!(d.table_size(), 11);
    assert_eq!(d.len(), 3);
    assert_eq!(d.get_value(lost.as_str()), None);
    assert_eq!(d.get_value(survivor.as_str()), Some(&survivor_value));
    assert_eq!(d.get_value(c.as_str()), Some(&3));

    // Two reachable keys, but the enumerator expects three.
    let mut it = d.key_iter();
    let mut seen = BTreeSet::new();
    while let Ok(k) = it.try_next() {
        seen.insert(k.clone());
    }
    assert_eq!(seen, [survivor.clone(), c.clone()].into_iter().collect());
}

// Test: separate chaining keeps colliding keys.
#[test]
fn chain_policy_keeps_colliding_keys() {
    let (a, b) = colliding_pair(5);
    let mut d = HashedDictionary::builder()
        .collision_policy(CollisionPolicy::Chain)
        .build()
        .unwrap();
    d.add(a.clone(), 1).unwrap();
    d.add(b.clone(), 2).unwrap();
    assert_eq!(d.get_value(a.as_str()), Some(&1));
    assert_eq!(d.get_value(b.as_str()), Some(&2));
    assert_eq!(d.collision_count(), 1);

    let keys: BTreeSet<&String> = d.key_iter().collect();
    assert_eq!(keys, [&a, &b].into_iter().collect());
}

// Test: structural invariants over many insertions.
// Verifies: size is prime and load factor stays within 0.5 after each add.
#[test]
fn size_prime_and_load_bounded() {
    for policy in [CollisionPolicy::ReplaceHead, CollisionPolicy::Chain] {
        let mut d = HashedDictionary::builder()
            .collision_policy(policy)
            .build()
            .unwrap();
        for i in 0..1_000u32 {
            d.add(i, i).unwrap();
            assert!(is_prime(d.table_size()));
            assert!(d.load_factor() <= 0.5, "{policy:?} at {i}");
        }
    }
}

// Test: enumeration after distinct, non-colliding insertions.
// Verifies: each key is yielded exactly once and then the enumerator is exhausted.
#[test]
fn key_iter_yields_each_key_once() {
    let keys = spread_keys(5, &[(11, 5)]);
    let mut d = HashedDictionary::with_capacity(11).unwrap();
    for (i, k) in keys.iter().enumerate() {
        d.add(k.clone(), i).unwrap();
    }
    assert_eq!(d.table_size(), 11);

    let mut it = d.key_iter();
    let mut seen = Vec::new();
    while it.has_next() {
        seen.push(it.try_next().unwrap().clone());
    }
    assert_eq!(it.try_next(), Err(DictionaryError::Exhausted));
    assert_eq!(it.next(), None);

    seen.sort();
    let mut expected = keys.clone();
    expected.sort();
    assert_eq!(seen, expected);
}

// Test: enumerators are fresh per call and refuse removal.
#[test]
fn key_iter_is_fresh_and_read_only() {
    let mut d = HashedDictionary::new();
    d.add(7u64, "seven").unwrap();
    let mut first = d.key_iter();
    assert_eq!(first.next(), Some(&7));
    assert_eq!(first.next(), None);
    assert_eq!(
        first.remove(),
        Err(DictionaryError::Unsupported { operation: "remove" })
    );

    let again: Vec<_> = d.key_iter().collect();
    assert_eq!(again, vec![&7]);
}

// Test: the dictionary through its trait.
#[test]
fn usable_through_dictionary_trait() {
    fn fill<D: Dictionary<u64, u64>>(d: &mut D) -> Result<(), DictionaryError> {
        for k in 0..10 {
            d.add(k, k * k)?;
        }
        Ok(())
    }

    let mut d: HashedDictionary<u64, u64> = HashedDictionary::builder()
        .collision_policy(CollisionPolicy::Chain)
        .build()
        .unwrap();
    fill(&mut d).unwrap();
    assert_eq!(Dictionary::get_value(&d, &9), Some(&81));
    assert_eq!(Dictionary::key_iter(&d).count(), 10);
}

// Test: constructor validation.
// Verifies: capacities are raised to the default and rounded to primes;
// oversized requests fail with an invalid-argument error.
#[test]
fn capacity_validation() {
    let d: HashedDictionary<u8, u8> = HashedDictionary::with_capacity(0).unwrap();
    assert_eq!(d.table_size(), 5);
    let d: HashedDictionary<u8, u8> = HashedDictionary::with_capacity(100).unwrap();
    assert_eq!(d.table_size(), 101);
    let d: HashedDictionary<u8, u8> = HashedDictionary::with_capacity(19_997).unwrap();
    assert_eq!(d.table_size(), 19_997);

    // The first prime past 19_997 is beyond MAX_SIZE.
    let err = HashedDictionary::<u8, u8>::with_capacity(19_998).unwrap_err();
    assert!(err.is_invalid_argument());
    let err = HashedDictionary::<u8, u8>::with_capacity(MAX_SIZE + 1).unwrap_err();
    assert_eq!(
        err,
        DictionaryError::TableTooLarge {
            size: MAX_SIZE + 1,
            max: MAX_SIZE
        }
    );
}

// Test: growth refuses to pass MAX_SIZE.
// Verifies: the failing add leaves the dictionary unchanged and usable.
#[test]
fn add_fails_cleanly_at_max_size() {
    let mut d = HashedDictionary::builder()
        .initial_capacity(10_007)
        .collision_policy(CollisionPolicy::Chain)
        .build()
        .unwrap();
    for k in 0..5_003u32 {
        d.add(k, k).unwrap();
    }
    let err = d.add(u32::MAX, 0).unwrap_err();
    assert!(matches!(err, DictionaryError::TableTooLarge { .. }));
    assert_eq!(d.len(), 5_003);
    assert_eq!(d.get_value(&u32::MAX), None);
    assert_eq!(d.add(0, 1).unwrap(), Some(0));
}
