//! BucketTable: the slot array, the entry arena and the chain-walk algorithm.
//!
//! Entries live in a `SlotMap` and are linked into chains by arena key. A
//! slot is `Empty`, `Available` (tombstone, never produced by insertion) or
//! the head of a chain. Growth throws away both the slot array and the arena
//! and re-inserts every reachable pair through `insert`.

use crate::capacity::{self, MAX_LOAD_FACTOR};
use crate::error::DictionaryError;
use core::borrow::Borrow;
use core::hash::{BuildHasher, BuildHasherDefault, Hash};
use rustc_hash::FxHasher;
use slotmap::{DefaultKey, SlotMap};

/// What `add` does with a new key whose slot already holds a chain.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollisionPolicy {
    /// The new entry becomes the chain head and the previous chain at that
    /// slot is discarded. Lookups only inspect chain heads, so at most one
    /// of the keys sharing an index is retrievable at a time.
    #[default]
    ReplaceHead,
    /// Separate chaining: the new entry is linked at the chain tail and
    /// lookups walk the chain.
    Chain,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Slot {
    #[default]
    Empty,
    /// Tombstone reserved for deletion; no insertion produces it.
    #[allow(dead_code)]
    Available,
    Occupied(DefaultKey),
}

#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) next: Option<DefaultKey>,
}

/// Outcome of walking one chain looking for a key.
struct ChainScan {
    found: Option<DefaultKey>,
    tail: Option<DefaultKey>,
    steps: u64,
}

#[derive(Debug)]
pub(crate) struct BucketTable<K, V> {
    slots: Vec<Slot>,
    entries: SlotMap<DefaultKey, Entry<K, V>>,
    len: usize,
    collisions: u64,
    policy: CollisionPolicy,
    hasher: BuildHasherDefault<FxHasher>,
}

impl<K, V> BucketTable<K, V>
where
    K: Eq + Hash,
{
    /// Build a table for `capacity` entries, rounded up to a prime size.
    pub(crate) fn new(capacity: usize, policy: CollisionPolicy) -> Result<Self, DictionaryError> {
        let capacity = capacity::check_capacity(capacity, 0)?;
        let size = capacity::next_prime(capacity);
        capacity::check_size(size)?;
        Ok(Self::with_size(size, policy))
    }

    /// `size` must already satisfy `capacity::check_size` and be prime.
    pub(crate) fn with_size(size: usize, policy: CollisionPolicy) -> Self {
        Self {
            slots: vec![Slot::Empty; size],
            entries: SlotMap::with_key(),
            len: 0,
            collisions: 0,
            policy,
            hasher: BuildHasherDefault::default(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn table_size(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn collision_count(&self) -> u64 {
        self.collisions
    }

    pub(crate) fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub(crate) fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub(crate) fn entry(&self, k: DefaultKey) -> &Entry<K, V> {
        &self.entries[k]
    }

    /// Slot a key hashes to under the current table size.
    pub(crate) fn bucket_index<Q>(&self, q: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        let hash = self.hasher.hash_one(q) as i64;
        let size = self.slots.len() as i64;
        let mut index = hash % size;
        if index < 0 {
            index += size;
        }
        index as usize
    }

    fn exceeds_load_factor(&self, len: usize) -> bool {
        len as f64 > MAX_LOAD_FACTOR * self.slots.len() as f64
    }

    fn chain(&self, head: DefaultKey) -> impl Iterator<Item = &Entry<K, V>> + '_ {
        core::iter::successors(Some(&self.entries[head]), move |e| {
            e.next.map(|k| &self.entries[k])
        })
    }

    fn scan(&self, index: usize, key: &K) -> ChainScan {
        let mut steps = 0;
        let mut tail = None;
        let mut link = match self.slots[index] {
            Slot::Empty => None,
            // A tombstone never matches; stepping over it counts once.
            Slot::Available => {
                steps += 1;
                None
            }
            Slot::Occupied(head) => Some(head),
        };
        while let Some(k) = link {
            let entry = &self.entries[k];
            if entry.key == *key {
                return ChainScan {
                    found: Some(k),
                    tail,
                    steps,
                };
            }
            tail = Some(k);
            link = entry.next;
            steps += 1;
        }
        ChainScan {
            found: None,
            tail,
            steps,
        }
    }

    /// Insert or overwrite. Returns the displaced value on overwrite.
    ///
    /// Fails only when the insertion would need a table larger than
    /// `capacity::MAX_SIZE`; in that case nothing is modified.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Result<Option<V>, DictionaryError> {
        let index = self.bucket_index(&key);
        let scan = self.scan(index, &key);

        if let Some(k) = scan.found {
            self.collisions += scan.steps;
            let old = core::mem::replace(&mut self.entries[k].value, value);
            return Ok(Some(old));
        }

        let grow_to = if self.exceeds_load_factor(self.len + 1) {
            Some(capacity::grown_size(self.slots.len())?)
        } else {
            None
        };

        self.collisions += scan.steps;
        self.link_new(index, scan.tail, key, value);
        self.len += 1;

        if let Some(size) = grow_to {
            self.grow(size)?;
        }
        Ok(None)
    }

    fn link_new(&mut self, index: usize, tail: Option<DefaultKey>, key: K, value: V) {
        let k = self.entries.insert(Entry {
            key,
            value,
            next: None,
        });
        match (self.policy, tail) {
            (CollisionPolicy::Chain, Some(t)) => self.entries[t].next = Some(k),
            _ => {
                let previous = core::mem::replace(&mut self.slots[index], Slot::Occupied(k));
                if let Slot::Occupied(head) = previous {
                    let dropped = self.discard_chain(head);
                    log::trace!("slot {index}: chain head replaced, {dropped} entries discarded");
                }
            }
        }
    }

    /// Free every entry of the chain starting at `head`.
    fn discard_chain(&mut self, head: DefaultKey) -> usize {
        let mut dropped = 0;
        let mut link = Some(head);
        while let Some(k) = link {
            link = self.entries.remove(k).and_then(|e| e.next);
            dropped += 1;
        }
        dropped
    }

    fn grow(&mut self, new_size: usize) -> Result<(), DictionaryError> {
        let old_size = self.slots.len();
        let old_slots = core::mem::replace(&mut self.slots, vec![Slot::Empty; new_size]);
        let mut old_entries =
            core::mem::replace(&mut self.entries, SlotMap::with_capacity_and_key(self.len));
        self.len = 0;

        // Under ReplaceHead every chain is a lone head.
        for slot in old_slots {
            let Slot::Occupied(head) = slot else {
                continue;
            };
            let mut link = Some(head);
            while let Some(k) = link {
                let Some(entry) = old_entries.remove(k) else {
                    break;
                };
                link = entry.next;
                self.insert(entry.key, entry.value)?;
            }
        }

        log::debug!(
            "grew table from {old_size} to {new_size} slots, {} entries carried over",
            self.len
        );
        Ok(())
    }

    pub(crate) fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(q);
        let Slot::Occupied(head) = self.slots[index] else {
            return None;
        };
        match self.policy {
            CollisionPolicy::ReplaceHead => {
                let entry = &self.entries[head];
                (entry.key.borrow() == q).then_some(&entry.value)
            }
            CollisionPolicy::Chain => self
                .chain(head)
                .find(|e| e.key.borrow() == q)
                .map(|e| &e.value),
        }
    }

    /// Turn a slot into a tombstone, freeing whatever chain it held.
    #[cfg(test)]
    pub(crate) fn mark_available(&mut self, index: usize) {
        if let Slot::Occupied(head) = core::mem::replace(&mut self.slots[index], Slot::Available) {
            let dropped = self.discard_chain(head);
            self.len -= dropped;
        }
    }
}
