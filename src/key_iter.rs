//! KeyIter: forward-only enumeration of the keys reachable from the slots.

use crate::bucket_table::{BucketTable, Slot};
use crate::error::DictionaryError;
use core::hash::Hash;
use core::iter::FusedIterator;
use slotmap::DefaultKey;

/// Lazy, one-shot sequence over the keys stored in a `HashedDictionary`.
///
/// The expected count is captured from the dictionary's length when the
/// enumerator is created. Slots are visited in index order; under
/// `CollisionPolicy::Chain` every key of a chain is yielded before moving
/// on, under `CollisionPolicy::ReplaceHead` each occupied slot yields its
/// head key.
pub struct KeyIter<'a, K, V> {
    table: &'a BucketTable<K, V>,
    cursor: usize,
    link: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, K, V> KeyIter<'a, K, V>
where
    K: Eq + Hash,
{
    pub(crate) fn new(table: &'a BucketTable<K, V>) -> Self {
        Self {
            table,
            cursor: 0,
            link: None,
            remaining: table.len(),
        }
    }

    pub fn has_next(&self) -> bool {
        self.remaining > 0
    }

    /// Next key, or `DictionaryError::Exhausted` once the count captured at
    /// creation is used up or the slots run out.
    pub fn try_next(&mut self) -> Result<&'a K, DictionaryError> {
        if !self.has_next() {
            return Err(DictionaryError::Exhausted);
        }
        let table = self.table;
        let Some(k) = self.link.take().or_else(|| self.next_head()) else {
            // Replaced heads leave `len` above the number of reachable keys.
            self.remaining = 0;
            return Err(DictionaryError::Exhausted);
        };
        let entry = table.entry(k);
        self.link = entry.next;
        self.remaining -= 1;
        Ok(&entry.key)
    }

    /// Removing through the enumerator is not supported.
    pub fn remove(&mut self) -> Result<(), DictionaryError> {
        Err(DictionaryError::Unsupported { operation: "remove" })
    }

    fn next_head(&mut self) -> Option<DefaultKey> {
        let slots = self.table.slots();
        while let Some(slot) = slots.get(self.cursor) {
            self.cursor += 1;
            if let Slot::Occupied(head) = *slot {
                return Some(head);
            }
        }
        None
    }
}

impl<'a, K, V> Iterator for KeyIter<'a, K, V>
where
    K: Eq + Hash,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl<K, V> FusedIterator for KeyIter<'_, K, V> where K: Eq + Hash {}
