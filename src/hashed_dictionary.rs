//! HashedDictionary: public API over `BucketTable`, plus its builder.

use crate::bucket_table::{BucketTable, CollisionPolicy};
use crate::capacity::DEFAULT_CAPACITY;
use crate::dictionary::Dictionary;
use crate::error::DictionaryError;
use crate::key_iter::KeyIter;
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use core::marker::PhantomData;

/// A dictionary over a prime-sized, chained hash table that doubles (to the
/// next prime) once more than half of its slots would be used.
///
/// Keys are hashed with `FxHasher`, so slot placement is deterministic
/// across runs.
pub struct HashedDictionary<K, V> {
    table: BucketTable<K, V>,
}

/// Options for constructing a `HashedDictionary<K, V>`.
pub struct DictionaryBuilder<K, V> {
    initial_capacity: usize,
    collision_policy: CollisionPolicy,
    _pd: PhantomData<fn() -> (K, V)>,
}

impl<K, V> Default for DictionaryBuilder<K, V> {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            collision_policy: CollisionPolicy::default(),
            _pd: PhantomData,
        }
    }
}

impl<K, V> Clone for DictionaryBuilder<K, V> {
    fn clone(&self) -> Self {
        Self {
            initial_capacity: self.initial_capacity,
            collision_policy: self.collision_policy,
            _pd: PhantomData,
        }
    }
}

impl<K, V> fmt::Debug for DictionaryBuilder<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryBuilder")
            .field("initial_capacity", &self.initial_capacity)
            .field("collision_policy", &self.collision_policy)
            .finish()
    }
}

impl<K, V> DictionaryBuilder<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested capacity; raised to `DEFAULT_CAPACITY` and then to the next
    /// prime when building.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    pub fn build(self) -> Result<HashedDictionary<K, V>, DictionaryError> {
        let table = BucketTable::new(self.initial_capacity, self.collision_policy)?;
        Ok(HashedDictionary::from_table(table))
    }
}

impl<K, V> HashedDictionary<K, V>
where
    K: Eq + Hash,
{
    /// Empty dictionary with `DEFAULT_CAPACITY` slots.
    pub fn new() -> Self {
        Self::from_table(BucketTable::with_size(
            DEFAULT_CAPACITY,
            CollisionPolicy::default(),
        ))
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, DictionaryError> {
        Self::builder().initial_capacity(capacity).build()
    }

    pub fn builder() -> DictionaryBuilder<K, V> {
        DictionaryBuilder::new()
    }

    fn from_table(table: BucketTable<K, V>) -> Self {
        log::debug!(
            "created dictionary with {} slots ({:?})",
            table.table_size(),
            table.policy()
        );
        Self { table }
    }

    /// Insert `key`, or overwrite its value if it is already stored.
    ///
    /// Returns the previous value on overwrite and `None` on a fresh
    /// insertion. Fails with `DictionaryError::TableTooLarge`, leaving the
    /// dictionary untouched, when the insertion would grow the table past
    /// `capacity::MAX_SIZE`.
    pub fn add(&mut self, key: K, value: V) -> Result<Option<V>, DictionaryError> {
        self.table.insert(key, value)
    }

    pub fn get_value<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get(key).is_some()
    }

    pub fn key_iter(&self) -> KeyIter<'_, K, V> {
        KeyIter::new(&self.table)
    }

    /// Number of insertions of new keys since the last growth rebuilt the
    /// table. Under `CollisionPolicy::ReplaceHead` this can exceed the
    /// number of retrievable keys.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Number of slots; always prime.
    pub fn table_size(&self) -> usize {
        self.table.table_size()
    }

    pub fn load_factor(&self) -> f64 {
        self.table.len() as f64 / self.table.table_size() as f64
    }

    /// Chain links walked by all insertions so far, growth included.
    pub fn collision_count(&self) -> u64 {
        self.table.collision_count()
    }

    pub fn collision_policy(&self) -> CollisionPolicy {
        self.table.policy()
    }

    /// Slot `key` hashes to under the current table size.
    pub fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        self.table.bucket_index(key)
    }
}

impl<K, V> Default for HashedDictionary<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for HashedDictionary<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.key_iter()
                    .filter_map(|k| self.get_value(k).map(|v| (k, v))),
            )
            .finish()
    }
}

impl<K, V> Dictionary<K, V> for HashedDictionary<K, V>
where
    K: Eq + Hash,
{
    type Keys<'a>
        = KeyIter<'a, K, V>
    where
        Self: 'a,
        K: 'a;

    fn add(&mut self, key: K, value: V) -> Result<Option<V>, DictionaryError> {
        HashedDictionary::add(self, key, value)
    }

    fn get_value(&self, key: &K) -> Option<&V> {
        HashedDictionary::get_value(self, key)
    }

    fn key_iter(&self) -> Self::Keys<'_> {
        HashedDictionary::key_iter(self)
    }
}
