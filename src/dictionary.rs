//! The dictionary abstraction implemented by `HashedDictionary`.

use crate::error::DictionaryError;

/// An associative container keyed by `K`.
pub trait Dictionary<K, V> {
    type Keys<'a>: Iterator<Item = &'a K>
    where
        Self: 'a,
        K: 'a;

    /// Associate `value` with `key`, returning the value it replaced.
    fn add(&mut self, key: K, value: V) -> Result<Option<V>, DictionaryError>;

    fn get_value(&self, key: &K) -> Option<&V>;

    /// Fresh enumeration of the stored keys.
    fn key_iter(&self) -> Self::Keys<'_>;
}
