//! Error type shared by the dictionary, its capacity planner and its key
//! enumerator.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("capacity too small: requested {requested}, but {entries} entries are stored")]
    CapacityBelowEntries { requested: usize, entries: usize },
    #[error("hash table too small: {size} slots, minimum is {min}")]
    TableTooSmall { size: usize, min: usize },
    #[error("hash table too large: {size} slots, maximum is {max}")]
    TableTooLarge { size: usize, max: usize },
    #[error("no keys left in the enumeration")]
    Exhausted,
    #[error("{operation} is not supported")]
    Unsupported { operation: &'static str },
}

impl DictionaryError {
    /// True for the errors caused by a bad capacity or table size.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            DictionaryError::CapacityBelowEntries { .. }
                | DictionaryError::TableTooSmall { .. }
                | DictionaryError::TableTooLarge { .. }
        )
    }
}
