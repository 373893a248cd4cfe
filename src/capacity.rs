//! Capacity planning: size constants, capacity validation and prime search.
//!
//! Every function here is pure. Table sizes are always prime and kept within
//! `[MIN_SIZE, MAX_SIZE]`.

use crate::error::DictionaryError;

/// Capacity used by `HashedDictionary::new` and the floor for requested capacities.
pub const DEFAULT_CAPACITY: usize = 5;
/// Smallest table size accepted by `check_size`.
pub const MIN_SIZE: usize = DEFAULT_CAPACITY;
pub const MAX_CAPACITY: usize = 10_000;
/// Largest table size accepted by `check_size`.
pub const MAX_SIZE: usize = 2 * MAX_CAPACITY;
/// Growth runs once `len > MAX_LOAD_FACTOR * table_size`.
pub const MAX_LOAD_FACTOR: f64 = 0.5;

/// Validate a requested capacity against the current number of entries and
/// round it up to a usable prime table size.
pub fn check_capacity(requested: usize, entries: usize) -> Result<usize, DictionaryError> {
    if requested < entries {
        return Err(DictionaryError::CapacityBelowEntries { requested, entries });
    }
    // Anything above MAX_SIZE rounds to a prime that check_size rejects.
    if requested > MAX_SIZE {
        return Err(DictionaryError::TableTooLarge {
            size: requested,
            max: MAX_SIZE,
        });
    }
    if requested < DEFAULT_CAPACITY {
        return Ok(DEFAULT_CAPACITY);
    }
    if !is_prime(requested) {
        return Ok(next_prime(requested));
    }
    Ok(requested)
}

pub fn check_size(size: usize) -> Result<(), DictionaryError> {
    if size < MIN_SIZE {
        return Err(DictionaryError::TableTooSmall {
            size,
            min: MIN_SIZE,
        });
    }
    if size > MAX_SIZE {
        return Err(DictionaryError::TableTooLarge {
            size,
            max: MAX_SIZE,
        });
    }
    Ok(())
}

/// Smallest prime `>= value`.
pub fn next_prime(mut value: usize) -> usize {
    while !is_prime(value) {
        value += 1;
    }
    value
}

pub fn is_prime(value: usize) -> bool {
    if value < 2 {
        return false;
    }
    let mut i = 2;
    while i <= value / i {
        if value % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// Size of the table that replaces one of `current` slots during growth.
pub fn grown_size(current: usize) -> Result<usize, DictionaryError> {
    let size = next_prime(current.saturating_mul(2));
    check_size(size)?;
    Ok(size)
}
