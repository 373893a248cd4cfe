//! hashed-dictionary: a generic key-value dictionary over a prime-sized hash
//! table with chained collision resolution and load-factor growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: amortized O(1) `add`/`get_value` for any `K: Eq + Hash`, with a
//!   slot model and growth rule simple enough to reason about by hand.
//! - Layers:
//!   - `capacity`: pure sizing rules. Table sizes are prime and stay within
//!     `[MIN_SIZE, MAX_SIZE]`; growth targets `next_prime(2 * size)`.
//!   - `BucketTable<K, V>`: slot array plus an entry arena (`SlotMap`).
//!     Owns index computation, chain probing, insertion and growth.
//!   - `KeyIter<'a, K, V>`: forward-only key enumeration borrowing the table.
//!   - `HashedDictionary<K, V>`: public API, builder and logging.
//!
//! Slots and chains
//! - A slot is `Empty`, `Available` or the head of a chain. `Available` is a
//!   tombstone state kept in the model for a deletion design; nothing in the
//!   public API produces it, and lookups and enumeration skip it.
//! - Chains are linked by arena key, so every entry has exactly one owner
//!   (its slot or its predecessor) and no reference cycles exist.
//!
//! Collision policy
//! - `CollisionPolicy::ReplaceHead` (default) keeps the historical insertion
//!   rule of this dictionary: a new key whose slot is already occupied
//!   becomes the new chain head and the old chain is discarded. Lookups and
//!   enumeration look at chain heads only, so among keys that share an index
//!   only the most recently inserted one is retrievable. `len` still counts
//!   every fresh insertion.
//! - `CollisionPolicy::Chain` is ordinary separate chaining: new keys are
//!   linked at the chain tail and lookups walk the chain.
//!
//! Hashing
//! - Keys are hashed with `rustc_hash::FxHasher`. The 64-bit hash is read as
//!   signed and reduced modulo the table size, with negative remainders
//!   folded back into range. Placement is deterministic across runs.
//!
//! Growth
//! - Runs inside `add` once `len > MAX_LOAD_FACTOR * table_size`. The slot
//!   array and arena are replaced and every reachable pair is re-inserted
//!   through the ordinary insert path in slot order. `collision_count`
//!   keeps counting across growth.
//! - The target size is validated before the insertion mutates anything, so
//!   an `add` that would outgrow `MAX_SIZE` fails with no effect.
//!
//! Notes and non-goals
//! - Single-threaded; enumerators borrow the dictionary so it cannot be
//!   mutated while one is alive.
//! - No key removal, no value iteration, no custom hashers.

mod bucket_table;
pub mod capacity;
mod dictionary;
mod error;
mod hashed_dictionary;
mod hashed_dictionary_proptest;
mod key_iter;

// Public surface
pub use bucket_table::CollisionPolicy;
pub use dictionary::Dictionary;
pub use error::DictionaryError;
pub use hashed_dictionary::{DictionaryBuilder, HashedDictionary};
pub use key_iter::KeyIter;
