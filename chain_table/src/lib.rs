//! [ChainTable] is a set-like hash table that resolves collisions by separate chaining.
//!
//! The table stores values in a power-of-two sized array of slots. Each occupied slot holds a
//! bucket owning a singly linked chain of nodes, one node per stored value. Hashing and equality
//! are not taken from the value type but supplied when the table is constructed, see
//! [`HashFunction`] and [`EqualityFunction`]. For types implementing [`Hash`](std::hash::Hash)
//! and [`Eq`], [`BuildHasherFn`] and [`DefaultEq`] provide the usual behavior.
//!
//! Lookups come in two flavors:
//!
//! 1. [`ChainTable::insert`], [`ChainTable::remove`] and [`ChainTable::contains`] hash the given
//!    value with the table's hash function and compare with the table's equality function. This
//!    is what keeps the stored values unique.
//! 2. [`ChainTable::find`] takes a precomputed hash and an arbitrary predicate. This allows
//!    looking up a stored record by a part of it, e.g. by a key when the stored values bundle a
//!    key with a payload.
//!
//! The table grows by doubling its slot array as soon as the number of stored values exceeds
//! [`MAX_LOAD_FACTOR`] times the number of slots.
#![deny(unsafe_code)]

mod bucket;
mod chain;
mod error;
mod hash;
mod test_table;

pub mod chain_table;

pub use chain_table::{ChainStats, ChainTable};
pub use error::{InsertError, TryReserveError};
pub use hash::{
    hash_ref, hash_value, BuildHasherFn, DefaultBuildHasher, DefaultEq, EqualityFunction,
    HashFunction,
};

/// Number of slots used by [`ChainTable::new`] and [`ChainTable::default`].
pub const DEFAULT_CAPACITY: usize = 8;

/// Largest ratio of stored values to slots tolerated before the table doubles its slot array,
/// given as `(numerator, denominator)`.
pub const MAX_LOAD_FACTOR: (usize, usize) = (3, 4);
