//! Hash and equality functions used by [`ChainTable`](crate::ChainTable).
use std::hash::{BuildHasher, BuildHasherDefault, Hash};

use zwohash::ZwoHasher;

/// Computes the hash code of a stored value.
///
/// Implementations must be deterministic and consistent with the [`EqualityFunction`] used by
/// the same table: values that compare equal must hash to the same code. This is not checked,
/// violating it makes lookups miss values that are present and allows duplicates.
///
/// Implemented for all closures `Fn(&T) -> u64` and for [`BuildHasherFn`].
pub trait HashFunction<T: ?Sized> {
    /// Returns the hash code of `value`.
    fn hash(&self, value: &T) -> u64;
}

impl<T: ?Sized, F: Fn(&T) -> u64> HashFunction<T> for F {
    #[inline]
    fn hash(&self, value: &T) -> u64 {
        self(value)
    }
}

/// Decides whether two stored values are the same value.
///
/// This must be an equivalence relation. A [`ChainTable`](crate::ChainTable) never stores two
/// values for which this returns `true`.
///
/// Implemented for all closures `Fn(&T, &T) -> bool` and for [`DefaultEq`].
pub trait EqualityFunction<T: ?Sized> {
    /// Returns `true` if `a` and `b` are equal.
    fn equals(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, F: Fn(&T, &T) -> bool> EqualityFunction<T> for F {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// The default [`BuildHasher`], based on [`ZwoHasher`].
pub type DefaultBuildHasher = BuildHasherDefault<ZwoHasher>;

/// Adapts a [`BuildHasher`] into a [`HashFunction`] for all types implementing [`Hash`].
#[derive(Clone, Copy, Default, Debug)]
pub struct BuildHasherFn<S = DefaultBuildHasher>(pub S);

impl<T: Hash + ?Sized, S: BuildHasher> HashFunction<T> for BuildHasherFn<S> {
    #[inline]
    fn hash(&self, value: &T) -> u64 {
        self.0.hash_one(value)
    }
}

/// An [`EqualityFunction`] comparing values with their [`Eq`] implementation.
#[derive(Clone, Copy, Default, Debug)]
pub struct DefaultEq;

impl<T: Eq + ?Sized> EqualityFunction<T> for DefaultEq {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Computes the hash of a value using the default hasher.
///
/// This matches the hash codes that a [`ChainTable`](crate::ChainTable) with the default
/// [`BuildHasherFn`] computes, so it can be used to build the hash argument of
/// [`ChainTable::find`](crate::ChainTable::find).
#[inline]
pub fn hash_value<T: Hash>(value: T) -> u64 {
    DefaultBuildHasher::default().hash_one(value)
}

/// Computes the hash of a reference using the default hasher.
///
/// This forwards to [`hash_value`]. Restricting the argument to be a reference is occasionally
/// useful for type inference.
#[inline]
pub fn hash_ref<T: Hash + ?Sized>(value: &T) -> u64 {
    hash_value(value)
}
