//! A set-like hash table with separate chaining, see [`ChainTable`].
use std::{fmt, mem};

use crate::{
    bucket::Bucket,
    error::{InsertError, TryReserveError},
    hash::{BuildHasherFn, DefaultEq, EqualityFunction, HashFunction},
    DEFAULT_CAPACITY, MAX_LOAD_FACTOR,
};

/// A set-like hash table that resolves collisions by separate chaining.
///
/// In `ChainTable<T, H, E>`, `T` is the type of the stored values, `H: HashFunction<T>` computes
/// hash codes and `E: EqualityFunction<T>` decides whether two values are the same. Both default
/// to the [`Hash`](std::hash::Hash) and [`Eq`] implementations of `T`, using the hasher of
/// [`hash_value`](crate::hash_value).
///
/// The table owns an array of `capacity` slots, where `capacity` is always a power of two. A
/// value with hash code `h` lives in slot `h & (capacity - 1)`, in the collision chain of that
/// slot's bucket. Once storing another value would make the table more than
/// [`MAX_LOAD_FACTOR`] full, the slot array is doubled and all nodes are moved over to their new
/// slots.
///
/// There is no way to enumerate the stored values. Values are reached either by equality,
/// through [`contains`](Self::contains), [`get`](Self::get), [`remove`](Self::remove) and
/// [`take`](Self::take), or by hash code and predicate through [`find`](Self::find).
///
/// # Examples
///
/// ```
/// use chain_table::{hash_value, ChainTable};
///
/// let mut table: ChainTable<u64> = ChainTable::default();
/// assert!(table.insert(42));
/// assert!(!table.insert(42));
/// assert_eq!(table.len(), 1);
///
/// assert_eq!(table.find(hash_value(42u64), |&value| value == 42), Some(&42));
/// assert!(table.remove(&42));
/// assert!(!table.remove(&42));
/// ```
///
/// Custom hash and equality functions allow storing records that are identified by a key:
///
/// ```
/// use chain_table::{hash_value, ChainTable};
///
/// struct Employee {
///     id: u32,
///     name: &'static str,
/// }
///
/// let mut staff = ChainTable::new(
///     |employee: &Employee| hash_value(employee.id),
///     |a: &Employee, b: &Employee| a.id == b.id,
/// );
/// assert!(staff.insert(Employee { id: 7, name: "Ada" }));
/// assert!(!staff.insert(Employee { id: 7, name: "Grace" }));
///
/// let found = staff.find(hash_value(7u32), |employee| employee.id == 7);
/// assert_eq!(found.map(|employee| employee.name), Some("Ada"));
/// ```
pub struct ChainTable<T, H = BuildHasherFn, E = DefaultEq> {
    slots: Vec<Option<Bucket<T>>>,
    len: usize,
    hash: H,
    equals: E,
}

/// Occupancy statistics of a [`ChainTable`], see [`ChainTable::stats`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ChainStats {
    /// Number of stored values.
    pub len: usize,
    /// Number of slots.
    pub capacity: usize,
    /// Number of slots holding at least one value.
    pub occupied_buckets: usize,
    /// Length of the longest collision chain.
    pub longest_chain: usize,
}

#[derive(Clone, Copy)]
enum Fallibility {
    Fallible,
    Infallible,
}

impl Fallibility {
    fn capacity_overflow(self) -> TryReserveError {
        match self {
            Fallibility::Fallible => TryReserveError::CapacityOverflow,
            Fallibility::Infallible => panic!("hash table capacity overflow"),
        }
    }
}

fn alloc_slots<T>(
    capacity: usize,
    fallibility: Fallibility,
) -> Result<Vec<Option<Bucket<T>>>, TryReserveError> {
    let mut slots = Vec::new();
    match fallibility {
        Fallibility::Fallible => slots
            .try_reserve_exact(capacity)
            .map_err(TryReserveError::AllocError)?,
        Fallibility::Infallible => slots.reserve_exact(capacity),
    }
    slots.resize_with(capacity, || None);
    Ok(slots)
}

/// Number of slots to allocate when asked for `capacity` slots.
fn slots_for_capacity(capacity: usize) -> Option<usize> {
    capacity.max(1).checked_next_power_of_two()
}

/// Smallest number of slots that holds `len` values without exceeding the load factor.
fn slots_for_len(len: usize) -> Option<usize> {
    let (numerator, denominator) = MAX_LOAD_FACTOR;
    slots_for_capacity(len.checked_mul(denominator)?.div_ceil(numerator))
}

#[inline]
fn exceeds_load_factor(len: usize, capacity: usize) -> bool {
    let (numerator, denominator) = MAX_LOAD_FACTOR;
    len as u128 * denominator as u128 > capacity as u128 * numerator as u128
}

impl<T: fmt::Debug, H, E> fmt::Debug for ChainTable<T, H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainTable")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<T, H: Default, E: Default> Default for ChainTable<T, H, E> {
    fn default() -> Self {
        Self::new(H::default(), E::default())
    }
}

impl<T, H, E> ChainTable<T, H, E> {
    /// Returns an empty table with [`DEFAULT_CAPACITY`] slots.
    pub fn new(hash: H, equals: E) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, hash, equals)
    }

    /// Returns an empty table with at least `capacity` slots.
    ///
    /// The number of slots is rounded up to the next power of two. Note that `capacity` counts
    /// slots, not values: at most `capacity * MAX_LOAD_FACTOR` values fit before the table grows.
    /// Use [`reserve`](Self::reserve) to size the table for a known number of values.
    ///
    /// Panics if the number of slots overflows `usize`.
    pub fn with_capacity(capacity: usize, hash: H, equals: E) -> Self {
        match Self::with_capacity_inner(capacity, hash, equals, Fallibility::Infallible) {
            Ok(table) => table,
            Err(_) => unreachable!("infallible allocation reported an error"),
        }
    }

    /// Like [`with_capacity`](Self::with_capacity), but returns an error instead of aborting when
    /// the slot array cannot be allocated.
    pub fn try_with_capacity(capacity: usize, hash: H, equals: E) -> Result<Self, TryReserveError> {
        Self::with_capacity_inner(capacity, hash, equals, Fallibility::Fallible)
    }

    fn with_capacity_inner(
        capacity: usize,
        hash: H,
        equals: E,
        fallibility: Fallibility,
    ) -> Result<Self, TryReserveError> {
        let capacity =
            slots_for_capacity(capacity).ok_or_else(|| fallibility.capacity_overflow())?;
        Ok(ChainTable {
            slots: alloc_slots(capacity, fallibility)?,
            len: 0,
            hash,
            equals,
        })
    }

    /// Returns the number of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table stores no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots. This is always a power of two.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the table's hash function.
    ///
    /// Useful for computing the hash code passed to [`find`](Self::find).
    pub fn hash_function(&self) -> &H {
        &self.hash
    }

    /// Returns the table's equality function.
    pub fn equality_function(&self) -> &E {
        &self.equals
    }

    /// Removes all values, but keeps the slot array.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }

    /// Returns occupancy statistics. This walks every collision chain.
    pub fn stats(&self) -> ChainStats {
        let mut stats = ChainStats {
            len: self.len,
            capacity: self.capacity(),
            occupied_buckets: 0,
            longest_chain: 0,
        };
        for bucket in self.slots.iter().flatten() {
            stats.occupied_buckets += 1;
            stats.longest_chain = stats.longest_chain.max(bucket.chain.len());
        }
        stats
    }

    /// Returns a reference to the first value in the collision chain selected by `hash` for which
    /// `predicate` returns `true`.
    ///
    /// Unlike the other lookups, this uses neither the table's hash function nor its equality
    /// function. The caller provides the hash code, which must be computed the same way the
    /// table's hash function computes it for the value looked for, and a predicate to identify
    /// that value. This allows looking up records by a key without constructing a full record.
    ///
    /// Values whose hash code differs from `hash` can share its collision chain, so `predicate`
    /// should reject values that are not looked for, not just accept those that are.
    pub fn find(&self, hash: u64, predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        self.slots[self.slot_index(hash)]
            .as_ref()?
            .chain
            .find(predicate)
    }

    #[inline]
    fn slot_index(&self, hash: u64) -> usize {
        hash as usize & (self.capacity() - 1)
    }

    fn bucket_or_insert(&mut self, slot: usize) -> &mut Bucket<T> {
        self.slots[slot].get_or_insert_with(|| {
            log::trace!("creating bucket for slot {slot}");
            Bucket::new(slot)
        })
    }
}

impl<T, H: HashFunction<T>, E: EqualityFunction<T>> ChainTable<T, H, E> {
    /// Inserts a value, unless the table already contains an equal value.
    ///
    /// Returns `true` if the value was inserted. Otherwise the table is left unchanged and the
    /// given value is dropped.
    ///
    /// Doubles the number of slots when the new value would push the table over
    /// [`MAX_LOAD_FACTOR`].
    pub fn insert(&mut self, value: T) -> bool {
        match self.insert_inner(value, Fallibility::Infallible) {
            Ok(inserted) => inserted,
            Err(_) => unreachable!("infallible allocation reported an error"),
        }
    }

    /// Like [`insert`](Self::insert), but returns an error instead of aborting when the table
    /// needs to grow and the larger slot array cannot be allocated.
    ///
    /// On error the table is unchanged and the value is returned within the error.
    pub fn try_insert(&mut self, value: T) -> Result<bool, InsertError<T>> {
        self.insert_inner(value, Fallibility::Fallible)
    }

    fn insert_inner(&mut self, value: T, fallibility: Fallibility) -> Result<bool, InsertError<T>> {
        let hash = self.hash.hash(&value);
        if self
            .find(hash, |stored| self.equals.equals(stored, &value))
            .is_some()
        {
            return Ok(false);
        }

        if exceeds_load_factor(self.len + 1, self.capacity()) {
            let grown = match self.capacity().checked_mul(2) {
                Some(new_capacity) => self.resize(new_capacity, fallibility),
                None => Err(fallibility.capacity_overflow()),
            };
            if let Err(error) = grown {
                return Err(InsertError { value, error });
            }
        }

        let slot = self.slot_index(hash);
        self.bucket_or_insert(slot).chain.push_front(value);
        self.len += 1;
        Ok(true)
    }

    /// Removes the stored value equal to `value`. Returns `true` if there was one.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes the stored value equal to `value` and returns it, if it exists.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let slot = self.slot_index(self.hash.hash(value));
        let bucket = self.slots[slot].as_mut()?;
        debug_assert_eq!(bucket.slot(), slot);
        let equals = &self.equals;
        let removed = bucket.chain.remove(|stored| equals.equals(stored, value))?;
        if bucket.chain.is_empty() {
            self.slots[slot] = None;
        }
        self.len -= 1;
        Some(removed)
    }

    /// Returns a reference to the stored value equal to `value`, if it exists.
    pub fn get(&self, value: &T) -> Option<&T> {
        let hash = self.hash.hash(value);
        self.find(hash, |stored| self.equals.equals(stored, value))
    }

    /// Returns `true` if the table contains a value equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Grows the table so that `additional` more values can be inserted without resizing.
    ///
    /// Panics if the required number of slots overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        if self.reserve_inner(additional, Fallibility::Infallible).is_err() {
            unreachable!("infallible allocation reported an error")
        }
    }

    /// Like [`reserve`](Self::reserve), but returns an error instead of aborting when the larger
    /// slot array cannot be allocated. On error the table is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.reserve_inner(additional, Fallibility::Fallible)
    }

    fn reserve_inner(
        &mut self,
        additional: usize,
        fallibility: Fallibility,
    ) -> Result<(), TryReserveError> {
        let required = self
            .len
            .checked_add(additional)
            .and_then(slots_for_len)
            .ok_or_else(|| fallibility.capacity_overflow())?;
        if required > self.capacity() {
            self.resize(required, fallibility)?;
        }
        Ok(())
    }

    /// Moves every node into a freshly allocated slot array of `new_capacity` slots.
    ///
    /// The new array is allocated before anything is moved, so a failed allocation leaves the
    /// table untouched.
    #[inline(never)]
    #[cold]
    fn resize(&mut self, new_capacity: usize, fallibility: Fallibility) -> Result<(), TryReserveError> {
        debug_assert!(new_capacity.is_power_of_two());
        debug_assert!(new_capacity >= self.capacity());
        let new_slots = alloc_slots(new_capacity, fallibility)?;

        log::debug!(
            "resizing chain table from {} to {} slots holding {} values",
            self.capacity(),
            new_capacity,
            self.len
        );

        let old_slots = mem::replace(&mut self.slots, new_slots);
        for mut bucket in old_slots.into_iter().flatten() {
            while let Some(node) = bucket.chain.pop_node() {
                let slot = self.slot_index(self.hash.hash(&node.value));
                self.bucket_or_insert(slot).chain.push_node(node);
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn check(&self) {
        let capacity = self.capacity();
        assert!(capacity.is_power_of_two());
        assert!(!exceeds_load_factor(self.len, capacity));
        let mut total = 0;
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(bucket) = slot else { continue };
            assert_eq!(bucket.slot(), index);
            assert!(!bucket.chain.is_empty(), "empty bucket in slot {index}");
            let values: Vec<&T> = bucket.chain.iter().collect();
            for (i, &value) in values.iter().enumerate() {
                assert_eq!(self.slot_index(self.hash.hash(value)), index);
                for &other in &values[i + 1..] {
                    assert!(!self.equals.equals(value, other), "duplicate in slot {index}");
                }
            }
            total += values.len();
        }
        assert_eq!(total, self.len);
    }
}

impl<T, H: HashFunction<T>, E: EqualityFunction<T>> Extend<T> for ChainTable<T, H, E> {
    fn extend<IntoIter: IntoIterator<Item = T>>(&mut self, iter: IntoIter) {
        let iter = iter.into_iter();
        let (lower_bound, _) = iter.size_hint();
        self.reserve(lower_bound);
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, H: HashFunction<T> + Default, E: EqualityFunction<T> + Default> FromIterator<T>
    for ChainTable<T, H, E>
{
    fn from_iter<IntoIter: IntoIterator<Item = T>>(iter: IntoIter) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}
