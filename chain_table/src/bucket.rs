use crate::chain::Chain;

/// An occupied slot of a [`ChainTable`](crate::ChainTable).
///
/// Buckets are only created once a value is stored in their slot and are released again when
/// their chain becomes empty, so an existing bucket always holds at least one value.
pub struct Bucket<T> {
    slot: usize,
    pub chain: Chain<T>,
}

impl<T> Bucket<T> {
    pub fn new(slot: usize) -> Self {
        Bucket {
            slot,
            chain: Chain::default(),
        }
    }

    /// The slot index this bucket was created for, i.e. the hash of every contained value
    /// reduced modulo the table's capacity.
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }
}
