use std::fmt;

/// The error type for the fallible allocation methods of [`ChainTable`](crate::ChainTable).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TryReserveError {
    /// The requested number of slots exceeds what can be addressed.
    CapacityOverflow,
    /// The allocator failed to provide memory for the slot array.
    AllocError(std::collections::TryReserveError),
}

impl fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryReserveError::CapacityOverflow => {
                write!(f, "hash table capacity exceeds the addressable size")
            }
            TryReserveError::AllocError(err) => {
                write!(f, "failed to allocate hash table slots: {err}")
            }
        }
    }
}

impl std::error::Error for TryReserveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TryReserveError::CapacityOverflow => None,
            TryReserveError::AllocError(err) => Some(err),
        }
    }
}

/// Returned by [`ChainTable::try_insert`](crate::ChainTable::try_insert) when the table had to
/// grow but could not. The value was not inserted and is handed back.
#[derive(Debug)]
pub struct InsertError<T> {
    /// The value that could not be inserted.
    pub value: T,
    /// The reason growing the table failed.
    pub error: TryReserveError,
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value not inserted: {}", self.error)
    }
}

impl<T: fmt::Debug> std::error::Error for InsertError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
