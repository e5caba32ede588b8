//! The failure kinds reported by the storage engines.
//!
//! Lookups never fail - a miss is an `Option::None`. These errors are only
//! raised by operations that refuse to change a container. In every case the
//! container is left exactly as it was, with one documented exception: a
//! [`Error::ResizeRejected`] from an insert that had already stored its entry.

/// An error raised by a [`HashTable`](crate::hashtable::HashTable) or an
/// [`AvlTree`](crate::avltree::AvlTree).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// `put` was given an absent key.
    #[error("the key cannot be absent")]
    NullKey,

    /// Rehashing to `capacity` slots would leave `len` entries above the
    /// configured max load.
    #[error("resizing to {capacity} slots would exceed the max load of {max_load} with {len} entries")]
    ResizeRejected {
        /// The power of two capacity that was refused.
        capacity: usize,
        /// The number of live entries at the time.
        len: usize,
        /// The max load of the table.
        max_load: f64,
    },

    /// The key is already present in the tree.
    #[error("the key is already present in the tree")]
    DuplicateKey,

    /// The key is not present in the tree.
    #[error("the key is not present")]
    KeyNotFound,

    /// A hash table must have at least one slot.
    #[error("a hash table needs a capacity of at least 1, got {0}")]
    InvalidCapacity(usize),

    /// The max load must be a fraction in `(0, 1]`.
    #[error("the max load must be in (0, 1], got {0}")]
    InvalidMaxLoad(f64),
}

impl Error {
    pub(crate) fn resize_rejected(capacity: usize, len: usize, max_load: f64) -> Self {
        Error::ResizeRejected {
            capacity,
            len,
            max_load,
        }
    }
}
