use std::mem;

/// A single cell of the slot array.
#[derive(Clone, Debug)]
pub(crate) enum Slot<K, V> {
    Empty,
    // Logically deleted. Probes continue past this, but inserts may reuse it.
    Tombstone,
    Occupied(K, V),
}

impl<K, V> Slot<K, V> {
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(..))
    }

    #[inline]
    pub(crate) fn entry(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn into_entry(self) -> Option<(K, V)> {
        match self {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        }
    }

    /// Replace an occupied slot with a tombstone, handing back what it held.
    /// Empty slots and tombstones are left untouched.
    pub(crate) fn bury(&mut self) -> Option<(K, V)> {
        if self.is_occupied() {
            mem::replace(self, Slot::Tombstone).into_entry()
        } else {
            None
        }
    }
}

/// The outcome of walking a probe sequence for a key.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ProbeState {
    // The key lives at this index.
    Found(usize),
    // The key is absent, and this is where it should go. This is the first
    // tombstone seen on the path if any, otherwise the empty slot that ended
    // the scan.
    Vacant(usize),
    // Every slot was visited, none matched and none can take a new entry.
    Full,
}
