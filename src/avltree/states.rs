/// The outcome of placing a key into the tree.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum InsertState<T> {
    // A new leaf was linked in.
    Ok,
    // An equal key is already present. The rejected key is handed back so
    // the caller can decide what to do with it.
    Duplicate(T),
}

impl<T> InsertState<T> {
    #[inline]
    pub(crate) fn is_ok(&self) -> bool {
        matches!(self, InsertState::Ok)
    }
}
