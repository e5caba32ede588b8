#[cfg(feature = "serde")]
use std::fmt;
#[cfg(feature = "serde")]
use std::iter;
#[cfg(feature = "serde")]
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::de::{Deserialize, MapAccess, SeqAccess, Visitor};

/// Gathers a serialised map into any collection that can be built from its
/// pairs.
#[cfg(feature = "serde")]
pub(crate) struct MapCollector<T, K, V>(PhantomData<(T, K, V)>);

#[cfg(feature = "serde")]
impl<T, K, V> MapCollector<T, K, V> {
    pub(crate) fn new() -> Self {
        Self(PhantomData)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, K, V> Visitor<'de> for MapCollector<T, K, V>
where
    T: FromIterator<(K, V)>,
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        iter::from_fn(|| access.next_entry().transpose()).collect()
    }
}

/// The sequence counterpart of [`MapCollector`], used by the sets.
#[cfg(feature = "serde")]
pub(crate) struct SeqCollector<T, E>(PhantomData<(T, E)>);

#[cfg(feature = "serde")]
impl<T, E> SeqCollector<T, E> {
    pub(crate) fn new() -> Self {
        Self(PhantomData)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, E> Visitor<'de> for SeqCollector<T, E>
where
    T: FromIterator<E>,
    E: Deserialize<'de>,
{
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        iter::from_fn(|| access.next_element().transpose()).collect()
    }
}
