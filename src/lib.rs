//! Dualmap - Hashed and ordered associative containers
//!
//! This crate provides two independent storage engines, each with thin map
//! and set layers over it.
//!
//! * [`HashTable`] is an open addressing hash table. Entries live directly in
//!   a power of two sized slot array, collisions are resolved by triangular
//!   probing and removals leave tombstones. It grows by doubling once the load
//!   reaches a configurable maximum. [`HashSet`] stores its elements as keys
//!   of a table.
//! * [`AvlTree`] is a height balanced binary search tree, giving `O(log n)`
//!   operations with sorted iteration and min / max queries.
//!   [`OrderedMap`] and [`OrderedSet`] are built on it.
//!
//! None of these containers use internal locking. Mutation requires `&mut`,
//! so sharing one across threads needs an outer lock.
//!
//! # Features
//!
//! * `foldhash` - use foldhash as the default hasher (enabled by default)
//! * `ahash` - use ahash as the default hasher when foldhash is disabled
//! * `serde` - serialisation for all containers
//!
//! With neither hasher feature enabled the std `RandomState` is used.

#![deny(warnings)]
#![warn(unused_extern_crates)]
#![warn(missing_docs)]
#![allow(clippy::needless_lifetimes)]

pub mod avltree;
pub mod error;
pub mod hashset;
pub mod hashtable;
pub mod ordmap;
pub mod ordset;

mod utils;

pub use avltree::AvlTree;
pub use error::Error;
pub use hashset::HashSet;
pub use hashtable::{HashTable, HashTableBuilder};
pub use ordmap::OrderedMap;
pub use ordset::OrderedSet;
