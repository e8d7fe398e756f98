//! Ordered associative containers backed by a single arena-allocated
//! red-black tree: a map, a set, and a multiset.

extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod arena;
mod entry;
pub mod rbtree;
