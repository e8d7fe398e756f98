//! Self-balancing binary search tree that uses a color bit to keep itself
//! approximately balanced across insertions and deletions. One tree core
//! backs all three containers in this module: the map and set reject
//! duplicate keys themselves, while the multiset relies on the tree's
//! duplicate-chaining insertion path.

mod map;
mod multiset;
mod node;
mod set;
mod tree;

pub use self::map::{RbMap, RbMapIntoIter, RbMapIter};
pub use self::multiset::{RbMultiset, RbMultisetIntoIter, RbMultisetIter};
pub use self::set::{RbSet, RbSetIntoIter, RbSetIter};
pub use self::tree::{Position, RbTree, RbTreeIntoIter, RbTreeIter};
