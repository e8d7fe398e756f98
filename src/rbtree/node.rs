use crate::arena::Handle;
use crate::entry::Entry;

/// An enum representing the color of a node in a red-black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red-black tree.
///
/// Links are arena handles rather than owning pointers; `parent` is the
/// non-owning back-link used by fixups and in-order traversal.
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub color: Color,
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl<T, U> Node<T, U> {
    /// Constructs a new, unlinked red node. Insertion recolors the very first
    /// node of a tree black when it becomes the root.
    pub fn new(key: T, value: U) -> Self {
        Node {
            entry: Entry { key, value },
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }
}
