use crate::arena::{Arena, Handle};
use crate::entry::Entry;
use crate::rbtree::node::{Color, Node};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;
use std::vec;

/// A location in an [`RbTree`], either a node or the null position past either
/// end of the in-order sequence.
///
/// Positions are plain handles: erasing the node a position refers to (or
/// clearing the tree) invalidates it, and the tree surfaces a stale position
/// as a miss rather than an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Position(Option<Handle>);

impl Position {
    /// The null position.
    pub fn null() -> Self {
        Position(None)
    }

    /// Returns `true` if this position refers to no node.
    pub fn is_null(self) -> bool {
        self.0.is_none()
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// An ordered key-value tree, the red-black core backing [`RbMap`],
/// [`RbSet`], and [`RbMultiset`].
///
/// The tree itself never rejects a key: inserting a key equal to one already
/// present chains the duplicate into the equal node's left subtree, so equal
/// keys sit adjacent in the in-order sequence. Containers wanting unique keys
/// check before inserting.
///
/// Nodes live in an arena and refer to each other by handle, which is what
/// makes the parent back-links safe to hold.
///
/// # Examples
///
/// ```
/// use ordered_collections::rbtree::RbTree;
///
/// let mut tree = RbTree::new();
/// tree.insert(1, "one");
/// tree.insert(3, "three");
///
/// let position = tree.find(&3);
/// assert_eq!(tree.get(position), Some((&3, &"three")));
///
/// assert_eq!(tree.erase(position), Some((3, "three")));
/// assert_eq!(tree.len(), 1);
/// ```
///
/// [`RbMap`]: crate::rbtree::RbMap
/// [`RbSet`]: crate::rbtree::RbSet
/// [`RbMultiset`]: crate::rbtree::RbMultiset
pub struct RbTree<T, U> {
    arena: Arena<Node<T, U>>,
    root: Option<Handle>,
}

impl<T, U> RbTree<T, U> {
    /// Constructs a new, empty `RbTree<T, U>`.
    pub fn new() -> Self {
        RbTree {
            arena: Arena::new(),
            root: None,
        }
    }

    fn is_red(&self, node: Option<Handle>) -> bool {
        match node {
            Some(handle) => self.arena[handle].color == Color::Red,
            None => false,
        }
    }

    /// Inserts a key-value pair and returns the position of the new node.
    ///
    /// Insertion always succeeds. A key equal to an existing one descends into
    /// the equal node's left subtree, so it lands as the equal node's new left
    /// child when that slot is free and at the bottom of the chain otherwise;
    /// either way the ordinary insertion fixup restores the tree's invariants.
    pub fn insert(&mut self, key: T, value: U) -> Position
    where
        T: Ord,
    {
        let mut current = match self.root {
            Some(root) => root,
            None => {
                let mut node = Node::new(key, value);
                node.color = Color::Black;
                let handle = self.arena.allocate(node);
                self.root = Some(handle);
                return Position(Some(handle));
            }
        };

        // Descend to a missing child slot; equal keys go left.
        let (parent, side) = loop {
            match key.cmp(&self.arena[current].entry.key) {
                Ordering::Greater => match self.arena[current].right {
                    Some(child) => current = child,
                    None => break (current, Side::Right),
                },
                _ => match self.arena[current].left {
                    Some(child) => current = child,
                    None => break (current, Side::Left),
                },
            }
        };

        let mut node = Node::new(key, value);
        node.parent = Some(parent);
        let handle = self.arena.allocate(node);
        match side {
            Side::Left => self.arena[parent].left = Some(handle),
            Side::Right => self.arena[parent].right = Some(handle),
        }

        self.insert_fixup(handle);
        Position(Some(handle))
    }

    // Restores the no-red-red invariant after attaching a red leaf, climbing
    // while the parent is red. A red parent is never the root, so the
    // grandparent always exists inside the loop.
    fn insert_fixup(&mut self, inserted: Handle) {
        let mut current = inserted;
        loop {
            let parent = match self.arena[current].parent {
                Some(parent) if self.arena[parent].color == Color::Red => parent,
                _ => break,
            };
            let grandparent = self.arena[parent]
                .parent
                .expect("Expected a red node to have a parent.");

            if self.arena[grandparent].left == Some(parent) {
                let uncle = self.arena[grandparent].right;
                if self.is_red(uncle) {
                    // Red uncle: recolor and push the violation upward.
                    self.arena[parent].color = Color::Black;
                    if let Some(uncle) = uncle {
                        self.arena[uncle].color = Color::Black;
                    }
                    self.arena[grandparent].color = Color::Red;
                    current = grandparent;
                } else {
                    let top = if self.arena[parent].right == Some(current) {
                        // Inner child: straighten the zigzag first.
                        self.rotate_left(parent);
                        current
                    } else {
                        parent
                    };
                    self.arena[top].color = Color::Black;
                    self.arena[grandparent].color = Color::Red;
                    self.rotate_right(grandparent);
                    break;
                }
            } else {
                let uncle = self.arena[grandparent].left;
                if self.is_red(uncle) {
                    self.arena[parent].color = Color::Black;
                    if let Some(uncle) = uncle {
                        self.arena[uncle].color = Color::Black;
                    }
                    self.arena[grandparent].color = Color::Red;
                    current = grandparent;
                } else {
                    let top = if self.arena[parent].left == Some(current) {
                        self.rotate_right(parent);
                        current
                    } else {
                        parent
                    };
                    self.arena[top].color = Color::Black;
                    self.arena[grandparent].color = Color::Red;
                    self.rotate_left(grandparent);
                    break;
                }
            }
        }

        if let Some(root) = self.root {
            self.arena[root].color = Color::Black;
        }
    }

    fn rotate_left(&mut self, node: Handle) {
        let pivot = self.arena[node]
            .right
            .expect("Expected a right child to rotate left around.");
        let inner = self.arena[pivot].left;

        self.arena[node].right = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(node);
        }

        let parent = self.arena[node].parent;
        self.arena[pivot].parent = parent;
        match parent {
            None => self.root = Some(pivot),
            Some(parent) => {
                if self.arena[parent].left == Some(node) {
                    self.arena[parent].left = Some(pivot);
                } else {
                    self.arena[parent].right = Some(pivot);
                }
            }
        }

        self.arena[pivot].left = Some(node);
        self.arena[node].parent = Some(pivot);
    }

    fn rotate_right(&mut self, node: Handle) {
        let pivot = self.arena[node]
            .left
            .expect("Expected a left child to rotate right around.");
        let inner = self.arena[pivot].right;

        self.arena[node].left = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(node);
        }

        let parent = self.arena[node].parent;
        self.arena[pivot].parent = parent;
        match parent {
            None => self.root = Some(pivot),
            Some(parent) => {
                if self.arena[parent].left == Some(node) {
                    self.arena[parent].left = Some(pivot);
                } else {
                    self.arena[parent].right = Some(pivot);
                }
            }
        }

        self.arena[pivot].right = Some(node);
        self.arena[node].parent = Some(pivot);
    }

    /// Removes the node at a position and returns its key-value pair. Returns
    /// `None` without touching the tree if the position is null or stale.
    pub fn erase(&mut self, position: Position) -> Option<(T, U)> {
        let handle = position.0?;
        self.arena.get(handle)?;
        let node = self.delete_node(handle);
        let Entry { key, value } = node.entry;
        Some((key, value))
    }

    // Reduces deletion to the leaf case by swapping entries downward, then
    // detaches the leaf and repairs the black-height deficit if one remains.
    fn delete_node(&mut self, handle: Handle) -> Node<T, U> {
        match (self.arena[handle].left, self.arena[handle].right) {
            (Some(left), Some(_)) => {
                // Two children: trade entries with the in-order predecessor
                // (max of the left subtree) and delete down there instead.
                let mut predecessor = left;
                while let Some(child) = self.arena[predecessor].right {
                    predecessor = child;
                }
                self.swap_entries(handle, predecessor);
                self.delete_node(predecessor)
            }
            (Some(child), None) | (None, Some(child)) => {
                // A red node with exactly one child cannot satisfy black-height
                // uniformity, so the tree was already broken before this call.
                if self.arena[handle].color == Color::Red {
                    panic!("Error: red node with a single child; tree invariants are broken.");
                }
                self.swap_entries(handle, child);
                self.delete_node(child)
            }
            (None, None) => match self.arena[handle].parent {
                None => {
                    self.root = None;
                    self.arena.free(handle)
                }
                Some(parent) => {
                    let side = if self.arena[parent].left == Some(handle) {
                        self.arena[parent].left = None;
                        Side::Left
                    } else {
                        self.arena[parent].right = None;
                        Side::Right
                    };
                    let node = self.arena.free(handle);
                    // Detaching a red leaf never changes black counts.
                    if node.color == Color::Black {
                        self.delete_fixup(parent, side);
                    }
                    node
                }
            },
        }
    }

    fn swap_entries(&mut self, first: Handle, second: Handle) {
        let (first_node, second_node) = self.arena.get_pair_mut(first, second);
        mem::swap(&mut first_node.entry, &mut second_node.entry);
    }

    // The subtree on `deficit` side of `parent` is one black node short.
    // Resolves against the sibling on the other side: a red sibling is rotated
    // down to expose a black one, a red sibling-child absorbs the deficit via
    // rotation and recoloring, and an all-black sibling pushes the deficit
    // upward unless a red parent can absorb it.
    fn delete_fixup(&mut self, parent: Handle, deficit: Side) {
        match deficit {
            Side::Left => {
                let sibling = self.arena[parent]
                    .right
                    .expect("Expected a sibling on the non-deficient side.");
                if self.arena[sibling].color == Color::Red {
                    self.arena[sibling].color = Color::Black;
                    self.arena[parent].color = Color::Red;
                    self.rotate_left(parent);
                    self.delete_fixup(parent, Side::Left);
                    return;
                }

                let distal = self.arena[sibling].right;
                let near = self.arena[sibling].left;
                if let Some(distal) = distal.filter(|&child| self.is_red(Some(child))) {
                    self.arena[sibling].color = self.arena[parent].color;
                    self.arena[parent].color = Color::Black;
                    self.arena[distal].color = Color::Black;
                    self.rotate_left(parent);
                } else if let Some(near) = near.filter(|&child| self.is_red(Some(child))) {
                    // Zigzag: straighten at the sibling, then resolve above.
                    self.arena[near].color = Color::Black;
                    self.arena[sibling].color = Color::Red;
                    self.rotate_right(sibling);
                    self.delete_fixup(parent, Side::Left);
                } else {
                    self.arena[sibling].color = Color::Red;
                    if self.arena[parent].color == Color::Red {
                        self.arena[parent].color = Color::Black;
                    } else if let Some(grandparent) = self.arena[parent].parent {
                        let side = if self.arena[grandparent].left == Some(parent) {
                            Side::Left
                        } else {
                            Side::Right
                        };
                        self.delete_fixup(grandparent, side);
                    }
                }
            }
            Side::Right => {
                let sibling = self.arena[parent]
                    .left
                    .expect("Expected a sibling on the non-deficient side.");
                if self.arena[sibling].color == Color::Red {
                    self.arena[sibling].color = Color::Black;
                    self.arena[parent].color = Color::Red;
                    self.rotate_right(parent);
                    self.delete_fixup(parent, Side::Right);
                    return;
                }

                let distal = self.arena[sibling].left;
                let near = self.arena[sibling].right;
                if let Some(distal) = distal.filter(|&child| self.is_red(Some(child))) {
                    self.arena[sibling].color = self.arena[parent].color;
                    self.arena[parent].color = Color::Black;
                    self.arena[distal].color = Color::Black;
                    self.rotate_right(parent);
                } else if let Some(near) = near.filter(|&child| self.is_red(Some(child))) {
                    self.arena[near].color = Color::Black;
                    self.arena[sibling].color = Color::Red;
                    self.rotate_left(sibling);
                    self.delete_fixup(parent, Side::Right);
                } else {
                    self.arena[sibling].color = Color::Red;
                    if self.arena[parent].color == Color::Red {
                        self.arena[parent].color = Color::Black;
                    } else if let Some(grandparent) = self.arena[parent].parent {
                        let side = if self.arena[grandparent].left == Some(parent) {
                            Side::Left
                        } else {
                            Side::Right
                        };
                        self.delete_fixup(grandparent, side);
                    }
                }
            }
        }
    }

    /// Returns the position of a node whose key compares equal to `key`, or
    /// the null position. With chained duplicates this finds the topmost node
    /// of the chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(1, 10);
    /// assert!(tree.find(&0).is_null());
    /// assert!(!tree.find(&1).is_null());
    /// ```
    pub fn find<V>(&self, key: &V) -> Position
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            match key.cmp(self.arena[handle].entry.key.borrow()) {
                Ordering::Less => current = self.arena[handle].left,
                Ordering::Greater => current = self.arena[handle].right,
                Ordering::Equal => return Position(Some(handle)),
            }
        }
        Position(None)
    }

    /// Checks if any node's key compares equal to `key`.
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        !self.find(key).is_null()
    }

    /// Returns the key and value at a position, or `None` for a null or stale
    /// position.
    pub fn get(&self, position: Position) -> Option<(&T, &U)> {
        position
            .0
            .and_then(|handle| self.arena.get(handle))
            .map(|node| (&node.entry.key, &node.entry.value))
    }

    /// Returns a mutable reference to the value at a position, or `None` for a
    /// null or stale position.
    pub fn get_mut(&mut self, position: Position) -> Option<&mut U> {
        let handle = match position.0 {
            Some(handle) => handle,
            None => return None,
        };
        self.arena.get_mut(handle).map(|node| &mut node.entry.value)
    }

    /// Returns the position of the minimum key, or the null position if the
    /// tree is empty.
    pub fn min(&self) -> Position {
        let mut current = match self.root {
            Some(root) => root,
            None => return Position(None),
        };
        while let Some(left) = self.arena[current].left {
            current = left;
        }
        Position(Some(current))
    }

    /// Returns the position of the maximum key, or the null position if the
    /// tree is empty.
    pub fn max(&self) -> Position {
        let mut current = match self.root {
            Some(root) => root,
            None => return Position(None),
        };
        while let Some(right) = self.arena[current].right {
            current = right;
        }
        Position(Some(current))
    }

    /// Returns the position of the in-order successor, or the null position
    /// when walking past the maximum (or from the null position).
    pub fn successor(&self, position: Position) -> Position {
        match position.0 {
            Some(handle) => Position(self.successor_handle(handle)),
            None => Position(None),
        }
    }

    /// Returns the position of the in-order predecessor, or the null position
    /// when walking past the minimum (or from the null position).
    pub fn predecessor(&self, position: Position) -> Position {
        match position.0 {
            Some(handle) => Position(self.predecessor_handle(handle)),
            None => Position(None),
        }
    }

    // In-order successor without a stack or sentinel: descend to the leftmost
    // node of the right subtree, or climb out of right subtrees and step up
    // once. The climb tests which child slot we came from rather than
    // comparing keys, so chained duplicates traverse correctly.
    fn successor_handle(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.arena[handle].right {
            let mut current = right;
            while let Some(left) = self.arena[current].left {
                current = left;
            }
            return Some(current);
        }

        let mut current = handle;
        let mut parent = self.arena[current].parent;
        while let Some(above) = parent {
            if self.arena[above].right != Some(current) {
                break;
            }
            current = above;
            parent = self.arena[above].parent;
        }
        parent
    }

    fn predecessor_handle(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.arena[handle].left {
            let mut current = left;
            while let Some(right) = self.arena[current].right {
                current = right;
            }
            return Some(current);
        }

        let mut current = handle;
        let mut parent = self.arena[current].parent;
        while let Some(above) = parent {
            if self.arena[above].left != Some(current) {
                break;
            }
            current = above;
            parent = self.arena[above].parent;
        }
        parent
    }

    /// Returns the number of nodes in the tree by a full traversal. The count
    /// is deliberately not cached; the containers wrapping this tree maintain
    /// their own counters.
    pub fn len(&self) -> usize {
        self.count(self.root)
    }

    fn count(&self, node: Option<Handle>) -> usize {
        match node {
            Some(handle) => {
                1 + self.count(self.arena[handle].left) + self.count(self.arena[handle].right)
            }
            None => 0,
        }
    }

    /// Returns `true` if the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every node. Clearing an empty tree is a no-op.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Drains every entry of `other` into this tree in key order, leaving
    /// `other` empty. Entries are re-inserted one at a time rather than
    /// splicing subtrees, so duplicates chain the same way direct insertion
    /// would.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(1, 10);
    ///
    /// let mut other = RbTree::new();
    /// other.insert(2, 20);
    ///
    /// tree.merge(&mut other);
    /// assert_eq!(tree.len(), 2);
    /// assert!(other.is_empty());
    /// ```
    pub fn merge(&mut self, other: &mut RbTree<T, U>)
    where
        T: Ord,
    {
        for handle in other.in_order_handles() {
            let node = other.arena.free(handle);
            let Entry { key, value } = node.entry;
            self.insert(key, value);
        }
        other.root = None;
    }

    fn in_order_handles(&self) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(self.arena.len());
        let mut current = self.min().0;
        while let Some(handle) = current {
            handles.push(handle);
            current = self.successor_handle(handle);
        }
        handles
    }

    /// Returns a double-ended iterator over `(&key, &value)` pairs in key
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert(2, 20);
    /// tree.insert(1, 10);
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some((&1, &10)));
    /// assert_eq!(iterator.next(), Some((&2, &20)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RbTreeIter<'_, T, U> {
        RbTreeIter {
            tree: self,
            front: self.min().0,
            back: self.max().0,
            exhausted: self.root.is_none(),
        }
    }
}

impl<T, U> Default for RbTree<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U> IntoIterator for RbTree<T, U> {
    type IntoIter = RbTreeIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        let handles = self.in_order_handles();
        RbTreeIntoIter {
            arena: self.arena,
            handles: handles.into_iter(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a RbTree<T, U> {
    type IntoIter = RbTreeIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RbTree<T, U>`.
///
/// This iterator traverses the nodes of the tree in-order and yields owned
/// entries.
pub struct RbTreeIntoIter<T, U> {
    arena: Arena<Node<T, U>>,
    handles: vec::IntoIter<Handle>,
}

impl<T, U> Iterator for RbTreeIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        self.handles.next().map(|handle| {
            let node = self.arena.free(handle);
            let Entry { key, value } = node.entry;
            (key, value)
        })
    }
}

/// An iterator for `RbTree<T, U>`.
///
/// Walks the tree in-order through the parent back-links, in both directions.
pub struct RbTreeIter<'a, T, U> {
    tree: &'a RbTree<T, U>,
    front: Option<Handle>,
    back: Option<Handle>,
    exhausted: bool,
}

impl<'a, T, U> Iterator for RbTreeIter<'a, T, U> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let handle = self.front?;
        if self.front == self.back {
            self.exhausted = true;
        } else {
            self.front = self.tree.successor_handle(handle);
        }
        let node = &self.tree.arena[handle];
        Some((&node.entry.key, &node.entry.value))
    }
}

impl<'a, T, U> DoubleEndedIterator for RbTreeIter<'a, T, U> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let handle = self.back?;
        if self.front == self.back {
            self.exhausted = true;
        } else {
            self.back = self.tree.predecessor_handle(handle);
        }
        let node = &self.tree.arena[handle];
        Some((&node.entry.key, &node.entry.value))
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Handle, Position, RbTree};

    // Verifies the red-black invariants and the parent back-links of the whole
    // tree, returning nothing but panicking on the first violation. Leaf
    // positions count one toward the black height.
    fn check_invariants<T, U>(tree: &RbTree<T, U>)
    where
        T: Ord,
    {
        if let Some(root) = tree.root {
            assert_eq!(tree.arena[root].color, Color::Black, "root must be black");
            assert_eq!(tree.arena[root].parent, None, "root must have no parent");
        }
        black_height(tree, tree.root, None);

        let keys = tree.iter().map(|(key, _)| key).collect::<Vec<_>>();
        for window in keys.windows(2) {
            assert!(window[0] <= window[1], "in-order sequence must be sorted");
        }
    }

    fn black_height<T, U>(
        tree: &RbTree<T, U>,
        node: Option<Handle>,
        parent: Option<Handle>,
    ) -> usize
    where
        T: Ord,
    {
        let handle = match node {
            Some(handle) => handle,
            None => return 1,
        };
        let current = &tree.arena[handle];
        assert_eq!(current.parent, parent, "parent back-link mismatch");
        if current.color == Color::Red {
            assert!(
                !tree.is_red(current.left) && !tree.is_red(current.right),
                "red node with a red child",
            );
        }
        if let Some(left) = current.left {
            assert!(tree.arena[left].entry.key <= current.entry.key);
        }
        if let Some(right) = current.right {
            assert!(tree.arena[right].entry.key >= current.entry.key);
        }

        let left_height = black_height(tree, current.left, Some(handle));
        let right_height = black_height(tree, current.right, Some(handle));
        assert_eq!(left_height, right_height, "black-height mismatch");

        left_height
            + match current.color {
                Color::Black => 1,
                Color::Red => 0,
            }
    }

    fn height<T, U>(tree: &RbTree<T, U>, node: Option<Handle>) -> usize {
        match node {
            Some(handle) => {
                let left = height(tree, tree.arena[handle].left);
                let right = height(tree, tree.arena[handle].right);
                1 + left.max(right)
            }
            None => 0,
        }
    }

    #[test]
    fn test_len_empty() {
        let tree: RbTree<u32, u32> = RbTree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let tree: RbTree<u32, u32> = RbTree::new();
        assert!(tree.min().is_null());
        assert!(tree.max().is_null());
    }

    #[test]
    fn test_insert_scenario() {
        let mut tree = RbTree::new();
        for key in [10, 5, 15, 3, 7, 12, 18].iter() {
            tree.insert(*key, *key);
            check_invariants(&tree);
        }

        let keys = tree.iter().map(|(key, _)| *key).collect::<Vec<u32>>();
        assert_eq!(keys, vec![3, 5, 7, 10, 12, 15, 18]);
    }

    #[test]
    fn test_ascending_insert_rebalances() {
        let mut tree = RbTree::new();
        for key in 1..=7 {
            tree.insert(key, key);
            check_invariants(&tree);
        }

        // A naive unbalanced tree would be a 7-deep spine.
        assert!(height(&tree, tree.root) <= 6);
    }

    #[test]
    fn test_find_round_trip() {
        let mut tree = RbTree::new();
        tree.insert(1, 10);
        tree.insert(3, 30);

        let position = tree.find(&3);
        assert_eq!(tree.get(position), Some((&3, &30)));

        assert_eq!(tree.erase(position), Some((3, 30)));
        assert!(tree.find(&3).is_null());
        assert!(!tree.contains(&3));
        assert!(tree.contains(&1));
    }

    #[test]
    fn test_get_mut() {
        let mut tree = RbTree::new();
        tree.insert(1, 10);

        let position = tree.find(&1);
        *tree.get_mut(position).unwrap() = 20;
        assert_eq!(tree.get(position), Some((&1, &20)));
    }

    #[test]
    fn test_erase_null_is_noop() {
        let mut tree: RbTree<u32, u32> = RbTree::new();
        assert_eq!(tree.erase(Position::null()), None);
    }

    #[test]
    fn test_erase_stale_position_is_noop() {
        let mut tree = RbTree::new();
        let position = tree.insert(1, 10);
        assert_eq!(tree.erase(position), Some((1, 10)));
        assert_eq!(tree.erase(position), None);
    }

    #[test]
    fn test_duplicate_insert() {
        let mut tree = RbTree::new();
        tree.insert(5, 50);
        tree.insert(5, 51);
        check_invariants(&tree);

        assert_eq!(tree.len(), 2);
        let values = tree.iter().map(|(_, value)| *value).collect::<Vec<u32>>();
        assert!(values == vec![50, 51] || values == vec![51, 50]);

        // Each duplicate is erasable independently.
        assert!(tree.erase(tree.find(&5)).is_some());
        check_invariants(&tree);
        assert_eq!(tree.len(), 1);
        assert!(tree.erase(tree.find(&5)).is_some());
        assert!(tree.is_empty());
        assert!(tree.find(&5).is_null());
    }

    #[test]
    fn test_duplicate_chain_traversal() {
        let mut tree = RbTree::new();
        for (index, key) in [5, 2, 8, 5, 5, 5, 7, 5].iter().enumerate() {
            tree.insert(*key, index);
            check_invariants(&tree);
        }

        let forward = tree.iter().map(|(key, _)| *key).collect::<Vec<u32>>();
        assert_eq!(forward, vec![2, 5, 5, 5, 5, 5, 7, 8]);

        let mut backward = tree.iter().rev().map(|(key, _)| *key).collect::<Vec<u32>>();
        backward.reverse();
        assert_eq!(backward, forward);

        // Forward and backward walks visit the same nodes, values included.
        let forward_values = tree.iter().map(|(_, value)| *value).collect::<Vec<_>>();
        let mut backward_values = tree.iter().rev().map(|(_, value)| *value).collect::<Vec<_>>();
        backward_values.reverse();
        assert_eq!(forward_values, backward_values);
    }

    #[test]
    fn test_duplicates_erasable_independently() {
        let mut tree = RbTree::new();
        for key in [5, 2, 8, 5, 5, 1, 9, 5].iter() {
            tree.insert(*key, ());
        }

        for expected_remaining in (0..4).rev() {
            assert!(tree.erase(tree.find(&5)).is_some());
            check_invariants(&tree);
            assert_eq!(tree.iter().filter(|(key, _)| **key == 5).count(), expected_remaining);
        }
        assert!(tree.find(&5).is_null());
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_erase_root_until_empty() {
        let mut tree = RbTree::new();
        for key in [10, 5, 15, 3, 7, 12, 18].iter() {
            tree.insert(*key, *key);
        }

        while tree.root.is_some() {
            assert!(tree.erase(Position(tree.root)).is_some());
            check_invariants(&tree);
        }
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn test_size_consistency() {
        let mut tree = RbTree::new();
        for key in 0..100u32 {
            tree.insert(key % 10, key);
        }
        assert_eq!(tree.len(), 100);

        for key in 0..5u32 {
            assert!(tree.erase(tree.find(&key)).is_some());
        }
        check_invariants(&tree);
        assert_eq!(tree.len(), 95);
    }

    #[test]
    fn test_successor_predecessor() {
        let mut tree = RbTree::new();
        for key in [4, 2, 6, 1, 3, 5, 7].iter() {
            tree.insert(*key, ());
        }

        let mut position = tree.min();
        let mut keys = Vec::new();
        while let Some((key, _)) = tree.get(position) {
            keys.push(*key);
            position = tree.successor(position);
        }
        assert_eq!(keys, vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(position.is_null());
        assert!(tree.successor(position).is_null());

        let mut position = tree.max();
        let mut keys = Vec::new();
        while let Some((key, _)) = tree.get(position) {
            keys.push(*key);
            position = tree.predecessor(position);
        }
        assert_eq!(keys, vec![7, 6, 5, 4, 3, 2, 1]);
        assert!(position.is_null());
    }

    #[test]
    fn test_clear_idempotent() {
        let mut tree = RbTree::new();
        tree.insert(1, 10);
        tree.clear();
        assert_eq!(tree.len(), 0);
        tree.clear();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_merge() {
        let mut tree = RbTree::new();
        for key in [1, 3, 5].iter() {
            tree.insert(*key, *key);
        }
        let mut other = RbTree::new();
        for key in [2, 3, 6].iter() {
            other.insert(*key, *key);
        }

        tree.merge(&mut other);
        check_invariants(&tree);

        assert!(other.is_empty());
        assert_eq!(tree.len(), 6);
        let keys = tree.iter().map(|(key, _)| *key).collect::<Vec<u32>>();
        assert_eq!(keys, vec![1, 2, 3, 3, 5, 6]);
    }

    #[test]
    fn test_merge_into_empty() {
        let mut tree = RbTree::new();
        let mut other = RbTree::new();
        other.insert(1, 10);

        tree.merge(&mut other);
        assert_eq!(tree.len(), 1);
        assert!(other.is_empty());
    }

    #[test]
    fn test_into_iter() {
        let mut tree = RbTree::new();
        tree.insert(1, 2);
        tree.insert(5, 6);
        tree.insert(3, 4);

        assert_eq!(
            tree.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_iter_double_ended() {
        let mut tree = RbTree::new();
        tree.insert(1, 10);
        tree.insert(2, 20);
        tree.insert(3, 30);

        let mut iterator = tree.iter();
        assert_eq!(iterator.next(), Some((&1, &10)));
        assert_eq!(iterator.next_back(), Some((&3, &30)));
        assert_eq!(iterator.next(), Some((&2, &20)));
        assert_eq!(iterator.next(), None);
        assert_eq!(iterator.next_back(), None);
    }
}
