use crate::rbtree::tree::{RbTree, RbTreeIntoIter, RbTreeIter};
use std::borrow::Borrow;
use std::iter::FromIterator;
use std::mem;
use std::ops::{Index, IndexMut};

/// An ordered map implemented by composing over a red-black tree.
///
/// The tree itself accepts duplicate keys, so the map enforces its unique-key
/// contract by checking for the key before inserting. It also maintains its
/// own length counter because the tree deliberately counts by traversal.
///
/// # Examples
///
/// ```
/// use ordered_collections::rbtree::RbMap;
///
/// let mut map = RbMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct RbMap<T, U> {
    tree: RbTree<T, U>,
    len: usize,
}

impl<T, U> RbMap<T, U> {
    /// Constructs a new, empty `RbMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMap;
    ///
    /// let map: RbMap<u32, u32> = RbMap::new();
    /// ```
    pub fn new() -> Self {
        RbMap {
            tree: RbTree::new(),
            len: 0,
        }
    }

    /// Inserts a key-value pair into the map. Returns `None` on success, and
    /// hands the rejected pair back if the key is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some((1, 2)));
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<(T, U)>
    where
        T: Ord,
    {
        if self.tree.contains(&key) {
            return Some((key, value));
        }
        self.tree.insert(key, value);
        self.len += 1;
        None
    }

    /// Inserts a key-value pair, replacing the value under an existing key.
    /// Returns the replaced value, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// assert_eq!(map.insert_or_assign(1, 1), None);
    /// assert_eq!(map.insert_or_assign(1, 2), Some(1));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert_or_assign(&mut self, key: T, value: U) -> Option<U>
    where
        T: Ord,
    {
        if self.tree.contains(&key) {
            let position = self.tree.find(&key);
            self.tree
                .get_mut(position)
                .map(|old_value| mem::replace(old_value, value))
        } else {
            self.tree.insert(key, value);
            self.len += 1;
            None
        }
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it
    /// will return the associated key-value pair. Otherwise it will return
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let position = self.tree.find(key);
        let removed = self.tree.erase(position);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.contains(key)
    }

    /// Returns an immutable reference to the value associated with a
    /// particular key. It will return `None` if the key does not exist in the
    /// map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.get(self.tree.find(key)).map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value associated with a particular
    /// key. Returns `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let position = self.tree.find(key);
        self.tree.get_mut(position)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMap;
    ///
    /// let map: RbMap<u32, u32> = RbMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree.get(self.tree.min()).map(|(key, _)| key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree.get(self.tree.max()).map(|(key, _)| key)
    }

    /// Drains every entry of `other` into this map, leaving `other` empty.
    /// Keys already present in this map keep their entries; the colliding
    /// entries from `other` are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, 1);
    ///
    /// let mut other = RbMap::new();
    /// other.insert(1, 10);
    /// other.insert(2, 2);
    ///
    /// map.merge(&mut other);
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert!(other.is_empty());
    /// ```
    pub fn merge(&mut self, other: &mut RbMap<T, U>)
    where
        T: Ord,
    {
        let drained = mem::replace(&mut other.tree, RbTree::new());
        other.len = 0;
        for (key, value) in drained {
            self.insert(key, value);
        }
    }

    /// Returns an iterator over the map. The iterator will yield key-value
    /// pairs using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RbMapIter<'_, T, U> {
        RbMapIter {
            tree_iter: self.tree.iter(),
        }
    }
}

impl<T, U> Default for RbMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U> IntoIterator for RbMap<T, U> {
    type IntoIter = RbMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            tree_iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a RbMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = RbMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, U> Extend<(T, U)> for RbMap<T, U>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = (T, U)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T, U> FromIterator<(T, U)> for RbMap<T, U>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = (T, U)>>(iter: I) -> Self {
        let mut map = RbMap::new();
        map.extend(iter);
        map
    }
}

/// An owning iterator for `RbMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields owned
/// entries.
pub struct RbMapIntoIter<T, U> {
    tree_iter: RbTreeIntoIter<T, U>,
}

impl<T, U> Iterator for RbMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next()
    }
}

/// An iterator for `RbMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields
/// immutable references.
pub struct RbMapIter<'a, T, U> {
    tree_iter: RbTreeIter<'a, T, U>,
}

impl<'a, T, U> Iterator for RbMapIter<'a, T, U> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next()
    }
}

impl<'a, T, U> DoubleEndedIterator for RbMapIter<'a, T, U> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree_iter.next_back()
    }
}

impl<'a, T, U, V> Index<&'a V> for RbMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, V> IndexMut<&'a V> for RbMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}
