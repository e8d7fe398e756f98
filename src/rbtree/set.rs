use crate::rbtree::map::{RbMap, RbMapIntoIter, RbMapIter};
use std::borrow::Borrow;
use std::iter::FromIterator;

/// An ordered set of unique keys, a thin layer over [`RbMap`] with unit
/// values.
///
/// # Examples
///
/// ```
/// use ordered_collections::rbtree::RbSet;
///
/// let mut set = RbSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.min(), Some(&0));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
pub struct RbSet<T> {
    map: RbMap<T, ()>,
}

impl<T> RbSet<T> {
    /// Constructs a new, empty `RbSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbSet;
    ///
    /// let set: RbSet<u32> = RbSet::new();
    /// ```
    pub fn new() -> Self {
        RbSet { map: RbMap::new() }
    }

    /// Inserts a key into the set. Returns `None` on success, and hands the
    /// rejected key back if it is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbSet;
    ///
    /// let mut set = RbSet::new();
    /// assert_eq!(set.insert(1), None);
    /// assert!(set.contains(&1));
    /// assert_eq!(set.insert(1), Some(1));
    /// ```
    pub fn insert(&mut self, key: T) -> Option<T>
    where
        T: Ord,
    {
        self.map.insert(key, ()).map(|pair| pair.0)
    }

    /// Removes a key from the set. If the key exists in the set, it will
    /// return the associated key. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbSet;
    ///
    /// let mut set = RbSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.remove(key).map(|pair| pair.0)
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbSet;
    ///
    /// let mut set = RbSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbSet;
    ///
    /// let mut set = RbSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    pub fn min(&self) -> Option<&T> {
        self.map.min()
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    pub fn max(&self) -> Option<&T> {
        self.map.max()
    }

    /// Drains every key of `other` into this set, leaving `other` empty. Keys
    /// already present in this set are dropped from `other` on the way over.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbSet;
    ///
    /// let mut set = RbSet::new();
    /// set.insert(1);
    ///
    /// let mut other = RbSet::new();
    /// other.insert(1);
    /// other.insert(2);
    ///
    /// set.merge(&mut other);
    /// assert_eq!(set.len(), 2);
    /// assert!(other.is_empty());
    /// ```
    pub fn merge(&mut self, other: &mut RbSet<T>)
    where
        T: Ord,
    {
        self.map.merge(&mut other.map);
    }

    /// Returns an iterator over the set. The iterator will yield keys using
    /// in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbSet;
    ///
    /// let mut set = RbSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RbSetIter<'_, T> {
        RbSetIter {
            map_iter: self.map.iter(),
        }
    }
}

impl<T> Default for RbSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for RbSet<T> {
    type IntoIter = RbSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            map_iter: self.map.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RbSet<T>
where
    T: 'a,
{
    type IntoIter = RbSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Extend<T> for RbSet<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> FromIterator<T> for RbSet<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = RbSet::new();
        set.extend(iter);
        set
    }
}

/// An owning iterator for `RbSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned
/// keys.
pub struct RbSetIntoIter<T> {
    map_iter: RbMapIntoIter<T, ()>,
}

impl<T> Iterator for RbSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

/// An iterator for `RbSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields
/// immutable references.
pub struct RbSetIter<'a, T> {
    map_iter: RbMapIter<'a, T, ()>,
}

impl<'a, T> Iterator for RbSetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

impl<'a, T> DoubleEndedIterator for RbSetIter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.map_iter.next_back().map(|pair| pair.0)
    }
}

#[cfg(test)]
mod tests {
    use super::RbSet;

    #[test]
    fn test_len_empty() {
        let set: RbSet<u32> = RbSet::new();
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let set: RbSet<u32> = RbSet::new();
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut set = RbSet::new();
        assert_eq!(set.insert(1), None);
        assert!(set.contains(&1));
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut set = RbSet::new();
        assert_eq!(set.insert(1), None);
        assert_eq!(set.insert(1), Some(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut set = RbSet::new();
        set.insert(1);
        assert_eq!(set.remove(&1), Some(1));
        assert!(!set.contains(&1));
    }

    #[test]
    fn test_min_max() {
        let mut set = RbSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&5));
    }

    #[test]
    fn test_merge() {
        let mut set = RbSet::new();
        set.insert(1);
        set.insert(2);

        let mut other = RbSet::new();
        other.insert(2);
        other.insert(3);

        set.merge(&mut other);

        assert!(other.is_empty());
        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    }

    #[test]
    fn test_into_iter() {
        let mut set = RbSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_iter() {
        let mut set = RbSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }

    #[test]
    fn test_iter_rev() {
        let mut set = RbSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().rev().collect::<Vec<&u32>>(), vec![&5, &3, &1]);
    }

    #[test]
    fn test_from_iterator() {
        let set = vec![3, 1, 2, 3].into_iter().collect::<RbSet<u32>>();
        assert_eq!(set.len(), 3);
    }
}
