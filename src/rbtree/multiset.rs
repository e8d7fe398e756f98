use crate::rbtree::tree::{RbTree, RbTreeIntoIter, RbTreeIter};
use std::borrow::Borrow;
use std::iter::FromIterator;

/// An ordered multiset, a set permitting duplicate keys.
///
/// Wraps the red-black tree directly: where the map and set check for an
/// existing key first, the multiset leans on the tree's duplicate-chaining
/// insertion path, which places an equal key adjacent to its duplicates in
/// the in-order sequence.
///
/// # Examples
///
/// ```
/// use ordered_collections::rbtree::RbMultiset;
///
/// let mut multiset = RbMultiset::new();
/// multiset.insert(5);
/// multiset.insert(5);
/// multiset.insert(3);
///
/// assert_eq!(multiset.len(), 3);
/// assert_eq!(multiset.count(&5), 2);
///
/// assert_eq!(multiset.remove(&5), Some(5));
/// assert_eq!(multiset.count(&5), 1);
/// ```
pub struct RbMultiset<T> {
    tree: RbTree<T, ()>,
    len: usize,
}

impl<T> RbMultiset<T> {
    /// Constructs a new, empty `RbMultiset<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMultiset;
    ///
    /// let multiset: RbMultiset<u32> = RbMultiset::new();
    /// ```
    pub fn new() -> Self {
        RbMultiset {
            tree: RbTree::new(),
            len: 0,
        }
    }

    /// Inserts a key into the multiset. Insertion never fails; a key equal to
    /// one already present chains next to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMultiset;
    ///
    /// let mut multiset = RbMultiset::new();
    /// multiset.insert(1);
    /// multiset.insert(1);
    /// assert_eq!(multiset.len(), 2);
    /// ```
    pub fn insert(&mut self, key: T)
    where
        T: Ord,
    {
        self.tree.insert(key, ());
        self.len += 1;
    }

    /// Removes one occurrence of a key from the multiset and returns it, or
    /// `None` if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMultiset;
    ///
    /// let mut multiset = RbMultiset::new();
    /// multiset.insert(1);
    /// multiset.insert(1);
    /// assert_eq!(multiset.remove(&1), Some(1));
    /// assert_eq!(multiset.remove(&1), Some(1));
    /// assert_eq!(multiset.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let position = self.tree.find(key);
        let removed = self.tree.erase(position);
        if removed.is_some() {
            self.len -= 1;
        }
        removed.map(|pair| pair.0)
    }

    /// Checks if a key exists in the multiset.
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.contains(key)
    }

    /// Returns the number of occurrences of a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMultiset;
    ///
    /// let mut multiset = RbMultiset::new();
    /// multiset.insert(1);
    /// multiset.insert(1);
    /// multiset.insert(2);
    /// assert_eq!(multiset.count(&1), 2);
    /// assert_eq!(multiset.count(&3), 0);
    /// ```
    pub fn count<V>(&self, key: &V) -> usize
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.iter().filter(|other| (**other).borrow() == key).count()
    }

    /// Returns the first key that is not less than `key`, or `None` if every
    /// key is smaller.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMultiset;
    ///
    /// let mut multiset = RbMultiset::new();
    /// multiset.insert(1);
    /// multiset.insert(3);
    /// assert_eq!(multiset.lower_bound(&2), Some(&3));
    /// assert_eq!(multiset.lower_bound(&3), Some(&3));
    /// assert_eq!(multiset.lower_bound(&4), None);
    /// ```
    pub fn lower_bound<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.iter().find(|other| (**other).borrow() >= key)
    }

    /// Returns the first key that is strictly greater than `key`, or `None`
    /// if every key is at most `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMultiset;
    ///
    /// let mut multiset = RbMultiset::new();
    /// multiset.insert(1);
    /// multiset.insert(3);
    /// assert_eq!(multiset.upper_bound(&0), Some(&1));
    /// assert_eq!(multiset.upper_bound(&1), Some(&3));
    /// assert_eq!(multiset.upper_bound(&3), None);
    /// ```
    pub fn upper_bound<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.iter().find(|other| (**other).borrow() > key)
    }

    /// Returns the number of elements in the multiset, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the multiset is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the multiset, removing all keys.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }

    /// Returns the minimum key of the multiset. Returns `None` if the
    /// multiset is empty.
    pub fn min(&self) -> Option<&T> {
        self.tree.get(self.tree.min()).map(|(key, _)| key)
    }

    /// Returns the maximum key of the multiset. Returns `None` if the
    /// multiset is empty.
    pub fn max(&self) -> Option<&T> {
        self.tree.get(self.tree.max()).map(|(key, _)| key)
    }

    /// Drains every key of `other` into this multiset, duplicates and all,
    /// leaving `other` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMultiset;
    ///
    /// let mut multiset = RbMultiset::new();
    /// multiset.insert(1);
    ///
    /// let mut other = RbMultiset::new();
    /// other.insert(1);
    /// other.insert(2);
    ///
    /// multiset.merge(&mut other);
    /// assert_eq!(multiset.len(), 3);
    /// assert!(other.is_empty());
    /// ```
    pub fn merge(&mut self, other: &mut RbMultiset<T>)
    where
        T: Ord,
    {
        self.tree.merge(&mut other.tree);
        self.len += other.len;
        other.len = 0;
    }

    /// Returns an iterator over the multiset. The iterator will yield keys
    /// using in-order traversal, equal keys adjacent.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::rbtree::RbMultiset;
    ///
    /// let mut multiset = RbMultiset::new();
    /// multiset.insert(3);
    /// multiset.insert(1);
    /// multiset.insert(3);
    ///
    /// let mut iterator = multiset.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RbMultisetIter<'_, T> {
        RbMultisetIter {
            tree_iter: self.tree.iter(),
        }
    }
}

impl<T> Default for RbMultiset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for RbMultiset<T> {
    type IntoIter = RbMultisetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            tree_iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RbMultiset<T>
where
    T: 'a,
{
    type IntoIter = RbMultisetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Extend<T> for RbMultiset<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> FromIterator<T> for RbMultiset<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut multiset = RbMultiset::new();
        multiset.extend(iter);
        multiset
    }
}

/// An owning iterator for `RbMultiset<T>`.
///
/// This iterator traverses the elements of the multiset in-order and yields
/// owned keys.
pub struct RbMultisetIntoIter<T> {
    tree_iter: RbTreeIntoIter<T, ()>,
}

impl<T> Iterator for RbMultisetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|pair| pair.0)
    }
}

/// An iterator for `RbMultiset<T>`.
///
/// This iterator traverses the elements of the multiset in-order and yields
/// immutable references.
pub struct RbMultisetIter<'a, T> {
    tree_iter: RbTreeIter<'a, T, ()>,
}

impl<'a, T> Iterator for RbMultisetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|pair| pair.0)
    }
}

impl<'a, T> DoubleEndedIterator for RbMultisetIter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree_iter.next_back().map(|pair| pair.0)
    }
}

#[cfg(test)]
mod tests {
    use super::RbMultiset;

    #[test]
    fn test_len_empty() {
        let multiset: RbMultiset<u32> = RbMultiset::new();
        assert_eq!(multiset.len(), 0);
        assert!(multiset.is_empty());
    }

    #[test]
    fn test_insert_duplicates() {
        let mut multiset = RbMultiset::new();
        multiset.insert(5);
        multiset.insert(5);

        assert_eq!(multiset.len(), 2);
        assert_eq!(multiset.count(&5), 2);
        assert_eq!(multiset.iter().collect::<Vec<&u32>>(), vec![&5, &5]);
    }

    #[test]
    fn test_remove_one_occurrence_at_a_time() {
        let mut multiset = RbMultiset::new();
        multiset.insert(5);
        multiset.insert(5);
        multiset.insert(3);

        assert_eq!(multiset.remove(&5), Some(5));
        assert_eq!(multiset.len(), 2);
        assert_eq!(multiset.count(&5), 1);

        assert_eq!(multiset.remove(&5), Some(5));
        assert_eq!(multiset.remove(&5), None);
        assert!(multiset.contains(&3));
    }

    #[test]
    fn test_count() {
        let mut multiset = RbMultiset::new();
        for key in [1, 2, 2, 3, 3, 3].iter() {
            multiset.insert(*key);
        }

        assert_eq!(multiset.count(&1), 1);
        assert_eq!(multiset.count(&2), 2);
        assert_eq!(multiset.count(&3), 3);
        assert_eq!(multiset.count(&4), 0);
    }

    #[test]
    fn test_bounds() {
        let mut multiset = RbMultiset::new();
        for key in [1, 3, 3, 5].iter() {
            multiset.insert(*key);
        }

        assert_eq!(multiset.lower_bound(&0), Some(&1));
        assert_eq!(multiset.lower_bound(&3), Some(&3));
        assert_eq!(multiset.upper_bound(&3), Some(&5));
        assert_eq!(multiset.upper_bound(&5), None);
    }

    #[test]
    fn test_min_max() {
        let mut multiset = RbMultiset::new();
        multiset.insert(3);
        multiset.insert(1);
        multiset.insert(3);

        assert_eq!(multiset.min(), Some(&1));
        assert_eq!(multiset.max(), Some(&3));
    }

    #[test]
    fn test_merge_keeps_duplicates() {
        let mut multiset = RbMultiset::new();
        multiset.insert(1);
        multiset.insert(2);

        let mut other = RbMultiset::new();
        other.insert(2);
        other.insert(3);

        multiset.merge(&mut other);

        assert!(other.is_empty());
        assert_eq!(multiset.len(), 4);
        assert_eq!(
            multiset.iter().collect::<Vec<&u32>>(),
            vec![&1, &2, &2, &3],
        );
    }

    #[test]
    fn test_clear() {
        let mut multiset = RbMultiset::new();
        multiset.insert(1);
        multiset.insert(1);
        multiset.clear();
        assert!(multiset.is_empty());
        assert_eq!(multiset.count(&1), 0);
    }

    #[test]
    fn test_into_iter() {
        let mut multiset = RbMultiset::new();
        multiset.insert(3);
        multiset.insert(1);
        multiset.insert(3);

        assert_eq!(multiset.into_iter().collect::<Vec<u32>>(), vec![1, 3, 3]);
    }

    #[test]
    fn test_iter_rev() {
        let mut multiset = RbMultiset::new();
        multiset.insert(3);
        multiset.insert(1);
        multiset.insert(3);

        assert_eq!(
            multiset.iter().rev().collect::<Vec<&u32>>(),
            vec![&3, &3, &1],
        );
    }

    #[test]
    fn test_from_iterator() {
        let multiset = vec![3, 1, 2, 3].into_iter().collect::<RbMultiset<u32>>();
        assert_eq!(multiset.len(), 4);
        assert_eq!(multiset.count(&3), 2);
    }
}
