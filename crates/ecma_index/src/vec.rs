use crate::Idx;
use std::fmt::{Debug, Formatter};
use std::iter::Map;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut, Range};

/// An owned sequence of `T` indexed by `I`
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IndexVec<I, T> {
    raw: Vec<T>,
    index: PhantomData<I>,
}

impl<I: Idx, T> IndexVec<I, T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            raw: Vec::new(),
            index: PhantomData,
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: Vec::with_capacity(capacity),
            index: PhantomData,
        }
    }

    #[inline]
    pub fn from_raw(raw: Vec<T>) -> Self {
        Self {
            raw,
            index: PhantomData,
        }
    }

    /// Appends `data` and returns the index it was stored at.
    #[inline]
    pub fn push(&mut self, data: T) -> I {
        let index = self.next_index();
        self.raw.push(data);
        index
    }

    #[inline]
    pub fn next_index(&self) -> I {
        I::new(self.raw.len())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[inline]
    pub fn get(&self, index: I) -> Option<&T> {
        self.raw.get(index.index())
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.raw.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.raw.iter_mut()
    }

    /// The valid indices. The iterator borrows neither the vector nor `T`.
    #[inline]
    pub fn indices(&self) -> Map<Range<usize>, fn(usize) -> I> {
        let new: fn(usize) -> I = I::new;
        (0..self.raw.len()).map(new)
    }

    #[inline]
    pub fn iter_enumerated(
        &self,
    ) -> impl DoubleEndedIterator<Item = (I, &T)> + ExactSizeIterator + '_ {
        self.raw.iter().enumerate().map(|(i, t)| (I::new(i), t))
    }

    #[inline]
    pub fn as_raw(&self) -> &[T] {
        &self.raw
    }

    #[inline]
    pub fn into_raw(self) -> Vec<T> {
        self.raw
    }
}

impl<I: Idx, T> Default for IndexVec<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Idx, T: Debug> Debug for IndexVec<I, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter_enumerated()).finish()
    }
}

impl<I: Idx, T> Index<I> for IndexVec<I, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        &self.raw[index.index()]
    }
}

impl<I: Idx, T> IndexMut<I> for IndexVec<I, T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.raw[index.index()]
    }
}

impl<I: Idx, T> FromIterator<T> for IndexVec<I, T> {
    #[inline]
    fn from_iter<Iter: IntoIterator<Item = T>>(iter: Iter) -> Self {
        Self::from_raw(Vec::from_iter(iter))
    }
}

impl<I: Idx, T> IntoIterator for IndexVec<I, T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.raw.into_iter()
    }
}

impl<'a, I: Idx, T> IntoIterator for &'a IndexVec<I, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.raw.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::IndexVec;

    crate::newtype_index! {
        struct NodeId;
    }

    #[test]
    fn push_returns_stable_indices() {
        let mut vec: IndexVec<NodeId, &str> = IndexVec::new();
        let a = vec.push("a");
        let b = vec.push("b");

        assert_eq!(vec[a], "a");
        assert_eq!(vec[b], "b");
        assert_eq!(vec.len(), 2);
        assert_eq!(vec.indices().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn indices_outlive_the_vector() {
        let indices = {
            let name = String::from("a");
            let vec: IndexVec<NodeId, &str> = [name.as_str(), "b"].into_iter().collect();
            vec.indices()
        };
        assert_eq!(indices.rev().map(NodeId::as_u32).collect::<Vec<_>>(), [1, 0]);
    }

    #[test]
    fn enumerates_in_insertion_order() {
        let vec: IndexVec<NodeId, u8> = [3, 1, 2].into_iter().collect();
        let pairs: Vec<_> = vec.iter_enumerated().map(|(i, v)| (i.as_u32(), *v)).collect();
        assert_eq!(pairs, vec![(0, 3), (1, 1), (2, 2)]);
    }
}
