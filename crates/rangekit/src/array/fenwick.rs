use crate::{
    Error,
    InvertibleCombiner,
    range::{check_index, into_range, try_into_range},
};
use core::ops::{Range, RangeBounds};

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

#[cfg(feature = "profiler")]
use crate::stats::Stats;
#[cfg(feature = "profiler")]
use rangekit_stats::profile_scope;

/// A Fenwick (binary indexed) tree with O(log n) point updates and prefix queries
///
/// Slot `i` aggregates the values in `(i & (i + 1))..=i`. Range queries subtract
/// two prefixes, so the combiner must be invertible and commutative.
///
/// # Example
///
/// ```
/// use rangekit::{FenwickTree, combiner::Sum};
///
/// let mut tree = FenwickTree::from_slice(&[5i64, 1, 2, 9, 3, 1, 8, 3], Sum);
/// assert_eq!(tree.query(2..7), 23);
/// tree.update(4, 10);
/// assert_eq!(tree.prefix(5), 30);
/// ```
#[derive(Clone, Debug)]
pub struct FenwickTree<T, C> {
    tree: Vec<T>,
    combiner: C,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

impl<T: Copy, C: InvertibleCombiner<T>> FenwickTree<T, C> {
    /// Creates a tree of `len` zero elements
    pub fn new(len: usize, combiner: C) -> Self {
        let tree = vec![combiner.zero(); len];
        log::debug!("created fenwick tree with {len} slots");
        Self {
            tree,
            combiner,
            #[cfg(feature = "profiler")]
            stats: Stats::default(),
        }
    }

    /// Builds a tree over `values` in O(n)
    pub fn from_slice(values: &[T], combiner: C) -> Self {
        #[cfg(feature = "profiler")]
        let stats = Stats::default();
        #[cfg(feature = "profiler")]
        profile_scope!(&stats.build);

        let mut tree = values.to_vec();
        for i in 0..tree.len() {
            let parent = i | (i + 1);
            if parent < tree.len() {
                tree[parent] = combiner.combine(tree[parent], tree[i]);
            }
        }
        log::debug!("built fenwick tree with {} slots", tree.len());
        Self {
            tree,
            combiner,
            #[cfg(feature = "profiler")]
            stats,
        }
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the tree has no elements
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Combines `delta` into the element at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn update(&mut self, index: usize, delta: T) {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        check_index(index, self.tree.len());
        let mut i = index;
        while i < self.tree.len() {
            self.tree[i] = self.combiner.combine(self.tree[i], delta);
            i |= i + 1;
        }
    }

    /// Overwrites the element at `index` with `value`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn set(&mut self, index: usize, value: T) {
        let current = self.get(index);
        self.update(index, self.combiner.combine_inverse(value, current));
    }

    /// Returns the element at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn get(&self, index: usize) -> T {
        check_index(index, self.tree.len());
        self.between(index, index + 1)
    }

    /// Combines the elements in `0..end`
    ///
    /// # Panics
    ///
    /// Panics if `end` is greater than the number of elements
    pub fn prefix(&self, end: usize) -> T {
        let Range { end, .. } = into_range(&(..end), self.tree.len());
        self.prefix_unchecked(end)
    }

    /// Combines the elements within `range`
    ///
    /// # Panics
    ///
    /// Panics if the start of the range is greater than its end or if the end is
    /// greater than the number of elements
    #[inline]
    pub fn query<R>(&self, range: R) -> T
    where
        R: RangeBounds<usize>,
    {
        let Range { start, end } = into_range(&range, self.tree.len());
        self.between(start, end)
    }

    /// Combines the elements within `range`, reporting invalid ranges as errors
    pub fn try_query<R>(&self, range: R) -> Result<T, Error>
    where
        R: RangeBounds<usize>,
    {
        let Range { start, end } = try_into_range(&range, self.tree.len())?;
        Ok(self.between(start, end))
    }

    /// Returns the latency stats of the tree
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    fn between(&self, start: usize, end: usize) -> T {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        self.combiner
            .combine_inverse(self.prefix_unchecked(end), self.prefix_unchecked(start))
    }

    #[inline]
    fn prefix_unchecked(&self, end: usize) -> T {
        let mut acc = self.combiner.zero();
        let mut i = end;
        while i > 0 {
            acc = self.combiner.combine(acc, self.tree[i - 1]);
            i &= i - 1;
        }
        acc
    }
}
