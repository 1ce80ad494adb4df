use crate::{
    Combiner,
    Error,
    combiner::{combine_or_insert, join, prepend_or_insert},
    range::{check_index, into_range, try_into_range},
};
use core::ops::{Range, RangeBounds};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "profiler")]
use crate::stats::Stats;
#[cfg(feature = "profiler")]
use rangekit_stats::profile_scope;

/// A segment tree answering range queries and point updates in O(log n)
///
/// Nodes are kept in a single buffer of `2n` slots: the leaves occupy `n..2n`
/// and node `i` aggregates nodes `2i` and `2i + 1`. Queries accumulate a left
/// and a right partial result separately, so non-commutative combiners are
/// folded in sequence order.
///
/// # Example
///
/// ```
/// use rangekit::{SegmentTree, combiner::Min};
///
/// let mut tree = SegmentTree::new(&[5i32, 1, 2, 9, 3, 1, 8, 3], Min);
/// assert_eq!(tree.query(2..6), Some(1));
/// tree.update(5, 7);
/// assert_eq!(tree.query(2..6), Some(2));
/// ```
#[derive(Clone, Debug)]
pub struct SegmentTree<T, C> {
    len: usize,
    nodes: Vec<T>,
    combiner: C,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

impl<T: Copy, C: Combiner<T>> SegmentTree<T, C> {
    /// Builds a tree over `values` in O(n)
    pub fn new(values: &[T], combiner: C) -> Self {
        #[cfg(feature = "profiler")]
        let stats = Stats::default();
        #[cfg(feature = "profiler")]
        profile_scope!(&stats.build);

        let len = values.len();
        // the first half is scratch until the internal nodes are computed below
        let mut nodes = Vec::with_capacity(2 * len);
        nodes.extend_from_slice(values);
        nodes.extend_from_slice(values);
        for i in (1..len).rev() {
            nodes[i] = combiner.combine(nodes[2 * i], nodes[2 * i + 1]);
        }
        log::debug!("built segment tree with {len} leaves");

        Self {
            len,
            nodes,
            combiner,
            #[cfg(feature = "profiler")]
            stats,
        }
    }

    /// Returns the number of leaves
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree has no leaves
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the combiner of the tree
    pub fn combiner(&self) -> &C {
        &self.combiner
    }

    /// Returns the current leaf values
    pub fn leaves(&self) -> &[T] {
        &self.nodes[self.len..]
    }

    /// Returns the value of leaf `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    #[inline]
    pub fn get(&self, index: usize) -> T {
        check_index(index, self.len);
        self.nodes[self.len + index]
    }

    /// Combines the leaves within `range`
    ///
    /// Returns the identity of the combiner for an empty range, or `None` if it has none.
    ///
    /// # Panics
    ///
    /// Panics if the start of the range is greater than its end or if the end is
    /// greater than the number of leaves
    #[inline]
    pub fn query<R>(&self, range: R) -> Option<T>
    where
        R: RangeBounds<usize>,
    {
        let Range { start, end } = into_range(&range, self.len);
        self.fold(start, end)
    }

    /// Combines the leaves within `range`, reporting invalid or unanswerable ranges as errors
    pub fn try_query<R>(&self, range: R) -> Result<T, Error>
    where
        R: RangeBounds<usize>,
    {
        let Range { start, end } = try_into_range(&range, self.len)?;
        self.fold(start, end).ok_or(Error::EmptyRange { at: start })
    }

    fn fold(&self, start: usize, end: usize) -> Option<T> {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        let (mut l, mut r) = (start + self.len, end + self.len);
        let (mut left, mut right) = (None, None);
        while l < r {
            if l & 1 == 1 {
                combine_or_insert(&self.combiner, &mut left, self.nodes[l]);
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                prepend_or_insert(&self.combiner, &mut right, self.nodes[r]);
            }
            l >>= 1;
            r >>= 1;
        }
        join(&self.combiner, left, right)
    }

    /// Sets leaf `index` to `value` and recomputes its ancestors
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn update(&mut self, index: usize, value: T) {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        check_index(index, self.len);
        let mut node = index + self.len;
        self.nodes[node] = value;
        while node > 1 {
            node >>= 1;
            self.nodes[node] = self
                .combiner
                .combine(self.nodes[2 * node], self.nodes[2 * node + 1]);
        }
    }

    /// Combines `value` into leaf `index`, e.g. adds it for a [Sum](crate::combiner::Sum) tree
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn combine_at(&mut self, index: usize, value: T) {
        let current = self.get(index);
        self.update(index, self.combiner.combine(current, value));
    }

    /// Returns the latency stats of the tree
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}
