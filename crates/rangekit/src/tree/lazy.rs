use crate::{
    Combiner,
    Error,
    LazyOps,
    lazy::LazyFns,
    range::{check_index, into_range, try_into_range},
};
use core::ops::{Range, RangeBounds};

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

#[cfg(feature = "profiler")]
use crate::stats::Stats;
#[cfg(feature = "profiler")]
use rangekit_stats::profile_scope;

/// A segment tree supporting range updates and range queries in O(log n)
///
/// Node `v` has its children at `2v + 1` and `2v + 2`. Every node stores the
/// aggregate of its range together with an optional pending tag. A node's
/// aggregate already reflects its own tag; the tag is pushed one level down
/// right before either a query or an update descends below the node.
///
/// # Example
///
/// ```
/// use rangekit::{LazySegmentTree, RangeOp, lazy::RangeSum};
///
/// let mut tree = LazySegmentTree::new(&[5i64, 1, 2, 9, 3, 1, 8, 3], RangeSum);
/// tree.update(0..5, RangeOp::Add(3));
/// tree.update(1..4, RangeOp::Assign(-1));
/// assert_eq!(tree.query(1..7), Some(-3 + 6 + 1 + 8));
/// ```
#[derive(Clone, Debug)]
pub struct LazySegmentTree<T, L, O> {
    len: usize,
    values: Vec<T>,
    tags: Vec<Option<L>>,
    ops: O,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

impl<T, L, C, P, A> LazySegmentTree<T, L, LazyFns<C, P, A>>
where
    T: Copy,
    L: Copy,
    C: Combiner<T>,
    P: Fn(L, &mut L),
    A: Fn(T, L, usize) -> T,
{
    /// Builds a tree from a combiner, a tag composition and a tag application function
    ///
    /// See [LazyFns] for the expected behaviour of each function.
    pub fn from_fns(values: &[T], combine: C, compose: P, apply: A) -> Self {
        Self::new(values, LazyFns::new(combine, compose, apply))
    }
}

impl<T, L, O> LazySegmentTree<T, L, O>
where
    T: Copy,
    L: Copy,
    O: LazyOps<T, L>,
{
    /// Builds a tree over `values` in O(n)
    pub fn new(values: &[T], ops: O) -> Self {
        #[cfg(feature = "profiler")]
        let stats = Stats::default();
        #[cfg(feature = "profiler")]
        profile_scope!(&stats.build);

        let len = values.len();
        let size = if len == 0 {
            0
        } else {
            2 * len.next_power_of_two() - 1
        };
        let mut tree = Self {
            len,
            values: Vec::new(),
            tags: vec![None; size],
            ops,
            #[cfg(feature = "profiler")]
            stats,
        };
        if let Some(&first) = values.first() {
            tree.values = vec![first; size];
            tree.build(0, 0, len, values);
        }
        log::debug!("built lazy segment tree with {len} leaves and {size} nodes");
        tree
    }

    /// Returns the number of leaves
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree has no leaves
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the lazy operations of the tree
    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// Combines the leaves within `range`
    ///
    /// Returns the identity of the combiner for an empty range, or `None` if it has none.
    ///
    /// # Panics
    ///
    /// Panics if the start of the range is greater than its end or if the end is
    /// greater than the number of leaves
    pub fn query<R>(&mut self, range: R) -> Option<T>
    where
        R: RangeBounds<usize>,
    {
        let Range { start, end } = into_range(&range, self.len);
        self.fold(start, end)
    }

    /// Combines the leaves within `range`, reporting invalid or unanswerable ranges as errors
    pub fn try_query<R>(&mut self, range: R) -> Result<T, Error>
    where
        R: RangeBounds<usize>,
    {
        let Range { start, end } = try_into_range(&range, self.len)?;
        self.fold(start, end).ok_or(Error::EmptyRange { at: start })
    }

    fn fold(&mut self, start: usize, end: usize) -> Option<T> {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        if start == end {
            return self.ops.identity();
        }
        self.query_node(0, 0, self.len, start, end)
    }

    /// Applies `tag` to every leaf within `range`
    ///
    /// An empty range leaves the tree untouched.
    ///
    /// # Panics
    ///
    /// Panics if the start of the range is greater than its end or if the end is
    /// greater than the number of leaves
    pub fn update<R>(&mut self, range: R, tag: L)
    where
        R: RangeBounds<usize>,
    {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        let Range { start, end } = into_range(&range, self.len);
        if start < end {
            self.update_node(0, 0, self.len, start, end, tag);
        }
    }

    /// Returns the value of leaf `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn get(&mut self, index: usize) -> T {
        check_index(index, self.len);
        let (mut node, mut lo, mut hi) = (0, 0, self.len);
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            self.push(node, lo, mid, hi);
            if index < mid {
                (node, hi) = (2 * node + 1, mid);
            } else {
                (node, lo) = (2 * node + 2, mid);
            }
        }
        self.values[node]
    }

    /// Overwrites leaf `index` with `value`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn set(&mut self, index: usize, value: T) {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        check_index(index, self.len);
        self.set_node(0, 0, self.len, index, value);
    }

    /// Returns every leaf value with all pending tags applied
    pub fn to_vec(&mut self) -> Vec<T> {
        let mut leaves = Vec::with_capacity(self.len);
        if self.len > 0 {
            self.collect_node(0, 0, self.len, &mut leaves);
        }
        leaves
    }

    /// Returns the latency stats of the tree
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    fn build(&mut self, node: usize, lo: usize, hi: usize, values: &[T]) {
        if hi - lo == 1 {
            self.values[node] = values[lo];
            return;
        }
        let mid = lo + (hi - lo) / 2;
        self.build(2 * node + 1, lo, mid, values);
        self.build(2 * node + 2, mid, hi, values);
        self.pull(node);
    }

    #[inline]
    fn pull(&mut self, node: usize) {
        self.values[node] = self
            .ops
            .combine(self.values[2 * node + 1], self.values[2 * node + 2]);
    }

    #[inline]
    fn apply_tag(&mut self, node: usize, tag: L, len: usize) {
        self.values[node] = self.ops.apply(self.values[node], tag, len);
        // leaves have nothing to push to
        if len > 1 {
            if let Some(pending) = &mut self.tags[node] {
                self.ops.compose(tag, pending);
            } else {
                self.tags[node] = Some(tag);
            }
        }
    }

    #[inline]
    fn push(&mut self, node: usize, lo: usize, mid: usize, hi: usize) {
        if let Some(tag) = self.tags[node].take() {
            self.apply_tag(2 * node + 1, tag, mid - lo);
            self.apply_tag(2 * node + 2, tag, hi - mid);
        }
    }

    fn update_node(&mut self, node: usize, lo: usize, hi: usize, start: usize, end: usize, tag: L) {
        if end <= lo || hi <= start {
            return;
        }
        if start <= lo && hi <= end {
            self.apply_tag(node, tag, hi - lo);
            return;
        }
        let mid = lo + (hi - lo) / 2;
        self.push(node, lo, mid, hi);
        self.update_node(2 * node + 1, lo, mid, start, end, tag);
        self.update_node(2 * node + 2, mid, hi, start, end, tag);
        self.pull(node);
    }

    fn query_node(&mut self, node: usize, lo: usize, hi: usize, start: usize, end: usize) -> Option<T> {
        if end <= lo || hi <= start {
            return None;
        }
        if start <= lo && hi <= end {
            return Some(self.values[node]);
        }
        let mid = lo + (hi - lo) / 2;
        self.push(node, lo, mid, hi);
        let left = self.query_node(2 * node + 1, lo, mid, start, end);
        let right = self.query_node(2 * node + 2, mid, hi, start, end);
        match (left, right) {
            (Some(left), Some(right)) => Some(self.ops.combine(left, right)),
            (partial, None) | (None, partial) => partial,
        }
    }

    fn set_node(&mut self, node: usize, lo: usize, hi: usize, index: usize, value: T) {
        if hi - lo == 1 {
            self.values[node] = value;
            return;
        }
        let mid = lo + (hi - lo) / 2;
        self.push(node, lo, mid, hi);
        if index < mid {
            self.set_node(2 * node + 1, lo, mid, index, value);
        } else {
            self.set_node(2 * node + 2, mid, hi, index, value);
        }
        self.pull(node);
    }

    fn collect_node(&mut self, node: usize, lo: usize, hi: usize, leaves: &mut Vec<T>) {
        if hi - lo == 1 {
            leaves.push(self.values[node]);
            return;
        }
        let mid = lo + (hi - lo) / 2;
        self.push(node, lo, mid, hi);
        self.collect_node(2 * node + 1, lo, mid, leaves);
        self.collect_node(2 * node + 2, mid, hi, leaves);
    }
}
