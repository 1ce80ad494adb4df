use crate::{
    Error,
    LazyOps,
    combiner::combine_or_insert,
    range::{check_index, into_range, try_into_range},
};
use core::ops::{Range, RangeBounds};

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

#[cfg(feature = "profiler")]
use crate::stats::Stats;
#[cfg(feature = "profiler")]
use rangekit_stats::profile_scope;

/// Square root decomposition with O(sqrt n) range updates and range queries
///
/// The sequence is split into blocks of `floor(sqrt n)` elements. Each block keeps
/// its aggregate and a pending tag that has been applied to the aggregate but not
/// yet to the block's elements. Partially covered blocks are pushed down and
/// rebuilt, fully covered blocks only receive the tag.
///
/// # Example
///
/// ```
/// use rangekit::{RangeOp, SqrtArray, lazy::RangeSum};
///
/// let mut array = SqrtArray::new(&[5i64, 1, 2, 9, 3, 1, 8, 3], RangeSum);
/// array.update(1..5, RangeOp::Add(3));
/// assert_eq!(array.query(0..4), Some(26));
/// assert_eq!(array.query(2..7), Some(32));
/// ```
#[derive(Clone, Debug)]
pub struct SqrtArray<T, L, O> {
    values: Vec<T>,
    block_size: usize,
    aggregates: Vec<T>,
    tags: Vec<Option<L>>,
    ops: O,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

impl<T, L, O> SqrtArray<T, L, O>
where
    T: Copy,
    L: Copy,
    O: LazyOps<T, L>,
{
    /// Builds the blocks over `values` in O(n)
    pub fn new(values: &[T], ops: O) -> Self {
        #[cfg(feature = "profiler")]
        let stats = Stats::default();
        #[cfg(feature = "profiler")]
        profile_scope!(&stats.build);

        let block_size = values.len().isqrt().max(1);
        let mut aggregates = Vec::with_capacity(values.len().div_ceil(block_size));
        for block in values.chunks(block_size) {
            let mut aggregate = None;
            for &value in block {
                combine_or_insert(&ops, &mut aggregate, value);
            }
            aggregates.extend(aggregate);
        }
        let blocks = aggregates.len();
        log::debug!(
            "built sqrt array with {} values in {blocks} blocks of {block_size}",
            values.len()
        );
        Self {
            values: values.to_vec(),
            block_size,
            aggregates,
            tags: vec![None; blocks],
            ops,
            #[cfg(feature = "profiler")]
            stats,
        }
    }

    /// Returns the number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of values per block
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the value at `index` with any pending tag applied
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn get(&self, index: usize) -> T {
        check_index(index, self.values.len());
        self.resolved(index)
    }

    /// Combines the values within `range`
    ///
    /// Returns the identity of the operations for an empty range, or `None` if there is none.
    ///
    /// # Panics
    ///
    /// Panics if the start of the range is greater than its end or if the end is
    /// greater than the number of values
    pub fn query<R>(&self, range: R) -> Option<T>
    where
        R: RangeBounds<usize>,
    {
        let Range { start, end } = into_range(&range, self.values.len());
        self.fold(start, end)
    }

    /// Combines the values within `range`, reporting invalid or unanswerable ranges as errors
    pub fn try_query<R>(&self, range: R) -> Result<T, Error>
    where
        R: RangeBounds<usize>,
    {
        let Range { start, end } = try_into_range(&range, self.values.len())?;
        self.fold(start, end).ok_or(Error::EmptyRange { at: start })
    }

    fn fold(&self, start: usize, end: usize) -> Option<T> {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        if start == end {
            return self.ops.identity();
        }
        let mut acc = None;
        let mut i = start;
        while i < end {
            let block = i / self.block_size;
            let (block_start, block_end) = self.bounds(block);
            if i == block_start && block_end <= end {
                combine_or_insert(&self.ops, &mut acc, self.aggregates[block]);
                i = block_end;
            } else {
                combine_or_insert(&self.ops, &mut acc, self.resolved(i));
                i += 1;
            }
        }
        acc
    }

    /// Applies `tag` to every value within `range`
    ///
    /// An empty range leaves the array untouched.
    ///
    /// # Panics
    ///
    /// Panics if the start of the range is greater than its end or if the end is
    /// greater than the number of values
    pub fn update<R>(&mut self, range: R, tag: L)
    where
        R: RangeBounds<usize>,
    {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        let Range { start, end } = into_range(&range, self.values.len());
        let mut i = start;
        while i < end {
            let block = i / self.block_size;
            let (block_start, block_end) = self.bounds(block);
            if i == block_start && block_end <= end {
                self.aggregates[block] =
                    self.ops
                        .apply(self.aggregates[block], tag, block_end - block_start);
                if let Some(pending) = &mut self.tags[block] {
                    self.ops.compose(tag, pending);
                } else {
                    self.tags[block] = Some(tag);
                }
            } else {
                self.push(block);
                for value in &mut self.values[i..block_end.min(end)] {
                    *value = self.ops.apply(*value, tag, 1);
                }
                self.rebuild(block);
            }
            i = block_end;
        }
    }

    /// Overwrites the value at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn set(&mut self, index: usize, value: T) {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        check_index(index, self.values.len());
        let block = index / self.block_size;
        self.push(block);
        self.values[index] = value;
        self.rebuild(block);
    }

    /// Returns every value with pending tags applied
    pub fn to_vec(&self) -> Vec<T> {
        (0..self.values.len()).map(|i| self.resolved(i)).collect()
    }

    /// Returns the latency stats of the array
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    #[inline]
    fn bounds(&self, block: usize) -> (usize, usize) {
        let start = block * self.block_size;
        (start, (start + self.block_size).min(self.values.len()))
    }

    #[inline]
    fn resolved(&self, index: usize) -> T {
        let value = self.values[index];
        match self.tags[index / self.block_size] {
            Some(tag) => self.ops.apply(value, tag, 1),
            None => value,
        }
    }

    // applies the pending tag of `block` to its values
    fn push(&mut self, block: usize) {
        if let Some(tag) = self.tags[block].take() {
            let (start, end) = self.bounds(block);
            for value in &mut self.values[start..end] {
                *value = self.ops.apply(*value, tag, 1);
            }
            log::trace!("pushed pending tag into block {block}");
        }
    }

    fn rebuild(&mut self, block: usize) {
        let (start, end) = self.bounds(block);
        let mut aggregate = None;
        for &value in &self.values[start..end] {
            combine_or_insert(&self.ops, &mut aggregate, value);
        }
        if let Some(aggregate) = aggregate {
            self.aggregates[block] = aggregate;
        }
    }
}
