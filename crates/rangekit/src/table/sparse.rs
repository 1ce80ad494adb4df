use crate::{
    Combiner,
    Error,
    combiner::{Max, Min},
    range::{check_index, into_range, try_into_range},
};
use core::ops::{Range, RangeBounds};

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

#[cfg(feature = "profiler")]
use crate::stats::Stats;
#[cfg(feature = "profiler")]
use rangekit_stats::profile_scope;

/// A sparse table answering range queries in O(1) after an O(n log n) build
///
/// Level `k` holds the aggregate of every window of `2^k` elements. A query covers
/// its range with two possibly overlapping windows, which is only correct for
/// idempotent combiners such as [Min], [Max] or [Gcd](crate::combiner::Gcd).
///
/// # Example
///
/// ```
/// use rangekit::SparseTable;
///
/// let mut table = SparseTable::min(&[5u32, 1, 2, 9, 3, 1, 8, 3]);
/// assert_eq!(table.query(2..5), Some(2));
/// table.update(3, 0);
/// assert_eq!(table.query(..), Some(0));
/// ```
#[derive(Clone, Debug)]
pub struct SparseTable<T, C> {
    len: usize,
    levels: usize,
    // level k starts at k * len, windows that would run past the end are unused
    table: Vec<T>,
    combiner: C,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

impl<T: Copy> SparseTable<T, Min>
where
    Min: Combiner<T>,
{
    /// Builds a range minimum table
    pub fn min(values: &[T]) -> Self {
        Self::new(values, Min)
    }
}

impl<T: Copy> SparseTable<T, Max>
where
    Max: Combiner<T>,
{
    /// Builds a range maximum table
    pub fn max(values: &[T]) -> Self {
        Self::new(values, Max)
    }
}

impl<T: Copy, C: Combiner<T>> SparseTable<T, C> {
    /// Builds a table over `values` with an idempotent `combiner`
    pub fn new(values: &[T], combiner: C) -> Self {
        #[cfg(feature = "profiler")]
        let stats = Stats::default();
        #[cfg(feature = "profiler")]
        profile_scope!(&stats.build);

        let len = values.len();
        let levels = if len == 0 { 0 } else { len.ilog2() as usize + 1 };
        let mut table = Self {
            len,
            levels,
            table: Vec::new(),
            combiner,
            #[cfg(feature = "profiler")]
            stats,
        };
        if let Some(&first) = values.first() {
            table.table = vec![first; levels * len];
            table.table[..len].copy_from_slice(values);
            for level in 1..levels {
                for start in 0..=len - (1 << level) {
                    table.pull(level, start);
                }
            }
        }
        log::debug!("built sparse table with {len} entries over {levels} levels");
        table
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the value at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn get(&self, index: usize) -> T {
        check_index(index, self.len);
        self.table[index]
    }

    /// Combines the values within `range` in O(1)
    ///
    /// Returns the identity of the combiner for an empty range, or `None` if it has none.
    ///
    /// # Panics
    ///
    /// Panics if the start of the range is greater than its end or if the end is
    /// greater than the number of entries
    #[inline]
    pub fn query<R>(&self, range: R) -> Option<T>
    where
        R: RangeBounds<usize>,
    {
        let Range { start, end } = into_range(&range, self.len);
        self.fold(start, end)
    }

    /// Combines the values within `range`, reporting invalid or unanswerable ranges as errors
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

        if start == end {
            return self.combiner.identity();
        }
        let level = (end - start).ilog2() as usize;
        let left = self.table[level * self.len + start];
        let right = self.table[level * self.len + end - (1 << level)];
        Some(self.combiner.combine(left, right))
    }

    /// Sets the value at `index` and recomputes every window containing it
    ///
    /// Level `k` has `2^k` such windows, so an update costs O(n) in the worst case.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn update(&mut self, index: usize, value: T) {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        check_index(index, self.len);
        self.table[index] = value;
        for level in 1..self.levels {
            let width = 1 << level;
            let first = (index + 1).saturating_sub(width);
            let last = index.min(self.len - width);
            for start in first..=last {
                self.pull(level, start);
            }
        }
        log::trace!("rebuilt sparse table windows around index {index}");
    }

    /// Returns the latency stats of the table
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    // recomputes window `start` of `level` from the two halves one level below
    #[inline]
    fn pull(&mut self, level: usize, start: usize) {
        let below = (level - 1) * self.len;
        let half = 1 << (level - 1);
        self.table[level * self.len + start] = self
            .combiner
            .combine(self.table[below + start], self.table[below + start + half]);
    }
}
