use crate::{
    InvertibleCombiner,
    range::{check_index, into_range},
};
use core::ops::{Range, RangeBounds};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "profiler")]
use crate::stats::Stats;
#[cfg(feature = "profiler")]
use rangekit_stats::profile_scope;

/// A difference array with O(1) range updates and O(n) point queries
///
/// Slot `0` holds the first value and slot `i` the inverse-combination of value
/// `i` with value `i - 1`. A value is recovered by folding the slots up to it.
///
/// # Example
///
/// ```
/// use rangekit::{DifferenceArray, combiner::Sum};
///
/// let mut array = DifferenceArray::new(&[5i32, 1, 2, 9, 3, 1, 8, 3], Sum);
/// array.update(2..5, 4);
/// array.update(4..8, -3);
/// assert_eq!(array.query(4), 4);
/// ```
#[derive(Clone, Debug)]
pub struct DifferenceArray<T, C> {
    diffs: Vec<T>,
    combiner: C,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

impl<T: Copy, C: InvertibleCombiner<T>> DifferenceArray<T, C> {
    /// Builds the difference slots over `values` in O(n)
    pub fn new(values: &[T], combiner: C) -> Self {
        #[cfg(feature = "profiler")]
        let stats = Stats::default();
        #[cfg(feature = "profiler")]
        profile_scope!(&stats.build);

        let mut diffs = Vec::with_capacity(values.len());
        diffs.extend(values.first().copied());
        diffs.extend(
            values
                .windows(2)
                .map(|pair| combiner.combine_inverse(pair[1], pair[0])),
        );
        log::debug!("built difference array over {} values", values.len());
        Self {
            diffs,
            combiner,
            #[cfg(feature = "profiler")]
            stats,
        }
    }

    /// Returns the number of values
    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    /// Returns `true` if there are no values
    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    /// Combines `delta` into every value within `range` in O(1)
    ///
    /// An empty range leaves the array untouched.
    ///
    /// # Panics
    ///
    /// Panics if the start of the range is greater than its end or if the end is
    /// greater than the number of values
    pub fn update<R>(&mut self, range: R, delta: T)
    where
        R: RangeBounds<usize>,
    {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        let Range { start, end } = into_range(&range, self.diffs.len());
        if start == end {
            return;
        }
        self.diffs[start] = self.combiner.combine(self.diffs[start], delta);
        if end < self.diffs.len() {
            self.diffs[end] = self.combiner.combine_inverse(self.diffs[end], delta);
        }
    }

    /// Returns the value at `index` in O(n)
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn query(&self, index: usize) -> T {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        check_index(index, self.diffs.len());
        self.diffs[..=index]
            .iter()
            .fold(self.combiner.zero(), |acc, &diff| self.combiner.combine(acc, diff))
    }

    /// Returns every value in O(n)
    pub fn to_vec(&self) -> Vec<T> {
        self.diffs
            .iter()
            .scan(self.combiner.zero(), |acc, &diff| {
                *acc = self.combiner.combine(*acc, diff);
                Some(*acc)
            })
            .collect()
    }

    /// Returns the latency stats of the array
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}
