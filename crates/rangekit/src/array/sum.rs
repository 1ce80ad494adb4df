use crate::{
    Error,
    InvertibleCombiner,
    range::{check_index, into_range, try_into_range},
};
use core::ops::{Range, RangeBounds};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "profiler")]
use crate::stats::Stats;
#[cfg(feature = "profiler")]
use rangekit_stats::profile_scope;

/// A prefix array answering range queries in O(1)
///
/// Slot `i` holds the combination of the first `i` values, so any range is the
/// inverse-combination of two slots. Point updates rewrite every later slot.
///
/// # Example
///
/// ```
/// use rangekit::{SumArray, combiner::Sum};
///
/// let mut array = SumArray::new(&[5i64, 1, 2, 9, 3, 1, 8, 3], Sum);
/// assert_eq!(array.query(2..6), 15);
/// array.update(2, 3);
/// array.update(3, -2);
/// assert_eq!(array.query(2..6), 16);
/// ```
#[derive(Clone, Debug)]
pub struct SumArray<T, C> {
    prefix: Vec<T>,
    combiner: C,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

impl<T: Copy, C: InvertibleCombiner<T>> SumArray<T, C> {
    /// Builds the prefix slots over `values` in O(n)
    pub fn new(values: &[T], combiner: C) -> Self {
        #[cfg(feature = "profiler")]
        let stats = Stats::default();
        #[cfg(feature = "profiler")]
        profile_scope!(&stats.build);

        let mut prefix = Vec::with_capacity(values.len() + 1);
        let mut acc = combiner.zero();
        prefix.push(acc);
        for &value in values {
            acc = combiner.combine(acc, value);
            prefix.push(acc);
        }
        log::debug!("built prefix array over {} values", values.len());
        Self {
            prefix,
            combiner,
            #[cfg(feature = "profiler")]
            stats,
        }
    }

    /// Returns the number of values
    pub fn len(&self) -> usize {
        self.prefix.len() - 1
    }

    /// Returns `true` if there are no values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn get(&self, index: usize) -> T {
        check_index(index, self.len());
        self.between(index, index + 1)
    }

    /// Combines the values within `range` in O(1)
    ///
    /// # Panics
    ///
    /// Panics if the start of the range is greater than its end or if the end is
    /// greater than the number of values
    #[inline]
    pub fn query<R>(&self, range: R) -> T
    where
        R: RangeBounds<usize>,
    {
        let Range { start, end } = into_range(&range, self.len());
        self.between(start, end)
    }

    /// Combines the values within `range`, reporting invalid ranges as errors
    pub fn try_query<R>(&self, range: R) -> Result<T, Error>
    where
        R: RangeBounds<usize>,
    {
        let Range { start, end } = try_into_range(&range, self.len())?;
        Ok(self.between(start, end))
    }

    /// Combines `delta` into the value at `index` in O(n)
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn update(&mut self, index: usize, delta: T) {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        check_index(index, self.len());
        for slot in &mut self.prefix[index + 1..] {
            *slot = self.combiner.combine(*slot, delta);
        }
    }

    /// Overwrites the value at `index` in O(n)
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn set(&mut self, index: usize, value: T) {
        let current = self.get(index);
        self.update(index, self.combiner.combine_inverse(value, current));
    }

    /// Returns the latency stats of the array
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    #[inline]
    fn between(&self, start: usize, end: usize) -> T {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        self.combiner
            .combine_inverse(self.prefix[end], self.prefix[start])
    }
}
