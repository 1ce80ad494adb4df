use crate::{
    Error,
    range::{check_index, into_range, try_into_range},
};
use core::ops::{Range, RangeBounds};
use hashbrown::HashMap;
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

#[cfg(feature = "profiler")]
use crate::stats::Stats;
#[cfg(feature = "profiler")]
use rangekit_stats::profile_scope;

/// Largest supported block size, bounded by the 64-bit shape codes
const MAX_BLOCK_SIZE: usize = 32;

/// Range extremum queries in O(1) with O(n) construction for typical inputs
///
/// The sequence is cut into blocks of `b` elements. A sparse table over the
/// per-block winners answers the part of a query spanning whole blocks. Every
/// block is reduced to the shape of its Cartesian tree, and blocks sharing a
/// shape share one `b x b` table with the winner of each in-block range.
///
/// `better(a, b)` must be a strict weak order returning `true` when `a` should
/// win over `b`. Among equivalent candidates the leftmost one wins.
///
/// # Example
///
/// ```
/// use rangekit::OptimalRmq;
///
/// let rmq = OptimalRmq::min(&[5u32, 1, 2, 9, 3, 1, 8, 3]);
/// assert_eq!(rmq.query(2..5), Some(2));
/// assert_eq!(rmq.query_index(0..8), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct OptimalRmq<T, F> {
    values: Vec<T>,
    better: F,
    block_size: usize,
    // shape id of every block
    shapes: Vec<usize>,
    // per shape, winner offset for every in-block range [i, j] at i * b + j
    answers: Vec<u8>,
    // sparse table of winning positions over whole blocks, level k starts at k * blocks
    winners: Vec<usize>,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

impl<T: Copy + PartialOrd> OptimalRmq<T, fn(&T, &T) -> bool> {
    /// Builds a range minimum structure
    pub fn min(values: &[T]) -> Self {
        Self::new(values, |a: &T, b: &T| a < b)
    }

    /// Builds a range maximum structure
    pub fn max(values: &[T]) -> Self {
        Self::new(values, |a: &T, b: &T| a > b)
    }
}

impl<T: Copy, F: Fn(&T, &T) -> bool> OptimalRmq<T, F> {
    /// Builds the structure with a block size derived from the input length
    pub fn new(values: &[T], better: F) -> Self {
        let bits = (usize::BITS - values.len().leading_zeros()) as usize;
        Self::with_block_size(values, better, (bits / 4).clamp(2, MAX_BLOCK_SIZE))
    }

    /// Builds the structure with an explicit block size
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero or greater than 32
    pub fn with_block_size(values: &[T], better: F, block_size: usize) -> Self {
        assert!(
            (1..=MAX_BLOCK_SIZE).contains(&block_size),
            "block size {block_size} must be within 1..={MAX_BLOCK_SIZE}"
        );
        #[cfg(feature = "profiler")]
        let stats = Stats::default();
        #[cfg(feature = "profiler")]
        profile_scope!(&stats.build);

        let mut rmq = Self {
            values: values.to_vec(),
            better,
            block_size,
            shapes: Vec::new(),
            answers: Vec::new(),
            winners: Vec::new(),
            #[cfg(feature = "profiler")]
            stats,
        };
        rmq.build_blocks();
        rmq.build_winners();
        log::debug!(
            "built optimal rmq over {} values with block size {block_size} and {} block shapes",
            rmq.values.len(),
            rmq.answers.len() / (block_size * block_size)
        );
        rmq
    }

    /// Returns the number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the block size in use
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the value at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds
    pub fn get(&self, index: usize) -> T {
        check_index(index, self.values.len());
        self.values[index]
    }

    /// Returns the winning value within `range`, or `None` if the range is empty
    ///
    /// # Panics
    ///
    /// Panics if the start of the range is greater than its end or if the end is
    /// greater than the number of values
    #[inline]
    pub fn query<R>(&self, range: R) -> Option<T>
    where
        R: RangeBounds<usize>,
    {
        self.query_index(range).map(|index| self.values[index])
    }

    /// Returns the position of the leftmost winner within `range`, or `None` if the range is empty
    ///
    /// # Panics
    ///
    /// Panics if the start of the range is greater than its end or if the end is
    /// greater than the number of values
    pub fn query_index<R>(&self, range: R) -> Option<usize>
    where
        R: RangeBounds<usize>,
    {
        let Range { start, end } = into_range(&range, self.values.len());
        self.position(start, end)
    }

    /// Returns the winning value within `range`, reporting invalid or empty ranges as errors
    pub fn try_query<R>(&self, range: R) -> Result<T, Error>
    where
        R: RangeBounds<usize>,
    {
        let Range { start, end } = try_into_range(&range, self.values.len())?;
        self.position(start, end)
            .map(|index| self.values[index])
            .ok_or(Error::EmptyRange { at: start })
    }

    /// Returns the latency stats of the structure
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    fn position(&self, start: usize, end: usize) -> Option<usize> {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        if start == end {
            return None;
        }
        let b = self.block_size;
        let last = end - 1;
        let (first_block, last_block) = (start / b, last / b);
        if first_block == last_block {
            return Some(self.in_block(first_block, start % b, last % b));
        }

        let head = self.in_block(first_block, start % b, b - 1);
        let tail = self.in_block(last_block, 0, last % b);
        let winner = match self.across_blocks(first_block + 1, last_block) {
            Some(middle) => self.pick(head, middle),
            None => head,
        };
        Some(self.pick(winner, tail))
    }

    // leftmost winner among `left` and `right` where `left < right`
    #[inline]
    fn pick(&self, left: usize, right: usize) -> usize {
        if (self.better)(&self.values[right], &self.values[left]) {
            right
        } else {
            left
        }
    }

    #[inline]
    fn in_block(&self, block: usize, from: usize, to: usize) -> usize {
        let b = self.block_size;
        let offset = self.answers[self.shapes[block] * b * b + from * b + to];
        block * b + offset as usize
    }

    fn across_blocks(&self, first: usize, end: usize) -> Option<usize> {
        if first == end {
            return None;
        }
        let blocks = self.shapes.len();
        let level = (end - first).ilog2() as usize;
        let left = self.winners[level * blocks + first];
        let right = self.winners[level * blocks + end - (1 << level)];
        Some(self.pick(left, right))
    }

    // assigns every block a shape id and fills the answer table of each new shape
    fn build_blocks(&mut self) {
        let b = self.block_size;
        let mut ids: HashMap<(usize, u64), usize> = HashMap::new();
        let mut shapes = Vec::with_capacity(self.values.len().div_ceil(b));
        for block in self.values.chunks(b) {
            let key = (block.len(), self.shape_code(block));
            let next = ids.len();
            let id = *ids.entry(key).or_insert_with(|| {
                self.answers.resize((next + 1) * b * b, 0);
                let table = &mut self.answers[next * b * b..];
                for from in 0..block.len() {
                    let mut best = from;
                    for to in from..block.len() {
                        if (self.better)(&block[to], &block[best]) {
                            best = to;
                        }
                        table[from * b + to] = best as u8;
                    }
                }
                next
            });
            shapes.push(id);
        }
        self.shapes = shapes;
    }

    // encodes the Cartesian tree of `block`: a 1 bit per push, a 0 bit per pop
    fn shape_code(&self, block: &[T]) -> u64 {
        let mut stack: SmallVec<[usize; MAX_BLOCK_SIZE]> = SmallVec::new();
        let mut code = 0u64;
        for (i, value) in block.iter().enumerate() {
            while let Some(&top) = stack.last() {
                if !(self.better)(value, &block[top]) {
                    break;
                }
                stack.pop();
                code <<= 1;
            }
            stack.push(i);
            code = (code << 1) | 1;
        }
        code
    }

    fn build_winners(&mut self) {
        let blocks = self.shapes.len();
        if blocks == 0 {
            return;
        }
        let b = self.block_size;
        let levels = blocks.ilog2() as usize + 1;
        let mut winners = vec![0; levels * blocks];
        for (block, slot) in winners[..blocks].iter_mut().enumerate() {
            let last = (self.values.len() - block * b).min(b) - 1;
            *slot = self.in_block(block, 0, last);
        }
        for level in 1..levels {
            let half = 1 << (level - 1);
            for start in 0..=blocks - (1 << level) {
                let below = (level - 1) * blocks + start;
                winners[level * blocks + start] = self.pick(winners[below], winners[below + half]);
            }
        }
        self.winners = winners;
    }
}
