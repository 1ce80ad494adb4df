use crate::{
    Combiner,
    Error,
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

/// A segment tree of segment trees answering rectangle queries in O(log R * log C)
///
/// The outer tree runs over rows and every outer node holds an inner tree over
/// columns. All of them share one `2R x 2C` arena. Rectangles are folded in no
/// particular order, so the combiner should be commutative.
///
/// # Example
///
/// ```
/// use rangekit::{SegmentTree2D, combiner::Sum};
///
/// let matrix = [[4i32, 2, 9, -3], [2, 0, 1, 0], [2, 6, 5, 4], [-2, 1, 8, 3]];
/// let mut tree = SegmentTree2D::new(&matrix, Sum);
/// assert_eq!(tree.query(1..4, 1..3), Some(21));
/// tree.update(1, 2, 5);
/// assert_eq!(tree.query(1..4, 1..3), Some(25));
/// ```
#[derive(Clone, Debug)]
pub struct SegmentTree2D<T, C> {
    rows: usize,
    cols: usize,
    arena: Vec<T>,
    combiner: C,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

impl<T: Copy, C: Combiner<T>> SegmentTree2D<T, C> {
    /// Builds a tree over a rectangular matrix in O(R * C)
    ///
    /// # Panics
    ///
    /// Panics if the rows of `matrix` differ in length
    pub fn new<Row: AsRef<[T]>>(matrix: &[Row], combiner: C) -> Self {
        match Self::try_new(matrix, combiner) {
            Ok(tree) => tree,
            Err(err) => panic!("{err}"),
        }
    }

    /// Builds a tree over `matrix`, returning [Error::RaggedMatrix] if its rows differ in length
    pub fn try_new<Row: AsRef<[T]>>(matrix: &[Row], combiner: C) -> Result<Self, Error> {
        #[cfg(feature = "profiler")]
        let stats = Stats::default();
        #[cfg(feature = "profiler")]
        profile_scope!(&stats.build);

        let rows = matrix.len();
        let cols = matrix.first().map_or(0, |row| row.as_ref().len());
        if let Some((row, found)) = matrix
            .iter()
            .map(|row| row.as_ref().len())
            .enumerate()
            .find(|&(_, found)| found != cols)
        {
            return Err(Error::RaggedMatrix {
                row,
                expected: cols,
                found,
            });
        }

        let mut tree = Self {
            rows,
            cols,
            arena: Vec::new(),
            combiner,
            #[cfg(feature = "profiler")]
            stats,
        };
        if let Some(&first) = matrix.first().and_then(|row| row.as_ref().first()) {
            tree.arena = vec![first; 4 * rows * cols];
            for (r, row) in matrix.iter().enumerate() {
                let start = tree.slot(rows + r, cols);
                tree.arena[start..start + cols].copy_from_slice(row.as_ref());
                tree.build_row(rows + r);
            }
            for r in (1..rows).rev() {
                for c in 1..2 * cols {
                    tree.pull_column(r, c);
                }
            }
        }
        log::debug!("built 2d segment tree over a {rows}x{cols} matrix");
        Ok(tree)
    }

    /// Returns the number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` if the matrix has no cells
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Returns the value of cell (`row`, `col`)
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is out of bounds
    pub fn get(&self, row: usize, col: usize) -> T {
        check_index(row, self.rows);
        check_index(col, self.cols);
        self.arena[self.slot(self.rows + row, self.cols + col)]
    }

    /// Combines every cell within the `rows` x `cols` rectangle
    ///
    /// Returns the identity of the combiner if the rectangle is empty, or `None` if it has none.
    ///
    /// # Panics
    ///
    /// Panics if either range is inverted or reaches past the matrix
    pub fn query<R1, R2>(&self, rows: R1, cols: R2) -> Option<T>
    where
        R1: RangeBounds<usize>,
        R2: RangeBounds<usize>,
    {
        let rows = into_range(&rows, self.rows);
        let cols = into_range(&cols, self.cols);
        self.fold(rows, cols)
    }

    /// Combines every cell within the rectangle, reporting invalid or unanswerable ranges as errors
    pub fn try_query<R1, R2>(&self, rows: R1, cols: R2) -> Result<T, Error>
    where
        R1: RangeBounds<usize>,
        R2: RangeBounds<usize>,
    {
        let rows = try_into_range(&rows, self.rows)?;
        let cols = try_into_range(&cols, self.cols)?;
        let at = if rows.is_empty() { rows.start } else { cols.start };
        self.fold(rows, cols).ok_or(Error::EmptyRange { at })
    }

    fn fold(&self, rows: Range<usize>, cols: Range<usize>) -> Option<T> {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        if rows.is_empty() || cols.is_empty() {
            return self.combiner.identity();
        }
        let mut acc = None;
        let (mut lo, mut hi) = (rows.start + self.rows, rows.end + self.rows);
        while lo < hi {
            if lo & 1 == 1 {
                self.fold_row(lo, &cols, &mut acc);
                lo += 1;
            }
            if hi & 1 == 1 {
                hi -= 1;
                self.fold_row(hi, &cols, &mut acc);
            }
            lo >>= 1;
            hi >>= 1;
        }
        acc
    }

    fn fold_row(&self, row: usize, cols: &Range<usize>, acc: &mut Option<T>) {
        let base = self.slot(row, 0);
        let (mut lo, mut hi) = (cols.start + self.cols, cols.end + self.cols);
        while lo < hi {
            if lo & 1 == 1 {
                combine_or_insert(&self.combiner, acc, self.arena[base + lo]);
                lo += 1;
            }
            if hi & 1 == 1 {
                hi -= 1;
                combine_or_insert(&self.combiner, acc, self.arena[base + hi]);
            }
            lo >>= 1;
            hi >>= 1;
        }
    }

    /// Sets cell (`row`, `col`) to `value` and recomputes every node covering it
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is out of bounds
    pub fn update(&mut self, row: usize, col: usize, value: T) {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        check_index(row, self.rows);
        check_index(col, self.cols);
        let (mut r, leaf) = (row + self.rows, col + self.cols);
        let slot = self.slot(r, leaf);
        self.arena[slot] = value;
        let mut c = leaf;
        while c > 1 {
            c >>= 1;
            let base = self.slot(r, 0);
            self.arena[base + c] = self
                .combiner
                .combine(self.arena[base + 2 * c], self.arena[base + 2 * c + 1]);
        }
        while r > 1 {
            r >>= 1;
            let mut c = leaf;
            while c >= 1 {
                self.pull_column(r, c);
                c >>= 1;
            }
        }
    }

    /// Returns the latency stats of the tree
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    #[inline]
    fn slot(&self, row: usize, col: usize) -> usize {
        row * 2 * self.cols + col
    }

    fn build_row(&mut self, row: usize) {
        let base = self.slot(row, 0);
        for c in (1..self.cols).rev() {
            self.arena[base + c] = self
                .combiner
                .combine(self.arena[base + 2 * c], self.arena[base + 2 * c + 1]);
        }
    }

    // recomputes outer node `row` at column node `col` from its two child rows
    #[inline]
    fn pull_column(&mut self, row: usize, col: usize) {
        let upper = self.arena[self.slot(2 * row, col)];
        let lower = self.arena[self.slot(2 * row + 1, col)];
        let slot = self.slot(row, col);
        self.arena[slot] = self.combiner.combine(upper, lower);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combiner::{Max, Min, Sum};

    const MATRIX: [[i32; 4]; 4] = [[4, 2, 9, -3], [2, 0, 1, 0], [2, 6, 5, 4], [-2, 1, 8, 3]];

    fn naive(matrix: &[Vec<i32>], rows: Range<usize>, cols: Range<usize>) -> i32 {
        matrix[rows]
            .iter()
            .flat_map(|row| row[cols.clone()].iter())
            .sum()
    }

    #[test]
    fn sum_test() {
        let mut tree = SegmentTree2D::new(&MATRIX, Sum);
        assert_eq!(tree.query(1..4, 1..3), Some(21));
        tree.update(1, 2, 5);
        assert_eq!(tree.query(1..4, 1..3), Some(25));
        assert_eq!(tree.get(1, 2), 5);
        assert_eq!(tree.query(.., ..), Some(46));
    }

    #[test]
    fn min_max_test() {
        let mut min = SegmentTree2D::new(&MATRIX, Min);
        let max = SegmentTree2D::new(&MATRIX, Max);
        assert_eq!(min.query(..2, 1..), Some(-3));
        assert_eq!(min.query(1..3, ..2), Some(0));
        assert_eq!(max.query(2.., 1..=2), Some(8));
        min.update(2, 0, -10);
        assert_eq!(min.query(1..3, ..2), Some(-10));
    }

    #[test]
    fn every_rectangle_matches_naive_sum() {
        let mut rng = fastrand::Rng::with_seed(7);
        for (rows, cols) in [(1, 1), (1, 5), (3, 1), (5, 7), (8, 8)] {
            let mut matrix: Vec<Vec<i32>> = (0..rows)
                .map(|_| (0..cols).map(|_| rng.i32(-9..10)).collect())
                .collect();
            let mut tree = SegmentTree2D::new(&matrix, Sum);
            for _ in 0..10 {
                let (r, c, v) = (rng.usize(0..rows), rng.usize(0..cols), rng.i32(-9..10));
                matrix[r][c] = v;
                tree.update(r, c, v);
                for r1 in 0..rows {
                    for r2 in r1 + 1..=rows {
                        for c1 in 0..cols {
                            for c2 in c1 + 1..=cols {
                                assert_eq!(
                                    tree.query(r1..r2, c1..c2),
                                    Some(naive(&matrix, r1..r2, c1..c2))
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn empty_rectangles() {
        let tree = SegmentTree2D::new(&MATRIX, Sum);
        assert_eq!(tree.query(2..2, ..), Some(0));
        let tree = SegmentTree2D::new(&MATRIX, |a: i32, b: i32| a.max(b));
        assert_eq!(tree.query(1..3, 3..3), None);
        assert_eq!(tree.try_query(1..3, 3..3), Err(Error::EmptyRange { at: 3 }));

        let tree = SegmentTree2D::new(&[[0u8; 0]; 3], Sum);
        assert!(tree.is_empty());
        assert_eq!(tree.query(.., ..), Some(0));
    }

    #[test]
    fn ragged_matrix_is_rejected() {
        let matrix = vec![vec![1i32, 2, 3], vec![4, 5], vec![6, 7, 8]];
        let err = SegmentTree2D::try_new(&matrix, Sum).map(|_| ()).unwrap_err();
        assert_eq!(
            err,
            Error::RaggedMatrix {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn query_past_last_column_panics() {
        let tree = SegmentTree2D::new(&MATRIX, Sum);
        tree.query(0..2, 1..5);
    }
}
