use proptest::prelude::*;
use rangekit::{
    DifferenceArray,
    FenwickTree,
    LazySegmentTree,
    OptimalRmq,
    RangeOp,
    SegmentTree,
    SegmentTree2D,
    SparseTable,
    SqrtArray,
    SumArray,
    combiner::{Max, Min, Sum},
    lazy::{RangeMin, RangeSum},
};

fn sequence(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000i64..1_000, 1..max_len)
}

fn range_op() -> impl Strategy<Value = RangeOp<i64>> {
    prop_oneof![
        (-50i64..50).prop_map(RangeOp::Add),
        (-50i64..50).prop_map(RangeOp::Assign),
    ]
}

// raw bounds scaled onto 0..=len when the test runs
fn span(len: usize, a: usize, b: usize) -> (usize, usize) {
    let (a, b) = (a % (len + 1), b % (len + 1));
    (a.min(b), a.max(b))
}

proptest! {
    #[test]
    fn full_query_after_build_is_the_fold(values in sequence(200)) {
        let sum: i64 = values.iter().sum();
        let min = values.iter().min().copied();
        let max = values.iter().max().copied();

        prop_assert_eq!(SegmentTree::new(&values, Sum).query(..), Some(sum));
        prop_assert_eq!(SegmentTree::new(&values, Min).query(..), min);
        prop_assert_eq!(LazySegmentTree::new(&values, RangeSum).query(..), Some(sum));
        prop_assert_eq!(SparseTable::max(&values).query(..), max);
        prop_assert_eq!(OptimalRmq::min(&values).query(..), min);
        prop_assert_eq!(FenwickTree::from_slice(&values, Sum).query(..), sum);
        prop_assert_eq!(SqrtArray::new(&values, RangeSum).query(..), Some(sum));
        prop_assert_eq!(SumArray::new(&values, Sum).query(..), sum);
        prop_assert_eq!(DifferenceArray::new(&values, Sum).to_vec(), values);
    }

    #[test]
    fn point_update_only_changes_its_leaf(
        values in sequence(100),
        index in any::<prop::sample::Index>(),
        value in -1_000i64..1_000,
    ) {
        let index = index.index(values.len());
        let mut segment = SegmentTree::new(&values, Max);
        let mut lazy = LazySegmentTree::new(&values, RangeMin);
        let mut sparse = SparseTable::min(&values);
        let mut fenwick = FenwickTree::from_slice(&values, Sum);
        let mut prefix = SumArray::new(&values, Sum);
        segment.update(index, value);
        lazy.set(index, value);
        sparse.update(index, value);
        fenwick.set(index, value);
        prefix.set(index, value);

        for (i, &original) in values.iter().enumerate() {
            let expected = if i == index { value } else { original };
            prop_assert_eq!(segment.query(i..i + 1), Some(expected));
            prop_assert_eq!(lazy.query(i..i + 1), Some(expected));
            prop_assert_eq!(sparse.query(i..i + 1), Some(expected));
            prop_assert_eq!(fenwick.query(i..i + 1), expected);
            prop_assert_eq!(prefix.query(i..i + 1), expected);
        }
    }

    #[test]
    fn lazy_updates_match_eager_application(
        values in sequence(120),
        ops in prop::collection::vec((any::<usize>(), any::<usize>(), range_op()), 0..60),
    ) {
        let mut naive = values.clone();
        let mut sum = LazySegmentTree::new(&values, RangeSum);
        let mut min = LazySegmentTree::new(&values, RangeMin);
        let mut blocks = SqrtArray::new(&values, RangeSum);
        for (a, b, op) in ops {
            let (start, end) = span(naive.len(), a, b);
            naive[start..end].iter_mut().for_each(|v| *v = op.apply_to(*v));
            sum.update(start..end, op);
            min.update(start..end, op);
            blocks.update(start..end, op);
            prop_assert_eq!(sum.query(start..end), Some(naive[start..end].iter().sum()));
            prop_assert_eq!(
                min.query(start..end),
                Some(naive[start..end].iter().min().copied().unwrap_or(i64::MAX))
            );
        }
        prop_assert_eq!(sum.to_vec(), naive.clone());
        prop_assert_eq!(min.to_vec(), naive.clone());
        prop_assert_eq!(blocks.to_vec(), naive);
    }

    #[test]
    fn idempotent_tables_match_brute_force(
        values in prop::collection::vec(0i64..8, 1..300),
        block_size in 1usize..=32,
        queries in prop::collection::vec((any::<usize>(), any::<usize>()), 1..50),
    ) {
        let sparse = SparseTable::min(&values);
        let rmq = OptimalRmq::with_block_size(&values, |a: &i64, b: &i64| a > b, block_size);
        for (a, b) in queries {
            let (start, end) = span(values.len(), a, b);
            let slice = &values[start..end];
            prop_assert_eq!(sparse.query(start..end), Some(slice.iter().min().copied().unwrap_or(i64::MAX)));
            prop_assert_eq!(rmq.query(start..end), slice.iter().max().copied());
            // leftmost position of the maximum
            let leftmost = slice
                .iter()
                .enumerate()
                .rev()
                .max_by_key(|&(_, v)| v)
                .map(|(i, _)| start + i);
            prop_assert_eq!(rmq.query_index(start..end), leftmost);
        }
    }

    #[test]
    fn point_update_2d_only_changes_covering_rectangles(
        rows in 1usize..7,
        cols in 1usize..7,
        seed in prop::collection::vec(-9i64..10, 36),
        (r, c, value) in (0usize..7, 0usize..7, -9i64..10),
    ) {
        let matrix: Vec<Vec<i64>> = (0..rows)
            .map(|i| seed[i * cols..(i + 1) * cols].to_vec())
            .collect();
        let (r, c) = (r % rows, c % cols);
        let mut tree = SegmentTree2D::new(&matrix, Sum);
        let before = tree.clone();
        tree.update(r, c, value);
        let delta = value - matrix[r][c];

        for r1 in 0..rows {
            for r2 in r1 + 1..=rows {
                for c1 in 0..cols {
                    for c2 in c1 + 1..=cols {
                        let covers = (r1..r2).contains(&r) && (c1..c2).contains(&c);
                        let expected = before.query(r1..r2, c1..c2).map(|s| if covers { s + delta } else { s });
                        prop_assert_eq!(tree.query(r1..r2, c1..c2), expected);
                    }
                }
            }
        }
    }
}
