use core::fmt;
use rangekit_stats::Sketch;

/// Latency sketches of a single structure
#[derive(Clone, Default)]
pub struct Stats {
    /// A sketch for recording construction latencies
    pub build: Sketch,
    /// A sketch for recording query latencies
    pub query: Sketch,
    /// A sketch for recording update latencies
    pub update: Sketch,
}

impl fmt::Debug for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Stats")
            .field("build", &self.build.summary())
            .field("query", &self.query.summary())
            .field("update", &self.update.summary())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        DifferenceArray,
        FenwickTree,
        LazySegmentTree,
        RangeOp,
        SegmentTree,
        SparseTable,
        SumArray,
        combiner::Sum,
        lazy::RangeSum,
    };

    const VALUES: [i64; 8] = [5, 1, 2, 9, 3, 1, 8, 3];

    #[test]
    fn segment_tree_counts() {
        let mut tree = SegmentTree::new(&VALUES, Sum);
        assert_eq!(tree.stats().build.count(), 1);
        assert_eq!(tree.stats().query.count(), 0);

        assert_eq!(tree.query(2..6), Some(15));
        tree.update(3, 0);
        assert_eq!(tree.query(2..6), Some(6));

        assert_eq!(tree.stats().build.count(), 1);
        assert_eq!(tree.stats().query.count(), 2);
        assert_eq!(tree.stats().update.count(), 1);
    }

    #[test]
    fn lazy_tree_counts() {
        let mut tree = LazySegmentTree::new(&VALUES, RangeSum);
        tree.update(0..4, RangeOp::Add(1));
        tree.set(7, 0);
        assert_eq!(tree.query(..), Some(33));

        let stats = tree.stats();
        assert_eq!(stats.build.count(), 1);
        assert_eq!(stats.query.count(), 1);
        assert_eq!(stats.update.count(), 2);
    }

    #[test]
    fn sparse_table_counts() {
        let mut table = SparseTable::min(&VALUES);
        table.update(1, 4);
        assert_eq!(table.query(..3), Some(2));
        assert_eq!(table.stats().build.count(), 1);
        assert_eq!(table.stats().query.count(), 1);
        assert_eq!(table.stats().update.count(), 1);
    }

    #[test]
    fn prefix_structure_counts() {
        let mut fenwick = FenwickTree::from_slice(&VALUES, Sum);
        fenwick.set(0, 1);
        assert_eq!(fenwick.query(..2), 2);
        // set reads the current value before updating
        assert_eq!(fenwick.stats().query.count(), 2);
        assert_eq!(fenwick.stats().update.count(), 1);

        let mut prefix = SumArray::new(&VALUES, Sum);
        prefix.update(2, 1);
        assert_eq!(prefix.query(2..4), 12);
        assert_eq!(prefix.stats().build.count(), 1);
        assert_eq!(prefix.stats().query.count(), 1);
        assert_eq!(prefix.stats().update.count(), 1);

        let mut diffs = DifferenceArray::new(&VALUES, Sum);
        diffs.update(1..3, 2);
        assert_eq!(diffs.query(2), 4);
        assert_eq!(diffs.stats().build.count(), 1);
        assert_eq!(diffs.stats().query.count(), 1);
        assert_eq!(diffs.stats().update.count(), 1);
    }

    #[test]
    fn debug_lists_every_sketch() {
        let tree = SegmentTree::new(&VALUES, Sum);
        let rendered = format!("{:?}", tree.stats());
        assert!(rendered.contains("build"));
        assert!(rendered.contains("query"));
        assert!(rendered.contains("update"));
    }
}
