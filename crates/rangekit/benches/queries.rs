use criterion::{Bencher, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rangekit::{
    FenwickTree,
    LazySegmentTree,
    OptimalRmq,
    SegmentTree,
    SparseTable,
    SqrtArray,
    SumArray,
    combiner::{Min, Sum},
    lazy::RangeSum,
};

const SIZES: [usize; 3] = [1 << 10, 1 << 14, 1 << 18];

fn random_values(len: usize) -> Vec<i64> {
    (0..len).map(|_| fastrand::i64(0..1_000_000)).collect()
}

fn random_range(len: usize) -> (usize, usize) {
    let start = fastrand::usize(0..len);
    (start, fastrand::usize(start + 1..=len))
}

fn segment_tree(bencher: &mut Bencher, len: &usize) {
    let tree = SegmentTree::new(&random_values(*len), Sum);
    bencher.iter(|| {
        let (start, end) = random_range(*len);
        black_box(tree.query(start..end))
    });

    #[cfg(feature = "profiler")]
    println!("{:?}", tree.stats());
}

fn lazy_segment_tree(bencher: &mut Bencher, len: &usize) {
    let mut tree = LazySegmentTree::new(&random_values(*len), RangeSum);
    bencher.iter(|| {
        let (start, end) = random_range(*len);
        black_box(tree.query(start..end))
    });
}

fn sparse_table(bencher: &mut Bencher, len: &usize) {
    let table = SparseTable::new(&random_values(*len), Min);
    bencher.iter(|| {
        let (start, end) = random_range(*len);
        black_box(table.query(start..end))
    });

    #[cfg(feature = "profiler")]
    println!("{:?}", table.stats());
}

fn optimal_rmq(bencher: &mut Bencher, len: &usize) {
    let rmq = OptimalRmq::min(&random_values(*len));
    bencher.iter(|| {
        let (start, end) = random_range(*len);
        black_box(rmq.query_index(start..end))
    });
}

fn fenwick_tree(bencher: &mut Bencher, len: &usize) {
    let tree = FenwickTree::from_slice(&random_values(*len), Sum);
    bencher.iter(|| {
        let (start, end) = random_range(*len);
        black_box(tree.query(start..end))
    });
}

fn sqrt_array(bencher: &mut Bencher, len: &usize) {
    let array = SqrtArray::new(&random_values(*len), RangeSum);
    bencher.iter(|| {
        let (start, end) = random_range(*len);
        black_box(array.query(start..end))
    });
}

fn sum_array(bencher: &mut Bencher, len: &usize) {
    let array = SumArray::new(&random_values(*len), Sum);
    bencher.iter(|| {
        let (start, end) = random_range(*len);
        black_box(array.query(start..end))
    });
}

pub fn query_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    for len in SIZES {
        group.bench_with_input(BenchmarkId::new("segment_tree", len), &len, segment_tree);
        group.bench_with_input(BenchmarkId::new("lazy_segment_tree", len), &len, lazy_segment_tree);
        group.bench_with_input(BenchmarkId::new("sparse_table", len), &len, sparse_table);
        group.bench_with_input(BenchmarkId::new("optimal_rmq", len), &len, optimal_rmq);
        group.bench_with_input(BenchmarkId::new("fenwick_tree", len), &len, fenwick_tree);
        group.bench_with_input(BenchmarkId::new("sqrt_array", len), &len, sqrt_array);
        group.bench_with_input(BenchmarkId::new("sum_array", len), &len, sum_array);
    }
    group.finish();
}

criterion_group!(benches, query_benchmark);
criterion_main!(benches);
