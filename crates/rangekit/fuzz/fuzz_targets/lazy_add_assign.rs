#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rangekit::{LazySegmentTree, RangeOp, SqrtArray, lazy::RangeSum};

#[derive(Debug, Arbitrary)]
enum Op {
    Add(u8, u8, i16),
    Assign(u8, u8, i16),
    Query(u8, u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    values: Vec<i16>,
    ops: Vec<Op>,
}

fn span(len: usize, a: u8, b: u8) -> (usize, usize) {
    let (a, b) = (a as usize % (len + 1), b as usize % (len + 1));
    (a.min(b), a.max(b))
}

fuzz_target!(|input: Input| {
    let mut naive: Vec<i64> = input.values.iter().map(|&v| v as i64).collect();
    let mut tree = LazySegmentTree::new(&naive, RangeSum);
    let mut blocks = SqrtArray::new(&naive, RangeSum);

    for op in input.ops {
        let (start, end, update) = match op {
            Op::Add(a, b, delta) => {
                let (start, end) = span(naive.len(), a, b);
                (start, end, Some(RangeOp::Add(delta as i64)))
            }
            Op::Assign(a, b, value) => {
                let (start, end) = span(naive.len(), a, b);
                (start, end, Some(RangeOp::Assign(value as i64)))
            }
            Op::Query(a, b) => {
                let (start, end) = span(naive.len(), a, b);
                (start, end, None)
            }
        };
        if let Some(update) = update {
            naive[start..end].iter_mut().for_each(|v| *v = update.apply_to(*v));
            tree.update(start..end, update);
            blocks.update(start..end, update);
        }
        let expected: i64 = naive[start..end].iter().sum();
        assert_eq!(tree.query(start..end), Some(expected));
        assert_eq!(blocks.query(start..end), Some(expected));
    }
    assert_eq!(tree.to_vec(), naive);
});
