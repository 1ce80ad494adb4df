//! rangekit is a collection of array-backed range-query structures
//!
//! Every structure is built once from a sequence and then serves a stream of
//! updates and queries over half-open, 0-based ranges. The merge semantics are
//! supplied by a [Combiner] (or [LazyOps] for range updates), so the same tree
//! answers sum, min, max, gcd or any other associative fold.
//!
//! ```
//! use rangekit::{SegmentTree, combiner::Sum};
//!
//! let mut tree = SegmentTree::new(&[5i64, 1, 2, 9, 3, 1, 8, 3], Sum);
//! assert_eq!(tree.query(2..5), Some(14));
//! tree.update(3, 0);
//! assert_eq!(tree.query(2..5), Some(5));
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

/// Combiner interface and pre-defined combiners
pub mod combiner;
/// Error type shared by all structures
pub mod error;
/// Lazy update interface used by range-update structures
pub mod lazy;
mod range;

/// Prefix, difference, block and Fenwick arrays
pub mod array;
/// Static tables answering idempotent queries in constant time
pub mod table;
/// Segment tree family
pub mod tree;

cfg_profiler! {
    /// Latency statistics recorded by the `profiler` feature
    pub mod stats;
}

pub use array::{
    difference::DifferenceArray,
    fenwick::FenwickTree,
    sqrt::SqrtArray,
    sum::SumArray,
};
pub use combiner::{Combiner, InvertibleCombiner};
pub use error::Error;
pub use lazy::{LazyOps, RangeOp};
pub use table::{optimal_rmq::OptimalRmq, sparse::SparseTable};
pub use tree::{lazy::LazySegmentTree, segment::SegmentTree, segment_2d::SegmentTree2D};
