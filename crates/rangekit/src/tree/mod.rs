/// Segment tree with range updates through pending tags
pub mod lazy;
/// Segment tree with point updates over a flat buffer
pub mod segment;
/// Segment tree over the cells of a matrix
pub mod segment_2d;
