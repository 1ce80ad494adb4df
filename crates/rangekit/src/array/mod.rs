/// Difference array with constant time range updates
pub mod difference;
/// Binary indexed tree over an invertible combiner
pub mod fenwick;
/// Square root decomposition with lazy block tags
pub mod sqrt;
/// Prefix array with constant time range queries
pub mod sum;
