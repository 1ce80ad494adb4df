/// Cartesian-tree block decomposition for constant time range extrema
pub mod optimal_rmq;
/// Power-of-two window table for idempotent combiners
pub mod sparse;
