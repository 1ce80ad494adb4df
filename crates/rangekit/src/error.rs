use core::fmt::{self, Display};

/// Errors reported by the checked (`try_*`) operations
///
/// The unchecked operations panic with the same messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The start of a range lies past its end
    InvertedRange {
        /// Normalised start bound
        start: usize,
        /// Normalised end bound
        end: usize,
    },
    /// A range end or point index lies outside the structure
    OutOfBounds {
        /// Offending index (exclusive for range ends)
        index: usize,
        /// Fixed length of the structure
        len: usize,
    },
    /// An empty range was queried on a combiner without identity
    EmptyRange {
        /// Position of the empty range
        at: usize,
    },
    /// A 2D input whose rows differ in length
    RaggedMatrix {
        /// First row with a mismatching length
        row: usize,
        /// Length of row 0
        expected: usize,
        /// Length of the offending row
        found: usize,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvertedRange { start, end } => {
                write!(f, "range start {start} is greater than range end {end}")
            }
            Error::OutOfBounds { index, len } => {
                write!(f, "index {index} is out of bounds for length {len}")
            }
            Error::EmptyRange { at } => {
                write!(f, "empty range at {at} queried without an identity element")
            }
            Error::RaggedMatrix {
                row,
                expected,
                found,
            } => {
                write!(f, "row {row} has {found} columns, expected {expected}")
            }
        }
    }
}

cfg_std! {
    impl std::error::Error for Error {}
}
