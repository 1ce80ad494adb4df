use crate::Error;
use core::ops::{Bound, Range, RangeBounds};

// NOTE: move to slice::range function once it is stable
#[inline]
pub(crate) fn try_into_range(
    range: &impl RangeBounds<usize>,
    len: usize,
) -> Result<Range<usize>, Error> {
    let start = match range.start_bound() {
        Bound::Included(&n) => n,
        Bound::Excluded(&n) => n.checked_add(1).ok_or(Error::OutOfBounds { index: n, len })?,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&n) => n.checked_add(1).ok_or(Error::OutOfBounds { index: n, len })?,
        Bound::Excluded(&n) => n,
        Bound::Unbounded => len,
    };
    if start > end {
        return Err(Error::InvertedRange { start, end });
    }
    if end > len {
        return Err(Error::OutOfBounds { index: end, len });
    }
    Ok(start..end)
}

/// Normalises `range` against `len`
///
/// # Panics
///
/// Panics if the start is greater than the end or if the end is greater than `len`
#[inline]
pub(crate) fn into_range(range: &impl RangeBounds<usize>, len: usize) -> Range<usize> {
    match try_into_range(range, len) {
        Ok(range) => range,
        Err(err) => panic!("{err}"),
    }
}

#[inline]
pub(crate) fn check_index(index: usize, len: usize) {
    assert!(index < len, "{}", Error::OutOfBounds { index, len });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_bounds() {
        assert_eq!(into_range(&(2..5), 8), 2..5);
        assert_eq!(into_range(&(2..=5), 8), 2..6);
        assert_eq!(into_range(&(..), 8), 0..8);
        assert_eq!(into_range(&(3..), 8), 3..8);
        assert_eq!(into_range(&(..0), 8), 0..0);
        assert_eq!(
            into_range(&(Bound::Excluded(1), Bound::Included(2)), 8),
            2..3
        );
    }

    #[test]
    fn reports_bad_ranges() {
        assert_eq!(
            try_into_range(&(3..9), 8),
            Err(Error::OutOfBounds { index: 9, len: 8 })
        );
        #[allow(clippy::reversed_empty_ranges)]
        let inverted = 5..2;
        assert_eq!(
            try_into_range(&inverted, 8),
            Err(Error::InvertedRange { start: 5, end: 2 })
        );
        assert_eq!(
            try_into_range(&(..=usize::MAX), 8),
            Err(Error::OutOfBounds {
                index: usize::MAX,
                len: 8
            })
        );
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn panics_past_end() {
        into_range(&(0..9), 8);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_past_end() {
        check_index(8, 8);
    }
}
