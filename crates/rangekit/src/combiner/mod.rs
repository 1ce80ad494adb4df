/// Greatest common divisor over unsigned integers
pub mod gcd;
/// Minimum and maximum over primitive numeric types
pub mod min_max;
/// Addition over primitive numeric types
pub mod sum;
/// Bitwise exclusive-or over integers
pub mod xor;

pub use gcd::Gcd;
pub use min_max::{Max, Min};
pub use sum::Sum;
pub use xor::Xor;

/// Merge interface that every range-query structure is parameterised by
///
/// `combine` must be associative. It does not need to be commutative: the
/// one-dimensional structures always pass the left operand first.
///
/// Any `Fn(T, T) -> T` is a combiner without identity, so closures and
/// function items can be used directly:
///
/// ```
/// use rangekit::{Combiner, SegmentTree};
///
/// let tree = SegmentTree::new(&[4u32, 3, 2, 8], u32::max);
/// assert_eq!(tree.query(1..3), Some(3));
/// assert_eq!(tree.query(2..2), None);
///
/// let tree = SegmentTree::new(&[4u32, 3, 2, 8], u32::max.with_identity(0));
/// assert_eq!(tree.query(2..2), Some(0));
/// ```
pub trait Combiner<T> {
    /// Combines two aggregates, `a` covering the range left of `b`
    fn combine(&self, a: T, b: T) -> T;

    /// Identity element returned for empty ranges
    ///
    /// Is set to `None` by default, which makes empty-range queries return `None`.
    #[inline]
    fn identity(&self) -> Option<T> {
        None
    }

    /// Attaches an identity element to this combiner
    fn with_identity(self, identity: T) -> WithIdentity<Self, T>
    where
        Self: Sized,
    {
        WithIdentity::new(self, identity)
    }
}

/// A combiner forming a commutative group
///
/// Prefix and difference based structures need to "subtract" an aggregate
/// again, which `combine_inverse` provides.
pub trait InvertibleCombiner<T>: Combiner<T> {
    /// Neutral element of the group
    fn zero(&self) -> T;

    /// Removes `b` from `a`, so that `combine_inverse(combine(a, b), b) == a`
    fn combine_inverse(&self, a: T, b: T) -> T;
}

impl<T, F> Combiner<T> for F
where
    F: Fn(T, T) -> T,
{
    #[inline]
    fn combine(&self, a: T, b: T) -> T {
        self(a, b)
    }
}

/// A combiner with an explicitly configured identity element
#[derive(Debug, Clone, Copy)]
pub struct WithIdentity<C, T> {
    inner: C,
    identity: T,
}

impl<C, T> WithIdentity<C, T> {
    /// Wraps `inner` so that empty ranges evaluate to `identity`
    pub fn new(inner: C, identity: T) -> Self {
        Self { inner, identity }
    }
    /// Returns the wrapped combiner
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<T: Copy, C: Combiner<T>> Combiner<T> for WithIdentity<C, T> {
    #[inline]
    fn combine(&self, a: T, b: T) -> T {
        self.inner.combine(a, b)
    }
    #[inline]
    fn identity(&self) -> Option<T> {
        Some(self.identity)
    }
}

impl<T: Copy, C: InvertibleCombiner<T>> InvertibleCombiner<T> for WithIdentity<C, T> {
    #[inline]
    fn zero(&self) -> T {
        self.inner.zero()
    }
    #[inline]
    fn combine_inverse(&self, a: T, b: T) -> T {
        self.inner.combine_inverse(a, b)
    }
}

/// An invertible combiner assembled from a combine and an inverse function
///
/// ```
/// use rangekit::{DifferenceArray, combiner::Invertible};
///
/// let xor = Invertible::new(|a: u8, b: u8| a ^ b, |a: u8, b: u8| a ^ b, 0);
/// let mut diff = DifferenceArray::new(&[1u8, 2, 3], xor);
/// diff.update(0..2, 4);
/// assert_eq!(diff.to_vec(), vec![5, 6, 3]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Invertible<C, I, T> {
    combine: C,
    inverse: I,
    zero: T,
}

impl<C, I, T> Invertible<C, I, T>
where
    C: Fn(T, T) -> T,
    I: Fn(T, T) -> T,
{
    /// Creates a group from `combine`, its `inverse` and the neutral element
    pub fn new(combine: C, inverse: I, zero: T) -> Self {
        Self {
            combine,
            inverse,
            zero,
        }
    }
}

impl<C, I, T> Combiner<T> for Invertible<C, I, T>
where
    T: Copy,
    C: Fn(T, T) -> T,
    I: Fn(T, T) -> T,
{
    #[inline]
    fn combine(&self, a: T, b: T) -> T {
        (self.combine)(a, b)
    }
    #[inline]
    fn identity(&self) -> Option<T> {
        Some(self.zero)
    }
}

impl<C, I, T> InvertibleCombiner<T> for Invertible<C, I, T>
where
    T: Copy,
    C: Fn(T, T) -> T,
    I: Fn(T, T) -> T,
{
    #[inline]
    fn zero(&self) -> T {
        self.zero
    }
    #[inline]
    fn combine_inverse(&self, a: T, b: T) -> T {
        (self.inverse)(a, b)
    }
}

/// Combine `entry` to the right of `dest` or insert it if `dest` is empty
#[inline]
pub fn combine_or_insert<T, C: Combiner<T>>(combiner: &C, dest: &mut Option<T>, entry: T) {
    *dest = Some(match dest.take() {
        Some(current) => combiner.combine(current, entry),
        None => entry,
    });
}

/// Combine `entry` to the left of `dest` or insert it if `dest` is empty
#[inline]
pub(crate) fn prepend_or_insert<T, C: Combiner<T>>(combiner: &C, dest: &mut Option<T>, entry: T) {
    *dest = Some(match dest.take() {
        Some(current) => combiner.combine(entry, current),
        None => entry,
    });
}

/// Joins a left and a right partial result, falling back to the identity when both are missing
#[inline]
pub(crate) fn join<T, C: Combiner<T>>(combiner: &C, left: Option<T>, right: Option<T>) -> Option<T> {
    match (left, right) {
        (Some(left), Some(right)) => Some(combiner.combine(left, right)),
        (Some(partial), None) | (None, Some(partial)) => Some(partial),
        (None, None) => combiner.identity(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // decimal concatenation: associative but not commutative
    fn concat((a, pa): (u64, u64), (b, pb): (u64, u64)) -> (u64, u64) {
        (a * pb + b, pa * pb)
    }

    fn digit(d: u64) -> (u64, u64) {
        (d, 10)
    }

    #[test]
    fn closures_have_no_identity() {
        let add = |a: u32, b: u32| a + b;
        assert_eq!(add.combine(1, 2), 3);
        assert_eq!(Combiner::<u32>::identity(&add), None);
        assert_eq!(add.with_identity(0).identity(), Some(0));
        assert_eq!(concat.combine(digit(1), digit(2)), (12, 100));
    }

    #[test]
    fn partial_results_keep_operand_order() {
        let mut left = None;
        combine_or_insert(&concat, &mut left, digit(1));
        combine_or_insert(&concat, &mut left, digit(2));
        let mut right = None;
        prepend_or_insert(&concat, &mut right, digit(4));
        prepend_or_insert(&concat, &mut right, digit(3));
        assert_eq!(join(&concat, left, right), Some((1234, 10_000)));
        assert_eq!(join(&concat, None, None), None);
        assert_eq!(join(&concat.with_identity((0, 1)), None, None), Some((0, 1)));
    }

    #[test]
    fn invertible_from_closures() {
        let group = Invertible::new(|a: i32, b: i32| a + b, |a: i32, b: i32| a - b, 0);
        assert_eq!(group.combine_inverse(group.combine(5, 3), 3), 5);
        assert_eq!(group.zero(), 0);
        assert_eq!(group.identity(), Some(0));
    }
}
