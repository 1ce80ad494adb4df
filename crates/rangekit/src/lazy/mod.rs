use crate::Combiner;

mod range_op;

pub use range_op::{RangeMax, RangeMin, RangeOp, RangeSum};

/// Lazy update interface for range-update structures
///
/// A tag of type `L` is a pending update that has been applied to an aggregate
/// but not yet to the aggregates below it. Two laws tie the operations together:
///
/// - `apply(apply(v, older, n), newer, n) == apply(v, c, n)` where `c` is `older`
///   after `compose(newer, &mut c)`.
/// - `apply` distributes over `combine` once lengths are accounted for:
///   `apply(combine(a, b), t, n + m) == combine(apply(a, t, n), apply(b, t, m))`.
///
/// The composition is entirely up to the implementor. [RangeOp] shows an
/// asymmetric one where an assignment replaces a pending addition.
pub trait LazyOps<T, L>: Combiner<T> {
    /// Merges a newer `parent` tag into the pending `child` tag
    fn compose(&self, parent: L, child: &mut L);

    /// Returns the aggregate of `len` elements after applying `tag` to them
    fn apply(&self, value: T, tag: L, len: usize) -> T;
}

/// [LazyOps] assembled from a combiner and two closures
///
/// ```
/// use rangekit::{LazySegmentTree, lazy::LazyFns};
///
/// // range multiply with range sum
/// let ops = LazyFns::new(
///     |a: u64, b: u64| a + b,
///     |parent: u64, child: &mut u64| *child *= parent,
///     |value: u64, factor: u64, _len: usize| value * factor,
/// );
/// let mut tree = LazySegmentTree::new(&[1u64, 2, 3, 4], ops);
/// tree.update(1..3, 10);
/// assert_eq!(tree.query(..), Some(55));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LazyFns<C, P, A> {
    combine: C,
    compose: P,
    apply: A,
}

impl<C, P, A> LazyFns<C, P, A> {
    /// Creates lazy operations from a combiner, a tag composition and a tag application
    pub fn new<T, L>(combine: C, compose: P, apply: A) -> Self
    where
        C: Combiner<T>,
        P: Fn(L, &mut L),
        A: Fn(T, L, usize) -> T,
    {
        Self {
            combine,
            compose,
            apply,
        }
    }
}

impl<T, C, P, A> Combiner<T> for LazyFns<C, P, A>
where
    C: Combiner<T>,
{
    #[inline]
    fn combine(&self, a: T, b: T) -> T {
        self.combine.combine(a, b)
    }
    #[inline]
    fn identity(&self) -> Option<T> {
        self.combine.identity()
    }
}

impl<T, L, C, P, A> LazyOps<T, L> for LazyFns<C, P, A>
where
    C: Combiner<T>,
    P: Fn(L, &mut L),
    A: Fn(T, L, usize) -> T,
{
    #[inline]
    fn compose(&self, parent: L, child: &mut L) {
        (self.compose)(parent, child)
    }
    #[inline]
    fn apply(&self, value: T, tag: L, len: usize) -> T {
        (self.apply)(value, tag, len)
    }
}
