use super::LazyOps;
use crate::Combiner;
use core::ops::Add;

/// A range update that either adds to or assigns every element
///
/// Composition is asymmetric: a newer assignment replaces whatever is pending,
/// while a newer addition accumulates into the pending addition or shifts the
/// pending assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp<T> {
    /// Add the value to every element
    Add(T),
    /// Overwrite every element with the value
    Assign(T),
}

impl<T: Copy + Add<Output = T>> RangeOp<T> {
    /// Folds a newer operation into this pending one
    #[inline]
    pub fn then(&mut self, newer: RangeOp<T>) {
        *self = match (*self, newer) {
            (_, RangeOp::Assign(value)) => RangeOp::Assign(value),
            (RangeOp::Add(pending), RangeOp::Add(delta)) => RangeOp::Add(pending + delta),
            (RangeOp::Assign(pending), RangeOp::Add(delta)) => RangeOp::Assign(pending + delta),
        };
    }

    /// Applies the operation to a single element
    #[inline]
    pub fn apply_to(self, value: T) -> T {
        match self {
            RangeOp::Add(delta) => value + delta,
            RangeOp::Assign(assigned) => assigned,
        }
    }
}

/// Range sum with [RangeOp] updates
///
/// Integer sums wrap on overflow, so any query whose true sum fits the element
/// type is exact even when a segment is longer than the type can count.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSum;

/// Range minimum with [RangeOp] updates
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeMin;

/// Range maximum with [RangeOp] updates
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeMax;

macro_rules! range_op_impl {
    ($type:ty, $lowest:expr, $highest:expr) => {
        impl Combiner<$type> for RangeMin {
            #[inline]
            fn combine(&self, a: $type, b: $type) -> $type {
                if b < a { b } else { a }
            }
            #[inline]
            fn identity(&self) -> Option<$type> {
                Some($highest)
            }
        }

        impl LazyOps<$type, RangeOp<$type>> for RangeMin {
            #[inline]
            fn compose(&self, parent: RangeOp<$type>, child: &mut RangeOp<$type>) {
                child.then(parent);
            }
            #[inline]
            fn apply(&self, value: $type, tag: RangeOp<$type>, _len: usize) -> $type {
                tag.apply_to(value)
            }
        }

        impl Combiner<$type> for RangeMax {
            #[inline]
            fn combine(&self, a: $type, b: $type) -> $type {
                if b > a { b } else { a }
            }
            #[inline]
            fn identity(&self) -> Option<$type> {
                Some($lowest)
            }
        }

        impl LazyOps<$type, RangeOp<$type>> for RangeMax {
            #[inline]
            fn compose(&self, parent: RangeOp<$type>, child: &mut RangeOp<$type>) {
                child.then(parent);
            }
            #[inline]
            fn apply(&self, value: $type, tag: RangeOp<$type>, _len: usize) -> $type {
                tag.apply_to(value)
            }
        }
    };
}

// Node sums wrap, so a segment length truncated to the element width still
// scales the tag correctly modulo 2^bits.
macro_rules! range_sum_int_impl {
    ($type:ty) => {
        impl Combiner<$type> for RangeSum {
            #[inline]
            fn combine(&self, a: $type, b: $type) -> $type {
                a.wrapping_add(b)
            }
            #[inline]
            fn identity(&self) -> Option<$type> {
                Some(0)
            }
        }

        impl LazyOps<$type, RangeOp<$type>> for RangeSum {
            #[inline]
            fn compose(&self, parent: RangeOp<$type>, child: &mut RangeOp<$type>) {
                child.then(parent);
            }
            #[inline]
            fn apply(&self, value: $type, tag: RangeOp<$type>, len: usize) -> $type {
                match tag {
                    RangeOp::Add(delta) => value.wrapping_add(delta.wrapping_mul(len as $type)),
                    RangeOp::Assign(assigned) => assigned.wrapping_mul(len as $type),
                }
            }
        }
    };
}

macro_rules! range_sum_float_impl {
    ($type:ty) => {
        impl Combiner<$type> for RangeSum {
            #[inline]
            fn combine(&self, a: $type, b: $type) -> $type {
                a + b
            }
            #[inline]
            fn identity(&self) -> Option<$type> {
                Some(0.0)
            }
        }

        impl LazyOps<$type, RangeOp<$type>> for RangeSum {
            #[inline]
            fn compose(&self, parent: RangeOp<$type>, child: &mut RangeOp<$type>) {
                child.then(parent);
            }
            #[inline]
            fn apply(&self, value: $type, tag: RangeOp<$type>, len: usize) -> $type {
                match tag {
                    RangeOp::Add(delta) => value + delta * len as $type,
                    RangeOp::Assign(assigned) => assigned * len as $type,
                }
            }
        }
    };
}

macro_rules! range_op_int_impl {
    ($($type:ty),*) => {
        $(
            range_op_impl!($type, <$type>::MIN, <$type>::MAX);
            range_sum_int_impl!($type);
        )*
    };
}

range_op_int_impl!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
range_op_impl!(f32, f32::NEG_INFINITY, f32::INFINITY);
range_op_impl!(f64, f64::NEG_INFINITY, f64::INFINITY);
range_sum_float_impl!(f32);
range_sum_float_impl!(f64);
