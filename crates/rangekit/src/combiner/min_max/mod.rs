use super::Combiner;

/// Minimum, identity is the largest value of the type
///
/// Idempotent, so it can back a [SparseTable](crate::SparseTable).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Min;

/// Maximum, identity is the smallest value of the type
///
/// Idempotent, so it can back a [SparseTable](crate::SparseTable).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Max;

#[inline]
fn min<T: PartialOrd>(a: T, b: T) -> T {
    if b < a { b } else { a }
}

#[inline]
fn max<T: PartialOrd>(a: T, b: T) -> T {
    if b > a { b } else { a }
}

macro_rules! min_max_impl {
    ($type:ty, $lowest:expr, $highest:expr) => {
        impl Combiner<$type> for Min {
            #[inline]
            fn combine(&self, a: $type, b: $type) -> $type {
                min(a, b)
            }
            #[inline]
            fn identity(&self) -> Option<$type> {
                Some($highest)
            }
        }

        impl Combiner<$type> for Max {
            #[inline]
            fn combine(&self, a: $type, b: $type) -> $type {
                max(a, b)
            }
            #[inline]
            fn identity(&self) -> Option<$type> {
                Some($lowest)
            }
        }
    };
}

macro_rules! min_max_int_impl {
    ($($type:ty),*) => {
        $(min_max_impl!($type, <$type>::MIN, <$type>::MAX);)*
    };
}

min_max_int_impl!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
min_max_impl!(f32, f32::NEG_INFINITY, f32::INFINITY);
min_max_impl!(f64, f64::NEG_INFINITY, f64::INFINITY);
