use super::{Combiner, InvertibleCombiner};

/// Addition, with `0` as identity and subtraction as inverse
///
/// Integers wrap on overflow, which keeps `Sum` a group over every integer type:
/// unsigned prefixes and differences are exact modulo `2^bits`, so any result
/// that fits the type comes out right.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sum;

macro_rules! sum_int_impl {
    ($($type:ty),*) => {
        $(
            impl Combiner<$type> for Sum {
                #[inline]
                fn combine(&self, a: $type, b: $type) -> $type {
                    a.wrapping_add(b)
                }
                #[inline]
                fn identity(&self) -> Option<$type> {
                    Some(0)
                }
            }

            impl InvertibleCombiner<$type> for Sum {
                #[inline]
                fn zero(&self) -> $type {
                    0
                }
                #[inline]
                fn combine_inverse(&self, a: $type, b: $type) -> $type {
                    a.wrapping_sub(b)
                }
            }
        )*
    };
}

macro_rules! sum_float_impl {
    ($($type:ty),*) => {
        $(
            impl Combiner<$type> for Sum {
                #[inline]
                fn combine(&self, a: $type, b: $type) -> $type {
                    a + b
                }
                #[inline]
                fn identity(&self) -> Option<$type> {
                    Some(0.0)
                }
            }

            impl InvertibleCombiner<$type> for Sum {
                #[inline]
                fn zero(&self) -> $type {
                    0.0
                }
                #[inline]
                fn combine_inverse(&self, a: $type, b: $type) -> $type {
                    a - b
                }
            }
        )*
    };
}

sum_int_impl!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
sum_float_impl!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_test() {
        assert_eq!(Sum.combine(3u64, 4), 7);
        assert_eq!(Combiner::<i32>::identity(&Sum), Some(0));
        assert_eq!(Sum.combine_inverse(10i32, 4), 6);
        assert_eq!(Sum.combine(1.5f64, 2.0), 3.5);
    }

    #[test]
    fn unsigned_inverse_wraps_back() {
        let difference = Sum.combine_inverse(1u32, 5);
        assert_eq!(difference, u32::MAX - 3);
        assert_eq!(Sum.combine(5u32, difference), 1);
        assert_eq!(Sum.combine(u8::MAX, 1u8), 0);
    }
}
