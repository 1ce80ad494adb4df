use super::{Combiner, InvertibleCombiner};

/// Bitwise exclusive-or, its own inverse
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xor;

macro_rules! xor_impl {
    ($($type:ty),*) => {
        $(
            impl Combiner<$type> for Xor {
                #[inline]
                fn combine(&self, a: $type, b: $type) -> $type {
                    a ^ b
                }
                #[inline]
                fn identity(&self) -> Option<$type> {
                    Some(0)
                }
            }

            impl InvertibleCombiner<$type> for Xor {
                #[inline]
                fn zero(&self) -> $type {
                    0
                }
                #[inline]
                fn combine_inverse(&self, a: $type, b: $type) -> $type {
                    a ^ b
                }
            }
        )*
    };
}

xor_impl!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_is_self_inverse() {
        let combined = Xor.combine(0b1010u8, 0b0110);
        assert_eq!(combined, 0b1100);
        assert_eq!(Xor.combine_inverse(combined, 0b0110), 0b1010);
    }
}
