use super::Combiner;

/// Greatest common divisor, with `0` as identity
///
/// Idempotent, so it can back a [SparseTable](crate::SparseTable).
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gcd;

macro_rules! gcd_impl {
    ($($type:ty),*) => {
        $(
            impl Combiner<$type> for Gcd {
                #[inline]
                fn combine(&self, mut a: $type, mut b: $type) -> $type {
                    while b != 0 {
                        (a, b) = (b, a % b);
                    }
                    a
                }
                #[inline]
                fn identity(&self) -> Option<$type> {
                    Some(0)
                }
            }
        )*
    };
}

gcd_impl!(u8, u16, u32, u64, u128, usize);
