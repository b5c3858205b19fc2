//! Site values of a spin configuration.
//!
//! A site carrying spin projection `m` is stored as `2m`, so an `N`-level
//! site takes the values `-(N-1), -(N-1)+2, …, N-1`. Doubling keeps every
//! level integral, which makes exact comparison possible for both integer
//! and floating-point storage.

use std::fmt;

/// Element type of a configuration slice.
///
/// Implemented for the signed integers and for `f32`/`f64`, so samplers can
/// keep configurations in whatever type their downstream code consumes.
pub trait SpinValue: Copy + PartialEq + fmt::Debug {
    /// Build a value from `2m`, or `None` if the type cannot hold it exactly.
    fn from_twice_m(twice_m: i64) -> Option<Self>;

    /// The `2m` this value stands for, or `None` if it is not integral.
    fn twice_m(self) -> Option<i64>;

    /// Lossy conversion used in error reports.
    fn to_f64(self) -> f64;
}

macro_rules! impl_spin_value_int {
    ($($t:ty),*) => {
        $(
            impl SpinValue for $t {
                #[inline]
                fn from_twice_m(twice_m: i64) -> Option<Self> {
                    <$t>::try_from(twice_m).ok()
                }

                #[inline]
                fn twice_m(self) -> Option<i64> {
                    Some(i64::from(self))
                }

                #[inline]
                #[allow(clippy::cast_precision_loss)]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_spin_value_int!(i8, i16, i32, i64);

macro_rules! impl_spin_value_float {
    ($($t:ty),*) => {
        $(
            impl SpinValue for $t {
                #[inline]
                #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
                fn from_twice_m(twice_m: i64) -> Option<Self> {
                    let v = twice_m as $t;
                    (v as i64 == twice_m).then_some(v)
                }

                #[inline]
                #[allow(clippy::cast_possible_truncation)]
                fn twice_m(self) -> Option<i64> {
                    // Beyond ±2^62 the cast saturates; no lattice has such levels.
                    (self.is_finite() && self.fract() == 0.0 && self.abs() < 4.0e18)
                        .then(|| self as i64)
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    f64::from(self)
                }
            }
        )*
    };
}

impl_spin_value_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_roundtrip() {
        for v in [-7_i64, -1, 0, 1, 7] {
            assert_eq!(i8::from_twice_m(v).and_then(SpinValue::twice_m), Some(v));
            assert_eq!(i32::from_twice_m(v).and_then(SpinValue::twice_m), Some(v));
        }
    }

    #[test]
    fn test_i8_rejects_wide_levels() {
        assert_eq!(i8::from_twice_m(127), Some(127));
        assert_eq!(i8::from_twice_m(129), None);
        assert_eq!(i8::from_twice_m(-129), None);
    }

    #[test]
    fn test_float_exact_levels() {
        for v in -31_i64..=31 {
            let f = f64::from_twice_m(v).unwrap();
            assert_eq!(f.twice_m(), Some(v));
            let g = f32::from_twice_m(v).unwrap();
            assert_eq!(g.twice_m(), Some(v));
        }
    }

    #[test]
    fn test_float_rejects_fractional() {
        assert_eq!(0.5_f64.twice_m(), None);
        assert_eq!(f64::NAN.twice_m(), None);
        assert_eq!(f64::INFINITY.twice_m(), None);
        assert_eq!((-1.0000001_f32).twice_m(), None);
    }

    #[test]
    fn test_f32_rejects_inexact() {
        // 2^24 + 1 has no exact f32 representation.
        assert_eq!(f32::from_twice_m((1 << 24) + 1), None);
    }
}
