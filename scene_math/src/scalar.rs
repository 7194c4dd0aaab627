//! Scalar precision and small numeric helpers.
//!
//! Every math type in this crate is generic over [`Real`], which is
//! implemented for `f32` and `f64`. Each precision carries its own
//! comparison threshold.

use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Floating point scalar used by vectors, matrices, transforms and cameras.
pub trait Real:
    Copy
    + Debug
    + Display
    + Default
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;
    const HALF: Self;
    /// Threshold used by approximate comparisons and axis normalization.
    const THRESHOLD: Self;
    const PI: Self;
    const DEG_TO_RAD: Self;
    const RAD_TO_DEG: Self;

    fn sqrt(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn atan2(self, other: Self) -> Self;
    fn abs(self) -> Self;
    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;

    /// Sine and cosine of an angle in radians.
    fn sin_cos(self) -> (Self, Self) {
        (self.sin(), self.cos())
    }
}

macro_rules! impl_real {
    ($t:ident, $threshold:expr) => {
        impl Real for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const HALF: Self = 0.5;
            const THRESHOLD: Self = $threshold;
            const PI: Self = std::$t::consts::PI;
            const DEG_TO_RAD: Self = std::$t::consts::PI / 180.0;
            const RAD_TO_DEG: Self = 180.0 / std::$t::consts::PI;

            #[inline]
            fn sqrt(self) -> Self {
                $t::sqrt(self)
            }
            #[inline]
            fn sin(self) -> Self {
                $t::sin(self)
            }
            #[inline]
            fn cos(self) -> Self {
                $t::cos(self)
            }
            #[inline]
            fn atan2(self, other: Self) -> Self {
                $t::atan2(self, other)
            }
            #[inline]
            fn abs(self) -> Self {
                $t::abs(self)
            }
            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
            #[inline]
            fn sin_cos(self) -> (Self, Self) {
                $t::sin_cos(self)
            }
        }
    };
}

impl_real!(f32, 1e-6);
impl_real!(f64, 1e-6);

/// Converts degrees to radians.
#[inline]
pub fn deg_to_rad<T: Real>(angle: T) -> T {
    angle * T::DEG_TO_RAD
}

/// Converts radians to degrees.
#[inline]
pub fn rad_to_deg<T: Real>(angle: T) -> T {
    angle * T::RAD_TO_DEG
}

/// Sine and cosine of an angle given in degrees.
#[inline]
pub fn sin_cos_deg<T: Real>(angle_in_degrees: T) -> (T, T) {
    deg_to_rad(angle_in_degrees).sin_cos()
}

/// Angle in degrees recovered from a (sine, cosine) pair.
#[inline]
pub fn angle_deg_from_sin_cos<T: Real>(sine: T, cosine: T) -> T {
    rad_to_deg(sine.atan2(cosine))
}

/// Clamps `value` into `[min, max]`.
#[inline]
pub fn clamp<T: Real>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

pub fn min3<T: Real>(x: T, y: T, z: T) -> T {
    let m = if x < y { x } else { y };
    if m < z {
        m
    } else {
        z
    }
}

pub fn max3<T: Real>(x: T, y: T, z: T) -> T {
    let m = if x > y { x } else { y };
    if m > z {
        m
    } else {
        z
    }
}

/// Interpolates between `y0` and `y1` with `t` in `[0, 1]`.
///
/// Works for any value type that supports scaling, so vectors and colors
/// interpolate through the same function.
pub fn lerp<T, V>(t: T, y0: V, y1: V) -> V
where
    T: Real,
    V: Mul<T, Output = V> + Add<Output = V>,
{
    y0 * (T::ONE - t) + y1 * t
}

/// Maps `value` from `[x0, x1]` onto `[y0, y1]`, saturating at the ends.
///
/// Reversed ranges (`x0 > x1`) are supported; `y0` is still the value at
/// `x0`.
pub fn lerp_range<T, V>(value: T, x0: T, x1: T, y0: V, y1: V) -> V
where
    T: Real,
    V: Mul<T, Output = V> + Add<Output = V>,
{
    if x0 <= x1 {
        if value <= x0 {
            return y0;
        }
        if value >= x1 {
            return y1;
        }
        let t = (value - x0) / (x1 - x0);
        return lerp(t, y0, y1);
    }
    if value >= x0 {
        return y0;
    }
    if value <= x1 {
        return y1;
    }
    let t = (x0 - value) / (x0 - x1);
    lerp(t, y0, y1)
}

/// Determinant of a 3x3 matrix given row by row.
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn determinant3x3<T: Real>(
    m11: T,
    m12: T,
    m13: T,
    m21: T,
    m22: T,
    m23: T,
    m31: T,
    m32: T,
    m33: T,
) -> T {
    m11 * m22 * m33 + m12 * m23 * m31 + m13 * m21 * m32
        - m11 * m23 * m32
        - m12 * m21 * m33
        - m13 * m22 * m31
}

/// Builds the 3x3 rotation about an arbitrary axis from the half-angle form.
///
/// The axis is normalized unless its squared length is within the threshold
/// of 0 or 1. A zero axis therefore yields the identity.
pub(crate) fn rotation_block<T: Real>(angle_in_degrees: T, ax: T, ay: T, az: T) -> [[T; 3]; 3] {
    let (h, s) = sin_cos_deg(angle_in_degrees * T::HALF);
    let len2 = ax * ax + ay * ay + az * az;

    let (vx, vy, vz) = if len2.abs() > T::THRESHOLD && (len2 - T::ONE).abs() > T::THRESHOLD {
        let len = len2.sqrt();
        (ax * h / len, ay * h / len, az * h / len)
    } else {
        (ax * h, ay * h, az * h)
    };

    let two = T::TWO;
    [
        [
            T::ONE - two * (vy * vy + vz * vz),
            two * vx * vy - two * s * vz,
            two * s * vy + two * vx * vz,
        ],
        [
            two * vx * vy + two * s * vz,
            T::ONE - two * (vx * vx + vz * vz),
            -two * s * vx + two * vy * vz,
        ],
        [
            -two * s * vy + two * vx * vz,
            two * s * vx + two * vy * vz,
            T::ONE - two * (vx * vx + vy * vy),
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_radian_roundtrip() {
        assert!((deg_to_rad(180.0_f64) - std::f64::consts::PI).abs() < 1e-12);
        assert!((rad_to_deg(std::f32::consts::FRAC_PI_2) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn min_max_of_three() {
        assert_eq!(min3(3.0, -1.0, 2.0), -1.0);
        assert_eq!(max3(3.0_f32, -1.0, 7.0), 7.0);
        assert_eq!(min3(1.0, 2.0, 0.5), 0.5);
    }

    #[test]
    fn lerp_range_saturates_and_reverses() {
        assert_eq!(lerp_range(-1.0_f64, 0.0, 10.0, 0.0_f64, 100.0), 0.0);
        assert_eq!(lerp_range(20.0_f64, 0.0, 10.0, 0.0_f64, 100.0), 100.0);
        assert!((lerp_range(2.5_f64, 0.0, 10.0, 0.0_f64, 100.0) - 25.0).abs() < 1e-12);
        // Reversed input range: x0 = 10 maps to y0.
        assert!((lerp_range(7.5_f64, 10.0, 0.0, 0.0_f64, 100.0) - 25.0).abs() < 1e-12);
        assert_eq!(lerp_range(11.0_f64, 10.0, 0.0, 0.0_f64, 100.0), 0.0);
    }

    #[test]
    fn determinant_of_identity_and_scale() {
        assert_eq!(determinant3x3(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0), 1.0);
        assert_eq!(determinant3x3(2.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 4.0), 24.0);
    }

    #[test]
    fn zero_axis_rotation_block_is_identity() {
        let r = rotation_block(73.0_f64, 0.0, 0.0, 0.0);
        for (i, row) in r.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((value - expected).abs() < 1e-12);
            }
        }
    }
}
