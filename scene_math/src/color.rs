//! RGBA color.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::scalar::{clamp, max3, Real};

/// Floating point RGBA color. Channels are nominally in `[0, 1]` but are
/// not clamped by arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color<T> {
    pub r: T,
    pub g: T,
    pub b: T,
    pub a: T,
}

impl<T: Real> Default for Color<T> {
    /// Opaque black.
    fn default() -> Self {
        Self::rgb(T::ZERO, T::ZERO, T::ZERO)
    }
}

impl<T: Real> Color<T> {
    pub const fn new(r: T, g: T, b: T, a: T) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: T, g: T, b: T) -> Self {
        Self { r, g, b, a: T::ONE }
    }

    pub const fn gray(value: T) -> Self {
        Self::rgb(value, value, value)
    }

    /// Unpacks `0xAARRGGBB`.
    pub fn from_argb(value: u32) -> Self {
        let channel = |shift: u32| T::from_f64(f64::from((value >> shift) & 0xFF) / 255.0);
        Self::new(channel(16), channel(8), channel(0), channel(24))
    }

    /// Packs into `0xAARRGGBB`, each channel scaled by 255 and saturated.
    pub fn to_argb(&self) -> u32 {
        let byte = |v: T| -> u32 { (v.to_f64() * 255.0).round().clamp(0.0, 255.0) as u32 };
        (byte(self.a) << 24) | (byte(self.r) << 16) | (byte(self.g) << 8) | byte(self.b)
    }

    pub fn set(&mut self, r: T, g: T, b: T, a: T) -> &mut Self {
        *self = Self::new(r, g, b, a);
        self
    }

    /// Largest of the r, g, b channels.
    pub fn maximum(&self) -> T {
        max3(self.r, self.g, self.b)
    }

    /// Clamps r, g, b in place; alpha is untouched.
    pub fn clamp(&mut self, min: T, max: T) -> &mut Self {
        self.r = clamp(self.r, min, max);
        self.g = clamp(self.g, min, max);
        self.b = clamp(self.b, min, max);
        self
    }

    /// Clamped copy of r, g, b with alpha reset to 1.
    pub fn clamping(&self, min: T, max: T) -> Self {
        Self::rgb(
            clamp(self.r, min, max),
            clamp(self.g, min, max),
            clamp(self.b, min, max),
        )
    }
}

impl<T: Real> Add for Color<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

impl<T: Real> AddAssign for Color<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Real> Sub for Color<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b, self.a - rhs.a)
    }
}

impl<T: Real> SubAssign for Color<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Real> Mul for Color<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b, self.a * rhs.a)
    }
}

impl<T: Real> MulAssign for Color<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Real> Mul<T> for Color<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

impl<T: Real> MulAssign<T> for Color<T> {
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T: Real> Div<T> for Color<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        Self::new(self.r / rhs, self.g / rhs, self.b / rhs, self.a / rhs)
    }
}

impl<T: Real> DivAssign<T> for Color<T> {
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::lerp;

    type C = Color<f32>;

    #[test]
    fn argb_unpack_and_pack() {
        let c = C::from_argb(0x80FF_4000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 64.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);

        for value in [0x0000_0000u32, 0xFFFF_FFFF, 0x80FF_4000, 0x1234_5678, 0xDEAD_BEEF] {
            assert_eq!(Color::<f64>::from_argb(value).to_argb(), value);
            assert_eq!(C::from_argb(value).to_argb(), value);
        }
    }

    #[test]
    fn packing_saturates() {
        let c = C::new(2.0, -1.0, 0.5, 1.0);
        assert_eq!(c.to_argb(), 0xFFFF_0080);
    }

    #[test]
    fn arithmetic_is_componentwise() {
        let a = C::new(0.2, 0.4, 0.6, 1.0);
        let b = C::new(0.1, 0.1, 0.1, 0.5);
        let sum = a + b;
        assert!((sum.g - 0.5).abs() < 1e-6);
        assert!((sum.a - 1.5).abs() < 1e-6);
        assert_eq!((a * 2.0).b, 1.2);
        assert_eq!((a * b).a, 0.5);
        assert!(((a / 2.0).r - 0.1).abs() < 1e-6);

        let mut m = a;
        m -= b;
        m += b;
        m *= 1.0;
        m /= 1.0;
        assert!((m.r - a.r).abs() < 1e-6);

        let mid = lerp(0.5, C::gray(0.0), C::gray(1.0));
        assert!((mid.r - 0.5).abs() < 1e-6);
    }

    #[test]
    fn clamp_keeps_alpha_but_clamping_resets_it() {
        let mut c = C::new(1.5, -0.5, 0.3, 0.25);
        let copy = c.clamping(0.0, 1.0);
        c.clamp(0.0, 1.0);
        assert_eq!(c, C::new(1.0, 0.0, 0.3, 0.25));
        assert_eq!(copy, C::new(1.0, 0.0, 0.3, 1.0));
        assert_eq!(C::new(0.1, 0.9, 0.4, 0.0).maximum(), 0.9);
    }

    #[test]
    fn default_is_opaque_black() {
        let mut c = C::default();
        assert_eq!(c, C::rgb(0.0, 0.0, 0.0));
        c.set(0.1, 0.2, 0.3, 0.4);
        assert_eq!(c.a, 0.4);
    }
}
