//! Three-component vector.
//!
//! `Vec3` is a plain value type. Equality is approximate: two vectors are
//! equal when every component differs by less than [`Real::THRESHOLD`].

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::scalar::{angle_deg_from_sin_cos, rotation_block, sin_cos_deg, Real};

/// 3D vector (or point) with real components.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Vec3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Real> Vec3<T> {
    pub const ZERO: Self = Self {
        x: T::ZERO,
        y: T::ZERO,
        z: T::ZERO,
    };
    pub const X: Self = Self {
        x: T::ONE,
        y: T::ZERO,
        z: T::ZERO,
    };
    pub const Y: Self = Self {
        x: T::ZERO,
        y: T::ONE,
        z: T::ZERO,
    };
    pub const Z: Self = Self {
        x: T::ZERO,
        y: T::ZERO,
        z: T::ONE,
    };

    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Vector with all three components equal to `value`.
    pub const fn splat(value: T) -> Self {
        Self {
            x: value,
            y: value,
            z: value,
        }
    }

    pub fn dot(self, rhs: Self) -> T {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Right-handed cross product.
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - rhs.y * self.z,
            rhs.x * self.z - self.x * rhs.z,
            self.x * rhs.y - rhs.x * self.y,
        )
    }

    /// Squared length.
    pub fn length2(self) -> T {
        self.dot(self)
    }

    /// Euclidean length. No square root is taken when the squared length is
    /// exactly 0 or 1.
    pub fn length(self) -> T {
        let len = self.length2();
        if len > T::ZERO && len != T::ONE {
            len.sqrt()
        } else {
            len
        }
    }

    /// Normalizes in place. Zero and unit vectors are left untouched.
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length2();
        if len > T::ZERO && len != T::ONE {
            let len = len.sqrt();
            self.x /= len;
            self.y /= len;
            self.z /= len;
        }
        self
    }

    /// Returns the normalized vector. Zero and unit vectors come back as is.
    pub fn normalizing(self) -> Self {
        let mut v = self;
        v.normalize();
        v
    }

    pub fn negate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
        self
    }

    /// Clamps every component into `[min, max]` in place.
    pub fn clamp(&mut self, min: T, max: T) -> &mut Self {
        *self = self.clamping(min, max);
        self
    }

    pub fn clamping(self, min: T, max: T) -> Self {
        Self::new(
            crate::scalar::clamp(self.x, min, max),
            crate::scalar::clamp(self.y, min, max),
            crate::scalar::clamp(self.z, min, max),
        )
    }

    /// Clamps every component into `[0, 1]`.
    pub fn saturate(self) -> Self {
        self.clamping(T::ZERO, T::ONE)
    }

    pub fn translate(&mut self, shift: Self) -> &mut Self {
        *self += shift;
        self
    }

    pub fn translation(self, shift: Self) -> Self {
        self + shift
    }

    pub fn translate_by(&mut self, dx: T, dy: T, dz: T) -> &mut Self {
        self.translate(Self::new(dx, dy, dz))
    }

    pub fn rotate_x_sin_cos(&mut self, sine: T, cosine: T) -> &mut Self {
        *self = self.rotation_x_sin_cos(sine, cosine);
        self
    }

    pub fn rotate_x(&mut self, angle_in_degrees: T) -> &mut Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.rotate_x_sin_cos(s, c)
    }

    pub fn rotate_y_sin_cos(&mut self, sine: T, cosine: T) -> &mut Self {
        *self = self.rotation_y_sin_cos(sine, cosine);
        self
    }

    pub fn rotate_y(&mut self, angle_in_degrees: T) -> &mut Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.rotate_y_sin_cos(s, c)
    }

    pub fn rotate_z_sin_cos(&mut self, sine: T, cosine: T) -> &mut Self {
        *self = self.rotation_z_sin_cos(sine, cosine);
        self
    }

    pub fn rotate_z(&mut self, angle_in_degrees: T) -> &mut Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.rotate_z_sin_cos(s, c)
    }

    /// Rotates about an arbitrary axis (half-angle construction).
    pub fn rotate(&mut self, angle_in_degrees: T, axis: Self) -> &mut Self {
        *self = self.rotation(angle_in_degrees, axis);
        self
    }

    pub fn rotate_sin_cos(&mut self, sine: T, cosine: T, axis: Self) -> &mut Self {
        self.rotate(angle_deg_from_sin_cos(sine, cosine), axis)
    }

    pub fn rotation_x_sin_cos(self, sine: T, cosine: T) -> Self {
        Self::new(
            self.x,
            self.y * cosine - self.z * sine,
            self.y * sine + self.z * cosine,
        )
    }

    pub fn rotation_x(self, angle_in_degrees: T) -> Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.rotation_x_sin_cos(s, c)
    }

    pub fn rotation_y_sin_cos(self, sine: T, cosine: T) -> Self {
        Self::new(
            self.z * sine + self.x * cosine,
            self.y,
            self.z * cosine - self.x * sine,
        )
    }

    pub fn rotation_y(self, angle_in_degrees: T) -> Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.rotation_y_sin_cos(s, c)
    }

    pub fn rotation_z_sin_cos(self, sine: T, cosine: T) -> Self {
        Self::new(
            self.x * cosine - self.y * sine,
            self.x * sine + self.y * cosine,
            self.z,
        )
    }

    pub fn rotation_z(self, angle_in_degrees: T) -> Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.rotation_z_sin_cos(s, c)
    }

    pub fn rotation(self, angle_in_degrees: T, axis: Self) -> Self {
        let r = rotation_block(angle_in_degrees, axis.x, axis.y, axis.z);
        Self::new(
            self.x * r[0][0] + self.y * r[1][0] + self.z * r[2][0],
            self.x * r[0][1] + self.y * r[1][1] + self.z * r[2][1],
            self.x * r[0][2] + self.y * r[1][2] + self.z * r[2][2],
        )
    }

    pub fn rotation_sin_cos(self, sine: T, cosine: T, axis: Self) -> Self {
        self.rotation(angle_deg_from_sin_cos(sine, cosine), axis)
    }

    /// Scales per axis in place.
    pub fn scale(&mut self, factors: Self) -> &mut Self {
        *self *= factors;
        self
    }

    pub fn scaling(self, factors: Self) -> Self {
        self * factors
    }

    pub fn to_array(self) -> [T; 3] {
        [self.x, self.y, self.z]
    }
}

impl<T: Real> PartialEq for Vec3<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < T::THRESHOLD
            && (self.y - other.y).abs() < T::THRESHOLD
            && (self.z - other.z).abs() < T::THRESHOLD
    }
}

impl<T: Real> From<[T; 3]> for Vec3<T> {
    fn from(v: [T; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl<T: Real> From<Vec3<T>> for [T; 3] {
    fn from(v: Vec3<T>) -> Self {
        v.to_array()
    }
}

impl<T: Real> Add for Vec3<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Real> Sub for Vec3<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Component-wise product.
impl<T: Real> Mul for Vec3<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl<T: Real> Mul<T> for Vec3<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl<T: Real> Div<T> for Vec3<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// Component-wise quotient.
impl<T: Real> Div for Vec3<T> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl<T: Real> Neg for Vec3<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T: Real> AddAssign for Vec3<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<T: Real> SubAssign for Vec3<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl<T: Real> MulAssign for Vec3<T> {
    fn mul_assign(&mut self, rhs: Self) {
        self.x *= rhs.x;
        self.y *= rhs.y;
        self.z *= rhs.z;
    }
}

impl<T: Real> MulAssign<T> for Vec3<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl<T: Real> DivAssign for Vec3<T> {
    fn div_assign(&mut self, rhs: Self) {
        self.x /= rhs.x;
        self.y /= rhs.y;
        self.z /= rhs.z;
    }
}

impl<T: Real> DivAssign<T> for Vec3<T> {
    fn div_assign(&mut self, rhs: T) {
        self.x /= rhs;
        self.y /= rhs;
        self.z /= rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type V = Vec3<f64>;

    #[test]
    fn cross_is_right_handed() {
        assert_eq!(V::X.cross(V::Y), V::Z);
        assert_eq!(V::Y.cross(V::Z), V::X);
        assert_eq!(V::Z.cross(V::X), V::Y);
        assert_eq!(V::Y.cross(V::X), -V::Z);
    }

    #[test]
    fn normalize_leaves_zero_vector_alone() {
        let mut v = V::ZERO;
        v.normalize();
        assert_eq!(v, V::ZERO);
        assert_eq!(V::ZERO.length(), 0.0);
    }

    #[test]
    fn normalizing_gives_unit_length() {
        let v = V::new(3.0, -4.0, 12.0).normalizing();
        assert!((v.length() - 1.0).abs() < 1e-12);
        assert_eq!(v, V::new(3.0 / 13.0, -4.0 / 13.0, 12.0 / 13.0));
    }

    #[test]
    fn length_skips_sqrt_for_unit_squared_length() {
        assert_eq!(V::X.length(), 1.0);
        assert_eq!(V::new(0.0, 3.0, 4.0).length(), 5.0);
        assert_eq!(V::new(0.0, 3.0, 4.0).length2(), 25.0);
    }

    #[test]
    fn equality_uses_threshold() {
        assert_eq!(V::new(1.0, 2.0, 3.0), V::new(1.0 + 5e-7, 2.0, 3.0 - 5e-7));
        assert_ne!(V::new(1.0, 2.0, 3.0), V::new(1.0 + 5e-6, 2.0, 3.0));
    }

    #[test]
    fn clamping_per_component() {
        let v = V::new(-1.0, 0.5, 2.0);
        assert_eq!(v.saturate(), V::new(0.0, 0.5, 1.0));
        let mut w = v;
        w.clamp(-0.5, 0.25);
        assert_eq!(w, V::new(-0.5, 0.25, 0.25));
    }

    #[test]
    fn cardinal_rotations() {
        assert_eq!(V::X.rotation_z(90.0), V::Y);
        assert_eq!(V::Y.rotation_x(90.0), V::Z);
        assert_eq!(V::Z.rotation_y(90.0), V::X);

        let mut v = V::new(1.0, 2.0, 3.0);
        v.rotate_z(30.0).rotate_z(-30.0);
        assert_eq!(v, V::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn arbitrary_axis_rotation_undoes_itself() {
        let axis = V::new(1.0, 1.0, -2.0);
        let v = V::new(0.3, -1.7, 4.0);
        let back = v.rotation(47.0, axis).rotation(-47.0, axis);
        assert_eq!(back, v);
    }

    #[test]
    fn arbitrary_axis_rotation_keeps_length_and_axis() {
        let axis = V::new(0.0, 2.0, 0.0);
        let v = V::new(1.0, 1.0, 0.0);
        let r = v.rotation(90.0, axis);
        assert!((r.length() - v.length()).abs() < 1e-12);
        assert!((r.y - 1.0).abs() < 1e-12);
        assert_eq!(axis.rotation(33.0, axis), axis);
    }

    #[test]
    fn sin_cos_rotation_matches_degrees() {
        let (s, c) = crate::scalar::sin_cos_deg(25.0_f64);
        let axis = V::new(0.2, 0.9, 0.4);
        let v = V::new(1.0, 0.0, 0.0);
        assert_eq!(v.rotation_sin_cos(s, c, axis), v.rotation(25.0, axis));
    }

    #[test]
    fn translate_and_scale_helpers() {
        let mut v = V::new(1.0, 1.0, 1.0);
        v.translate(V::new(1.0, 2.0, 3.0)).scale(V::new(2.0, 3.0, 4.0));
        assert_eq!(v, V::new(4.0, 9.0, 16.0));
        assert_eq!(v.translation(-v), V::ZERO);
        assert_eq!(v / V::new(4.0, 3.0, 2.0), V::new(1.0, 3.0, 8.0));
        v.translate_by(-4.0, 0.0, 0.0);
        assert_eq!(v.x, 0.0);
    }
}
