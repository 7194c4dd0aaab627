//! Affine transform carrying its own inverse.
//!
//! A [`Transform`] pairs a forward [`Mat4`] with its inverse. Every mutator
//! updates both in closed form, so the pair stays consistent
//! (`matrix * inv_matrix ≈ I`) without ever running a general inversion.
//! Only [`Transform::from_matrix`] inverts, once.

use std::ops::{Mul, MulAssign};

use serde::{Deserialize, Serialize};

use crate::matrix::Mat4;
use crate::scalar::{angle_deg_from_sin_cos, rotation_block, sin_cos_deg, Real};
use crate::vector::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform<T> {
    pub matrix: Mat4<T>,
    pub inv_matrix: Mat4<T>,
}

impl<T: Real> Default for Transform<T> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T: Real> Transform<T> {
    pub const IDENTITY: Self = Self {
        matrix: Mat4::IDENTITY,
        inv_matrix: Mat4::IDENTITY,
    };

    pub const fn new() -> Self {
        Self::IDENTITY
    }

    /// Wraps a matrix, computing its inverse once.
    ///
    /// A singular matrix gets the undivided adjugate as its inverse.
    pub fn from_matrix(matrix: Mat4<T>) -> Self {
        Self {
            matrix,
            inv_matrix: matrix.inversing(),
        }
    }

    /// Wraps a matrix and an inverse the caller already knows.
    pub const fn from_pair(matrix: Mat4<T>, inv_matrix: Mat4<T>) -> Self {
        Self { matrix, inv_matrix }
    }

    /// The same pair with forward and inverse swapped.
    pub fn inverted(&self) -> Self {
        Self {
            matrix: self.inv_matrix,
            inv_matrix: self.matrix,
        }
    }

    pub fn set_unit(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    pub fn set_translate(&mut self, shift: Vec3<T>) -> &mut Self {
        self.matrix.set_translate(shift);
        self.inv_matrix.set_translate(-shift);
        self
    }

    pub fn set_rotate_x_sin_cos(&mut self, sine: T, cosine: T) -> &mut Self {
        self.matrix.set_rotate_x_sin_cos(sine, cosine);
        self.inv_matrix.set_rotate_x_sin_cos(-sine, cosine);
        self
    }

    pub fn set_rotate_x(&mut self, angle_in_degrees: T) -> &mut Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.set_rotate_x_sin_cos(s, c)
    }

    pub fn set_rotate_y_sin_cos(&mut self, sine: T, cosine: T) -> &mut Self {
        self.matrix.set_rotate_y_sin_cos(sine, cosine);
        self.inv_matrix.set_rotate_y_sin_cos(-sine, cosine);
        self
    }

    pub fn set_rotate_y(&mut self, angle_in_degrees: T) -> &mut Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.set_rotate_y_sin_cos(s, c)
    }

    pub fn set_rotate_z_sin_cos(&mut self, sine: T, cosine: T) -> &mut Self {
        self.matrix.set_rotate_z_sin_cos(sine, cosine);
        self.inv_matrix.set_rotate_z_sin_cos(-sine, cosine);
        self
    }

    pub fn set_rotate_z(&mut self, angle_in_degrees: T) -> &mut Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.set_rotate_z_sin_cos(s, c)
    }

    /// Rotation about an arbitrary axis; the inverse is the transposed block.
    pub fn set_rotate(&mut self, angle_in_degrees: T, axis: Vec3<T>) -> &mut Self {
        self.matrix.set_rotate(angle_in_degrees, axis);
        self.inv_matrix = Mat4::IDENTITY;
        for i in 0..3 {
            for j in 0..3 {
                self.inv_matrix.m[i][j] = self.matrix.m[j][i];
            }
        }
        self
    }

    pub fn set_rotate_sin_cos(&mut self, sine: T, cosine: T, axis: Vec3<T>) -> &mut Self {
        self.set_rotate(angle_deg_from_sin_cos(sine, cosine), axis)
    }

    pub fn set_scale(&mut self, factors: Vec3<T>) -> &mut Self {
        self.matrix.set_scale(factors);
        self.inv_matrix.set_scale(Vec3::new(
            T::ONE / factors.x,
            T::ONE / factors.y,
            T::ONE / factors.z,
        ));
        self
    }

    pub fn translate(&mut self, shift: Vec3<T>) -> &mut Self {
        self.matrix.translate(shift);
        let inv = &mut self.inv_matrix.m;
        for j in 0..3 {
            let delta = shift.x * inv[0][j] + shift.y * inv[1][j] + shift.z * inv[2][j];
            inv[3][j] -= delta;
        }
        self
    }

    /// Pre-concatenates a plane rotation onto the inverse: rows `a` and `b`
    /// of its linear block become `c*a - s*b` and `s*a + c*b`.
    fn mix_inverse_rows(&mut self, a: usize, b: usize, sine: T, cosine: T) {
        let inv = &mut self.inv_matrix.m;
        for j in 0..3 {
            let (ra, rb) = (inv[a][j], inv[b][j]);
            inv[a][j] = ra * cosine - rb * sine;
            inv[b][j] = ra * sine + rb * cosine;
        }
    }

    pub fn rotate_x_sin_cos(&mut self, sine: T, cosine: T) -> &mut Self {
        self.matrix.rotate_x_sin_cos(sine, cosine);
        self.mix_inverse_rows(1, 2, sine, cosine);
        self
    }

    pub fn rotate_x(&mut self, angle_in_degrees: T) -> &mut Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.rotate_x_sin_cos(s, c)
    }

    pub fn rotate_y_sin_cos(&mut self, sine: T, cosine: T) -> &mut Self {
        self.matrix.rotate_y_sin_cos(sine, cosine);
        self.mix_inverse_rows(2, 0, sine, cosine);
        self
    }

    pub fn rotate_y(&mut self, angle_in_degrees: T) -> &mut Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.rotate_y_sin_cos(s, c)
    }

    pub fn rotate_z_sin_cos(&mut self, sine: T, cosine: T) -> &mut Self {
        self.matrix.rotate_z_sin_cos(sine, cosine);
        self.mix_inverse_rows(0, 1, sine, cosine);
        self
    }

    pub fn rotate_z(&mut self, angle_in_degrees: T) -> &mut Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.rotate_z_sin_cos(s, c)
    }

    /// `matrix = matrix * R`, `inv = Rᵀ * inv`.
    pub fn rotate(&mut self, angle_in_degrees: T, axis: Vec3<T>) -> &mut Self {
        self.matrix.rotate(angle_in_degrees, axis);
        let r = rotation_block(angle_in_degrees, axis.x, axis.y, axis.z);
        let inv = &mut self.inv_matrix.m;
        let old = [inv[0], inv[1], inv[2]];
        for (i, row) in inv.iter_mut().take(3).enumerate() {
            for j in 0..3 {
                row[j] = r[0][i] * old[0][j] + r[1][i] * old[1][j] + r[2][i] * old[2][j];
            }
        }
        self
    }

    pub fn rotate_sin_cos(&mut self, sine: T, cosine: T, axis: Vec3<T>) -> &mut Self {
        self.rotate(angle_deg_from_sin_cos(sine, cosine), axis)
    }

    pub fn scale(&mut self, factors: Vec3<T>) -> &mut Self {
        self.matrix.scale(factors);
        let inv = &mut self.inv_matrix.m;
        for (row, factor) in inv.iter_mut().zip([factors.x, factors.y, factors.z]) {
            row[0] /= factor;
            row[1] /= factor;
            row[2] /= factor;
        }
        self
    }

    pub fn scale_uniform(&mut self, factor: T) -> &mut Self {
        self.scale(Vec3::splat(factor))
    }

    /// Appends `other`: `matrix = matrix * other.matrix`.
    pub fn transform(&mut self, other: &Self) -> &mut Self {
        self.matrix *= other.matrix;
        self.inv_matrix = other.inv_matrix * self.inv_matrix;
        self
    }

    /// Prepends the inverse of `other`: `matrix = other.inv_matrix * matrix`.
    pub fn inv_transform(&mut self, other: &Self) -> &mut Self {
        self.matrix = other.inv_matrix * self.matrix;
        self.inv_matrix *= other.matrix;
        self
    }

    pub fn translation(&self, shift: Vec3<T>) -> Self {
        let mut r = *self;
        r.translate(shift);
        r
    }

    pub fn rotation_x(&self, angle_in_degrees: T) -> Self {
        let mut r = *self;
        r.rotate_x(angle_in_degrees);
        r
    }

    pub fn rotation_y(&self, angle_in_degrees: T) -> Self {
        let mut r = *self;
        r.rotate_y(angle_in_degrees);
        r
    }

    pub fn rotation_z(&self, angle_in_degrees: T) -> Self {
        let mut r = *self;
        r.rotate_z(angle_in_degrees);
        r
    }

    pub fn rotation(&self, angle_in_degrees: T, axis: Vec3<T>) -> Self {
        let mut r = *self;
        r.rotate(angle_in_degrees, axis);
        r
    }

    pub fn scaling(&self, factors: Vec3<T>) -> Self {
        let mut r = *self;
        r.scale(factors);
        r
    }

    pub fn transformation(&self, other: &Self) -> Self {
        let mut r = *self;
        r.transform(other);
        r
    }

    pub fn inv_transformation(&self, other: &Self) -> Self {
        let mut r = *self;
        r.inv_transform(other);
        r
    }

    pub fn transform_point(&self, p: Vec3<T>) -> Vec3<T> {
        self.matrix.transform_point(p)
    }

    pub fn inv_transform_point(&self, p: Vec3<T>) -> Vec3<T> {
        self.inv_matrix.transform_point(p)
    }

    pub fn transform_vector(&self, v: Vec3<T>) -> Vec3<T> {
        self.matrix.transform_vector(v)
    }

    pub fn inv_transform_vector(&self, v: Vec3<T>) -> Vec3<T> {
        self.inv_matrix.transform_vector(v)
    }

    /// Transforms a surface normal by the transposed inverse block and
    /// renormalizes it.
    pub fn transform_normal(&self, n: Vec3<T>) -> Vec3<T> {
        transposed_block_times(&self.inv_matrix, n).normalizing()
    }

    /// Inverse of [`Transform::transform_normal`]: uses the transposed
    /// forward block.
    pub fn inv_transform_normal(&self, n: Vec3<T>) -> Vec3<T> {
        transposed_block_times(&self.matrix, n).normalizing()
    }
}

fn transposed_block_times<T: Real>(m: &Mat4<T>, n: Vec3<T>) -> Vec3<T> {
    let m = &m.m;
    Vec3::new(
        n.x * m[0][0] + n.y * m[0][1] + n.z * m[0][2],
        n.x * m[1][0] + n.y * m[1][1] + n.z * m[1][2],
        n.x * m[2][0] + n.y * m[2][1] + n.z * m[2][2],
    )
}

impl<T: Real> Mul for Transform<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.transformation(&rhs)
    }
}

impl<T: Real> MulAssign for Transform<T> {
    fn mul_assign(&mut self, rhs: Self) {
        self.transform(&rhs);
    }
}

/// Point transforms through a [`Transform`].
impl<T: Real> Vec3<T> {
    pub fn transform(&mut self, trans: &Transform<T>) -> &mut Self {
        *self = trans.transform_point(*self);
        self
    }

    pub fn inv_transform(&mut self, trans: &Transform<T>) -> &mut Self {
        *self = trans.inv_transform_point(*self);
        self
    }

    pub fn transformation(self, trans: &Transform<T>) -> Self {
        trans.transform_point(self)
    }

    pub fn inv_transformation(self, trans: &Transform<T>) -> Self {
        trans.inv_transform_point(self)
    }
}
