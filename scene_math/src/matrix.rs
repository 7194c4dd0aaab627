//! 4x4 affine transformation matrix.
//!
//! Storage is row-major and points are row vectors: `p' = p * M`, with the
//! translation in row 3. Every matrix produced by an affine operation keeps
//! column 3 equal to `[0, 0, 0, 1]`:
//!
//! ```text
//!   a00 a01 a02 0
//!   a10 a11 a12 0
//!   a20 a21 a22 0
//!   a30 a31 a32 1
//! ```
//!
//! Mutating operators (`translate`, `rotate_*`, `scale`, `transform`)
//! right-multiply in place, so `m.translate(t).scale(s)` equals
//! `m * T(t) * S(s)`. The returning variants (`translation`, `rotation_*`,
//! `scaling`, `transformation`) produce the same product without touching
//! `self`.

use std::ops::{Mul, MulAssign};

use serde::{Deserialize, Serialize};

use crate::scalar::{angle_deg_from_sin_cos, determinant3x3, rotation_block, sin_cos_deg, Real};
use crate::transform::Transform;
use crate::vector::Vec3;

/// 4x4 matrix, row-major, row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4<T> {
    pub m: [[T; 4]; 4],
}

impl<T: Real> Default for Mat4<T> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T: Real> Mat4<T> {
    pub const IDENTITY: Self = Self {
        m: [
            [T::ONE, T::ZERO, T::ZERO, T::ZERO],
            [T::ZERO, T::ONE, T::ZERO, T::ZERO],
            [T::ZERO, T::ZERO, T::ONE, T::ZERO],
            [T::ZERO, T::ZERO, T::ZERO, T::ONE],
        ],
    };

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Affine matrix from its 3x3 linear block and translation row.
    #[allow(clippy::too_many_arguments)]
    pub const fn affine(
        m00: T,
        m01: T,
        m02: T,
        m10: T,
        m11: T,
        m12: T,
        m20: T,
        m21: T,
        m22: T,
        m30: T,
        m31: T,
        m32: T,
    ) -> Self {
        Self {
            m: [
                [m00, m01, m02, T::ZERO],
                [m10, m11, m12, T::ZERO],
                [m20, m21, m22, T::ZERO],
                [m30, m31, m32, T::ONE],
            ],
        }
    }

    /// Matrix from all sixteen entries.
    ///
    /// This is the only way to build a non-affine value (for example a
    /// perspective projection). Affine operations on such a matrix ignore
    /// column 3 and write it back as `[0, 0, 0, 1]`.
    pub const fn from_rows(m: [[T; 4]; 4]) -> Self {
        Self { m }
    }

    pub fn from_translation(shift: Vec3<T>) -> Self {
        let mut r = Self::IDENTITY;
        r.set_translate(shift);
        r
    }

    pub fn from_rotation_x(angle_in_degrees: T) -> Self {
        let mut r = Self::IDENTITY;
        r.set_rotate_x(angle_in_degrees);
        r
    }

    pub fn from_rotation_y(angle_in_degrees: T) -> Self {
        let mut r = Self::IDENTITY;
        r.set_rotate_y(angle_in_degrees);
        r
    }

    pub fn from_rotation_z(angle_in_degrees: T) -> Self {
        let mut r = Self::IDENTITY;
        r.set_rotate_z(angle_in_degrees);
        r
    }

    pub fn from_rotation(angle_in_degrees: T, axis: Vec3<T>) -> Self {
        let mut r = Self::IDENTITY;
        r.set_rotate(angle_in_degrees, axis);
        r
    }

    pub fn from_scale(factors: Vec3<T>) -> Self {
        let mut r = Self::IDENTITY;
        r.set_scale(factors);
        r
    }

    /// Whether column 3 is exactly `[0, 0, 0, 1]`.
    pub fn is_affine(&self) -> bool {
        self.m[0][3] == T::ZERO
            && self.m[1][3] == T::ZERO
            && self.m[2][3] == T::ZERO
            && self.m[3][3] == T::ONE
    }

    /// Entry-wise comparison with an explicit tolerance.
    pub fn approx_eq(&self, other: &Self, epsilon: T) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (*a - *b).abs() <= epsilon)
    }

    /// Translation row as a vector.
    pub fn translation_part(&self) -> Vec3<T> {
        Vec3::new(self.m[3][0], self.m[3][1], self.m[3][2])
    }

    /// Determinant of the 3x3 linear block.
    pub fn determinant(&self) -> T {
        let m = &self.m;
        determinant3x3(
            m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2],
        )
    }

    /// Transforms a point (translation included).
    pub fn transform_point(&self, p: Vec3<T>) -> Vec3<T> {
        let m = &self.m;
        Vec3::new(
            p.x * m[0][0] + p.y * m[1][0] + p.z * m[2][0] + m[3][0],
            p.x * m[0][1] + p.y * m[1][1] + p.z * m[2][1] + m[3][1],
            p.x * m[0][2] + p.y * m[1][2] + p.z * m[2][2] + m[3][2],
        )
    }

    /// Transforms a free vector (linear block only).
    pub fn transform_vector(&self, v: Vec3<T>) -> Vec3<T> {
        let m = &self.m;
        Vec3::new(
            v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0],
            v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1],
            v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2],
        )
    }

    /// Adjugate of the affine matrix (translation row from 3x3 cofactors)
    /// and the determinant of the linear block.
    fn adjugate(&self) -> (Self, T) {
        let m = &self.m;
        let adj = Self::affine(
            m[1][1] * m[2][2] - m[1][2] * m[2][1],
            m[0][2] * m[2][1] - m[0][1] * m[2][2],
            m[0][1] * m[1][2] - m[0][2] * m[1][1],
            m[1][2] * m[2][0] - m[1][0] * m[2][2],
            m[0][0] * m[2][2] - m[0][2] * m[2][0],
            m[0][2] * m[1][0] - m[0][0] * m[1][2],
            m[1][0] * m[2][1] - m[1][1] * m[2][0],
            m[0][1] * m[2][0] - m[0][0] * m[2][1],
            m[0][0] * m[1][1] - m[0][1] * m[1][0],
            -determinant3x3(
                m[1][0], m[2][0], m[3][0], m[1][1], m[2][1], m[3][1], m[1][2], m[2][2], m[3][2],
            ),
            determinant3x3(
                m[0][0], m[2][0], m[3][0], m[0][1], m[2][1], m[3][1], m[0][2], m[2][2], m[3][2],
            ),
            -determinant3x3(
                m[0][0], m[1][0], m[3][0], m[0][1], m[1][1], m[3][1], m[0][2], m[1][2], m[3][2],
            ),
        );
        (adj, self.determinant())
    }

    fn divide_affine_part(&mut self, divisor: T) {
        for row in self.m.iter_mut() {
            for value in row.iter_mut().take(3) {
                *value /= divisor;
            }
        }
    }

    /// Inverts in place.
    ///
    /// Returns `false` and leaves the matrix unchanged when the linear block
    /// has a zero determinant.
    #[must_use]
    pub fn inverse(&mut self) -> bool {
        let (mut adj, det) = self.adjugate();
        if det == T::ZERO {
            tracing::debug!("affine matrix is singular, inverse skipped");
            return false;
        }
        if det != T::ONE {
            adj.divide_affine_part(det);
        }
        *self = adj;
        true
    }

    /// Returns the inverse.
    ///
    /// For a singular matrix the undivided adjugate is returned; use
    /// [`Mat4::try_inversing`] when the caller needs to know.
    pub fn inversing(&self) -> Self {
        let (mut adj, det) = self.adjugate();
        if det != T::ZERO && det != T::ONE {
            adj.divide_affine_part(det);
        }
        adj
    }

    /// Returns the inverse, or `None` when the matrix is singular.
    pub fn try_inversing(&self) -> Option<Self> {
        let mut r = *self;
        r.inverse().then_some(r)
    }

    pub fn set_unit(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    pub fn set_translate(&mut self, shift: Vec3<T>) -> &mut Self {
        *self = Self::IDENTITY;
        self.m[3][0] = shift.x;
        self.m[3][1] = shift.y;
        self.m[3][2] = shift.z;
        self
    }

    pub fn set_rotate_x_sin_cos(&mut self, sine: T, cosine: T) -> &mut Self {
        *self = Self::IDENTITY;
        self.m[1][1] = cosine;
        self.m[1][2] = sine;
        self.m[2][1] = -sine;
        self.m[2][2] = cosine;
        self
    }

    pub fn set_rotate_x(&mut self, angle_in_degrees: T) -> &mut Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.set_rotate_x_sin_cos(s, c)
    }

    pub fn set_rotate_y_sin_cos(&mut self, sine: T, cosine: T) -> &mut Self {
        *self = Self::IDENTITY;
        self.m[0][0] = cosine;
        self.m[0][2] = -sine;
        self.m[2][0] = sine;
        self.m[2][2] = cosine;
        self
    }

    pub fn set_rotate_y(&mut self, angle_in_degrees: T) -> &mut Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.set_rotate_y_sin_cos(s, c)
    }

    pub fn set_rotate_z_sin_cos(&mut self, sine: T, cosine: T) -> &mut Self {
        *self = Self::IDENTITY;
        self.m[0][0] = cosine;
        self.m[0][1] = sine;
        self.m[1][0] = -sine;
        self.m[1][1] = cosine;
        self
    }

    pub fn set_rotate_z(&mut self, angle_in_degrees: T) -> &mut Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.set_rotate_z_sin_cos(s, c)
    }

    /// Rotation about an arbitrary axis.
    pub fn set_rotate(&mut self, angle_in_degrees: T, axis: Vec3<T>) -> &mut Self {
        let r = rotation_block(angle_in_degrees, axis.x, axis.y, axis.z);
        *self = Self::affine(
            r[0][0],
            r[0][1],
            r[0][2],
            r[1][0],
            r[1][1],
            r[1][2],
            r[2][0],
            r[2][1],
            r[2][2],
            T::ZERO,
            T::ZERO,
            T::ZERO,
        );
        self
    }

    pub fn set_rotate_sin_cos(&mut self, sine: T, cosine: T, axis: Vec3<T>) -> &mut Self {
        self.set_rotate(angle_deg_from_sin_cos(sine, cosine), axis)
    }

    pub fn set_scale(&mut self, factors: Vec3<T>) -> &mut Self {
        *self = Self::IDENTITY;
        self.m[0][0] = factors.x;
        self.m[1][1] = factors.y;
        self.m[2][2] = factors.z;
        self
    }

    pub fn translate(&mut self, shift: Vec3<T>) -> &mut Self {
        self.m[3][0] += shift.x;
        self.m[3][1] += shift.y;
        self.m[3][2] += shift.z;
        self
    }

    /// Mixes columns `a` and `b` by a plane rotation: the right-multiplied
    /// form of the cardinal-axis rotations.
    fn mix_columns(&mut self, a: usize, b: usize, sine: T, cosine: T) {
        for row in self.m.iter_mut() {
            let (ra, rb) = (row[a], row[b]);
            row[a] = ra * cosine - rb * sine;
            row[b] = ra * sine + rb * cosine;
        }
    }

    pub fn rotate_x_sin_cos(&mut self, sine: T, cosine: T) -> &mut Self {
        self.mix_columns(1, 2, sine, cosine);
        self
    }

    pub fn rotate_x(&mut self, angle_in_degrees: T) -> &mut Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.rotate_x_sin_cos(s, c)
    }

    pub fn rotate_y_sin_cos(&mut self, sine: T, cosine: T) -> &mut Self {
        self.mix_columns(2, 0, sine, cosine);
        self
    }

    pub fn rotate_y(&mut self, angle_in_degrees: T) -> &mut Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.rotate_y_sin_cos(s, c)
    }

    pub fn rotate_z_sin_cos(&mut self, sine: T, cosine: T) -> &mut Self {
        self.mix_columns(0, 1, sine, cosine);
        self
    }

    pub fn rotate_z(&mut self, angle_in_degrees: T) -> &mut Self {
        let (s, c) = sin_cos_deg(angle_in_degrees);
        self.rotate_z_sin_cos(s, c)
    }

    pub fn rotate(&mut self, angle_in_degrees: T, axis: Vec3<T>) -> &mut Self {
        let r = rotation_block(angle_in_degrees, axis.x, axis.y, axis.z);
        for row in self.m.iter_mut() {
            let (x, y, z) = (row[0], row[1], row[2]);
            row[0] = x * r[0][0] + y * r[1][0] + z * r[2][0];
            row[1] = x * r[0][1] + y * r[1][1] + z * r[2][1];
            row[2] = x * r[0][2] + y * r[1][2] + z * r[2][2];
        }
        self.m[0][3] = T::ZERO;
        self.m[1][3] = T::ZERO;
        self.m[2][3] = T::ZERO;
        self.m[3][3] = T::ONE;
        self
    }

    pub fn rotate_sin_cos(&mut self, sine: T, cosine: T, axis: Vec3<T>) -> &mut Self {
        self.rotate(angle_deg_from_sin_cos(sine, cosine), axis)
    }

    pub fn scale(&mut self, factors: Vec3<T>) -> &mut Self {
        for row in self.m.iter_mut() {
            row[0] *= factors.x;
            row[1] *= factors.y;
            row[2] *= factors.z;
        }
        self
    }

    /// Right-multiplies by the forward matrix of `trans`.
    pub fn transform(&mut self, trans: &Transform<T>) -> &mut Self {
        *self *= trans.matrix;
        self
    }

    /// Left-multiplies by the inverse matrix of `trans`.
    pub fn inv_transform(&mut self, trans: &Transform<T>) -> &mut Self {
        *self = trans.inv_matrix * *self;
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

    pub fn rotation_x_sin_cos(&self, sine: T, cosine: T) -> Self {
        let mut r = *self;
        r.rotate_x_sin_cos(sine, cosine);
        r
    }

    pub fn rotation_y(&self, angle_in_degrees: T) -> Self {
        let mut r = *self;
        r.rotate_y(angle_in_degrees);
        r
    }

    pub fn rotation_y_sin_cos(&self, sine: T, cosine: T) -> Self {
        let mut r = *self;
        r.rotate_y_sin_cos(sine, cosine);
        r
    }

    pub fn rotation_z(&self, angle_in_degrees: T) -> Self {
        let mut r = *self;
        r.rotate_z(angle_in_degrees);
        r
    }

    pub fn rotation_z_sin_cos(&self, sine: T, cosine: T) -> Self {
        let mut r = *self;
        r.rotate_z_sin_cos(sine, cosine);
        r
    }

    /// Returns `self` right-multiplied by the arbitrary-axis rotation.
    pub fn rotation(&self, angle_in_degrees: T, axis: Vec3<T>) -> Self {
        let mut r = *self;
        r.rotate(angle_in_degrees, axis);
        r
    }

    pub fn rotation_sin_cos(&self, sine: T, cosine: T, axis: Vec3<T>) -> Self {
        self.rotation(angle_deg_from_sin_cos(sine, cosine), axis)
    }

    pub fn scaling(&self, factors: Vec3<T>) -> Self {
        let mut r = *self;
        r.scale(factors);
        r
    }

    pub fn transformation(&self, trans: &Transform<T>) -> Self {
        *self * trans.matrix
    }

    pub fn inv_transformation(&self, trans: &Transform<T>) -> Self {
        trans.inv_matrix * *self
    }

    /// Row-major flattening.
    pub fn to_row_major_array(&self) -> [T; 16] {
        let mut out = [T::ZERO; 16];
        for (i, value) in self.m.iter().flatten().enumerate() {
            out[i] = *value;
        }
        out
    }

    /// Row-major flattening to `f32`, the layout rendering backends consume.
    pub fn to_f32_array(&self) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        for (i, value) in self.m.iter().flatten().enumerate() {
            out[i] = value.to_f64() as f32;
        }
        out
    }
}

/// Affine composition: `(a * b)` applies `a` first, then `b`.
impl<T: Real> Mul for Mat4<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let a = &self.m;
        let b = &rhs.m;
        let mut r = Self::IDENTITY;
        for i in 0..4 {
            for j in 0..3 {
                r.m[i][j] = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        for j in 0..3 {
            r.m[3][j] += b[3][j];
        }
        r
    }
}

impl<T: Real> MulAssign for Mat4<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// Point times matrix, translation included.
impl<T: Real> Mul<Mat4<T>> for Vec3<T> {
    type Output = Vec3<T>;

    fn mul(self, rhs: Mat4<T>) -> Vec3<T> {
        rhs.transform_point(self)
    }
}

impl<T: Real> MulAssign<Mat4<T>> for Vec3<T> {
    fn mul_assign(&mut self, rhs: Mat4<T>) {
        *self = rhs.transform_point(*self);
    }
}
