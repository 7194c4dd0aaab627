//! `scene_math`
//!
//! Affine transform and camera math shared by viewers and scene code.
//!
//! Conventions:
//! - Row vectors, `p' = p * M`, translation in row 3.
//! - Angles are in degrees unless a function takes a (sine, cosine) pair.
//! - Every type is generic over [`scalar::Real`] (`f32` or `f64`).
//! - No `unsafe`.

pub mod camera;
pub mod color;
pub mod config;
pub mod matrix;
pub mod render;
pub mod scalar;
pub mod transform;
pub mod vector;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::camera::*;
    pub use crate::color::*;
    pub use crate::config::*;
    pub use crate::matrix::*;
    pub use crate::render::*;
    pub use crate::scalar::{deg_to_rad, lerp, lerp_range, rad_to_deg, Real};
    pub use crate::transform::*;
    pub use crate::vector::*;
}
