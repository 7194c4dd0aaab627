//! Viewing camera.
//!
//! A [`Camera`] keeps a right-handed orthonormal basis (`direction`, `up`,
//! `right`) at its `location`, the view transform derived from it, and a
//! perspective projection derived from the viewport parameters.
//!
//! Navigation operations differ in how they treat the `look_at` point:
//!
//! | operation                          | look_at                      |
//! |------------------------------------|------------------------------|
//! | `move_forward/right/up`            | moves with the camera        |
//! | `move_to_look_at`                  | fixed                        |
//! | `rotate_right/dir/up`              | re-placed at the old distance|
//! | `*_rotate_round_look_at`           | fixed, camera orbits it      |

use serde::{Deserialize, Serialize};

use crate::matrix::Mat4;
use crate::scalar::Real;
use crate::transform::Transform;
use crate::vector::Vec3;

/// How the `at` argument of a camera constructor is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AtKind {
    /// `at` is a point the camera looks at.
    LookAt,
    /// `at` is a direction; the look-at point becomes `location + at`.
    Direction,
}

/// Viewport and projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraParams<T> {
    pub viewport_width: T,
    pub viewport_height: T,
    /// Distance to the projection plane; doubles as the near clip.
    pub projection_distance: T,
    pub far_clip: T,
    pub screen_width: u32,
    pub screen_height: u32,
}

impl<T: Real> Default for CameraParams<T> {
    fn default() -> Self {
        Self {
            viewport_width: T::from_f64(0.4),
            viewport_height: T::from_f64(0.3),
            projection_distance: T::ONE,
            far_clip: T::from_f64(10000.0),
            screen_width: 320,
            screen_height: 240,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera<T> {
    location: Vec3<T>,
    look_at: Vec3<T>,
    direction: Vec3<T>,
    up: Vec3<T>,
    right: Vec3<T>,

    projection_distance: T,
    far_clip: T,
    width: T,
    height: T,
    saved_viewport_width: T,
    saved_viewport_height: T,
    aspect: T,
    screen_width: u32,
    screen_height: u32,

    view_transform: Transform<T>,
    projection: Mat4<T>,
}

impl<T: Real> Camera<T> {
    /// Camera with the default viewport (0.4 x 0.3 plane at distance 1,
    /// far clip 10000, 320x240 screen).
    pub fn new(location: Vec3<T>, at: Vec3<T>, up: Vec3<T>, kind: AtKind) -> Self {
        Self::with_params(location, at, up, kind, CameraParams::default())
    }

    pub fn with_params(
        location: Vec3<T>,
        at: Vec3<T>,
        up: Vec3<T>,
        kind: AtKind,
        params: CameraParams<T>,
    ) -> Self {
        if params.screen_width == 0 || params.screen_height == 0 {
            tracing::debug!(
                screen_width = params.screen_width,
                screen_height = params.screen_height,
                "clamping empty screen size to 1"
            );
        }
        let (direction, look_at) = match kind {
            AtKind::LookAt => (at - location, at),
            AtKind::Direction => (at, at + location),
        };
        let mut cam = Self {
            location,
            look_at,
            direction,
            up,
            right: Vec3::ZERO,
            projection_distance: params.projection_distance,
            far_clip: params.far_clip,
            width: params.viewport_width,
            height: params.viewport_height,
            saved_viewport_width: params.viewport_width,
            saved_viewport_height: params.viewport_height,
            aspect: T::ONE,
            screen_width: params.screen_width.max(1),
            screen_height: params.screen_height.max(1),
            view_transform: Transform::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        cam.direction.normalize();
        cam.right = cam.direction.cross(cam.up);
        cam.up = cam.right.cross(cam.direction);
        cam.up.normalize();
        cam.right.normalize();
        cam.update_matrices();
        cam.update_proj_data();
        cam
    }

    /// Re-initializes the camera in place.
    pub fn set_camera(
        &mut self,
        location: Vec3<T>,
        at: Vec3<T>,
        up: Vec3<T>,
        kind: AtKind,
        params: CameraParams<T>,
    ) {
        *self = Self::with_params(location, at, up, kind, params);
    }

    pub fn location(&self) -> Vec3<T> {
        self.location
    }

    pub fn look_at(&self) -> Vec3<T> {
        self.look_at
    }

    pub fn direction(&self) -> Vec3<T> {
        self.direction
    }

    pub fn up(&self) -> Vec3<T> {
        self.up
    }

    pub fn right(&self) -> Vec3<T> {
        self.right
    }

    pub fn projection_distance(&self) -> T {
        self.projection_distance
    }

    pub fn far_clip(&self) -> T {
        self.far_clip
    }

    /// Current projection plane size after fitting to the screen.
    pub fn viewport(&self) -> (T, T) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> T {
        self.aspect
    }

    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }

    /// World-to-camera transform; its inverse is camera-to-world.
    pub fn view_transform(&self) -> &Transform<T> {
        &self.view_transform
    }

    pub fn view_matrix(&self) -> Mat4<T> {
        self.view_transform.matrix
    }

    pub fn projection_matrix(&self) -> Mat4<T> {
        self.projection
    }

    pub fn distance_to_look_at(&self) -> T {
        (self.location - self.look_at).length()
    }

    pub fn update_position(&mut self, location: Vec3<T>) -> &mut Self {
        self.location = location;
        self.update_matrices()
    }

    /// Re-aims the camera at a new look-at point.
    pub fn update_direction(&mut self, look_at: Vec3<T>) -> &mut Self {
        self.look_at = look_at;
        self.update_look_at_loc_up()
    }

    /// Aims at `look_at` with a new up hint, keeping the location.
    pub fn set_look_at_up(&mut self, look_at: Vec3<T>, up: Vec3<T>) -> &mut Self {
        self.look_at = look_at;
        self.up = up;
        self.update_look_at_loc_up()
    }

    /// Re-orthonormalizes the basis from `direction` and `up`.
    pub fn update_dir_loc_up(&mut self) -> &mut Self {
        self.direction.normalize();
        self.right = self.direction.cross(self.up);
        self.right.normalize();
        self.up = self.right.cross(self.direction);
        self.update_matrices()
    }

    /// Points `direction` at `look_at` and re-orthonormalizes.
    pub fn update_look_at_loc_up(&mut self) -> &mut Self {
        self.direction = self.look_at - self.location;
        self.update_dir_loc_up()
    }

    /// Rebuilds the view transform from the basis and location.
    pub fn update_matrices(&mut self) -> &mut Self {
        let (r, u, d, loc) = (self.right, self.up, self.direction, self.location);
        let matrix = Mat4::affine(
            r.x,
            u.x,
            d.x,
            r.y,
            u.y,
            d.y,
            r.z,
            u.z,
            d.z,
            -loc.dot(r),
            -loc.dot(u),
            -loc.dot(d),
        );
        let inv_matrix = Mat4::affine(
            r.x, r.y, r.z, u.x, u.y, u.z, d.x, d.y, d.z, loc.x, loc.y, loc.z,
        );
        self.view_transform = Transform::from_pair(matrix, inv_matrix);
        self
    }

    /// Fits the saved projection plane to the screen proportions and rebuilds
    /// the perspective projection.
    pub fn update_proj_data(&mut self) {
        let screen_w = T::from_f64(f64::from(self.screen_width));
        let screen_h = T::from_f64(f64::from(self.screen_height));
        let x_scale = self.saved_viewport_width / screen_w;
        let y_scale = self.saved_viewport_height / screen_h;
        let scale = if x_scale > y_scale { y_scale } else { x_scale };

        self.width = scale * screen_w;
        self.height = scale * screen_h;
        self.aspect = self.width / self.height;

        let two = T::TWO;
        let (near, far) = (self.projection_distance, self.far_clip);
        let zero = T::ZERO;
        self.projection = Mat4::from_rows([
            [two * near / self.width, zero, zero, zero],
            [zero, two * near / self.height, zero, zero],
            [zero, zero, far / (far - near), T::ONE],
            [zero, zero, far * near / (near - far), zero],
        ]);
        tracing::trace!(
            width = %self.width,
            height = %self.height,
            aspect = %self.aspect,
            "camera projection updated"
        );
    }

    pub fn set_proj_params(
        &mut self,
        viewport_width: T,
        viewport_height: T,
        projection_distance: T,
        far_clip: T,
    ) -> &mut Self {
        self.saved_viewport_width = viewport_width;
        self.saved_viewport_height = viewport_height;
        self.projection_distance = projection_distance;
        self.far_clip = far_clip;
        self.update_proj_data();
        self
    }

    pub fn set_near_far(&mut self, projection_distance: T, far_clip: T) -> &mut Self {
        self.projection_distance = projection_distance;
        self.far_clip = far_clip;
        self.update_proj_data();
        self
    }

    /// Resizes the target screen, refitting the projection plane.
    pub fn set_screen_size(&mut self, screen_width: u32, screen_height: u32) -> &mut Self {
        if screen_width == 0 || screen_height == 0 {
            tracing::debug!(screen_width, screen_height, "ignoring empty screen size");
            return self;
        }
        self.screen_width = screen_width;
        self.screen_height = screen_height;
        self.update_proj_data();
        self
    }

    pub fn move_forward(&mut self, distance: T) -> &mut Self {
        let step = self.direction * distance;
        self.location += step;
        self.look_at += step;
        self.update_matrices()
    }

    /// Moves along `direction` without moving `look_at`; the step is skipped
    /// when it would end within `epsilon` of the look-at point.
    pub fn move_to_look_at(&mut self, distance: T, epsilon: T) -> &mut Self {
        let target = self.location + self.direction * distance;
        if (target - self.look_at).length() > epsilon {
            self.location = target;
            self.update_matrices();
        }
        self
    }

    pub fn move_right(&mut self, distance: T) -> &mut Self {
        let step = self.right * distance;
        self.location += step;
        self.look_at += step;
        self.update_matrices()
    }

    pub fn move_up(&mut self, distance: T) -> &mut Self {
        let step = self.up * distance;
        self.location += step;
        self.look_at += step;
        self.update_matrices()
    }

    /// Pitch: turns `direction` and `up` about `right`.
    pub fn rotate_right(&mut self, angle_in_degrees: T) -> &mut Self {
        let dist = self.distance_to_look_at();
        let mut rot = Transform::new();
        rot.set_rotate(angle_in_degrees, self.right);
        self.direction = rot.transform_vector(self.direction);
        self.up = rot.transform_vector(self.up);
        self.finish_basis_rotation(dist)
    }

    /// Roll: turns `right` and `up` about `direction`.
    pub fn rotate_dir(&mut self, angle_in_degrees: T) -> &mut Self {
        let dist = self.distance_to_look_at();
        let mut rot = Transform::new();
        rot.set_rotate(angle_in_degrees, self.direction);
        self.right = rot.transform_vector(self.right);
        self.up = rot.transform_vector(self.up);
        self.finish_basis_rotation(dist)
    }

    /// Yaw: turns `direction` and `right` about `up`.
    pub fn rotate_up(&mut self, angle_in_degrees: T) -> &mut Self {
        let dist = self.distance_to_look_at();
        let mut rot = Transform::new();
        rot.set_rotate(angle_in_degrees, self.up);
        self.direction = rot.transform_vector(self.direction);
        self.right = rot.transform_vector(self.right);
        self.finish_basis_rotation(dist)
    }

    fn finish_basis_rotation(&mut self, look_at_distance: T) -> &mut Self {
        self.update_dir_loc_up();
        self.look_at = self.location + self.direction * look_at_distance;
        self
    }

    /// Orbits the look-at point about the world Y axis.
    pub fn horizontal_rotate_round_look_at(&mut self, angle_in_degrees: T) -> &mut Self {
        let mut trans = Transform::new();
        trans.rotate_y(angle_in_degrees);
        self.direction = trans.transform_vector(self.direction);
        self.up = trans.transform_vector(self.up);
        self.finish_orbit()
    }

    /// Orbits the look-at point about the camera's `right` axis.
    pub fn vertical_rotate_round_look_at(&mut self, angle_in_degrees: T) -> &mut Self {
        let mut trans = Transform::new();
        trans.rotate(angle_in_degrees, self.right);
        self.direction = trans.transform_vector(self.direction);
        self.right = trans.transform_vector(self.right);
        self.finish_orbit()
    }

    fn finish_orbit(&mut self) -> &mut Self {
        let length = (self.look_at - self.location).length();
        self.location = self.look_at - self.direction * length;
        self.update_dir_loc_up()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type V = Vec3<f64>;

    const EPS: f64 = 1e-9;

    fn corner_camera() -> Camera<f64> {
        Camera::new(V::splat(5.0), V::ZERO, V::Y, AtKind::LookAt)
    }

    fn assert_orthonormal(cam: &Camera<f64>) {
        let (d, u, r) = (cam.direction(), cam.up(), cam.right());
        for v in [d, u, r] {
            assert!((v.length() - 1.0).abs() < 1e-6, "not unit: {v:?}");
        }
        assert!(d.dot(u).abs() < 1e-6);
        assert!(d.dot(r).abs() < 1e-6);
        assert!(u.dot(r).abs() < 1e-6);
        assert_eq!(d.cross(u), r);
    }

    #[test]
    fn look_at_construction_builds_basis() {
        let cam = corner_camera();
        let s3 = 3.0_f64.sqrt();
        assert_eq!(cam.direction(), V::splat(-1.0 / s3));
        assert_eq!(cam.right(), V::new(1.0, 0.0, -1.0).normalizing());
        assert_eq!(cam.up(), V::new(-1.0, 2.0, -1.0).normalizing());
        assert!(cam.up().y > 0.0);
        assert_orthonormal(&cam);
    }

    #[test]
    fn view_transform_maps_location_and_target() {
        let cam = corner_camera();
        let view = cam.view_transform();
        assert_eq!(view.transform_point(cam.location()), V::ZERO);
        assert_eq!(
            view.transform_point(V::ZERO),
            V::new(0.0, 0.0, 5.0 * 3.0_f64.sqrt())
        );
        assert!((view.matrix * view.inv_matrix).approx_eq(&Mat4::IDENTITY, 1e-9));
    }

    #[test]
    fn direction_construction_offsets_look_at() {
        let cam = Camera::new(V::new(1.0, 2.0, 3.0), V::new(0.0, 0.0, 4.0), V::Y, AtKind::Direction);
        assert_eq!(cam.direction(), V::Z);
        assert_eq!(cam.look_at(), V::new(1.0, 2.0, 7.0));
        assert_eq!(cam.right(), V::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn default_projection() {
        let mut cam = corner_camera();
        let (w, h) = cam.viewport();
        assert!((w - 0.4).abs() < EPS && (h - 0.3).abs() < EPS);
        assert!((cam.aspect() - 4.0 / 3.0).abs() < EPS);

        let p = cam.projection_matrix();
        assert!((p.m[0][0] - 5.0).abs() < EPS);
        assert!((p.m[1][1] - 2.0 / 0.3).abs() < EPS);
        assert_eq!(p.m[2][3], 1.0);
        assert_eq!(p.m[3][3], 0.0);
        assert!(!p.is_affine());

        cam.set_near_far(0.5, 10000.0);
        let p = cam.projection_matrix();
        assert!((p.m[0][0] - 2.5).abs() < EPS);
        assert!((p.m[2][2] - 10000.0 / 9999.5).abs() < EPS);
        assert!((p.m[3][2] - 5000.0 / (0.5 - 10000.0)).abs() < EPS);
    }

    #[test]
    fn screen_resize_keeps_plane_inside_saved_size() {
        let mut cam = corner_camera();
        cam.set_screen_size(640, 240);
        let (w, h) = cam.viewport();
        assert!((w - 0.4).abs() < EPS);
        assert!((h - 0.15).abs() < EPS);
        assert!((cam.aspect() - 640.0 / 240.0).abs() < EPS);

        cam.set_screen_size(0, 100);
        assert_eq!(cam.screen_size(), (640, 240));

        cam.set_proj_params(0.8, 0.3, 2.0, 500.0);
        assert_eq!(cam.projection_distance(), 2.0);
        assert_eq!(cam.far_clip(), 500.0);
    }

    #[test]
    fn empty_screen_size_is_clamped_on_construction() {
        let params = CameraParams {
            screen_width: 0,
            ..CameraParams::default()
        };
        let cam = Camera::with_params(V::splat(5.0), V::ZERO, V::Y, AtKind::LookAt, params);
        assert_eq!(cam.screen_size(), (1, 240));
        let (w, h) = cam.viewport();
        assert!(w > 0.0 && h > 0.0);
        assert!(cam.projection_matrix().m.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn translation_moves_look_at_in_lockstep() {
        let mut cam = corner_camera();
        let offset = cam.look_at() - cam.location();
        cam.move_forward(2.0).move_right(-1.5).move_up(0.25);
        assert_eq!(cam.look_at() - cam.location(), offset);
        assert_orthonormal(&cam);
    }

    #[test]
    fn move_to_look_at_respects_threshold() {
        let mut cam = Camera::new(V::new(0.0, 0.0, 10.0), V::ZERO, V::Y, AtKind::LookAt);
        cam.move_to_look_at(9.5, 1.0);
        assert_eq!(cam.location(), V::new(0.0, 0.0, 10.0));

        cam.move_to_look_at(5.0, 1.0);
        assert_eq!(cam.location(), V::new(0.0, 0.0, 5.0));
        assert_eq!(cam.look_at(), V::ZERO);
        assert_eq!(cam.view_transform().transform_point(V::ZERO), V::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn basis_rotations_keep_look_at_distance() {
        let mut cam = corner_camera();
        let dist = cam.distance_to_look_at();
        let location = cam.location();

        cam.rotate_up(30.0);
        assert!((cam.distance_to_look_at() - dist).abs() < 1e-9);
        cam.rotate_right(-20.0);
        assert!((cam.distance_to_look_at() - dist).abs() < 1e-9);
        cam.rotate_dir(45.0);
        assert!((cam.distance_to_look_at() - dist).abs() < 1e-9);

        assert_eq!(cam.location(), location);
        assert_eq!(cam.look_at(), location + cam.direction() * dist);
        assert_orthonormal(&cam);
    }

    #[test]
    fn rotate_dir_leaves_direction_alone() {
        let mut cam = corner_camera();
        let d = cam.direction();
        cam.rotate_dir(70.0);
        assert_eq!(cam.direction(), d);
    }

    #[test]
    fn orbits_keep_look_at_fixed() {
        let mut cam = corner_camera();
        let dist = cam.distance_to_look_at();

        cam.horizontal_rotate_round_look_at(90.0);
        assert_eq!(cam.look_at(), V::ZERO);
        assert!((cam.distance_to_look_at() - dist).abs() < 1e-9);
        assert_eq!(cam.location(), cam.look_at() - cam.direction() * dist);
        assert_orthonormal(&cam);

        cam.vertical_rotate_round_look_at(-25.0);
        assert_eq!(cam.look_at(), V::ZERO);
        assert!((cam.distance_to_look_at() - dist).abs() < 1e-9);
        assert_orthonormal(&cam);
    }

    #[test]
    fn horizontal_orbit_quarter_turn() {
        let mut cam = Camera::new(V::new(0.0, 0.0, -10.0), V::ZERO, V::Y, AtKind::LookAt);
        cam.horizontal_rotate_round_look_at(90.0);
        // rotate_y(90) maps +Z to +X, so the camera ends up on -X.
        assert_eq!(cam.direction(), V::X);
        assert_eq!(cam.location(), V::new(-10.0, 0.0, 0.0));
    }

    #[test]
    fn set_look_at_up_levels_a_rolled_camera() {
        let mut cam = corner_camera();
        cam.rotate_dir(50.0).move_right(3.0);
        cam.set_look_at_up(V::ZERO, V::Y);
        assert_eq!(cam.look_at(), V::ZERO);
        assert_eq!(cam.direction(), (-cam.location()).normalizing());
        assert!(cam.right().y.abs() < 1e-9);
        assert_orthonormal(&cam);
    }

    #[test]
    fn update_direction_reaims() {
        let mut cam = corner_camera();
        cam.update_position(V::new(0.0, 0.0, -4.0));
        cam.update_direction(V::ZERO);
        assert_eq!(cam.direction(), V::Z);
        assert_orthonormal(&cam);

        let mut other = cam;
        other.set_camera(V::splat(5.0), V::ZERO, V::Y, AtKind::LookAt, CameraParams::default());
        let fresh = corner_camera();
        assert_eq!(other.location(), fresh.location());
        assert_eq!(other.up(), fresh.up());
        assert_eq!(other.view_matrix(), fresh.view_matrix());
        assert_eq!(other.projection_matrix(), fresh.projection_matrix());
    }
}
