//! Configuration system.
//!
//! Loads camera and viewer configuration from JSON strings (file IO left to
//! the app). Every field has a default, so partial documents are accepted.

use serde::{Deserialize, Serialize};

use crate::camera::{AtKind, Camera, CameraParams};
use crate::vector::Vec3;

/// Initial camera placement and viewport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_location")]
    pub location: [f32; 3],
    /// Look-at point, or a direction when `is_look_at` is false.
    #[serde(default)]
    pub at: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    #[serde(default = "default_is_look_at")]
    pub is_look_at: bool,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,
    #[serde(default = "default_projection_distance")]
    pub projection_distance: f32,
    #[serde(default = "default_far_clip")]
    pub far_clip: f32,
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,
}

fn default_location() -> [f32; 3] {
    [5.0, 5.0, 5.0]
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_is_look_at() -> bool {
    true
}

fn default_viewport_width() -> f32 {
    0.4
}

fn default_viewport_height() -> f32 {
    0.3
}

fn default_projection_distance() -> f32 {
    1.0
}

fn default_far_clip() -> f32 {
    10000.0
}

fn default_screen_width() -> u32 {
    320
}

fn default_screen_height() -> u32 {
    240
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            at: [0.0; 3],
            up: default_up(),
            is_look_at: default_is_look_at(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            projection_distance: default_projection_distance(),
            far_clip: default_far_clip(),
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
        }
    }
}

impl CameraConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn params(&self) -> CameraParams<f32> {
        CameraParams {
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            projection_distance: self.projection_distance,
            far_clip: self.far_clip,
            screen_width: self.screen_width,
            screen_height: self.screen_height,
        }
    }

    pub fn build(&self) -> Camera<f32> {
        let kind = if self.is_look_at {
            AtKind::LookAt
        } else {
            AtKind::Direction
        };
        Camera::with_params(
            Vec3::from(self.location),
            Vec3::from(self.at),
            Vec3::from(self.up),
            kind,
            self.params(),
        )
    }
}

/// Viewer tick rate and input tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default = "default_tick_hz")]
    pub tick_hz: u32,
    /// Ticks to run before exiting.
    #[serde(default = "default_ticks")]
    pub ticks: u32,
    /// Camera speed in units per second while a move key is held.
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    /// Degrees per unit of mouse delta.
    #[serde(default = "default_mouse_to_angle")]
    pub mouse_to_angle: f32,
    /// Distance per unit of wheel delta.
    #[serde(default = "default_wheel_to_zoom")]
    pub wheel_to_zoom: f32,
    /// Closest the wheel may bring the camera to its look-at point.
    #[serde(default = "default_min_look_at_distance")]
    pub min_look_at_distance: f32,
    #[serde(default)]
    pub camera: CameraConfig,
}

fn default_tick_hz() -> u32 {
    60
}

fn default_ticks() -> u32 {
    120
}

fn default_move_speed() -> f32 {
    5.0
}

fn default_mouse_to_angle() -> f32 {
    0.5
}

fn default_wheel_to_zoom() -> f32 {
    0.02
}

fn default_min_look_at_distance() -> f32 {
    1.0
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tick_hz: default_tick_hz(),
            ticks: default_ticks(),
            move_speed: default_move_speed(),
            mouse_to_angle: default_mouse_to_angle(),
            wheel_to_zoom: default_wheel_to_zoom(),
            min_look_at_distance: default_min_look_at_distance(),
            camera: CameraConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
