//! Viewer implementation.
//!
//! The viewer maintains:
//! - A camera built from [`ViewerConfig::camera`]
//! - A navigation mode (free flight or fixed orbit around the look-at point)
//! - The set of currently held navigation keys
//! - A fixed-step tick loop that feeds scripted commands and submits frames

use std::time::Duration;

use scene_math::{
    camera::Camera,
    config::ViewerConfig,
    render::{submit_camera, RenderBackend},
    vector::Vec3,
};
use tracing::{debug, info};

use crate::input::{NavCommand, NavKeys, ScriptStep};

/// Mouse deltas at or below this magnitude do not orbit in fixed mode.
const ORBIT_DEAD_ZONE: f32 = 0.001;

/// Camera navigation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMode {
    /// Keys fly the camera, the mouse turns it in place.
    Free,
    /// The mouse orbits the look-at point, the wheel zooms towards it.
    Fixed,
}

/// Headless camera viewer.
pub struct Viewer {
    pub camera: Camera<f32>,
    pub mode: NavMode,
    held: NavKeys,
    tick: u32,

    move_speed: f32,
    mouse_to_angle: f32,
    wheel_to_zoom: f32,
    min_look_at_distance: f32,
}

impl Viewer {
    pub fn new(cfg: &ViewerConfig) -> Self {
        Self {
            camera: cfg.camera.build(),
            mode: NavMode::Free,
            held: NavKeys::NONE,
            tick: 0,
            move_speed: cfg.move_speed,
            mouse_to_angle: cfg.mouse_to_angle,
            wheel_to_zoom: cfg.wheel_to_zoom,
            min_look_at_distance: cfg.min_look_at_distance,
        }
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn held_keys(&self) -> NavKeys {
        self.held
    }

    /// Applies one input command.
    pub fn apply(&mut self, cmd: NavCommand) {
        debug!(?cmd, mode = ?self.mode, "nav command");
        match cmd {
            NavCommand::Keys(keys) => self.held = keys,
            NavCommand::MouseDelta { dx, dy } => self.on_mouse(dx, dy),
            NavCommand::Wheel(delta) => {
                if self.mode == NavMode::Fixed {
                    self.camera
                        .move_to_look_at(delta * self.wheel_to_zoom, self.min_look_at_distance);
                }
            }
            NavCommand::ToggleFixed => self.toggle_fixed(),
        }
    }

    fn on_mouse(&mut self, dx: f32, dy: f32) {
        match self.mode {
            NavMode::Free => {
                self.camera.rotate_right(dy * self.mouse_to_angle);
                self.camera.rotate_up(dx * self.mouse_to_angle);
            }
            NavMode::Fixed => {
                if dx.abs() > ORBIT_DEAD_ZONE {
                    self.camera.horizontal_rotate_round_look_at(dx);
                }
                if dy.abs() > ORBIT_DEAD_ZONE {
                    self.camera.vertical_rotate_round_look_at(dy);
                }
            }
        }
    }

    fn toggle_fixed(&mut self) {
        self.mode = match self.mode {
            NavMode::Free => NavMode::Fixed,
            NavMode::Fixed => NavMode::Free,
        };
        self.camera.set_look_at_up(Vec3::ZERO, Vec3::Y);
        info!(mode = ?self.mode, location = ?self.camera.location(), "Navigation mode changed");
    }

    /// Advances one fixed step: held keys move the camera by `move_speed * dt`.
    pub fn step(&mut self, dt_sec: f32) {
        let (forward, right, up) = self.held.axes();
        let dist = self.move_speed * dt_sec;
        if forward != 0.0 {
            self.camera.move_forward(forward * dist);
        }
        if right != 0.0 {
            self.camera.move_right(right * dist);
        }
        if up != 0.0 {
            self.camera.move_up(up * dist);
        }
        self.tick += 1;
    }

    /// Submits the current camera to a renderer as one frame.
    pub fn frame(&self, backend: &mut dyn RenderBackend) {
        backend.begin_frame();
        submit_camera(&self.camera, backend);
        backend.end_frame();
    }

    /// Runs `ticks` fixed steps at `tick_hz`, applying every script step whose
    /// tick matches before stepping, and submitting a frame after each step.
    pub async fn run_for_ticks(
        &mut self,
        ticks: u32,
        tick_hz: u32,
        script: &[ScriptStep],
        backend: &mut dyn RenderBackend,
    ) -> anyhow::Result<()> {
        anyhow::ensure!(tick_hz > 0, "tick_hz must be positive");
        let dt = Duration::from_secs_f32(1.0 / tick_hz as f32);
        let mut interval = tokio::time::interval(dt);

        for _ in 0..ticks {
            interval.tick().await;
            let now = self.tick;
            for step in script.iter().filter(|s| s.tick == now) {
                self.apply(step.command);
            }
            self.step(dt.as_secs_f32());
            self.frame(backend);

            if self.tick % tick_hz == 0 {
                info!(
                    tick = self.tick,
                    location = ?self.camera.location().to_array(),
                    look_at = ?self.camera.look_at().to_array(),
                    mode = ?self.mode,
                    "Camera"
                );
            }
        }
        Ok(())
    }
}
