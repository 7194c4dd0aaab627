//! Rendering abstraction.
//!
//! This crate does not depend on a graphics backend. A renderer receives
//! matrices as row-major `[f32; 16]` arrays, the layout fixed-function
//! pipelines load directly for row-vector math.

use crate::camera::Camera;
use crate::matrix::Mat4;
use crate::scalar::Real;

/// A minimal rendering API.
pub trait RenderBackend: Send + Sync {
    fn begin_frame(&mut self);
    fn set_view(&mut self, view: [f32; 16]);
    fn set_projection(&mut self, projection: [f32; 16]);
    fn set_world(&mut self, world: [f32; 16]);
    fn end_frame(&mut self);
}

/// A no-op renderer useful for headless runs.
#[derive(Default)]
pub struct NullRenderer;

impl RenderBackend for NullRenderer {
    fn begin_frame(&mut self) {}
    fn set_view(&mut self, _view: [f32; 16]) {}
    fn set_projection(&mut self, _projection: [f32; 16]) {}
    fn set_world(&mut self, _world: [f32; 16]) {}
    fn end_frame(&mut self) {}
}

/// Keeps the last matrices it was given and counts completed frames.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub frames: u64,
    pub view: Option<[f32; 16]>,
    pub projection: Option<[f32; 16]>,
    pub world: Vec<[f32; 16]>,
    in_frame: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_frame(&self) -> bool {
        self.in_frame
    }
}

impl RenderBackend for RecordingRenderer {
    fn begin_frame(&mut self) {
        self.in_frame = true;
        self.world.clear();
    }

    fn set_view(&mut self, view: [f32; 16]) {
        self.view = Some(view);
    }

    fn set_projection(&mut self, projection: [f32; 16]) {
        self.projection = Some(projection);
    }

    fn set_world(&mut self, world: [f32; 16]) {
        self.world.push(world);
    }

    fn end_frame(&mut self) {
        if self.in_frame {
            self.frames += 1;
        }
        self.in_frame = false;
    }
}

/// Hands the camera's view and projection to the backend.
pub fn submit_camera<T: Real>(camera: &Camera<T>, backend: &mut dyn RenderBackend) {
    backend.set_view(camera.view_matrix().to_f32_array());
    backend.set_projection(camera.projection_matrix().to_f32_array());
}

/// Hands an object's world matrix to the backend.
pub fn submit_world<T: Real>(world: &Mat4<T>, backend: &mut dyn RenderBackend) {
    backend.set_world(world.to_f32_array());
}
