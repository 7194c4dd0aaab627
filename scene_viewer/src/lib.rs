//! `scene_viewer`
//!
//! Headless camera viewer:
//! - Navigation input (held keys, mouse deltas, wheel, mode toggle)
//! - Free-flight and fixed-orbit camera control
//! - Fixed-step tick loop feeding a rendering backend

pub mod input;
pub mod viewer;

pub use viewer::{NavMode, Viewer};
