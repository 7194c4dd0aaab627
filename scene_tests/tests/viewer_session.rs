//! Viewer sessions driven through the tick loop.

use scene_math::config::ViewerConfig;
use scene_math::render::RecordingRenderer;
use scene_math::vector::Vec3;
use scene_viewer::input::{orbit_and_fly_script, NavCommand, NavKeys, ScriptStep};
use scene_viewer::{NavMode, Viewer};
use scene_tests::init_tracing;

fn fast_config() -> anyhow::Result<ViewerConfig> {
    let cfg = ViewerConfig::from_json_str(
        r#"{"tick_hz": 1000, "ticks": 40, "camera": {"location": [0, 3, -12]}}"#,
    )?;
    Ok(cfg)
}

#[tokio::test]
async fn builtin_script_runs_and_renders_every_tick() -> anyhow::Result<()> {
    init_tracing();
    let cfg = fast_config()?;
    let script = orbit_and_fly_script(cfg.ticks);
    let mut viewer = Viewer::new(&cfg);
    let mut renderer = RecordingRenderer::new();

    viewer
        .run_for_ticks(cfg.ticks, cfg.tick_hz, &script, &mut renderer)
        .await?;

    anyhow::ensure!(viewer.tick() == cfg.ticks);
    anyhow::ensure!(renderer.frames == u64::from(cfg.ticks));
    anyhow::ensure!(renderer.view == Some(viewer.camera.view_matrix().to_f32_array()));
    anyhow::ensure!(renderer.projection == Some(viewer.camera.projection_matrix().to_f32_array()));
    // The script toggles fixed mode twice.
    anyhow::ensure!(viewer.mode == NavMode::Free);
    anyhow::ensure!(viewer.held_keys() == NavKeys::RIGHT | NavKeys::UP);
    Ok(())
}

#[tokio::test]
async fn zero_tick_rate_is_rejected() -> anyhow::Result<()> {
    let cfg = fast_config()?;
    let mut viewer = Viewer::new(&cfg);
    let mut renderer = RecordingRenderer::new();
    let result = viewer.run_for_ticks(1, 0, &[], &mut renderer).await;
    anyhow::ensure!(result.is_err());
    anyhow::ensure!(renderer.frames == 0);
    Ok(())
}

#[test]
fn toggling_fixed_mode_aims_at_origin() -> anyhow::Result<()> {
    let cfg = fast_config()?;
    let mut viewer = Viewer::new(&cfg);
    viewer.apply(NavCommand::Keys(NavKeys::RIGHT));
    viewer.step(1.0);
    viewer.apply(NavCommand::MouseDelta { dx: 30.0, dy: 10.0 });

    viewer.apply(NavCommand::ToggleFixed);
    anyhow::ensure!(viewer.mode == NavMode::Fixed);
    let cam = &viewer.camera;
    anyhow::ensure!(cam.look_at() == Vec3::ZERO);
    let expected = (-cam.location()).normalizing();
    anyhow::ensure!((cam.direction() - expected).length() < 1e-5);
    anyhow::ensure!(cam.right().y.abs() < 1e-5, "camera should be level after reset");
    Ok(())
}

#[test]
fn fixed_mode_wheel_stops_at_minimum_distance() -> anyhow::Result<()> {
    let cfg = fast_config()?;
    let min = cfg.min_look_at_distance;
    let mut viewer = Viewer::new(&cfg);
    viewer.apply(NavCommand::ToggleFixed);

    for _ in 0..500 {
        viewer.apply(NavCommand::Wheel(120.0));
        anyhow::ensure!(
            viewer.camera.distance_to_look_at() > min,
            "wheel zoom crossed the minimum distance"
        );
    }
    // Zooming out still works afterwards.
    let close = viewer.camera.distance_to_look_at();
    viewer.apply(NavCommand::Wheel(-120.0));
    anyhow::ensure!(viewer.camera.distance_to_look_at() > close);
    Ok(())
}

#[tokio::test]
async fn json_script_drives_viewer() -> anyhow::Result<()> {
    let cfg = fast_config()?;
    let script: Vec<ScriptStep> = scene_viewer::input::script_from_json_str(
        r#"[
            {"tick": 0, "command": {"keys": "FORWARD"}},
            {"tick": 5, "command": {"keys": ""}}
        ]"#,
    )?;
    let mut viewer = Viewer::new(&cfg);
    let start = viewer.camera.location();
    let dir = viewer.camera.direction();
    let mut renderer = RecordingRenderer::new();
    viewer.run_for_ticks(10, cfg.tick_hz, &script, &mut renderer).await?;

    // Five ticks of forward motion at 5 units/s and 1000 Hz.
    let moved = viewer.camera.location() - start;
    anyhow::ensure!((moved - dir * 0.025).length() < 1e-4, "moved {moved:?}");
    Ok(())
}
