//! Standalone viewer binary.
//!
//! Usage:
//!   cargo run -p scene_viewer --bin viewer -- [--config viewer.json] [--script steps.json]
//!       [--ticks 120] [--tick-hz 60]
//!
//! The viewer builds a camera from the config, plays a navigation script
//! (the built-in orbit-and-fly session unless `--script` is given) on a fixed
//! tick, and logs the camera state once per second of simulated time.

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use scene_math::config::ViewerConfig;
use scene_math::render::NullRenderer;
use scene_viewer::input::{orbit_and_fly_script, script_from_json_str};
use scene_viewer::Viewer;
use tracing::info;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    ticks: Option<u32>,
    tick_hz: Option<u32>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut out = Args::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                out.config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--script" if i + 1 < args.len() => {
                out.script = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--ticks" if i + 1 < args.len() => {
                out.ticks = Some(args[i + 1].parse().context("parse --ticks")?);
                i += 2;
            }
            "--tick-hz" if i + 1 < args.len() => {
                out.tick_hz = Some(args[i + 1].parse().context("parse --tick-hz")?);
                i += 2;
            }
            _ => i += 1,
        }
    }
    Ok(out)
}

fn load_config(args: &Args) -> anyhow::Result<ViewerConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            ViewerConfig::from_json_str(&text)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => ViewerConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        cfg.ticks = ticks;
    }
    if let Some(tick_hz) = args.tick_hz {
        cfg.tick_hz = tick_hz;
    }
    Ok(cfg)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args()?;
    let cfg = load_config(&args)?;

    let script = match &args.script {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read script {}", path.display()))?;
            script_from_json_str(&text)
                .with_context(|| format!("parse script {}", path.display()))?
        }
        None => orbit_and_fly_script(cfg.ticks),
    };

    info!(
        ticks = cfg.ticks,
        tick_hz = cfg.tick_hz,
        steps = script.len(),
        "Starting viewer"
    );

    let mut viewer = Viewer::new(&cfg);
    let mut renderer = NullRenderer;
    viewer
        .run_for_ticks(cfg.ticks, cfg.tick_hz, &script, &mut renderer)
        .await
        .context("run viewer")?;

    let cam = &viewer.camera;
    info!(
        location = ?cam.location().to_array(),
        direction = ?cam.direction().to_array(),
        look_at = ?cam.look_at().to_array(),
        mode = ?viewer.mode,
        "Viewer finished"
    );
    Ok(())
}
