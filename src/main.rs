/*
 * Shoal Aquarium Viewer
 *
 * Usage: shoal [scene.json]
 *
 * Without an argument the default aquarium is used: a 2000 x 600 x 2000 tank
 * with 150 fish. Set RUST_LOG to change log verbosity (default: info).
 */

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use shoal::SceneConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let scene = match std::env::args().nth(1) {
        Some(path) => SceneConfig::from_json_file(&path)
            .with_context(|| format!("failed to load scene config from {}", path))?,
        None => SceneConfig::default(),
    };

    // Fail before opening a window rather than inside nannou's model callback
    scene.validate().context("invalid scene config")?;

    info!(fish = scene.num_fish, max_speed = scene.max_speed, "starting aquarium viewer");
    shoal::app::run(scene);

    Ok(())
}
