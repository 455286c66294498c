//! Entry point for the OBJ viewer.
//! Logging, CLI config, asset loading, then the window loop.

mod config;
mod demo;

use anyhow::{Context, Result};
use asset::texture::TextureData;
use corelib::{UpdatePolicy, Viewer};

use crate::{
    config::AppConfig,
    demo::{DemoMeshes, build_scene},
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    log::info!(
        "Starting OBJ viewer. Backend: {:?}, window_size={}x{}, assets={}",
        config.backends,
        config.width,
        config.height,
        config.assets.display()
    );

    let meshes = DemoMeshes::load(&config)?;
    let texture_path = config.ground_texture_path();
    let ground = TextureData::load(&texture_path)
        .with_context(|| format!("Failed to load ground texture {}", texture_path.display()))?;

    let policy = UpdatePolicy::default();
    let viewer = Viewer::new(build_scene(&meshes), policy);

    platform::run_viewer(
        platform::ViewerConfig {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
            backends: config.backends,
            ticks_per_second: policy.ticks_per_second,
        },
        viewer,
        ground,
    )?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
