//! Circle demo: a pulsing triangle-fan circle that moves with the arrow keys
//! and reports clicks in normalized device coordinates.

mod app;
mod config;
mod controls;
mod pulse;

use anyhow::{Context, Result};
use rondel_engine::geometry::FanMesh;
use rondel_engine::logging::init_logging;
use rondel_engine::window::Runtime;

use crate::app::CircleDemo;
use crate::config::{resolve_asset, DemoConfig};

fn main() -> Result<()> {
    let config = DemoConfig::default();
    init_logging(config.logging.clone());

    let mesh = FanMesh::generate(&config.polygon);
    log::info!(
        "circle mesh: {} vertices, {} triangles (pi = {:?})",
        mesh.vertex_count(),
        mesh.triangle_count(),
        config.polygon.pi
    );

    let shader_path = resolve_asset(&config.shader_path);
    let shader = rondel_shader::load(&shader_path)
        .with_context(|| format!("failed to load shader {}", shader_path.display()))?;

    let app = CircleDemo::new(&config, mesh, shader);
    Runtime::run(config.window.clone(), config.gpu.clone(), app)
}
