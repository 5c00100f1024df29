use std::path::{Path, PathBuf};

use rondel_engine::coords::Vec2;
use rondel_engine::device::GpuInit;
use rondel_engine::geometry::{PiConstant, PolygonDesc};
use rondel_engine::logging::LoggingConfig;
use rondel_engine::paint::Color;
use rondel_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

/// Segment count of the drawn circle.
pub const VERTEX_COUNT: u32 = 120;

/// Everything the demo needs at startup.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub window: RuntimeConfig,
    pub gpu: GpuInit,
    pub logging: LoggingConfig,

    pub shader_path: PathBuf,
    pub polygon: PolygonDesc,
    pub clear: Color,

    /// Fixed update rate for animation and movement.
    pub step_hz: f32,
    pub max_steps_per_frame: u32,

    /// Per-step change of the pulse velocity.
    pub pulse_accel: f32,
    /// Translation speed in NDC units per second.
    pub move_speed: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: RuntimeConfig {
                title: "Circle".to_string(),
                initial_size: LogicalSize::new(500.0, 500.0),
                resizable: true,
            },
            // Non-sRGB surface: uniform colors reach the screen unconverted.
            gpu: GpuInit { prefer_srgb: false, ..GpuInit::default() },
            logging: LoggingConfig::default(),

            shader_path: PathBuf::from("res/shaders/basic.shader"),
            polygon: PolygonDesc::new(Vec2::new(0.5, 0.5), 0.2, VERTEX_COUNT)
                .with_pi(PiConstant::Approximate),
            clear: Color::BLACK,

            step_hz: 20.0,
            max_steps_per_frame: 5,

            pulse_accel: 0.05,
            move_speed: 1.0,
        }
    }
}

/// Resolves a relative asset path against the working directory, then the
/// directory holding the executable. Absolute paths and paths found nowhere
/// are returned unchanged so the load error names what was asked for.
pub fn resolve_asset(path: &Path) -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let roots: Vec<PathBuf> = std::env::current_dir().ok().into_iter().chain(exe_dir).collect();
    locate(path, &roots)
}

fn locate(path: &Path, roots: &[PathBuf]) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    roots
        .iter()
        .map(|root| root.join(path))
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rondel_engine::render::validate_stage;
    use rondel_shader::ShaderStage;

    #[test]
    fn bundled_shader_splits_and_validates() {
        let cfg = DemoConfig::default();
        let src = rondel_shader::load(resolve_asset(&cfg.shader_path)).unwrap();
        validate_stage(ShaderStage::Vertex, &src.vertex, "vs_main", false).unwrap();
        validate_stage(ShaderStage::Fragment, &src.fragment, "fs_main", true).unwrap();
    }

    #[test]
    fn default_polygon_matches_window_demo() {
        let cfg = DemoConfig::default();
        assert_eq!(cfg.polygon.segments, 120);
        assert_eq!(cfg.polygon.center, Vec2::new(0.5, 0.5));
        assert_eq!(cfg.polygon.pi, PiConstant::Approximate);
        assert_eq!(cfg.window.initial_size, LogicalSize::new(500.0, 500.0));
    }

    #[test]
    fn shader_path_is_relative() {
        assert!(DemoConfig::default().shader_path.is_relative());
    }

    #[test]
    fn locate_searches_roots_in_order() {
        let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let roots = [crate_dir.join("does-not-exist"), crate_dir.clone()];
        let found = locate(Path::new("res/shaders/basic.shader"), &roots);
        assert_eq!(found, crate_dir.join("res/shaders/basic.shader"));
    }

    #[test]
    fn locate_falls_back_to_the_given_path() {
        let roots = [PathBuf::from(env!("CARGO_MANIFEST_DIR"))];
        let missing = Path::new("res/shaders/missing.shader");
        assert_eq!(locate(missing, &roots), missing);

        let absolute = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        assert_eq!(locate(&absolute, &[]), absolute);
    }
}
