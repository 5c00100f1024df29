use rondel_engine::core::{App, AppControl, FrameCtx};
use rondel_engine::geometry::FanMesh;
use rondel_engine::input::{Key, MouseButton};
use rondel_engine::paint::Color;
use rondel_engine::render::FanRenderer;
use rondel_engine::time::FixedStep;
use rondel_shader::ShaderSource;

use crate::config::DemoConfig;
use crate::controls::{probe, Translate};
use crate::pulse::ColorPulse;

pub struct CircleDemo {
    renderer: FanRenderer,
    clear: Color,
    clock: FixedStep,
    pulse: ColorPulse,
    translate: Translate,
    warned_unusable: bool,
}

impl CircleDemo {
    pub fn new(config: &DemoConfig, mesh: FanMesh, shader: ShaderSource) -> Self {
        Self {
            renderer: FanRenderer::new(mesh, shader),
            clear: config.clear,
            clock: FixedStep::from_rate(config.step_hz, config.max_steps_per_frame),
            pulse: ColorPulse::new(config.pulse_accel),
            translate: Translate::new(config.move_speed),
            warned_unusable: false,
        }
    }
}

impl App for CircleDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }

        self.translate.on_frame(ctx.input_frame);

        let steps = self.clock.advance(ctx.time.dt);
        for _ in 0..steps {
            self.pulse.step();
            self.translate.step(ctx.input, self.clock.step());
        }

        let viewport = ctx.window.viewport();
        for press in ctx.input_frame.presses().filter(|p| p.button == MouseButton::Left) {
            if let Some(hit) =
                probe(viewport, press.x, press.y, self.renderer.mesh(), self.translate.offset())
            {
                log::info!(
                    "cursor at ({:.3} : {:.3}){}",
                    hit.ndc.x,
                    hit.ndc.y,
                    if hit.inside { " inside circle" } else { "" }
                );
            }
        }

        let color = self.pulse.color();
        let offset = self.translate.offset();
        let renderer = &mut self.renderer;
        let control = ctx.render(self.clear, |rctx, target| {
            renderer.render(rctx, target, color, offset);
        });

        if !self.renderer.is_usable() && !self.warned_unusable {
            log::warn!("shader program is unusable; only the clear color will be drawn");
            self.warned_unusable = true;
        }

        control
    }
}
