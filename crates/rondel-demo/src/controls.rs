use rondel_engine::coords::{Vec2, Viewport};
use rondel_engine::geometry::FanMesh;
use rondel_engine::input::{InputFrame, InputState, Key};

const LEFT: [Key; 2] = [Key::ArrowLeft, Key::A];
const RIGHT: [Key; 2] = [Key::ArrowRight, Key::D];
const UP: [Key; 2] = [Key::ArrowUp, Key::W];
const DOWN: [Key; 2] = [Key::ArrowDown, Key::S];

/// Keyboard-driven translation applied to the circle through the offset uniform.
#[derive(Debug, Clone)]
pub struct Translate {
    offset: Vec2,
    speed: f32,
}

impl Translate {
    pub fn new(speed: f32) -> Self {
        Self { offset: Vec2::zero(), speed }
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Applies per-frame edges (reset on `R`).
    pub fn on_frame(&mut self, frame: &InputFrame) {
        if frame.key_pressed(Key::R) {
            log::debug!("offset reset");
            self.offset = Vec2::zero();
        }
    }

    /// Moves by held arrow/WASD keys for one fixed step of `dt` seconds.
    pub fn step(&mut self, input: &InputState, dt: f32) {
        let axis = |neg: &[Key], pos: &[Key]| -> f32 {
            (input.any_key_down(pos) as i32 - input.any_key_down(neg) as i32) as f32
        };
        let dir = Vec2::new(axis(&LEFT, &RIGHT), axis(&DOWN, &UP));
        self.offset += dir * (self.speed * dt);
    }
}

/// Result of probing the scene at a cursor position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Probe {
    /// Cursor in normalized device coordinates.
    pub ndc: Vec2,
    /// Whether the cursor is over the (translated) circle.
    pub inside: bool,
}

/// Maps a click at logical `(x, y)` into NDC and hit-tests the mesh.
pub fn probe(viewport: Viewport, x: f32, y: f32, mesh: &FanMesh, offset: Vec2) -> Option<Probe> {
    let ndc = viewport.to_ndc(x, y)?;
    Some(Probe { ndc, inside: mesh.contains(ndc - offset) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rondel_engine::geometry::PolygonDesc;
    use rondel_engine::input::{ButtonState, InputEvent};

    fn press(st: &mut InputState, fr: &mut InputFrame, key: Key) {
        st.apply_event(fr, InputEvent::Key { key, state: ButtonState::Pressed, repeat: false });
    }

    #[test]
    fn idle_input_keeps_offset() {
        let mut t = Translate::new(1.0);
        t.step(&InputState::default(), 0.05);
        assert_eq!(t.offset(), Vec2::zero());
    }

    #[test]
    fn held_keys_move_by_speed_times_dt() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        press(&mut st, &mut fr, Key::ArrowRight);
        press(&mut st, &mut fr, Key::W);

        let mut t = Translate::new(2.0);
        t.step(&st, 0.25);
        assert_eq!(t.offset(), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        press(&mut st, &mut fr, Key::ArrowLeft);
        press(&mut st, &mut fr, Key::D);

        let mut t = Translate::new(1.0);
        t.step(&st, 1.0);
        assert_eq!(t.offset().x, 0.0);
    }

    #[test]
    fn r_resets_offset() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        press(&mut st, &mut fr, Key::ArrowDown);

        let mut t = Translate::new(1.0);
        t.step(&st, 0.5);
        assert_eq!(t.offset(), Vec2::new(0.0, -0.5));

        fr.clear();
        press(&mut st, &mut fr, Key::R);
        t.on_frame(&fr);
        assert_eq!(t.offset(), Vec2::zero());
    }

    #[test]
    fn probe_hits_circle_center() {
        let mesh = FanMesh::generate(&PolygonDesc::new(Vec2::new(0.5, 0.5), 0.2, 120));
        let vp = Viewport::new(500.0, 500.0);
        // NDC (0.5, 0.5) is logical (375, 125) in a 500x500 window.
        let p = probe(vp, 375.0, 125.0, &mesh, Vec2::zero()).unwrap();
        assert_eq!(p.ndc, Vec2::new(0.5, 0.5));
        assert!(p.inside);
    }

    #[test]
    fn probe_follows_translation() {
        let mesh = FanMesh::generate(&PolygonDesc::new(Vec2::new(0.5, 0.5), 0.2, 120));
        let vp = Viewport::new(500.0, 500.0);
        let offset = Vec2::new(-0.5, -0.5);
        assert!(probe(vp, 250.0, 250.0, &mesh, offset).unwrap().inside);
        assert!(!probe(vp, 375.0, 125.0, &mesh, offset).unwrap().inside);
    }

    #[test]
    fn probe_outside_circle() {
        let mesh = FanMesh::generate(&PolygonDesc::new(Vec2::new(0.5, 0.5), 0.2, 120));
        let p = probe(Viewport::new(500.0, 500.0), 0.0, 0.0, &mesh, Vec2::zero()).unwrap();
        assert_eq!(p.ndc, Vec2::new(-1.0, 1.0));
        assert!(!p.inside);
    }
}
