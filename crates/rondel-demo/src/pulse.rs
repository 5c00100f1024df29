use rondel_engine::paint::Color;

/// Animated red channel.
///
/// Bang-bang oscillator around `pivot`: the velocity gains `accel` each step
/// while the value is at or below the pivot and loses `accel` while above it.
/// Starting from rest at 0 with a pivot of 1 the value swings between 0 and
/// 1.8; the uploaded channel saturates at 1.
#[derive(Debug, Clone)]
pub struct ColorPulse {
    value: f32,
    velocity: f32,
    accel: f32,
    pivot: f32,
}

impl ColorPulse {
    pub fn new(accel: f32) -> Self {
        Self { value: 0.0, velocity: 0.0, accel, pivot: 1.0 }
    }

    pub fn step(&mut self) {
        if self.value > self.pivot {
            self.velocity -= self.accel;
        } else {
            self.velocity += self.accel;
        }
        self.value += self.velocity;
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Fill color for the current step, `(r, 0.2, 0.3, 1.0)`.
    pub fn color(&self) -> Color {
        Color::from_straight(self.value, 0.2, 0.3, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(p: &mut ColorPulse, n: usize) -> Vec<f32> {
        (0..n).map(|_| { p.step(); p.value() }).collect()
    }

    #[test]
    fn starts_with_accelerating_ramp() {
        let mut p = ColorPulse::new(0.05);
        let v = run(&mut p, 4);
        let expected = [0.05f32, 0.15, 0.30, 0.50];
        for (a, b) in v.iter().zip(expected) {
            assert!((a - b).abs() < 1e-5, "{v:?}");
        }
    }

    #[test]
    fn overshoots_pivot_then_returns() {
        let mut p = ColorPulse::new(0.05);
        let v = run(&mut p, 24);
        let peak = v.iter().cloned().fold(f32::MIN, f32::max);
        assert!(peak > 1.7 && peak < 1.85, "peak {peak}");
        assert!(v[20..].iter().any(|&x| x < 0.1), "{v:?}");
    }

    #[test]
    fn uploaded_channel_is_clamped() {
        let mut p = ColorPulse::new(0.05);
        run(&mut p, 10); // well past the pivot
        assert!(p.value() > 1.0);
        let c = p.color();
        assert_eq!(c.r, 1.0);
        assert_eq!((c.g, c.b, c.a), (0.2, 0.3, 1.0));
    }

    #[test]
    fn initial_color_has_no_red() {
        assert_eq!(ColorPulse::new(0.05).color().r, 0.0);
    }
}
