use std::time::Duration;

/// Slowest accepted rate; lower, zero, negative and NaN rates clamp to it.
pub const MIN_RATE_HZ: f32 = 1.0;
/// Fastest accepted rate; also bounds the step passed to [`FixedStep::new`].
pub const MAX_RATE_HZ: f32 = 10_000.0;

/// Fixed-timestep accumulator.
///
/// Feed it the variable frame delta; it reports how many fixed steps the
/// simulation should run this frame. Backlog beyond `max_steps` is dropped so
/// a long stall cannot trigger a burst of catch-up updates.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedStep {
    /// Creates an accumulator running at `rate_hz` steps per second.
    ///
    /// The rate is clamped to `[MIN_RATE_HZ, MAX_RATE_HZ]`.
    pub fn from_rate(rate_hz: f32, max_steps: u32) -> Self {
        let rate = if rate_hz.is_nan() {
            MIN_RATE_HZ
        } else {
            rate_hz.clamp(MIN_RATE_HZ, MAX_RATE_HZ)
        };
        if rate != rate_hz {
            log::warn!("fixed step rate {rate_hz} Hz out of range, using {rate} Hz");
        }
        Self::new(Duration::from_secs_f32(1.0 / rate), max_steps)
    }

    /// Steps shorter than `1 / MAX_RATE_HZ` seconds are lengthened to it.
    pub fn new(step: Duration, max_steps: u32) -> Self {
        Self {
            step: step.as_secs_f32().max(1.0 / MAX_RATE_HZ),
            accumulator: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    /// Length of one step in seconds.
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Adds `dt` seconds and returns the number of whole steps to run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if steps == self.max_steps && self.accumulator >= self.step {
            log::debug!(
                "fixed step backlog dropped ({:.3}s)",
                self.accumulator
            );
            self.accumulator %= self.step;
        }

        steps
    }
}
