//! Time subsystem.
//!
//! - `FrameClock` measures wall-clock delta time per presented frame
//! - `FixedStep` turns those deltas into a whole number of fixed simulation steps

mod fixed_step;
mod frame_clock;

pub use fixed_step::{FixedStep, MAX_RATE_HZ, MIN_RATE_HZ};
pub use frame_clock::{FrameClock, FrameTime};
