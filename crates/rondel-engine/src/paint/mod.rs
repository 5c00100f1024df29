//! Color types passed to shaders and used for surface clears.

mod color;

pub use color::Color;
