//! Coordinate types shared by geometry, input and renderers.
//!
//! Two spaces are in play:
//! - logical pixels for pointer input (origin top-left, +Y down)
//! - normalized device coordinates for geometry (origin center, +Y up)
//!
//! `Viewport` converts between them.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
