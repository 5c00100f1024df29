//! Procedural geometry.
//!
//! Positions are emitted directly in normalized device coordinates
//! (+Y up, `[-1, 1]` on both axes); renderers upload them unchanged.

mod fan;

pub use fan::{angular_step, fan_indices, fan_positions, FanMesh, PiConstant, PolygonDesc};
