//! Rondel engine crate.
//!
//! Platform + GPU runtime for the circle demo, and the triangle-fan geometry
//! it draws.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod geometry;
pub mod render;
pub mod paint;
