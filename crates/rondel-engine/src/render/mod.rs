//! GPU rendering.
//!
//! Renderers own their GPU resources (pipelines, buffers) and create them
//! lazily on first use for the active surface format.

mod ctx;
mod fan;
mod shader;

pub use ctx::{RenderCtx, RenderTarget};
pub use fan::{FanRenderer, FanUniform};
pub use shader::{validate_stage, ShaderDiagnostic, UNIFORM_BINDING, UNIFORM_GROUP};
