//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into `InputEvent`s and owns one
//! `InputState` + `InputFrame` pair per window; the app reads both by
//! reference during `on_frame`.

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    ButtonState,
    InputEvent,
    Key,
    MouseButton,
    PointerButtonEvent,
};
