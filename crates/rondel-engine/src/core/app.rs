use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by `window::Runtime`.
pub trait App {
    /// Called once per redraw, after input for the frame has been applied.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called when the user asks to close the window. Return `Continue` to veto.
    fn on_close_requested(&mut self) -> AppControl {
        AppControl::Exit
    }
}
