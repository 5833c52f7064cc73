// crates/engine_shared/src/screen.rs

use crate::graphics::DrawSurface;
use crate::input_types::InputState;

/// What the host should do after a screen's update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    Continue,
    Exit,
}

/// A top-level game state driven by the host's frame loop: one `update`
/// per simulation step, one `render` per presented frame.
pub trait Screen {
    fn update(&mut self, input: &InputState, dt: f32) -> ScreenCommand;

    fn render(&mut self, surface: &mut dyn DrawSurface);

    /// Called when the window's drawable size changes.
    fn resize(&mut self, _width: f32, _height: f32) {}
}
