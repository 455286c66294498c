//! Window-system independent input capability.

use crate::draw::Canvas;

/// Keys the viewer reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Escape,
}

/// Pointer buttons held during a drag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragButtons {
    pub primary: bool,
    pub secondary: bool,
}

/// Whether the event loop should keep running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Callbacks the platform layer dispatches to the application, all on one thread.
pub trait InputHandler {
    fn on_resize(&mut self, width: u32, height: u32);

    fn on_draw(&self, canvas: &mut dyn Canvas);

    fn on_key(&mut self, key: Key) -> Flow;

    /// Wheel movement in lines, positive away from the user.
    fn on_scroll(&mut self, delta: f32);

    /// Pointer movement in pixels with y pointing up.
    fn on_drag(&mut self, dx: f32, dy: f32, buttons: DragButtons);

    /// One fixed-rate simulation step.
    fn on_tick(&mut self);
}
