//! Host platform interface and event model
//!
//! The host owns the window and event loop. It reports its size and backend
//! flavour through [`Platform`] and forwards input as [`Event`] values.

use crate::gfx::ContextDesc;

/// Queries and requests the lifecycle controller makes to the host platform
pub trait Platform {
    /// Framebuffer width in pixels
    fn width(&self) -> i32;

    /// Framebuffer height in pixels
    fn height(&self) -> i32;

    /// Whether the reduced-feature GL backend (GLES2 / WebGL1) is active
    fn is_gles2(&self) -> bool;

    /// Rendering context the GPU backend is set up against
    fn gfx_context(&self) -> ContextDesc;

    /// Ask the host to shut down
    ///
    /// Asynchronous: `cleanup` runs later on the host's own schedule.
    fn request_quit(&mut self);
}

/// Logical key of a keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    /// Printable key, lowercased
    Character(char),
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

/// Input or window event forwarded to the `event` hook
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Framebuffer resized; dependent render targets should be recreated
    Resized { width: i32, height: i32 },
    KeyDown { key: Key, repeat: bool },
    KeyUp { key: Key },
    /// Text input
    Char(char),
    MouseDown { button: MouseButton, x: f32, y: f32 },
    MouseUp { button: MouseButton, x: f32, y: f32 },
    MouseMove { x: f32, y: f32 },
    MouseScroll { dx: f32, dy: f32 },
    Focused,
    Unfocused,
    Suspended,
    Resumed,
    /// The user asked to close the window
    QuitRequested,
}
