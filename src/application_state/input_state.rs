//! # Input State
//!
//! Host-independent input events consumed by the viewer. The window host translates
//! its native events into these; tests construct them directly.

/// A single user input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key was pressed; the identifier is the key's logical name (`w`, `ArrowUp`,
    /// `Shift`, `" "` for space)
    KeyDown(String),
    /// A key was released
    KeyUp(String),
    /// The primary pointer button was pressed at a position in pixels
    PointerDown {
        /// Horizontal position
        x: f32,
        /// Vertical position
        y: f32,
    },
    /// The pointer moved to a position in pixels
    PointerMove {
        /// Horizontal position
        x: f32,
        /// Vertical position
        y: f32,
    },
    /// The primary pointer button was released
    PointerUp,
    /// The pointer left the drawing surface
    PointerLeave,
    /// The wheel scrolled; positive `delta_y` means scrolling down, in pixels
    Wheel {
        /// Vertical scroll amount
        delta_y: f32,
    },
    /// The window lost keyboard focus
    FocusLost,
}
