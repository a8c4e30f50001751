//! # Input Manager
//!
//! This module translates winit window events into viewer [`InputEvent`]s:
//! - Logical keys become key identifiers (`w`, `ArrowUp`, `Shift`, `" "`)
//! - The left mouse button and cursor motion become pointer events
//! - Wheel deltas are converted to pixels
//! - Focus loss is forwarded so held keys can be released

use winit::{
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{Key, NamedKey},
};

use super::input_state::InputEvent;

/// Pixels scrolled per wheel line, for devices that report whole lines.
pub const LINE_HEIGHT_PIXELS: f32 = 100.0;

/// Translates window events and tracks the last known cursor position.
///
/// Winit reports button presses without a position, so the cursor is remembered from
/// the preceding `CursorMoved`.
#[derive(Debug, Default)]
pub struct InputManager {
    /// Last cursor position over the window, in physical pixels
    cursor_position: Option<(f32, f32)>,
}

impl InputManager {
    /// Creates a new InputManager with no known cursor position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes a window event.
    ///
    /// # Arguments
    /// * `event` - The window event to process
    ///
    /// # Returns
    /// The viewer event it corresponds to, or `None` if the viewer has no use for it
    pub fn intake_input(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state, logical_key, ..
                    },
                ..
            } => {
                let key = key_identifier(logical_key)?;
                Some(match state {
                    ElementState::Pressed => InputEvent::KeyDown(key),
                    ElementState::Released => InputEvent::KeyUp(key),
                })
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                self.cursor_position = Some((x, y));
                Some(InputEvent::PointerMove { x, y })
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor_position = None;
                Some(InputEvent::PointerLeave)
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    let (x, y) = self.cursor_position?;
                    Some(InputEvent::PointerDown { x, y })
                }
                ElementState::Released => Some(InputEvent::PointerUp),
            },
            WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Wheel {
                delta_y: wheel_delta_pixels(delta),
            }),
            WindowEvent::Focused(false) => Some(InputEvent::FocusLost),
            _ => None,
        }
    }
}

/// Key identifier for a logical key, or `None` for keys the viewer never reads.
pub fn key_identifier(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(text.to_string()),
        Key::Named(named) => {
            let name = match named {
                NamedKey::Space => " ",
                NamedKey::Shift => "Shift",
                NamedKey::ArrowUp => "ArrowUp",
                NamedKey::ArrowDown => "ArrowDown",
                NamedKey::ArrowLeft => "ArrowLeft",
                NamedKey::ArrowRight => "ArrowRight",
                _ => return None,
            };
            Some(name.to_string())
        }
        _ => None,
    }
}

/// Vertical wheel movement in pixels, positive when scrolling down.
///
/// Winit reports positive deltas when scrolling up, the opposite of DOM wheel events.
pub fn wheel_delta_pixels(delta: &MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, lines) => -lines * LINE_HEIGHT_PIXELS,
        MouseScrollDelta::PixelDelta(position) => -position.y as f32,
    }
}
