//! # Pointer Gestures
//!
//! Drag-to-rotate and wheel-to-dolly. Both are one-shot: each event produces at most
//! one camera change and one redraw, and neither participates in the held-key loop.

use cgmath::Vector3;

/// Wheel delta, in pixels, that dollies the camera by one world unit.
pub const WHEEL_PIXELS_PER_UNIT: f32 = 200.0;

/// An in-progress pointer drag, anchored at the last seen pointer position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragGesture {
    anchor: Option<(f32, f32)>,
}

impl DragGesture {
    /// Creates an inactive gesture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Starts a drag at the given pointer position.
    pub fn begin(&mut self, x: f32, y: f32) {
        self.anchor = Some((x, y));
    }

    /// Moves the pointer during a drag.
    ///
    /// # Returns
    /// The pixel delta since the previous anchor, or `None` when no drag is active.
    /// The anchor moves to the new position.
    pub fn update(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let (anchor_x, anchor_y) = self.anchor?;
        self.anchor = Some((x, y));
        Some((x - anchor_x, y - anchor_y))
    }

    /// Ends the drag, if any.
    pub fn end(&mut self) {
        self.anchor = None;
    }
}

/// View-space dolly direction for a wheel event.
///
/// A positive `delta_y` (scrolling down) moves away from the structure.
pub fn wheel_direction(delta_y: f32) -> Vector3<f32> {
    Vector3::new(0.0, 0.0, -delta_y / WHEEL_PIXELS_PER_UNIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_reports_deltas_from_the_moving_anchor() {
        let mut drag = DragGesture::new();
        assert_eq!(drag.update(10.0, 10.0), None);

        drag.begin(100.0, 50.0);
        assert_eq!(drag.update(110.0, 45.0), Some((10.0, -5.0)));
        assert_eq!(drag.update(111.0, 45.0), Some((1.0, 0.0)));

        drag.end();
        assert!(!drag.is_active());
        assert_eq!(drag.update(0.0, 0.0), None);
    }

    #[test]
    fn wheel_maps_pixels_to_depth() {
        assert_eq!(wheel_direction(100.0), Vector3::new(0.0, 0.0, -0.5));
        assert_eq!(wheel_direction(-200.0), Vector3::new(0.0, 0.0, 1.0));
    }
}
