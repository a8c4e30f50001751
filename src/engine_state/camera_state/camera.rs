//! # Camera Controller
//!
//! Pure transforms over [`CameraState`]: pan (rotate), translate relative to the
//! current orientation, and derive the view matrix handed to the renderer.
//!
//! The view matrix is `rotateX(pitch) · rotateY(yaw) · translate(position)`. Because the
//! world is rotated first and translated second, the camera orbits the structure's
//! center; moving it re-centers the world opposite to the direction of travel.

use cgmath::{Matrix3, Matrix4, Vector3};

use super::CameraState;

/// Drag distance, in pixels, that rotates the camera by one radian.
pub const PAN_PIXELS_PER_RADIAN: f32 = 200.0;

/// Applies input-derived motion to a [`CameraState`].
#[derive(Debug, Clone, Copy)]
pub struct CameraController {
    pixels_per_radian: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(PAN_PIXELS_PER_RADIAN)
    }
}

impl CameraController {
    /// Creates a controller.
    ///
    /// # Arguments
    /// * `pixels_per_radian` - Drag distance that rotates the camera by one radian
    pub fn new(pixels_per_radian: f32) -> Self {
        Self { pixels_per_radian }
    }

    /// Rotates the camera by a pointer delta.
    ///
    /// Horizontal motion turns yaw, vertical motion turns pitch. The result is not
    /// clamped here; readers clamp. A step that would make an angle non-finite is
    /// dropped.
    ///
    /// # Arguments
    /// * `camera` - The camera to rotate
    /// * `dx` - Horizontal pointer delta in pixels
    /// * `dy` - Vertical pointer delta in pixels
    /// * `sensitivity` - Multiplier from user settings
    pub fn pan(&self, camera: &mut CameraState, dx: f32, dy: f32, sensitivity: f32) {
        let yaw = camera.yaw.0 + dx / self.pixels_per_radian * sensitivity;
        if yaw.is_finite() {
            camera.yaw.0 = yaw;
        }
        let pitch = camera.pitch.0 + dy / self.pixels_per_radian * sensitivity;
        if pitch.is_finite() {
            camera.pitch.0 = pitch;
        }
    }

    /// Translates the camera along a direction expressed in view space.
    ///
    /// The scaled direction is tilted by `-pitch` about X when `relative_vertical` is set,
    /// then always turned by `-yaw` about Y, and added to the position. Both angles are
    /// read clamped, as the view matrix reads them. With
    /// `relative_vertical` unset, vertical motion stays aligned with world up.
    ///
    /// # Arguments
    /// * `camera` - The camera to move
    /// * `direction` - Direction in view space; not normalized
    /// * `relative_vertical` - Whether pitch affects the direction
    /// * `sensitivity` - Multiplier applied to `direction`
    pub fn move_relative(
        &self,
        camera: &mut CameraState,
        direction: Vector3<f32>,
        relative_vertical: bool,
        sensitivity: f32,
    ) {
        let mut offset = direction * sensitivity;
        if relative_vertical {
            offset = Matrix3::from_angle_x(-camera.clamped_pitch()) * offset;
        }
        offset = Matrix3::from_angle_y(-camera.clamped_yaw()) * offset;
        camera.position += offset;
    }

    /// Computes the view matrix from the clamped orientation.
    pub fn view_matrix(&self, camera: &CameraState) -> Matrix4<f32> {
        Matrix4::from_angle_x(camera.clamped_pitch())
            * Matrix4::from_angle_y(camera.clamped_yaw())
            * Matrix4::from_translation(camera.position)
    }
}
