//! # Camera State Management
//!
//! This module holds the viewer's camera: a world translation plus yaw and pitch, and
//! the view distance. The stored orientation may transiently leave its valid range
//! while input accumulates between frames; every consumer reads it through the
//! clamping accessors, and [`CameraState::settle`] writes the clamped values back once
//! a frame has been rendered.
//!
//! ## Invariants (as read)
//! - `pitch` in `[-π/2, π/2]`
//! - `yaw` in `[0, 2π)`
//! - `view_distance` in `[1, 20]`

use std::f32::consts::{FRAC_PI_2, TAU};

use cgmath::{Rad, Vector3};

pub mod camera;

/// Lowest readable pitch (looking straight down at the structure from below).
pub const MIN_PITCH: Rad<f32> = Rad(-FRAC_PI_2);
/// Highest readable pitch.
pub const MAX_PITCH: Rad<f32> = Rad(FRAC_PI_2);
/// Closest readable view distance.
pub const MIN_VIEW_DISTANCE: f32 = 1.0;
/// Furthest readable view distance.
pub const MAX_VIEW_DISTANCE: f32 = 20.0;

/// Yaw of a freshly opened viewer.
pub const INITIAL_YAW: Rad<f32> = Rad(0.5);
/// Pitch of a freshly opened viewer.
pub const INITIAL_PITCH: Rad<f32> = Rad(0.8);
/// View distance of a freshly opened viewer.
pub const INITIAL_VIEW_DISTANCE: f32 = 4.0;

/// Wraps a yaw angle into `[0, 2π)`. A non-finite yaw reads as 0.
pub fn wrap_yaw(yaw: Rad<f32>) -> Rad<f32> {
    if !yaw.0.is_finite() {
        return Rad(0.0);
    }
    let wrapped = yaw.0.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        Rad(0.0)
    } else {
        Rad(wrapped)
    }
}

/// Clamps a pitch angle into `[-π/2, π/2]`. A NaN pitch reads as 0.
pub fn clamp_pitch(pitch: Rad<f32>) -> Rad<f32> {
    if pitch.0.is_nan() {
        return Rad(0.0);
    }
    Rad(pitch.0.clamp(MIN_PITCH.0, MAX_PITCH.0))
}

/// Clamps a view distance into `[1, 20]`.
pub fn clamp_view_distance(view_distance: f32) -> f32 {
    view_distance.clamp(MIN_VIEW_DISTANCE, MAX_VIEW_DISTANCE)
}

/// Orientation and position of the orbit camera.
///
/// `position` is the translation applied to the world after rotation, so starting at
/// `-size / 2` puts the structure's center at the origin and the two rotations orbit
/// around it.
///
/// `view_distance` is tracked and clamped but does not feed the view matrix; the wheel
/// dollies by moving `position` instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// World translation applied after rotation
    pub position: Vector3<f32>,
    /// Rotation about the Y axis, possibly unwrapped until read
    pub yaw: Rad<f32>,
    /// Rotation about the X axis, possibly unclamped until read
    pub pitch: Rad<f32>,
    /// Distance from the orbit center, possibly unclamped until read
    pub view_distance: f32,
}

impl CameraState {
    /// Creates a camera with the given translation and orientation.
    pub fn new<Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: Vector3<f32>,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position,
            yaw: yaw.into(),
            pitch: pitch.into(),
            view_distance: INITIAL_VIEW_DISTANCE,
        }
    }

    /// Creates the initial camera for a structure of the given size, centered on it.
    pub fn centered_on(size: [u32; 3]) -> Self {
        let [width, height, depth] = size.map(|side| -(side as f32) / 2.0);
        Self::new(Vector3::new(width, height, depth), INITIAL_YAW, INITIAL_PITCH)
    }

    /// Yaw wrapped into `[0, 2π)`.
    pub fn clamped_yaw(&self) -> Rad<f32> {
        wrap_yaw(self.yaw)
    }

    /// Pitch clamped into `[-π/2, π/2]`.
    pub fn clamped_pitch(&self) -> Rad<f32> {
        clamp_pitch(self.pitch)
    }

    /// View distance clamped into `[1, 20]`.
    pub fn clamped_view_distance(&self) -> f32 {
        clamp_view_distance(self.view_distance)
    }

    /// Replaces the stored orientation and view distance with their clamped values.
    pub fn settle(&mut self) {
        self.yaw = self.clamped_yaw();
        self.pitch = self.clamped_pitch();
        self.view_distance = self.clamped_view_distance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_centered_on_the_structure() {
        let camera = CameraState::centered_on([8, 4, 6]);
        assert_eq!(camera.position, Vector3::new(-4.0, -2.0, -3.0));
        assert_eq!(camera.yaw, INITIAL_YAW);
        assert_eq!(camera.pitch, INITIAL_PITCH);
        assert_eq!(camera.view_distance, INITIAL_VIEW_DISTANCE);
    }

    #[test]
    fn yaw_wraps_in_both_directions() {
        let wrapped = wrap_yaw(Rad(TAU + 1.0));
        assert!((wrapped.0 - 1.0).abs() < 1e-5);

        let wrapped = wrap_yaw(Rad(-1.0));
        assert!((wrapped.0 - (TAU - 1.0)).abs() < 1e-5);

        let wrapped = wrap_yaw(Rad(-1e-9));
        assert!(wrapped.0 >= 0.0 && wrapped.0 < TAU);
    }

    #[test]
    fn pitch_and_view_distance_clamp() {
        assert_eq!(clamp_pitch(Rad(5.0)), MAX_PITCH);
        assert_eq!(clamp_pitch(Rad(-5.0)), MIN_PITCH);
        assert_eq!(clamp_pitch(Rad(0.3)), Rad(0.3));
        assert_eq!(clamp_view_distance(0.0), 1.0);
        assert_eq!(clamp_view_distance(50.0), 20.0);
    }

    #[test]
    fn settle_writes_back_clamped_values() {
        let mut camera = CameraState::new(Vector3::new(0.0, 0.0, 0.0), Rad(TAU + 0.25), Rad(3.0));
        camera.view_distance = 100.0;

        camera.settle();

        assert!((camera.yaw.0 - 0.25).abs() < 1e-5);
        assert_eq!(camera.pitch, MAX_PITCH);
        assert_eq!(camera.view_distance, MAX_VIEW_DISTANCE);
    }
}
