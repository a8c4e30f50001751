//! # Held-Key Movement
//!
//! Keyboard movement is continuous: while at least one movement key is held, the
//! camera moves a fixed step every animation frame. [`InputStateMachine`] tracks the
//! held keys and owns the single pending movement frame.
//!
//! ## States
//! - **Idle**: no movement key held, no movement frame pending
//! - **Active**: one or more keys held, exactly one movement frame pending
//!
//! Key-down of a recognized key enters Active and schedules a frame unless one is
//! already pending. Releasing the last key, or losing focus, cancels the pending frame
//! and returns to Idle. Each [`InputStateMachine::tick`] reschedules itself while keys
//! remain held.
//!
//! Drag and wheel gestures are one-shot and live in [`gestures`].

use std::collections::HashSet;

use cgmath::Vector3;
use log::debug;
use phf::phf_map;

use crate::core::frame_scheduler::{FrameHandle, FrameScheduler, FrameTask};

pub mod gestures;

/// Distance moved per frame by a single held key.
pub const MOVE_DISTANCE: f32 = 0.2;

/// Identifier of the key that adds upward motion on top of the directional keys.
pub const VERTICAL_MODIFIER: &str = "shift";

/// Upward motion contributed by the vertical modifier.
const VERTICAL_MOVE: [f32; 3] = [0.0, MOVE_DISTANCE, 0.0];

/// View-space direction of each movement key, keyed by lower-cased identifier.
static KEY_MOVES: phf::Map<&'static str, [f32; 3]> = phf_map! {
    "w" => [0.0, 0.0, MOVE_DISTANCE],
    "s" => [0.0, 0.0, -MOVE_DISTANCE],
    "a" => [MOVE_DISTANCE, 0.0, 0.0],
    "d" => [-MOVE_DISTANCE, 0.0, 0.0],
    "arrowup" => [0.0, 0.0, MOVE_DISTANCE],
    "arrowdown" => [0.0, 0.0, -MOVE_DISTANCE],
    "arrowleft" => [MOVE_DISTANCE, 0.0, 0.0],
    "arrowright" => [-MOVE_DISTANCE, 0.0, 0.0],
    " " => [0.0, -MOVE_DISTANCE, 0.0],
};

/// Lower-cases a key identifier so lookups are case-insensitive.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

/// Returns `true` if the (normalized) key drives camera movement.
pub fn is_movement_key(key: &str) -> bool {
    KEY_MOVES.contains_key(key) || key == VERTICAL_MODIFIER
}

/// Phase of the held-key state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPhase {
    /// No movement key held
    Idle,
    /// Movement keys held and a movement frame pending
    Active,
}

/// Result of one movement frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Move by this view-space direction; the next tick is already scheduled
    Continue(Vector3<f32>),
    /// Nothing is held; the loop has stopped
    Stop,
}

/// Tracks held movement keys and drives the per-frame movement loop.
#[derive(Debug, Default)]
pub struct InputStateMachine {
    held_keys: HashSet<String>,
    pending_tick: Option<FrameHandle>,
}

impl InputStateMachine {
    /// Creates an idle state machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> InputPhase {
        if self.held_keys.is_empty() {
            InputPhase::Idle
        } else {
            InputPhase::Active
        }
    }

    /// Returns `true` if a movement frame is scheduled.
    pub fn has_pending_tick(&self) -> bool {
        self.pending_tick.is_some()
    }

    /// Returns `true` if the key (any case) is currently held.
    pub fn is_held(&self, key: &str) -> bool {
        self.held_keys.contains(&normalize_key(key))
    }

    /// Handles a key press.
    ///
    /// # Returns
    /// `true` if the key is a movement key and was consumed
    pub fn key_down(&mut self, key: &str, scheduler: &mut dyn FrameScheduler) -> bool {
        let key = normalize_key(key);
        if !is_movement_key(&key) {
            return false;
        }
        if self.held_keys.insert(key) && self.held_keys.len() == 1 {
            debug!("Movement input active");
        }
        self.start_loop(scheduler);
        true
    }

    /// Handles a key release.
    ///
    /// # Returns
    /// `true` if the key is a movement key and was consumed
    pub fn key_up(&mut self, key: &str, scheduler: &mut dyn FrameScheduler) -> bool {
        let key = normalize_key(key);
        if !is_movement_key(&key) {
            return false;
        }
        self.held_keys.remove(&key);
        self.stop_loop_if_idle(scheduler);
        true
    }

    /// Forgets every held key and stops the loop.
    ///
    /// Key releases that happen while the window is unfocused are never delivered, so
    /// focus loss is treated as releasing everything.
    pub fn focus_lost(&mut self, scheduler: &mut dyn FrameScheduler) {
        if !self.held_keys.is_empty() {
            debug!("Focus lost, releasing {} held keys", self.held_keys.len());
        }
        self.held_keys.clear();
        self.stop_loop_if_idle(scheduler);
    }

    /// Runs one movement frame.
    ///
    /// Must be called when the scheduled movement frame fires. While keys are held the
    /// next frame is scheduled before returning.
    pub fn tick(&mut self, scheduler: &mut dyn FrameScheduler) -> TickOutcome {
        self.pending_tick = None;
        if self.held_keys.is_empty() {
            return TickOutcome::Stop;
        }

        let direction = self.direction();
        self.pending_tick = Some(scheduler.request_frame(FrameTask::Movement));
        TickOutcome::Continue(direction)
    }

    /// Unnormalized sum of the held keys' directions, plus upward motion when the
    /// vertical modifier is held.
    pub fn direction(&self) -> Vector3<f32> {
        let mut direction = self
            .held_keys
            .iter()
            .filter_map(|key| KEY_MOVES.get(key.as_str()))
            .fold(Vector3::new(0.0, 0.0, 0.0), |sum, step| {
                sum + Vector3::from(*step)
            });
        if self.held_keys.contains(VERTICAL_MODIFIER) {
            direction += Vector3::from(VERTICAL_MOVE);
        }
        direction
    }

    fn start_loop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.pending_tick.is_none() {
            self.pending_tick = Some(scheduler.request_frame(FrameTask::Movement));
        }
    }

    fn stop_loop_if_idle(&mut self, scheduler: &mut dyn FrameScheduler) {
        if !self.held_keys.is_empty() {
            return;
        }
        if let Some(handle) = self.pending_tick.take() {
            scheduler.cancel_frame(handle);
            debug!("Movement input idle");
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::InnerSpace;

    use super::*;
    use crate::core::frame_scheduler::FrameQueue;

    fn movement_frames(queue: &FrameQueue) -> usize {
        queue.pending_count(FrameTask::Movement)
    }

    #[test]
    fn first_key_schedules_exactly_one_frame() {
        let mut queue = FrameQueue::new();
        let mut input = InputStateMachine::new();

        assert!(input.key_down("w", &mut queue));
        assert_eq!(input.phase(), InputPhase::Active);
        assert_eq!(movement_frames(&queue), 1);

        assert!(input.key_down("a", &mut queue));
        assert!(input.key_down("w", &mut queue));
        assert_eq!(movement_frames(&queue), 1);
    }

    #[test]
    fn releasing_the_last_key_cancels_the_frame() {
        let mut queue = FrameQueue::new();
        let mut input = InputStateMachine::new();
        input.key_down("w", &mut queue);
        input.key_down("d", &mut queue);

        input.key_up("w", &mut queue);
        assert_eq!(input.phase(), InputPhase::Active);
        assert_eq!(movement_frames(&queue), 1);

        input.key_up("d", &mut queue);
        assert_eq!(input.phase(), InputPhase::Idle);
        assert_eq!(movement_frames(&queue), 0);
        assert!(!input.has_pending_tick());
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut queue = FrameQueue::new();
        let mut input = InputStateMachine::new();
        input.key_down("s", &mut queue);
        input.key_down("shift", &mut queue);

        input.focus_lost(&mut queue);

        assert_eq!(input.phase(), InputPhase::Idle);
        assert_eq!(movement_frames(&queue), 0);
        assert!(!input.is_held("s"));
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let mut queue = FrameQueue::new();
        let mut input = InputStateMachine::new();

        assert!(!input.key_down("q", &mut queue));
        assert!(!input.key_down("Escape", &mut queue));
        assert_eq!(input.phase(), InputPhase::Idle);
        assert!(!queue.has_pending());
    }

    #[test]
    fn keys_are_case_insensitive() {
        let mut queue = FrameQueue::new();
        let mut input = InputStateMachine::new();

        input.key_down("W", &mut queue);
        input.key_down("ArrowLeft", &mut queue);
        input.key_down("Shift", &mut queue);

        assert!(input.is_held("w"));
        assert!(input.is_held("arrowleft"));
        input.key_up("w", &mut queue);
        input.key_up("ARROWLEFT", &mut queue);
        input.key_up("shift", &mut queue);
        assert_eq!(input.phase(), InputPhase::Idle);
    }

    #[test]
    fn combined_keys_are_not_normalized() {
        let mut queue = FrameQueue::new();
        let mut input = InputStateMachine::new();
        input.key_down("w", &mut queue);
        input.key_down("a", &mut queue);
        queue.take_due();

        let TickOutcome::Continue(direction) = input.tick(&mut queue) else {
            panic!("expected the loop to continue");
        };

        assert_eq!(direction, Vector3::new(MOVE_DISTANCE, 0.0, MOVE_DISTANCE));
        assert!(direction.magnitude() > MOVE_DISTANCE);
        assert_eq!(movement_frames(&queue), 1);
    }

    #[test]
    fn vertical_modifier_adds_upward_motion() {
        let mut queue = FrameQueue::new();
        let mut input = InputStateMachine::new();
        input.key_down("shift", &mut queue);
        input.key_down("s", &mut queue);

        assert_eq!(
            input.direction(),
            Vector3::new(0.0, MOVE_DISTANCE, -MOVE_DISTANCE)
        );
    }

    #[test]
    fn opposite_keys_cancel_out() {
        let mut queue = FrameQueue::new();
        let mut input = InputStateMachine::new();
        input.key_down("w", &mut queue);
        input.key_down("arrowdown", &mut queue);

        assert_eq!(input.direction(), Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn tick_with_nothing_held_stops() {
        let mut queue = FrameQueue::new();
        let mut input = InputStateMachine::new();

        assert_eq!(input.tick(&mut queue), TickOutcome::Stop);
        assert!(!queue.has_pending());
    }
}
