//! # Engine State Module
//!
//! The viewer session: camera, held-key movement, pointer gestures, user settings and
//! the resource provider, tied together behind an event-in, frame-out interface.
//!
//! ## Key Components
//!
//! * `camera_state` - Camera orientation, clamping, and the view matrix
//! * `input` - Held-key movement loop and pointer gestures
//! * `rendering` - The seam to the external renderer
//! * `resources` - Block definitions, models and texture UVs
//! * `voxels` - Regions, voxel maps, and structure building
//!
//! ## Frame Flow
//!
//! Input events mutate the camera or the held-key set and request frames through a
//! [`FrameScheduler`]. When the host fires a frame, [`ViewerState::on_frame`] runs the
//! movement tick if that is what was scheduled and hands the view matrix to the
//! renderer. Everything runs on one thread; events and frames never interleave.

use std::rc::Rc;

use camera_state::{camera::CameraController, CameraState};
use input::{gestures::DragGesture, InputStateMachine, TickOutcome};
use log::trace;
use rendering::Renderer;
use resources::ResourceProvider;

use crate::{
    application_state::input_state::InputEvent,
    core::{
        frame_scheduler::{FrameScheduler, FrameTask},
        settings::{read_sensitivity, SettingsStore, DRAG_SENSITIVITY_KEY, WHEEL_SENSITIVITY_KEY},
    },
};

pub mod camera_state;
pub mod input;
pub mod rendering;
pub mod resources;
pub mod voxels;

/// State of one open structure viewer.
///
/// # Examples
///
/// ```no_run
/// # use std::rc::Rc;
/// # use structure_viewer::{core::{frame_scheduler::FrameQueue, settings::MemorySettings},
/// #     engine_state::{ViewerState, rendering::LogRenderer, resources::RegisteredResources}};
/// let mut frames = FrameQueue::new();
/// let mut renderer = LogRenderer::new(0);
/// let mut viewer = ViewerState::new(
///     [16, 8, 16],
///     Box::new(MemorySettings::new()),
///     Rc::new(RegisteredResources::new()),
/// );
/// viewer.start(&mut frames);
/// for task in frames.take_due() {
///     viewer.on_frame(task, &mut frames, &mut renderer);
/// }
/// ```
pub struct ViewerState {
    camera: CameraState,
    controller: CameraController,
    input: InputStateMachine,
    drag: DragGesture,
    settings: Box<dyn SettingsStore>,
    resources: Rc<dyn ResourceProvider>,
}

impl ViewerState {
    /// Creates a viewer for a structure of the given size, centered on it.
    ///
    /// # Arguments
    /// * `structure_size` - The structure's `[width, height, depth]`
    /// * `settings` - User settings store, read on every gesture
    /// * `resources` - Resource provider shared with the renderer
    pub fn new(
        structure_size: [u32; 3],
        settings: Box<dyn SettingsStore>,
        resources: Rc<dyn ResourceProvider>,
    ) -> Self {
        Self {
            camera: CameraState::centered_on(structure_size),
            controller: CameraController::default(),
            input: InputStateMachine::new(),
            drag: DragGesture::new(),
            settings,
            resources,
        }
    }

    /// Requests the first frame.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        scheduler.request_frame(FrameTask::Render);
    }

    /// The camera as currently stored.
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// The held-key state machine.
    pub fn input(&self) -> &InputStateMachine {
        &self.input
    }

    /// The resource provider owned by this session.
    pub fn resources(&self) -> Rc<dyn ResourceProvider> {
        self.resources.clone()
    }

    /// Applies one input event.
    ///
    /// Pointer events belonging to a drag (press, moves while pressed, and the release
    /// or leave that ends it) are consumed; a release or move outside a drag is not.
    ///
    /// # Returns
    /// `true` if the viewer consumed the event and the host should not act on it
    pub fn handle_input(&mut self, event: InputEvent, scheduler: &mut dyn FrameScheduler) -> bool {
        match event {
            InputEvent::KeyDown(key) => self.input.key_down(&key, scheduler),
            InputEvent::KeyUp(key) => self.input.key_up(&key, scheduler),
            InputEvent::FocusLost => {
                self.input.focus_lost(scheduler);
                false
            }
            InputEvent::PointerDown { x, y } => {
                self.drag.begin(x, y);
                true
            }
            InputEvent::PointerMove { x, y } => match self.drag.update(x, y) {
                Some((dx, dy)) => {
                    let sensitivity = read_sensitivity(self.settings.as_ref(), DRAG_SENSITIVITY_KEY);
                    self.controller.pan(&mut self.camera, dx, dy, sensitivity);
                    scheduler.request_frame(FrameTask::Render);
                    true
                }
                None => false,
            },
            InputEvent::PointerUp | InputEvent::PointerLeave => {
                let was_dragging = self.drag.is_active();
                self.drag.end();
                was_dragging
            }
            InputEvent::Wheel { delta_y } => {
                let sensitivity = read_sensitivity(self.settings.as_ref(), WHEEL_SENSITIVITY_KEY);
                self.controller.move_relative(
                    &mut self.camera,
                    input::gestures::wheel_direction(delta_y),
                    true,
                    sensitivity,
                );
                scheduler.request_frame(FrameTask::Render);
                true
            }
        }
    }

    /// Runs a scheduled frame.
    ///
    /// A movement frame advances the camera by the held keys' direction before
    /// drawing; if nothing is held any more it draws nothing.
    pub fn on_frame(
        &mut self,
        task: FrameTask,
        scheduler: &mut dyn FrameScheduler,
        renderer: &mut dyn Renderer,
    ) {
        match task {
            FrameTask::Render => self.render(renderer),
            FrameTask::Movement => {
                if let TickOutcome::Continue(direction) = self.input.tick(scheduler) {
                    self.controller
                        .move_relative(&mut self.camera, direction, false, 1.0);
                    self.render(renderer);
                }
            }
        }
    }

    /// Draws the structure and grid from the current camera, then settles the camera
    /// onto its clamped orientation.
    pub fn render(&mut self, renderer: &mut dyn Renderer) {
        let view = self.controller.view_matrix(&self.camera);
        trace!(
            "Rendering at yaw {:?}, pitch {:?}, position {:?}",
            self.camera.clamped_yaw(),
            self.camera.clamped_pitch(),
            self.camera.position
        );
        renderer.draw_structure(&view);
        renderer.draw_grid(&view);
        self.camera.settle();
    }
}
