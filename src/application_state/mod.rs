//! # Application State Management
//!
//! This module handles the application's state management, including:
//! - Command line options
//! - Window creation
//! - Translating window events into viewer input
//! - Dispatching scheduled frames when the window redraws

pub mod input_manager;
pub mod input_state;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use input_manager::InputManager;
use log::{error, info};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::{
    core::frame_scheduler::{FrameQueue, FrameScheduler, FrameTask},
    engine_state::{rendering::Renderer, ViewerState},
};

/// Command line options for the structure viewer.
#[derive(Debug, Parser)]
#[command(name = "structure-viewer", version, about = "View block structures described as regions")]
pub struct ViewerArgs {
    /// Structure description (JSON with width, height, depth and blocks)
    pub structure: PathBuf,

    /// Asset bundle with block definitions, models and textures
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// User settings (JSON object of string values)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Build the structure and render a single frame without opening a window
    #[arg(long)]
    pub headless: bool,
}

/// Title of the viewer window.
pub const WINDOW_TITLE: &str = "Structure Viewer";

/// The main application state container that manages the application's lifecycle.
///
/// This struct holds the viewer session, the frame queue the viewer schedules into,
/// the renderer and the window. It implements `ApplicationHandler` to handle window
/// events.
pub struct ApplicationState {
    /// The viewer session
    pub viewer: ViewerState,

    /// Frames requested by the viewer, dispatched on redraw
    pub frames: FrameQueue,

    /// Renderer that draws each dispatched frame
    pub renderer: Box<dyn Renderer>,

    /// Translates window events into viewer input
    pub input_manager: InputManager,

    /// Handle to the application window, once created
    pub window: Option<Arc<Window>>,
}

impl ApplicationState {
    /// Creates the application around a viewer and a renderer.
    pub fn new(viewer: ViewerState, renderer: Box<dyn Renderer>) -> Self {
        Self {
            viewer,
            frames: FrameQueue::new(),
            renderer,
            input_manager: InputManager::new(),
            window: None,
        }
    }

    /// Runs every frame that is due.
    pub fn dispatch_frames(&mut self) {
        for task in self.frames.take_due() {
            self.viewer
                .on_frame(task, &mut self.frames, self.renderer.as_mut());
        }
    }
}

impl ApplicationHandler for ApplicationState {
    /// Creates the window on first resume and schedules the first frame.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes().with_title(WINDOW_TITLE);
        match event_loop.create_window(attributes) {
            Ok(window) => {
                info!("Window created");
                self.window = Some(Arc::new(window));
                self.viewer.start(&mut self.frames);
            }
            Err(err) => {
                error!("Unable to create window: {err}");
                event_loop.exit();
            }
        }
    }

    /// Handles window-related events such as resize, focus changes, and input events.
    ///
    /// # Arguments
    /// * `event_loop` - Reference to the active event loop
    /// * `_window_id` - ID of the window that generated the event
    /// * `event` - The window event to process
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(input) = self.input_manager.intake_input(&event) {
            self.viewer.handle_input(input, &mut self.frames);
        }

        match event {
            WindowEvent::Resized(_) => {
                self.frames.request_frame(FrameTask::Render);
            }
            WindowEvent::RedrawRequested => self.dispatch_frames(),
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        logical_key: Key::Named(NamedKey::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            _ => (),
        }
    }

    /// Called before the event loop goes to sleep.
    ///
    /// Asks for a redraw while frames are pending, so held keys keep moving the camera
    /// at the display's frame rate and an idle viewer does not redraw at all.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.frames.has_pending() {
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::{
        application_state::input_state::InputEvent,
        core::settings::MemorySettings,
        engine_state::{rendering::LogRenderer, resources::RegisteredResources},
    };

    fn application() -> ApplicationState {
        let viewer = ViewerState::new(
            [2, 2, 2],
            Box::new(MemorySettings::new()),
            Rc::new(RegisteredResources::new()),
        );
        ApplicationState::new(viewer, Box::new(LogRenderer::new(8)))
    }

    #[test]
    fn dispatch_drains_due_frames_and_keeps_movement_going() {
        let mut app = application();
        app.viewer.start(&mut app.frames);
        app.viewer
            .handle_input(InputEvent::KeyDown("w".into()), &mut app.frames);

        app.dispatch_frames();

        assert_eq!(app.frames.pending_count(FrameTask::Render), 0);
        assert_eq!(app.frames.pending_count(FrameTask::Movement), 1);
    }

    #[test]
    fn parses_command_line_options() {
        let args = ViewerArgs::parse_from([
            "structure-viewer",
            "house.json",
            "--assets",
            "assets.json",
            "--headless",
        ]);

        assert_eq!(args.structure, PathBuf::from("house.json"));
        assert_eq!(args.assets, Some(PathBuf::from("assets.json")));
        assert_eq!(args.settings, None);
        assert!(args.headless);
    }
}
