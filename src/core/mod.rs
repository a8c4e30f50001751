//! # Core Module
//!
//! Host-facing primitives shared by the viewer: frame scheduling and user settings.
//!
//! ## Key Components
//! - `FrameScheduler`: Requests and cancels animation frames from the host
//! - `FrameQueue`: Deterministic scheduler drained once per host frame
//! - `SettingsStore`: Read access to user settings such as gesture sensitivities
//!
//! ## Usage
//! ```rust
//! use structure_viewer::core::{FrameQueue, FrameScheduler, FrameTask, MemorySettings, SettingsStore};
//!
//! let mut frames = FrameQueue::new();
//! frames.request_frame(FrameTask::Render);
//! assert_eq!(frames.take_due(), vec![FrameTask::Render]);
//!
//! let mut settings = MemorySettings::new();
//! settings.set("click-drag-sensitivity", "2");
//! assert_eq!(settings.get("click-drag-sensitivity").as_deref(), Some("2"));
//! ```

pub mod frame_scheduler;
pub mod settings;

pub use frame_scheduler::{FrameHandle, FrameQueue, FrameScheduler, FrameTask};
pub use settings::{MemorySettings, SettingsStore};
