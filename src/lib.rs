#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Structure Viewer
//!
//! Loads a block structure described as a list of axis-aligned regions, expands it into
//! voxels, places the voxels into a structure, and lets the user orbit and fly around
//! it with the keyboard, mouse drag, and mouse wheel.
//!
//! ## Key Modules
//!
//! * `application_state` - Command line options, the window, and event translation
//! * `core` - Frame scheduling and user settings
//! * `engine_state` - Camera, input state machine, resources, and voxel building
//!
//! ## Architecture
//!
//! Everything runs on one thread. The window host turns native events into
//! [`application_state::input_state::InputEvent`]s, the viewer reacts by moving the
//! camera and scheduling frames, and each frame hands a view matrix to a
//! [`engine_state::rendering::Renderer`].
//!
//! ## Usage
//!
//! ```no_run
//! fn main() -> anyhow::Result<()> {
//!     structure_viewer::run()
//! }
//! ```

use std::rc::Rc;

use anyhow::Context;
use application_state::{ApplicationState, ViewerArgs};
use clap::Parser;
use engine_state::{
    rendering::LogRenderer,
    resources::{AssetBundle, RegisteredResources, ResourceProvider},
    voxels::{region::RegionList, structure::BlockStructure, structure_builder::StructureBuilder},
    ViewerState,
};
use log::{debug, info, warn};
use winit::event_loop::EventLoop;

use crate::core::{frame_scheduler::FrameQueue, settings::MemorySettings};

pub mod application_state;
pub mod core;
pub mod engine_state;

/// Parses the command line, loads the structure, and runs the viewer until the window
/// closes.
pub fn run() -> anyhow::Result<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");
    let args = ViewerArgs::parse();
    let (viewer, structure) = open_viewer(&args)?;
    let renderer = LogRenderer::new(structure.block_count());

    if args.headless {
        let mut renderer = renderer;
        let frames = render_headless(viewer, &mut renderer);
        info!("Rendered {frames} frame(s) headless");
        return Ok(());
    }

    let event_loop = EventLoop::new().context("Unable to create the event loop")?;
    let mut state = ApplicationState::new(viewer, Box::new(renderer));
    event_loop
        .run_app(&mut state)
        .context("Event loop terminated with an error")?;
    Ok(())
}

/// Runs the first frame of a viewer without a window.
///
/// # Returns
/// The number of structure draws the renderer received
pub fn render_headless(mut viewer: ViewerState, renderer: &mut LogRenderer) -> u64 {
    let mut frames = FrameQueue::new();
    viewer.start(&mut frames);
    for task in frames.take_due() {
        viewer.on_frame(task, &mut frames, renderer);
    }
    debug!(
        "Headless frame used a {}px texture atlas",
        viewer.resources().texture_atlas().size()
    );
    renderer.frames()
}

/// Loads everything named by the options and builds the structure.
///
/// # Returns
/// A viewer centered on the structure, and the structure itself
pub fn open_viewer(args: &ViewerArgs) -> anyhow::Result<(ViewerState, BlockStructure)> {
    let regions = RegionList::from_path(&args.structure)
        .with_context(|| format!("Unable to load structure {}", args.structure.display()))?;
    info!(
        "Loaded {} regions for a {}x{}x{} structure",
        regions.blocks.len(),
        regions.width,
        regions.height,
        regions.depth
    );

    let settings = match &args.settings {
        Some(path) => MemorySettings::from_path(path)
            .with_context(|| format!("Unable to load settings {}", path.display()))?,
        None => MemorySettings::new(),
    };

    let bundle = match &args.assets {
        Some(path) => Some(
            AssetBundle::from_path(path)
                .with_context(|| format!("Unable to load assets {}", path.display()))?,
        ),
        None => {
            warn!("No asset bundle given, block types will not be validated");
            None
        }
    };
    let validating = bundle.is_some();
    let resources: Rc<dyn ResourceProvider> = match bundle {
        Some(bundle) => Rc::new(RegisteredResources::from_bundle(bundle)?),
        None => Rc::new(RegisteredResources::new()),
    };

    let (structure, report) = StructureBuilder::build_from_regions(
        &regions,
        validating.then(|| resources.clone()),
    );
    if !report.failures.is_empty() {
        warn!("{} blocks could not be placed", report.failures.len());
    }

    let viewer = ViewerState::new(regions.size(), Box::new(settings), resources);
    Ok((viewer, structure))
}
