//! Rendering seam for the structure viewer.
//!
//! Drawing is done by an external renderer that owns the structure and its GPU
//! resources. The viewer only hands it a view matrix once per requested frame, first
//! for the structure and then for the ground grid.

use cgmath::Matrix4;
use log::{debug, trace};

/// A renderer that draws the loaded structure from a given view.
pub trait Renderer {
    /// Draws the structure with the given view matrix.
    fn draw_structure(&mut self, view: &Matrix4<f32>);

    /// Draws the ground grid with the given view matrix.
    fn draw_grid(&mut self, view: &Matrix4<f32>);
}

/// Renderer that only logs what it is asked to draw.
///
/// Used when no graphics backend is attached, e.g. in headless runs.
#[derive(Debug, Default)]
pub struct LogRenderer {
    block_count: usize,
    frames: u64,
}

impl LogRenderer {
    /// Creates a renderer for a structure holding `block_count` blocks.
    pub fn new(block_count: usize) -> Self {
        Self {
            block_count,
            frames: 0,
        }
    }

    /// Number of structure draws so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn draw_structure(&mut self, view: &Matrix4<f32>) {
        self.frames += 1;
        debug!("Frame {}: drawing {} blocks", self.frames, self.block_count);
        trace!("View matrix: {:?}", view);
    }

    fn draw_grid(&mut self, _view: &Matrix4<f32>) {
        trace!("Frame {}: drawing grid", self.frames);
    }
}
