//! # Structure Builder
//!
//! Materializes a voxel map into a [`Structure`]. A block the structure rejects is
//! logged and skipped; the build always runs to the end and hands back the structure
//! together with a report of what was placed and what was dropped.

use std::rc::Rc;

use cgmath::Point3;
use log::{info, warn};
use web_time::Instant;

use super::{
    region::RegionList,
    structure::{BlockStructure, PlacementError, Structure},
    voxel_map::{RegionFillEngine, VoxelMap},
};
use crate::engine_state::resources::ResourceProvider;

/// A voxel that could not be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementFailure {
    /// Coordinate of the dropped voxel
    pub position: Point3<i32>,
    /// Block type that was requested
    pub block_type: String,
    /// Why the structure rejected it
    pub error: PlacementError,
}

/// Outcome of a structure build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of voxels successfully placed
    pub placed: usize,
    /// Voxels the structure rejected
    pub failures: Vec<PlacementFailure>,
}

/// Copies voxel maps into structures, tolerating per-voxel failures.
pub struct StructureBuilder;

impl StructureBuilder {
    /// Places every voxel of the map into the structure.
    ///
    /// Iteration order over the voxel map is unspecified; voxels at different
    /// coordinates never interact, so the result does not depend on it.
    ///
    /// # Arguments
    /// * `voxels` - The voxel map to materialize
    /// * `structure` - A structure, normally empty, sized to hold the voxels
    ///
    /// # Returns
    /// The populated structure and a report of placed and dropped voxels
    pub fn build<S: Structure>(voxels: &VoxelMap, mut structure: S) -> (S, BuildReport) {
        let started = Instant::now();
        let mut report = BuildReport::default();

        for (&position, block) in voxels {
            match structure.add_block(position, &block.block_type, block.properties.as_ref()) {
                Ok(()) => report.placed += 1,
                Err(error) => {
                    warn!(
                        "Was unable to add block of type {} at position {}, {}, {}: {}",
                        block.block_type, position.x, position.y, position.z, error
                    );
                    report.failures.push(PlacementFailure {
                        position,
                        block_type: block.block_type.clone(),
                        error,
                    });
                }
            }
        }

        info!(
            "Done! {} blocks created, {} skipped in {:?}",
            report.placed,
            report.failures.len(),
            started.elapsed()
        );
        (structure, report)
    }

    /// Fills the region list and builds a [`BlockStructure`] of its declared size.
    ///
    /// # Arguments
    /// * `regions` - The structure description
    /// * `resources` - Provider used to validate block types, if any
    pub fn build_from_regions(
        regions: &RegionList,
        resources: Option<Rc<dyn ResourceProvider>>,
    ) -> (BlockStructure, BuildReport) {
        let voxels = RegionFillEngine::fill(&regions.blocks);
        let structure = match resources {
            Some(resources) => BlockStructure::with_resources(regions.size(), resources),
            None => BlockStructure::new(regions.size()),
        };
        Self::build(&voxels, structure)
    }
}
