//! # Voxel Map
//!
//! A sparse, coordinate-keyed map of block states, and the fill engine that expands
//! declarative regions into it.
//!
//! ## Conflict Resolution
//!
//! Inserting at an occupied coordinate replaces the previous block state. The fill
//! engine paints regions in input order, so the region listed last wins wherever
//! regions overlap, whether it is solid or hollow.

use std::collections::{hash_map, HashMap};

use cgmath::Point3;
use log::{debug, trace};

use super::{block::BlockState, region::Region};

/// Sparse mapping from integer voxel coordinates to block states.
///
/// Iteration order is unspecified. Every coordinate appears at most once.
#[derive(Debug, Default, Clone)]
pub struct VoxelMap {
    voxels: HashMap<Point3<i32>, BlockState>,
}

impl VoxelMap {
    /// Creates an empty voxel map.
    pub fn new() -> Self {
        Self {
            voxels: HashMap::new(),
        }
    }

    /// Writes a block state at a coordinate, overwriting any existing entry.
    ///
    /// # Returns
    /// The block state previously stored at the coordinate, if any
    pub fn insert(&mut self, position: Point3<i32>, block: BlockState) -> Option<BlockState> {
        self.voxels.insert(position, block)
    }

    /// Returns the block state at a coordinate.
    pub fn get(&self, position: Point3<i32>) -> Option<&BlockState> {
        self.voxels.get(&position)
    }

    /// Number of occupied coordinates.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Returns `true` if no coordinate is occupied.
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Iterates all `(coordinate, block state)` pairs in unspecified order.
    pub fn iter(&self) -> hash_map::Iter<'_, Point3<i32>, BlockState> {
        self.voxels.iter()
    }
}

impl<'a> IntoIterator for &'a VoxelMap {
    type Item = (&'a Point3<i32>, &'a BlockState);
    type IntoIter = hash_map::Iter<'a, Point3<i32>, BlockState>;

    fn into_iter(self) -> Self::IntoIter {
        self.voxels.iter()
    }
}

/// Expands region lists into voxel maps.
///
/// Work is proportional to the summed bounding-box volume of the regions. No limit is
/// placed on region size; callers feeding untrusted input should bound it themselves.
pub struct RegionFillEngine;

impl RegionFillEngine {
    /// Paints every region, in order, into a fresh voxel map.
    ///
    /// # Arguments
    /// * `regions` - Regions in painting order
    ///
    /// # Returns
    /// The resulting voxel map, last write winning on overlap
    pub fn fill(regions: &[Region]) -> VoxelMap {
        let mut voxel_map = VoxelMap::new();
        for region in regions {
            Self::paint_region(&mut voxel_map, region);
        }
        voxel_map
    }

    /// Paints a single region into an existing voxel map.
    ///
    /// # Returns
    /// The number of coordinates written by this region
    pub fn paint_region(voxel_map: &mut VoxelMap, region: &Region) -> usize {
        if region.is_degenerate() {
            debug!(
                "Skipping empty region {:?}..{:?} of {}",
                region.start, region.end, region.block_type
            );
            return 0;
        }

        trace!(
            "Painting region {:?}..{:?} of {} ({:?} coordinates)",
            region.start, region.end, region.block_type, region.volume()
        );
        let block = region.block_state();
        let mut written = 0;
        for position in region.box_coordinates() {
            if region.includes(position) {
                voxel_map.insert(position, block.clone());
                written += 1;
            }
        }
        written
    }
}
