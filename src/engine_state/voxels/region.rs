//! # Region Module
//!
//! Declarative structure descriptions. A structure is a list of axis-aligned cuboid
//! regions over integer coordinates, each painting a single block type either as a
//! solid box or as a one-voxel-thick hollow shell.
//!
//! ## JSON Format
//!
//! ```json
//! {
//!   "width": 8, "height": 6, "depth": 8,
//!   "blocks": [
//!     { "start": [0, 0, 0], "end": [8, 1, 8], "type": "stone", "fill": true },
//!     { "start": [1, 1, 1], "end": [7, 5, 7], "type": "oak_planks" },
//!     { "start": [3, 1, 1], "end": [4, 3, 2], "type": "oak_door",
//!       "properties": { "facing": "north", "half": "lower" }, "fill": true }
//!   ]
//! }
//! ```
//!
//! `end` is exclusive on every axis. `fill` defaults to `false` (hollow shell).

use std::{fs::File, io::BufReader, io::Read, path::Path};

use cgmath::Point3;
use serde::Deserialize;
use thiserror::Error;

use super::block::{BlockProperties, BlockState};

/// Errors raised while reading a region list.
///
/// These are caller preconditions: a region list that cannot be read or is missing
/// required fields aborts the load before any voxel is produced.
#[derive(Debug, Error)]
pub enum StructureLoadError {
    /// The structure file could not be opened or read
    #[error("unable to read structure file: {0}")]
    Io(#[from] std::io::Error),
    /// The structure description is not valid JSON or misses required fields
    #[error("malformed structure description: {0}")]
    Json(#[from] serde_json::Error),
}

/// A cuboid of blocks over the half-open box `[start, end)`.
///
/// No ordering between `start` and `end` is enforced; a box that is empty along any
/// axis simply contributes no voxels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Region {
    /// Inclusive minimum corner
    pub start: [i32; 3],
    /// Exclusive maximum corner
    pub end: [i32; 3],
    /// Block type painted over the region
    #[serde(rename = "type", alias = "blockType")]
    pub block_type: String,
    /// Optional block properties shared by every voxel of the region
    #[serde(default)]
    pub properties: Option<BlockProperties>,
    /// `true` for a solid box, `false` for a hollow shell
    #[serde(default)]
    pub fill: bool,
}

impl Region {
    /// Returns `true` if the box is empty along at least one axis.
    pub fn is_degenerate(&self) -> bool {
        (0..3).any(|axis| self.start[axis] >= self.end[axis])
    }

    /// Number of integer coordinates inside the bounding box, or `None` if it does not
    /// fit in a `u64`.
    pub fn volume(&self) -> Option<u64> {
        (0..3)
            .map(|axis| (i64::from(self.end[axis]) - i64::from(self.start[axis])).max(0) as u64)
            .try_fold(1u64, u64::checked_mul)
    }

    /// Returns `true` if the coordinate lies on the minimum or maximum face of the box
    /// along at least one axis.
    ///
    /// The coordinate is assumed to be inside the box. A box that is one voxel thick
    /// along an axis is boundary everywhere along it, so thin slabs come out solid.
    pub fn is_on_shell(&self, position: Point3<i32>) -> bool {
        let coords = [position.x, position.y, position.z];
        (0..3).any(|axis| {
            coords[axis] == self.start[axis] || coords[axis] == self.end[axis] - 1
        })
    }

    /// Returns `true` if this region paints the given coordinate.
    pub fn includes(&self, position: Point3<i32>) -> bool {
        self.fill || self.is_on_shell(position)
    }

    /// The block state written for every included coordinate.
    pub fn block_state(&self) -> BlockState {
        BlockState {
            block_type: self.block_type.clone(),
            properties: self.properties.clone(),
        }
    }

    /// Iterates every coordinate inside the bounding box, x outermost.
    pub fn box_coordinates(&self) -> impl Iterator<Item = Point3<i32>> + '_ {
        let [sx, sy, sz] = self.start;
        let [ex, ey, ez] = self.end;
        (sx..ex).flat_map(move |x| {
            (sy..ey).flat_map(move |y| (sz..ez).map(move |z| Point3::new(x, y, z)))
        })
    }
}

/// A complete structure description: bounding dimensions plus ordered regions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegionList {
    /// Structure size along X
    pub width: u32,
    /// Structure size along Y
    pub height: u32,
    /// Structure size along Z
    pub depth: u32,
    /// Regions in painting order; later regions overwrite earlier ones
    pub blocks: Vec<Region>,
}

impl RegionList {
    /// Parses a region list from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, StructureLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a region list from any reader producing JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StructureLoadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads and parses a region list from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StructureLoadError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// The structure dimensions as `[width, height, depth]`.
    pub fn size(&self) -> [u32; 3] {
        [self.width, self.height, self.depth]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(start: [i32; 3], end: [i32; 3], fill: bool) -> Region {
        Region {
            start,
            end,
            block_type: "stone".to_string(),
            properties: None,
            fill,
        }
    }

    #[test]
    fn parses_the_structure_json_format() {
        let list = RegionList::from_json_str(
            r#"{
                "width": 4, "height": 3, "depth": 2,
                "blocks": [
                    { "start": [0, 0, 0], "end": [4, 1, 2], "type": "stone", "fill": true },
                    { "start": [0, 1, 0], "end": [1, 2, 1], "blockType": "oak_stairs",
                      "properties": { "facing": "east" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(list.size(), [4, 3, 2]);
        assert_eq!(list.blocks.len(), 2);
        assert!(list.blocks[0].fill);
        assert_eq!(list.blocks[1].block_type, "oak_stairs");
        assert!(!list.blocks[1].fill);
        assert_eq!(
            list.blocks[1].properties.as_ref().unwrap().get("facing").map(String::as_str),
            Some("east")
        );
    }

    #[test]
    fn missing_required_fields_fail_the_load() {
        let result = RegionList::from_json_str(r#"{ "width": 1, "height": 1, "blocks": [] }"#);
        assert!(matches!(result, Err(StructureLoadError::Json(_))));

        let result = RegionList::from_json_str(
            r#"{ "width": 1, "height": 1, "depth": 1, "blocks": [ { "start": [0,0,0], "type": "stone" } ] }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn degenerate_boxes_have_no_volume() {
        assert!(region([0, 0, 0], [0, 3, 3], true).is_degenerate());
        assert!(region([2, 0, 0], [1, 3, 3], true).is_degenerate());
        assert_eq!(region([2, 0, 0], [1, 3, 3], true).volume(), Some(0));
        assert_eq!(region([2, 0, 0], [1, 3, 3], true).box_coordinates().count(), 0);
        assert_eq!(region([0, 0, 0], [2, 3, 4], true).volume(), Some(24));
    }

    #[test]
    fn volume_of_an_unbounded_box_does_not_overflow() {
        let huge = region([i32::MIN; 3], [i32::MAX; 3], true);
        assert_eq!(huge.volume(), None);

        let wide = region([i32::MIN, 0, 0], [i32::MAX, 1, 1], true);
        assert_eq!(wide.volume(), Some(u64::from(u32::MAX)));
    }

    #[test]
    fn shell_test_matches_box_faces() {
        let hollow = region([0, 0, 0], [3, 3, 3], false);
        assert!(hollow.is_on_shell(Point3::new(0, 1, 1)));
        assert!(hollow.is_on_shell(Point3::new(1, 2, 1)));
        assert!(!hollow.is_on_shell(Point3::new(1, 1, 1)));
        assert!(!hollow.includes(Point3::new(1, 1, 1)));
        assert!(region([0, 0, 0], [3, 3, 3], true).includes(Point3::new(1, 1, 1)));
    }

    #[test]
    fn one_thick_slab_is_all_shell() {
        let slab = region([0, 5, 0], [4, 6, 4], false);
        assert!(slab.box_coordinates().all(|p| slab.includes(p)));
    }
}
