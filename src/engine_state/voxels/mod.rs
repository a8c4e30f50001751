//! # Voxels
//!
//! Everything between a structure description and the block container handed to the
//! renderer.
//!
//! ## Data Flow
//!
//! 1. A [`region::RegionList`] is parsed from JSON
//! 2. [`voxel_map::RegionFillEngine`] expands its regions into a [`voxel_map::VoxelMap`],
//!    later regions overwriting earlier ones
//! 3. [`structure_builder::StructureBuilder`] copies the voxel map into a
//!    [`structure::Structure`], skipping voxels the structure rejects
//!
//! The voxel map and structure are rebuilt wholesale on every load.

pub mod block;
pub mod region;
pub mod structure;
pub mod structure_builder;
pub mod voxel_map;
