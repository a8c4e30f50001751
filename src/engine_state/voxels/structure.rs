//! # Structure Module
//!
//! The structure is the block container handed to the renderer. It has fixed bounding
//! dimensions and accepts blocks one at a time; a placement can be rejected, in which
//! case the structure is left unchanged.

use std::{collections::HashMap, rc::Rc};

use cgmath::Point3;
use thiserror::Error;

use super::block::{block_id::namespaced, BlockProperties, BlockState};
use crate::engine_state::resources::{PropertyMatch, ResourceProvider};

/// Reasons a single block placement can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The coordinate lies outside the structure's bounding box
    #[error("position {position:?} is outside the structure size {size:?}")]
    OutOfBounds {
        /// The rejected coordinate
        position: [i32; 3],
        /// The structure dimensions
        size: [u32; 3],
    },
    /// No block definition is registered for the type
    #[error("unknown block type {0}")]
    UnknownBlockType(String),
    /// The block type does not declare the property
    #[error("block type {block_type} has no property {property}")]
    UnknownProperty {
        /// The block type being placed
        block_type: String,
        /// The undeclared property name
        property: String,
    },
    /// The property exists but does not accept the value
    #[error("invalid value {value} for property {property} of {block_type}")]
    InvalidProperty {
        /// The block type being placed
        block_type: String,
        /// The property name
        property: String,
        /// The rejected value
        value: String,
    },
}

/// A fixed-size block container that can reject placements.
pub trait Structure {
    /// The bounding dimensions as `[width, height, depth]`.
    fn size(&self) -> [u32; 3];

    /// Places a block, replacing whatever occupied the coordinate.
    ///
    /// # Arguments
    /// * `position` - Coordinate inside `[0, size)` on every axis
    /// * `block_type` - Block type identifier
    /// * `properties` - Explicit properties, or `None` for the type's defaults
    fn add_block(
        &mut self,
        position: Point3<i32>,
        block_type: &str,
        properties: Option<&BlockProperties>,
    ) -> Result<(), PlacementError>;
}

/// A placed block: its coordinate and an index into the structure palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedBlock {
    /// The block's coordinate
    pub position: Point3<i32>,
    /// Index of the block's state in [`BlockStructure::palette`]
    pub state: usize,
}

/// Palette-backed structure.
///
/// Each distinct `(type, properties)` pair is stored once in the palette and blocks
/// refer to it by index. When built with a resource provider, placements are checked
/// against the registered block definitions; without one only bounds are checked.
pub struct BlockStructure {
    size: [u32; 3],
    palette: Vec<BlockState>,
    blocks: Vec<PlacedBlock>,
    block_index: HashMap<Point3<i32>, usize>,
    resources: Option<Rc<dyn ResourceProvider>>,
}

impl BlockStructure {
    /// Creates an empty structure that only checks bounds.
    pub fn new(size: [u32; 3]) -> Self {
        Self {
            size,
            palette: Vec::new(),
            blocks: Vec::new(),
            block_index: HashMap::new(),
            resources: None,
        }
    }

    /// Creates an empty structure that validates block types and properties.
    pub fn with_resources(size: [u32; 3], resources: Rc<dyn ResourceProvider>) -> Self {
        Self {
            resources: Some(resources),
            ..Self::new(size)
        }
    }

    /// The distinct block states used by this structure.
    pub fn palette(&self) -> &[BlockState] {
        &self.palette
    }

    /// All placed blocks in placement order.
    pub fn blocks(&self) -> &[PlacedBlock] {
        &self.blocks
    }

    /// Number of placed blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the block state at a coordinate.
    pub fn get_block(&self, position: Point3<i32>) -> Option<&BlockState> {
        self.block_index
            .get(&position)
            .map(|&index| &self.palette[self.blocks[index].state])
    }

    fn is_inside(&self, position: Point3<i32>) -> bool {
        let coords = [position.x, position.y, position.z];
        coords
            .iter()
            .zip(self.size)
            .all(|(&c, size)| c >= 0 && i64::from(c) < i64::from(size))
    }

    fn validate(
        &self,
        block_type: &str,
        properties: Option<&BlockProperties>,
    ) -> Result<(), PlacementError> {
        let Some(resources) = &self.resources else {
            return Ok(());
        };
        let Some(definition) = resources.block_definition(block_type) else {
            return Err(PlacementError::UnknownBlockType(block_type.to_string()));
        };

        for (property, value) in properties.into_iter().flatten() {
            match definition.check_property(property, value) {
                PropertyMatch::Allowed => {}
                PropertyMatch::UnknownProperty => {
                    return Err(PlacementError::UnknownProperty {
                        block_type: block_type.to_string(),
                        property: property.clone(),
                    })
                }
                PropertyMatch::InvalidValue => {
                    return Err(PlacementError::InvalidProperty {
                        block_type: block_type.to_string(),
                        property: property.clone(),
                        value: value.clone(),
                    })
                }
            }
        }
        Ok(())
    }

    fn palette_index(&mut self, state: BlockState) -> usize {
        match self.palette.iter().position(|existing| *existing == state) {
            Some(index) => index,
            None => {
                self.palette.push(state);
                self.palette.len() - 1
            }
        }
    }
}

impl Structure for BlockStructure {
    fn size(&self) -> [u32; 3] {
        self.size
    }

    fn add_block(
        &mut self,
        position: Point3<i32>,
        block_type: &str,
        properties: Option<&BlockProperties>,
    ) -> Result<(), PlacementError> {
        if !self.is_inside(position) {
            return Err(PlacementError::OutOfBounds {
                position: position.into(),
                size: self.size,
            });
        }
        self.validate(block_type, properties)?;

        let properties = match properties {
            Some(properties) => properties.clone(),
            None => self
                .resources
                .as_ref()
                .and_then(|resources| resources.default_block_properties(block_type))
                .unwrap_or_default(),
        };
        let state = BlockState::with_properties(namespaced(block_type).into_owned(), properties);
        let state = self.palette_index(state);

        match self.block_index.get(&position) {
            Some(&index) => self.blocks[index].state = state,
            None => {
                self.block_index.insert(position, self.blocks.len());
                self.blocks.push(PlacedBlock { position, state });
            }
        }
        Ok(())
    }
}
