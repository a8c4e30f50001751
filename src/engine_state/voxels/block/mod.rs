//! # Block Module
//!
//! This module provides the block-state value stored per voxel: a block type identifier
//! plus an optional set of string properties (`facing=north`, `half=top`, ...).

use std::collections::BTreeMap;

pub mod block_id;

/// Property name to property value, e.g. `{"facing": "north"}`.
///
/// A `BTreeMap` keeps the properties in a stable order, which makes palette
/// comparison and log output deterministic.
pub type BlockProperties = BTreeMap<String, String>;

/// The block placed at a single voxel coordinate.
///
/// # Fields
/// - `block_type`: The block type identifier, namespaced or bare (`stone`, `minecraft:stone`)
/// - `properties`: Explicit block properties, or `None` to use the type's defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockState {
    /// The block type identifier
    pub block_type: String,
    /// Explicit properties, `None` when the region did not specify any
    pub properties: Option<BlockProperties>,
}

impl BlockState {
    /// Creates a block state without explicit properties.
    ///
    /// # Arguments
    /// * `block_type` - The block type identifier
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            properties: None,
        }
    }

    /// Creates a block state with explicit properties.
    ///
    /// # Arguments
    /// * `block_type` - The block type identifier
    /// * `properties` - The properties to attach to the block
    pub fn with_properties(block_type: impl Into<String>, properties: BlockProperties) -> Self {
        Self {
            block_type: block_type.into(),
            properties: Some(properties),
        }
    }
}
