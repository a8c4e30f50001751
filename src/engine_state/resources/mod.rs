//! # Resource Provider
//!
//! Block definitions, block models and texture UVs are looked up by string identifier
//! through the [`ResourceProvider`] trait. The provider is an ordinary value owned by
//! the viewer session and handed to whatever needs it; nothing here is global.
//!
//! ## Asset Bundle Format
//!
//! [`RegisteredResources::from_bundle`] loads a JSON bundle of the form
//!
//! ```json
//! {
//!   "blockstates": { "stone": { "variants": { "": { "model": "block/stone" } } } },
//!   "models": { "block/stone": { "parent": "block/cube_all", "textures": { "all": "block/stone" } } },
//!   "textures": { "block/stone": [0, 0, 16, 16] },
//!   "atlas": { "width": 256, "height": 256 }
//! }
//! ```
//!
//! All identifiers are registered under the `minecraft:` namespace. When `atlas` is
//! absent its dimensions are taken from the furthest texture extent.

use std::{collections::HashMap, fs::File, io::BufReader, path::Path};

use log::info;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::engine_state::voxels::block::{block_id::namespaced, BlockProperties};

pub mod block_definition;
pub mod block_model;
pub mod texture_atlas;

pub use block_definition::{BlockDefinition, PropertyMatch};
pub use block_model::BlockModel;
pub use texture_atlas::{PixelRect, TextureAtlas, TextureUv};

/// Errors raised while loading an asset bundle.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The bundle file could not be opened or read
    #[error("unable to read asset bundle: {0}")]
    Io(#[from] std::io::Error),
    /// The bundle is not valid JSON or has the wrong shape
    #[error("malformed asset bundle: {0}")]
    Json(#[from] serde_json::Error),
    /// A blockstate document has neither `variants` nor `multipart`
    #[error("block definition {id} has neither variants nor multipart")]
    MalformedBlockDefinition {
        /// The offending block identifier
        id: String,
    },
}

/// Render-relevant flags of a block type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockFlags {
    /// Whether the block fully hides the faces behind it
    pub opaque: bool,
}

/// Lookup capability set used by structures and the external renderer.
///
/// Every lookup returns the previously registered value for the identifier, or `None`.
/// Identifiers may be bare (`stone`) or namespaced (`minecraft:stone`).
pub trait ResourceProvider {
    /// Returns the definition of a block type.
    fn block_definition(&self, id: &str) -> Option<&BlockDefinition>;

    /// Returns a flattened block model.
    fn block_model(&self, id: &str) -> Option<&BlockModel>;

    /// Returns the atlas UV rectangle of a texture.
    fn texture_uv(&self, id: &str) -> Option<TextureUv>;

    /// Returns the texture atlas.
    fn texture_atlas(&self) -> &TextureAtlas;

    /// Returns render flags for a block type.
    fn block_flags(&self, _id: &str) -> BlockFlags {
        BlockFlags { opaque: false }
    }

    /// Returns the properties used when a block is placed without explicit ones.
    fn default_block_properties(&self, _id: &str) -> Option<BlockProperties> {
        None
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct AtlasDimensions {
    width: u32,
    height: u32,
}

/// Serialized asset bundle, see the module documentation.
#[derive(Debug, Default, Deserialize)]
pub struct AssetBundle {
    #[serde(default)]
    blockstates: HashMap<String, Value>,
    #[serde(default)]
    models: HashMap<String, BlockModel>,
    #[serde(default)]
    textures: HashMap<String, PixelRect>,
    #[serde(default)]
    atlas: Option<AtlasDimensions>,
}

impl AssetBundle {
    /// Parses an asset bundle from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ResourceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses an asset bundle from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// In-memory resource provider populated from an asset bundle or by hand.
#[derive(Debug, Default)]
pub struct RegisteredResources {
    definitions: HashMap<String, BlockDefinition>,
    models: HashMap<String, BlockModel>,
    atlas: TextureAtlas,
}

impl RegisteredResources {
    /// Creates a provider with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a provider from a parsed asset bundle.
    ///
    /// Blockstates are parsed into definitions, models are flattened, and texture
    /// rectangles are converted into atlas UVs.
    pub fn from_bundle(bundle: AssetBundle) -> Result<Self, ResourceError> {
        let mut definitions = HashMap::with_capacity(bundle.blockstates.len());
        for (id, json) in &bundle.blockstates {
            let id = namespaced(id).into_owned();
            let definition = BlockDefinition::from_json(&id, json)?;
            definitions.insert(id, definition);
        }

        let mut models: HashMap<String, BlockModel> = bundle
            .models
            .into_iter()
            .map(|(id, model)| (namespaced(&id).into_owned(), model))
            .collect();
        block_model::flatten_models(&mut models);

        let (width, height) = match bundle.atlas {
            Some(AtlasDimensions { width, height }) => (width, height),
            None => bundle
                .textures
                .values()
                .fold((0u32, 0u32), |(w, h), [u, v, du, dv]| {
                    (w.max(u.saturating_add(*du)), h.max(v.saturating_add(*dv)))
                }),
        };
        let mut atlas = TextureAtlas::new(width, height);
        for (id, rect) in bundle.textures {
            atlas.register(namespaced(&id).into_owned(), rect);
        }

        info!(
            "Loaded {} block definitions, {} models and {} textures ({}px atlas)",
            definitions.len(),
            models.len(),
            atlas.len(),
            atlas.size()
        );

        Ok(Self {
            definitions,
            models,
            atlas,
        })
    }

    /// Registers or replaces a block definition under its own identifier.
    pub fn register_block(&mut self, definition: BlockDefinition) {
        let id = namespaced(&definition.id).into_owned();
        self.definitions.insert(id, definition);
    }

    /// Registers or replaces a block model.
    pub fn register_model(&mut self, id: &str, model: BlockModel) {
        self.models.insert(namespaced(id).into_owned(), model);
    }

    /// Replaces the texture atlas.
    pub fn set_texture_atlas(&mut self, atlas: TextureAtlas) {
        self.atlas = atlas;
    }
}

impl ResourceProvider for RegisteredResources {
    fn block_definition(&self, id: &str) -> Option<&BlockDefinition> {
        self.definitions.get(namespaced(id).as_ref())
    }

    fn block_model(&self, id: &str) -> Option<&BlockModel> {
        self.models.get(namespaced(id).as_ref())
    }

    fn texture_uv(&self, id: &str) -> Option<TextureUv> {
        self.atlas.texture_uv(namespaced(id).as_ref())
    }

    fn texture_atlas(&self) -> &TextureAtlas {
        &self.atlas
    }
}
