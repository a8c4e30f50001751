//! # Texture Atlas
//!
//! Maps texture identifiers to normalized UV rectangles inside a square atlas. The
//! atlas is padded up to the next power of two of its larger side, so UVs are divided
//! by that padded size rather than the raw image dimensions.

use std::collections::HashMap;

use crate::engine_state::voxels::block::block_id;

/// UV rectangle as `[u0, v0, u1, v1]`, each in `[0, 1]`.
pub type TextureUv = [f32; 4];

/// Pixel rectangle as `[u, v, width, height]` in the atlas image.
pub type PixelRect = [u32; 4];

/// Largest atlas side length, the biggest power of two a `u32` holds.
pub const MAX_ATLAS_SIZE: u32 = 1 << 31;

/// Returns the side length of the padded, square atlas.
pub fn atlas_size(width: u32, height: u32) -> u32 {
    width
        .max(height)
        .max(1)
        .checked_next_power_of_two()
        .unwrap_or(MAX_ATLAS_SIZE)
}

/// Texture lookup table for a packed atlas image.
#[derive(Debug, Clone, Default)]
pub struct TextureAtlas {
    size: u32,
    uvs: HashMap<String, TextureUv>,
}

impl TextureAtlas {
    /// Creates an empty atlas for an image of the given pixel dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: atlas_size(width, height),
            uvs: HashMap::new(),
        }
    }

    /// Registers a texture by its pixel rectangle.
    ///
    /// Block textures whose rectangle is not square (animated strips) are clamped to
    /// their first, square frame.
    ///
    /// # Arguments
    /// * `id` - Namespaced texture identifier, e.g. `minecraft:block/stone`
    /// * `rect` - The texture's `[u, v, width, height]` in pixels
    pub fn register(&mut self, id: impl Into<String>, rect: PixelRect) {
        let id = id.into();
        let [u, v, du, dv] = rect;
        let is_block_texture = block_id::path(&id).starts_with("block/");
        let frame_height = if du != dv && is_block_texture { du } else { dv };

        let size = self.size as f32;
        let uv = [
            u as f32 / size,
            v as f32 / size,
            (u as f32 + du as f32) / size,
            (v as f32 + frame_height as f32) / size,
        ];
        self.uvs.insert(id, uv);
    }

    /// Returns the UV rectangle registered for a texture.
    pub fn texture_uv(&self, id: &str) -> Option<TextureUv> {
        self.uvs.get(id).copied()
    }

    /// Side length of the padded atlas in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of registered textures.
    pub fn len(&self) -> usize {
        self.uvs.len()
    }

    /// Returns `true` if no texture is registered.
    pub fn is_empty(&self) -> bool {
        self.uvs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atlas_size_rounds_up_the_larger_side() {
        assert_eq!(atlas_size(256, 256), 256);
        assert_eq!(atlas_size(300, 100), 512);
        assert_eq!(atlas_size(16, 17), 32);
        assert_eq!(atlas_size(0, 0), 1);
        assert_eq!(atlas_size(u32::MAX, 16), MAX_ATLAS_SIZE);
    }

    #[test]
    fn rects_at_the_edge_of_u32_do_not_overflow() {
        let mut atlas = TextureAtlas::new(16, 16);
        atlas.register("minecraft:item/edge", [u32::MAX, u32::MAX, 16, 16]);

        let uv = atlas.texture_uv("minecraft:item/edge").unwrap();
        assert!(uv.iter().all(|coord| coord.is_finite()));
        assert!(uv[2] >= uv[0]);
    }

    #[test]
    fn uvs_are_normalized_by_padded_size() {
        let mut atlas = TextureAtlas::new(300, 64);
        atlas.register("minecraft:block/stone", [16, 32, 16, 16]);

        let uv = atlas.texture_uv("minecraft:block/stone").unwrap();
        assert_eq!(uv, [16.0 / 512.0, 32.0 / 512.0, 32.0 / 512.0, 48.0 / 512.0]);
    }

    #[test]
    fn animated_block_strips_use_first_frame() {
        let mut atlas = TextureAtlas::new(64, 64);
        atlas.register("minecraft:block/water_still", [0, 0, 16, 64]);
        atlas.register("minecraft:item/banner", [16, 0, 16, 32]);

        assert_eq!(atlas.texture_uv("minecraft:block/water_still").unwrap()[3], 0.25);
        assert_eq!(atlas.texture_uv("minecraft:item/banner").unwrap()[3], 0.5);
        assert!(atlas.texture_uv("minecraft:block/missing").is_none());
    }
}
