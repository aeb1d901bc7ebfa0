//! Level data: tile layers and tile descriptors.
//!
//! The level document arrives externally parsed; this module only validates
//! it and resolves tile indices to texture regions. Everything here is
//! immutable once world setup finishes; the level never changes shape.

use glam::{IVec2, UVec2};
use sdl2::rect::Rect;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::error::{GameResult, LevelError};
use crate::render::{Renderer, TextureHandle};

/// Level description document, externally parsed. Every dimension field is
/// optional here so that validation, not deserialization, decides what is
/// fatal.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDocument {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub tile_width: Option<u32>,
    pub tile_height: Option<u32>,
    #[serde(default)]
    pub layers: Vec<LayerDocument>,
    #[serde(default)]
    pub tilesets: Vec<TileSetDocument>,
    pub player_spawn: Option<[i32; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayerDocument {
    pub name: Option<String>,
    #[serde(default)]
    pub data: Vec<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TileSetDocument {
    pub image: Option<String>,
    /// Global index of this set's first tile. 1-based; 0 always means empty.
    pub first_index: Option<u32>,
    pub columns: Option<u32>,
    pub tile_count: Option<u32>,
}

/// Maps one tile index to a region of a loaded texture. Built once at world
/// setup, read-only thereafter.
#[derive(Debug, Clone, Copy)]
pub struct TileDescriptor {
    pub texture: TextureHandle,
    pub src: Rect,
    pub size: UVec2,
}

#[derive(Debug, Clone)]
pub struct TileLayer {
    pub name: String,
    data: Vec<u32>,
}

impl TileLayer {
    /// Tile index at a cell, row-major. 0 means empty.
    pub fn tile_at(&self, x: u32, y: u32, width: u32) -> u32 {
        self.data[(y * width + x) as usize]
    }
}

pub struct Level {
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
    layers: Vec<TileLayer>,
    descriptors: Vec<Option<TileDescriptor>>,
    player_spawn: IVec2,
}

impl Level {
    /// Validates the document and builds the tile descriptor table, loading
    /// tile-set images through the renderer. Any missing dimension field,
    /// malformed layer, or unloadable image aborts setup; there is no
    /// partial-world fallback.
    pub fn load(doc: &LevelDocument, renderer: &mut dyn Renderer, asset_root: &Path) -> GameResult<Level> {
        let width = doc.width.ok_or(LevelError::MissingField("width"))?;
        let height = doc.height.ok_or(LevelError::MissingField("height"))?;
        let tile_width = doc.tile_width.ok_or(LevelError::MissingField("tile_width"))?;
        let tile_height = doc.tile_height.ok_or(LevelError::MissingField("tile_height"))?;

        if width == 0 || height == 0 || tile_width == 0 || tile_height == 0 {
            return Err(LevelError::InvalidConfig("zero level or tile dimension".into()).into());
        }
        if doc.layers.is_empty() {
            return Err(LevelError::NoLayers.into());
        }

        let expected = (width * height) as usize;
        let mut layers = Vec::with_capacity(doc.layers.len());
        for (i, layer) in doc.layers.iter().enumerate() {
            if layer.data.len() != expected {
                return Err(LevelError::LayerSizeMismatch {
                    layer: i,
                    got: layer.data.len(),
                    expected,
                }
                .into());
            }
            layers.push(TileLayer {
                name: layer.name.clone().unwrap_or_else(|| format!("layer{i}")),
                data: layer.data.clone(),
            });
        }

        let mut descriptors: Vec<Option<TileDescriptor>> = Vec::new();
        for set in &doc.tilesets {
            let image = set.image.as_deref().ok_or(LevelError::MissingField("tileset.image"))?;
            let texture = renderer.load_texture(&asset_root.join(image))?;
            let texture_size = renderer.texture_size(texture)?;

            let columns = set.columns.unwrap_or(texture_size.x / tile_width).max(1);
            let rows = (texture_size.y / tile_height).max(1);
            let tile_count = set.tile_count.unwrap_or(columns * rows);
            let first_index = set.first_index.unwrap_or(1);
            if first_index == 0 {
                return Err(LevelError::InvalidConfig("tileset first_index must be 1-based".into()).into());
            }

            let needed = (first_index + tile_count - 1) as usize;
            if descriptors.len() < needed {
                descriptors.resize(needed, None);
            }
            for i in 0..tile_count {
                let src = Rect::new(
                    ((i % columns) * tile_width) as i32,
                    ((i / columns) * tile_height) as i32,
                    tile_width,
                    tile_height,
                );
                descriptors[(first_index - 1 + i) as usize] = Some(TileDescriptor {
                    texture,
                    src,
                    size: UVec2::new(tile_width, tile_height),
                });
            }
        }

        let pixel_size = IVec2::new((width * tile_width) as i32, (height * tile_height) as i32);
        let player_spawn = doc
            .player_spawn
            .map(|[x, y]| IVec2::new(x, y))
            .unwrap_or(pixel_size / 2);

        info!(
            width,
            height,
            layers = layers.len(),
            tiles = descriptors.len(),
            "level loaded"
        );

        Ok(Level {
            width,
            height,
            tile_width,
            tile_height,
            layers,
            descriptors,
            player_spawn,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> UVec2 {
        UVec2::new(self.tile_width, self.tile_height)
    }

    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }

    /// Looks up the descriptor for a 1-based tile index. Index 0 and unknown
    /// indices resolve to `None`.
    pub fn descriptor(&self, index: u32) -> Option<&TileDescriptor> {
        if index == 0 {
            return None;
        }
        self.descriptors.get((index - 1) as usize)?.as_ref()
    }

    /// The whole level in pixels, anchored at the origin.
    pub fn pixel_bounds(&self) -> Rect {
        Rect::new(0, 0, self.width * self.tile_width, self.height * self.tile_height)
    }

    pub fn player_spawn(&self) -> IVec2 {
        self.player_spawn
    }
}
