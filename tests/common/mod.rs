//! Shared helpers for the integration tests: a recording renderer stub and
//! ready-made world documents, so tests never need SDL or real assets.

// Each test binary compiles this module separately and uses a different
// slice of it.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;

use glam::{IVec2, UVec2};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sdl2::pixels::Color;
use sdl2::rect::Rect;

use emberfield::assets::GameDocuments;
use emberfield::audio::NullAudio;
use emberfield::clock::{Clock, ManualClock};
use emberfield::error::TextureError;
use emberfield::game::Game;
use emberfield::level::{LayerDocument, LevelDocument, TileSetDocument};
use emberfield::render::sprite::{AnimationDocument, SpriteSheetDocument};
use emberfield::render::{Renderer, TextureHandle};
use emberfield::script::NoopScript;

pub const LEVEL_TILES: UVec2 = UVec2::new(40, 30);
pub const TILE_SIZE: u32 = 32;
pub const PLAYER_SPAWN: IVec2 = IVec2::new(100, 100);

/// What the stub recorded about one draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Texture { dst: Rect },
    FillRect(Rect),
    Text(String),
    Clear,
    Present,
}

/// Renderer that hands out handles and records every call.
#[derive(Debug, Default)]
pub struct StubRenderer {
    pub loaded: Vec<String>,
    pub calls: Vec<DrawCall>,
}

impl Renderer for StubRenderer {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, TextureError> {
        self.loaded.push(path.display().to_string());
        Ok(TextureHandle::new(self.loaded.len() - 1))
    }

    fn texture_size(&self, _handle: TextureHandle) -> Result<UVec2, TextureError> {
        Ok(UVec2::new(256, 256))
    }

    fn render_texture(
        &mut self,
        _handle: TextureHandle,
        _src: Option<Rect>,
        dst: Rect,
        _flip: bool,
        _angle: f64,
    ) -> Result<(), TextureError> {
        self.calls.push(DrawCall::Texture { dst });
        Ok(())
    }

    fn set_draw_color(&mut self, _color: Color) {}

    fn fill_rect(&mut self, rect: Rect) -> Result<(), TextureError> {
        self.calls.push(DrawCall::FillRect(rect));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, _pos: IVec2, _color: Color) -> Result<(), TextureError> {
        self.calls.push(DrawCall::Text(text.to_string()));
        Ok(())
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn present(&mut self) {
        self.calls.push(DrawCall::Present);
    }
}

pub fn level_document() -> LevelDocument {
    LevelDocument {
        width: Some(LEVEL_TILES.x),
        height: Some(LEVEL_TILES.y),
        tile_width: Some(TILE_SIZE),
        tile_height: Some(TILE_SIZE),
        layers: vec![LayerDocument {
            name: Some("ground".into()),
            data: vec![1; (LEVEL_TILES.x * LEVEL_TILES.y) as usize],
        }],
        tilesets: vec![TileSetDocument {
            image: Some("tiles.png".into()),
            first_index: Some(1),
            columns: None,
            tile_count: None,
        }],
        player_spawn: Some([PLAYER_SPAWN.x, PLAYER_SPAWN.y]),
    }
}

fn sheet(animations: &[(&str, u32)]) -> SpriteSheetDocument {
    SpriteSheetDocument {
        image: Some("sheet.png".into()),
        frame_width: Some(32),
        frame_height: Some(32),
        animations: animations
            .iter()
            .enumerate()
            .map(|(row, (name, frames))| {
                (
                    name.to_string(),
                    AnimationDocument {
                        row: row as u32,
                        frames: *frames,
                        frame_duration: 0.1,
                    },
                )
            })
            .collect(),
    }
}

pub fn sprite_documents() -> HashMap<String, SpriteSheetDocument> {
    let mut sprites = HashMap::new();
    sprites.insert("player".to_string(), sheet(&[("idle", 2), ("walk", 4), ("attack", 3)]));
    sprites.insert("enemy".to_string(), sheet(&[("walk", 4)]));
    sprites.insert("pickup".to_string(), sheet(&[("heart", 2), ("coin", 4)]));
    sprites.insert("bomb".to_string(), sheet(&[("fuse", 2)]));
    sprites
}

pub fn documents() -> GameDocuments {
    GameDocuments {
        level: level_document(),
        sprites: sprite_documents(),
    }
}

/// A fully set-up game over stub collaborators with a deterministic rng and
/// a manual clock.
pub fn new_game() -> (Game, ManualClock, StubRenderer) {
    let mut renderer = StubRenderer::default();
    let clock = ManualClock::new();
    let game = Game::new(
        &mut renderer,
        &documents(),
        Box::new(NullAudio),
        Box::new(NoopScript),
        SmallRng::seed_from_u64(7),
        clock.now(),
        Path::new("assets"),
    )
    .expect("world setup failed");
    (game, clock, renderer)
}
