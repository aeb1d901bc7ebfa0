//! The per-frame render pipeline.
//!
//! Strict order: clear, terrain layers, entities (collecting expired
//! hazards for removal after the pass), HUD, the game-over overlay when
//! applicable, present. Entity-level render failures are logged and
//! swallowed; they never interrupt the frame.

use sdl2::pixels::Color;
use sdl2::rect::Rect;
use smallvec::SmallVec;
use tracing::warn;

use crate::camera::Camera;
use crate::entity::{EntityId, EntityKind, EntityRegistry};
use crate::error::GameResult;
use crate::level::Level;
use crate::render::sprite::{SpriteId, SpriteStore};
use crate::render::Renderer;
use crate::systems::hud;

const CLEAR_COLOR: Color = Color::RGB(12, 12, 16);

/// Read-only state the pipeline needs besides the registry.
pub struct FrameContext<'a> {
    pub level: &'a Level,
    pub sprites: &'a SpriteStore,
    pub camera: &'a Camera,
    pub hud_icon: SpriteId,
    pub lives: u8,
    pub score: u32,
    pub game_over: bool,
}

pub fn draw_frame(renderer: &mut dyn Renderer, registry: &mut EntityRegistry, ctx: &FrameContext<'_>) -> GameResult<()> {
    renderer.set_draw_color(CLEAR_COLOR);
    renderer.clear();

    draw_terrain(renderer, ctx.level, ctx.camera)?;

    // Entities draw themselves; expired hazards are collected here and
    // removed only after the pass completes.
    let mut expired: SmallVec<[EntityId; 8]> = SmallVec::new();
    for entity in registry.iter() {
        if let Err(e) = entity.render(renderer, ctx.sprites, ctx.camera) {
            warn!(entity = %entity.id, "entity render failed: {e}");
        }
        if let EntityKind::Hazard(hazard) = &entity.kind {
            if hazard.is_expired() {
                expired.push(entity.id);
            }
        }
    }
    for id in expired {
        registry.remove(id);
    }

    hud::draw_hud(renderer, ctx.sprites, ctx.hud_icon, ctx.lives, ctx.score)?;

    if ctx.game_over {
        hud::draw_game_over(renderer)?;
    }

    renderer.present();
    Ok(())
}

/// Every layer in document order, every non-empty cell at its grid-aligned
/// position through the camera. Unknown tile indices are skipped.
fn draw_terrain(renderer: &mut dyn Renderer, level: &Level, camera: &Camera) -> GameResult<()> {
    let tile = level.tile_size();
    for layer in level.layers() {
        for y in 0..level.height() {
            for x in 0..level.width() {
                let index = layer.tile_at(x, y, level.width());
                if index == 0 {
                    continue;
                }
                let Some(descriptor) = level.descriptor(index) else {
                    continue;
                };
                let world = Rect::new(
                    (x * tile.x) as i32,
                    (y * tile.y) as i32,
                    descriptor.size.x,
                    descriptor.size.y,
                );
                renderer.render_texture(descriptor.texture, Some(descriptor.src), camera.to_screen(world), false, 0.0)?;
            }
        }
    }
    Ok(())
}
