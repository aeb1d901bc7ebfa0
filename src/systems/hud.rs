//! Heads-up display: life icons, the score bar, and the game-over overlay.

use glam::IVec2;
use sdl2::pixels::Color;
use sdl2::rect::Rect;

use crate::constants::{
    HUD_MARGIN, LIFE_ICON_SIZE, LIFE_ICON_SPACING, SCORE_BAR_CAP, SCORE_BAR_HEIGHT, SCORE_BAR_WIDTH, VIEWPORT_SIZE,
};
use crate::error::GameResult;
use crate::render::sprite::{SpriteId, SpriteStore};
use crate::render::Renderer;

const TRACK_COLOR: Color = Color::RGB(40, 40, 48);
const FILL_COLOR: Color = Color::RGB(235, 180, 52);
const OVERLAY_COLOR: Color = Color::RGBA(0, 0, 0, 160);

/// Filled width of the score bar. Pure in `min(score, cap)`.
pub fn score_fill_width(score: u32) -> u32 {
    SCORE_BAR_WIDTH * score.min(SCORE_BAR_CAP) / SCORE_BAR_CAP
}

/// Draws one icon per remaining life plus the two-layer score bar. The HUD
/// is screen-space: no camera transform applies here.
pub fn draw_hud(
    renderer: &mut dyn Renderer,
    sprites: &SpriteStore,
    icon: SpriteId,
    lives: u8,
    score: u32,
) -> GameResult<()> {
    if let Some(sheet) = sprites.get(icon) {
        if let Some(animation) = sheet.animation("heart") {
            let src = animation.frame_at(0.0);
            for i in 0..lives as i32 {
                let dst = Rect::new(
                    HUD_MARGIN + i * LIFE_ICON_SPACING,
                    HUD_MARGIN,
                    LIFE_ICON_SIZE,
                    LIFE_ICON_SIZE,
                );
                renderer.render_texture(sheet.texture, Some(src), dst, false, 0.0)?;
            }
        }
    }

    let bar_y = HUD_MARGIN + LIFE_ICON_SIZE as i32 + 6;
    renderer.set_draw_color(TRACK_COLOR);
    renderer.fill_rect(Rect::new(HUD_MARGIN, bar_y, SCORE_BAR_WIDTH, SCORE_BAR_HEIGHT))?;

    let fill = score_fill_width(score);
    if fill > 0 {
        renderer.set_draw_color(FILL_COLOR);
        renderer.fill_rect(Rect::new(HUD_MARGIN, bar_y, fill, SCORE_BAR_HEIGHT))?;
    }

    Ok(())
}

/// Full-screen translucent overlay plus the two status lines.
pub fn draw_game_over(renderer: &mut dyn Renderer) -> GameResult<()> {
    renderer.set_draw_color(OVERLAY_COLOR);
    renderer.fill_rect(Rect::new(0, 0, VIEWPORT_SIZE.x, VIEWPORT_SIZE.y))?;

    let center_x = VIEWPORT_SIZE.x as i32 / 2;
    let center_y = VIEWPORT_SIZE.y as i32 / 2;
    renderer.draw_text("GAME OVER", IVec2::new(center_x - 80, center_y - 24), Color::RED)?;
    renderer.draw_text("PRESS R TO RESTART", IVec2::new(center_x - 120, center_y + 8), Color::WHITE)?;

    Ok(())
}
