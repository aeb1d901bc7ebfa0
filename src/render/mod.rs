//! Rendering seam between the simulation and the backend.
//!
//! The core only talks to the [`Renderer`] trait; the SDL2-backed
//! implementation lives in [`sdl`]. Tests drive the render pipeline through
//! a recording stub instead of a window.

pub mod sdl;
pub mod sprite;

use std::path::Path;

use glam::{IVec2, UVec2};
use sdl2::pixels::Color;
use sdl2::rect::Rect;

use crate::error::TextureError;

/// Opaque handle to a texture owned by the renderer. Implementations
/// allocate these however they like; the core only passes them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(usize);

impl TextureHandle {
    pub fn new(index: usize) -> Self {
        TextureHandle(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// The draw-call surface the core depends on.
///
/// Texture loading failures are fatal at world setup; everything else is
/// logged and swallowed by the callers.
pub trait Renderer {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, TextureError>;

    fn texture_size(&self, handle: TextureHandle) -> Result<UVec2, TextureError>;

    fn render_texture(
        &mut self,
        handle: TextureHandle,
        src: Option<Rect>,
        dst: Rect,
        flip: bool,
        angle: f64,
    ) -> Result<(), TextureError>;

    fn set_draw_color(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect) -> Result<(), TextureError>;

    fn draw_text(&mut self, text: &str, pos: IVec2, color: Color) -> Result<(), TextureError>;

    fn clear(&mut self);

    fn present(&mut self);
}
