//! SDL2-backed implementation of the [`Renderer`] trait.

use std::path::Path;

use glam::{IVec2, UVec2};
use sdl2::image::LoadTexture;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::ttf::Font;
use sdl2::video::{Window, WindowContext};
use tracing::debug;

use crate::error::{GameResult, TextureError};
use crate::render::{Renderer, TextureHandle};

pub struct SdlRenderer {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    textures: Vec<Texture>,
    font: Font<'static, 'static>,
}

impl SdlRenderer {
    /// Wraps a canvas and loads the HUD font. A missing or undecodable font
    /// is a fatal setup error, like any other asset.
    pub fn new(mut canvas: Canvas<Window>, font_path: &Path, font_size: u16) -> GameResult<Self> {
        // The ttf context must outlive every Font; the renderer lives for the
        // whole process, so leaking one context here is fine.
        let ttf: &'static sdl2::ttf::Sdl2TtfContext =
            Box::leak(Box::new(sdl2::ttf::init().map_err(|e| TextureError::LoadFailed(e.to_string()))?));
        let font = ttf
            .load_font(font_path, font_size)
            .map_err(|e| TextureError::LoadFailed(format!("font {}: {e}", font_path.display())))?;

        canvas.set_blend_mode(BlendMode::Blend);
        let texture_creator = canvas.texture_creator();

        Ok(Self {
            canvas,
            texture_creator,
            textures: Vec::new(),
            font,
        })
    }

    fn texture(&self, handle: TextureHandle) -> Result<&Texture, TextureError> {
        self.textures.get(handle.0).ok_or(TextureError::UnknownHandle(handle.0))
    }
}

impl Renderer for SdlRenderer {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, TextureError> {
        let texture = self
            .texture_creator
            .load_texture(path)
            .map_err(|e| TextureError::LoadFailed(format!("{}: {e}", path.display())))?;
        self.textures.push(texture);

        let handle = TextureHandle(self.textures.len() - 1);
        debug!(path = %path.display(), handle = handle.0, "loaded texture");
        Ok(handle)
    }

    fn texture_size(&self, handle: TextureHandle) -> Result<UVec2, TextureError> {
        let query = self.texture(handle)?.query();
        Ok(UVec2::new(query.width, query.height))
    }

    fn render_texture(
        &mut self,
        handle: TextureHandle,
        src: Option<Rect>,
        dst: Rect,
        flip: bool,
        angle: f64,
    ) -> Result<(), TextureError> {
        let texture = self.textures.get(handle.0).ok_or(TextureError::UnknownHandle(handle.0))?;
        self.canvas
            .copy_ex(texture, src, Some(dst), angle, None, flip, false)
            .map_err(TextureError::RenderFailed)
    }

    fn set_draw_color(&mut self, color: Color) {
        self.canvas.set_draw_color(color);
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<(), TextureError> {
        self.canvas.fill_rect(rect).map_err(TextureError::RenderFailed)
    }

    fn draw_text(&mut self, text: &str, pos: IVec2, color: Color) -> Result<(), TextureError> {
        let surface = self
            .font
            .render(text)
            .blended(color)
            .map_err(|e| TextureError::RenderFailed(e.to_string()))?;
        let texture = self
            .texture_creator
            .create_texture_from_surface(&surface)
            .map_err(|e| TextureError::RenderFailed(e.to_string()))?;

        let query = texture.query();
        let dst = Rect::new(pos.x, pos.y, query.width, query.height);
        self.canvas.copy(&texture, None, Some(dst)).map_err(TextureError::RenderFailed)
    }

    fn clear(&mut self) {
        self.canvas.clear();
    }

    fn present(&mut self) {
        self.canvas.present();
    }
}
