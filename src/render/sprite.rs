//! Sprite sheets and per-entity animation state.
//!
//! A sheet is an externally described grid of frames over a single texture,
//! with named animations (one row each). Entities keep only a [`SpriteId`]
//! plus the active animation name and its elapsed time.

use std::collections::HashMap;
use std::path::Path;

use glam::UVec2;
use sdl2::rect::Rect;
use serde::Deserialize;
use tracing::debug;

use crate::error::{GameResult, SpriteError};
use crate::render::{Renderer, TextureHandle};

/// Sprite-sheet description document, externally parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct SpriteSheetDocument {
    pub image: Option<String>,
    pub frame_width: Option<u32>,
    pub frame_height: Option<u32>,
    #[serde(default)]
    pub animations: HashMap<String, AnimationDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimationDocument {
    /// Row of the sheet this animation occupies.
    pub row: u32,
    /// Number of frames, taken left to right.
    pub frames: u32,
    /// Seconds per frame.
    pub frame_duration: f32,
}

/// Opaque handle to a sheet in the [`SpriteStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(usize);

#[cfg(test)]
impl SpriteId {
    pub(crate) fn for_tests(index: usize) -> SpriteId {
        SpriteId(index)
    }
}

#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<Rect>,
    frame_duration: f32,
}

impl Animation {
    /// Source rectangle for the frame active at `time` seconds, looping.
    pub fn frame_at(&self, time: f32) -> Rect {
        let index = (time / self.frame_duration) as usize % self.frames.len();
        self.frames[index]
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

pub struct SpriteSheet {
    pub texture: TextureHandle,
    pub frame_size: UVec2,
    animations: HashMap<String, Animation>,
}

impl SpriteSheet {
    /// Builds a sheet from its description document, loading the backing
    /// image through the renderer. Missing fields and unloadable images are
    /// fatal, matching the rest of world setup.
    pub fn from_document(
        doc: &SpriteSheetDocument,
        renderer: &mut dyn Renderer,
        asset_root: &Path,
    ) -> GameResult<SpriteSheet> {
        let image = doc.image.as_deref().ok_or(SpriteError::MissingField("image"))?;
        let frame_width = doc.frame_width.ok_or(SpriteError::MissingField("frame_width"))?;
        let frame_height = doc.frame_height.ok_or(SpriteError::MissingField("frame_height"))?;

        if doc.animations.is_empty() {
            return Err(SpriteError::NoAnimations.into());
        }

        let texture = renderer.load_texture(&asset_root.join(image))?;

        let mut animations = HashMap::new();
        for (name, anim) in &doc.animations {
            if anim.frames == 0 {
                return Err(SpriteError::InvalidAnimation {
                    name: name.clone(),
                    problem: "zero frames".into(),
                }
                .into());
            }
            if anim.frame_duration <= 0.0 {
                return Err(SpriteError::InvalidAnimation {
                    name: name.clone(),
                    problem: format!("non-positive frame duration {}", anim.frame_duration),
                }
                .into());
            }

            let frames = (0..anim.frames)
                .map(|i| {
                    Rect::new(
                        (i * frame_width) as i32,
                        (anim.row * frame_height) as i32,
                        frame_width,
                        frame_height,
                    )
                })
                .collect();
            animations.insert(
                name.clone(),
                Animation {
                    frames,
                    frame_duration: anim.frame_duration,
                },
            );
        }

        debug!(image, animations = animations.len(), "built sprite sheet");
        Ok(SpriteSheet {
            texture,
            frame_size: UVec2::new(frame_width, frame_height),
            animations,
        })
    }

    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.get(name)
    }
}

/// Owns every sheet loaded at world setup; read-only afterwards.
#[derive(Default)]
pub struct SpriteStore {
    sheets: Vec<SpriteSheet>,
}

impl SpriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sheet: SpriteSheet) -> SpriteId {
        self.sheets.push(sheet);
        SpriteId(self.sheets.len() - 1)
    }

    pub fn get(&self, id: SpriteId) -> Option<&SpriteSheet> {
        self.sheets.get(id.0)
    }
}

/// Which animation an entity is currently playing, and for how long.
#[derive(Debug, Clone)]
pub struct AnimationState {
    name: String,
    time: f32,
}

impl AnimationState {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            time: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Switches the active animation, restarting it only on a change.
    pub fn set(&mut self, name: &str) {
        if self.name != name {
            self.name.clear();
            self.name.push_str(name);
            self.time = 0.0;
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.time += dt;
    }
}
