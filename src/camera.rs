//! World-to-screen coordinate mapping.
//!
//! The camera is a pure translation (1:1 pixel mapping, no scaling). Its
//! offset is clamped so the visible viewport never leaves the world bounds;
//! on an axis where the world is smaller than the viewport, the viewport
//! stays anchored at the world origin instead.

use glam::{IVec2, UVec2};
use sdl2::rect::Rect;

#[derive(Debug, Clone)]
pub struct Camera {
    offset: IVec2,
    world_bounds: Rect,
    viewport: UVec2,
}

impl Camera {
    pub fn new(viewport: UVec2) -> Self {
        Self {
            offset: IVec2::ZERO,
            world_bounds: Rect::new(0, 0, viewport.x, viewport.y),
            viewport,
        }
    }

    /// Replaces the world bounds. Takes effect on the next [`Camera::look_at`].
    pub fn set_world_bounds(&mut self, bounds: Rect) {
        self.world_bounds = bounds;
    }

    /// Recenters the viewport on `center`, then clamps it into the world.
    pub fn look_at(&mut self, center: IVec2) {
        let half = IVec2::new(self.viewport.x as i32 / 2, self.viewport.y as i32 / 2);
        let wanted = center - half;

        let slack_x = self.world_bounds.width() as i32 - self.viewport.x as i32;
        let slack_y = self.world_bounds.height() as i32 - self.viewport.y as i32;

        self.offset.x = if slack_x <= 0 {
            self.world_bounds.x()
        } else {
            wanted.x.clamp(self.world_bounds.x(), self.world_bounds.x() + slack_x)
        };
        self.offset.y = if slack_y <= 0 {
            self.world_bounds.y()
        } else {
            wanted.y.clamp(self.world_bounds.y(), self.world_bounds.y() + slack_y)
        };
    }

    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    pub fn viewport(&self) -> UVec2 {
        self.viewport
    }

    /// Translates a world-space rectangle into screen space.
    pub fn to_screen(&self, world: Rect) -> Rect {
        Rect::new(
            world.x() - self.offset.x,
            world.y() - self.offset.y,
            world.width(),
            world.height(),
        )
    }

    /// Translates a world-space point into screen space.
    pub fn to_screen_point(&self, world: IVec2) -> IVec2 {
        world - self.offset
    }

    /// Translates a screen-space point back into world space.
    pub fn to_world(&self, screen: IVec2) -> IVec2 {
        screen + self.offset
    }
}
