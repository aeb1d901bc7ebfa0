//! Entities: one closed tagged-variant type with a shared header.
//!
//! Every simulated object carries the same header (id, world position,
//! sprite, animation state); the per-variant payload lives behind
//! [`EntityKind`]. Matches are exhaustive, so adding a variant surfaces
//! every site that needs a decision.

pub mod enemy;
pub mod hazard;
pub mod player;
pub mod powerup;
pub mod registry;

use std::fmt;
use std::time::Duration;

use glam::IVec2;
use sdl2::rect::Rect;
use tracing::trace;

use crate::camera::Camera;
use crate::error::TextureError;
use crate::render::sprite::{AnimationState, SpriteId, SpriteStore};
use crate::render::Renderer;

pub use self::enemy::Enemy;
pub use self::hazard::Hazard;
pub use self::player::{PlayerPhase, PlayerState};
pub use self::powerup::PowerUpKind;
pub use self::registry::EntityRegistry;

/// Unique entity identifier. One namespace for every variant; allocated
/// monotonically by the registry and never reused within a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub(crate) u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Payload-free discriminator for typed registry iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter)]
pub enum EntityVariant {
    Player,
    Enemy,
    PowerUp,
    Hazard,
}

#[derive(Debug, Clone)]
pub enum EntityKind {
    Player(PlayerState),
    Enemy(Enemy),
    PowerUp(PowerUpKind),
    Hazard(Hazard),
}

impl EntityKind {
    pub fn variant(&self) -> EntityVariant {
        match self {
            EntityKind::Player(_) => EntityVariant::Player,
            EntityKind::Enemy(_) => EntityVariant::Enemy,
            EntityKind::PowerUp(_) => EntityVariant::PowerUp,
            EntityKind::Hazard(_) => EntityVariant::Hazard,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub pos: IVec2,
    pub sprite: SpriteId,
    pub animation: AnimationState,
    pub kind: EntityKind,
}

impl Entity {
    pub fn player(id: EntityId, pos: IVec2, sprite: SpriteId) -> Entity {
        Entity {
            id,
            pos,
            sprite,
            animation: AnimationState::new("idle"),
            kind: EntityKind::Player(PlayerState::new()),
        }
    }

    pub fn enemy(id: EntityId, pos: IVec2, sprite: SpriteId) -> Entity {
        Entity {
            id,
            pos,
            sprite,
            animation: AnimationState::new("walk"),
            kind: EntityKind::Enemy(Enemy::new()),
        }
    }

    pub fn power_up(id: EntityId, pos: IVec2, sprite: SpriteId, kind: PowerUpKind) -> Entity {
        Entity {
            id,
            pos,
            sprite,
            animation: AnimationState::new(kind.animation()),
            kind: EntityKind::PowerUp(kind),
        }
    }

    pub fn hazard(id: EntityId, pos: IVec2, sprite: SpriteId, fuse: Duration) -> Entity {
        Entity {
            id,
            pos,
            sprite,
            animation: AnimationState::new("fuse"),
            kind: EntityKind::Hazard(Hazard::new(fuse)),
        }
    }

    pub fn as_player(&self) -> Option<&PlayerState> {
        match &self.kind {
            EntityKind::Player(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.kind {
            EntityKind::Player(state) => Some(state),
            _ => None,
        }
    }

    fn flip(&self) -> bool {
        match &self.kind {
            EntityKind::Player(state) => state.facing_left,
            EntityKind::Enemy(enemy) => enemy.facing_left,
            EntityKind::PowerUp(_) | EntityKind::Hazard(_) => false,
        }
    }

    /// Draws this entity against the renderer, camera-relative.
    ///
    /// Unknown sprites or animation names degrade to a no-op; runtime
    /// rendering never fails the simulation.
    pub fn render(
        &self,
        renderer: &mut dyn Renderer,
        sprites: &SpriteStore,
        camera: &Camera,
    ) -> Result<(), TextureError> {
        let Some(sheet) = sprites.get(self.sprite) else {
            trace!(entity = %self.id, "sprite sheet missing, skipping render");
            return Ok(());
        };
        let Some(animation) = sheet.animation(self.animation.name()) else {
            trace!(entity = %self.id, animation = self.animation.name(), "animation missing, skipping render");
            return Ok(());
        };

        let src = animation.frame_at(self.animation.time());
        let size = sheet.frame_size;
        let world = Rect::new(
            self.pos.x - size.x as i32 / 2,
            self.pos.y - size.y as i32 / 2,
            size.x,
            size.y,
        );

        renderer.render_texture(sheet.texture, Some(src), camera.to_screen(world), self.flip(), 0.0)
    }
}
