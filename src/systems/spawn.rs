//! Wall-clock driven spawning.
//!
//! Two independent deadlines, one per category. They are measured against
//! the tick's captured instant, not frame counts, so cadence stays constant
//! under frame-rate variation; firing one never reschedules the other.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::Rng;
use sdl2::rect::Rect;
use tracing::debug;

use crate::constants::{ENEMY_POPULATION_CAP, ENEMY_SPAWN_INTERVAL, POWERUP_SPAWN_INTERVAL};
use crate::entity::{Entity, EntityRegistry, EntityVariant, PowerUpKind};
use crate::game::WorldSprites;
use glam::IVec2;

pub struct SpawnScheduler {
    next_powerup: Instant,
    next_enemy: Instant,
    rng: SmallRng,
}

impl SpawnScheduler {
    pub fn new(now: Instant, rng: SmallRng) -> Self {
        Self {
            next_powerup: now + POWERUP_SPAWN_INTERVAL,
            next_enemy: now + ENEMY_SPAWN_INTERVAL,
            rng,
        }
    }

    /// Re-arms both deadlines from `now`, as world setup does.
    pub fn rearm(&mut self, now: Instant) {
        self.next_powerup = now + POWERUP_SPAWN_INTERVAL;
        self.next_enemy = now + ENEMY_SPAWN_INTERVAL;
    }

    /// Fires any deadline that has elapsed by `now`.
    ///
    /// Each deadline re-arms immediately after firing, whether or not the
    /// spawn itself happened: requests without established world bounds are
    /// silently dropped, and enemy spawns are suppressed at the population
    /// cap.
    pub fn update(&mut self, now: Instant, registry: &mut EntityRegistry, bounds: Option<Rect>, sprites: &WorldSprites) {
        if now >= self.next_powerup {
            self.next_powerup = now + POWERUP_SPAWN_INTERVAL;
            match bounds {
                None => debug!("dropping power-up spawn, world bounds not established"),
                Some(bounds) => {
                    let pos = self.random_position(bounds);
                    let kind = if self.rng.random_bool(0.5) {
                        PowerUpKind::Heart
                    } else {
                        PowerUpKind::Coin
                    };
                    let sprite = sprites.pickup;
                    let id = registry.spawn(|id| Entity::power_up(id, pos, sprite, kind));
                    debug!(%id, %kind, ?pos, "spawned power-up");
                }
            }
        }

        if now >= self.next_enemy {
            self.next_enemy = now + ENEMY_SPAWN_INTERVAL;
            match bounds {
                None => debug!("dropping enemy spawn, world bounds not established"),
                Some(bounds) => {
                    if registry.count(EntityVariant::Enemy) >= ENEMY_POPULATION_CAP {
                        debug!("enemy population at cap, spawn suppressed");
                    } else {
                        let pos = self.random_position(bounds);
                        let sprite = sprites.enemy;
                        let id = registry.spawn(|id| Entity::enemy(id, pos, sprite));
                        debug!(%id, ?pos, "spawned enemy");
                    }
                }
            }
        }
    }

    /// Uniform position inside the level's pixel bounds.
    fn random_position(&mut self, bounds: Rect) -> IVec2 {
        IVec2::new(
            self.rng.random_range(bounds.x()..bounds.x() + bounds.width() as i32),
            self.rng.random_range(bounds.y()..bounds.y() + bounds.height() as i32),
        )
    }
}
