//! Position updates and entity aging, run before collision resolution.

use std::time::Duration;

use glam::{IVec2, Vec2};

use crate::entity::{EntityKind, EntityRegistry};

/// Accumulates fractional pixels so integer positions still honor
/// fractional per-tick velocities.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mover {
    carry: Vec2,
}

impl Mover {
    /// Whole-pixel step for this tick; the fractional remainder carries
    /// over to the next one.
    pub fn advance(&mut self, velocity: Vec2, dt: f32) -> IVec2 {
        let step = velocity * dt + self.carry;
        let whole = IVec2::new(step.x.trunc() as i32, step.y.trunc() as i32);
        self.carry = step - whole.as_vec2();
        whole
    }
}

/// One tick of world motion: enemies steer toward the player, hazards burn
/// down their fuses, every animation advances. Runs before the collision
/// passes so proximity checks see current positions and expiry states.
pub fn update_entities(registry: &mut EntityRegistry, player_pos: IVec2, dt: f32) {
    let elapsed = Duration::from_secs_f32(dt);
    for entity in registry.iter_mut() {
        entity.animation.tick(dt);
        match &mut entity.kind {
            EntityKind::Enemy(enemy) => {
                entity.pos = enemy.step_toward(entity.pos, player_pos, dt);
            }
            EntityKind::Hazard(hazard) => hazard.tick(elapsed),
            EntityKind::Player(_) | EntityKind::PowerUp(_) => {}
        }
    }
}
