//! Enemies walk straight at the player, one axis-clamped step per tick.

use glam::{IVec2, Vec2};

use crate::constants::ENEMY_SPEED;
use crate::systems::movement::Mover;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub speed: f32,
    pub facing_left: bool,
    mover: Mover,
}

impl Enemy {
    pub fn new() -> Self {
        Self {
            speed: ENEMY_SPEED,
            facing_left: false,
            mover: Mover::default(),
        }
    }

    /// One tick of steering: approach `target` at most `speed * dt` pixels
    /// per axis, never overshooting on either axis.
    pub fn step_toward(&mut self, from: IVec2, target: IVec2, dt: f32) -> IVec2 {
        let want = (target - from).as_vec2();
        let max = self.speed * dt;
        let step = self
            .mover
            .advance(Vec2::new(want.x.clamp(-max, max), want.y.clamp(-max, max)), 1.0);

        let remaining = target - from;
        let step = IVec2::new(clamp_toward(step.x, remaining.x), clamp_toward(step.y, remaining.y));

        if step.x != 0 {
            self.facing_left = step.x < 0;
        }
        from + step
    }
}

impl Default for Enemy {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamps a step so it never passes the remaining distance.
fn clamp_toward(step: i32, remaining: i32) -> i32 {
    if remaining >= 0 {
        step.clamp(0, remaining)
    } else {
        step.clamp(remaining, 0)
    }
}
