//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::UVec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The logical size of the window/viewport, in pixels.
pub const VIEWPORT_SIZE: UVec2 = UVec2::new(800, 600);

/// Player walking speed, in pixels per second.
pub const PLAYER_SPEED: f32 = 160.0;
/// Enemy walking speed, in pixels per second.
pub const ENEMY_SPEED: f32 = 72.0;

pub const MAX_LIVES: u8 = 5;
pub const STARTING_LIVES: u8 = 3;

// Proximity checks are per-axis box tests, not radial distance. The exact
// half-extents below are gameplay-visible and must not drift.

/// Half-extent of the box inside which an expiring bomb damages the player.
pub const HAZARD_DAMAGE_RANGE: i32 = 32;
/// Half-extent of the box inside which a power-up is picked up.
pub const PICKUP_RANGE: i32 = 32;
/// Half-extent of the box inside which an enemy deals contact damage.
pub const ENEMY_CONTACT_RANGE: i32 = 16;
/// Half-extent of the box inside which an attacking player kills enemies.
pub const ATTACK_RANGE: i32 = 32;

pub const COIN_SCORE: u32 = 10;
pub const HAZARD_REWARD_SCORE: u32 = 10;
pub const ENEMY_KILL_SCORE: u32 = 20;

pub const POWERUP_SPAWN_INTERVAL: Duration = Duration::from_secs(8);
pub const ENEMY_SPAWN_INTERVAL: Duration = Duration::from_secs(12);
/// Enemy spawns are suppressed at or above this live-enemy count.
pub const ENEMY_POPULATION_CAP: usize = 10;

/// How long a dropped bomb burns before it resolves.
pub const BOMB_FUSE: Duration = Duration::from_secs(2);

// HUD layout, in pixels.
pub const HUD_MARGIN: i32 = 8;
pub const LIFE_ICON_SIZE: u32 = 16;
pub const LIFE_ICON_SPACING: i32 = 20;
pub const SCORE_BAR_WIDTH: u32 = 120;
pub const SCORE_BAR_HEIGHT: u32 = 10;
/// Score at which the HUD bar reads as full.
pub const SCORE_BAR_CAP: u32 = 500;
