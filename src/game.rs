//! The main game state and the per-tick pipeline.
//!
//! One tick runs strictly in order: input, player update, enemy/hazard
//! aging, the script hook, collision resolution, spawning. Time is sampled
//! once per tick by the caller and the same instant feeds every decision in
//! the frame. While the player is terminal, simulation steps are skipped
//! (the overlay still renders) until the restart control fires.

use std::path::Path;
use std::time::{Duration, Instant};

use glam::IVec2;
use rand::rngs::SmallRng;
use tracing::info;

use crate::assets::GameDocuments;
use crate::audio::{AudioSink, SoundId};
use crate::camera::Camera;
use crate::constants::{BOMB_FUSE, PLAYER_SPEED, VIEWPORT_SIZE};
use crate::entity::{Entity, EntityId, EntityKind, EntityRegistry, PlayerState, PowerUpKind};
use crate::error::{GameResult, SpriteError};
use crate::input::{Buttons, InputSnapshot};
use crate::level::Level;
use crate::render::sprite::{SpriteId, SpriteSheet, SpriteStore};
use crate::render::Renderer;
use crate::script::{EngineOps, ScriptHook};
use crate::systems::render::FrameContext;
use crate::systems::spawn::SpawnScheduler;
use crate::systems::{collision, movement, render};

/// Sprite sheet handles world setup resolves once and reuses everywhere.
#[derive(Debug, Clone, Copy)]
pub struct WorldSprites {
    pub player: SpriteId,
    pub enemy: SpriteId,
    pub pickup: SpriteId,
    pub bomb: SpriteId,
}

pub struct Game {
    registry: EntityRegistry,
    player_id: EntityId,
    camera: Camera,
    scheduler: SpawnScheduler,
    level: Level,
    sprites: SpriteStore,
    world_sprites: WorldSprites,
    audio: Box<dyn AudioSink>,
    script: Box<dyn ScriptHook>,
    last_tick: Option<Instant>,
}

impl Game {
    /// Builds the whole world: level validation, tile descriptors, sprite
    /// sheets, the player, and the initial pickups. Blocking, and fatal on
    /// any malformed document or unloadable asset.
    pub fn new(
        renderer: &mut dyn Renderer,
        docs: &GameDocuments,
        audio: Box<dyn AudioSink>,
        script: Box<dyn ScriptHook>,
        rng: SmallRng,
        now: Instant,
        asset_root: &Path,
    ) -> GameResult<Game> {
        let level = Level::load(&docs.level, renderer, asset_root)?;

        let mut sprites = SpriteStore::new();
        let mut sheet = |name: &'static str| -> GameResult<SpriteSheet> {
            let doc = docs
                .sprites
                .get(name)
                .ok_or_else(|| SpriteError::UnknownSheet(name.to_string()))?;
            SpriteSheet::from_document(doc, renderer, asset_root)
        };
        let world_sprites = WorldSprites {
            player: sprites.insert(sheet("player")?),
            enemy: sprites.insert(sheet("enemy")?),
            pickup: sprites.insert(sheet("pickup")?),
            bomb: sprites.insert(sheet("bomb")?),
        };

        let mut game = Game {
            registry: EntityRegistry::new(),
            player_id: EntityId(0),
            camera: Camera::new(VIEWPORT_SIZE),
            scheduler: SpawnScheduler::new(now, rng),
            level,
            sprites,
            world_sprites,
            audio,
            script,
            last_tick: None,
        };
        game.setup_world(now);
        Ok(game)
    }

    /// (Re)creates the simulation state from scratch: the registry is
    /// emptied, the player is rebuilt at the spawn point, the fixed initial
    /// pickups are placed, and both spawn deadlines re-arm. Restart goes
    /// through here, so a restarted world is indistinguishable from a fresh
    /// one.
    fn setup_world(&mut self, now: Instant) {
        self.registry.clear();

        let spawn = self.level.player_spawn();
        let sprites = self.world_sprites;
        self.player_id = self.registry.spawn(|id| Entity::player(id, spawn, sprites.player));

        let bounds = self.level.pixel_bounds();
        let at = |fx: f32, fy: f32| {
            IVec2::new(
                bounds.x() + (bounds.width() as f32 * fx) as i32,
                bounds.y() + (bounds.height() as f32 * fy) as i32,
            )
        };
        self.registry
            .spawn(|id| Entity::power_up(id, at(0.25, 0.25), sprites.pickup, PowerUpKind::Coin));
        self.registry
            .spawn(|id| Entity::power_up(id, at(0.75, 0.25), sprites.pickup, PowerUpKind::Coin));
        self.registry
            .spawn(|id| Entity::power_up(id, at(0.5, 0.75), sprites.pickup, PowerUpKind::Heart));

        self.scheduler.rearm(now);
        self.camera.set_world_bounds(bounds);
        self.camera.look_at(spawn);
        self.last_tick = None;

        info!(player = %self.player_id, entities = self.registry.len(), "world ready");
    }

    /// Advances the simulation by one tick. `now` must be sampled exactly
    /// once per frame by the caller; every consumer below sees this same
    /// instant.
    pub fn tick(&mut self, input: &InputSnapshot, now: Instant) {
        let dt = self
            .last_tick
            .map(|last| (now - last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_tick = Some(now);

        if self.is_game_over() {
            if input.pressed.contains(Buttons::RESTART) {
                info!("restart requested");
                self.setup_world(now);
            }
            return;
        }

        self.update_player(input, dt);
        let player_pos = self.player_position();

        if input.pressed.contains(Buttons::BOMB) {
            self.spawn_hazard(player_pos, BOMB_FUSE);
        }
        if let Some(screen) = input.click {
            let pos = self.camera.to_world(screen);
            self.spawn_hazard(pos, BOMB_FUSE);
        }

        movement::update_entities(&mut self.registry, player_pos, dt);

        let mut surface = EngineSurface {
            registry: &mut self.registry,
            player_id: self.player_id,
            bomb_sprite: self.world_sprites.bomb,
        };
        self.script.on_frame(&mut surface);

        let was_over = self.is_game_over();
        collision::resolve(&mut self.registry, self.player_id, self.audio.as_mut());
        if !was_over && self.is_game_over() {
            self.audio.play(SoundId::GameOver);
            info!("game over");
        }

        self.scheduler
            .update(now, &mut self.registry, Some(self.level.pixel_bounds()), &self.world_sprites);

        if let Some(player) = self.registry.get(self.player_id) {
            self.camera.look_at(player.pos);
        }
        // The attack flag covers exactly one resolution window.
        if let Some(player) = self.player_state_mut() {
            player.clear_attack();
        }
    }

    fn update_player(&mut self, input: &InputSnapshot, dt: f32) {
        let bounds = self.level.pixel_bounds();
        let dir = input.direction();
        let attack = input.held.contains(Buttons::ATTACK);

        let Some(entity) = self.registry.get_mut(self.player_id) else {
            return;
        };
        let EntityKind::Player(state) = &mut entity.kind else {
            return;
        };
        if state.is_game_over() {
            return;
        }

        if dir != IVec2::ZERO {
            let velocity = dir.as_vec2().normalize_or_zero() * PLAYER_SPEED;
            let step = state.mover().advance(velocity, dt);
            entity.pos += step;
            entity.pos.x = entity.pos.x.clamp(bounds.x(), bounds.x() + bounds.width() as i32 - 1);
            entity.pos.y = entity.pos.y.clamp(bounds.y(), bounds.y() + bounds.height() as i32 - 1);
            if dir.x != 0 {
                state.facing_left = dir.x < 0;
            }
            entity.animation.set("walk");
        } else {
            entity.animation.set("idle");
        }

        if attack {
            state.arm_attack();
            entity.animation.set("attack");
        }
    }

    /// Renders the current frame. Safe to call in any phase, including
    /// game over.
    pub fn draw(&mut self, renderer: &mut dyn Renderer) -> GameResult<()> {
        let (lives, score) = self
            .player_state()
            .map(|p| (p.lives(), p.score()))
            .unwrap_or((0, 0));
        let game_over = self.is_game_over();

        let ctx = FrameContext {
            level: &self.level,
            sprites: &self.sprites,
            camera: &self.camera,
            hud_icon: self.world_sprites.pickup,
            lives,
            score,
            game_over,
        };
        render::draw_frame(renderer, &mut self.registry, &ctx)
    }

    /// Drops a hazard with the given fuse at a world position.
    pub fn spawn_hazard(&mut self, pos: IVec2, fuse: Duration) -> EntityId {
        let sprite = self.world_sprites.bomb;
        self.registry.spawn(|id| Entity::hazard(id, pos, sprite, fuse))
    }

    pub fn spawn_enemy(&mut self, pos: IVec2) -> EntityId {
        let sprite = self.world_sprites.enemy;
        self.registry.spawn(|id| Entity::enemy(id, pos, sprite))
    }

    pub fn spawn_power_up(&mut self, pos: IVec2, kind: PowerUpKind) -> EntityId {
        let sprite = self.world_sprites.pickup;
        self.registry.spawn(|id| Entity::power_up(id, pos, sprite, kind))
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    pub fn player_state(&self) -> Option<&PlayerState> {
        self.registry.get(self.player_id).and_then(Entity::as_player)
    }

    pub fn player_state_mut(&mut self) -> Option<&mut PlayerState> {
        self.registry.get_mut(self.player_id).and_then(Entity::as_player_mut)
    }

    pub fn player_position(&self) -> IVec2 {
        self.registry.get(self.player_id).map(|e| e.pos).unwrap_or(IVec2::ZERO)
    }

    pub fn is_game_over(&self) -> bool {
        self.player_state().is_some_and(PlayerState::is_game_over)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn set_muted(&mut self, mute: bool) {
        self.audio.set_mute(mute);
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }
}

/// The narrow mutation surface handed to the script hook.
struct EngineSurface<'a> {
    registry: &'a mut EntityRegistry,
    player_id: EntityId,
    bomb_sprite: SpriteId,
}

impl EngineOps for EngineSurface<'_> {
    fn spawn_hazard(&mut self, pos: IVec2, fuse: Duration) {
        let sprite = self.bomb_sprite;
        self.registry.spawn(|id| Entity::hazard(id, pos, sprite, fuse));
    }

    fn player_position(&self) -> IVec2 {
        self.registry.get(self.player_id).map(|e| e.pos).unwrap_or(IVec2::ZERO)
    }

    fn player_lives(&self) -> u8 {
        self.registry
            .get(self.player_id)
            .and_then(Entity::as_player)
            .map(PlayerState::lives)
            .unwrap_or(0)
    }

    fn player_score(&self) -> u32 {
        self.registry
            .get(self.player_id)
            .and_then(Entity::as_player)
            .map(PlayerState::score)
            .unwrap_or(0)
    }
}
