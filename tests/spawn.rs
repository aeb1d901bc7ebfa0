//! Spawn scheduler timing, driven by a manual clock.

use std::path::Path;
use std::time::Duration;

use glam::IVec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use speculoos::prelude::*;

use emberfield::clock::{Clock, ManualClock};
use emberfield::constants::ENEMY_POPULATION_CAP;
use emberfield::entity::{Entity, EntityRegistry, EntityVariant};
use emberfield::game::WorldSprites;
use emberfield::level::Level;
use emberfield::render::sprite::{SpriteSheet, SpriteStore};
use emberfield::systems::spawn::SpawnScheduler;

mod common;

struct Fixture {
    registry: EntityRegistry,
    scheduler: SpawnScheduler,
    clock: ManualClock,
    sprites: WorldSprites,
    bounds: sdl2::rect::Rect,
    // The store owns the sheets the ids point into.
    _store: SpriteStore,
}

fn fixture() -> Fixture {
    let mut renderer = common::StubRenderer::default();
    let clock = ManualClock::new();

    let level = Level::load(&common::level_document(), &mut renderer, Path::new("assets")).unwrap();
    let docs = common::sprite_documents();
    let mut store = SpriteStore::new();
    let mut load = |name: &str| {
        store.insert(SpriteSheet::from_document(&docs[name], &mut renderer, Path::new("assets")).unwrap())
    };
    let sprites = WorldSprites {
        player: load("player"),
        enemy: load("enemy"),
        pickup: load("pickup"),
        bomb: load("bomb"),
    };

    Fixture {
        registry: EntityRegistry::new(),
        scheduler: SpawnScheduler::new(clock.now(), SmallRng::seed_from_u64(42)),
        clock,
        sprites,
        bounds: level.pixel_bounds(),
        _store: store,
    }
}

#[test]
fn nothing_spawns_before_the_first_deadline() {
    let mut f = fixture();
    f.clock.advance(Duration::from_millis(7_900));
    f.scheduler
        .update(f.clock.now(), &mut f.registry, Some(f.bounds), &f.sprites);
    assert_that(&f.registry.len()).is_equal_to(0);
}

#[test]
fn power_up_fires_at_eight_seconds_enemy_at_twelve() {
    let mut f = fixture();

    f.clock.advance(Duration::from_secs(8));
    f.scheduler
        .update(f.clock.now(), &mut f.registry, Some(f.bounds), &f.sprites);
    assert_that(&f.registry.count(EntityVariant::PowerUp)).is_equal_to(1);
    assert_that(&f.registry.count(EntityVariant::Enemy)).is_equal_to(0);

    f.clock.advance(Duration::from_secs(4));
    f.scheduler
        .update(f.clock.now(), &mut f.registry, Some(f.bounds), &f.sprites);
    assert_that(&f.registry.count(EntityVariant::Enemy)).is_equal_to(1);
}

#[test]
fn deadlines_are_independent() {
    let mut f = fixture();

    // Power-up fires at 8s and re-arms to 16s; the enemy deadline must
    // still fire at 12s, unmoved.
    f.clock.advance(Duration::from_secs(8));
    f.scheduler
        .update(f.clock.now(), &mut f.registry, Some(f.bounds), &f.sprites);
    assert_that(&f.registry.count(EntityVariant::PowerUp)).is_equal_to(1);

    f.clock.advance(Duration::from_secs(4));
    f.scheduler
        .update(f.clock.now(), &mut f.registry, Some(f.bounds), &f.sprites);
    assert_that(&f.registry.count(EntityVariant::Enemy)).is_equal_to(1);
    assert_that(&f.registry.count(EntityVariant::PowerUp)).is_equal_to(1);

    f.clock.advance(Duration::from_secs(4));
    f.scheduler
        .update(f.clock.now(), &mut f.registry, Some(f.bounds), &f.sprites);
    assert_that(&f.registry.count(EntityVariant::PowerUp)).is_equal_to(2);
}

#[test]
fn enemy_population_never_exceeds_the_cap() {
    let mut f = fixture();
    let enemy_sprite = f.sprites.enemy;
    for _ in 0..ENEMY_POPULATION_CAP {
        f.registry.spawn(|id| Entity::enemy(id, IVec2::new(10, 10), enemy_sprite));
    }

    for _ in 0..4 {
        f.clock.advance(Duration::from_secs(12));
        f.scheduler
            .update(f.clock.now(), &mut f.registry, Some(f.bounds), &f.sprites);
        assert_that(&f.registry.count(EntityVariant::Enemy)).is_equal_to(ENEMY_POPULATION_CAP);
    }

    // Space frees up, the next deadline fills it again.
    let id = f.registry.iter_variant(EntityVariant::Enemy).next().unwrap().id;
    f.registry.remove(id);
    f.clock.advance(Duration::from_secs(12));
    f.scheduler
        .update(f.clock.now(), &mut f.registry, Some(f.bounds), &f.sprites);
    assert_that(&f.registry.count(EntityVariant::Enemy)).is_equal_to(ENEMY_POPULATION_CAP);
}

#[test]
fn spawns_without_world_bounds_are_dropped() {
    let mut f = fixture();
    f.clock.advance(Duration::from_secs(13));
    f.scheduler.update(f.clock.now(), &mut f.registry, None, &f.sprites);
    assert_that(&f.registry.len()).is_equal_to(0);

    // The deadlines still re-armed: nothing fires immediately afterwards
    // with bounds established.
    f.clock.advance(Duration::from_millis(100));
    f.scheduler
        .update(f.clock.now(), &mut f.registry, Some(f.bounds), &f.sprites);
    assert_that(&f.registry.len()).is_equal_to(0);
}

#[test]
fn spawned_positions_stay_inside_level_bounds() {
    let mut f = fixture();
    for _ in 0..20 {
        f.clock.advance(Duration::from_secs(8));
        f.scheduler
            .update(f.clock.now(), &mut f.registry, Some(f.bounds), &f.sprites);
    }

    for entity in f.registry.iter() {
        assert!(f.bounds.contains_point((entity.pos.x, entity.pos.y)));
    }
}

#[test]
fn full_game_ticks_respect_the_enemy_cap() {
    let (mut game, mut clock, _renderer) = common::new_game();
    game.tick(&emberfield::input::InputSnapshot::default(), clock.now());

    // Ten minutes of play in one-second steps; the cap must hold
    // throughout, whether or not the player survives.
    for _ in 0..600 {
        clock.advance(Duration::from_secs(1));
        game.tick(&emberfield::input::InputSnapshot::default(), clock.now());
        assert!(game.registry().count(EntityVariant::Enemy) <= ENEMY_POPULATION_CAP);
    }
}
