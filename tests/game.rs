//! Frame-loop behavior: restart, bombs, the script hook, and draw order.

use std::time::Duration;

use glam::IVec2;
use speculoos::prelude::*;

use emberfield::clock::Clock;
use emberfield::constants::{BOMB_FUSE, STARTING_LIVES};
use emberfield::entity::{EntityVariant, PlayerPhase};
use emberfield::input::{Buttons, InputSnapshot};
use emberfield::script::{EngineOps, ScriptHook};

mod common;

use common::{DrawCall, PLAYER_SPAWN};

#[test]
fn restart_reproduces_the_initial_world() {
    let (mut game, mut clock, _renderer) = common::new_game();
    let (fresh, _, _) = common::new_game();
    let initial: Vec<_> = fresh.registry().iter().map(|e| (e.id, e.kind.variant(), e.pos)).collect();

    game.tick(&InputSnapshot::default(), clock.now());

    // Mess the world up: extra entities, lost life, scored points.
    game.spawn_enemy(IVec2::new(400, 400));
    game.spawn_hazard(IVec2::new(50, 50), BOMB_FUSE);
    game.player_state_mut().unwrap().add_score(70);
    game.player_state_mut().unwrap().set_lives(0);
    assert_that(&game.is_game_over()).is_true();

    clock.advance(Duration::from_millis(16));
    let restart = InputSnapshot {
        pressed: Buttons::RESTART,
        ..Default::default()
    };
    game.tick(&restart, clock.now());

    assert_that(&game.is_game_over()).is_false();
    let player = game.player_state().unwrap();
    assert_that(&player.lives()).is_equal_to(STARTING_LIVES);
    assert_that(&player.score()).is_equal_to(0);

    let rebuilt: Vec<_> = game.registry().iter().map(|e| (e.id, e.kind.variant(), e.pos)).collect();
    assert_that(&rebuilt).is_equal_to(initial);
}

#[test]
fn bomb_button_drops_a_hazard_at_the_player() {
    let (mut game, mut clock, _renderer) = common::new_game();
    game.tick(&InputSnapshot::default(), clock.now());

    clock.advance(Duration::from_millis(16));
    let bomb = InputSnapshot {
        pressed: Buttons::BOMB,
        ..Default::default()
    };
    game.tick(&bomb, clock.now());

    let hazard = game
        .registry()
        .iter_variant(EntityVariant::Hazard)
        .next()
        .expect("no hazard dropped");
    assert_that(&hazard.pos).is_equal_to(PLAYER_SPAWN);
}

#[test]
fn click_drops_a_hazard_at_the_world_position() {
    let (mut game, mut clock, _renderer) = common::new_game();
    game.tick(&InputSnapshot::default(), clock.now());

    // Player sits near the world origin, so the camera is clamped to it
    // and screen coordinates equal world coordinates.
    clock.advance(Duration::from_millis(16));
    let click = InputSnapshot {
        click: Some(IVec2::new(250, 180)),
        ..Default::default()
    };
    game.tick(&click, clock.now());

    let hazard = game
        .registry()
        .iter_variant(EntityVariant::Hazard)
        .next()
        .expect("no hazard dropped");
    assert_that(&hazard.pos).is_equal_to(game.camera().to_world(IVec2::new(250, 180)));
}

#[test]
fn attack_flag_lasts_one_resolution_window() {
    let (mut game, mut clock, _renderer) = common::new_game();
    game.tick(&InputSnapshot::default(), clock.now());

    clock.advance(Duration::from_millis(16));
    let attack = InputSnapshot {
        held: Buttons::ATTACK,
        ..Default::default()
    };
    game.tick(&attack, clock.now());

    // Armed during the tick, disarmed by its end.
    let player = game.player_state().unwrap();
    assert_that(&player.is_attacking()).is_false();
    assert_that(&player.phase()).is_equal_to(PlayerPhase::Normal);
}

struct BombEveryFrame;

impl ScriptHook for BombEveryFrame {
    fn on_frame(&mut self, engine: &mut dyn EngineOps) {
        // Exercises both sides of the capability surface: queries gate the
        // mutation.
        if engine.player_lives() == 0 || engine.player_score() > 1000 {
            return;
        }
        let pos = engine.player_position() + IVec2::new(200, 0);
        engine.spawn_hazard(pos, Duration::from_secs(5));
    }
}

#[test]
fn script_hook_runs_once_per_tick_with_engine_access() {
    use std::path::Path;

    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use emberfield::audio::NullAudio;
    use emberfield::clock::ManualClock;
    use emberfield::game::Game;

    let mut renderer = common::StubRenderer::default();
    let mut clock = ManualClock::new();
    let mut game = Game::new(
        &mut renderer,
        &common::documents(),
        Box::new(NullAudio),
        Box::new(BombEveryFrame),
        SmallRng::seed_from_u64(7),
        clock.now(),
        Path::new("assets"),
    )
    .unwrap();

    for _ in 0..3 {
        game.tick(&InputSnapshot::default(), clock.now());
        clock.advance(Duration::from_millis(16));
    }

    assert_that(&game.registry().count(EntityVariant::Hazard)).is_equal_to(3);
}

#[test]
fn draw_brackets_the_frame_with_clear_and_present() {
    let (mut game, _clock, _setup_renderer) = common::new_game();

    let mut renderer = common::StubRenderer::default();
    game.draw(&mut renderer).unwrap();

    assert_that(&renderer.calls.first()).is_equal_to(Some(&DrawCall::Clear));
    assert_that(&renderer.calls.last()).is_equal_to(Some(&DrawCall::Present));
}

#[test]
fn render_pass_sweeps_expired_hazards() {
    let (mut game, _clock, _setup_renderer) = common::new_game();
    game.spawn_hazard(IVec2::new(700, 700), Duration::ZERO);

    let mut renderer = common::StubRenderer::default();
    game.draw(&mut renderer).unwrap();

    assert_that(&game.registry().count(EntityVariant::Hazard)).is_equal_to(0);
    // The sweep is cleanup, not resolution: no reward, no damage.
    let player = game.player_state().unwrap();
    assert_that(&player.score()).is_equal_to(0);
    assert_that(&player.lives()).is_equal_to(STARTING_LIVES);
}

#[test]
fn game_over_overlay_draws_restart_instructions() {
    let (mut game, _clock, _setup_renderer) = common::new_game();
    game.player_state_mut().unwrap().set_lives(0);

    let mut renderer = common::StubRenderer::default();
    game.draw(&mut renderer).unwrap();

    let texts: Vec<_> = renderer
        .calls
        .iter()
        .filter_map(|c| match c {
            DrawCall::Text(t) => Some(t.as_str()),
            _ => None,
        })
        .collect();
    assert_that(&texts.len()).is_equal_to(2);
    assert!(texts[1].contains('R'), "second line must document the restart key");
}
