//! Proximity resolution, once per frame.
//!
//! Four passes in a fixed order; later passes may see entities already
//! removed by earlier ones, which is why the order is part of the game's
//! observable behavior. Every check is an independent per-axis box test
//! (Chebyshev style), not radial distance.

use glam::IVec2;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::audio::{AudioSink, SoundId};
use crate::constants::{
    ATTACK_RANGE, ENEMY_CONTACT_RANGE, ENEMY_KILL_SCORE, HAZARD_DAMAGE_RANGE, HAZARD_REWARD_SCORE, PICKUP_RANGE,
};
use crate::entity::{EntityId, EntityKind, EntityRegistry, EntityVariant, PlayerState};

/// Per-axis box test with half-extent `range` on both axes.
pub fn within_box(a: IVec2, b: IVec2, range: i32) -> bool {
    (a.x - b.x).abs() <= range && (a.y - b.y).abs() <= range
}

fn player_mut(registry: &mut EntityRegistry, player_id: EntityId) -> Option<&mut PlayerState> {
    registry.get_mut(player_id).and_then(|e| e.as_player_mut())
}

/// Runs all four passes. A missing player id makes the whole resolution a
/// no-op rather than an error.
pub fn resolve(registry: &mut EntityRegistry, player_id: EntityId, audio: &mut dyn AudioSink) {
    let Some(player) = registry.get(player_id) else {
        return;
    };
    let Some(state) = player.as_player() else {
        return;
    };
    let player_pos = player.pos;
    let attacking = state.is_attacking();

    resolve_hazards(registry, player_id, player_pos, audio);
    resolve_pickups(registry, player_id, player_pos, audio);
    resolve_enemy_contact(registry, player_id, player_pos, audio);
    if attacking {
        resolve_enemy_kills(registry, player_id, player_pos, audio);
    }
}

/// Pass 1: hazards that expired this frame resolve against the player's
/// position at this exact instant: damage when close, score reward when
/// not. Once lives hit zero, the remaining hazard effects for the frame are
/// suppressed; the render pass sweeps whatever is left.
fn resolve_hazards(registry: &mut EntityRegistry, player_id: EntityId, player_pos: IVec2, audio: &mut dyn AudioSink) {
    let expired: SmallVec<[(EntityId, bool); 4]> = registry
        .iter()
        .filter_map(|e| match &e.kind {
            EntityKind::Hazard(hazard) if hazard.is_expired() => {
                Some((e.id, within_box(e.pos, player_pos, HAZARD_DAMAGE_RANGE)))
            }
            _ => None,
        })
        .collect();

    for (id, near) in expired {
        let Some(player) = player_mut(registry, player_id) else {
            return;
        };
        if player.is_game_over() {
            break;
        }
        if near {
            player.lose_life();
            let lives = player.lives();
            registry.remove(id);
            audio.play(SoundId::Explosion);
            audio.play(SoundId::Hurt);
            info!(hazard = %id, lives, "hazard caught the player");
        } else {
            player.add_score(HAZARD_REWARD_SCORE);
            registry.remove(id);
            audio.play(SoundId::Explosion);
            debug!(hazard = %id, "hazard dodged, reward paid");
        }
    }
}

/// Pass 2: every power-up in range applies and disappears; several can be
/// consumed in the same frame.
fn resolve_pickups(registry: &mut EntityRegistry, player_id: EntityId, player_pos: IVec2, audio: &mut dyn AudioSink) {
    if player_mut(registry, player_id).is_none_or(|p| p.is_game_over()) {
        return;
    }

    let picked: SmallVec<[EntityId; 4]> = registry
        .iter_variant(EntityVariant::PowerUp)
        .filter(|e| within_box(e.pos, player_pos, PICKUP_RANGE))
        .map(|e| e.id)
        .collect();

    for id in picked {
        let Some(entity) = registry.remove(id) else {
            continue;
        };
        let EntityKind::PowerUp(kind) = entity.kind else {
            continue;
        };
        if let Some(player) = player_mut(registry, player_id) {
            kind.apply(player);
            audio.play(SoundId::Pickup);
            debug!(powerup = %id, %kind, "power-up consumed");
        }
    }
}

/// Pass 3: one life loss per enemy in contact range, uncapped per frame.
/// Sustained adjacency costs a life every single frame; that cadence is
/// load-bearing game behavior.
fn resolve_enemy_contact(registry: &mut EntityRegistry, player_id: EntityId, player_pos: IVec2, audio: &mut dyn AudioSink) {
    if player_mut(registry, player_id).is_none_or(|p| p.is_game_over()) {
        return;
    }

    let touching = registry
        .iter_variant(EntityVariant::Enemy)
        .filter(|e| within_box(e.pos, player_pos, ENEMY_CONTACT_RANGE))
        .count();

    if touching == 0 {
        return;
    }
    let Some(player) = player_mut(registry, player_id) else {
        return;
    };
    for _ in 0..touching {
        player.lose_life();
        audio.play(SoundId::Hurt);
    }
    debug!(touching, lives = player.lives(), "enemy contact");
}

/// Pass 4: an attacking player clears every enemy in melee range, with a
/// fixed bonus per kill.
fn resolve_enemy_kills(registry: &mut EntityRegistry, player_id: EntityId, player_pos: IVec2, audio: &mut dyn AudioSink) {
    if player_mut(registry, player_id).is_none_or(|p| p.is_game_over()) {
        return;
    }

    let killed: SmallVec<[EntityId; 4]> = registry
        .iter_variant(EntityVariant::Enemy)
        .filter(|e| within_box(e.pos, player_pos, ATTACK_RANGE))
        .map(|e| e.id)
        .collect();

    for id in &killed {
        registry.remove(*id);
        audio.play(SoundId::Swing);
    }
    if let Some(player) = player_mut(registry, player_id) {
        player.add_score(ENEMY_KILL_SCORE * killed.len() as u32);
    }
    if !killed.is_empty() {
        debug!(kills = killed.len(), "enemies slain");
    }
}
