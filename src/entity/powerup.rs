//! Pickups with a one-shot effect applied on contact.

use crate::constants::COIN_SCORE;
use crate::entity::player::PlayerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter)]
pub enum PowerUpKind {
    Heart,
    Coin,
}

impl PowerUpKind {
    /// Applies the pickup's effect to the player. Hearts clamp at the life
    /// cap; coins score nothing once the player is terminal.
    pub fn apply(self, player: &mut PlayerState) {
        match self {
            PowerUpKind::Heart => player.gain_life(),
            PowerUpKind::Coin => player.add_score(COIN_SCORE),
        }
    }

    pub fn animation(self) -> &'static str {
        match self {
            PowerUpKind::Heart => "heart",
            PowerUpKind::Coin => "coin",
        }
    }
}
