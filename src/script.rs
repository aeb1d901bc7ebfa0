//! Per-frame script hook.
//!
//! The hook runs once per tick against [`EngineOps`], a deliberately narrow
//! capability surface: it can drop hazards and read the player's public
//! state, nothing else. The core does not validate what a hook does beyond
//! this contract.

use std::time::Duration;

use glam::IVec2;

pub trait EngineOps {
    /// Drops a hazard with the given fuse at a world position.
    fn spawn_hazard(&mut self, pos: IVec2, fuse: Duration);

    fn player_position(&self) -> IVec2;

    fn player_lives(&self) -> u8;

    fn player_score(&self) -> u32;
}

pub trait ScriptHook {
    fn on_frame(&mut self, engine: &mut dyn EngineOps);
}

/// The default hook: does nothing.
#[derive(Debug, Default)]
pub struct NoopScript;

impl ScriptHook for NoopScript {
    fn on_frame(&mut self, _engine: &mut dyn EngineOps) {}
}
