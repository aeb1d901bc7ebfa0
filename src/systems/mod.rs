//! Per-frame simulation and render systems, in the order the frame loop
//! runs them: movement, collision resolution, spawning, rendering.

pub mod collision;
pub mod hud;
pub mod movement;
pub mod render;
pub mod spawn;
