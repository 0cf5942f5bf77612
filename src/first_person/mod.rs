//! First-person module - the 3D shooter controller.

mod aim;
mod attack;
mod components;
mod movement;
mod plugin;
mod systems;

pub use aim::{aim_rotation, beam_extent, BeamExtent};
pub use attack::{AttackInput, AttackOutcome, AttackState, BeamChange};
pub use components::*;
pub use movement::{horizontal_move, spawn_player, FirstPersonCamera};
pub use plugin::FirstPersonPlugin;
