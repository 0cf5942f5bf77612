//! First-person plugin - movement, camera, attack state machine, and damage.

use bevy::prelude::*;

use super::movement;
use super::systems;

/// First-person plugin - handles the 3D shooter controller.
pub struct FirstPersonPlugin;

impl Plugin for FirstPersonPlugin {
    fn build(&self, app: &mut App) {
        movement::setup_movement_systems(app);
        systems::setup_combat_systems(app);
    }
}
