//! Top-down plugin - 2D movement, crosshair, machine gun, and damage intake.

use bevy::prelude::*;

use super::systems;

/// Top-down plugin - handles the 2D shooter controller.
pub struct TopDownPlugin;

impl Plugin for TopDownPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_top_down_systems(app);
    }
}
