//! Projectile plugin - bullet expiry and contact handling.

use bevy::prelude::*;

use super::systems;
use crate::core::GameState;

/// Projectile plugin - handles bullets after they have been spawned.
pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            // Contacts first so a bullet that hits on its last frame is
            // despawned once, by the contact.
            (systems::resolve_bullet_contacts, systems::expire_lifetimes)
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
    }
}
