//! Projectile-related components.

use bevy::prelude::*;

/// Everything needed to put one bullet into the world.
///
/// Built by a controller when it decides to shoot; the spawned entity owns
/// the data afterwards and the controller never looks at it again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawnRequest {
    pub translation: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    /// Damage payload for whatever the bullet strikes
    pub damage: f32,
}

/// A bullet fired by a player.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerBullet {
    /// Player that fired it
    pub shooter: Entity,
    pub damage: f32,
}

/// Despawns the entity when the timer finishes.
#[derive(Component)]
pub struct Lifetime(pub Timer);

impl Lifetime {
    pub fn from_seconds(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds, TimerMode::Once))
    }
}

/// Marker for entities that feed secondary-fire charge when shot.
#[derive(Component)]
pub struct ShootTarget;
