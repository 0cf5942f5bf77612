//! Global events used for cross-system communication.
//!
//! Damage sources and projectiles talk to the controllers through these
//! events instead of holding references to them.

use bevy::prelude::*;

/// Whether a damage attempt went through or was absorbed by invulnerability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Registered,
    Ignored,
}

/// Damage request for the top-down player.
///
/// Sent by anything that wants to hurt the 2D player (bullets, melee
/// triggers). Negative amounts bypass invulnerability.
#[derive(Event, Debug, Clone, Copy)]
pub struct TopDownDamageEvent {
    pub amount: i32,
}

/// Sent by a player projectile when it strikes something.
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileHitEvent {
    /// Player that fired the projectile
    pub shooter: Entity,
    /// Entity the projectile hit
    pub target: Entity,
}

/// Sent whenever a hit on a player actually registers.
///
/// Health depletion is left to whoever listens for this.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerHitEvent {
    /// Player entity that was hit
    pub entity: Entity,
    /// Damage amount as received
    pub amount: f32,
    /// Health after the hit, for controllers that track it
    pub remaining_health: Option<f32>,
}
