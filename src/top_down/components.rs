//! Top-down player components.

use bevy::prelude::*;

use crate::core::{Cooldown, HitOutcome};

/// Marker component for the top-down player entity.
#[derive(Component)]
pub struct TopDownPlayer;

/// Marker for the top-down arena camera.
#[derive(Component)]
pub struct TopDownCamera;

/// Crosshair marker placed at the pointer's world position.
#[derive(Component)]
pub struct Crosshair;

/// Pivot the gun rotates around to face the crosshair.
#[derive(Component)]
pub struct WeaponRoot;

/// Muzzle point bullets are spawned from.
#[derive(Component)]
pub struct ProjectileOrigin;

/// Raw input sampled once per frame, consumed by the fixed tick.
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct TopDownInput {
    /// Two-axis move input, not yet normalized
    pub move_axis: Vec2,
    /// Fire trigger level; any positive value fires
    pub fire_level: f32,
    /// Last known pointer position in viewport coordinates
    pub pointer: Option<Vec2>,
}

/// Machine-gun fire-rate state.
#[derive(Component, Default, Debug)]
pub struct MachineGun {
    pub cooldown: Cooldown,
}

impl MachineGun {
    /// Advance the fire-rate countdown, then decide whether to shoot this tick.
    ///
    /// Fire is level-triggered: holding the trigger keeps shooting at
    /// `interval` seconds per shot, and never more than once per call.
    pub fn tick(&mut self, delta: f32, fire_level: f32, interval: f32) -> bool {
        self.cooldown.tick(delta);
        fire_level > 0.0 && self.cooldown.try_trigger(interval)
    }
}

/// Sensor area that hurts the top-down player on contact.
#[derive(Component, Debug, Clone, Copy)]
pub struct DamageZone {
    /// Sent as-is in the damage request; negative bypasses invulnerability
    pub amount: i32,
}

/// Damage intake with an invulnerability window.
#[derive(Component, Default, Debug)]
pub struct DamageIntake {
    pub invulnerable: Cooldown,
    /// Number of hits that have registered
    pub hits_taken: u32,
}

impl DamageIntake {
    pub fn tick(&mut self, delta: f32) {
        self.invulnerable.tick(delta);
    }

    /// Try to register a hit.
    ///
    /// Non-negative damage is ignored while invulnerable and otherwise opens
    /// a new `i_frames` window. Negative damage always registers and leaves
    /// the window untouched.
    pub fn take_damage(&mut self, amount: i32, i_frames: f32) -> HitOutcome {
        let registered = if amount < 0 {
            true
        } else {
            self.invulnerable.try_trigger(i_frames)
        };

        if registered {
            self.hits_taken += 1;
            HitOutcome::Registered
        } else {
            HitOutcome::Ignored
        }
    }
}

/// Which axis dominates the look direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacingAxis {
    #[default]
    Horizontal,
    Vertical,
}

/// Read-only facing output for whatever animates the walk cycle.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq)]
pub struct FacingState {
    /// Normalized weapon-root-to-crosshair direction
    pub look: Vec2,
    /// Body speed in units per second
    pub speed: f32,
    pub axis: FacingAxis,
    /// Moving against the look direction on the dominant axis
    pub play_backwards: bool,
}

impl FacingState {
    pub fn from_motion(to_crosshair: Vec2, velocity: Vec2) -> Self {
        let look = to_crosshair.normalize_or_zero();
        let speed = velocity.length();

        let axis = if look.x.abs() >= look.y.abs() {
            FacingAxis::Horizontal
        } else {
            FacingAxis::Vertical
        };

        let (look_component, velocity_component) = match axis {
            FacingAxis::Horizontal => (look.x, velocity.x),
            FacingAxis::Vertical => (look.y, velocity.y),
        };
        let play_backwards = speed > 0.0 && look_component * velocity_component < 0.0;

        Self {
            look,
            speed,
            axis,
            play_backwards,
        }
    }
}
