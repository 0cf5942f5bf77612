//! First-person player components.

use bevy::prelude::*;

use crate::core::{Cooldown, HitOutcome};

/// Marker component for the first-person player entity.
#[derive(Component)]
pub struct FirstPersonPlayer;

/// Muzzle transform bullets and the beam leave from. Child of the camera.
#[derive(Component)]
pub struct BulletOrigin;

/// Marker for the secondary-fire beam. Child of the bullet origin.
#[derive(Component)]
pub struct Beam;

/// Tracks vertical motion for gravity and jumping.
#[derive(Component, Debug, Default)]
pub struct MovementState {
    pub is_grounded: bool,
    pub vertical_velocity: f32,
}

impl MovementState {
    /// Integrate gravity for one tick.
    ///
    /// - grounded and falling: hold at `grounded_velocity`
    /// - airborne and rising: plain gravity
    /// - otherwise: gravity scaled by `fall_multiplier`
    pub fn apply_gravity(
        &mut self,
        gravity: f32,
        fall_multiplier: f32,
        grounded_velocity: f32,
        delta: f32,
    ) {
        if self.is_grounded && self.vertical_velocity < 0.0 {
            self.vertical_velocity = grounded_velocity;
        } else if !self.is_grounded && self.vertical_velocity > 0.0 {
            self.vertical_velocity += gravity * delta;
        } else {
            self.vertical_velocity += gravity * fall_multiplier * delta;
        }
    }

    /// Jump if standing on something. Returns whether the jump happened.
    pub fn try_jump(&mut self, jump_power: f32) -> bool {
        if self.is_grounded {
            self.vertical_velocity = jump_power;
            true
        } else {
            false
        }
    }
}

/// Feet position offset from the body origin for the ground probe.
#[derive(Component, Debug, Clone, Copy)]
pub struct GroundProbe {
    pub offset: Vec3,
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, -0.8, 0.0),
        }
    }
}

/// Player health with an invulnerability window after each hit.
#[derive(Component, Debug)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
    pub invulnerable: Cooldown,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
            invulnerable: Cooldown::ready(),
        }
    }

    pub fn tick(&mut self, delta: f32) {
        self.invulnerable.tick(delta);
    }

    /// Take a hit from an enemy attack unless still invulnerable.
    ///
    /// Health may go below zero; nothing here reacts to it.
    pub fn take_hit(&mut self, damage: f32, invulnerability: f32) -> HitOutcome {
        if self.invulnerable.try_trigger(invulnerability) {
            self.current -= damage;
            HitOutcome::Registered
        } else {
            HitOutcome::Ignored
        }
    }

    pub fn percentage(&self) -> f32 {
        (self.current / self.maximum).clamp(0.0, 1.0)
    }
}

/// Charge accumulator that gates the secondary beam.
#[derive(Component, Debug)]
pub struct SecondaryCharge {
    pub current: f32,
    pub maximum: f32,
}

impl SecondaryCharge {
    pub fn new(max: f32) -> Self {
        Self {
            current: 0.0,
            maximum: max,
        }
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    /// Add charge, capped at the maximum.
    pub fn add(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.maximum);
    }

    pub fn reset(&mut self) {
        self.current = 0.0;
    }

    pub fn percentage(&self) -> f32 {
        self.current / self.maximum
    }
}

/// Primary fire rate state.
#[derive(Component, Debug, Default)]
pub struct PrimaryCooldown(pub Cooldown);

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.02;

    #[test]
    fn resting_on_ground_holds_small_downward_velocity() {
        let mut state = MovementState {
            is_grounded: true,
            vertical_velocity: -7.0,
        };
        state.apply_gravity(-9.81, 1.25, -2.0, DT);
        assert_eq!(state.vertical_velocity, -2.0);

        // Stays clamped tick after tick
        state.apply_gravity(-9.81, 1.25, -2.0, DT);
        assert_eq!(state.vertical_velocity, -2.0);
    }

    #[test]
    fn rising_uses_plain_gravity() {
        let mut state = MovementState {
            is_grounded: false,
            vertical_velocity: 4.0,
        };
        state.apply_gravity(-9.81, 1.25, -2.0, DT);
        assert!((state.vertical_velocity - (4.0 - 9.81 * DT)).abs() < 1e-5);
    }

    #[test]
    fn falling_uses_fall_multiplier() {
        let mut state = MovementState {
            is_grounded: false,
            vertical_velocity: -1.0,
        };
        state.apply_gravity(-9.81, 1.25, -2.0, DT);
        assert!((state.vertical_velocity - (-1.0 - 9.81 * 1.25 * DT)).abs() < 1e-5);

        // The apex counts as falling
        let mut apex = MovementState {
            is_grounded: false,
            vertical_velocity: 0.0,
        };
        apex.apply_gravity(-9.81, 1.25, -2.0, DT);
        assert!((apex.vertical_velocity - (-9.81 * 1.25 * DT)).abs() < 1e-5);
    }

    #[test]
    fn jump_only_from_ground() {
        let mut airborne = MovementState::default();
        assert!(!airborne.try_jump(5.0));
        assert_eq!(airborne.vertical_velocity, 0.0);

        let mut grounded = MovementState {
            is_grounded: true,
            vertical_velocity: -2.0,
        };
        assert!(grounded.try_jump(5.0));
        assert_eq!(grounded.vertical_velocity, 5.0);
    }

    #[test]
    fn invulnerability_swallows_follow_up_hits() {
        let mut health = Health::new(100.0);
        assert_eq!(health.take_hit(20.0, 1.0), HitOutcome::Registered);
        assert_eq!(health.take_hit(20.0, 1.0), HitOutcome::Ignored);
        assert_eq!(health.current, 80.0);

        health.tick(1.0);
        assert_eq!(health.take_hit(20.0, 1.0), HitOutcome::Registered);
        assert_eq!(health.current, 60.0);
    }

    #[test]
    fn health_can_drop_below_zero() {
        let mut health = Health::new(10.0);
        health.take_hit(20.0, 0.0);
        assert_eq!(health.current, -10.0);
        assert_eq!(health.percentage(), 0.0);
    }

    #[test]
    fn charge_caps_at_maximum() {
        let mut charge = SecondaryCharge::new(100.0);
        for _ in 0..15 {
            charge.add(10.0);
        }
        assert_eq!(charge.current, 100.0);
        assert!(charge.is_full());

        charge.reset();
        assert_eq!(charge.current, 0.0);
        assert!(!charge.is_full());
    }
}
