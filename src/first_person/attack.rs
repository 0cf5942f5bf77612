//! Attack state machine for primary (hitscan-aimed bullets) and secondary
//! (charged beam) fire.

use bevy::prelude::*;

use super::components::SecondaryCharge;
use crate::core::Cooldown;
use crate::tuning::FirstPersonTuning;

/// Button edges and levels for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttackInput {
    pub primary_pressed: bool,
    pub primary_held: bool,
    pub secondary_pressed: bool,
}

/// What the beam visual should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BeamChange {
    #[default]
    Unchanged,
    Activated,
    Deactivated,
}

/// Side effects requested by one step of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackOutcome {
    pub fire_primary: bool,
    pub beam: BeamChange,
}

/// Current attack state. Timers live with the state that uses them.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub enum AttackState {
    #[default]
    Waiting,
    /// Fire button held; shooting at the fire rate
    PrimaryFire,
    /// Counting down before the beam turns on
    SecondaryWindUp { remaining: f32 },
    /// Beam on; counting down until it shuts off
    SecondaryFire { remaining: f32 },
}

impl AttackState {
    pub fn is_beam_active(&self) -> bool {
        matches!(self, AttackState::SecondaryFire { .. })
    }

    /// Advance one tick.
    ///
    /// The primary cooldown runs down every tick regardless of state.
    pub fn step(
        &mut self,
        input: AttackInput,
        cooldown: &mut Cooldown,
        charge: &mut SecondaryCharge,
        tuning: &FirstPersonTuning,
        delta: f32,
    ) -> AttackOutcome {
        let mut outcome = AttackOutcome::default();
        cooldown.tick(delta);

        *self = match *self {
            AttackState::Waiting => {
                if input.primary_pressed {
                    AttackState::PrimaryFire
                } else if input.secondary_pressed && charge.is_full() {
                    charge.reset();
                    AttackState::SecondaryWindUp {
                        remaining: tuning.wind_up,
                    }
                } else {
                    AttackState::Waiting
                }
            }
            AttackState::PrimaryFire => {
                if input.primary_held {
                    outcome.fire_primary = cooldown.try_trigger(tuning.fire_interval);
                    AttackState::PrimaryFire
                } else {
                    AttackState::Waiting
                }
            }
            AttackState::SecondaryWindUp { remaining } => {
                let remaining = remaining - delta;
                if remaining <= 0.0 {
                    outcome.beam = BeamChange::Activated;
                    AttackState::SecondaryFire {
                        remaining: tuning.fire_length,
                    }
                } else {
                    AttackState::SecondaryWindUp { remaining }
                }
            }
            AttackState::SecondaryFire { remaining } => {
                if remaining <= 0.0 {
                    outcome.beam = BeamChange::Deactivated;
                    AttackState::Waiting
                } else {
                    AttackState::SecondaryFire {
                        remaining: remaining - delta,
                    }
                }
            }
        };

        outcome
    }
}
