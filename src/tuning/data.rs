//! Controller tuning data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::TuningError;
use crate::core::Arena;

/// Default location of the tuning file, relative to the working directory.
pub const TUNING_PATH: &str = "assets/data/controllers.ron";

/// Tunables for the 2D top-down controller.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TopDownTuning {
    /// Movement speed in units per second
    pub speed_max: f32,
    /// Invulnerability window after a hit, in seconds
    pub i_frames: f32,
    /// Damage payload carried by each bullet
    pub bullet_damage: i32,
    /// Bullet speed in units per second
    pub bullet_speed: f32,
    /// Seconds between machine-gun shots
    pub fire_interval: f32,
    /// Maximum random deviation of a shot, in degrees either side
    pub spread_degrees: f32,
    /// Seconds before an unspent bullet despawns
    pub bullet_lifetime: f32,
}

impl Default for TopDownTuning {
    fn default() -> Self {
        Self {
            speed_max: 8.0,
            i_frames: 1.0,
            bullet_damage: 10,
            bullet_speed: 16.0,
            fire_interval: 0.166,
            spread_degrees: 4.0,
            bullet_lifetime: 3.0,
        }
    }
}

/// Tunables for the 3D first-person controller.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FirstPersonTuning {
    /// Movement speed in units per second
    pub speed: f32,
    pub max_health: f32,
    /// Damage taken from each enemy attack
    pub incoming_damage: f32,
    /// Invulnerability window after a hit, in seconds
    pub invulnerability: f32,
    /// Radius of the ground probe sphere
    pub ground_distance: f32,
    /// Gravity acceleration (negative is down)
    pub gravity: f32,
    pub jump_power: f32,
    /// Gravity scale while falling
    pub fall_multiplier: f32,
    /// Vertical velocity held while resting on the ground
    pub grounded_velocity: f32,
    pub bullet_speed: f32,
    /// Damage payload carried by each primary bullet
    pub bullet_damage: f32,
    /// Seconds between primary shots
    pub fire_interval: f32,
    pub bullet_lifetime: f32,
    pub secondary_max_charge: f32,
    /// Charge granted per primary bullet that strikes a target
    pub charge_per_hit: f32,
    /// Delay between triggering the beam and it firing
    pub wind_up: f32,
    /// How long the beam stays on
    pub fire_length: f32,
    /// Maximum beam raycast distance
    pub beam_range: f32,
    /// How far the beam pokes into whatever it hits
    pub beam_overlap: f32,
    pub beam_width: f32,
    /// Half-length of the beam when nothing is in range
    pub beam_default_length: f32,
    pub mouse_sensitivity: f32,
}

impl Default for FirstPersonTuning {
    fn default() -> Self {
        Self {
            speed: 6.0,
            max_health: 100.0,
            incoming_damage: 20.0,
            invulnerability: 1.0,
            ground_distance: 0.4,
            gravity: -9.81,
            jump_power: 5.0,
            fall_multiplier: 1.25,
            grounded_velocity: -2.0,
            bullet_speed: 40.0,
            bullet_damage: 20.0,
            fire_interval: 0.15,
            bullet_lifetime: 3.0,
            secondary_max_charge: 100.0,
            charge_per_hit: 10.0,
            wind_up: 0.5,
            fire_length: 1.5,
            beam_range: 100.0,
            beam_overlap: 0.5,
            beam_width: 0.3,
            beam_default_length: 10.0,
            mouse_sensitivity: 1.5,
        }
    }
}

/// All controller configuration, set before play begins.
#[derive(Resource, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ControllerTuning {
    /// Arena entered after loading
    pub start_arena: Arena,
    pub top_down: TopDownTuning,
    pub first_person: FirstPersonTuning,
}

impl ControllerTuning {
    /// Parse tuning from RON text and validate it.
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, TuningError> {
        let tuning = ron::from_str::<ControllerTuning>(contents).map_err(|e| {
            TuningError::Parse {
                path: path.to_string(),
                details: e.to_string(),
            }
        })?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file.
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(TuningError::NotFound(display));
        }
        let contents = fs::read_to_string(path).map_err(|e| TuningError::Read {
            path: display.clone(),
            details: e.to_string(),
        })?;
        Self::from_ron(&display, &contents)
    }

    /// Check every value the controllers divide by, normalize or count down.
    pub fn validate(&self) -> Result<(), TuningError> {
        let td = &self.top_down;
        let fp = &self.first_person;

        positive("top_down.speed_max", td.speed_max)?;
        positive("top_down.bullet_speed", td.bullet_speed)?;
        positive("top_down.fire_interval", td.fire_interval)?;
        positive("top_down.bullet_lifetime", td.bullet_lifetime)?;
        non_negative("top_down.i_frames", td.i_frames)?;
        non_negative("top_down.spread_degrees", td.spread_degrees)?;

        positive("first_person.speed", fp.speed)?;
        positive("first_person.max_health", fp.max_health)?;
        positive("first_person.bullet_speed", fp.bullet_speed)?;
        positive("first_person.fire_interval", fp.fire_interval)?;
        positive("first_person.bullet_lifetime", fp.bullet_lifetime)?;
        positive("first_person.secondary_max_charge", fp.secondary_max_charge)?;
        positive("first_person.ground_distance", fp.ground_distance)?;
        positive("first_person.beam_range", fp.beam_range)?;
        non_negative("first_person.invulnerability", fp.invulnerability)?;
        non_negative("first_person.wind_up", fp.wind_up)?;
        non_negative("first_person.fire_length", fp.fire_length)?;
        non_negative("first_person.charge_per_hit", fp.charge_per_hit)?;

        if fp.fall_multiplier < 1.0 {
            return Err(TuningError::Invalid {
                field: "first_person.fall_multiplier",
                reason: format!("must be at least 1.0, got {}", fp.fall_multiplier),
            });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: format!("must be greater than zero, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: format!("must not be negative, got {value}"),
        })
    }
}
