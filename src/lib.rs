//! VerseJump - two player-character controllers for a small action game.
//!
//! A 2D top-down shooter controller and a 3D first-person shooter
//! controller, each ticked by Bevy and Rapier.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, cooldown timers, collision layers
//! - **Tuning**: Controller configuration loaded from RON
//! - **Projectile**: Player bullets shared by both controllers
//! - **TopDown**: 2D movement, crosshair, machine gun, damage intake
//! - **FirstPerson**: 3D movement and gravity, attack state machine, beam
//! - **World**: Test arenas for each controller
//! - **UI**: First-person HUD
//!
//! Control decisions (movement, spread, gravity, attack transitions, damage
//! gating) are plain functions and methods on components, so they can be
//! exercised without running an app.

pub mod core;
pub mod first_person;
pub mod projectile;
pub mod top_down;
pub mod tuning;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct VerseJumpPlugin;

impl Plugin for VerseJumpPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Configuration
            .add_plugins(tuning::TuningPlugin)

            // Controllers
            .add_plugins(projectile::ProjectilePlugin)
            .add_plugins(top_down::TopDownPlugin)
            .add_plugins(first_person::FirstPersonPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
