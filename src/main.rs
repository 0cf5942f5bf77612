//! VerseJump - Entry Point
//!
//! Controls:
//! - WASD: Move
//! - Mouse: Aim (top-down) / look around (first-person)
//! - Left mouse: Primary fire
//! - Right mouse: Secondary beam (first-person, once charged)
//! - Space: Jump (first-person)
//! - Tab: Switch arena

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "VerseJump".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(versejump::VerseJumpPlugin)

        .run();
}
