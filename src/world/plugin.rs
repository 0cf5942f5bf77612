//! World plugin - arena setup and teardown.

use bevy::prelude::*;

use super::first_person_arena::setup_first_person_arena;
use super::top_down_arena::setup_top_down_arena;
use crate::core::Arena;

/// Marker for every root entity that belongs to the current arena.
#[derive(Component)]
pub struct ArenaEntity;

/// World plugin - builds an arena when it is entered and clears it on exit.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Arena::TopDown), setup_top_down_arena)
            .add_systems(OnEnter(Arena::FirstPerson), setup_first_person_arena)
            .add_systems(OnExit(Arena::TopDown), cleanup_arena)
            .add_systems(OnExit(Arena::FirstPerson), cleanup_arena);
    }
}

/// Despawn everything the arena spawned, bullets included.
fn cleanup_arena(mut commands: Commands, query: Query<Entity, With<ArenaEntity>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
