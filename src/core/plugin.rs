//! Core plugin that sets up game states, events, and arena switching.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame) and the Arena sub-state
/// - Global events (TopDownDamageEvent, ProjectileHitEvent, PlayerHitEvent)
/// - Arena switching with Tab
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<Arena>()

            // Register global events
            .add_event::<TopDownDamageEvent>()
            .add_event::<ProjectileHitEvent>()
            .add_event::<PlayerHitEvent>()

            // Swap between the two controllers
            .add_systems(
                Update,
                handle_arena_switch.run_if(in_state(GameState::InGame)),
            );
    }
}

/// Handle Tab to swap between the top-down and first-person arenas.
fn handle_arena_switch(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_arena: Res<State<Arena>>,
    mut next_arena: ResMut<NextState<Arena>>,
) {
    if keyboard.just_pressed(KeyCode::Tab) {
        let next = current_arena.get().other();
        info!("Switching arena to {:?}", next);
        next_arena.set(next);
    }
}
