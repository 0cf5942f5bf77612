//! Tuning plugin - loads controller configuration and leaves the loading state.

use bevy::prelude::*;
use std::path::Path;

use super::data::{ControllerTuning, TUNING_PATH};
use super::error::TuningError;
use crate::core::{Arena, GameState};

/// Tuning plugin - reads `assets/data/controllers.ron` during loading.
pub struct TuningPlugin;

impl Plugin for TuningPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControllerTuning>()
            .add_systems(OnEnter(GameState::Loading), load_controller_tuning);
    }
}

/// Load tuning, falling back to defaults, then start the configured arena.
fn load_controller_tuning(
    mut tuning: ResMut<ControllerTuning>,
    mut next_state: ResMut<NextState<GameState>>,
    mut next_arena: ResMut<NextState<Arena>>,
) {
    match ControllerTuning::load(Path::new(TUNING_PATH)) {
        Ok(loaded) => {
            info!("Loaded controller tuning from {}", TUNING_PATH);
            *tuning = loaded;
        }
        Err(TuningError::NotFound(path)) => {
            warn!("Tuning file '{}' not found, using defaults", path);
        }
        Err(e) => {
            error!("{}; using defaults", e);
        }
    }

    next_state.set(GameState::InGame);
    next_arena.set(tuning.start_arena);
}
