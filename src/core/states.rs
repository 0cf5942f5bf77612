//! Game state definitions that control which controller is running.
//!
//! States determine which systems run at any given time. The top-down
//! controller only ticks in `Arena::TopDown`, the first-person controller
//! only in `Arena::FirstPerson`.

use bevy::prelude::*;
use serde::Deserialize;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` to read controller tuning
/// - Move to `InGame` once tuning is available
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading tuning data
    #[default]
    Loading,
    /// Active gameplay
    InGame,
}

/// Which arena (and therefore which controller) is active.
///
/// Only exists while `GameState::InGame`.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Deserialize)]
#[source(GameState = GameState::InGame)]
pub enum Arena {
    /// 2D top-down shooter
    #[default]
    TopDown,
    /// 3D first-person shooter
    FirstPerson,
}

impl Arena {
    /// The arena `Tab` switches to.
    pub fn other(self) -> Self {
        match self {
            Arena::TopDown => Arena::FirstPerson,
            Arena::FirstPerson => Arena::TopDown,
        }
    }
}
