//! World module - minimal test arenas for each controller.

mod first_person_arena;
mod plugin;
mod top_down_arena;

pub use plugin::{ArenaEntity, WorldPlugin};
