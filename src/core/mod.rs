//! Core game module - states, events, and shared timing utilities.
//!
//! Both player controllers build on the pieces defined here.

mod cooldown;
mod events;
mod layers;
mod plugin;
mod states;

pub use cooldown::Cooldown;
pub use events::*;
pub use layers::*;
pub use plugin::CorePlugin;
pub use states::*;
