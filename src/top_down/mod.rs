//! Top-down module - the 2D shooter controller.

mod components;
mod controller;
mod plugin;
mod systems;

pub use components::*;
pub use controller::{movement_velocity, spread_shot, weapon_rotation};
pub use plugin::TopDownPlugin;
