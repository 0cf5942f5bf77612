//! UI module - first-person HUD.

mod hud;
mod plugin;

pub use plugin::UiPlugin;
