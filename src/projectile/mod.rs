//! Projectile module - player bullets shared by both controllers.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::ProjectilePlugin;
pub use systems::spawn_projectile;
