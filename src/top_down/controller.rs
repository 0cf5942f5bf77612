//! Per-tick top-down control math: movement, shot spread, and weapon aim.

use bevy::prelude::*;
use rand::Rng;

use crate::projectile::ProjectileSpawnRequest;

/// Commanded body velocity for a move input.
///
/// Any non-zero input moves at exactly `speed_max`; zero input stops dead.
pub fn movement_velocity(move_axis: Vec2, speed_max: f32) -> Vec2 {
    move_axis.normalize_or_zero() * speed_max
}

/// Build a bullet from the muzzle pose with a random angular deviation.
///
/// The deviation is applied to the orientation first and the velocity is
/// taken from the rotated right axis, so only the direction varies.
/// Returns the request together with the deviation in degrees.
pub fn spread_shot<R: Rng + ?Sized>(
    origin: &Transform,
    spread_degrees: f32,
    speed: f32,
    damage: f32,
    rng: &mut R,
) -> (ProjectileSpawnRequest, f32) {
    let deviation = if spread_degrees > 0.0 {
        rng.gen_range(-spread_degrees..=spread_degrees)
    } else {
        0.0
    };

    let rotation = origin.rotation * Quat::from_rotation_z(deviation.to_radians());
    let direction = (rotation * Vec3::X).truncate().normalize_or_zero();

    let request = ProjectileSpawnRequest {
        translation: origin.translation,
        rotation,
        velocity: (direction * speed).extend(0.0),
        damage,
    };
    (request, deviation)
}

/// Rotation that points a weapon root's right axis at the crosshair.
///
/// Works in the movement plane only. `None` when the crosshair sits on the
/// root and there is no direction to face.
pub fn weapon_rotation(root: Vec3, crosshair: Vec3) -> Option<Quat> {
    let to_crosshair = crosshair.truncate() - root.truncate();
    if to_crosshair == Vec2::ZERO {
        return None;
    }
    Some(Quat::from_rotation_z(to_crosshair.y.atan2(to_crosshair.x)))
}
