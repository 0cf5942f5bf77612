//! Raycast-driven aim for the bullet origin and beam.

use bevy::prelude::*;

use crate::projectile::ProjectileSpawnRequest;

/// Local rotation for the bullet origin so its forward axis points at `target`.
///
/// With no target the origin snaps back to its parent's orientation.
pub fn aim_rotation(origin: Vec3, parent_rotation: Quat, target: Option<Vec3>) -> Quat {
    match target {
        Some(point) => {
            let world = Transform::from_translation(origin)
                .looking_at(point, Vec3::Y)
                .rotation;
            parent_rotation.inverse() * world
        }
        None => Quat::IDENTITY,
    }
}

/// A primary bullet leaving the origin along its forward axis.
pub fn primary_shot(
    origin: Vec3,
    rotation: Quat,
    speed: f32,
    damage: f32,
) -> ProjectileSpawnRequest {
    ProjectileSpawnRequest {
        translation: origin,
        rotation,
        velocity: rotation * Vec3::NEG_Z * speed,
        damage,
    }
}

/// Local placement of the beam under the bullet origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamExtent {
    pub translation: Vec3,
    pub scale: Vec3,
}

/// Size the beam to reach `target`, poking `overlap` units past it.
///
/// The beam mesh is two units long along its own axis, so a scale of
/// `half_length` and an offset of `half_length` span the origin to the far end.
pub fn beam_extent(
    origin: Vec3,
    target: Option<Vec3>,
    overlap: f32,
    width: f32,
    default_half_length: f32,
) -> BeamExtent {
    let half_length = match target {
        Some(point) => (origin.distance(point) + overlap).abs() / 2.0,
        None => default_half_length,
    };

    BeamExtent {
        translation: Vec3::NEG_Z * half_length,
        scale: Vec3::new(width, half_length, width),
    }
}

/// World pose of a transform nested under the player body, built from the
/// local transforms as they stand right now.
///
/// Mouse look writes the body yaw and camera pitch earlier in the same frame,
/// before transform propagation has run.
pub fn nested_pose(body: &Transform, chain: &[&Transform]) -> GlobalTransform {
    chain
        .iter()
        .fold(GlobalTransform::from(*body), |pose, local| {
            pose.mul_transform(**local)
        })
}

/// Turn a raycast result into a world-space hit point.
pub fn hit_point(origin: Vec3, direction: Vec3, time_of_impact: Option<f32>) -> Option<Vec3> {
    time_of_impact.map(|toi| origin + direction * toi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_resets_origin_rotation() {
        let parent = Quat::from_rotation_y(1.0);
        assert_eq!(aim_rotation(Vec3::ZERO, parent, None), Quat::IDENTITY);
    }

    #[test]
    fn hit_points_origin_forward_at_target() {
        let parent = Quat::from_rotation_y(0.7) * Quat::from_rotation_x(-0.2);
        let origin = Vec3::new(1.0, 1.5, 0.0);
        let target = Vec3::new(4.0, 0.0, -6.0);

        let local = aim_rotation(origin, parent, Some(target));
        let world_forward = (parent * local) * Vec3::NEG_Z;
        let expected = (target - origin).normalize();
        assert!((world_forward - expected).length() < 1e-4);
    }

    #[test]
    fn primary_shot_travels_along_forward() {
        let rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let shot = primary_shot(Vec3::ONE, rotation, 40.0, 20.0);

        assert_eq!(shot.translation, Vec3::ONE);
        assert!((shot.velocity - Vec3::new(-40.0, 0.0, 0.0)).length() < 1e-3);
        assert_eq!(shot.damage, 20.0);
    }

    #[test]
    fn beam_reaches_past_target_by_overlap() {
        let origin = Vec3::ZERO;
        let target = Vec3::new(0.0, 0.0, -9.5);
        let extent = beam_extent(origin, Some(target), 0.5, 0.3, 10.0);

        assert_eq!(extent.scale, Vec3::new(0.3, 5.0, 0.3));
        assert_eq!(extent.translation, Vec3::new(0.0, 0.0, -5.0));

        // Far end sits overlap units beyond the hit
        let far_end = extent.translation.z.abs() + extent.scale.y;
        assert!((far_end - 10.0).abs() < 1e-5);
    }

    #[test]
    fn beam_uses_default_length_without_target() {
        let extent = beam_extent(Vec3::ZERO, None, 0.5, 0.3, 10.0);
        assert_eq!(extent.translation, Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(extent.scale, Vec3::new(0.3, 10.0, 0.3));
    }

    #[test]
    fn raycast_miss_has_no_hit_point() {
        assert_eq!(hit_point(Vec3::ZERO, Vec3::NEG_Z, None), None);
        assert_eq!(
            hit_point(Vec3::Y, Vec3::NEG_Z, Some(3.0)),
            Some(Vec3::new(0.0, 1.0, -3.0))
        );
    }

    #[test]
    fn nested_pose_sees_this_frames_look() {
        let body = Transform::from_xyz(2.0, 1.0, 0.0)
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let camera = Transform::from_xyz(0.0, 0.4, 0.0)
            .with_rotation(Quat::from_rotation_x(0.3));

        let pose = nested_pose(&body, &[&camera]);
        assert!((pose.translation() - Vec3::new(2.0, 1.4, 0.0)).length() < 1e-5);
        // Quarter turn left faces down -X, pitched up by the camera
        let forward = pose.forward().as_vec3();
        assert!(forward.x < -0.9);
        assert!((forward.y - 0.3_f32.sin()).abs() < 1e-5);
    }

    #[test]
    fn nested_pose_places_muzzle_under_camera() {
        let body = Transform::from_rotation(Quat::from_rotation_y(std::f32::consts::PI));
        let camera = Transform::from_xyz(0.0, 0.4, 0.0);
        let muzzle = Transform::from_xyz(0.25, -0.2, -0.5);

        let pose = nested_pose(&body, &[&camera, &muzzle]);
        // Half turn mirrors x and z
        assert!((pose.translation() - Vec3::new(-0.25, 0.2, 0.5)).length() < 1e-5);
    }
}
