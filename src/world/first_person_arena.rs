//! First-person arena: floor, lighting, shooting targets, and a hazard.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::plugin::ArenaEntity;
use crate::core::{ENEMY_ATTACK_GROUP, ENVIRONMENT_GROUP, GROUND_GROUP};
use crate::first_person::spawn_player;
use crate::projectile::ShootTarget;
use crate::tuning::ControllerTuning;

const FLOOR_HALF_SIZE: f32 = 30.0;

pub fn setup_first_person_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    tuning: Res<ControllerTuning>,
) {
    info!("Building first-person arena");

    // Floor is both walkable and a beam stop
    commands.spawn((
        ArenaEntity,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(FLOOR_HALF_SIZE * 2.0, FLOOR_HALF_SIZE * 2.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.25, 0.27, 0.3))),
        Transform::default(),
        RigidBody::Fixed,
        Collider::cuboid(FLOOR_HALF_SIZE, 0.1, FLOOR_HALF_SIZE),
        CollisionGroups::new(GROUND_GROUP | ENVIRONMENT_GROUP, Group::ALL),
    ));

    commands.spawn((
        ArenaEntity,
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Targets that charge the beam when shot
    let target_mesh = meshes.add(Cuboid::new(1.0, 3.0, 1.0));
    let target_material = materials.add(Color::srgb(0.7, 0.3, 0.2));
    for position in [
        Vec3::new(-6.0, 1.5, -12.0),
        Vec3::new(0.0, 1.5, -15.0),
        Vec3::new(6.0, 1.5, -12.0),
    ] {
        commands.spawn((
            ShootTarget,
            ArenaEntity,
            Mesh3d(target_mesh.clone()),
            MeshMaterial3d(target_material.clone()),
            Transform::from_translation(position),
            RigidBody::Fixed,
            Collider::cuboid(0.5, 1.5, 0.5),
            CollisionGroups::new(ENVIRONMENT_GROUP, Group::ALL),
        ));
    }

    // Hazard zone standing in for an enemy attack
    commands.spawn((
        ArenaEntity,
        Mesh3d(meshes.add(Cuboid::new(3.0, 0.2, 3.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 0.1, 0.1, 0.5),
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_xyz(8.0, 0.5, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(1.5, 0.5, 1.5),
        Sensor,
        CollisionGroups::new(ENEMY_ATTACK_GROUP, Group::ALL),
    ));

    spawn_player(
        &mut commands,
        &mut meshes,
        &mut materials,
        Vec3::new(0.0, 1.0, 0.0),
        &tuning.first_person,
    );
}
