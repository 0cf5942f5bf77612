//! Top-down arena: camera, player body, crosshair, boundary walls, and a
//! damage zone.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::plugin::ArenaEntity;
use crate::core::{player_groups, ENEMY_ATTACK_GROUP, ENVIRONMENT_GROUP, PLAYER_GROUP};
use crate::top_down::{
    Crosshair, DamageIntake, DamageZone, FacingState, MachineGun, ProjectileOrigin, TopDownCamera,
    TopDownInput, TopDownPlayer, WeaponRoot,
};

/// Half extent of the square play area in world units.
const ARENA_HALF_SIZE: f32 = 12.0;
const WALL_THICKNESS: f32 = 0.5;
/// Pixels-to-world scale for the orthographic camera.
const CAMERA_SCALE: f32 = 1.0 / 32.0;
/// Damage sent each time the player walks into the hazard.
const HAZARD_DAMAGE: i32 = 10;

pub fn setup_top_down_arena(mut commands: Commands) {
    info!("Building top-down arena");

    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: CAMERA_SCALE,
            ..OrthographicProjection::default_2d()
        },
        TopDownCamera,
        ArenaEntity,
    ));

    commands.spawn((
        Crosshair,
        ArenaEntity,
        Sprite::from_color(Color::srgba(1.0, 1.0, 1.0, 0.8), Vec2::splat(0.3)),
        Transform::from_xyz(1.0, 0.0, 1.0),
    ));

    spawn_player(&mut commands);

    commands.spawn((
        DamageZone {
            amount: HAZARD_DAMAGE,
        },
        ArenaEntity,
        Sprite::from_color(Color::srgba(0.9, 0.2, 0.1, 0.5), Vec2::splat(2.0)),
        Transform::from_xyz(6.0, 4.0, -0.1),
        RigidBody::Fixed,
        Collider::cuboid(1.0, 1.0, 1.0),
        Sensor,
        CollisionGroups::new(ENEMY_ATTACK_GROUP, PLAYER_GROUP),
        ActiveEvents::COLLISION_EVENTS,
    ));

    // Boundary walls
    let span = ARENA_HALF_SIZE * 2.0 + WALL_THICKNESS * 2.0;
    let walls = [
        (Vec2::new(0.0, ARENA_HALF_SIZE + WALL_THICKNESS / 2.0), Vec2::new(span, WALL_THICKNESS)),
        (Vec2::new(0.0, -ARENA_HALF_SIZE - WALL_THICKNESS / 2.0), Vec2::new(span, WALL_THICKNESS)),
        (Vec2::new(ARENA_HALF_SIZE + WALL_THICKNESS / 2.0, 0.0), Vec2::new(WALL_THICKNESS, span)),
        (Vec2::new(-ARENA_HALF_SIZE - WALL_THICKNESS / 2.0, 0.0), Vec2::new(WALL_THICKNESS, span)),
    ];
    for (center, size) in walls {
        commands.spawn((
            ArenaEntity,
            Sprite::from_color(Color::srgb(0.3, 0.3, 0.35), size),
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Fixed,
            Collider::cuboid(size.x / 2.0, size.y / 2.0, 1.0),
            CollisionGroups::new(ENVIRONMENT_GROUP, Group::ALL),
        ));
    }
}

/// Spawn the top-down player with its weapon root and muzzle.
fn spawn_player(commands: &mut Commands) -> Entity {
    let player = commands
        .spawn((
            TopDownPlayer,
            ArenaEntity,
            TopDownInput::default(),
            MachineGun::default(),
            DamageIntake::default(),
            FacingState::default(),
            Sprite::from_color(Color::srgb(0.3, 0.6, 1.0), Vec2::splat(0.8)),
            Transform::from_xyz(0.0, 0.0, 0.0),
            // Dynamic body moved by velocity, pinned to the z = 0 plane
            RigidBody::Dynamic,
            Collider::cuboid(0.4, 0.4, 0.4),
            LockedAxes::ROTATION_LOCKED | LockedAxes::TRANSLATION_LOCKED_Z,
            GravityScale(0.0),
            Velocity::zero(),
            player_groups(),
        ))
        .id();

    commands.entity(player).with_children(|parent| {
        parent
            .spawn((WeaponRoot, Transform::from_xyz(0.0, 0.0, 0.1), Visibility::default()))
            .with_children(|root| {
                root.spawn((
                    Sprite::from_color(Color::srgb(0.2, 0.2, 0.2), Vec2::new(0.6, 0.15)),
                    Transform::from_xyz(0.3, 0.0, 0.0),
                ));
                root.spawn((
                    ProjectileOrigin,
                    Transform::from_xyz(0.65, 0.0, 0.0),
                    Visibility::default(),
                ));
            });
    });

    player
}
