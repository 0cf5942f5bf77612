//! First-person movement, gravity, and camera control.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_rapier3d::prelude::*;

use super::attack::AttackState;
use super::components::*;
use crate::core::{player_groups, Arena, GROUND_GROUP};
use crate::tuning::{ControllerTuning, FirstPersonTuning};
use crate::world::ArenaEntity;

/// Marker component for the player's camera.
#[derive(Component, Default)]
pub struct FirstPersonCamera {
    /// Current pitch angle in radians (looking up/down)
    pub pitch: f32,
}

/// System set ordering within a frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FirstPersonSet {
    Look,
    Move,
    Attack,
    Damage,
}

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.configure_sets(
        Update,
        (
            FirstPersonSet::Look,
            FirstPersonSet::Move,
            FirstPersonSet::Attack,
            FirstPersonSet::Damage,
        )
            .chain()
            .run_if(in_state(Arena::FirstPerson)),
    )
    .add_systems(OnEnter(Arena::FirstPerson), grab_cursor)
    .add_systems(OnExit(Arena::FirstPerson), release_cursor)
    .add_systems(Update, mouse_look.in_set(FirstPersonSet::Look))
    .add_systems(Update, player_movement.in_set(FirstPersonSet::Move));
}

/// Grab and hide cursor when entering the first-person arena.
fn grab_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Release cursor when leaving the first-person arena.
fn release_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Handle mouse movement for looking around.
///
/// Rotates the player entity horizontally (yaw) and the camera vertically (pitch).
/// The camera is a child of the player, so horizontal rotation affects both.
pub fn mouse_look(
    mut mouse_motion: EventReader<MouseMotion>,
    tuning: Res<ControllerTuning>,
    mut player_query: Query<&mut Transform, With<FirstPersonPlayer>>,
    mut camera_query: Query<
        (&mut Transform, &mut FirstPersonCamera),
        Without<FirstPersonPlayer>,
    >,
) {
    // Accumulate mouse movement
    let mut delta = Vec2::ZERO;
    for event in mouse_motion.read() {
        delta += event.delta;
    }

    if delta == Vec2::ZERO {
        return;
    }

    let Ok(mut player_transform) = player_query.get_single_mut() else {
        return;
    };
    let Ok((mut camera_transform, mut camera)) = camera_query.get_single_mut() else {
        return;
    };

    let sensitivity = tuning.first_person.mouse_sensitivity * 0.001;

    player_transform.rotate_y(-delta.x * sensitivity);

    // Clamped to prevent flipping
    camera.pitch -= delta.y * sensitivity;
    camera.pitch = camera.pitch.clamp(-1.4, 1.4);

    camera_transform.rotation = Quat::from_rotation_x(camera.pitch);
}

/// World-space horizontal move for this tick's axis input.
///
/// `axis.x` strafes along `right`, `axis.y` walks along `forward`.
pub fn horizontal_move(right: Vec3, forward: Vec3, axis: Vec2, speed: f32) -> Vec3 {
    right * (axis.x * speed) + forward * (axis.y * speed)
}

/// Ground check, gravity, jumping, and WASD movement.
///
/// Gravity is integrated before the vertical velocity is combined with
/// horizontal input. Uses Rapier's KinematicCharacterController to move.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    tuning: Res<ControllerTuning>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (
            Entity,
            &Transform,
            &GroundProbe,
            &mut MovementState,
            &mut KinematicCharacterController,
        ),
        With<FirstPersonPlayer>,
    >,
) {
    let Ok((player_entity, transform, probe, mut movement_state, mut controller)) =
        player_query.get_single_mut()
    else {
        return;
    };
    let config = &tuning.first_person;
    let delta = time.delta_secs();

    // Sphere probe at the feet against the ground layer
    movement_state.is_grounded = if let Ok(context) = rapier_context.get_single() {
        context
            .intersection_with_shape(
                transform.translation + probe.offset,
                Quat::IDENTITY,
                &Collider::ball(config.ground_distance),
                QueryFilter::default()
                    .groups(CollisionGroups::new(Group::ALL, GROUND_GROUP))
                    .exclude_collider(player_entity),
            )
            .is_some()
    } else {
        false
    };

    movement_state.apply_gravity(
        config.gravity,
        config.fall_multiplier,
        config.grounded_velocity,
        delta,
    );

    if keyboard.just_pressed(KeyCode::Space) {
        movement_state.try_jump(config.jump_power);
    }

    let mut axis = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    let planar = horizontal_move(
        transform.right().as_vec3(),
        transform.forward().as_vec3(),
        axis,
        config.speed,
    );
    let velocity = Vec3::new(planar.x, movement_state.vertical_velocity, planar.z);

    if velocity != Vec3::ZERO {
        controller.translation = Some(velocity * delta);
    }
}

/// Spawn the first-person player with camera, bullet origin, and beam.
pub fn spawn_player(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    config: &FirstPersonTuning,
) -> Entity {
    let player = commands
        .spawn((
            FirstPersonPlayer,
            ArenaEntity,
            (
                MovementState::default(),
                GroundProbe::default(),
                Health::new(config.max_health),
                SecondaryCharge::new(config.secondary_max_charge),
                PrimaryCooldown::default(),
                AttackState::default(),
            ),
            Transform::from_translation(position),
            Visibility::default(),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.3),
            player_groups(),
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                autostep: Some(CharacterAutostep {
                    max_height: CharacterLength::Absolute(0.4),
                    min_width: CharacterLength::Absolute(0.3),
                    include_dynamic_bodies: false,
                }),
                max_slope_climb_angle: 45_f32.to_radians(),
                min_slope_slide_angle: 30_f32.to_radians(),
                ..default()
            },
        ))
        .id();

    let beam_mesh = meshes.add(Cylinder::new(0.5, 2.0));
    let beam_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.4, 0.9, 1.0, 0.8),
        emissive: LinearRgba::rgb(0.5, 2.0, 3.0),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    commands.entity(player).with_children(|parent| {
        parent
            .spawn((
                Camera3d::default(),
                FirstPersonCamera::default(),
                // Eye level relative to the body
                Transform::from_xyz(0.0, 0.4, 0.0),
            ))
            .with_children(|camera| {
                camera
                    .spawn((
                        BulletOrigin,
                        Transform::from_xyz(0.25, -0.2, -0.5),
                        Visibility::default(),
                    ))
                    .with_children(|origin| {
                        // Beam mesh runs along its Y axis; lay it along forward (-Z)
                        origin.spawn((
                            Beam,
                            Mesh3d(beam_mesh),
                            MeshMaterial3d(beam_material),
                            Transform::from_translation(Vec3::NEG_Z * config.beam_default_length)
                                .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2))
                                .with_scale(Vec3::new(
                                    config.beam_width,
                                    config.beam_default_length,
                                    config.beam_width,
                                )),
                            Visibility::Hidden,
                            Collider::cylinder(1.0, 0.5),
                            Sensor,
                            ColliderDisabled,
                            crate::core::player_projectile_groups(),
                            ActiveEvents::COLLISION_EVENTS,
                            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
                        ));
                    });
            });
    });

    player
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_combines_strafe_and_walk() {
        let planar = horizontal_move(Vec3::X, Vec3::NEG_Z, Vec2::new(1.0, 1.0), 6.0);
        assert_eq!(planar, Vec3::new(6.0, 0.0, -6.0));
    }

    #[test]
    fn no_input_means_no_horizontal_motion() {
        let planar = horizontal_move(Vec3::X, Vec3::NEG_Z, Vec2::ZERO, 6.0);
        assert_eq!(planar, Vec3::ZERO);
    }

    #[test]
    fn move_follows_body_yaw() {
        let body = Transform::from_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let planar = horizontal_move(
            body.right().as_vec3(),
            body.forward().as_vec3(),
            Vec2::new(0.0, 1.0),
            2.0,
        );
        // Yawed a quarter turn left, forward points down -X
        assert!((planar - Vec3::new(-2.0, 0.0, 0.0)).length() < 1e-5);
    }
}
