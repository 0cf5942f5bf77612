//! First-person combat systems - attack state machine, aiming, damage intake,
//! and secondary charge.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::aim::{aim_rotation, beam_extent, hit_point, nested_pose, primary_shot};
use super::attack::{AttackInput, AttackState, BeamChange};
use super::components::*;
use super::movement::{FirstPersonCamera, FirstPersonSet};
use crate::core::{
    is_enemy_attack, HitOutcome, PlayerHitEvent, ProjectileHitEvent, ENVIRONMENT_GROUP,
    PLAYER_PROJECTILE_GROUP,
};
use crate::projectile::{spawn_projectile, ShootTarget};
use crate::tuning::ControllerTuning;

/// Shared mesh and material for primary bullets.
#[derive(Resource)]
pub struct BulletAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Configure first-person combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.add_systems(Startup, load_bullet_assets)
        .add_systems(
            Update,
            (run_attack_state, aim_beam)
                .chain()
                .in_set(FirstPersonSet::Attack),
        )
        .add_systems(
            Update,
            (tick_invulnerability, enemy_attack_intake, accumulate_charge)
                .chain()
                .in_set(FirstPersonSet::Damage),
        );
}

fn load_bullet_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(BulletAssets {
        mesh: meshes.add(Sphere::new(0.08)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.8, 0.2),
            emissive: LinearRgba::rgb(2.0, 1.5, 0.3),
            ..default()
        }),
    });
}

/// Camera transform for aiming, excluding the player body.
type CameraLocal<'w, 's> =
    Query<'w, 's, &'static Transform, (With<FirstPersonCamera>, Without<FirstPersonPlayer>)>;

/// Cast from the camera along its forward axis and return the hit point.
fn camera_target(
    context: &RapierContext,
    camera: &GlobalTransform,
    max_distance: f32,
    filter: QueryFilter,
) -> Option<Vec3> {
    let origin = camera.translation();
    let direction = camera.forward().as_vec3();
    let toi = context
        .cast_ray(origin, direction, max_distance, true, filter)
        .map(|(_, toi)| toi);
    hit_point(origin, direction, toi)
}

/// Step the attack state machine and carry out what it asks for.
fn run_attack_state(
    mut commands: Commands,
    time: Res<Time>,
    mouse: Res<ButtonInput<MouseButton>>,
    tuning: Res<ControllerTuning>,
    bullet_assets: Option<Res<BulletAssets>>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (
            Entity,
            &Transform,
            &mut AttackState,
            &mut PrimaryCooldown,
            &mut SecondaryCharge,
        ),
        With<FirstPersonPlayer>,
    >,
    camera_query: CameraLocal,
    mut origin_query: Query<
        &mut Transform,
        (
            With<BulletOrigin>,
            Without<FirstPersonCamera>,
            Without<FirstPersonPlayer>,
        ),
    >,
    mut beam_query: Query<(Entity, &mut Visibility), With<Beam>>,
) {
    let Ok((player, body, mut state, mut cooldown, mut charge)) = player_query.get_single_mut()
    else {
        return;
    };
    let config = &tuning.first_person;

    let input = AttackInput {
        primary_pressed: mouse.just_pressed(MouseButton::Left),
        primary_held: mouse.pressed(MouseButton::Left),
        secondary_pressed: mouse.just_pressed(MouseButton::Right),
    };

    let previous = *state;
    let outcome = state.step(
        input,
        &mut cooldown.0,
        &mut charge,
        config,
        time.delta_secs(),
    );
    if *state != previous {
        debug!("Attack state {:?} -> {:?}", previous, *state);
    }

    match outcome.beam {
        BeamChange::Unchanged => {}
        BeamChange::Activated | BeamChange::Deactivated => {
            let active = outcome.beam == BeamChange::Activated;
            for (beam, mut visibility) in beam_query.iter_mut() {
                *visibility = if active {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
                if active {
                    commands.entity(beam).remove::<ColliderDisabled>();
                } else {
                    commands.entity(beam).insert(ColliderDisabled);
                }
            }
        }
    }

    if !outcome.fire_primary {
        return;
    }

    let Ok(camera_local) = camera_query.get_single() else {
        return;
    };
    let Ok(mut origin_transform) = origin_query.get_single_mut() else {
        return;
    };
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    let camera = nested_pose(body, &[camera_local]);
    let origin = nested_pose(body, &[camera_local, &*origin_transform]).translation();

    let filter = QueryFilter::default()
        .exclude_sensors()
        .exclude_collider(player)
        .groups(CollisionGroups::new(
            Group::ALL,
            Group::ALL.difference(PLAYER_PROJECTILE_GROUP),
        ));
    let target = camera_target(context, &camera, f32::MAX, filter);

    let parent_rotation = camera.rotation();
    origin_transform.rotation = aim_rotation(origin, parent_rotation, target);

    let request = primary_shot(
        origin,
        parent_rotation * origin_transform.rotation,
        config.bullet_speed,
        config.bullet_damage,
    );

    match &bullet_assets {
        Some(assets) => {
            spawn_projectile(
                &mut commands,
                &request,
                player,
                config.bullet_lifetime,
                (
                    Mesh3d(assets.mesh.clone()),
                    MeshMaterial3d(assets.material.clone()),
                ),
            );
        }
        None => {
            spawn_projectile(
                &mut commands,
                &request,
                player,
                config.bullet_lifetime,
                (),
            );
        }
    }
}

/// Keep the beam pointed at whatever the crosshair is on and sized to reach it.
fn aim_beam(
    tuning: Res<ControllerTuning>,
    rapier_context: Query<&RapierContext>,
    player_query: Query<(Entity, &Transform, &AttackState), With<FirstPersonPlayer>>,
    camera_query: CameraLocal,
    mut origin_query: Query<
        &mut Transform,
        (
            With<BulletOrigin>,
            Without<Beam>,
            Without<FirstPersonCamera>,
            Without<FirstPersonPlayer>,
        ),
    >,
    mut beam_query: Query<
        &mut Transform,
        (
            With<Beam>,
            Without<BulletOrigin>,
            Without<FirstPersonCamera>,
            Without<FirstPersonPlayer>,
        ),
    >,
) {
    let Ok((player, body, state)) = player_query.get_single() else {
        return;
    };
    if !state.is_beam_active() {
        return;
    }

    let Ok(camera_local) = camera_query.get_single() else {
        return;
    };
    let Ok(mut origin_transform) = origin_query.get_single_mut() else {
        return;
    };
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let config = &tuning.first_person;

    let camera = nested_pose(body, &[camera_local]);
    let origin = nested_pose(body, &[camera_local, &*origin_transform]).translation();

    let filter = QueryFilter::default()
        .exclude_sensors()
        .exclude_collider(player)
        .groups(CollisionGroups::new(Group::ALL, ENVIRONMENT_GROUP));
    let target = camera_target(context, &camera, config.beam_range, filter);

    origin_transform.rotation = aim_rotation(origin, camera.rotation(), target);

    let extent = beam_extent(
        origin,
        target,
        config.beam_overlap,
        config.beam_width,
        config.beam_default_length,
    );
    for mut beam in beam_query.iter_mut() {
        beam.translation = extent.translation;
        beam.scale = extent.scale;
    }
}

fn tick_invulnerability(time: Res<Time>, mut query: Query<&mut Health>) {
    for mut health in query.iter_mut() {
        health.tick(time.delta_secs());
    }
}

/// Take damage when an enemy attack collider touches the player.
fn enemy_attack_intake(
    tuning: Res<ControllerTuning>,
    mut collision_events: EventReader<CollisionEvent>,
    groups_query: Query<&CollisionGroups>,
    mut player_query: Query<(Entity, &mut Health), With<FirstPersonPlayer>>,
    mut hit_events: EventWriter<PlayerHitEvent>,
) {
    let Ok((player, mut health)) = player_query.get_single_mut() else {
        collision_events.clear();
        return;
    };
    let config = &tuning.first_person;

    for event in collision_events.read() {
        let CollisionEvent::Started(a, b, _) = *event else {
            continue;
        };
        let other = if a == player {
            b
        } else if b == player {
            a
        } else {
            continue;
        };

        let Ok(groups) = groups_query.get(other) else {
            continue;
        };
        if !is_enemy_attack(groups) {
            continue;
        }

        if health.take_hit(config.incoming_damage, config.invulnerability) == HitOutcome::Registered
        {
            info!(
                "Player took {} damage! ({} remaining)",
                config.incoming_damage, health.current
            );
            hit_events.send(PlayerHitEvent {
                entity: player,
                amount: config.incoming_damage,
                remaining_health: Some(health.current),
            });
        }
    }
}

/// Feed secondary charge from primary bullets that struck a target.
fn accumulate_charge(
    tuning: Res<ControllerTuning>,
    mut hit_events: EventReader<ProjectileHitEvent>,
    target_query: Query<(), With<ShootTarget>>,
    mut charge_query: Query<&mut SecondaryCharge>,
) {
    for event in hit_events.read() {
        if target_query.get(event.target).is_err() {
            continue;
        }
        let Ok(mut charge) = charge_query.get_mut(event.shooter) else {
            continue;
        };

        let was_full = charge.is_full();
        charge.add(tuning.first_person.charge_per_hit);
        if charge.is_full() && !was_full {
            info!("Secondary fire charged");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_rapier3d::rapier::geometry::CollisionEventFlags;
    use crate::core::ENEMY_ATTACK_GROUP;

    fn damage_app() -> App {
        let mut app = App::new();
        app.init_resource::<ControllerTuning>()
            .add_event::<CollisionEvent>()
            .add_event::<PlayerHitEvent>()
            .add_systems(Update, enemy_attack_intake);
        app
    }

    fn spawn_player(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((FirstPersonPlayer, Health::new(100.0)))
            .id()
    }

    fn started(a: Entity, b: Entity) -> CollisionEvent {
        CollisionEvent::Started(a, b, CollisionEventFlags::empty())
    }

    fn player_hits(app: &App) -> Vec<PlayerHitEvent> {
        app.world()
            .resource::<Events<PlayerHitEvent>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }

    #[test]
    fn enemy_attack_hurts_and_reports_remaining_health() {
        let mut app = damage_app();
        let player = spawn_player(&mut app);
        let hitbox = app
            .world_mut()
            .spawn(CollisionGroups::new(ENEMY_ATTACK_GROUP, Group::ALL))
            .id();

        app.world_mut().send_event(started(hitbox, player));
        app.update();

        let hits = player_hits(&app);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity, player);
        assert_eq!(hits[0].amount, 20.0);
        assert_eq!(hits[0].remaining_health, Some(80.0));
        assert_eq!(app.world().get::<Health>(player).map(|h| h.current), Some(80.0));
    }

    #[test]
    fn second_contact_inside_invulnerability_is_ignored() {
        let mut app = damage_app();
        let player = spawn_player(&mut app);
        let hitbox = app
            .world_mut()
            .spawn(CollisionGroups::new(ENEMY_ATTACK_GROUP, Group::ALL))
            .id();

        app.world_mut().send_event(started(player, hitbox));
        app.world_mut().send_event(started(hitbox, player));
        app.update();

        assert_eq!(player_hits(&app).len(), 1);
        assert_eq!(app.world().get::<Health>(player).map(|h| h.current), Some(80.0));
    }

    #[test]
    fn non_attack_colliders_do_no_damage() {
        let mut app = damage_app();
        let player = spawn_player(&mut app);
        let wall = app
            .world_mut()
            .spawn(CollisionGroups::new(ENVIRONMENT_GROUP, Group::ALL))
            .id();
        let ungrouped = app.world_mut().spawn_empty().id();

        app.world_mut().send_event(started(player, wall));
        app.world_mut().send_event(started(ungrouped, player));
        app.update();

        assert!(player_hits(&app).is_empty());
        assert_eq!(app.world().get::<Health>(player).map(|h| h.current), Some(100.0));
    }

    fn charge_app() -> App {
        let mut app = App::new();
        app.init_resource::<ControllerTuning>()
            .add_event::<ProjectileHitEvent>()
            .add_systems(Update, accumulate_charge);
        app
    }

    #[test]
    fn only_target_hits_build_charge() {
        let mut app = charge_app();
        let shooter = app.world_mut().spawn(SecondaryCharge::new(100.0)).id();
        let target = app.world_mut().spawn(ShootTarget).id();
        let scenery = app.world_mut().spawn_empty().id();

        app.world_mut().send_event(ProjectileHitEvent { shooter, target });
        app.world_mut().send_event(ProjectileHitEvent {
            shooter,
            target: scenery,
        });
        app.update();

        let charge = app.world().get::<SecondaryCharge>(shooter).map(|c| c.current);
        assert_eq!(charge, Some(10.0));
    }

    #[test]
    fn charge_stops_at_maximum() {
        let mut app = charge_app();
        let shooter = app.world_mut().spawn(SecondaryCharge::new(25.0)).id();
        let target = app.world_mut().spawn(ShootTarget).id();

        for _ in 0..4 {
            app.world_mut().send_event(ProjectileHitEvent { shooter, target });
        }
        app.update();

        let charge = app.world().get::<SecondaryCharge>(shooter);
        assert!(charge.is_some_and(|c| c.is_full() && c.current == 25.0));
    }
}
