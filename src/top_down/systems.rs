//! Top-down controller systems.
//!
//! Input is sampled every frame; everything else runs on the fixed physics
//! tick in this order: crosshair, fire, movement, weapon aim, facing.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::controller::{movement_velocity, spread_shot, weapon_rotation};
use crate::core::{Arena, HitOutcome, PlayerHitEvent, TopDownDamageEvent};
use crate::projectile::spawn_projectile;
use crate::tuning::ControllerTuning;

/// Size of a top-down bullet sprite in world units.
const BULLET_SPRITE_SIZE: Vec2 = Vec2::new(0.25, 0.1);

/// System set ordering for the fixed tick.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TopDownSet {
    Aim,
    Fire,
    Move,
    Face,
}

/// Configure top-down controller systems.
pub fn setup_top_down_systems(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            TopDownSet::Aim,
            TopDownSet::Fire,
            TopDownSet::Move,
            TopDownSet::Face,
        )
            .chain()
            .run_if(in_state(Arena::TopDown)),
    )
    .add_systems(OnEnter(Arena::TopDown), hide_cursor)
    .add_systems(OnExit(Arena::TopDown), show_cursor)
    .add_systems(
        PreUpdate,
        sample_input
            .after(bevy::input::InputSystem)
            .run_if(in_state(Arena::TopDown)),
    )
    .add_systems(FixedUpdate, update_crosshair.in_set(TopDownSet::Aim))
    .add_systems(FixedUpdate, fire_machine_gun.in_set(TopDownSet::Fire))
    .add_systems(FixedUpdate, apply_movement.in_set(TopDownSet::Move))
    .add_systems(
        FixedUpdate,
        (aim_weapon, update_facing).chain().in_set(TopDownSet::Face),
    )
    .add_systems(
        Update,
        (tick_invulnerability, damage_zone_contacts, handle_damage)
            .chain()
            .run_if(in_state(Arena::TopDown)),
    );
}

/// Hide the OS cursor; the crosshair replaces it.
fn hide_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.visible = false;
    }
}

fn show_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.visible = true;
    }
}

/// Read keyboard, mouse button, and cursor into the player's input component.
fn sample_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut player_query: Query<&mut TopDownInput, With<TopDownPlayer>>,
) {
    let Ok(mut input) = player_query.get_single_mut() else {
        return;
    };

    let mut axis = Vec2::ZERO;
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        axis.y += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        axis.y -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis.x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis.x += 1.0;
    }
    input.move_axis = axis;

    input.fire_level = if mouse.pressed(MouseButton::Left) { 1.0 } else { 0.0 };

    // Keep the last position while the cursor is outside the window
    if let Some(cursor) = window_query
        .get_single()
        .ok()
        .and_then(|window| window.cursor_position())
    {
        input.pointer = Some(cursor);
    }
}

/// Project the pointer into the world and move the crosshair there.
fn update_crosshair(
    player_query: Query<&TopDownInput, With<TopDownPlayer>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<TopDownCamera>>,
    mut crosshair_query: Query<&mut Transform, With<Crosshair>>,
) {
    let Ok(input) = player_query.get_single() else {
        return;
    };
    let Some(pointer) = input.pointer else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let Ok(mut crosshair) = crosshair_query.get_single_mut() else {
        return;
    };

    if let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, pointer) {
        crosshair.translation.x = world_pos.x;
        crosshair.translation.y = world_pos.y;
    }
}

/// Fire one spread bullet per tick while the trigger is held and the gun is ready.
fn fire_machine_gun(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<ControllerTuning>,
    mut player_query: Query<(Entity, &TopDownInput, &mut MachineGun), With<TopDownPlayer>>,
    origin_query: Query<&GlobalTransform, With<ProjectileOrigin>>,
) {
    let Ok((player, input, mut gun)) = player_query.get_single_mut() else {
        return;
    };
    let config = &tuning.top_down;

    if !gun.tick(time.delta_secs(), input.fire_level, config.fire_interval) {
        return;
    }

    let Ok(origin) = origin_query.get_single() else {
        return;
    };

    let (request, deviation) = spread_shot(
        &origin.compute_transform(),
        config.spread_degrees,
        config.bullet_speed,
        config.bullet_damage as f32,
        &mut rand::thread_rng(),
    );
    debug!("Machine gun shot, spread {:.2} degrees", deviation);

    spawn_projectile(
        &mut commands,
        &request,
        player,
        config.bullet_lifetime,
        Sprite::from_color(Color::srgb(1.0, 0.85, 0.3), BULLET_SPRITE_SIZE),
    );
}

/// Set the body velocity straight from input, no acceleration ramp.
fn apply_movement(
    tuning: Res<ControllerTuning>,
    mut player_query: Query<(&TopDownInput, &mut Velocity), With<TopDownPlayer>>,
) {
    let Ok((input, mut velocity)) = player_query.get_single_mut() else {
        return;
    };

    let planar = movement_velocity(input.move_axis, tuning.top_down.speed_max);
    velocity.linvel = planar.extend(0.0);
}

/// Turn the weapon root toward the crosshair.
fn aim_weapon(
    crosshair_query: Query<&Transform, (With<Crosshair>, Without<WeaponRoot>)>,
    mut root_query: Query<(&GlobalTransform, &mut Transform), With<WeaponRoot>>,
) {
    let Ok(crosshair) = crosshair_query.get_single() else {
        return;
    };
    let Ok((root_global, mut root_transform)) = root_query.get_single_mut() else {
        return;
    };

    if let Some(rotation) = weapon_rotation(root_global.translation(), crosshair.translation) {
        root_transform.rotation = rotation;
    }
}

/// Derive the facing output from aim and body velocity.
fn update_facing(
    crosshair_query: Query<&Transform, With<Crosshair>>,
    root_query: Query<&GlobalTransform, With<WeaponRoot>>,
    mut player_query: Query<(&Velocity, &mut FacingState), With<TopDownPlayer>>,
) {
    let Ok(crosshair) = crosshair_query.get_single() else {
        return;
    };
    let Ok(root) = root_query.get_single() else {
        return;
    };
    let Ok((velocity, mut facing)) = player_query.get_single_mut() else {
        return;
    };

    let to_crosshair = crosshair.translation.truncate() - root.translation().truncate();
    *facing = FacingState::from_motion(to_crosshair, velocity.linvel.truncate());
}

fn tick_invulnerability(time: Res<Time>, mut query: Query<&mut DamageIntake>) {
    for mut intake in query.iter_mut() {
        intake.tick(time.delta_secs());
    }
}

/// Turn player contacts with damage zones into damage requests.
fn damage_zone_contacts(
    mut collision_events: EventReader<CollisionEvent>,
    player_query: Query<Entity, With<TopDownPlayer>>,
    zone_query: Query<&DamageZone>,
    mut damage_events: EventWriter<TopDownDamageEvent>,
) {
    let Ok(player) = player_query.get_single() else {
        collision_events.clear();
        return;
    };

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

        if let Ok(zone) = zone_query.get(other) {
            damage_events.send(TopDownDamageEvent {
                amount: zone.amount,
            });
        }
    }
}

/// Apply damage requests sent to the top-down player.
fn handle_damage(
    tuning: Res<ControllerTuning>,
    mut damage_events: EventReader<TopDownDamageEvent>,
    mut player_query: Query<(Entity, &mut DamageIntake), With<TopDownPlayer>>,
    mut hit_events: EventWriter<PlayerHitEvent>,
) {
    let Ok((player, mut intake)) = player_query.get_single_mut() else {
        damage_events.clear();
        return;
    };

    for event in damage_events.read() {
        if intake.take_damage(event.amount, tuning.top_down.i_frames) == HitOutcome::Registered {
            info!("Player took {} damage!", event.amount);
            hit_events.send(PlayerHitEvent {
                entity: player,
                amount: event.amount as f32,
                remaining_health: None,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

    fn damage_app() -> App {
        let mut app = App::new();
        app.init_resource::<ControllerTuning>()
            .add_event::<CollisionEvent>()
            .add_event::<TopDownDamageEvent>()
            .add_event::<PlayerHitEvent>()
            .add_systems(Update, (damage_zone_contacts, handle_damage).chain());
        app
    }

    fn spawn_player(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((TopDownPlayer, DamageIntake::default()))
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

    fn hits_taken(app: &App, player: Entity) -> Option<u32> {
        app.world().get::<DamageIntake>(player).map(|d| d.hits_taken)
    }

    #[test]
    fn registered_hit_is_reported_without_health() {
        let mut app = damage_app();
        let player = spawn_player(&mut app);

        app.world_mut().send_event(TopDownDamageEvent { amount: 5 });
        app.update();

        let hits = player_hits(&app);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity, player);
        assert_eq!(hits[0].amount, 5.0);
        assert_eq!(hits[0].remaining_health, None);
    }

    #[test]
    fn burst_of_hits_registers_once_but_negative_always_lands() {
        let mut app = damage_app();
        let player = spawn_player(&mut app);

        for amount in [5, 5, -1, 0] {
            app.world_mut().send_event(TopDownDamageEvent { amount });
        }
        app.update();

        let amounts: Vec<f32> = player_hits(&app).iter().map(|hit| hit.amount).collect();
        assert_eq!(amounts, vec![5.0, -1.0]);
        assert_eq!(hits_taken(&app, player), Some(2));
    }

    #[test]
    fn damage_zone_contact_hurts_player() {
        let mut app = damage_app();
        let player = spawn_player(&mut app);
        let zone = app.world_mut().spawn(DamageZone { amount: 7 }).id();

        app.world_mut().send_event(started(zone, player));
        app.update();

        let hits = player_hits(&app);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].amount, 7.0);
        assert_eq!(hits_taken(&app, player), Some(1));
    }

    #[test]
    fn contacts_with_other_colliders_do_nothing() {
        let mut app = damage_app();
        let player = spawn_player(&mut app);
        let wall = app.world_mut().spawn_empty().id();
        let zone = app.world_mut().spawn(DamageZone { amount: 7 }).id();
        let bystander = app.world_mut().spawn_empty().id();

        app.world_mut().send_event(started(player, wall));
        app.world_mut().send_event(started(zone, bystander));
        app.update();

        assert!(player_hits(&app).is_empty());
        assert_eq!(hits_taken(&app, player), Some(0));
    }
}
