//! Bullet spawning, expiry, and contact resolution.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::core::{player_projectile_groups, ProjectileHitEvent};
use crate::world::ArenaEntity;

/// Bullet collider radius.
const BULLET_RADIUS: f32 = 0.1;

/// Spawn a free-flying bullet from a spawn request.
///
/// `visual` supplies whatever the arena renders bullets with (a sprite in
/// 2D, a mesh in 3D).
pub fn spawn_projectile(
    commands: &mut Commands,
    request: &ProjectileSpawnRequest,
    shooter: Entity,
    lifetime: f32,
    visual: impl Bundle,
) -> Entity {
    commands
        .spawn((
            PlayerBullet {
                shooter,
                damage: request.damage,
            },
            Lifetime::from_seconds(lifetime),
            ArenaEntity,
            Transform::from_translation(request.translation).with_rotation(request.rotation),
            RigidBody::Dynamic,
            Collider::ball(BULLET_RADIUS),
            Sensor,
            GravityScale(0.0),
            Ccd::enabled(),
            Velocity::linear(request.velocity),
            player_projectile_groups(),
            ActiveEvents::COLLISION_EVENTS,
            visual,
        ))
        .id()
}

/// Despawn anything whose lifetime has run out.
pub fn expire_lifetimes(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Lifetime)>,
) {
    for (entity, mut lifetime) in query.iter_mut() {
        if lifetime.0.tick(time.delta()).finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Report bullet contacts and remove the bullet.
///
/// Each bullet reports at most one hit, even if it touched several colliders
/// in the same frame.
pub fn resolve_bullet_contacts(
    mut commands: Commands,
    mut collision_events: EventReader<CollisionEvent>,
    bullet_query: Query<&PlayerBullet>,
    mut hit_events: EventWriter<ProjectileHitEvent>,
) {
    let mut spent = Vec::new();

    for event in collision_events.read() {
        let CollisionEvent::Started(a, b, _) = *event else {
            continue;
        };

        let (bullet_entity, bullet, target) = if let Ok(bullet) = bullet_query.get(a) {
            (a, bullet, b)
        } else if let Ok(bullet) = bullet_query.get(b) {
            (b, bullet, a)
        } else {
            continue;
        };

        if target == bullet.shooter || spent.contains(&bullet_entity) {
            continue;
        }

        hit_events.send(ProjectileHitEvent {
            shooter: bullet.shooter,
            target,
        });
        spent.push(bullet_entity);
    }

    for entity in spent {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

    fn contact_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_event::<CollisionEvent>()
            .add_event::<ProjectileHitEvent>()
            .add_systems(Update, (resolve_bullet_contacts, expire_lifetimes).chain());
        app
    }

    fn spawn_bullet(app: &mut App, shooter: Entity, lifetime: f32) -> Entity {
        app.world_mut()
            .spawn((
                PlayerBullet {
                    shooter,
                    damage: 1.0,
                },
                Lifetime::from_seconds(lifetime),
            ))
            .id()
    }

    fn started(a: Entity, b: Entity) -> CollisionEvent {
        CollisionEvent::Started(a, b, CollisionEventFlags::empty())
    }

    fn hits(app: &App) -> Vec<ProjectileHitEvent> {
        app.world()
            .resource::<Events<ProjectileHitEvent>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }

    #[test]
    fn bullet_reports_one_hit_per_frame() {
        let mut app = contact_app();
        let shooter = app.world_mut().spawn_empty().id();
        let first = app.world_mut().spawn_empty().id();
        let second = app.world_mut().spawn_empty().id();
        let bullet = spawn_bullet(&mut app, shooter, 10.0);

        app.world_mut().send_event(started(bullet, first));
        app.world_mut().send_event(started(second, bullet));
        app.update();

        let hits = hits(&app);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].shooter, shooter);
        assert_eq!(hits[0].target, first);
        assert!(app.world().get_entity(bullet).is_err());
    }

    #[test]
    fn bullet_ignores_its_shooter() {
        let mut app = contact_app();
        let shooter = app.world_mut().spawn_empty().id();
        let bullet = spawn_bullet(&mut app, shooter, 10.0);

        app.world_mut().send_event(started(bullet, shooter));
        app.update();

        assert!(hits(&app).is_empty());
        assert!(app.world().get_entity(bullet).is_ok());
    }

    #[test]
    fn contacts_without_a_bullet_are_skipped() {
        let mut app = contact_app();
        let a = app.world_mut().spawn_empty().id();
        let b = app.world_mut().spawn_empty().id();

        app.world_mut().send_event(started(a, b));
        app.update();

        assert!(hits(&app).is_empty());
    }

    #[test]
    fn expiring_bullet_that_hits_is_removed_once() {
        let mut app = contact_app();
        let shooter = app.world_mut().spawn_empty().id();
        let target = app.world_mut().spawn_empty().id();
        // Zero lifetime finishes on the first tick
        let bullet = spawn_bullet(&mut app, shooter, 0.0);

        app.world_mut().send_event(started(bullet, target));
        app.update();

        assert_eq!(hits(&app).len(), 1);
        assert!(app.world().get_entity(bullet).is_err());
    }

    #[test]
    fn lifetime_runs_out_without_contact() {
        let mut app = contact_app();
        let shooter = app.world_mut().spawn_empty().id();
        let bullet = spawn_bullet(&mut app, shooter, 0.0);

        app.update();

        assert!(hits(&app).is_empty());
        assert!(app.world().get_entity(bullet).is_err());
    }
}
