//! Collision layers shared by both arenas.

use bevy_rapier3d::prelude::*;

/// Walkable surfaces, probed by the ground check.
pub const GROUND_GROUP: Group = Group::GROUP_1;
/// Static scenery the beam raycast stops on.
pub const ENVIRONMENT_GROUP: Group = Group::GROUP_2;
/// The player body.
pub const PLAYER_GROUP: Group = Group::GROUP_3;
/// Bullets fired by the player.
pub const PLAYER_PROJECTILE_GROUP: Group = Group::GROUP_4;
/// Hitboxes and projectiles that hurt the player.
pub const ENEMY_ATTACK_GROUP: Group = Group::GROUP_10;

/// Groups for the player body: collides with everything but its own bullets.
pub fn player_groups() -> CollisionGroups {
    CollisionGroups::new(PLAYER_GROUP, Group::ALL.difference(PLAYER_PROJECTILE_GROUP))
}

/// Groups for player bullets: never hit the player or each other.
pub fn player_projectile_groups() -> CollisionGroups {
    CollisionGroups::new(
        PLAYER_PROJECTILE_GROUP,
        Group::ALL
            .difference(PLAYER_GROUP)
            .difference(PLAYER_PROJECTILE_GROUP),
    )
}

/// Whether a collider's memberships mark it as an enemy attack.
pub fn is_enemy_attack(groups: &CollisionGroups) -> bool {
    groups.memberships.contains(ENEMY_ATTACK_GROUP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_and_its_bullets_do_not_interact() {
        let player = player_groups();
        let bullet = player_projectile_groups();
        assert!(!player.filters.contains(bullet.memberships));
        assert!(!bullet.filters.contains(player.memberships));
    }

    #[test]
    fn enemy_attack_membership_is_detected() {
        let hazard = CollisionGroups::new(ENEMY_ATTACK_GROUP, Group::ALL);
        assert!(is_enemy_attack(&hazard));
        assert!(!is_enemy_attack(&player_groups()));
    }
}
