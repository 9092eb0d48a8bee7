//! Collision groups, body handles and proximity tests.

use glam::Vec3;
use rapier3d::prelude::*;

/// Collision groups for different entity types.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static environment (floor, walls)
    Environment = 1 << 0,
    /// The rat
    Player = 1 << 1,
    /// The patrolling roomba
    Hazard = 1 << 2,
    /// Traps and the goal
    Prop = 1 << 3,
}

impl CollisionGroup {
    fn bits(groups: &[CollisionGroup]) -> Group {
        Group::from_bits_retain(groups.iter().fold(0, |acc, g| acc | *g as u32))
    }

    /// Environment collides with everything.
    pub fn environment() -> (Group, Group) {
        (Self::bits(&[Self::Environment]), Group::ALL)
    }

    /// The player is blocked by walls, the hazard and props.
    pub fn player() -> (Group, Group) {
        (
            Self::bits(&[Self::Player]),
            Self::bits(&[Self::Environment, Self::Hazard, Self::Prop]),
        )
    }

    /// The hazard drives through walls and props; only the player reacts to it.
    pub fn hazard() -> (Group, Group) {
        (Self::bits(&[Self::Hazard]), Self::bits(&[Self::Player]))
    }

    pub fn prop() -> (Group, Group) {
        (
            Self::bits(&[Self::Prop]),
            Self::bits(&[Self::Environment, Self::Player]),
        )
    }

    /// Interaction groups ready to hand to a collider builder.
    pub fn interaction(pair: (Group, Group)) -> InteractionGroups {
        InteractionGroups::new(pair.0, pair.1)
    }
}

/// Component linking a scene entity to its physics handles.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub rigid_body: RigidBodyHandle,
    pub collider: Option<ColliderHandle>,
}

impl PhysicsBody {
    pub fn with_collider(rigid_body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self {
            rigid_body,
            collider: Some(collider),
        }
    }
}

/// Squared distance from `point` to an axis-aligned box centred on `center`.
pub fn distance_squared_to_aabb(point: Vec3, center: Vec3, half_extents: Vec3) -> f32 {
    let outside = ((point - center).abs() - half_extents).max(Vec3::ZERO);
    outside.length_squared()
}

/// Sphere vs axis-aligned box overlap. Touching exactly at `radius` is not an overlap.
pub fn sphere_intersects_aabb(
    sphere_center: Vec3,
    radius: f32,
    box_center: Vec3,
    half_extents: Vec3,
) -> bool {
    distance_squared_to_aabb(sphere_center, box_center, half_extents) < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS: f32 = 0.5;
    const HALF: Vec3 = Vec3::new(0.5, 0.1, 0.5);
    const EPS: f32 = 1e-3;

    #[test]
    fn sphere_inside_box_intersects() {
        assert!(sphere_intersects_aabb(Vec3::ZERO, RADIUS, Vec3::ZERO, HALF));
        assert_eq!(distance_squared_to_aabb(Vec3::ZERO, Vec3::ZERO, HALF), 0.0);
    }

    #[test]
    fn boundary_along_x() {
        let center = Vec3::new(2.0, 0.0, -1.0);
        let near = center + Vec3::X * (HALF.x + RADIUS - EPS);
        let far = center - Vec3::X * (HALF.x + RADIUS + EPS);
        assert!(sphere_intersects_aabb(near, RADIUS, center, HALF));
        assert!(!sphere_intersects_aabb(far, RADIUS, center, HALF));
    }

    #[test]
    fn boundary_along_z() {
        let center = Vec3::new(-3.0, 0.25, 4.0);
        let near = center - Vec3::Z * (HALF.z + RADIUS - EPS);
        let far = center + Vec3::Z * (HALF.z + RADIUS + EPS);
        assert!(sphere_intersects_aabb(near, RADIUS, center, HALF));
        assert!(!sphere_intersects_aabb(far, RADIUS, center, HALF));
    }

    #[test]
    fn corner_uses_euclidean_distance() {
        // Both axes 0.4 outside the faces: sqrt(0.32) > 0.5.
        let p = Vec3::new(HALF.x + 0.4, 0.0, HALF.z + 0.4);
        assert!(!sphere_intersects_aabb(p, RADIUS, Vec3::ZERO, HALF));
        let q = Vec3::new(HALF.x + 0.3, 0.0, HALF.z + 0.3);
        assert!(sphere_intersects_aabb(q, RADIUS, Vec3::ZERO, HALF));
    }

    #[test]
    fn player_group_sees_hazard_but_hazard_ignores_walls() {
        let (player_member, player_filter) = CollisionGroup::player();
        let (hazard_member, hazard_filter) = CollisionGroup::hazard();
        let (env_member, _) = CollisionGroup::environment();
        assert!(player_filter.contains(hazard_member));
        assert!(hazard_filter.contains(player_member));
        assert!(!hazard_filter.contains(env_member));
    }
}
