//! The room: floor, walls, traps, the human and the roomba.

use engine_core::{MeshPose, Name, Transform};
use glam::{Vec2, Vec3};
use hecs::{Entity, World};
use physics::{BodyMaterial, CollisionGroup, PhysicsBody, PhysicsWorld};

use crate::outcome::{OutcomeRegion, RegionKind, PLAYER_RADIUS};

pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.82, 0.0);

/// Where the rat starts every round.
pub const PLAYER_START: Vec3 = Vec3::new(-6.0, 0.5, -6.0);
const PLAYER_DAMPING: f32 = 0.6;
const PLAYER_MATERIAL: BodyMaterial = BodyMaterial {
    mass: 1.0,
    friction: 0.2,
    restitution: 0.1,
};

/// Centre and full size of each wall.
const WALLS: [(Vec3, Vec3); 4] = [
    (Vec3::new(0.0, 1.0, -8.0), Vec3::new(16.0, 2.0, 0.5)),
    (Vec3::new(0.0, 1.0, 8.0), Vec3::new(16.0, 2.0, 0.5)),
    (Vec3::new(-8.0, 1.0, 0.0), Vec3::new(0.5, 2.0, 16.0)),
    (Vec3::new(8.0, 1.0, 0.0), Vec3::new(0.5, 2.0, 16.0)),
];

pub const TRAP_POSITIONS: [Vec3; 3] = [
    Vec3::new(0.0, 0.25, 0.0),
    Vec3::new(-3.0, 0.25, 4.0),
    Vec3::new(4.0, 0.25, -3.0),
];
const TRAP_HALF_EXTENTS: Vec3 = Vec3::new(0.5, 0.1, 0.5);

pub const GOAL_POSITION: Vec3 = Vec3::new(6.0, 0.7, 6.0);
const GOAL_RADIUS: f32 = 0.6;
const GOAL_HALF_HEIGHT: f32 = 0.7;

pub const HAZARD_HEIGHT: f32 = 0.15;
const HAZARD_HALF_EXTENTS: Vec3 = Vec3::new(0.5, 0.15, 0.5);

/// The roomba's clockwise square, in XZ.
pub fn patrol_route() -> Vec<Vec2> {
    vec![
        Vec2::new(4.0, 4.0),
        Vec2::new(-4.0, 4.0),
        Vec2::new(-4.0, -4.0),
        Vec2::new(4.0, -4.0),
    ]
}

/// Lift an XZ point onto the roomba's driving height.
pub fn hazard_position(xz: Vec2) -> Vec3 {
    Vec3::new(xz.x, HAZARD_HEIGHT, xz.y)
}

/// Handles to the entities gameplay touches.
#[derive(Debug, Clone)]
pub struct Room {
    pub player: Entity,
    pub traps: Vec<Entity>,
    pub hazard: Entity,
    pub goal: Entity,
}

impl Room {
    /// Create every body and scene entity. `hazard_start` is the first patrol waypoint.
    pub fn build(physics: &mut PhysicsWorld, world: &mut World, hazard_start: Vec2) -> Self {
        physics.add_ground_plane();
        for (center, size) in WALLS {
            physics.add_static_cuboid(center, size * 0.5);
        }

        let body = physics.add_dynamic_body(PLAYER_START, PLAYER_DAMPING);
        let collider = physics.add_sphere_collider(
            body,
            PLAYER_RADIUS,
            PLAYER_MATERIAL,
            CollisionGroup::interaction(CollisionGroup::player()),
        );
        let player = world.spawn((
            Name("rat"),
            Transform::from_position(PLAYER_START),
            PhysicsBody::with_collider(body, collider),
            MeshPose::pinned(PLAYER_START.y).facing_velocity(),
        ));

        let traps = TRAP_POSITIONS
            .iter()
            .map(|&pos| {
                let body = physics.add_static_body(pos);
                let collider = physics.add_box_collider(
                    body,
                    TRAP_HALF_EXTENTS,
                    CollisionGroup::interaction(CollisionGroup::prop()),
                );
                world.spawn((
                    Name("trap"),
                    Transform::from_position(pos),
                    PhysicsBody::with_collider(body, collider),
                    OutcomeRegion::new(RegionKind::Trap, TRAP_HALF_EXTENTS),
                ))
            })
            .collect();

        let body = physics.add_static_body(GOAL_POSITION);
        let collider = physics.add_cylinder_collider(
            body,
            GOAL_HALF_HEIGHT,
            GOAL_RADIUS,
            CollisionGroup::interaction(CollisionGroup::prop()),
        );
        let goal = world.spawn((
            Name("human"),
            Transform::from_position(GOAL_POSITION),
            PhysicsBody::with_collider(body, collider),
            OutcomeRegion::new(
                RegionKind::Goal,
                Vec3::new(GOAL_RADIUS, GOAL_HALF_HEIGHT, GOAL_RADIUS),
            ),
        ));

        let start = hazard_position(hazard_start);
        let body = physics.add_kinematic_body(start);
        let collider = physics.add_box_collider(
            body,
            HAZARD_HALF_EXTENTS,
            CollisionGroup::interaction(CollisionGroup::hazard()),
        );
        let hazard = world.spawn((
            Name("roomba"),
            Transform::from_position(start),
            PhysicsBody::with_collider(body, collider),
            MeshPose::pinned(HAZARD_HEIGHT),
            OutcomeRegion::new(RegionKind::Hazard, HAZARD_HALF_EXTENTS),
        ));

        log::info!(
            "Room built: {} traps, goal at {:?}, roomba at {:?}",
            TRAP_POSITIONS.len(),
            GOAL_POSITION,
            start
        );

        Self {
            player,
            traps,
            hazard,
            goal,
        }
    }
}
