//! Physics world management with Rapier3D.

use crate::collision::CollisionGroup;
use engine_core::{Vec3, FIXED_TIMESTEP};
use rapier3d::na::UnitQuaternion;
use rapier3d::prelude::*;

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Surface and mass parameters for a dynamic collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMaterial {
    pub mass: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for BodyMaterial {
    fn default() -> Self {
        Self {
            mass: 1.0,
            friction: 0.5,
            restitution: 0.0,
        }
    }
}

/// Main physics world containing all simulation state.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a new physics world with earth gravity.
    pub fn new() -> Self {
        Self::with_gravity(Vec3::new(0.0, -9.81, 0.0))
    }

    /// Create a world with the given gravity. Each step advances [`FIXED_TIMESTEP`].
    pub fn with_gravity(gravity: Vec3) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = FIXED_TIMESTEP;
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: to_vector(gravity),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Step the physics simulation once.
    ///
    /// Forces added since the previous step are consumed by this step and then
    /// cleared, so callers re-apply steering forces every frame.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );

        for (_, body) in self.rigid_body_set.iter_mut() {
            if body.is_dynamic() {
                body.reset_forces(false);
            }
        }
    }

    /// Add a dynamic rigid body and return its handle.
    pub fn add_dynamic_body(&mut self, position: Vec3, linear_damping: f32) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(to_vector(position))
            .linear_damping(linear_damping)
            .build();
        self.rigid_body_set.insert(rigid_body)
    }

    /// Add a kinematic rigid body moved by game logic.
    pub fn add_kinematic_body(&mut self, position: Vec3) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::kinematic_position_based()
            .translation(to_vector(position))
            .build();
        self.rigid_body_set.insert(rigid_body)
    }

    /// Add a static rigid body.
    pub fn add_static_body(&mut self, position: Vec3) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::fixed()
            .translation(to_vector(position))
            .build();
        self.rigid_body_set.insert(rigid_body)
    }

    /// Add a sphere collider with explicit mass and surface response.
    pub fn add_sphere_collider(
        &mut self,
        body_handle: RigidBodyHandle,
        radius: f32,
        material: BodyMaterial,
        groups: InteractionGroups,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::ball(radius)
            .mass(material.mass)
            .friction(material.friction)
            .restitution(material.restitution)
            .collision_groups(groups)
            .build();
        self.collider_set.insert_with_parent(collider, body_handle, &mut self.rigid_body_set)
    }

    /// Add a box collider to a rigid body.
    pub fn add_box_collider(
        &mut self,
        body_handle: RigidBodyHandle,
        half_extents: Vec3,
        groups: InteractionGroups,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .collision_groups(groups)
            .build();
        self.collider_set.insert_with_parent(collider, body_handle, &mut self.rigid_body_set)
    }

    /// Add an upright cylinder collider to a rigid body.
    pub fn add_cylinder_collider(
        &mut self,
        body_handle: RigidBodyHandle,
        half_height: f32,
        radius: f32,
        groups: InteractionGroups,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cylinder(half_height, radius)
            .collision_groups(groups)
            .build();
        self.collider_set.insert_with_parent(collider, body_handle, &mut self.rigid_body_set)
    }

    /// Add a ground plane collider (flat Y=0 half-space).
    pub fn add_ground_plane(&mut self) -> ColliderHandle {
        let collider = ColliderBuilder::halfspace(Vector::y_axis())
            .collision_groups(CollisionGroup::interaction(CollisionGroup::environment()))
            .build();
        self.collider_set.insert(collider)
    }

    /// Add a parentless static cuboid (walls). `translation` is the world centre.
    pub fn add_static_cuboid(&mut self, translation: Vec3, half_extents: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(to_vector(translation))
            .collision_groups(CollisionGroup::interaction(CollisionGroup::environment()))
            .build();
        self.collider_set.insert(collider)
    }

    /// Current world position of a body.
    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set
            .get(handle)
            .map(|body| to_vec3(body.translation()))
    }

    /// Current linear velocity of a body.
    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set.get(handle).map(|body| to_vec3(body.linvel()))
    }

    /// Set the target position of a kinematic body, reached on the next step.
    pub fn set_kinematic_position(&mut self, handle: RigidBodyHandle, position: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_next_kinematic_translation(to_vector(position));
        }
    }

    /// Teleport a body and put it at rest: no velocity, spin or pending force.
    pub fn reset_body(&mut self, handle: RigidBodyHandle, position: Vec3) {
        let Some(body) = self.rigid_body_set.get_mut(handle) else {
            log::warn!("reset_body: no body for {:?}", handle);
            return;
        };
        log::debug!(
            "Resetting body {:?} from {:?} to {:?}",
            handle,
            to_vec3(body.translation()),
            position
        );
        body.set_translation(to_vector(position), true);
        body.set_rotation(UnitQuaternion::identity(), true);
        body.set_linvel(Vector::zeros(), true);
        body.set_angvel(Vector::zeros(), true);
        body.reset_forces(true);
        if body.is_kinematic() {
            body.set_next_kinematic_translation(to_vector(position));
        }
    }

    /// Add a force to a dynamic body for the next step.
    pub fn apply_force(&mut self, handle: RigidBodyHandle, force: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.add_force(to_vector(force), true);
        }
    }

    /// Apply an impulse to a dynamic body.
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.apply_impulse(to_vector(impulse), true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_world() -> (PhysicsWorld, RigidBodyHandle) {
        let mut world = PhysicsWorld::with_gravity(Vec3::ZERO);
        let body = world.add_dynamic_body(Vec3::new(0.0, 1.0, 0.0), 0.0);
        world.add_sphere_collider(
            body,
            0.5,
            BodyMaterial::default(),
            CollisionGroup::interaction(CollisionGroup::player()),
        );
        world.step();
        (world, body)
    }

    #[test]
    fn impulse_changes_velocity_by_inverse_mass() {
        let (mut world, body) = ball_world();
        world.apply_impulse(body, Vec3::new(2.0, 0.0, 0.0));
        let v = world.body_velocity(body).unwrap();
        assert!((v.x - 2.0).abs() < 1e-3, "velocity {v:?}");
    }

    #[test]
    fn force_only_lasts_one_step() {
        let (mut world, body) = ball_world();
        world.apply_force(body, Vec3::new(60.0, 0.0, 0.0));
        world.step();
        let after_push = world.body_velocity(body).unwrap().x;
        assert!((after_push - 1.0).abs() < 1e-2, "velocity {after_push}");
        world.step();
        let coasting = world.body_velocity(body).unwrap().x;
        assert!((coasting - after_push).abs() < 1e-4);
    }

    #[test]
    fn kinematic_body_reaches_target_after_step() {
        let mut world = PhysicsWorld::new();
        let body = world.add_kinematic_body(Vec3::new(4.0, 0.15, 4.0));
        world.set_kinematic_position(body, Vec3::new(3.9, 0.15, 4.0));
        world.step();
        let p = world.body_position(body).unwrap();
        assert!((p - Vec3::new(3.9, 0.15, 4.0)).length() < 1e-5);
    }

    #[test]
    fn reset_body_clears_motion() {
        let (mut world, body) = ball_world();
        world.apply_impulse(body, Vec3::new(0.0, 0.0, 5.0));
        world.step();
        world.reset_body(body, Vec3::new(-6.0, 0.5, -6.0));
        assert_eq!(world.body_velocity(body), Some(Vec3::ZERO));
        assert_eq!(world.body_position(body), Some(Vec3::new(-6.0, 0.5, -6.0)));
    }

    #[test]
    fn missing_body_reads_as_none() {
        let (mut world, body) = ball_world();
        world.rigid_body_set.remove(
            body,
            &mut world.island_manager,
            &mut world.collider_set,
            &mut world.impulse_joint_set,
            &mut world.multibody_joint_set,
            true,
        );
        assert!(world.body_position(body).is_none());
        assert!(world.body_velocity(body).is_none());
        // Resetting a removed body is a logged no-op.
        world.reset_body(body, Vec3::ZERO);
    }
}
