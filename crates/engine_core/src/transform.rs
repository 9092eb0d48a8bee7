//! Transform component and utilities for spatial positioning.

use glam::{Quat, Vec3};

/// A 3D pose: position plus rotation. Props in the room are never scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Rotation about Y in radians, measured from +Z towards +X.
    pub fn yaw(&self) -> f32 {
        let facing = self.rotation * Vec3::Z;
        facing.x.atan2(facing.z)
    }

    /// Turn to face the planar part of `velocity`.
    ///
    /// Yaw is `atan2(vx, vz)`, so a body at rest faces +Z.
    pub fn face_planar_velocity(&mut self, velocity: Vec3) {
        self.rotation = Quat::from_rotation_y(velocity.x.atan2(velocity.z));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_rest_points_along_z() {
        let mut t = Transform::from_position(Vec3::new(1.0, 0.5, 2.0));
        t.face_planar_velocity(Vec3::ZERO);
        assert!(t.yaw().abs() < 1e-6);
        assert_eq!(t.position, Vec3::new(1.0, 0.5, 2.0));
    }

    #[test]
    fn facing_positive_x_is_quarter_turn() {
        let mut t = Transform::default();
        t.face_planar_velocity(Vec3::new(3.0, -9.0, 0.0));
        assert!((t.yaw() - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }
}
