//! Common ECS components used across the engine.

/// Human-readable label for a scene entity, used when reporting outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Name(pub &'static str);

/// How a mesh follows its physics body when poses are synced.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeshPose {
    /// Pin the mesh to this height instead of the body's Y.
    pub fixed_height: Option<f32>,
    /// Yaw the mesh towards the body's planar velocity.
    pub face_velocity: bool,
}

impl MeshPose {
    /// Follow the body but keep the mesh at `height`.
    pub fn pinned(height: f32) -> Self {
        Self {
            fixed_height: Some(height),
            face_velocity: false,
        }
    }

    pub fn facing_velocity(mut self) -> Self {
        self.face_velocity = true;
        self
    }
}
