//! Roomba patrol: constant-speed travel around a closed loop of XZ waypoints.

use glam::Vec2;

use crate::error::SetupError;

/// A looping route and progress along it.
#[derive(Debug, Clone)]
pub struct PatrolPath {
    waypoints: Vec<Vec2>,
    /// Waypoint the current leg started from; the leg heads to `index + 1`.
    index: usize,
    speed: f32,
    arrival_epsilon: f32,
}

impl PatrolPath {
    /// Build a route. Fails on an empty route or a non-positive speed or epsilon.
    pub fn new(waypoints: Vec<Vec2>, speed: f32, arrival_epsilon: f32) -> Result<Self, SetupError> {
        if waypoints.is_empty() {
            return Err(SetupError::EmptyPatrolPath);
        }
        if !(speed.is_finite() && speed > 0.0) {
            return Err(SetupError::InvalidPatrolSpeed(speed));
        }
        if !(arrival_epsilon.is_finite() && arrival_epsilon > 0.0) {
            return Err(SetupError::InvalidArrivalEpsilon(arrival_epsilon));
        }
        Ok(Self {
            waypoints,
            index: 0,
            speed,
            arrival_epsilon,
        })
    }

    /// Where the route begins.
    pub fn start(&self) -> Vec2 {
        self.waypoints[0]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn target_index(&self) -> usize {
        (self.index + 1) % self.waypoints.len()
    }

    pub fn target(&self) -> Vec2 {
        self.waypoints[self.target_index()]
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Restart the route from its first waypoint.
    pub fn rewind(&mut self) {
        self.index = 0;
    }

    /// Move `position` towards the target for `dt` seconds and return the new position.
    ///
    /// Never overshoots. Once within the arrival epsilon on both axes the
    /// position snaps exactly onto the waypoint and the next leg begins.
    pub fn advance(&mut self, position: Vec2, dt: f32) -> Vec2 {
        let target = self.target();
        let offset = target - position;
        let distance = offset.length();

        let mut next = position;
        if distance > 0.0 {
            let step = (self.speed * dt).min(distance);
            next += offset / distance * step;
        }

        let gap = (next - target).abs();
        if gap.x < self.arrival_epsilon && gap.y < self.arrival_epsilon {
            self.index = self.target_index();
            log::debug!("Roomba reached waypoint {} at {:?}", self.index, target);
            return target;
        }
        next
    }
}
