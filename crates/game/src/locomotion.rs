//! Rat locomotion: held keys steer a force controller, Shift fires an impulse dash.

use glam::Vec3;

use crate::tuning::Tuning;

/// Ready/cooling readings below this count as zero. Absorbs float drift from
/// summing many small frame steps.
const COOLDOWN_EPSILON: f32 = 1e-4;

/// Movement keys currently held plus the latched dash request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub dash_requested: bool,
    /// Last nonzero movement direction; the dash goes this way.
    pub last_direction: Vec3,
}

impl Default for MoveInput {
    fn default() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            dash_requested: false,
            last_direction: Vec3::Z,
        }
    }
}

impl MoveInput {
    /// Normalized planar direction of the held keys, or zero.
    ///
    /// Forward is -Z, backward +Z, left -X, right +X.
    pub fn direction(&self) -> Vec3 {
        let mut dir = Vec3::ZERO;
        if self.forward {
            dir.z -= 1.0;
        }
        if self.backward {
            dir.z += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }

    /// Release every key and drop any pending dash. Direction memory is kept.
    pub fn clear_keys(&mut self) {
        self.forward = false;
        self.backward = false;
        self.left = false;
        self.right = false;
        self.dash_requested = false;
    }
}

/// Dash availability.
///
/// `can_dash` holds exactly when `cooldown_remaining` is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashState {
    pub can_dash: bool,
    pub cooldown_remaining: f32,
    pub elapsed_since_dash: f32,
}

impl Default for DashState {
    fn default() -> Self {
        Self::ready()
    }
}

impl DashState {
    pub fn ready() -> Self {
        Self {
            can_dash: true,
            cooldown_remaining: 0.0,
            elapsed_since_dash: 0.0,
        }
    }

    fn start_cooldown(&mut self, duration: f32) {
        self.can_dash = false;
        self.elapsed_since_dash = 0.0;
        self.cooldown_remaining = duration;
    }

    /// Advance the cooldown. No-op while the dash is ready.
    fn tick(&mut self, duration: f32, dt: f32) {
        if self.can_dash {
            return;
        }
        self.elapsed_since_dash += dt;
        self.cooldown_remaining = (duration - self.elapsed_since_dash).max(0.0);
        if self.cooldown_remaining <= COOLDOWN_EPSILON {
            self.can_dash = true;
            self.cooldown_remaining = 0.0;
        }
    }
}

/// What the controller wants done to the rat's body this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionCommand {
    pub force: Option<Vec3>,
    pub impulse: Option<Vec3>,
}

/// Turns [`MoveInput`] into forces and dashes.
#[derive(Debug, Clone)]
pub struct LocomotionController {
    pub input: MoveInput,
    pub dash: DashState,
    move_speed: f32,
    force_gain: f32,
    dash_impulse: f32,
    dash_cooldown: f32,
}

impl LocomotionController {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            input: MoveInput::default(),
            dash: DashState::ready(),
            move_speed: tuning.move_speed,
            force_gain: tuning.force_gain,
            dash_impulse: tuning.dash_impulse,
            dash_cooldown: tuning.dash_cooldown,
        }
    }

    /// Latch a dash request. Requests made while cooling down are dropped.
    pub fn request_dash(&mut self) {
        if self.dash.can_dash {
            self.input.dash_requested = true;
        }
    }

    /// Run one frame given the rat's current velocity.
    ///
    /// The steering force seeks the desired planar velocity instead of
    /// assigning it, so walls still stop the rat.
    pub fn update(&mut self, velocity: Vec3, dt: f32) -> LocomotionCommand {
        let mut command = LocomotionCommand::default();

        let dir = self.input.direction();
        if dir != Vec3::ZERO {
            self.input.last_direction = dir;
            let desired = dir * self.move_speed;
            let error = Vec3::new(desired.x - velocity.x, 0.0, desired.z - velocity.z);
            command.force = Some(error * self.force_gain);
        }

        self.dash.tick(self.dash_cooldown, dt);

        if self.input.dash_requested && self.dash.can_dash {
            let heading = self.input.last_direction.normalize_or_zero();
            command.impulse = Some(Vec3::new(heading.x, 0.0, heading.z) * self.dash_impulse);
            self.dash.start_cooldown(self.dash_cooldown);
            log::debug!("Dash towards {:?}", heading);
        }
        self.input.dash_requested = false;

        command
    }

    /// Back to a standing start: keys released, dash ready.
    pub fn reset(&mut self) {
        self.input.clear_keys();
        self.dash = DashState::ready();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Variant;
    use engine_core::FIXED_TIMESTEP;

    fn controller() -> LocomotionController {
        LocomotionController::new(&Variant::TopDown.tuning())
    }

    #[test]
    fn direction_is_unit_or_zero_with_expected_signs() {
        let mut input = MoveInput::default();
        // -1 = first key of the pair, 0 = neither, 1 = second key.
        for vertical in [-1, 0, 1] {
            for horizontal in [-1, 0, 1] {
                input.forward = vertical == -1;
                input.backward = vertical == 1;
                input.left = horizontal == -1;
                input.right = horizontal == 1;
                let dir = input.direction();
                if vertical == 0 && horizontal == 0 {
                    assert_eq!(dir, Vec3::ZERO);
                    continue;
                }
                assert!((dir.length() - 1.0).abs() < 1e-6);
                assert_eq!(dir.y, 0.0);
                assert_eq!(dir.z.signum() as i32 * (dir.z != 0.0) as i32, vertical);
                assert_eq!(dir.x.signum() as i32 * (dir.x != 0.0) as i32, horizontal);
            }
        }
    }

    #[test]
    fn no_keys_means_no_force_and_direction_kept() {
        let mut c = controller();
        c.input.last_direction = Vec3::NEG_X;
        let cmd = c.update(Vec3::new(1.0, 0.0, 1.0), FIXED_TIMESTEP);
        assert_eq!(cmd, LocomotionCommand::default());
        assert_eq!(c.input.last_direction, Vec3::NEG_X);
    }

    #[test]
    fn force_seeks_desired_planar_velocity() {
        let mut c = controller();
        c.input.right = true;
        let cmd = c.update(Vec3::new(3.0, -2.0, 1.0), FIXED_TIMESTEP);
        // desired (7, 0, 0); error (4, 0, -1); gain 8.
        assert_eq!(cmd.force, Some(Vec3::new(32.0, 0.0, -8.0)));
        assert_eq!(c.input.last_direction, Vec3::X);
    }

    #[test]
    fn dash_fires_only_when_ready() {
        let mut c = controller();
        c.input.forward = true;
        c.request_dash();
        let cmd = c.update(Vec3::ZERO, FIXED_TIMESTEP);
        assert_eq!(cmd.impulse, Some(Vec3::new(0.0, 0.0, -18.0)));
        assert!(!c.dash.can_dash);
        assert_eq!(c.dash.cooldown_remaining, 3.0);
        assert!(!c.input.dash_requested);

        c.request_dash();
        assert!(!c.input.dash_requested);
        let cmd = c.update(Vec3::ZERO, FIXED_TIMESTEP);
        assert_eq!(cmd.impulse, None);
    }

    #[test]
    fn dash_without_input_uses_remembered_direction() {
        let mut c = controller();
        c.request_dash();
        let cmd = c.update(Vec3::ZERO, FIXED_TIMESTEP);
        assert_eq!(cmd.impulse, Some(Vec3::new(0.0, 0.0, 18.0)));
        assert_eq!(cmd.force, None);
    }

    #[test]
    fn cooldown_recovers_after_three_seconds() {
        let mut c = controller();
        c.request_dash();
        c.update(Vec3::ZERO, FIXED_TIMESTEP);

        let ticks = (3.0 / FIXED_TIMESTEP).round() as usize;
        for i in 0..ticks {
            assert!(!c.dash.can_dash, "ready early at tick {i}");
            assert!(c.dash.cooldown_remaining > 0.0);
            c.update(Vec3::ZERO, FIXED_TIMESTEP);
        }
        assert!(c.dash.can_dash);
        assert_eq!(c.dash.cooldown_remaining, 0.0);
    }

    #[test]
    fn held_request_does_not_retrigger() {
        let mut c = controller();
        c.request_dash();
        c.update(Vec3::ZERO, FIXED_TIMESTEP);
        for _ in 0..200 {
            assert_eq!(c.update(Vec3::ZERO, FIXED_TIMESTEP).impulse, None);
        }
        assert!(c.dash.can_dash);
    }

    #[test]
    fn reset_readies_dash_and_releases_keys() {
        let mut c = controller();
        c.input.left = true;
        c.request_dash();
        c.update(Vec3::ZERO, FIXED_TIMESTEP);
        c.reset();
        assert_eq!(c.dash, DashState::ready());
        assert_eq!(c.input.direction(), Vec3::ZERO);
        assert_eq!(c.input.last_direction, Vec3::NEG_X);
    }
}
