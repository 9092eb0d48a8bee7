//! Per-variant gameplay constants.

use serde::{Deserialize, Serialize};

/// Which build of the game is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    /// Overhead camera, primitive geometry, no loading phase.
    #[default]
    TopDown,
    /// Chase camera over loaded character models.
    ThirdPerson,
}

/// Numbers that differ between variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Top planar speed the rat steers towards (units/s).
    pub move_speed: f32,
    /// Proportional gain turning velocity error into force.
    pub force_gain: f32,
    pub dash_impulse: f32,
    /// Seconds between dashes.
    pub dash_cooldown: f32,
    pub patrol_speed: f32,
    /// Per-axis distance at which the roomba counts as arrived at a waypoint.
    pub arrival_epsilon: f32,
    pub win_message: &'static str,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Whether play waits on model loading.
    pub loads_assets: bool,
}

impl Variant {
    pub fn tuning(self) -> Tuning {
        match self {
            Variant::TopDown => Tuning {
                move_speed: 7.0,
                force_gain: 8.0,
                dash_impulse: 18.0,
                dash_cooldown: 3.0,
                patrol_speed: 2.0,
                arrival_epsilon: 0.1,
                win_message: "You Win!",
                fov_degrees: 70.0,
                loads_assets: false,
            },
            Variant::ThirdPerson => Tuning {
                move_speed: 4.5,
                force_gain: 8.0,
                dash_impulse: 10.0,
                dash_cooldown: 3.0,
                patrol_speed: 2.0,
                arrival_epsilon: 0.05,
                win_message: "You reached the human!",
                fov_degrees: 60.0,
                loads_assets: true,
            },
        }
    }
}
