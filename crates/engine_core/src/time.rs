//! Time management for the game loop.

use std::time::{Duration, Instant};

/// Gameplay always advances by this step, whatever the wall-clock frame took.
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Measures wall-clock frames for diagnostics.
///
/// Simulation does not consume the measured delta: the frame loop hands
/// [`FIXED_TIMESTEP`] to the game once per redraw, so slow frames run the game
/// slower than real time instead of catching up.
#[derive(Debug)]
pub struct FrameClock {
    /// Time of the last tick.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Frames ticked since start.
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Mark the start of a new frame and return the fixed step to simulate.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.frame_count += 1;
        FIXED_TIMESTEP
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Simulated seconds so far; falls behind wall-clock time under slow frames.
    pub fn simulated_seconds(&self) -> f32 {
        self.frame_count as f32 * FIXED_TIMESTEP
    }

    /// Frames per second based on the last frame.
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_always_returns_fixed_step() {
        let mut clock = FrameClock::new();
        for _ in 0..3 {
            assert_eq!(clock.tick(), FIXED_TIMESTEP);
        }
        assert_eq!(clock.frame_count(), 3);
        assert!((clock.simulated_seconds() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn fresh_clock_reports_zero_fps() {
        let clock = FrameClock::new();
        assert_eq!(clock.fps(), 0.0);
        assert_eq!(clock.simulated_seconds(), 0.0);
    }
}
