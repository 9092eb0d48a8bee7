//! HUD state handed to the presentation layer: dash readout, message overlay,
//! restart control and viewport projection.

use crate::locomotion::DashState;

/// Affirmative green, `#2ecc40`.
pub const READY_COLOR: [f32; 4] = [0.180, 0.800, 0.251, 1.0];
/// Alert red, `#ff3333`.
pub const COOLDOWN_COLOR: [f32; 4] = [1.0, 0.200, 0.200, 1.0];

pub const DEATH_MESSAGE: &str = "You Died!";

/// Dash cooldown line.
#[derive(Debug, Clone, PartialEq)]
pub struct DashReadout {
    pub text: String,
    pub color: [f32; 4],
}

impl DashReadout {
    pub fn from_state(dash: &DashState) -> Self {
        if dash.can_dash {
            Self {
                text: "Dash Ready".to_string(),
                color: READY_COLOR,
            }
        } else {
            Self {
                text: format!("Dash: {:.1}s", dash.cooldown_remaining),
                color: COOLDOWN_COLOR,
            }
        }
    }

    /// Colour as a CSS-style `#rrggbb` string.
    pub fn hex(&self) -> String {
        let [r, g, b, _] = self.color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Everything drawn over the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub dash: DashReadout,
    /// Centre-screen message; keeps its text while hidden.
    pub message: String,
    pub message_visible: bool,
    pub restart_visible: bool,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            dash: DashReadout::from_state(&DashState::ready()),
            message: String::new(),
            message_visible: false,
            restart_visible: false,
        }
    }
}

impl Hud {
    /// Update the dash line. The title bar cannot show colour, so colour
    /// flips are logged instead.
    pub fn refresh_dash(&mut self, dash: &DashState) {
        let readout = DashReadout::from_state(dash);
        if readout.color != self.dash.color {
            log::info!("Dash readout now {} ({})", readout.text, readout.hex());
        }
        self.dash = readout;
    }

    pub fn show_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.message_visible = true;
    }

    pub fn hide_message(&mut self) {
        self.message_visible = false;
    }

    /// End of round: message plus the restart control.
    pub fn show_outcome(&mut self, message: &str) {
        self.show_message(message);
        self.restart_visible = true;
    }

    /// Back to play: overlay and restart control hidden.
    pub fn clear_outcome(&mut self) {
        self.hide_message();
        self.restart_visible = false;
    }

    /// One-line summary, used as the window title.
    pub fn summary(&self) -> String {
        let mut line = format!("Rat Plague | {}", self.dash.text);
        if self.message_visible {
            line.push_str(" | ");
            line.push_str(&self.message);
        }
        if self.restart_visible {
            line.push_str(" | press R to restart");
        }
        line
    }
}

/// Render surface size and the fixed projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, fov_degrees: f32) -> Self {
        Self {
            width,
            height,
            fov_degrees,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Follow a window resize. Minimized windows report zero; keep the last size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.width = width;
            self.height = height;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_dash_reads_green() {
        let r = DashReadout::from_state(&DashState::ready());
        assert_eq!(r.text, "Dash Ready");
        assert_eq!(r.color, READY_COLOR);
    }

    #[test]
    fn cooling_dash_shows_one_decimal() {
        let dash = DashState {
            can_dash: false,
            cooldown_remaining: 2.34,
            elapsed_since_dash: 0.66,
        };
        let r = DashReadout::from_state(&dash);
        assert_eq!(r.text, "Dash: 2.3s");
        assert_eq!(r.color, COOLDOWN_COLOR);
    }

    #[test]
    fn readout_colours_match_css() {
        let ready = DashReadout::from_state(&DashState::ready());
        assert_eq!(ready.hex(), "#2ecc40");
        let cooling = DashReadout {
            text: String::new(),
            color: COOLDOWN_COLOR,
        };
        assert_eq!(cooling.hex(), "#ff3333");
    }

    #[test]
    fn refresh_follows_cooldown_colour() {
        let mut hud = Hud::default();
        let mut dash = DashState::ready();
        dash.can_dash = false;
        dash.cooldown_remaining = 2.5;
        hud.refresh_dash(&dash);
        assert_eq!(hud.dash.text, "Dash: 2.5s");
        assert_eq!(hud.dash.hex(), "#ff3333");
        hud.refresh_dash(&DashState::ready());
        assert_eq!(hud.dash.hex(), "#2ecc40");
    }

    #[test]
    fn outcome_toggles_overlay_and_restart() {
        let mut hud = Hud::default();
        hud.show_outcome(DEATH_MESSAGE);
        assert!(hud.message_visible && hud.restart_visible);
        assert!(hud.summary().contains("You Died!"));
        hud.clear_outcome();
        assert!(!hud.message_visible && !hud.restart_visible);
        assert_eq!(hud.summary(), "Rat Plague | Dash Ready");
    }

    #[test]
    fn viewport_ignores_zero_size() {
        let mut v = Viewport::new(1280, 720, 70.0);
        v.resize(0, 0);
        assert_eq!((v.width, v.height), (1280, 720));
        v.resize(800, 800);
        assert_eq!(v.aspect(), 1.0);
    }
}
