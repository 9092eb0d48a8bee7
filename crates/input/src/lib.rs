//! Keyboard input: fixed key bindings and press/release transitions.

use std::collections::HashMap;

/// Something the player can ask the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Dash,
    Restart,
}

/// One key edge, already resolved to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEvent {
    pub action: Action,
    pub state: ElementState,
    /// OS auto-repeat of a held key.
    pub repeat: bool,
}

impl ActionEvent {
    pub fn is_press(&self) -> bool {
        self.state == ElementState::Pressed
    }

    /// A fresh press, not an auto-repeat.
    pub fn is_initial_press(&self) -> bool {
        self.is_press() && !self.repeat
    }
}

/// Maps physical keys to actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, Action>,
}

impl Default for KeyBindings {
    /// WASD to move, either Shift to dash, R or Enter to restart.
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(KeyCode::KeyW, Action::Forward);
        bindings.bind(KeyCode::KeyS, Action::Backward);
        bindings.bind(KeyCode::KeyA, Action::Left);
        bindings.bind(KeyCode::KeyD, Action::Right);
        bindings.bind(KeyCode::ShiftLeft, Action::Dash);
        bindings.bind(KeyCode::ShiftRight, Action::Dash);
        bindings.bind(KeyCode::KeyR, Action::Restart);
        bindings.bind(KeyCode::Enter, Action::Restart);
        bindings
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `key` to `action`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        if let Some(previous) = self.bindings.insert(key, action) {
            log::debug!("Rebound {:?} from {:?} to {:?}", key, previous, action);
        }
    }

    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    /// Resolve a raw key edge. Unbound keys yield `None`.
    pub fn resolve(&self, key: KeyCode, state: ElementState, repeat: bool) -> Option<ActionEvent> {
        self.action_for(key).map(|action| ActionEvent {
            action,
            state,
            repeat,
        })
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;
