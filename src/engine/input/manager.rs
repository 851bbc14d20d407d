// Keyboard state tracking for the local player

use std::collections::{HashMap, HashSet};

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::action::{default_bindings, Action};

/// Maps winit keyboard events onto action booleans the game can poll.
///
/// The game core only ever sees `is_pressed`-style queries; the event
/// plumbing stays on this side of the boundary.
pub struct InputManager {
    bindings: HashMap<KeyCode, Action>,

    /// Actions currently held down
    pressed: HashSet<Action>,

    /// Actions that went down this frame
    just_pressed: HashSet<Action>,

    /// Actions that went up this frame
    just_released: HashSet<Action>,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    /// Feed a winit keyboard event. Key repeats are ignored.
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        let Some(&action) = self.bindings.get(&key_code) else {
            return;
        };

        match event.state {
            ElementState::Pressed => {
                if !event.repeat {
                    self.press(action);
                }
            }
            ElementState::Released => self.release(action),
        }
    }

    /// Register an action press directly (also used by tests)
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release directly
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Roll per-frame edge state over. Call once per frame after all events
    /// have been processed.
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release_edges() {
        let mut input = InputManager::new();

        input.press(Action::Jump);
        assert!(input.is_pressed(Action::Jump));
        assert!(input.just_pressed(Action::Jump));

        input.update();
        assert!(input.is_pressed(Action::Jump));
        assert!(!input.just_pressed(Action::Jump));

        input.release(Action::Jump);
        assert!(!input.is_pressed(Action::Jump));
        assert!(input.just_released(Action::Jump));

        input.update();
        assert!(!input.just_released(Action::Jump));
    }

    #[test]
    fn test_repeated_press_is_not_a_new_edge() {
        let mut input = InputManager::new();

        input.press(Action::MoveRight);
        input.update();

        // Holding the key: pressing again while already down is no edge.
        input.press(Action::MoveRight);
        assert!(input.is_pressed(Action::MoveRight));
        assert!(!input.just_pressed(Action::MoveRight));
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut input = InputManager::new();

        input.release(Action::Interact);
        assert!(!input.just_released(Action::Interact));
    }

    #[test]
    fn test_independent_actions() {
        let mut input = InputManager::new();

        input.press(Action::MoveLeft);
        input.press(Action::Jump);

        assert!(input.is_pressed(Action::MoveLeft));
        assert!(input.is_pressed(Action::Jump));
        assert!(!input.is_pressed(Action::MoveRight));
    }
}
