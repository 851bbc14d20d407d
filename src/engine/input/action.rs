// Game action definitions and key bindings

use winit::keyboard::KeyCode;

/// Every in-game action the demo responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Interact,
    Exit,
}

/// Default arrow-key layout
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::ArrowRight, Action::MoveRight),
        (KeyCode::ArrowUp, Action::Jump),
        (KeyCode::Space, Action::Interact),
        (KeyCode::Escape, Action::Exit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::Jump, Action::Jump);
        assert_ne!(Action::Jump, Action::Interact);
    }

    #[test]
    fn test_every_action_is_bound() {
        let bindings = default_bindings();
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::Jump,
            Action::Interact,
            Action::Exit,
        ] {
            assert!(
                bindings.iter().any(|(_, bound)| *bound == action),
                "{action:?} has no default binding"
            );
        }
    }

    #[test]
    fn test_no_duplicate_keys() {
        let bindings = default_bindings();
        let mut seen = std::collections::HashSet::new();
        for (key, _) in bindings {
            assert!(seen.insert(key), "duplicate key binding for {key:?}");
        }
    }
}
