use std::collections::HashSet;

use crate::traits::{Button, Controller};

use super::input_surface::InputEvent;

/// Held-button bookkeeping fed from queued input events
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed_keys: HashSet<Button>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        self.pressed_keys.insert(button);
    }

    pub fn release(&mut self, button: Button) {
        self.pressed_keys.remove(&button);
    }

    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
    }

    /// Track key and focus events; returns true when the event was consumed
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::KeyDown(button) => {
                self.press(button);
                true
            }
            InputEvent::KeyUp(button) => {
                self.release(button);
                true
            }
            InputEvent::FocusLost => {
                self.release_all();
                true
            }
            _ => false,
        }
    }
}

impl Controller for KeyState {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_empty() {
        let keys = KeyState::new();
        assert!(!keys.is_down(Button::KeyW));
        assert_eq!(keys.axis(Button::KeyW, Button::KeyS), 0.0);
    }

    #[test]
    fn test_press_release() {
        let mut keys = KeyState::new();
        keys.apply(&InputEvent::KeyDown(Button::KeyW));
        keys.apply(&InputEvent::KeyDown(Button::KeyW));
        assert!(keys.is_down(Button::KeyW));

        keys.apply(&InputEvent::KeyUp(Button::KeyW));
        assert!(!keys.is_down(Button::KeyW));
        assert_eq!(keys.axis(Button::KeyW, Button::KeyS), 0.0);
    }

    #[test]
    fn test_focus_loss_releases_everything() {
        let mut keys = KeyState::new();
        keys.press(Button::KeyA);
        keys.press(Button::Shift);
        assert!(keys.apply(&InputEvent::FocusLost));
        assert!(!keys.is_down(Button::KeyA));
        assert!(!keys.is_down(Button::Shift));
    }

    #[test]
    fn test_pointer_events_not_consumed() {
        let mut keys = KeyState::new();
        assert!(!keys.apply(&InputEvent::PointerUp));
    }
}
