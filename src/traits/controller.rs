/// Logical input button, independent of the windowing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    KeyR,
    Space,
    Shift,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    MouseLeft,
    MouseRight,
}

/// Read-only view of which buttons are held
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// -1, 0 or +1 depending on which of the two buttons is held
    fn axis(&self, positive: Button, negative: Button) -> f32 {
        match (self.is_down(positive), self.is_down(negative)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}
