use winit::event::{ElementState, MouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::traits::Button;

use super::input_surface::{InputEvent, InputSurface};

/// Pixels per wheel "line" when the platform reports pixel deltas
const PIXELS_PER_LINE: f32 = 100.0;

/// Adapter that bridges Winit window events to queued `InputEvent`s
#[derive(Debug, Clone, Default)]
pub struct WinitInputAdapter {
    /// Current cursor position (relative to window)
    cursor: Option<(f32, f32)>,
    primary_down: bool,
    /// Id of the finger currently driving single-touch look
    active_touch: Option<u64>,
}

impl WinitInputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a Winit event and push the result onto `surface`
    pub fn forward(&mut self, event: &WindowEvent, surface: &mut InputSurface) {
        surface.extend(self.translate(event));
    }

    /// Translate a Winit event into zero or more input events
    pub fn translate(&mut self, event: &WindowEvent) -> Vec<InputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return Vec::new();
                }
                let PhysicalKey::Code(keycode) = event.physical_key else {
                    return Vec::new();
                };
                Self::keycode_to_button(keycode)
                    .map(|button| match event.state {
                        ElementState::Pressed => InputEvent::KeyDown(button),
                        ElementState::Released => InputEvent::KeyUp(button),
                    })
                    .into_iter()
                    .collect()
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.translate_mouse_button(*state, *button)
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                self.cursor = Some((x, y));
                vec![InputEvent::PointerMove { x, y }]
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                vec![InputEvent::Wheel { delta }]
            }
            WindowEvent::Touch(touch) => self.translate_touch(touch),
            WindowEvent::Focused(false) => {
                self.primary_down = false;
                self.active_touch = None;
                vec![InputEvent::FocusLost, InputEvent::PointerUp, InputEvent::TouchEnd]
            }
            _ => Vec::new(),
        }
    }

    fn translate_mouse_button(&mut self, state: ElementState, button: MouseButton) -> Vec<InputEvent> {
        let Some(mapped) = Self::mouse_button_to_button(button) else {
            return Vec::new();
        };
        let mut events = Vec::with_capacity(2);
        match state {
            ElementState::Pressed => {
                events.push(InputEvent::KeyDown(mapped));
                if mapped == Button::MouseLeft {
                    let (x, y) = self.cursor.unwrap_or((0.0, 0.0));
                    self.primary_down = true;
                    events.push(InputEvent::PointerDown { x, y });
                }
            }
            ElementState::Released => {
                events.push(InputEvent::KeyUp(mapped));
                if mapped == Button::MouseLeft && self.primary_down {
                    self.primary_down = false;
                    events.push(InputEvent::PointerUp);
                }
            }
        }
        events
    }

    fn translate_touch(&mut self, touch: &Touch) -> Vec<InputEvent> {
        let (x, y) = (touch.location.x as f32, touch.location.y as f32);
        match touch.phase {
            TouchPhase::Started if self.active_touch.is_none() => {
                self.active_touch = Some(touch.id);
                vec![InputEvent::TouchStart { x, y }]
            }
            TouchPhase::Moved if self.active_touch == Some(touch.id) => {
                vec![InputEvent::TouchMove { x, y }]
            }
            TouchPhase::Ended | TouchPhase::Cancelled if self.active_touch == Some(touch.id) => {
                self.active_touch = None;
                vec![InputEvent::TouchEnd]
            }
            // Additional fingers are ignored: look is single-touch only
            _ => Vec::new(),
        }
    }

    /// Map Winit KeyCode to Button
    pub fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyD => Some(Button::KeyD),
            KeyCode::KeyQ => Some(Button::KeyQ),
            KeyCode::KeyE => Some(Button::KeyE),
            KeyCode::KeyR => Some(Button::KeyR),
            KeyCode::Space => Some(Button::Space),
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Button::Shift),
            KeyCode::Escape => Some(Button::Escape),
            KeyCode::ArrowLeft => Some(Button::ArrowLeft),
            KeyCode::ArrowRight => Some(Button::ArrowRight),
            KeyCode::ArrowUp => Some(Button::ArrowUp),
            KeyCode::ArrowDown => Some(Button::ArrowDown),
            _ => None,
        }
    }

    /// Map Winit MouseButton to Button
    pub fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Right => Some(Button::MouseRight),
            _ => None,
        }
    }
}
