use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::input::InputEvent;

/// Adapter that turns Winit window events into session input events
#[derive(Debug, Clone, Default)]
pub struct WinitInput {
    /// Last known cursor position, needed because button events carry none
    cursor: Option<(f32, f32)>,
}

impl WinitInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one window event. Events the session does not care about
    /// map to `None`.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                self.cursor = Some((x, y));
                Some(InputEvent::PointerMoved { x, y })
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                Some(InputEvent::PointerLeft)
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.cursor.map(|(x, y)| InputEvent::PointerDown { x, y }),
            WindowEvent::Touch(touch) => {
                let (x, y) = (touch.location.x as f32, touch.location.y as f32);
                match touch.phase {
                    TouchPhase::Started => {
                        self.cursor = Some((x, y));
                        Some(InputEvent::PointerDown { x, y })
                    }
                    TouchPhase::Moved => {
                        self.cursor = Some((x, y));
                        Some(InputEvent::PointerMoved { x, y })
                    }
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        self.cursor = None;
                        Some(InputEvent::PointerLeft)
                    }
                }
            }
            WindowEvent::Resized(size) => Some(InputEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                Some(InputEvent::Dismiss)
            }
            _ => None,
        }
    }
}
