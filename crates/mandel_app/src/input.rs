pub use winit::{event::MouseButton, keyboard::KeyCode};

use mandel_view::ViewEvent;
use std::collections::HashMap;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
    keyboard::PhysicalKey,
};

/// Wheel pixels counted as one line (touchpads & browsers report pixels)
pub const PIXELS_PER_LINE: f64 = 100.0;
/// Held while moving the cursor to pan
pub const PAN_BUTTON: MouseButton = MouseButton::Left;
pub const RESET_KEY: KeyCode = KeyCode::Equal;
pub const QUIT_KEY: KeyCode = KeyCode::Escape;

/// Per-frame input state
///
/// Keeps polled key/button state for hotkeys & queues the camera-relevant
/// events in the order they arrived so the view can replay them
#[derive(Default)]
pub struct Input {
    keyboard: HashMap<KeyCode, (ElementState, ElementState)>,
    mouse_buttons: HashMap<MouseButton, (ElementState, ElementState)>,
    cursor: Option<(f64, f64)>,
    events: Vec<ViewEvent>,
}

impl Input {
    /// Routes a `winit` event into the matching handler
    pub(crate) fn window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => self.keyboard(event),
            WindowEvent::MouseInput { button, state, .. } => self.mouse(*button, *state),
            WindowEvent::CursorMoved { position, .. } => self.cursor(*position),
            WindowEvent::CursorLeft { .. } => self.cursor = None,
            WindowEvent::MouseWheel { delta, .. } => self.wheel(*delta),
            WindowEvent::Resized(size) => self.resized(*size),
            WindowEvent::CloseRequested => self.events.push(ViewEvent::Close),
            _ => {}
        }
    }

    fn keyboard(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.key(key_code, event.state);
        }
    }

    fn key(&mut self, key_code: KeyCode, state: ElementState) {
        let prev = self
            .keyboard
            .get(&key_code)
            .map_or(ElementState::Released, |(curr, _)| *curr);
        self.keyboard.insert(key_code, (state, prev));

        if state != ElementState::Pressed {
            return;
        }
        if key_code == RESET_KEY {
            self.events.push(ViewEvent::Reset);
        } else if key_code == QUIT_KEY {
            self.events.push(ViewEvent::Close);
        }
    }

    fn mouse(&mut self, button: MouseButton, state: ElementState) {
        let prev = self
            .mouse_buttons
            .get(&button)
            .map_or(ElementState::Released, |(curr, _)| *curr);
        self.mouse_buttons.insert(button, (state, prev));
    }

    /// Track the cursor; motion with the pan button held becomes a drag
    fn cursor(&mut self, position: PhysicalPosition<f64>) {
        let pos = (position.x, position.y);
        let Some(prev) = self.cursor.replace(pos) else {
            return;
        };

        let (dx, dy) = (pos.0 - prev.0, pos.1 - prev.1);
        if self.mouse_held(PAN_BUTTON) && (dx != 0.0 || dy != 0.0) {
            self.events.push(ViewEvent::Drag { dx, dy });
        }
    }

    fn wheel(&mut self, delta: MouseScrollDelta) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64,
            MouseScrollDelta::PixelDelta(pos) => pos.y / PIXELS_PER_LINE,
        };
        if lines == 0.0 {
            return;
        }

        match self.cursor {
            Some((x, y)) => self.events.push(ViewEvent::Scroll { x, y, delta: lines }),
            None => {
                #[cfg(feature = "log")]
                log::debug!("wheel moved before any cursor position was known");
            }
        }
    }

    fn resized(&mut self, size: PhysicalSize<u32>) {
        self.events.push(ViewEvent::Resize {
            width: size.width,
            height: size.height,
        });
    }

    /// Update previous states, clean up released keys/buttons & drop the event queue
    pub(crate) fn end_frame(&mut self) {
        for (curr, prev) in self.keyboard.values_mut() {
            *prev = *curr;
        }
        for (curr, prev) in self.mouse_buttons.values_mut() {
            *prev = *curr;
        }

        self.keyboard
            .retain(|_, (curr, _)| *curr != ElementState::Released);
        self.mouse_buttons
            .retain(|_, (curr, _)| *curr != ElementState::Released);

        self.events.clear();
    }

    /// Camera events received since the last frame, oldest first
    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    /// True if the key went from not pressed last frame to pressed this frame
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.get(&key).is_some_and(|(curr, prev)| {
            *curr == ElementState::Pressed && *prev != ElementState::Pressed
        })
    }

    /// True if key is held down
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keyboard
            .get(&key)
            .is_some_and(|(curr, _)| *curr == ElementState::Pressed)
    }

    /// True if mouse button is held down
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_buttons
            .get(&button)
            .is_some_and(|(curr, _)| *curr == ElementState::Pressed)
    }

    /// Last known cursor position in window pixels
    pub fn mouse_position(&self) -> Option<(f64, f64)> {
        self.cursor
    }
}

#[cfg(test)]
impl Input {
    pub fn inject_key(&mut self, key: KeyCode, state: ElementState) {
        self.key(key, state);
    }

    pub fn inject_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.mouse(button, state);
    }

    pub fn inject_cursor(&mut self, x: f64, y: f64) {
        self.cursor(PhysicalPosition::new(x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_scrolls_at_cursor() {
        let mut input = Input::default();
        input.inject_cursor(120.0, 80.0);
        input.wheel(MouseScrollDelta::LineDelta(0.0, 2.0));
        input.wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -50.0)));

        assert_eq!(
            input.events(),
            &[
                ViewEvent::Scroll {
                    x: 120.0,
                    y: 80.0,
                    delta: 2.0
                },
                ViewEvent::Scroll {
                    x: 120.0,
                    y: 80.0,
                    delta: -0.5
                },
            ]
        );
    }

    #[test]
    fn wheel_without_cursor_is_dropped() {
        let mut input = Input::default();
        input.wheel(MouseScrollDelta::LineDelta(0.0, 1.0));
        input.inject_cursor(5.0, 5.0);
        input.wheel(MouseScrollDelta::LineDelta(3.0, 0.0));
        assert!(input.events().is_empty());
    }

    #[test]
    fn drag_needs_pan_button() {
        let mut input = Input::default();
        input.inject_cursor(10.0, 10.0);
        input.inject_cursor(20.0, 15.0);
        assert!(input.events().is_empty());

        input.inject_mouse_button(PAN_BUTTON, ElementState::Pressed);
        input.inject_cursor(25.0, 5.0);
        input.inject_mouse_button(PAN_BUTTON, ElementState::Released);
        input.inject_cursor(40.0, 40.0);

        assert_eq!(input.events(), &[ViewEvent::Drag { dx: 5.0, dy: -10.0 }]);
    }

    #[test]
    fn first_cursor_position_never_drags() {
        let mut input = Input::default();
        input.inject_mouse_button(PAN_BUTTON, ElementState::Pressed);
        input.inject_cursor(300.0, 200.0);
        assert!(input.events().is_empty());
        assert_eq!(input.mouse_position(), Some((300.0, 200.0)));
    }

    #[test]
    fn keys_map_to_reset_and_close() {
        let mut input = Input::default();
        input.inject_key(RESET_KEY, ElementState::Pressed);
        input.inject_key(RESET_KEY, ElementState::Released);
        input.inject_key(KeyCode::KeyA, ElementState::Pressed);
        input.inject_key(QUIT_KEY, ElementState::Pressed);

        assert_eq!(input.events(), &[ViewEvent::Reset, ViewEvent::Close]);
    }

    #[test]
    fn resize_is_queued_in_order() {
        let mut input = Input::default();
        input.inject_cursor(1.0, 1.0);
        input.resized(PhysicalSize::new(1024, 768));
        input.wheel(MouseScrollDelta::LineDelta(0.0, 1.0));

        assert_eq!(
            input.events()[0],
            ViewEvent::Resize {
                width: 1024,
                height: 768
            }
        );
        assert!(matches!(input.events()[1], ViewEvent::Scroll { .. }));
    }

    #[test]
    fn end_frame_clears_queue_and_rotates_state() {
        let mut input = Input::default();
        input.inject_key(KeyCode::BracketRight, ElementState::Pressed);
        input.inject_cursor(0.0, 0.0);
        input.wheel(MouseScrollDelta::LineDelta(0.0, 1.0));
        assert!(input.key_pressed(KeyCode::BracketRight));

        input.end_frame();
        assert!(input.events().is_empty());
        assert!(!input.key_pressed(KeyCode::BracketRight));
        assert!(input.key_held(KeyCode::BracketRight));
    }
}
