// crates/engine_core/src/input/poller.rs

use engine_shared::InputState;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::InputMap;

/// Low-level input collector that tracks active physical keys.
/// This keeps raw device state out of App / PlatformRunner.
#[derive(Default)]
pub struct InputPoller {
    active_keys: Vec<KeyCode>,
    last_mask: u64,
}

impl InputPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a single winit WindowEvent and update internal key state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                self.handle_keyboard_input(key_event);
            }
            // Keys released while unfocused never report a release.
            WindowEvent::Focused(false) => self.active_keys.clear(),
            _ => {}
        }
    }

    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        if let PhysicalKey::Code(keycode) = key_event.physical_key {
            self.set_key(keycode, key_event.state == ElementState::Pressed);
        }
    }

    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if !self.active_keys.contains(&key) {
                self.active_keys.push(key);
            }
        } else {
            self.active_keys.retain(|&k| k != key);
        }
    }

    pub fn is_key_active(&self, key: KeyCode) -> bool {
        self.active_keys.contains(&key)
    }

    /// Resolves held keys into actions and diffs against the previous
    /// snapshot to find just-pressed actions. Call once per frame.
    pub fn snapshot(&mut self, input_map: &InputMap) -> InputState {
        let mut current = InputState::default();
        for &key in &self.active_keys {
            if let Some(action_id) = input_map.map_signal_to_intent(key) {
                current.set_active(action_id);
            }
        }

        let state = InputState::from_masks(current.digital_mask, self.last_mask);
        self.last_mask = current.digital_mask;
        state
    }
}
