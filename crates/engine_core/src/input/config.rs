// crates/engine_core/src/input/config.rs

use engine_shared::input_types::canonical_actions;
use tracing::warn;
use winit::keyboard::KeyCode;

use crate::config::KeyBinding;
use crate::input::{ActionRegistry, InputMap};

/// Centralized defaults for input configuration.
pub struct InputDefaults;

impl InputDefaults {
    /// Registers the canonical actions and their default key bindings.
    ///
    /// IMPORTANT: canonical actions are registered first and in order so
    /// their numeric IDs match `canonical_actions::*`.
    pub fn setup(registry: &mut ActionRegistry, input_map: &mut InputMap) {
        for (expected, name) in canonical_actions::NAMES.iter().enumerate() {
            let id = registry.register(name);
            debug_assert_eq!(id as usize, expected);
        }

        use canonical_actions::*;

        // Player movement on WASD.
        input_map.bind(KeyCode::KeyW, MOVE_UP);
        input_map.bind(KeyCode::KeyS, MOVE_DOWN);
        input_map.bind(KeyCode::KeyA, MOVE_LEFT);
        input_map.bind(KeyCode::KeyD, MOVE_RIGHT);

        // Debug camera pan on the arrows.
        input_map.bind(KeyCode::ArrowUp, PAN_UP);
        input_map.bind(KeyCode::ArrowDown, PAN_DOWN);
        input_map.bind(KeyCode::ArrowLeft, PAN_LEFT);
        input_map.bind(KeyCode::ArrowRight, PAN_RIGHT);

        input_map.bind(KeyCode::Space, SHOOT);
        input_map.bind(KeyCode::KeyE, OPEN);
        input_map.bind(KeyCode::Escape, QUIT);
    }

    /// Applies config overrides. The first override for an action replaces
    /// its default keys; further overrides for the same action add keys.
    pub fn apply_overrides(registry: &ActionRegistry, input_map: &mut InputMap, bindings: &[KeyBinding]) {
        let mut replaced = Vec::new();
        for binding in bindings {
            let Some(action) = registry.get_id(&binding.action) else {
                warn!(action = %binding.action, "ignoring binding for unknown action");
                continue;
            };
            if !replaced.contains(&action) {
                input_map.unbind_action(action);
                replaced.push(action);
            }
            input_map.bind(binding.key, action);
        }
    }
}
