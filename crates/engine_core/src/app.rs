// crates/engine_core/src/app.rs

use tracing::debug;

use crate::config::EngineConfig;
use crate::input::{ActionRegistry, InputDefaults, InputMap};

/// Engine-side state that outlives the window: settings plus the resolved
/// action registry and key bindings.
pub struct App {
    pub config: EngineConfig,
    pub registry: ActionRegistry,
    pub input_map: InputMap,
}

impl App {
    pub fn new(config: EngineConfig) -> Self {
        let mut registry = ActionRegistry::default();
        let mut input_map = InputMap::default();

        InputDefaults::setup(&mut registry, &mut input_map);
        InputDefaults::apply_overrides(&registry, &mut input_map, &config.bindings);
        debug!(actions = registry.len(), overrides = config.bindings.len(), "input configured");

        Self {
            config,
            registry,
            input_map,
        }
    }

    pub fn window_title(&self) -> &str {
        &self.config.window_title
    }
}
