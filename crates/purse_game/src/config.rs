// crates/purse_game/src/config.rs

use engine_shared::Color;
use serde::{Deserialize, Serialize};

/// Gameplay tuning. Every field has a default so a config file only needs to
/// name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Sprite atlas, relative to the asset root.
    pub atlas_path: String,
    pub map_path: String,
    /// Debug camera pan, world units per second.
    pub pan_speed: f32,
    pub player_speed: f32,
    pub pickup_shake_magnitude: f32,
    /// Seconds.
    pub pickup_shake_duration: f32,
    pub clear_color: Color,
    /// Initial world-camera viewport; replaced by the window size on resize.
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            atlas_path: "images/sprites.ron".to_string(),
            map_path: "maps/demo.ron".to_string(),
            pan_speed: 350.0,
            player_speed: 200.0,
            pickup_shake_magnitude: 6.0,
            pickup_shake_duration: 0.3,
            clear_color: Color::BLACK,
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: GameConfig = ron::from_str("(pan_speed: 500.0)").expect("parses");
        assert_eq!(cfg.pan_speed, 500.0);
        assert_eq!(cfg.map_path, "maps/demo.ron");
        assert_eq!(cfg.clear_color, Color::BLACK);
    }
}
