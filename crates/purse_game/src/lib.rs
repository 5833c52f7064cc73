// crates/purse_game/src/lib.rs
//! Purse: walk the level, open up, swallow the coins.
//!
//! Game logic only. It depends on `engine_shared` for input, drawing and
//! asset access, so every rule here runs headless in tests.

pub mod assets;
pub mod config;
pub mod entities;
pub mod error;
pub mod level;
pub mod player;
pub mod screen;
pub mod shake;

#[cfg(test)]
mod testing;

pub use assets::GameAssets;
pub use config::GameConfig;
pub use error::GameError;
pub use screen::GameScreen;

use engine_shared::AssetDescriptor;

/// Files the game needs loaded before `GameScreen::new`.
pub fn required_assets(config: &GameConfig) -> [AssetDescriptor; 2] {
    [
        AssetDescriptor::atlas(config.atlas_path.as_str()),
        AssetDescriptor::tile_map(config.map_path.as_str()),
    ]
}
