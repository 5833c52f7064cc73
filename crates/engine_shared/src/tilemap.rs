// crates/engine_shared/src/tilemap.rs
//! Grid level data as produced by the map loader.
//!
//! Tiles are stored row-major starting from the *top* row, the way map
//! editors author them. Tile id 0 is empty; id `n` refers to frame `n - 1`
//! of the tileset sequence in the atlas.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type TileId = u32;
pub const EMPTY_TILE: TileId = 0;

#[derive(Debug, Error, PartialEq)]
pub enum TileMapError {
    #[error("map size {width}x{height} is empty")]
    EmptyMap { width: u32, height: u32 },
    #[error("tile size must be positive, got {0}x{1}")]
    BadTileSize(f32, f32),
    #[error("layer `{layer}` has {actual} tiles, expected {expected}")]
    LayerSize { layer: String, expected: usize, actual: usize },
    #[error("animation for tile {0} has no frames or a non-positive frame duration")]
    BadAnimation(TileId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    pub tiles: Vec<TileId>,
}

fn default_visible() -> bool {
    true
}

/// Tile `tile` cycles through `frames` (tile ids) at `frame_duration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileAnimation {
    pub tile: TileId,
    pub frames: Vec<TileId>,
    pub frame_duration: f32,
}

/// Point or area of interest placed in the map (spawn point, coins, traps).
/// `x`/`y` are world units from the bottom-left of the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    pub name: String,
    #[serde(default)]
    pub kind: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl MapObject {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    pub width: u32,
    pub height: u32,
    pub tile_width: f32,
    pub tile_height: f32,
    /// Name of the atlas region sequence holding the tile images.
    pub tileset: String,
    pub layers: Vec<TileLayer>,
    #[serde(default)]
    pub animations: Vec<TileAnimation>,
    #[serde(default)]
    pub objects: Vec<MapObject>,
}

impl TileMap {
    pub fn validate(&self) -> Result<(), TileMapError> {
        if self.width == 0 || self.height == 0 {
            return Err(TileMapError::EmptyMap { width: self.width, height: self.height });
        }
        if self.tile_width <= 0.0 || self.tile_height <= 0.0 {
            return Err(TileMapError::BadTileSize(self.tile_width, self.tile_height));
        }
        let expected = (self.width * self.height) as usize;
        for layer in &self.layers {
            if layer.tiles.len() != expected {
                return Err(TileMapError::LayerSize {
                    layer: layer.name.clone(),
                    expected,
                    actual: layer.tiles.len(),
                });
            }
        }
        for anim in &self.animations {
            if anim.frames.is_empty() || anim.frame_duration <= 0.0 {
                return Err(TileMapError::BadAnimation(anim.tile));
            }
        }
        Ok(())
    }

    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.width as f32 * self.tile_width, self.height as f32 * self.tile_height)
    }

    /// Tile at column `col`, row `row` (row 0 = top).
    pub fn tile_at(&self, layer: &TileLayer, col: u32, row: u32) -> TileId {
        if col >= self.width || row >= self.height {
            return EMPTY_TILE;
        }
        layer
            .tiles
            .get((row * self.width + col) as usize)
            .copied()
            .unwrap_or(EMPTY_TILE)
    }

    /// Bottom-left world position of a grid cell.
    pub fn cell_origin(&self, col: u32, row: u32) -> Vec2 {
        Vec2::new(
            col as f32 * self.tile_width,
            (self.height - 1 - row) as f32 * self.tile_height,
        )
    }

    pub fn object(&self, name: &str) -> Option<&MapObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn objects_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a MapObject> + 'a {
        self.objects.iter().filter(move |o| o.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = r#"(
        width: 3,
        height: 2,
        tile_width: 16.0,
        tile_height: 16.0,
        tileset: "tiles",
        layers: [
            (name: "ground", tiles: [1, 1, 1, 2, 0, 2]),
        ],
        animations: [(tile: 2, frames: [2, 3], frame_duration: 0.5)],
        objects: [
            (name: "spawn", x: 24.0, y: 8.0),
            (name: "nickel", kind: "coin", x: 40.0, y: 8.0),
        ],
    )"#;

    fn map() -> TileMap {
        ron::from_str(MAP).expect("test map parses")
    }

    #[test]
    fn parses_and_validates() {
        let m = map();
        assert_eq!(m.validate(), Ok(()));
        assert!(m.layers[0].visible);
        assert_eq!(m.world_size(), Vec2::new(48.0, 32.0));
    }

    #[test]
    fn rows_count_from_the_top() {
        let m = map();
        let ground = &m.layers[0];
        assert_eq!(m.tile_at(ground, 0, 1), 2);
        assert_eq!(m.tile_at(ground, 1, 1), EMPTY_TILE);
        assert_eq!(m.tile_at(ground, 5, 0), EMPTY_TILE);
        assert_eq!(m.cell_origin(0, 0), Vec2::new(0.0, 16.0));
        assert_eq!(m.cell_origin(2, 1), Vec2::new(32.0, 0.0));
    }

    #[test]
    fn objects_by_name_and_kind() {
        let m = map();
        assert_eq!(m.object("spawn").map(|o| o.position()), Some(Vec2::new(24.0, 8.0)));
        assert_eq!(m.objects_of_kind("coin").count(), 1);
    }

    #[test]
    fn short_layer_is_rejected() {
        let mut m = map();
        m.layers[0].tiles.pop();
        assert!(matches!(m.validate(), Err(TileMapError::LayerSize { expected: 6, actual: 5, .. })));
    }
}
