// crates/purse_game/src/testing.rs
//! Headless doubles for the engine: a drawing surface that records calls and
//! an in-memory asset source.

use std::collections::HashMap;

use engine_shared::tilemap::TileLayer;
use engine_shared::{
    AssetSource, AtlasRegion, Color, DrawSurface, MapObject, TextureAtlas, TextureId,
    TextureRegion, TileMap,
};
use glam::Mat4;

use crate::assets::GameAssets;
use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub region: TextureRegion,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Clear(Color),
    Projection(Mat4),
    Begin,
    Draw(DrawCall),
    End,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<Op>,
    drawing: bool,
}

impl RecordingSurface {
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn draws(&self) -> Vec<DrawCall> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Draw(call) => Some(*call),
                _ => None,
            })
            .collect()
    }

    /// Draw calls grouped by begin/end scope.
    pub fn scopes(&self) -> Vec<Vec<DrawCall>> {
        let mut scopes = Vec::new();
        for op in &self.ops {
            match op {
                Op::Begin => scopes.push(Vec::new()),
                Op::Draw(call) => {
                    if let Some(scope) = scopes.last_mut() {
                        scope.push(*call);
                    }
                }
                _ => {}
            }
        }
        scopes
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.ops.push(Op::Clear(color));
    }

    fn set_projection_matrix(&mut self, projection: Mat4) {
        self.ops.push(Op::Projection(projection));
    }

    fn begin(&mut self) {
        assert!(!self.drawing, "begin inside an open scope");
        self.drawing = true;
        self.ops.push(Op::Begin);
    }

    fn draw(&mut self, region: &TextureRegion, x: f32, y: f32, width: f32, height: f32) {
        assert!(self.drawing, "draw outside begin/end");
        self.ops.push(Op::Draw(DrawCall { region: *region, x, y, width, height }));
    }

    fn set_color(&mut self, _color: Color) {}

    fn end(&mut self) {
        assert!(self.drawing, "end without begin");
        self.drawing = false;
        self.ops.push(Op::End);
    }

    fn is_drawing(&self) -> bool {
        self.drawing
    }
}

pub const ATLAS_PATH: &str = "images/sprites.ron";
pub const MAP_PATH: &str = "maps/demo.ron";

/// Region sequences and their frame counts. Every frame gets its own 16x16
/// cell so tests can tell draws apart.
const SEQUENCES: &[(&str, u32)] = &[
    ("purse_image", 1),
    ("purse_spit", 2),
    ("purse_open", 3),
    ("penny_walk", 2),
    ("nickel_walk", 2),
    ("dime_walk", 2),
    ("quarter_walk", 2),
    ("pickup-penny", 4),
    ("pickup-nickel", 4),
    ("pickup-dime", 4),
    ("pickup-quarter", 4),
    ("spring-up", 3),
    ("spring-down", 3),
    ("spring-left", 3),
    ("spring-right", 3),
    ("tack-up", 3),
    ("tack-down", 3),
    ("tack-left", 3),
    ("tack-right", 3),
    ("tiles", 2),
];

pub fn atlas() -> TextureAtlas {
    let mut regions = Vec::new();
    let mut cell = 0;
    for &(name, frames) in SEQUENCES {
        for i in 0..frames {
            let (x, y) = ((cell % 32) * 16, (cell / 32) * 16);
            regions.push(AtlasRegion {
                name: name.to_string(),
                index: (frames > 1).then_some(i),
                region: TextureRegion::from_pixels(TextureId(0), 512, 512, x, y, 16, 16),
            });
            cell += 1;
        }
    }
    TextureAtlas::new(regions)
}

pub fn assets() -> GameAssets {
    GameAssets::from_atlas(&atlas()).expect("test atlas has every region")
}

fn object(name: &str, kind: &str, x: f32, y: f32, props: &[(&str, &str)]) -> MapObject {
    MapObject {
        name: name.to_string(),
        kind: kind.to_string(),
        x,
        y,
        properties: props.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
    }
}

/// 20x12 map of 32px tiles: spawn at (32, 32), a nickel and a penny along
/// the bottom, one spring.
pub fn map() -> TileMap {
    TileMap {
        width: 20,
        height: 12,
        tile_width: 32.0,
        tile_height: 32.0,
        tileset: "tiles".to_string(),
        layers: vec![TileLayer {
            name: "ground".to_string(),
            visible: true,
            tiles: vec![1; 240],
        }],
        animations: Vec::new(),
        objects: vec![
            object("spawn", "", 32.0, 32.0, &[]),
            object("nickel", "coin", 300.0, 100.0, &[]),
            object("penny", "coin", 400.0, 100.0, &[]),
            object("spring", "spring", 500.0, 300.0, &[("direction", "left")]),
        ],
    }
}

#[derive(Default)]
pub struct MemoryAssets {
    atlases: HashMap<String, TextureAtlas>,
    maps: HashMap<String, TileMap>,
}

impl MemoryAssets {
    pub fn with_map(map: TileMap) -> Self {
        let mut source = Self::default();
        source.atlases.insert(ATLAS_PATH.to_string(), atlas());
        source.maps.insert(MAP_PATH.to_string(), map);
        source
    }
}

impl AssetSource for MemoryAssets {
    fn atlas(&self, path: &str) -> Option<&TextureAtlas> {
        self.atlases.get(path)
    }

    fn tile_map(&self, path: &str) -> Option<&TileMap> {
        self.maps.get(path)
    }
}

pub fn config() -> GameConfig {
    GameConfig {
        atlas_path: ATLAS_PATH.to_string(),
        map_path: MAP_PATH.to_string(),
        ..GameConfig::default()
    }
}
