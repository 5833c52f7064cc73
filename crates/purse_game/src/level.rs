// crates/purse_game/src/level.rs

use std::collections::HashMap;

use engine_shared::tilemap::{TileId, EMPTY_TILE};
use engine_shared::{
    Animation, DrawSurface, MapObject, OrthographicCamera, PlayMode, TextureAtlas, TextureRegion,
    TileMap,
};
use glam::Vec2;
use tracing::{info, warn};

use crate::entities::Bounds;
use crate::error::GameError;

const SPAWN_OBJECT: &str = "spawn";
pub const COIN_KIND: &str = "coin";
pub const TRAP_KINDS: [&str; 2] = ["spring", "tack"];

/// Static tile world. The map never changes after load; only the clock that
/// drives animated tiles moves.
#[derive(Debug, Clone)]
pub struct Level {
    map: TileMap,
    tiles: Vec<TextureRegion>,
    animations: HashMap<TileId, Animation<TileId>>,
    state_time: f32,
    spawn: Vec2,
}

impl Level {
    pub fn new(map: TileMap, atlas: &TextureAtlas) -> Result<Self, GameError> {
        map.validate()?;
        let tiles = atlas.require_regions(&map.tileset)?;

        let mut animations = HashMap::new();
        for anim in &map.animations {
            animations.insert(anim.tile, Animation::new(anim.frame_duration, anim.frames.clone(), PlayMode::Loop));
        }

        let referenced = map
            .layers
            .iter()
            .flat_map(|l| l.tiles.iter().copied())
            .chain(map.animations.iter().flat_map(|a| a.frames.iter().copied()));
        for tile in referenced {
            if (tile as usize) > tiles.len() {
                return Err(GameError::TileOutOfRange { tile, tileset_len: tiles.len() });
            }
        }

        let spawn = match map.object(SPAWN_OBJECT) {
            Some(obj) => obj.position(),
            None => {
                warn!("map has no `{SPAWN_OBJECT}` object; spawning at its centre");
                map.world_size() / 2.0
            }
        };

        info!(
            width = map.width,
            height = map.height,
            layers = map.layers.len(),
            objects = map.objects.len(),
            "level loaded"
        );

        Ok(Self { map, tiles, animations, state_time: 0.0, spawn })
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// (min, max) corners of the playable area.
    pub fn world_bounds(&self) -> (Vec2, Vec2) {
        (Vec2::ZERO, self.map.world_size())
    }

    pub fn coin_spawns(&self) -> impl Iterator<Item = &MapObject> + '_ {
        self.map.objects_of_kind(COIN_KIND)
    }

    pub fn trap_spawns(&self) -> impl Iterator<Item = &MapObject> + '_ {
        self.map.objects.iter().filter(|o| TRAP_KINDS.contains(&o.kind.as_str()))
    }

    pub fn update(&mut self, dt: f32) {
        self.state_time += dt.max(0.0);
    }

    /// Tile shown for `tile` at the current clock.
    pub fn displayed_tile(&self, tile: TileId) -> TileId {
        match self.animations.get(&tile) {
            Some(anim) => anim.key_frame(self.state_time).copied().unwrap_or(tile),
            None => tile,
        }
    }

    /// Draws every visible layer in its own scope with `camera`'s matrices.
    pub fn render(&self, surface: &mut dyn DrawSurface, camera: &OrthographicCamera) {
        let (view_min, view_max) = camera.visible_bounds();
        let view = Bounds { min: view_min, max: view_max };
        let size = Vec2::new(self.map.tile_width, self.map.tile_height);

        surface.set_projection_matrix(camera.combined());
        surface.begin();
        for layer in self.map.layers.iter().filter(|l| l.visible) {
            for row in 0..self.map.height {
                for col in 0..self.map.width {
                    let tile = self.displayed_tile(self.map.tile_at(layer, col, row));
                    if tile == EMPTY_TILE {
                        continue;
                    }
                    let origin = self.map.cell_origin(col, row);
                    if !Bounds::from_origin_size(origin, size).overlaps(&view) {
                        continue;
                    }
                    if let Some(region) = self.tiles.get(tile as usize - 1) {
                        surface.draw(region, origin.x, origin.y, size.x, size.y);
                    }
                }
            }
        }
        surface.end();
    }
}
