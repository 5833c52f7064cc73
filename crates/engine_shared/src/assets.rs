// crates/engine_shared/src/assets.rs

use crate::atlas::TextureAtlas;
use crate::tilemap::TileMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Atlas,
    TileMap,
}

/// A file to load, relative to the asset root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetDescriptor {
    pub path: String,
    pub kind: AssetKind,
}

impl AssetDescriptor {
    pub fn atlas(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: AssetKind::Atlas }
    }

    pub fn tile_map(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: AssetKind::TileMap }
    }
}

/// Read access to loaded assets, keyed by the path they were queued with.
pub trait AssetSource {
    fn atlas(&self, path: &str) -> Option<&TextureAtlas>;

    fn tile_map(&self, path: &str) -> Option<&TileMap>;
}
