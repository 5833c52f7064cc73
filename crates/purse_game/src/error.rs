// crates/purse_game/src/error.rs

use engine_shared::tilemap::TileId;
use engine_shared::{AtlasError, TileMapError};
use thiserror::Error;

/// Failures while building a screen from loaded assets. Once a screen exists
/// its update/render loop cannot fail.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("{kind} `{path}` has not been loaded")]
    NotLoaded { kind: &'static str, path: String },
    #[error(transparent)]
    Atlas(#[from] AtlasError),
    #[error(transparent)]
    Map(#[from] TileMapError),
    #[error("tile {tile} is outside the tileset ({tileset_len} tiles)")]
    TileOutOfRange { tile: TileId, tileset_len: usize },
}
