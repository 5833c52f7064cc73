// crates/engine_core/src/assets/loader.rs
//! File formats understood by the asset manager.
//!
//! Atlas descriptor (`*.ron`), image path relative to the descriptor:
//! ```ron
//! (
//!     image: "sprites.png",
//!     regions: [
//!         (name: "nickel_walk", index: Some(0), x: 0, y: 0, width: 16, height: 16),
//!         (name: "white-pixel", x: 0, y: 32, width: 1, height: 1),
//!     ],
//! )
//! ```
//! Tile maps are `engine_shared::TileMap` serialized as RON.

use std::path::{Path, PathBuf};

use engine_shared::{AtlasRegion, TextureAtlas, TextureId, TextureRegion, TileMap};
use image::RgbaImage;
use serde::Deserialize;

use super::AssetError;

#[derive(Debug, Deserialize)]
struct AtlasFile {
    image: String,
    regions: Vec<AtlasFileRegion>,
}

#[derive(Debug, Deserialize)]
struct AtlasFileRegion {
    name: String,
    #[serde(default)]
    index: Option<u32>,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

fn read_text(path: &Path) -> Result<String, AssetError> {
    std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: for<'de> Deserialize<'de>>(path: &Path, text: &str) -> Result<T, AssetError> {
    ron::from_str(text).map_err(|source| AssetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses an atlas descriptor and decodes its sheet. Regions are bound to
/// `texture`; the decoded pixels are returned for upload.
pub(super) fn load_atlas(path: &Path, texture: TextureId) -> Result<(TextureAtlas, RgbaImage, PathBuf), AssetError> {
    let file: AtlasFile = parse(path, &read_text(path)?)?;

    let image_path = path
        .parent()
        .map(|dir| dir.join(&file.image))
        .unwrap_or_else(|| PathBuf::from(&file.image));
    let image = image::open(&image_path)
        .map_err(|source| AssetError::Image {
            path: image_path.clone(),
            source,
        })?
        .to_rgba8();

    let (tex_w, tex_h) = image.dimensions();
    let mut regions = Vec::with_capacity(file.regions.len());
    for r in file.regions {
        if r.x + r.width > tex_w || r.y + r.height > tex_h {
            return Err(AssetError::RegionOutOfBounds {
                path: path.to_path_buf(),
                region: r.name,
            });
        }
        regions.push(AtlasRegion {
            region: TextureRegion::from_pixels(texture, tex_w, tex_h, r.x, r.y, r.width, r.height),
            name: r.name,
            index: r.index,
        });
    }

    Ok((TextureAtlas::new(regions), image, image_path))
}

pub(super) fn load_tile_map(path: &Path) -> Result<TileMap, AssetError> {
    let map: TileMap = parse(path, &read_text(path)?)?;
    map.validate().map_err(|source| AssetError::TileMap {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(map)
}
