// crates/engine_core/src/assets/mod.rs
//! Asset manager: a queue of named files loaded either all at once or one
//! per frame, so a loading screen can report progress.

mod loader;

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;

use engine_shared::{AssetDescriptor, AssetKind, AssetSource, TextureAtlas, TextureId, TileMap, TileMapError};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadingMode {
    /// Everything is loaded before the first frame.
    #[default]
    Sync,
    /// One asset per frame; the runner shows progress meanwhile.
    Async,
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid tile map {path}: {source}")]
    TileMap {
        path: PathBuf,
        #[source]
        source: TileMapError,
    },
    #[error("region `{region}` in {path} lies outside its image")]
    RegionOutOfBounds { path: PathBuf, region: String },
    #[error("asset `{0}` was never loaded")]
    NotLoaded(String),
}

/// Decoded pixels waiting for the renderer to create a GPU texture.
pub struct PendingImage {
    pub id: TextureId,
    pub label: String,
    pub image: RgbaImage,
}

pub struct AssetManager {
    root: PathBuf,
    queue: VecDeque<AssetDescriptor>,
    queued_total: usize,
    loaded_count: usize,
    atlases: HashMap<String, TextureAtlas>,
    maps: HashMap<String, TileMap>,
    pending_images: Vec<PendingImage>,
    next_texture: u32,
}

impl AssetManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            queue: VecDeque::new(),
            queued_total: 0,
            loaded_count: 0,
            atlases: HashMap::new(),
            maps: HashMap::new(),
            pending_images: Vec::new(),
            next_texture: 0,
        }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Queues an asset. Already loaded or queued paths are ignored.
    pub fn load(&mut self, descriptor: AssetDescriptor) {
        if self.is_loaded(&descriptor) || self.queue.contains(&descriptor) {
            return;
        }
        debug!(path = %descriptor.path, kind = ?descriptor.kind, "queued asset");
        self.queue.push_back(descriptor);
        self.queued_total += 1;
    }

    fn is_loaded(&self, descriptor: &AssetDescriptor) -> bool {
        match descriptor.kind {
            AssetKind::Atlas => self.atlases.contains_key(&descriptor.path),
            AssetKind::TileMap => self.maps.contains_key(&descriptor.path),
        }
    }

    /// Loads the next queued asset and returns overall progress in [0, 1].
    pub fn update(&mut self) -> Result<f32, AssetError> {
        if let Some(descriptor) = self.queue.pop_front() {
            self.load_now(&descriptor)?;
            self.loaded_count += 1;
            if self.queue.is_empty() {
                info!(count = self.loaded_count, "assets loaded");
            }
        }
        Ok(self.progress())
    }

    /// Drains the whole queue.
    pub fn finish_loading(&mut self) -> Result<(), AssetError> {
        while !self.queue.is_empty() {
            self.update()?;
        }
        Ok(())
    }

    /// Loads synchronously in `Sync` mode; in `Async` mode leaves the queue
    /// for the frame loop to drain with `update()`.
    pub fn start(&mut self, mode: LoadingMode) -> Result<(), AssetError> {
        match mode {
            LoadingMode::Sync => self.finish_loading(),
            LoadingMode::Async => Ok(()),
        }
    }

    pub fn progress(&self) -> f32 {
        if self.queued_total == 0 {
            1.0
        } else {
            self.loaded_count as f32 / self.queued_total as f32
        }
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Hands decoded images to the renderer; each is returned once.
    pub fn take_pending_images(&mut self) -> Vec<PendingImage> {
        std::mem::take(&mut self.pending_images)
    }

    pub fn require_atlas(&self, path: &str) -> Result<&TextureAtlas, AssetError> {
        self.atlases
            .get(path)
            .ok_or_else(|| AssetError::NotLoaded(path.to_string()))
    }

    pub fn require_tile_map(&self, path: &str) -> Result<&TileMap, AssetError> {
        self.maps
            .get(path)
            .ok_or_else(|| AssetError::NotLoaded(path.to_string()))
    }

    fn load_now(&mut self, descriptor: &AssetDescriptor) -> Result<(), AssetError> {
        let full_path = self.root.join(&descriptor.path);
        match descriptor.kind {
            AssetKind::Atlas => {
                let id = TextureId(self.next_texture);
                let (atlas, image, image_path) = loader::load_atlas(&full_path, id)?;
                self.next_texture += 1;
                debug!(
                    path = %descriptor.path,
                    regions = atlas.regions().len(),
                    width = image.width(),
                    height = image.height(),
                    "loaded atlas"
                );
                self.pending_images.push(PendingImage {
                    id,
                    label: image_path.display().to_string(),
                    image,
                });
                self.atlases.insert(descriptor.path.clone(), atlas);
            }
            AssetKind::TileMap => {
                let map = loader::load_tile_map(&full_path)?;
                debug!(path = %descriptor.path, width = map.width, height = map.height, "loaded tile map");
                self.maps.insert(descriptor.path.clone(), map);
            }
        }
        Ok(())
    }
}

impl AssetSource for AssetManager {
    fn atlas(&self, path: &str) -> Option<&TextureAtlas> {
        self.atlases.get(path)
    }

    fn tile_map(&self, path: &str) -> Option<&TileMap> {
        self.maps.get(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_fixture(root: &Path) {
        fs::create_dir_all(root.join("images")).unwrap();
        fs::create_dir_all(root.join("maps")).unwrap();

        RgbaImage::new(32, 16).save(root.join("images/sprites.png")).unwrap();
        fs::write(
            root.join("images/sprites.ron"),
            r#"(
                image: "sprites.png",
                regions: [
                    (name: "nickel_walk", index: Some(1), x: 16, y: 0, width: 16, height: 16),
                    (name: "nickel_walk", index: Some(0), x: 0, y: 0, width: 16, height: 16),
                ],
            )"#,
        )
        .unwrap();
        fs::write(
            root.join("maps/demo.ron"),
            r#"(width: 1, height: 1, tile_width: 16.0, tile_height: 16.0,
                tileset: "tiles", layers: [(name: "ground", tiles: [0])])"#,
        )
        .unwrap();
    }

    #[test]
    fn async_loading_reports_progress() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let mut assets = AssetManager::new(dir.path());
        assets.load(AssetDescriptor::atlas("images/sprites.ron"));
        assets.load(AssetDescriptor::tile_map("maps/demo.ron"));
        assets.load(AssetDescriptor::tile_map("maps/demo.ron"));
        assets.start(LoadingMode::Async).unwrap();

        assert_eq!(assets.progress(), 0.0);
        assert_eq!(assets.update().unwrap(), 0.5);
        assert!(!assets.is_finished());
        assert_eq!(assets.update().unwrap(), 1.0);
        assert!(assets.is_finished());

        let atlas = assets.atlas("images/sprites.ron").unwrap();
        let frames = atlas.find_regions("nickel_walk");
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].u0, 0.0);
        assert_eq!(frames[1].u0, 0.5);
        assert!(assets.tile_map("maps/demo.ron").is_some());
    }

    #[test]
    fn sync_loading_queues_images_for_upload() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let mut assets = AssetManager::new(dir.path());
        assets.load(AssetDescriptor::atlas("images/sprites.ron"));
        assets.start(LoadingMode::Sync).unwrap();

        let pending = assets.take_pending_images();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, TextureId(0));
        assert_eq!(pending[0].image.dimensions(), (32, 16));
        assert!(assets.take_pending_images().is_empty());

        // Loaded paths are not queued twice.
        assets.load(AssetDescriptor::atlas("images/sprites.ron"));
        assert!(assets.is_finished());
    }

    #[test]
    fn missing_and_invalid_files_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        fs::write(
            dir.path().join("maps/broken.ron"),
            r#"(width: 2, height: 1, tile_width: 16.0, tile_height: 16.0,
                tileset: "tiles", layers: [(name: "ground", tiles: [0])])"#,
        )
        .unwrap();

        let mut assets = AssetManager::new(dir.path());
        assets.load(AssetDescriptor::atlas("images/nope.ron"));
        assert!(matches!(assets.update(), Err(AssetError::Io { .. })));

        assets.load(AssetDescriptor::tile_map("maps/broken.ron"));
        assert!(matches!(assets.update(), Err(AssetError::TileMap { .. })));

        assert!(matches!(assets.require_atlas("images/nope.ron"), Err(AssetError::NotLoaded(_))));
    }

    #[test]
    fn nothing_queued_means_done() {
        let assets = AssetManager::new("unused");
        assert_eq!(assets.progress(), 1.0);
        assert!(assets.is_finished());
    }
}
