// crates/engine_shared/src/lib.rs
//! Types shared by the platform layer and game code. Nothing in here touches
//! the window or the GPU, so game logic can be tested headless.

pub mod animation;
pub mod assets;
pub mod atlas;
pub mod camera;
pub mod graphics;
pub mod input_types;
pub mod screen;
pub mod tilemap;

pub use animation::{Animation, PlayMode};
pub use assets::{AssetDescriptor, AssetKind, AssetSource};
pub use atlas::{AtlasError, AtlasRegion, TextureAtlas};
pub use camera::OrthographicCamera;
pub use graphics::{Color, DrawSurface, TextureId, TextureRegion};
pub use input_types::{ActionId, InputState, ACTION_NOT_FOUND, canonical_actions};
pub use screen::{Screen, ScreenCommand};
pub use tilemap::{MapObject, TileMap, TileMapError};
