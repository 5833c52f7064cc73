// crates/engine_core/src/lib.rs
//! Platform layer: window, input, assets, sprite rendering and the frame
//! loop that drives an `engine_shared::Screen`.

pub mod app;
pub mod assets;
pub mod config;
pub mod engine_loop;
pub mod input;
pub mod logging;
pub mod platform_runner;
pub mod renderer;

pub use app::App;
pub use assets::{AssetError, AssetManager, LoadingMode};
pub use config::{EngineConfig, KeyBinding};
pub use platform_runner::{PlatformRunner, RunnerError};
