// crates/engine_core/src/platform_runner.rs

use std::fmt::Display;
use std::sync::Arc;

use engine_shared::{Color, DrawSurface, Screen, ScreenCommand};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::app::App;
use crate::assets::{AssetError, AssetManager};
use crate::engine_loop::EngineLoop;
use crate::input::InputPoller;
use crate::renderer::{RenderError, Renderer, SpriteBatch};

const LOADING_CLEAR: Color = Color::rgba(0.05, 0.05, 0.08, 1.0);

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Assets(#[from] AssetError),
    #[error("failed to build the first screen: {0}")]
    Screen(String),
    #[error("out of GPU memory")]
    OutOfMemory,
}

enum Phase {
    Loading,
    Running(Box<dyn Screen>),
}

/// Owns App and runs the platform (winit) event loop.
/// This isolates OS interaction from the engine core.
pub struct PlatformRunner {
    app: App,
}

impl PlatformRunner {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    /// Opens the window and runs until the screen exits or the window closes.
    ///
    /// Queued assets are drained one per frame until done (a no-op if they
    /// were already loaded synchronously); then `build` creates the screen.
    pub fn start<F, E>(self, mut assets: AssetManager, build: F) -> Result<(), RunnerError>
    where
        F: FnOnce(&AssetManager) -> Result<Box<dyn Screen>, E>,
        E: Display,
    {
        let config = &self.app.config;
        let event_loop = EventLoop::new()?;
        let window: Arc<Window> = Arc::new(
            WindowBuilder::new()
                .with_title(self.app.window_title())
                .with_inner_size(LogicalSize::new(config.window_width, config.window_height))
                .build(&event_loop)?,
        );

        let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;
        let mut batch = SpriteBatch::new();

        let mut engine_loop = EngineLoop::new(config.fixed_timestep, config.max_steps_per_frame);
        let mut input_poller = InputPoller::new();
        let input_map = &self.app.input_map;

        let mut phase = Phase::Loading;
        let mut build = Some(build);
        let mut failure: Option<RunnerError> = None;
        let failure_slot = &mut failure;

        info!(title = %self.app.window_title(), "window opened");

        event_loop.run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { event: win_event, .. } => match win_event {
                    WindowEvent::CloseRequested => elwt.exit(),

                    WindowEvent::Resized(size) => {
                        renderer.resize(size);
                        if let Phase::Running(screen) = &mut phase {
                            let logical: LogicalSize<f32> = size.to_logical(window.scale_factor());
                            screen.resize(logical.width, logical.height);
                        }
                    }

                    WindowEvent::RedrawRequested => {
                        // --- RENDER PHASE ---
                        match &mut phase {
                            Phase::Running(screen) => screen.render(&mut batch),
                            Phase::Loading => batch.clear(LOADING_CLEAR),
                        }

                        match renderer.render(&mut batch) {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                                warn!("surface lost/outdated; reconfiguring swapchain");
                                renderer.resize(window.inner_size());
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                error!("out of GPU memory; exiting");
                                *failure_slot = Some(RunnerError::OutOfMemory);
                                elwt.exit();
                            }
                            Err(wgpu::SurfaceError::Timeout) => {
                                warn!("surface timeout; skipping this frame");
                            }
                        }
                    }

                    other => input_poller.handle_event(&other),
                },

                Event::AboutToWait => {
                    // --- UPDATE PHASE ---
                    let frame_dt = engine_loop.tick_timer();
                    let input_state = input_poller.snapshot(input_map);

                    match &mut phase {
                        Phase::Loading => match assets.update() {
                            Ok(progress) => {
                                debug!(progress, "loading assets");
                                if assets.is_finished() {
                                    renderer.upload_images(assets.take_pending_images());
                                    let Some(build) = build.take() else { return };
                                    match build(&assets) {
                                        Ok(mut screen) => {
                                            let logical: LogicalSize<f32> =
                                                window.inner_size().to_logical(window.scale_factor());
                                            screen.resize(logical.width, logical.height);
                                            phase = Phase::Running(screen);
                                            engine_loop.reset_timer();
                                            info!("screen ready");
                                        }
                                        Err(e) => {
                                            error!(error = %e, "failed to build screen");
                                            *failure_slot = Some(RunnerError::Screen(e.to_string()));
                                            elwt.exit();
                                        }
                                    }
                                }
                            }
                            Err(e) => {
                                error!(error = %e, "asset loading failed");
                                *failure_slot = Some(e.into());
                                elwt.exit();
                            }
                        },

                        Phase::Running(screen) => {
                            // Assets queued after startup still need textures.
                            let pending = assets.take_pending_images();
                            if !pending.is_empty() {
                                renderer.upload_images(pending);
                            }

                            let command =
                                engine_loop.update_simulation(frame_dt, screen.as_mut(), &input_state);
                            if command == ScreenCommand::Exit {
                                info!("screen requested exit");
                                elwt.exit();
                            }
                        }
                    }

                    window.request_redraw();
                }

                _ => {}
            }
        })?;

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
