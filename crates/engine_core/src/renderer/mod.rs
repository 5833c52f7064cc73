// crates/engine_core/src/renderer/mod.rs
pub mod context;
pub mod sprite_batch;
pub mod sprite_pass;
pub mod textures;
pub mod types;

use std::sync::Arc;

use winit::window::Window;

use crate::assets::PendingImage;

use self::context::GraphicsContext;
pub use self::context::RenderError;
pub use self::sprite_batch::{DrawScope, RecordedFrame, SpriteBatch};
use self::sprite_pass::SpritePass;
use self::textures::TextureStore;

pub struct Renderer {
    ctx: GraphicsContext,
    sprite_pass: SpritePass,
    textures: TextureStore,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let ctx = GraphicsContext::new(window).await?;
        let sprite_pass = SpritePass::new(&ctx);
        let textures = TextureStore::new(&ctx);

        Ok(Self {
            ctx,
            sprite_pass,
            textures,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
    }

    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.ctx.size
    }

    /// Creates GPU textures for freshly decoded images.
    pub fn upload_images(&mut self, images: Vec<PendingImage>) {
        for image in images {
            self.textures
                .upload(&self.ctx, self.sprite_pass.texture_layout(), image);
        }
    }

    /// Replays everything recorded in `batch` since the last frame.
    pub fn render(&mut self, batch: &mut SpriteBatch) -> Result<(), wgpu::SurfaceError> {
        let frame = batch.take_frame();

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        self.sprite_pass
            .draw(&self.ctx, &mut encoder, &view, &frame, &self.textures);

        // Submit and Cleanup
        self.ctx.queue.submit(std::iter::once(encoder.finish()));

        // Now it's safe to recall the staging belt memory for next frame
        self.sprite_pass.cleanup();

        output.present();
        Ok(())
    }
}
