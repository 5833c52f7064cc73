// crates/engine_core/src/renderer/sprite_batch.rs
//! CPU side of sprite drawing. Screens draw into a `SpriteBatch` through
//! the `DrawSurface` trait; the renderer later replays the recorded scopes
//! on the GPU. Keeping the recorder free of GPU handles lets it be tested
//! without a device.

use engine_shared::{Color, DrawSurface, TextureId, TextureRegion};
use glam::Mat4;
use tracing::warn;

use super::types::SpriteInstance;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteCommand {
    pub texture: TextureId,
    pub instance: SpriteInstance,
}

/// Sprites drawn under one projection, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawScope {
    pub projection: Mat4,
    pub sprites: Vec<SpriteCommand>,
}

/// Everything recorded for one presented frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedFrame {
    pub clear_color: Option<Color>,
    pub scopes: Vec<DrawScope>,
}

impl RecordedFrame {
    pub fn sprite_count(&self) -> usize {
        self.scopes.iter().map(|s| s.sprites.len()).sum()
    }
}

pub struct SpriteBatch {
    projection: Mat4,
    color: Color,
    drawing: bool,
    current: Vec<SpriteCommand>,
    frame: RecordedFrame,
}

impl Default for SpriteBatch {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            color: Color::WHITE,
            drawing: false,
            current: Vec::new(),
            frame: RecordedFrame::default(),
        }
    }
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        self.frame.scopes.push(DrawScope {
            projection: self.projection,
            sprites: std::mem::take(&mut self.current),
        });
    }

    /// Takes the recorded frame, leaving the batch ready for the next one.
    pub fn take_frame(&mut self) -> RecordedFrame {
        if self.drawing {
            warn!("frame taken while a batch scope is still open; closing it");
            self.end();
        }
        std::mem::take(&mut self.frame)
    }
}

impl DrawSurface for SpriteBatch {
    fn clear(&mut self, color: Color) {
        self.frame.clear_color = Some(color);
    }

    fn set_projection_matrix(&mut self, projection: Mat4) {
        if self.drawing {
            self.flush();
        }
        self.projection = projection;
    }

    fn begin(&mut self) {
        if self.drawing {
            warn!("SpriteBatch::begin called twice without end");
            return;
        }
        self.drawing = true;
    }

    fn draw(&mut self, region: &TextureRegion, x: f32, y: f32, width: f32, height: f32) {
        if !self.drawing {
            warn!("SpriteBatch::draw called outside begin/end; sprite dropped");
            return;
        }
        self.current.push(SpriteCommand {
            texture: region.texture,
            instance: SpriteInstance {
                rect: [x, y, width, height],
                uv_rect: [region.u0, region.v0, region.u1, region.v1],
                color: [self.color.r, self.color.g, self.color.b, self.color.a],
            },
        });
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn end(&mut self) {
        if !self.drawing {
            warn!("SpriteBatch::end called without begin");
            return;
        }
        self.flush();
        self.drawing = false;
    }

    fn is_drawing(&self) -> bool {
        self.drawing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(tex: u32) -> TextureRegion {
        TextureRegion::from_pixels(TextureId(tex), 16, 16, 0, 0, 16, 16)
    }

    #[test]
    fn scopes_keep_projection_and_order() {
        let world = Mat4::from_scale(glam::Vec3::splat(2.0));
        let map = Mat4::from_scale(glam::Vec3::splat(3.0));

        let mut batch = SpriteBatch::new();
        batch.clear(Color::BLACK);
        batch.set_projection_matrix(world);
        batch.begin();
        batch.draw(&region(0), 1.0, 2.0, 16.0, 16.0);
        batch.draw(&region(1), 3.0, 4.0, 16.0, 16.0);
        batch.end();
        batch.set_projection_matrix(map);
        batch.begin();
        batch.draw(&region(0), 5.0, 6.0, 8.0, 8.0);
        batch.end();

        let frame = batch.take_frame();
        assert_eq!(frame.clear_color, Some(Color::BLACK));
        assert_eq!(frame.scopes.len(), 2);
        assert_eq!(frame.scopes[0].projection, world);
        assert_eq!(frame.scopes[0].sprites[1].instance.rect, [3.0, 4.0, 16.0, 16.0]);
        assert_eq!(frame.scopes[1].projection, map);
        assert_eq!(frame.sprite_count(), 3);

        assert_eq!(batch.take_frame(), RecordedFrame::default());
    }

    #[test]
    fn projection_change_inside_scope_splits_it() {
        let mut batch = SpriteBatch::new();
        batch.begin();
        batch.draw(&region(0), 0.0, 0.0, 1.0, 1.0);
        batch.set_projection_matrix(Mat4::from_scale(glam::Vec3::splat(2.0)));
        batch.draw(&region(0), 0.0, 0.0, 1.0, 1.0);
        batch.end();

        let frame = batch.take_frame();
        assert_eq!(frame.scopes.len(), 2);
        assert_eq!(frame.scopes[0].projection, Mat4::IDENTITY);
    }

    #[test]
    fn misuse_is_ignored() {
        let mut batch = SpriteBatch::new();
        batch.draw(&region(0), 0.0, 0.0, 1.0, 1.0);
        batch.end();
        batch.begin();
        batch.begin();
        assert!(batch.is_drawing());
        batch.set_color(Color::rgba(1.0, 0.0, 0.0, 0.5));
        batch.draw(&region(0), 0.0, 0.0, 1.0, 1.0);

        // An unterminated scope is closed when the frame is taken.
        let frame = batch.take_frame();
        assert_eq!(frame.sprite_count(), 1);
        assert_eq!(frame.scopes[0].sprites[0].instance.color, [1.0, 0.0, 0.0, 0.5]);
        assert!(!batch.is_drawing());
    }
}
