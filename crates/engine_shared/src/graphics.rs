// crates/engine_shared/src/graphics.rs

use glam::{Mat4, Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// Handle to a texture owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// A rectangular part of a texture, in normalized UVs (v grows downwards,
/// as in the source image) plus its size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureRegion {
    pub texture: TextureId,
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
    pub width: f32,
    pub height: f32,
}

impl TextureRegion {
    /// Region covering `(x, y, w, h)` pixels of a `tex_w` x `tex_h` texture.
    pub fn from_pixels(texture: TextureId, tex_w: u32, tex_h: u32, x: u32, y: u32, w: u32, h: u32) -> Self {
        let tw = tex_w.max(1) as f32;
        let th = tex_h.max(1) as f32;
        Self {
            texture,
            u0: x as f32 / tw,
            v0: y as f32 / th,
            u1: (x + w) as f32 / tw,
            v1: (y + h) as f32 / th,
            width: w as f32,
            height: h as f32,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Linear RGBA colour.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Batched 2D drawing target.
///
/// Draw calls are only valid between `begin` and `end`. The projection in
/// effect when a sprite is drawn is the one used to place it on screen.
pub trait DrawSurface {
    /// Clears the frame buffer. Called once per frame before any scope.
    fn clear(&mut self, color: Color);

    fn set_projection_matrix(&mut self, projection: Mat4);

    fn begin(&mut self);

    /// Draws `region` with its bottom-left corner at `(x, y)`, stretched to
    /// `width` x `height` world units.
    fn draw(&mut self, region: &TextureRegion, x: f32, y: f32, width: f32, height: f32);

    /// Tint applied to subsequent draws.
    fn set_color(&mut self, color: Color);

    fn end(&mut self);

    fn is_drawing(&self) -> bool;
}
