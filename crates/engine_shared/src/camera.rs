// crates/engine_shared/src/camera.rs

use glam::{Mat4, Vec2, Vec3};

/// 2D orthographic camera. Matrices are cached and only recomputed by
/// `update()`, so moving the camera has no visible effect until then.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicCamera {
    pub position: Vec3,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub zoom: f32,
    pub near: f32,
    pub far: f32,

    projection: Mat4,
    view: Mat4,
    combined: Mat4,
}

impl OrthographicCamera {
    /// Camera looking at the centre of a `width` x `height` viewport whose
    /// bottom-left corner sits on the world origin.
    pub fn new(width: f32, height: f32) -> Self {
        let mut camera = Self {
            position: Vec3::new(width / 2.0, height / 2.0, 0.0),
            viewport_width: width,
            viewport_height: height,
            zoom: 1.0,
            near: -1.0,
            far: 1.0,
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            combined: Mat4::IDENTITY,
        };
        camera.update();
        camera
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Recomputes projection, view and combined matrices.
    pub fn update(&mut self) {
        let half_w = self.zoom * self.viewport_width / 2.0;
        let half_h = self.zoom * self.viewport_height / 2.0;
        self.projection = Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.near, self.far);
        self.view = Mat4::from_translation(-self.position);
        self.combined = self.projection * self.view;
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn combined(&self) -> Mat4 {
        self.combined
    }

    /// World-space rectangle currently visible, as (min, max) corners.
    pub fn visible_bounds(&self) -> (Vec2, Vec2) {
        let half = Vec2::new(self.viewport_width, self.viewport_height) * self.zoom / 2.0;
        let center = self.position.truncate();
        (center - half, center + half)
    }
}
