// crates/purse_game/src/entities/entity.rs

use engine_shared::{DrawSurface, TextureRegion};
use glam::Vec2;

use crate::assets::Clip;

/// Axis-aligned box in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { min: origin, max: origin + size }
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Position and liveness shared by every entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityCore {
    /// Bottom-left corner.
    pub position: Vec2,
    pub active: bool,
}

impl EntityCore {
    pub fn new(position: Vec2) -> Self {
        Self { position, active: true }
    }
}

/// Playback clock over a shared clip.
#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    clip: Clip,
    state_time: f32,
}

impl AnimatedSprite {
    pub fn new(clip: Clip) -> Self {
        Self { clip, state_time: 0.0 }
    }

    /// Never moves the clock backwards.
    pub fn advance(&mut self, dt: f32) {
        self.state_time += dt.max(0.0);
    }

    /// Swaps clips and restarts the clock.
    pub fn play(&mut self, clip: Clip) {
        self.clip = clip;
        self.state_time = 0.0;
    }

    pub fn restart(&mut self) {
        self.state_time = 0.0;
    }

    pub fn clip(&self) -> &Clip {
        &self.clip
    }

    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    pub fn is_finished(&self) -> bool {
        self.clip.is_finished(self.state_time)
    }

    pub fn current_frame(&self) -> Option<&TextureRegion> {
        self.clip.key_frame(self.state_time)
    }

    /// Size of the current frame, zero for an empty clip.
    pub fn size(&self) -> Vec2 {
        self.current_frame().map(TextureRegion::size).unwrap_or(Vec2::ZERO)
    }

    pub fn render_at(&self, surface: &mut dyn DrawSurface, position: Vec2) {
        if let Some(frame) = self.current_frame() {
            surface.draw(frame, position.x, position.y, frame.width, frame.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn overlap_is_exclusive_at_edges() {
        let a = Bounds::from_origin_size(Vec2::ZERO, Vec2::splat(16.0));
        let b = Bounds::from_origin_size(Vec2::new(16.0, 0.0), Vec2::splat(16.0));
        let c = Bounds::from_origin_size(Vec2::new(8.0, 8.0), Vec2::splat(16.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c) && c.overlaps(&a));
    }

    #[test]
    fn negative_dt_does_not_rewind() {
        let assets = testing::assets();
        let mut sprite = AnimatedSprite::new(assets.nickel.walk.clone());
        sprite.advance(0.25);
        sprite.advance(-1.0);
        sprite.advance(0.0);
        assert_eq!(sprite.state_time(), 0.25);
    }
}
