// crates/purse_game/src/shake.rs
//! Impact feedback: a copy of the world camera jittered by a random offset
//! whose size decays linearly to zero.
//!
//! The controller never writes to the camera it follows. Each update picks a
//! fresh offset and `sync` re-applies it to a snapshot of the base camera, so
//! the jitter cannot accumulate as drift.

use engine_shared::OrthographicCamera;
use glam::{Mat4, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct ScreenShakeCameraController {
    base: OrthographicCamera,
    shaken: OrthographicCamera,
    magnitude: f32,
    initial_magnitude: f32,
    duration: f32,
    elapsed: f32,
    offset: Vec2,
    rng: StdRng,
}

impl ScreenShakeCameraController {
    pub fn new(camera: &OrthographicCamera) -> Self {
        Self::with_rng(camera, StdRng::from_entropy())
    }

    /// Deterministic jitter, for replays and tests.
    pub fn with_seed(camera: &OrthographicCamera, seed: u64) -> Self {
        Self::with_rng(camera, StdRng::seed_from_u64(seed))
    }

    fn with_rng(camera: &OrthographicCamera, rng: StdRng) -> Self {
        Self {
            base: camera.clone(),
            shaken: camera.clone(),
            magnitude: 0.0,
            initial_magnitude: 0.0,
            duration: 0.0,
            elapsed: 0.0,
            offset: Vec2::ZERO,
            rng,
        }
    }

    /// Starts a shake of up to `magnitude` world units lasting `duration`
    /// seconds. A weaker request never cuts a stronger shake short.
    pub fn shake(&mut self, magnitude: f32, duration: f32) {
        if magnitude <= 0.0 || duration <= 0.0 || magnitude < self.magnitude {
            return;
        }
        self.magnitude = magnitude;
        self.initial_magnitude = magnitude;
        self.duration = duration;
        self.elapsed = 0.0;
    }

    /// Advances the decay and rolls a new offset, then follows `base`.
    pub fn update(&mut self, dt: f32, base: &OrthographicCamera) {
        if self.magnitude > 0.0 {
            self.elapsed += dt.max(0.0);
            if self.elapsed >= self.duration {
                self.magnitude = 0.0;
                self.initial_magnitude = 0.0;
            } else {
                self.magnitude = self.initial_magnitude * (1.0 - self.elapsed / self.duration);
            }
        }

        self.offset = if self.magnitude > 0.0 {
            let m = self.magnitude;
            let offset = Vec2::new(self.rng.gen_range(-m..=m), self.rng.gen_range(-m..=m));
            trace!(dx = offset.x, dy = offset.y, magnitude = m, "shake offset");
            offset
        } else {
            Vec2::ZERO
        };

        self.sync(base);
    }

    /// Rebuilds both cameras from `base` keeping the current offset. Call it
    /// whenever the base camera moves after `update`.
    pub fn sync(&mut self, base: &OrthographicCamera) {
        self.base.clone_from(base);
        self.shaken.clone_from(base);
        if self.offset != Vec2::ZERO {
            self.shaken.translate(self.offset.x, self.offset.y);
            self.shaken.update();
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Projection * view of the jittered camera.
    pub fn combined_matrix(&self) -> Mat4 {
        self.shaken.combined()
    }

    /// The camera without jitter.
    pub fn view_camera(&self) -> &OrthographicCamera {
        &self.base
    }

    pub fn shaken_camera(&self) -> &OrthographicCamera {
        &self.shaken
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    pub fn is_shaking(&self) -> bool {
        self.magnitude > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrthographicCamera {
        OrthographicCamera::new(1280.0, 720.0)
    }

    #[test]
    fn decays_to_exactly_zero_and_matches_base() {
        let base = camera();
        let mut shaker = ScreenShakeCameraController::with_seed(&base, 7);
        shaker.shake(10.0, 0.5);

        shaker.update(0.25, &base);
        assert_eq!(shaker.magnitude(), 5.0);
        let offset = shaker.shaken_camera().position - base.position;
        assert!(offset.x.abs() <= 5.0 && offset.y.abs() <= 5.0);

        shaker.update(0.25, &base);
        assert_eq!(shaker.magnitude(), 0.0);
        assert!(!shaker.is_shaking());
        assert_eq!(shaker.combined_matrix(), base.combined());
        assert_eq!(shaker.view_camera(), &base);
    }

    #[test]
    fn follows_the_base_camera_without_drift() {
        let mut base = camera();
        let mut shaker = ScreenShakeCameraController::with_seed(&base, 1);
        shaker.shake(4.0, 0.1);
        for _ in 0..20 {
            shaker.update(0.016, &base);
        }
        base.translate(-50.0, 0.0);
        base.update();
        shaker.update(0.016, &base);
        assert_eq!(shaker.shaken_camera(), &base);
    }

    #[test]
    fn sync_keeps_the_offset_on_a_moved_camera() {
        let mut base = camera();
        let mut shaker = ScreenShakeCameraController::with_seed(&base, 11);
        shaker.shake(6.0, 1.0);
        shaker.update(0.1, &base);
        let offset = shaker.offset();
        assert_ne!(offset, Vec2::ZERO);

        base.translate(-87.5, 0.0);
        base.update();
        shaker.sync(&base);
        assert_eq!(shaker.view_camera(), &base);
        assert_eq!(shaker.offset(), offset);
        assert_eq!(shaker.shaken_camera().position, base.position + offset.extend(0.0));
    }

    #[test]
    fn weaker_shake_does_not_override() {
        let base = camera();
        let mut shaker = ScreenShakeCameraController::with_seed(&base, 3);
        shaker.shake(8.0, 1.0);
        shaker.update(0.5, &base);
        assert_eq!(shaker.magnitude(), 4.0);

        shaker.shake(2.0, 5.0);
        assert_eq!(shaker.magnitude(), 4.0);
        shaker.shake(6.0, 0.2);
        assert_eq!(shaker.magnitude(), 6.0);
    }

    #[test]
    fn idle_controller_mirrors_base() {
        let base = camera();
        let mut shaker = ScreenShakeCameraController::new(&base);
        shaker.update(0.0, &base);
        assert_eq!(shaker.combined_matrix(), base.combined());
    }
}
