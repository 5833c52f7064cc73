// crates/engine_shared/src/animation.rs
//! Time-indexed animation clips.
//!
//! A clip is immutable once built and is shared between every entity that
//! plays it. Playback state (the clock) lives on the entity, so the clip only
//! answers "which frame is shown at time t".

use serde::{Deserialize, Serialize};

/// Fraction of a frame forgiven when converting a clock to a frame number.
/// Summing many small `dt` values in f32 lands a hair short of exact frame
/// boundaries otherwise.
const FRAME_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayMode {
    /// Plays once and holds the last frame.
    #[default]
    Normal,
    /// Plays once backwards and holds the first frame.
    Reversed,
    Loop,
    LoopReversed,
    /// 0, 1, .., n-1, n-2, .., 1, 0, 1, ..
    LoopPingPong,
}

#[derive(Debug, Clone)]
pub struct Animation<T> {
    frames: Vec<T>,
    frame_duration: f32,
    mode: PlayMode,
}

impl<T> Animation<T> {
    pub fn new(frame_duration: f32, frames: Vec<T>, mode: PlayMode) -> Self {
        Self {
            frames,
            frame_duration: frame_duration.max(0.0),
            mode,
        }
    }

    pub fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn frames(&self) -> &[T] {
        &self.frames
    }

    /// Length of one pass over the frames.
    pub fn animation_duration(&self) -> f32 {
        self.frames.len() as f32 * self.frame_duration
    }

    /// Raw frame counter for a clock value.
    fn frame_number(&self, state_time: f32) -> usize {
        if self.frame_duration <= 0.0 {
            return 0;
        }
        let n = state_time.max(0.0) / self.frame_duration + FRAME_EPSILON;
        n.floor() as usize
    }

    /// Index into `frames()` shown at `state_time`. Zero for empty clips.
    pub fn key_frame_index(&self, state_time: f32) -> usize {
        let len = self.frames.len();
        if len <= 1 {
            return 0;
        }

        let n = self.frame_number(state_time);
        match self.mode {
            PlayMode::Normal => n.min(len - 1),
            PlayMode::Reversed => (len - 1).saturating_sub(n),
            PlayMode::Loop => n % len,
            PlayMode::LoopReversed => len - 1 - n % len,
            PlayMode::LoopPingPong => {
                let i = n % (len * 2 - 2);
                if i >= len { len - 2 - (i - len) } else { i }
            }
        }
    }

    pub fn key_frame(&self, state_time: f32) -> Option<&T> {
        self.frames.get(self.key_frame_index(state_time))
    }

    /// True once a full pass has been played. Looping clips report this too,
    /// which is how callers detect "one cycle completed".
    pub fn is_finished(&self, state_time: f32) -> bool {
        self.frame_number(state_time) >= self.frames.len()
    }
}
