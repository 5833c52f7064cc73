// crates/engine_core/src/engine_loop.rs

use std::time::Instant;

use engine_shared::{InputState, Screen, ScreenCommand};
use tracing::trace;

/// Largest frame delta fed to the simulation, in seconds.
const MAX_FRAME_DT: f32 = 0.25;

/// Encapsulates fixed-timestep simulation bookkeeping (time, accumulator, limits).
pub struct EngineLoop {
    last_frame_time: Instant,
    sim_accumulator: f32,
    sim_dt: f32,
    max_steps_per_frame: u32,
    /// Press edges seen by frames too short to run a step.
    pending_edges: u64,
}

impl EngineLoop {
    pub fn new(sim_dt: f32, max_steps_per_frame: u32) -> Self {
        Self {
            last_frame_time: Instant::now(),
            sim_accumulator: 0.0,
            sim_dt: sim_dt.max(f32::EPSILON),
            max_steps_per_frame: max_steps_per_frame.max(1),
            pending_edges: 0,
        }
    }

    /// Restarts the frame timer, e.g. after a long loading phase.
    pub fn reset_timer(&mut self) {
        self.last_frame_time = Instant::now();
        self.sim_accumulator = 0.0;
        self.pending_edges = 0;
    }

    /// Update the frame timer and return the clamped frame delta.
    /// Clamps to 0.25s to avoid giant spikes when dragging the window,
    /// hitting breakpoints, etc.
    pub fn tick_timer(&mut self) -> f32 {
        let now = Instant::now();
        let frame_dt = now
            .duration_since(self.last_frame_time)
            .as_secs_f32();
        self.last_frame_time = now;

        frame_dt.min(MAX_FRAME_DT)
    }

    /// Runs fixed-timestep simulation steps until the accumulator is caught up
    /// or we hit max_steps_per_frame. If the backlog still remains at the cap,
    /// we drop it, to avoid "chasing" an infinite backlog under heavy load.
    ///
    /// Just-pressed edges are held back until a step runs, and only that
    /// first step sees them. Stops early and returns `Exit` as soon as the
    /// screen asks for it.
    pub fn update_simulation(
        &mut self,
        frame_dt: f32,
        screen: &mut dyn Screen,
        input_state: &InputState,
    ) -> ScreenCommand {
        self.sim_accumulator += frame_dt.max(0.0);

        self.pending_edges |= input_state.pressed_mask;

        let mut steps = 0;
        let mut input = InputState {
            digital_mask: input_state.digital_mask,
            pressed_mask: self.pending_edges,
        };
        while self.sim_accumulator >= self.sim_dt && steps < self.max_steps_per_frame {
            self.pending_edges = 0;
            if screen.update(&input, self.sim_dt) == ScreenCommand::Exit {
                return ScreenCommand::Exit;
            }
            input = input.without_edges();
            self.sim_accumulator -= self.sim_dt;
            steps += 1;
        }

        // Prevent unbounded backlog if we're constantly saturated.
        if steps == self.max_steps_per_frame && self.sim_accumulator >= self.sim_dt {
            trace!(backlog = self.sim_accumulator, "dropping simulation backlog");
            self.sim_accumulator = 0.0;
        }

        ScreenCommand::Continue
    }
}
