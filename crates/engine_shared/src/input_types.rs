// crates/engine_shared/src/input_types.rs
//! Compact input types handed from the platform layer to screens.

/// Stable Integer ID for Actions
pub type ActionId = u32;
pub const ACTION_NOT_FOUND: ActionId = u32::MAX;

/// Number of digital actions an `InputState` can carry.
pub const MAX_ACTIONS: usize = 64;

/// Actions every build registers first, in this order, so their ids are
/// known at compile time on both sides of the engine/game boundary.
pub mod canonical_actions {
    use super::ActionId;

    pub const MOVE_UP: ActionId = 0;
    pub const MOVE_DOWN: ActionId = 1;
    pub const MOVE_LEFT: ActionId = 2;
    pub const MOVE_RIGHT: ActionId = 3;
    pub const PAN_UP: ActionId = 4;
    pub const PAN_DOWN: ActionId = 5;
    pub const PAN_LEFT: ActionId = 6;
    pub const PAN_RIGHT: ActionId = 7;
    pub const SHOOT: ActionId = 8;
    pub const OPEN: ActionId = 9;
    pub const QUIT: ActionId = 10;

    /// Registration names, indexed by id.
    pub const NAMES: [&str; 11] = [
        "MoveUp", "MoveDown", "MoveLeft", "MoveRight",
        "PanUp", "PanDown", "PanLeft", "PanRight",
        "Shoot", "Open", "Quit",
    ];
}

/// Per-frame snapshot of resolved digital actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Bitmask of actions held this frame.
    pub digital_mask: u64,

    /// Bitmask of actions that went from released to held this frame.
    pub pressed_mask: u64,
}

impl InputState {
    /// Builds a snapshot from the current held mask and last frame's held mask.
    pub fn from_masks(current: u64, previous: u64) -> Self {
        Self {
            digital_mask: current,
            pressed_mask: current & !previous,
        }
    }

    /// Safe check; returns false for out-of-range ids (including ACTION_NOT_FOUND).
    pub fn is_active(&self, action_id: ActionId) -> bool {
        bit(action_id).is_some_and(|b| self.digital_mask & b != 0)
    }

    /// True only on the frame the action was first held.
    pub fn just_activated(&self, action_id: ActionId) -> bool {
        bit(action_id).is_some_and(|b| self.pressed_mask & b != 0)
    }

    /// Same held state with the edges removed. Used for the extra fixed
    /// steps of a frame so one key press is not seen twice.
    pub fn without_edges(&self) -> Self {
        Self {
            digital_mask: self.digital_mask,
            pressed_mask: 0,
        }
    }

    pub fn set_active(&mut self, action_id: ActionId) {
        if let Some(b) = bit(action_id) {
            self.digital_mask |= b;
        }
    }
}

fn bit(action_id: ActionId) -> Option<u64> {
    ((action_id as usize) < MAX_ACTIONS).then(|| 1u64 << action_id)
}
