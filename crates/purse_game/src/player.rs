// crates/purse_game/src/player.rs

use engine_shared::canonical_actions::{MOVE_DOWN, MOVE_LEFT, MOVE_RIGHT, MOVE_UP, OPEN, SHOOT};
use engine_shared::{DrawSurface, InputState, TextureRegion};
use glam::Vec2;
use tracing::debug;

use crate::assets::{Clip, GameAssets};
use crate::entities::{Bounds, EntityCore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Idle,
    /// Spit clip playing once.
    Shoot,
    /// Held open; collects coins it touches.
    Open,
}

#[derive(Debug, Clone)]
pub struct Player {
    core: EntityCore,
    velocity: Vec2,
    speed: f32,
    action: PlayerAction,
    action_time: f32,
    idle: TextureRegion,
    shoot: Clip,
    open: Clip,
}

impl Player {
    pub fn new(assets: &GameAssets, spawn: Vec2, speed: f32) -> Self {
        Self {
            core: EntityCore::new(spawn),
            velocity: Vec2::ZERO,
            speed,
            action: PlayerAction::Idle,
            action_time: 0.0,
            idle: assets.player,
            shoot: assets.player_shoot.clone(),
            open: assets.player_open.clone(),
        }
    }

    pub fn update(&mut self, input: &InputState, dt: f32) {
        let dt = dt.max(0.0);

        let mut dir = Vec2::ZERO;
        if input.is_active(MOVE_UP) {
            dir.y += 1.0;
        }
        if input.is_active(MOVE_DOWN) {
            dir.y -= 1.0;
        }
        if input.is_active(MOVE_LEFT) {
            dir.x -= 1.0;
        }
        if input.is_active(MOVE_RIGHT) {
            dir.x += 1.0;
        }

        self.velocity = dir.normalize_or_zero() * self.speed;
        self.core.position += self.velocity * dt;

        // Open wins over shooting and interrupts it.
        if input.is_active(OPEN) {
            if self.action == PlayerAction::Open {
                self.action_time += dt;
            } else {
                self.set_action(PlayerAction::Open);
            }
            return;
        }

        match self.action {
            PlayerAction::Open => self.set_action(PlayerAction::Idle),
            PlayerAction::Shoot => {
                self.action_time += dt;
                if self.shoot.is_finished(self.action_time) {
                    self.set_action(PlayerAction::Idle);
                }
            }
            PlayerAction::Idle => {}
        }

        if self.action == PlayerAction::Idle && input.just_activated(SHOOT) {
            self.set_action(PlayerAction::Shoot);
        }
    }

    fn set_action(&mut self, action: PlayerAction) {
        debug!(from = ?self.action, to = ?action, "player action");
        self.action = action;
        self.action_time = 0.0;
    }

    fn current_frame(&self) -> &TextureRegion {
        let frame = match self.action {
            PlayerAction::Idle => None,
            PlayerAction::Shoot => self.shoot.key_frame(self.action_time),
            PlayerAction::Open => self.open.key_frame(self.action_time),
        };
        frame.unwrap_or(&self.idle)
    }

    pub fn render(&self, surface: &mut dyn DrawSurface) {
        let frame = self.current_frame();
        let pos = self.core.position;
        surface.draw(frame, pos.x, pos.y, frame.width, frame.height);
    }

    /// Keeps the whole sprite inside `min..max`.
    pub fn clamp_to(&mut self, min: Vec2, max: Vec2) {
        let upper = (max - self.idle.size()).max(min);
        self.core.position = self.core.position.clamp(min, upper);
    }

    pub fn position(&self) -> Vec2 {
        self.core.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn action(&self) -> PlayerAction {
        self.action
    }

    pub fn action_time(&self) -> f32 {
        self.action_time
    }

    pub fn is_shooting(&self) -> bool {
        self.action == PlayerAction::Shoot
    }

    pub fn is_open(&self) -> bool {
        self.action == PlayerAction::Open
    }

    /// Collision box; uses the idle sprite so opening does not change reach.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_origin_size(self.core.position, self.idle.size())
    }
}
