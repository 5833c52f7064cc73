// crates/purse_game/src/entities/mod.rs
//! Everything that lives in the GameScreen's entity list.

mod enemy;
mod entity;
mod trap;

use engine_shared::DrawSurface;

pub use enemy::{Enemy, EnemyKind, EnemyPreset, EnemyState};
pub use entity::{AnimatedSprite, Bounds, EntityCore};
pub use trap::{Direction, Trap, TrapKind};

/// Per-frame lifecycle shared by all entities.
pub trait GameEntity {
    /// Advances time-based state by `dt` seconds. Negative `dt` counts as 0.
    fn update(&mut self, dt: f32);

    /// Draws the current frame. Must be called inside a begin/end scope.
    fn render(&self, surface: &mut dyn DrawSurface);

    /// True once the entity should be dropped from the list.
    fn is_removable(&self) -> bool;

    fn bounds(&self) -> Bounds;
}

#[derive(Debug, Clone)]
pub enum Entity {
    Enemy(Enemy),
    Trap(Trap),
}

impl GameEntity for Entity {
    fn update(&mut self, dt: f32) {
        match self {
            Entity::Enemy(e) => e.update(dt),
            Entity::Trap(t) => t.update(dt),
        }
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        match self {
            Entity::Enemy(e) => e.render(surface),
            Entity::Trap(t) => t.render(surface),
        }
    }

    fn is_removable(&self) -> bool {
        match self {
            Entity::Enemy(e) => e.is_removable(),
            Entity::Trap(t) => t.is_removable(),
        }
    }

    fn bounds(&self) -> Bounds {
        match self {
            Entity::Enemy(e) => e.bounds(),
            Entity::Trap(t) => t.bounds(),
        }
    }
}

impl From<Enemy> for Entity {
    fn from(enemy: Enemy) -> Self {
        Entity::Enemy(enemy)
    }
}

impl From<Trap> for Entity {
    fn from(trap: Trap) -> Self {
        Entity::Trap(trap)
    }
}
