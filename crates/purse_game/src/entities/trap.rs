// crates/purse_game/src/entities/trap.rs

use engine_shared::DrawSurface;
use glam::Vec2;

use super::entity::{AnimatedSprite, Bounds, EntityCore};
use super::GameEntity;
use crate::assets::Clip;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrapKind {
    Spring,
    Tack,
}

impl TrapKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "spring" => Some(Self::Spring),
            "tack" => Some(Self::Tack),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Up, Self::Down, Self::Left, Self::Right]
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }
}

/// Static hazard that plays its clip once when triggered, then re-arms.
#[derive(Debug, Clone)]
pub struct Trap {
    core: EntityCore,
    sprite: AnimatedSprite,
    kind: TrapKind,
    direction: Direction,
    armed: bool,
}

impl Trap {
    pub fn new(kind: TrapKind, direction: Direction, clip: Clip, position: Vec2) -> Self {
        Self {
            core: EntityCore::new(position),
            sprite: AnimatedSprite::new(clip),
            kind,
            direction,
            armed: true,
        }
    }

    /// Fires the trap. Returns false while it is still playing.
    pub fn trigger(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        self.armed = false;
        self.sprite.restart();
        true
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn kind(&self) -> TrapKind {
        self.kind
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn sprite(&self) -> &AnimatedSprite {
        &self.sprite
    }
}

impl GameEntity for Trap {
    fn update(&mut self, dt: f32) {
        // The clock only runs while firing; armed traps rest on frame 0.
        if self.armed {
            return;
        }
        self.sprite.advance(dt);
        if self.sprite.is_finished() {
            self.sprite.restart();
            self.armed = true;
        }
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        self.sprite.render_at(surface, self.core.position);
    }

    fn is_removable(&self) -> bool {
        false
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_origin_size(self.core.position, self.sprite.size())
    }
}
