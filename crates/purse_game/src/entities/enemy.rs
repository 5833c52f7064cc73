// crates/purse_game/src/entities/enemy.rs

use engine_shared::DrawSurface;
use glam::Vec2;
use tracing::debug;

use super::entity::{AnimatedSprite, Bounds, EntityCore};
use super::GameEntity;
use crate::assets::{Clip, CoinClips};

/// Walk speeds are authored in world units per millisecond.
const SPEED_SCALE: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Penny,
    Nickel,
    Dime,
    Quarter,
}

/// Starting stats of an enemy kind. Kinds differ only in data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyPreset {
    pub health: u32,
    pub speed: f32,
    /// Score for collecting it.
    pub value: u32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [Self::Penny, Self::Nickel, Self::Dime, Self::Quarter];

    pub fn preset(self) -> EnemyPreset {
        match self {
            EnemyKind::Penny => EnemyPreset { health: 10, speed: 0.08, value: 1 },
            EnemyKind::Nickel => EnemyPreset { health: 30, speed: 0.05, value: 5 },
            EnemyKind::Dime => EnemyPreset { health: 20, speed: 0.1, value: 10 },
            EnemyKind::Quarter => EnemyPreset { health: 50, speed: 0.03, value: 25 },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Penny => "penny",
            EnemyKind::Nickel => "nickel",
            EnemyKind::Dime => "dime",
            EnemyKind::Quarter => "quarter",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Alive,
    /// Health hit zero; the pickup clip is playing.
    Dying,
    /// Terminal. Not updated, not drawn, removed by the owner.
    Collected,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    core: EntityCore,
    sprite: AnimatedSprite,
    pickup: Clip,
    kind: EnemyKind,
    health: u32,
    speed: f32,
    heading: f32,
    patrol: Option<(f32, f32)>,
    state: EnemyState,
}

impl Enemy {
    /// Enemy using its kind's preset stats.
    pub fn new(kind: EnemyKind, clips: &CoinClips, position: Vec2) -> Self {
        let preset = kind.preset();
        Self::with_stats(kind, clips.walk.clone(), clips.pickup.clone(), preset.health, preset.speed, position)
    }

    pub fn with_stats(kind: EnemyKind, walk: Clip, pickup: Clip, health: u32, speed: f32, position: Vec2) -> Self {
        Self {
            core: EntityCore::new(position),
            sprite: AnimatedSprite::new(walk),
            pickup,
            kind,
            health,
            speed,
            heading: 1.0,
            patrol: None,
            state: if health > 0 { EnemyState::Alive } else { EnemyState::Collected },
        }
    }

    /// Restricts walking to `min_x..=max_x` (the left edge of the sprite).
    /// Without a patrol range the enemy keeps walking in one direction.
    pub fn set_patrol(&mut self, min_x: f32, max_x: f32) {
        self.patrol = Some((min_x.min(max_x), min_x.max(max_x)));
    }

    /// Removes up to `amount` health. Returns true if this call killed it.
    pub fn damage(&mut self, amount: u32) -> bool {
        if self.state != EnemyState::Alive || amount == 0 {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health > 0 {
            return false;
        }

        debug!(kind = self.kind.name(), "enemy collected, playing pickup");
        self.state = EnemyState::Dying;
        self.sprite.play(self.pickup.clone());
        true
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn value(&self) -> u32 {
        self.kind.preset().value
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == EnemyState::Alive
    }

    pub fn position(&self) -> Vec2 {
        self.core.position
    }

    pub fn sprite(&self) -> &AnimatedSprite {
        &self.sprite
    }

    fn walk(&mut self, dt: f32) {
        let pos = &mut self.core.position;
        pos.x += self.heading * self.speed * SPEED_SCALE * dt;

        if let Some((min_x, max_x)) = self.patrol {
            if pos.x >= max_x {
                pos.x = max_x;
                self.heading = -1.0;
            } else if pos.x <= min_x {
                pos.x = min_x;
                self.heading = 1.0;
            }
        }
    }
}

impl GameEntity for Enemy {
    fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        match self.state {
            EnemyState::Alive => {
                self.sprite.advance(dt);
                self.walk(dt);
            }
            EnemyState::Dying => {
                self.sprite.advance(dt);
                if self.sprite.is_finished() {
                    self.state = EnemyState::Collected;
                    self.core.active = false;
                }
            }
            EnemyState::Collected => {}
        }
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        if self.state == EnemyState::Collected {
            return;
        }
        self.sprite.render_at(surface, self.core.position);
    }

    fn is_removable(&self) -> bool {
        self.state == EnemyState::Collected
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_origin_size(self.core.position, self.sprite.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, RecordingSurface};

    fn nickel() -> Enemy {
        let assets = testing::assets();
        Enemy::new(EnemyKind::Nickel, &assets.nickel, Vec2::new(100.0, 50.0))
    }

    #[test]
    fn nickel_preset() {
        let e = nickel();
        assert_eq!(e.health(), 30);
        assert_eq!(e.speed(), 0.05);
        assert_eq!(e.state(), EnemyState::Alive);
        assert_eq!(EnemyKind::from_name("Nickel"), Some(EnemyKind::Nickel));
        assert_eq!(EnemyKind::from_name("euro"), None);
    }

    #[test]
    fn collected_after_one_pickup_cycle() {
        let mut e = nickel();
        assert!(e.damage(30));
        assert_eq!(e.health(), 0);
        assert_eq!(e.state(), EnemyState::Dying);

        for _ in 0..3 {
            e.update(0.075);
        }
        assert_eq!(e.state(), EnemyState::Dying);
        e.update(0.075);
        assert_eq!(e.state(), EnemyState::Collected);
        assert!(e.is_removable());

        let mut surface = RecordingSurface::default();
        surface.begin();
        e.render(&mut surface);
        surface.end();
        assert!(surface.draws().is_empty());
    }

    #[test]
    fn collected_at_sixty_hertz() {
        let mut e = nickel();
        e.damage(30);
        for _ in 0..17 {
            e.update(1.0 / 60.0);
        }
        assert_eq!(e.state(), EnemyState::Dying);
        e.update(1.0 / 60.0);
        assert_eq!(e.state(), EnemyState::Collected);
    }

    #[test]
    fn health_never_increases() {
        let mut e = nickel();
        assert!(!e.damage(10));
        assert_eq!(e.health(), 20);
        assert!(!e.damage(0));
        assert!(e.damage(1000));
        assert_eq!(e.health(), 0);
        assert!(!e.damage(5));
        assert_eq!(e.health(), 0);
    }

    #[test]
    fn zero_dt_changes_nothing() {
        let mut e = nickel();
        e.update(0.13);
        let before = (e.position(), e.sprite().state_time());
        for _ in 0..10 {
            e.update(0.0);
        }
        assert_eq!((e.position(), e.sprite().state_time()), before);
    }

    #[test]
    fn walks_and_turns_at_patrol_bounds() {
        let mut e = nickel();
        e.set_patrol(90.0, 110.0);
        e.update(0.1); // 0.05 * 1000 * 0.1 = 5 units
        assert_eq!(e.position().x, 105.0);
        e.update(0.2);
        assert_eq!(e.position().x, 110.0);
        e.update(0.1);
        assert_eq!(e.position().x, 105.0);
    }

    #[test]
    fn dying_enemy_stops_walking() {
        let mut e = nickel();
        e.damage(30);
        let x = e.position().x;
        e.update(0.1);
        assert_eq!(e.position().x, x);
    }
}
