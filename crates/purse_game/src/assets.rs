// crates/purse_game/src/assets.rs
//! Animation clips and regions cut out of the sprite atlas once at startup.
//! Entities receive the `Rc` clips they need; nobody looks assets up later.

use std::rc::Rc;

use engine_shared::{Animation, AtlasError, PlayMode, TextureAtlas, TextureRegion};

use crate::entities::{Direction, EnemyKind, TrapKind};

pub type Clip = Rc<Animation<TextureRegion>>;

const SHOOT_FRAME: f32 = 0.3;
const OPEN_FRAME: f32 = 0.1;
const WALK_FRAME: f32 = 0.1;
const PICKUP_FRAME: f32 = 0.075;
const TRAP_FRAME: f32 = 0.075;

fn clip(atlas: &TextureAtlas, name: &str, frame_duration: f32, mode: PlayMode) -> Result<Clip, AtlasError> {
    Ok(Rc::new(Animation::new(frame_duration, atlas.require_regions(name)?, mode)))
}

/// Walk and pickup clips of one coin kind.
#[derive(Debug, Clone)]
pub struct CoinClips {
    pub walk: Clip,
    pub pickup: Clip,
}

impl CoinClips {
    fn load(atlas: &TextureAtlas, kind: EnemyKind) -> Result<Self, AtlasError> {
        let name = kind.name();
        Ok(Self {
            walk: clip(atlas, &format!("{name}_walk"), WALK_FRAME, PlayMode::Loop)?,
            pickup: clip(atlas, &format!("pickup-{name}"), PICKUP_FRAME, PlayMode::LoopPingPong)?,
        })
    }
}

/// One clip per facing.
#[derive(Debug, Clone)]
pub struct DirectionalClips {
    pub up: Clip,
    pub down: Clip,
    pub left: Clip,
    pub right: Clip,
}

impl DirectionalClips {
    fn load(atlas: &TextureAtlas, prefix: &str) -> Result<Self, AtlasError> {
        let load = |dir: Direction| clip(atlas, &format!("{prefix}-{}", dir.name()), TRAP_FRAME, PlayMode::Normal);
        Ok(Self {
            up: load(Direction::Up)?,
            down: load(Direction::Down)?,
            left: load(Direction::Left)?,
            right: load(Direction::Right)?,
        })
    }

    pub fn get(&self, direction: Direction) -> &Clip {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameAssets {
    pub player: TextureRegion,
    pub player_shoot: Clip,
    pub player_open: Clip,
    pub penny: CoinClips,
    pub nickel: CoinClips,
    pub dime: CoinClips,
    pub quarter: CoinClips,
    pub springs: DirectionalClips,
    pub tacks: DirectionalClips,
}

impl GameAssets {
    /// Fails on the first missing region.
    pub fn from_atlas(atlas: &TextureAtlas) -> Result<Self, AtlasError> {
        Ok(Self {
            player: atlas.require_region("purse_image")?,
            player_shoot: clip(atlas, "purse_spit", SHOOT_FRAME, PlayMode::Normal)?,
            player_open: clip(atlas, "purse_open", OPEN_FRAME, PlayMode::Normal)?,
            penny: CoinClips::load(atlas, EnemyKind::Penny)?,
            nickel: CoinClips::load(atlas, EnemyKind::Nickel)?,
            dime: CoinClips::load(atlas, EnemyKind::Dime)?,
            quarter: CoinClips::load(atlas, EnemyKind::Quarter)?,
            springs: DirectionalClips::load(atlas, "spring")?,
            tacks: DirectionalClips::load(atlas, "tack")?,
        })
    }

    pub fn coin(&self, kind: EnemyKind) -> &CoinClips {
        match kind {
            EnemyKind::Penny => &self.penny,
            EnemyKind::Nickel => &self.nickel,
            EnemyKind::Dime => &self.dime,
            EnemyKind::Quarter => &self.quarter,
        }
    }

    pub fn trap(&self, kind: TrapKind, direction: Direction) -> &Clip {
        match kind {
            TrapKind::Spring => self.springs.get(direction),
            TrapKind::Tack => self.tacks.get(direction),
        }
    }
}
