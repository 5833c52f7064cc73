// crates/purse_game/src/screen.rs

use engine_shared::canonical_actions::{PAN_DOWN, PAN_LEFT, PAN_RIGHT, PAN_UP, QUIT};
use engine_shared::{AssetSource, DrawSurface, InputState, OrthographicCamera, Screen, ScreenCommand};
use glam::Vec2;
use tracing::{debug, info, warn};

use crate::assets::GameAssets;
use crate::config::GameConfig;
use crate::entities::{Direction, Enemy, EnemyKind, Entity, GameEntity, Trap, TrapKind};
use crate::error::GameError;
use crate::level::Level;
use crate::player::Player;
use crate::shake::ScreenShakeCameraController;

/// The playing field: owns the player, the level, the camera and every
/// other entity. Entities render in insertion order, the player after them.
pub struct GameScreen {
    config: GameConfig,
    assets: GameAssets,
    world_camera: OrthographicCamera,
    shaker: ScreenShakeCameraController,
    level: Level,
    player: Player,
    entities: Vec<Entity>,
    score: u32,
}

impl GameScreen {
    /// Builds the screen from already loaded assets.
    pub fn new(config: GameConfig, source: &dyn AssetSource) -> Result<Self, GameError> {
        let atlas = source.atlas(&config.atlas_path).ok_or_else(|| GameError::NotLoaded {
            kind: "atlas",
            path: config.atlas_path.clone(),
        })?;
        let map = source.tile_map(&config.map_path).ok_or_else(|| GameError::NotLoaded {
            kind: "tile map",
            path: config.map_path.clone(),
        })?;

        let assets = GameAssets::from_atlas(atlas)?;
        let level = Level::new(map.clone(), atlas)?;

        let world_camera = OrthographicCamera::new(config.viewport_width, config.viewport_height);
        let shaker = ScreenShakeCameraController::new(&world_camera);
        let player = Player::new(&assets, level.spawn(), config.player_speed);

        let mut screen = Self {
            config,
            assets,
            world_camera,
            shaker,
            level,
            player,
            entities: Vec::new(),
            score: 0,
        };
        screen.populate();

        info!(entities = screen.entities.len(), "game screen ready");
        Ok(screen)
    }

    /// Spawns the coins and traps placed in the map. A map without coins
    /// still gets a nickel next to the spawn point.
    fn populate(&mut self) {
        let mut spawned = Vec::new();

        for obj in self.level.coin_spawns() {
            match EnemyKind::from_name(&obj.name) {
                Some(kind) => spawned.push(self.make_enemy(kind, obj.position())),
                None => warn!(name = %obj.name, "unknown coin kind in map; skipped"),
            }
        }

        if spawned.is_empty() {
            let at = self.level.spawn() + Vec2::new(self.level.map().tile_width * 3.0, 0.0);
            spawned.push(self.make_enemy(EnemyKind::Nickel, at));
        }

        for obj in self.level.trap_spawns() {
            let Some(kind) = TrapKind::from_name(&obj.kind) else { continue };
            let direction = match obj.property("direction") {
                Some(name) => Direction::from_name(name).unwrap_or_else(|| {
                    warn!(trap = %obj.name, direction = name, "bad trap direction; facing up");
                    Direction::Up
                }),
                None => Direction::Up,
            };
            let clip = self.assets.trap(kind, direction).clone();
            spawned.push(Trap::new(kind, direction, clip, obj.position()).into());
        }

        for entity in spawned {
            self.spawn(entity);
        }
    }

    fn make_enemy(&self, kind: EnemyKind, at: Vec2) -> Entity {
        let mut enemy = Enemy::new(kind, self.assets.coin(kind), at);
        let (min, max) = self.level.world_bounds();
        enemy.set_patrol(min.x, max.x - enemy.bounds().size().x);
        enemy.into()
    }

    /// Appends to the entity list; the newest entity draws on top.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn enemies_mut(&mut self) -> impl Iterator<Item = &mut Enemy> + '_ {
        self.entities.iter_mut().filter_map(|e| match e {
            Entity::Enemy(enemy) => Some(enemy),
            _ => None,
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn assets(&self) -> &GameAssets {
        &self.assets
    }

    pub fn world_camera(&self) -> &OrthographicCamera {
        &self.world_camera
    }

    pub fn shaker(&self) -> &ScreenShakeCameraController {
        &self.shaker
    }

    pub fn shaker_mut(&mut self) -> &mut ScreenShakeCameraController {
        &mut self.shaker
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Open purse swallows coins it touches; touching an armed trap fires it.
    fn resolve_interactions(&mut self) {
        let player = self.player.bounds();
        let open = self.player.is_open();

        for entity in &mut self.entities {
            if !entity.bounds().overlaps(&player) {
                continue;
            }
            match entity {
                Entity::Enemy(enemy) if open && enemy.is_alive() => {
                    if enemy.damage(enemy.health()) {
                        self.score += enemy.value();
                        debug!(kind = enemy.kind().name(), score = self.score, "coin collected");
                        self.shaker.shake(self.config.pickup_shake_magnitude, self.config.pickup_shake_duration);
                    }
                }
                Entity::Trap(trap) => {
                    if trap.trigger() {
                        debug!(kind = ?trap.kind(), direction = trap.direction().name(), "trap fired");
                    }
                }
                _ => {}
            }
        }
    }

    /// Debug camera pan. Opposite keys do not cancel: left beats right and
    /// down beats up.
    fn pan(&mut self, input: &InputState, dt: f32) {
        let speed = self.config.pan_speed;
        if input.is_active(PAN_LEFT) {
            self.world_camera.translate(-speed * dt, 0.0);
        } else if input.is_active(PAN_RIGHT) {
            self.world_camera.translate(speed * dt, 0.0);
        }
        if input.is_active(PAN_DOWN) {
            self.world_camera.translate(0.0, -speed * dt);
        } else if input.is_active(PAN_UP) {
            self.world_camera.translate(0.0, speed * dt);
        }
        self.world_camera.update();
    }
}

impl Screen for GameScreen {
    fn update(&mut self, input: &InputState, dt: f32) -> ScreenCommand {
        if cfg!(not(target_arch = "wasm32")) && input.just_activated(QUIT) {
            info!("quit requested");
            return ScreenCommand::Exit;
        }
        let dt = dt.max(0.0);

        self.player.update(input, dt);
        let (min, max) = self.level.world_bounds();
        self.player.clamp_to(min, max);

        for entity in &mut self.entities {
            entity.update(dt);
        }
        self.resolve_interactions();
        self.entities.retain(|e| !e.is_removable());

        self.shaker.update(dt, &self.world_camera);
        self.level.update(dt);

        self.pan(input, dt);
        self.shaker.sync(&self.world_camera);
        ScreenCommand::Continue
    }

    fn render(&mut self, surface: &mut dyn DrawSurface) {
        surface.clear(self.config.clear_color);

        surface.set_projection_matrix(self.shaker.combined_matrix());
        surface.begin();
        for entity in &self.entities {
            entity.render(surface);
        }
        self.player.render(surface);
        surface.end();

        self.level.render(surface, self.shaker.view_camera());
    }

    fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.world_camera.set_viewport(width, height);
        self.world_camera.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EnemyState;
    use crate::testing::{self, MemoryAssets, Op, RecordingSurface};
    use engine_shared::canonical_actions::{MOVE_LEFT, OPEN};

    fn screen() -> GameScreen {
        let source = MemoryAssets::with_map(testing::map());
        GameScreen::new(testing::config(), &source).expect("screen builds")
    }

    fn held(actions: &[u32]) -> InputState {
        let mask = actions.iter().fold(0u64, |m, a| m | 1 << a);
        InputState::from_masks(mask, mask)
    }

    fn first_walk_frame(screen: &GameScreen, kind: EnemyKind) -> engine_shared::TextureRegion {
        screen.assets().coin(kind).walk.frames()[0]
    }

    #[test]
    fn missing_assets_are_reported() {
        let source = MemoryAssets::default();
        let err = GameScreen::new(testing::config(), &source).err().expect("fails");
        assert!(matches!(err, GameError::NotLoaded { kind: "atlas", .. }));
    }

    #[test]
    fn entities_come_from_the_map() {
        let s = screen();
        assert_eq!(s.player().position(), Vec2::new(32.0, 32.0));
        let kinds: Vec<_> = s
            .entities()
            .iter()
            .map(|e| match e {
                Entity::Enemy(e) => format!("{:?}", e.kind()),
                Entity::Trap(t) => format!("{:?}-{:?}", t.kind(), t.direction()),
            })
            .collect();
        assert_eq!(kinds, vec!["Nickel", "Penny", "Spring-Left"]);
    }

    #[test]
    fn coinless_map_gets_a_nickel() {
        let mut map = testing::map();
        map.objects.retain(|o| o.kind != "coin");
        let s = GameScreen::new(testing::config(), &MemoryAssets::with_map(map)).expect("builds");
        assert!(matches!(&s.entities()[0], Entity::Enemy(e) if e.kind() == EnemyKind::Nickel));
    }

    #[test]
    fn render_order_is_entities_then_player_then_level() {
        let mut s = screen();
        let mut surface = RecordingSurface::default();
        s.render(&mut surface);

        let ops = surface.ops();
        assert_eq!(ops[0], Op::Clear(s.config.clear_color));
        assert_eq!(ops[1], Op::Projection(s.shaker().combined_matrix()));
        assert!(ops.contains(&Op::Projection(s.shaker().view_camera().combined())));

        let scopes = surface.scopes();
        assert_eq!(scopes.len(), 2);
        let sprites: Vec<_> = scopes[0].iter().map(|c| c.region).collect();
        let spring = s.assets().trap(TrapKind::Spring, Direction::Left).frames()[0];
        assert_eq!(
            sprites,
            vec![
                first_walk_frame(&s, EnemyKind::Nickel),
                first_walk_frame(&s, EnemyKind::Penny),
                spring,
                s.assets().player,
            ]
        );
        assert!(!scopes[1].is_empty());
        assert!(scopes[1].iter().all(|c| c.width == 32.0));
    }

    #[test]
    fn collected_nickel_disappears() {
        let mut s = screen();
        let nickel = s
            .enemies_mut()
            .find(|e| e.kind() == EnemyKind::Nickel)
            .expect("map has a nickel");
        assert_eq!(nickel.health(), 30);
        nickel.damage(30);
        assert_eq!(nickel.state(), EnemyState::Dying);

        for _ in 0..4 {
            s.update(&InputState::default(), 0.075);
        }
        assert!(s.enemies_mut().all(|e| e.kind() != EnemyKind::Nickel));

        let mut surface = RecordingSurface::default();
        s.render(&mut surface);
        let nickel_frames = s.assets().nickel.walk.frames().to_vec();
        let pickup_frames = s.assets().nickel.pickup.frames().to_vec();
        assert!(surface
            .draws()
            .iter()
            .all(|c| !nickel_frames.contains(&c.region) && !pickup_frames.contains(&c.region)));
    }

    #[test]
    fn pan_left_for_one_second() {
        let mut s = screen();
        let start = s.world_camera().position;
        for _ in 0..4 {
            s.update(&held(&[PAN_LEFT]), 0.25);
        }
        let pos = s.world_camera().position;
        assert_eq!(pos.x, start.x - 350.0);
        assert_eq!(pos.y, start.y);
    }

    #[test]
    fn opposite_pan_keys_use_precedence() {
        let mut s = screen();
        let start = s.world_camera().position;
        s.update(&held(&[PAN_LEFT, PAN_RIGHT, PAN_UP, PAN_DOWN]), 1.0);
        let pos = s.world_camera().position;
        assert_eq!(pos.x, start.x - 350.0);
        assert_eq!(pos.y, start.y - 350.0);
    }

    #[test]
    fn quit_only_on_the_press_edge() {
        let mut s = screen();
        let press = InputState::from_masks(1 << QUIT, 0);
        assert_eq!(s.update(&press, 0.016), ScreenCommand::Exit);
        assert_eq!(s.update(&press.without_edges(), 0.016), ScreenCommand::Continue);
    }

    #[test]
    fn open_purse_collects_touching_coin() {
        let mut map = testing::map();
        for obj in map.objects.iter_mut().filter(|o| o.name == "nickel") {
            obj.x = 32.0;
            obj.y = 32.0;
        }
        let mut s = GameScreen::new(testing::config(), &MemoryAssets::with_map(map)).expect("builds");

        s.update(&held(&[OPEN]), 1.0 / 60.0);
        assert_eq!(s.score(), 5);
        assert!(s.shaker().is_shaking());
        let nickel = s.enemies_mut().find(|e| e.kind() == EnemyKind::Nickel).expect("still dying");
        assert_eq!(nickel.state(), EnemyState::Dying);
    }

    #[test]
    fn closed_purse_leaves_coins_alone() {
        let mut map = testing::map();
        for obj in map.objects.iter_mut().filter(|o| o.name == "nickel") {
            obj.x = 32.0;
            obj.y = 32.0;
        }
        let mut s = GameScreen::new(testing::config(), &MemoryAssets::with_map(map)).expect("builds");
        s.update(&held(&[MOVE_LEFT]), 1.0 / 60.0);
        assert_eq!(s.score(), 0);
        assert!(s.enemies_mut().all(|e| e.is_alive()));
    }

    #[test]
    fn zero_dt_updates_change_nothing() {
        let mut s = screen();
        s.update(&InputState::default(), 0.1);
        let before: Vec<f32> = s
            .entities()
            .iter()
            .map(|e| match e {
                Entity::Enemy(e) => e.sprite().state_time(),
                Entity::Trap(t) => t.sprite().state_time(),
            })
            .collect();
        let level_time = s.level().state_time();
        for _ in 0..10 {
            s.update(&InputState::default(), 0.0);
        }
        let after: Vec<f32> = s
            .entities()
            .iter()
            .map(|e| match e {
                Entity::Enemy(e) => e.sprite().state_time(),
                Entity::Trap(t) => t.sprite().state_time(),
            })
            .collect();
        assert_eq!(before, after);
        assert_eq!(s.level().state_time(), level_time);
    }

    #[test]
    fn shake_settles_back_to_the_world_camera() {
        let mut s = screen();
        s.shaker_mut().shake(8.0, 0.2);
        for _ in 0..5 {
            s.update(&InputState::default(), 0.05);
        }
        assert_eq!(s.shaker().magnitude(), 0.0);
        assert_eq!(s.shaker().combined_matrix(), s.world_camera().combined());
    }

    #[test]
    fn panned_frame_renders_with_the_moved_camera() {
        let mut s = screen();
        s.update(&held(&[PAN_LEFT]), 0.25);
        let mut surface = RecordingSurface::default();
        s.render(&mut surface);

        let camera = s.world_camera().combined();
        assert_eq!(surface.ops()[1], Op::Projection(camera));
        let projections: Vec<_> = surface
            .ops()
            .iter()
            .filter(|op| matches!(op, Op::Projection(_)))
            .collect();
        assert_eq!(projections, vec![&Op::Projection(camera); 2]);
    }

    #[test]
    fn shaken_frame_follows_the_pan() {
        let mut s = screen();
        s.shaker_mut().shake(8.0, 1.0);
        s.update(&held(&[PAN_LEFT]), 0.25);

        let offset = s.shaker().offset();
        let expected = s.world_camera().position + offset.extend(0.0);
        assert_eq!(s.shaker().shaken_camera().position, expected);
        assert_eq!(s.shaker().view_camera(), s.world_camera());
    }

    #[test]
    fn resize_changes_the_viewport() {
        let mut s = screen();
        s.resize(800.0, 600.0);
        assert_eq!(s.world_camera().viewport_width, 800.0);
        s.resize(0.0, 600.0);
        assert_eq!(s.world_camera().viewport_width, 800.0);
    }
}
