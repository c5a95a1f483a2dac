/// Top-level game state.  Owns the ship, the entity registry, the level
/// director and the lives/HUD bookkeeping, and composes them once per tick.
///
/// All randomness comes through the injected RNG so callers control
/// determinism (tests use a seeded `StdRng`).

use rand::Rng;
use tracing::{debug, info};

use crate::collision::{self, CollisionReport};
use crate::config::{
    GAME_OVER_LABEL_DROP, HUD_LABEL_Y, LIFE_ICON_MARGIN, LIFE_ICON_SPACING_DIVISOR,
    STARTING_LIVES,
};
use crate::director::{LevelDirector, SpawnOutcome};
use crate::engine::{Key, Stage};
use crate::entities::{
    Difficulty, EntityId, GameStatus, Label, LevelCursor, Lives, Ship, Viewport,
};
use crate::registry::EntityRegistry;
use crate::ship;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub spawn: SpawnOutcome,
    pub collisions: CollisionReport,
    /// Set on the tick that ends the game.  The outer loop stops ticking.
    pub game_over: bool,
}

#[derive(Clone, Debug)]
pub struct GameSession {
    /// `None` once the game is over.
    pub ship: Option<Ship>,
    pub registry: EntityRegistry,
    pub director: LevelDirector,
    pub cursor: LevelCursor,
    pub difficulty: Difficulty,
    pub lives: Lives,
    pub label: Label,
    pub status: GameStatus,
    pub frame: u64,
}

pub fn score_text(level: usize, lives: u32) -> String {
    format!("Score: {} Lives: {}", level, lives)
}

pub fn game_over_text(level: usize) -> String {
    format!("GAME OVER! You got up to level: {}", level)
}

impl GameSession {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_director(viewport, LevelDirector::default())
    }

    pub fn with_director(viewport: Viewport, director: LevelDirector) -> Self {
        let mut session = GameSession {
            ship: Some(ship::spawn_ship(viewport)),
            registry: EntityRegistry::new(),
            director,
            cursor: LevelCursor::default(),
            difficulty: Difficulty::default(),
            lives: Lives::new(STARTING_LIVES),
            label: Label {
                text: String::new(),
                x: viewport.width / 2.0,
                y: HUD_LABEL_Y,
            },
            status: GameStatus::Playing,
            frame: 0,
        };
        session.refresh_hud(viewport);
        session
    }

    pub fn level(&self) -> usize {
        self.cursor.level
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    pub fn key_down(&mut self, key: Key, stage: &impl Stage) {
        if self.is_over() {
            return;
        }
        if key == Key::Fire {
            self.fire();
            return;
        }
        if let Some(ship) = self.ship.as_mut() {
            ship::key_down(ship, key, stage.viewport());
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.is_over() {
            return;
        }
        if let Some(ship) = self.ship.as_mut() {
            ship::key_up(ship, key);
        }
    }

    /// Launch a laser from the ship's nose.
    pub fn fire(&mut self) -> Option<EntityId> {
        let ship = self.ship.as_ref()?;
        let (x, y) = ship::nose(ship);
        let id = self.registry.spawn_laser(x, y);
        debug!(?id, x, y, "laser fired");
        Some(id)
    }

    // ── Per-tick update ───────────────────────────────────────────────────────

    /// Advance the game by one frame.  Does nothing once the game is over.
    pub fn tick(&mut self, stage: &impl Stage, rng: &mut impl Rng) -> TickReport {
        let mut report = TickReport::default();
        if self.is_over() {
            return report;
        }
        self.frame += 1;
        let viewport = stage.viewport();

        if let Some(ship) = self.ship.as_mut() {
            ship::update_proximity(ship, viewport);
            ship::move_ship(ship, viewport);
            ship::settle(ship);
        }

        collision::advance_lasers(&mut self.registry);

        report.spawn = self.director.update(
            &mut self.cursor,
            &mut self.registry,
            &self.difficulty,
            viewport,
            rng,
        );

        let ship_box = self.ship.as_ref().map(ship::hitbox);
        let tier = *self.difficulty.active();
        report.collisions = collision::resolve(
            &mut self.registry,
            stage,
            ship_box.as_ref(),
            self.cursor.level,
            &tier,
            &mut self.lives,
            rng,
        );

        self.refresh_hud(viewport);

        if self.lives.count == 0 {
            report.collisions.destroyed.extend(self.end_game());
            report.game_over = true;
        }
        report
    }

    fn refresh_hud(&mut self, viewport: Viewport) {
        self.label.text = score_text(self.cursor.level, self.lives.count);

        let spacing = viewport.width / LIFE_ICON_SPACING_DIVISOR;
        for (i, icon) in self.lives.icons.iter_mut().enumerate() {
            icon.x = spacing * (i + 1) as f32;
            icon.y = viewport.height - LIFE_ICON_MARGIN;
        }
    }

    fn end_game(&mut self) -> Vec<EntityId> {
        let destroyed = self.registry.clear();
        self.ship = None;
        self.label.y += GAME_OVER_LABEL_DROP;
        self.label.text = game_over_text(self.cursor.level);
        self.status = GameStatus::GameOver;
        info!(level = self.cursor.level, frame = self.frame, "game over");
        destroyed
    }
}
