/// Tuning constants and difficulty tables.
///
/// All distances are world units, all speeds are units per tick.

use crate::entities::{Board, Difficulty, DifficultyTier, Viewport};

// ── World ─────────────────────────────────────────────────────────────────────

pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 800.0,
    height: 600.0,
};

pub const STARTING_LIVES: u32 = 3;

// ── Ship ──────────────────────────────────────────────────────────────────────

pub const SHIP_SPEED: f32 = 10.0;
/// The ship may never climb above this line.
pub const HIGHEST_SHIP_HEIGHT: f32 = 300.0;
pub const SHIP_WIDTH: f32 = 48.0;
pub const SHIP_HEIGHT: f32 = 48.0;

// ── Projectiles & aliens ──────────────────────────────────────────────────────

pub const LASER_SPEED: f32 = 15.0;
pub const LASER_WIDTH: f32 = 6.0;
pub const LASER_HEIGHT: f32 = 24.0;

/// Aliens descend at half this rate.
pub const ALIEN_SPEED: f32 = 5.0;
pub const ALIEN_WIDTH: f32 = 40.0;
pub const ALIEN_HEIGHT: f32 = 40.0;
/// Largest random wobble applied per tick once jitter unlocks.
pub const JITTER: i32 = 5;

// ── Level director ────────────────────────────────────────────────────────────

pub const ROWS_PER_BOARD: usize = 4;
pub const SLOTS_PER_GENERATED_ROW: usize = 5;
/// A new row may only spawn once no alien is this close to the top edge.
pub const SPAWN_CLEARANCE: f32 = 100.0;
/// Horizontal spacing is `width / ROW_SPACING_DIVISOR`.
pub const ROW_SPACING_DIVISOR: f32 = 11.0;
/// Draws that mark a slot as `Spawn`.
pub const SPAWN_OUTCOMES: [u32; 4] = [1, 2, 3, 4];

// ── Collisions ────────────────────────────────────────────────────────────────

/// Aliens lower than `height - LOW_ALIEN_MARGIN` slip past and cost a life.
pub const LOW_ALIEN_MARGIN: f32 = 50.0;

// ── HUD ───────────────────────────────────────────────────────────────────────

pub const HUD_LABEL_Y: f32 = 100.0;
pub const GAME_OVER_LABEL_DROP: f32 = 200.0;
/// Life icons sit this far above the bottom edge.
pub const LIFE_ICON_MARGIN: f32 = 25.0;
pub const LIFE_ICON_SPACING_DIVISOR: f32 = 15.0;

// ── Difficulty tables ─────────────────────────────────────────────────────────

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty {
            easy: DifficultyTier {
                jitter_x_level: 10,
                jitter_y_level: 15,
                spawn_divisor: 2,
            },
            medium: DifficultyTier {
                jitter_x_level: 8,
                jitter_y_level: 12,
                spawn_divisor: 4,
            },
            hard: DifficultyTier {
                jitter_x_level: 6,
                jitter_y_level: 9,
                spawn_divisor: 6,
            },
        }
    }
}

impl Difficulty {
    /// The tier consulted during play.  Escalation to `medium` / `hard` is
    /// not wired up, so this is always `easy`.
    pub fn active(&self) -> &DifficultyTier {
        &self.easy
    }
}

impl DifficultyTier {
    /// Every tier shares one outcome set; tiers differ only in the range
    /// the draw comes from.
    pub fn is_spawn_draw(draw: u32) -> bool {
        SPAWN_OUTCOMES.contains(&draw)
    }
}

/// Hand-designed formations for levels 0–3.
pub fn opening_boards() -> Vec<Board> {
    vec![
        Board::from_pattern(&[
            "..xxxxxx..",
            "...xxxx...",
            "....xx....",
            ".....x....",
        ]),
        Board::from_pattern(&[
            "x..xxxx..x",
            ".x..xx..x.",
            "...x...x..",
            "....xx....",
        ]),
        Board::from_pattern(&[
            "....x.....",
            "...xx.....",
            "...xx.....",
            "....xx....",
        ]),
        Board::from_pattern(&[
            "....x.....",
            "...xx.....",
            "...xx.....",
            "....xx....",
        ]),
    ]
}
