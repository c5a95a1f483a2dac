/// Level director: owns the board list, paces row spawning and advances the
/// level once a board has been fully cleared.

use rand::Rng;
use tracing::{debug, info};

use crate::config::{
    opening_boards, ROWS_PER_BOARD, ROW_SPACING_DIVISOR, SLOTS_PER_GENERATED_ROW,
    SPAWN_CLEARANCE,
};
use crate::entities::{Board, Difficulty, DifficultyTier, LevelCursor, Slot, Viewport};
use crate::registry::EntityRegistry;

/// What the director did during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnOutcome {
    pub rows_spawned: usize,
    pub aliens_spawned: usize,
    pub level_advanced: bool,
}

#[derive(Clone, Debug)]
pub struct LevelDirector {
    boards: Vec<Board>,
}

impl Default for LevelDirector {
    fn default() -> Self {
        Self::new(opening_boards())
    }
}

impl LevelDirector {
    pub fn new(boards: Vec<Board>) -> Self {
        Self { boards }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Roll a fresh board.  Each slot draws uniformly from `0..=spawn_divisor`
    /// and spawns iff the draw is one of the tier's spawn outcomes.
    pub fn generate_board(tier: &DifficultyTier, rng: &mut impl Rng) -> Board {
        let rows = (0..ROWS_PER_BOARD)
            .map(|_| {
                (0..SLOTS_PER_GENERATED_ROW)
                    .map(|_| {
                        let draw = rng.gen_range(0..=tier.spawn_divisor);
                        if DifficultyTier::is_spawn_draw(draw) {
                            Slot::Spawn
                        } else {
                            Slot::Empty
                        }
                    })
                    .collect()
            })
            .collect();
        Board { rows }
    }

    /// True iff no alien is within `SPAWN_CLEARANCE` of the top edge.
    pub fn can_spawn(registry: &EntityRegistry) -> bool {
        !registry
            .aliens()
            .iter()
            .any(|a| a.alive && a.y <= SPAWN_CLEARANCE)
    }

    /// Lay out one alien per spawn slot, evenly spaced along the top edge.
    /// Returns how many aliens were created.
    pub fn sort_aliens(row: &[Slot], registry: &mut EntityRegistry, viewport: Viewport) -> usize {
        let spacing = viewport.width / ROW_SPACING_DIVISOR;
        let mut spawned = 0;
        for (i, slot) in row.iter().enumerate() {
            if *slot == Slot::Spawn {
                registry.spawn_alien(spacing * (i + 1) as f32, 0.0);
                spawned += 1;
            }
        }
        spawned
    }

    fn spawn_next_row(
        &self,
        cursor: &mut LevelCursor,
        registry: &mut EntityRegistry,
        viewport: Viewport,
        outcome: &mut SpawnOutcome,
    ) {
        let spawned = match self
            .boards
            .get(cursor.level)
            .and_then(|board| board.rows.get(cursor.row))
        {
            Some(row) => Self::sort_aliens(row, registry, viewport),
            None => 0,
        };
        debug!(level = cursor.level, row = cursor.row, spawned, "row spawned");
        cursor.row += 1;
        outcome.rows_spawned += 1;
        outcome.aliens_spawned += spawned;
    }

    /// One pacing step.  Advances the level when the board is spent and the
    /// sky is empty, then spawns the next row if clearance allows.
    pub fn update(
        &mut self,
        cursor: &mut LevelCursor,
        registry: &mut EntityRegistry,
        difficulty: &Difficulty,
        viewport: Viewport,
        rng: &mut impl Rng,
    ) -> SpawnOutcome {
        let mut outcome = SpawnOutcome::default();
        let can_spawn = Self::can_spawn(registry);

        if cursor.row >= ROWS_PER_BOARD && !registry.has_aliens() {
            cursor.row = 0;
            cursor.level += 1;
            let board = Self::generate_board(difficulty.active(), rng);
            self.boards.push(board);
            outcome.level_advanced = true;
            info!(level = cursor.level, boards = self.boards.len(), "level advanced");
        }

        if !registry.has_aliens() && can_spawn {
            self.spawn_next_row(cursor, registry, viewport, &mut outcome);
        } else if registry.has_aliens() && can_spawn && cursor.row < ROWS_PER_BOARD {
            self.spawn_next_row(cursor, registry, viewport, &mut outcome);
        }

        outcome
    }
}
