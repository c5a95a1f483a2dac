/// All game entity types: pure data, no logic.
///
/// Positions are continuous world units with the origin in the top-left
/// corner; `y` grows downward.  Every entity is anchored at its centre.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// Axis-aligned bounding box centred on `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitbox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Hitbox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Touching edges do not count as an overlap.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        (self.x - other.x).abs() * 2.0 < self.width + other.width
            && (self.y - other.y).abs() * 2.0 < self.height + other.height
    }
}

// ── Level boards ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Slot {
    Spawn,
    Empty,
}

pub type Row = Vec<Slot>;

/// One level's formation: exactly `ROWS_PER_BOARD` rows, consumed top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pub rows: Vec<Row>,
}

impl Board {
    /// Build a board from a picture where `'x'` marks a spawn slot.
    pub fn from_pattern(pattern: &[&str]) -> Self {
        let rows = pattern
            .iter()
            .map(|line| {
                line.chars()
                    .map(|c| if c == 'x' { Slot::Spawn } else { Slot::Empty })
                    .collect()
            })
            .collect();
        Board { rows }
    }

    pub fn spawn_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|slot| **slot == Slot::Spawn)
            .count()
    }
}

/// Where the director is within the board list.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LevelCursor {
    /// Next row to spawn; reaches `ROWS_PER_BOARD` once the board is spent.
    pub row: usize,
    pub level: usize,
}

// ── Difficulty ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyTier {
    /// Level from which aliens wobble horizontally.
    pub jitter_x_level: usize,
    /// Level from which aliens wobble vertically.
    pub jitter_y_level: usize,
    /// Upper bound (inclusive) of the per-slot spawn draw.
    pub spawn_divisor: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Difficulty {
    pub easy: DifficultyTier,
    pub medium: DifficultyTier,
    pub hard: DifficultyTier,
}

// ── Ship ──────────────────────────────────────────────────────────────────────

/// Two-bit release latch for one movement axis.  Both bits start set; the
/// axis only goes idle once both directions have been released.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisLatch {
    pub negative_released: bool,
    pub positive_released: bool,
}

impl AxisLatch {
    pub fn released() -> Self {
        Self {
            negative_released: true,
            positive_released: true,
        }
    }

    pub fn both_released(&self) -> bool {
        self.negative_released && self.positive_released
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShipState {
    pub speed_x: f32,
    pub speed_y: f32,
    pub moving_x: bool,
    pub moving_y: bool,
    pub far_left: bool,
    pub far_right: bool,
    pub too_high: bool,
    pub too_low: bool,
    /// Left / right keys.
    pub latch_x: AxisLatch,
    /// Up / down keys.
    pub latch_y: AxisLatch,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    /// `true` while facing right.
    pub flip_x: bool,
    pub state: ShipState,
}

// ── Projectiles & enemies ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Laser {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub alive: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub alive: bool,
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Decorative ship icon, one per remaining life.
#[derive(Clone, Debug, PartialEq)]
pub struct LifeIcon {
    pub x: f32,
    pub y: f32,
}

/// Remaining lives plus the icon row that mirrors them.
#[derive(Clone, Debug, PartialEq)]
pub struct Lives {
    pub count: u32,
    pub icons: Vec<LifeIcon>,
}

impl Lives {
    pub fn new(count: u32) -> Self {
        Self {
            count,
            icons: vec![LifeIcon { x: 0.0, y: 0.0 }; count as usize],
        }
    }

    /// Drop one life and its icon.  A missing icon is not an error.
    pub fn lose_one(&mut self) {
        self.count = self.count.saturating_sub(1);
        self.icons.pop();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub x: f32,
    pub y: f32,
}
