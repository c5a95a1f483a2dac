use alien_raid::config::{DEFAULT_VIEWPORT, ROWS_PER_BOARD, SLOTS_PER_GENERATED_ROW};
use alien_raid::director::*;
use alien_raid::entities::{Board, Difficulty, DifficultyTier, LevelCursor, Slot, Viewport};
use alien_raid::registry::EntityRegistry;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn empty_board() -> Board {
    Board::from_pattern(&["....."; 4])
}

fn tier(spawn_divisor: u32) -> DifficultyTier {
    DifficultyTier {
        jitter_x_level: 10,
        jitter_y_level: 15,
        spawn_divisor,
    }
}

// ── board generation ──────────────────────────────────────────────────────────

#[test]
fn generated_board_is_four_rows_of_five() {
    let board = LevelDirector::generate_board(&tier(2), &mut seeded_rng());
    assert_eq!(board.rows.len(), ROWS_PER_BOARD);
    for row in &board.rows {
        assert_eq!(row.len(), SLOTS_PER_GENERATED_ROW);
    }
}

#[test]
fn easy_spawn_rate_matches_outcome_set() {
    // Draws come from {0, 1, 2}; only {1, 2} spawn → 2/3, not 4/3.
    let mut rng = seeded_rng();
    let easy = Difficulty::default().easy;
    let mut spawned = 0;
    let mut slots = 0;
    for _ in 0..50 {
        let board = LevelDirector::generate_board(&easy, &mut rng);
        slots += board.rows.iter().map(|r| r.len()).sum::<usize>();
        spawned += board.spawn_count();
    }
    assert_eq!(slots, 1000);
    let rate = spawned as f64 / slots as f64;
    assert!(rate > 0.60 && rate < 0.73, "rate was {}", rate);
}

#[test]
fn zero_divisor_never_spawns() {
    let mut rng = seeded_rng();
    for _ in 0..20 {
        let board = LevelDirector::generate_board(&tier(0), &mut rng);
        assert_eq!(board.spawn_count(), 0);
    }
}

#[test]
fn divisor_four_spawns_most_slots() {
    // {1,2,3,4} out of {0..=4} → 4/5
    let mut rng = seeded_rng();
    let mut spawned = 0;
    for _ in 0..50 {
        spawned += LevelDirector::generate_board(&tier(4), &mut rng).spawn_count();
    }
    let rate = spawned as f64 / 1000.0;
    assert!(rate > 0.74 && rate < 0.86, "rate was {}", rate);
}

// ── clearance & row layout ────────────────────────────────────────────────────

#[test]
fn clearance_blocks_aliens_near_top() {
    let mut reg = EntityRegistry::new();
    assert!(LevelDirector::can_spawn(&reg));
    reg.spawn_alien(100.0, 101.0);
    assert!(LevelDirector::can_spawn(&reg));
    reg.spawn_alien(200.0, 100.0);
    assert!(!LevelDirector::can_spawn(&reg));
}

#[test]
fn sort_aliens_spaces_by_eleventh_of_width() {
    let mut reg = EntityRegistry::new();
    let vp = Viewport { width: 1100.0, height: 600.0 };
    let row = vec![Slot::Spawn, Slot::Empty, Slot::Spawn, Slot::Empty];
    let n = LevelDirector::sort_aliens(&row, &mut reg, vp);
    assert_eq!(n, 2);
    let xs: Vec<f32> = reg.aliens().iter().map(|a| a.x).collect();
    assert_eq!(xs, vec![100.0, 300.0]);
    assert!(reg.aliens().iter().all(|a| a.y == 0.0));
}

// ── pacing ────────────────────────────────────────────────────────────────────

#[test]
fn first_update_spawns_opening_row() {
    let mut director = LevelDirector::default();
    let mut cursor = LevelCursor::default();
    let mut reg = EntityRegistry::new();
    let out = director.update(
        &mut cursor,
        &mut reg,
        &Difficulty::default(),
        DEFAULT_VIEWPORT,
        &mut seeded_rng(),
    );
    assert_eq!(out.rows_spawned, 1);
    assert_eq!(out.aliens_spawned, 6); // "..xxxxxx.."
    assert_eq!(reg.aliens().len(), 6);
    assert_eq!(cursor.row, 1);
    assert!(!out.level_advanced);
}

#[test]
fn no_new_row_while_aliens_crowd_the_top() {
    let mut director = LevelDirector::default();
    let mut cursor = LevelCursor::default();
    let mut reg = EntityRegistry::new();
    let mut rng = seeded_rng();
    let difficulty = Difficulty::default();
    director.update(&mut cursor, &mut reg, &difficulty, DEFAULT_VIEWPORT, &mut rng);
    let out = director.update(&mut cursor, &mut reg, &difficulty, DEFAULT_VIEWPORT, &mut rng);
    assert_eq!(out.rows_spawned, 0);
    assert_eq!(cursor.row, 1);
    assert_eq!(reg.aliens().len(), 6);
}

#[test]
fn rows_stack_once_clearance_holds() {
    let mut director = LevelDirector::default();
    let mut cursor = LevelCursor::default();
    let mut reg = EntityRegistry::new();
    let mut rng = seeded_rng();
    let difficulty = Difficulty::default();
    director.update(&mut cursor, &mut reg, &difficulty, DEFAULT_VIEWPORT, &mut rng);
    for alien in reg.aliens_mut() {
        alien.y = 150.0;
    }
    let out = director.update(&mut cursor, &mut reg, &difficulty, DEFAULT_VIEWPORT, &mut rng);
    assert_eq!(out.aliens_spawned, 4); // "...xxxx..."
    assert_eq!(reg.aliens().len(), 10);
    assert_eq!(cursor.row, 2);
}

#[test]
fn spent_board_does_not_spawn_while_aliens_remain() {
    let mut director = LevelDirector::default();
    let mut cursor = LevelCursor { row: ROWS_PER_BOARD, level: 0 };
    let mut reg = EntityRegistry::new();
    reg.spawn_alien(100.0, 300.0);
    let out = director.update(
        &mut cursor,
        &mut reg,
        &Difficulty::default(),
        DEFAULT_VIEWPORT,
        &mut seeded_rng(),
    );
    assert_eq!(out, SpawnOutcome::default());
    assert_eq!(cursor, LevelCursor { row: ROWS_PER_BOARD, level: 0 });
    assert_eq!(director.boards().len(), 4);
}

#[test]
fn empty_row_still_consumes_a_row() {
    let mut director = LevelDirector::new(vec![empty_board()]);
    let mut cursor = LevelCursor::default();
    let mut reg = EntityRegistry::new();
    let out = director.update(
        &mut cursor,
        &mut reg,
        &Difficulty::default(),
        DEFAULT_VIEWPORT,
        &mut seeded_rng(),
    );
    assert_eq!(out.rows_spawned, 1);
    assert_eq!(out.aliens_spawned, 0);
    assert_eq!(cursor.row, 1);
    assert!(reg.aliens().is_empty());
}

#[test]
fn cleared_board_advances_level_and_appends_board() {
    let mut director = LevelDirector::new(vec![empty_board()]);
    let mut cursor = LevelCursor::default();
    let mut reg = EntityRegistry::new();
    let mut rng = seeded_rng();
    let difficulty = Difficulty::default();

    for _ in 0..ROWS_PER_BOARD {
        director.update(&mut cursor, &mut reg, &difficulty, DEFAULT_VIEWPORT, &mut rng);
    }
    assert_eq!(cursor, LevelCursor { row: 4, level: 0 });
    assert_eq!(director.boards().len(), 1);

    let out = director.update(&mut cursor, &mut reg, &difficulty, DEFAULT_VIEWPORT, &mut rng);
    assert!(out.level_advanced);
    assert_eq!(cursor.level, 1);
    assert_eq!(director.boards().len(), 2);
    // The new board's first row spawns in the same update
    assert_eq!(out.rows_spawned, 1);
    assert_eq!(cursor.row, 1);
    assert_eq!(out.aliens_spawned, reg.aliens().len());
}

#[test]
fn one_board_appended_per_level() {
    let mut director = LevelDirector::default();
    let mut cursor = LevelCursor::default();
    let mut reg = EntityRegistry::new();
    let mut rng = seeded_rng();
    let difficulty = Difficulty::default();
    let mut last_level = 0;

    for _ in 0..200 {
        director.update(&mut cursor, &mut reg, &difficulty, DEFAULT_VIEWPORT, &mut rng);
        // Shoot everything down between updates
        reg.clear();

        assert!(cursor.row >= 1 && cursor.row <= ROWS_PER_BOARD);
        assert!(cursor.level >= last_level);
        assert_eq!(director.boards().len(), 4 + cursor.level);
        last_level = cursor.level;
    }
    assert!(cursor.level >= 30);
}
