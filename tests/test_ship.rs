use alien_raid::config::{DEFAULT_VIEWPORT, HIGHEST_SHIP_HEIGHT, SHIP_SPEED};
use alien_raid::entities::Ship;
use alien_raid::ship::*;
use alien_raid::Key;

fn make_ship() -> Ship {
    spawn_ship(DEFAULT_VIEWPORT) // 800 x 600
}

/// One ship tick, in the order the session runs it.
fn step(ship: &mut Ship) {
    update_proximity(ship, DEFAULT_VIEWPORT);
    move_ship(ship, DEFAULT_VIEWPORT);
    settle(ship);
}

// ── spawn ─────────────────────────────────────────────────────────────────────

#[test]
fn ship_spawns_centred_in_lower_band() {
    let s = make_ship();
    assert_eq!(s.x, 400.0);
    assert_eq!(s.y, 400.0); // height / 1.5
    assert!(!s.state.moving_x);
    assert!(!s.state.moving_y);
    assert!(s.state.latch_x.both_released());
    assert!(s.state.latch_y.both_released());
}

#[test]
fn nose_is_half_a_ship_above_centre() {
    let s = make_ship();
    let (x, y) = nose(&s);
    assert_eq!(x, 400.0);
    assert_eq!(y, 376.0);
}

// ── key down ──────────────────────────────────────────────────────────────────

#[test]
fn left_press_heads_left_and_faces_left() {
    let mut s = make_ship();
    s.flip_x = true;
    key_down(&mut s, Key::Left, DEFAULT_VIEWPORT);
    assert_eq!(s.state.speed_x, -SHIP_SPEED);
    assert!(!s.flip_x);
    assert!(s.state.moving_x);
    assert!(!s.state.latch_x.negative_released);

    step(&mut s);
    assert_eq!(s.x, 390.0);
}

#[test]
fn right_press_faces_right() {
    let mut s = make_ship();
    key_down(&mut s, Key::Right, DEFAULT_VIEWPORT);
    assert_eq!(s.state.speed_x, SHIP_SPEED);
    assert!(s.flip_x);
    step(&mut s);
    assert_eq!(s.x, 410.0);
}

#[test]
fn vertical_keys_move_on_y_only() {
    let mut s = make_ship();
    key_down(&mut s, Key::Up, DEFAULT_VIEWPORT);
    step(&mut s);
    assert_eq!(s.y, 390.0);
    assert_eq!(s.x, 400.0);

    key_up(&mut s, Key::Up);
    key_down(&mut s, Key::Down, DEFAULT_VIEWPORT);
    step(&mut s);
    assert_eq!(s.y, 400.0);
}

#[test]
fn fire_does_not_touch_the_ship() {
    let mut s = make_ship();
    let before = s.clone();
    key_down(&mut s, Key::Fire, DEFAULT_VIEWPORT);
    key_up(&mut s, Key::Fire);
    assert_eq!(s, before);
}

// ── key up & the two-bit latch ────────────────────────────────────────────────

#[test]
fn release_reverses_heading_then_idles() {
    let mut s = make_ship();
    key_down(&mut s, Key::Left, DEFAULT_VIEWPORT);
    step(&mut s);
    key_up(&mut s, Key::Left);
    assert_eq!(s.state.speed_x, SHIP_SPEED); // now heading right
    assert!(s.flip_x);
    assert!(s.state.moving_x); // settles on the next tick

    step(&mut s);
    assert!(!s.state.moving_x);
    // The move in this tick happened before the axis settled
    assert_eq!(s.x, 400.0);
}

#[test]
fn axis_stays_active_until_both_keys_released() {
    let mut s = make_ship();
    key_down(&mut s, Key::Left, DEFAULT_VIEWPORT);
    key_down(&mut s, Key::Right, DEFAULT_VIEWPORT);
    key_up(&mut s, Key::Left);
    step(&mut s);
    assert!(s.state.moving_x);
    assert_eq!(s.state.speed_x, SHIP_SPEED);

    key_up(&mut s, Key::Right);
    assert_eq!(s.state.speed_x, -SHIP_SPEED);
    step(&mut s);
    assert!(!s.state.moving_x);
}

#[test]
fn releasing_a_key_never_pressed_still_reverses() {
    let mut s = make_ship();
    key_up(&mut s, Key::Down);
    assert_eq!(s.state.speed_y, -SHIP_SPEED);
    assert!(!s.state.moving_y);
}

// ── bounds ────────────────────────────────────────────────────────────────────

#[test]
fn ship_is_clamped_to_left_edge() {
    let mut s = make_ship();
    s.x = 5.0;
    key_down(&mut s, Key::Left, DEFAULT_VIEWPORT);
    step(&mut s);
    assert_eq!(s.x, 0.0);
    step(&mut s);
    assert_eq!(s.x, 0.0);
    assert!(s.state.far_left);
}

#[test]
fn ship_cannot_climb_above_highest_line() {
    let mut s = make_ship();
    s.y = HIGHEST_SHIP_HEIGHT + 5.0;
    key_down(&mut s, Key::Up, DEFAULT_VIEWPORT);
    step(&mut s);
    assert_eq!(s.y, HIGHEST_SHIP_HEIGHT);
    step(&mut s);
    assert_eq!(s.y, HIGHEST_SHIP_HEIGHT);
    assert!(s.state.too_high);
}

#[test]
fn ship_is_clamped_to_bottom_edge() {
    let mut s = make_ship();
    s.y = 595.0;
    key_down(&mut s, Key::Down, DEFAULT_VIEWPORT);
    step(&mut s);
    assert_eq!(s.y, 600.0);
}

#[test]
fn far_left_reflex_nudges_back_in() {
    let mut s = make_ship();
    s.x = 0.0;
    update_proximity(&mut s, DEFAULT_VIEWPORT);
    assert!(s.state.far_left);

    key_down(&mut s, Key::Right, DEFAULT_VIEWPORT);
    assert_eq!(s.x, SHIP_SPEED);
    assert_eq!(s.state.speed_x, SHIP_SPEED);
}

#[test]
fn far_right_reflex_nudges_back_in() {
    let mut s = make_ship();
    s.x = 800.0;
    update_proximity(&mut s, DEFAULT_VIEWPORT);
    assert!(s.state.far_right);

    key_down(&mut s, Key::Left, DEFAULT_VIEWPORT);
    assert_eq!(s.x, 790.0);
}

#[test]
fn too_high_reflex_nudges_down() {
    let mut s = make_ship();
    s.y = HIGHEST_SHIP_HEIGHT;
    update_proximity(&mut s, DEFAULT_VIEWPORT);
    key_down(&mut s, Key::Down, DEFAULT_VIEWPORT);
    assert_eq!(s.y, HIGHEST_SHIP_HEIGHT + SHIP_SPEED);
}

#[test]
fn too_low_reflex_nudges_up() {
    let mut s = make_ship();
    s.y = 600.0;
    update_proximity(&mut s, DEFAULT_VIEWPORT);
    assert!(s.state.too_low);
    key_down(&mut s, Key::Up, DEFAULT_VIEWPORT);
    assert_eq!(s.y, 590.0);
}

#[test]
fn no_reflex_when_not_at_an_edge() {
    let mut s = make_ship();
    update_proximity(&mut s, DEFAULT_VIEWPORT);
    key_down(&mut s, Key::Right, DEFAULT_VIEWPORT);
    assert_eq!(s.x, 400.0);
}

#[test]
fn proximity_flag_is_sticky_across_the_opposite_edge() {
    let mut s = make_ship();
    s.x = 0.0;
    update_proximity(&mut s, DEFAULT_VIEWPORT);
    s.x = 800.0;
    update_proximity(&mut s, DEFAULT_VIEWPORT);
    assert!(s.state.far_left);
    assert!(s.state.far_right);

    s.x = 400.0;
    update_proximity(&mut s, DEFAULT_VIEWPORT);
    assert!(!s.state.far_left);
    assert!(!s.state.far_right);
}
