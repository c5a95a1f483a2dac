/// Ship controller: turns key edges into velocity and keeps the ship inside
/// its allowed band of the viewport.
///
/// Releasing a key does not stop the ship outright; it heads the ship the
/// other way, and the axis only goes idle once both of its keys have been
/// released (see `AxisLatch`).

use crate::config::{HIGHEST_SHIP_HEIGHT, SHIP_HEIGHT, SHIP_SPEED, SHIP_WIDTH};
use crate::engine::Key;
use crate::entities::{AxisLatch, Hitbox, Ship, ShipState, Viewport};

pub fn spawn_ship(viewport: Viewport) -> Ship {
    Ship {
        x: viewport.width / 2.0,
        y: viewport.height / 1.5,
        flip_x: false,
        state: ShipState {
            speed_x: SHIP_SPEED,
            speed_y: SHIP_SPEED,
            moving_x: false,
            moving_y: false,
            far_left: false,
            far_right: false,
            too_high: false,
            too_low: false,
            latch_x: AxisLatch::released(),
            latch_y: AxisLatch::released(),
        },
    }
}

pub fn hitbox(ship: &Ship) -> Hitbox {
    Hitbox::new(ship.x, ship.y, SHIP_WIDTH, SHIP_HEIGHT)
}

/// Where a freshly fired laser appears.
pub fn nose(ship: &Ship) -> (f32, f32) {
    (ship.x, ship.y - SHIP_HEIGHT / 2.0)
}

// ── Heading ───────────────────────────────────────────────────────────────────

fn head_left(ship: &mut Ship) {
    ship.state.speed_x = -SHIP_SPEED;
    ship.flip_x = false;
}

fn head_right(ship: &mut Ship) {
    ship.state.speed_x = SHIP_SPEED;
    ship.flip_x = true;
}

fn head_up(ship: &mut Ship) {
    ship.state.speed_y = -SHIP_SPEED;
}

fn head_down(ship: &mut Ship) {
    ship.state.speed_y = SHIP_SPEED;
}

fn clamp_to_bounds(ship: &mut Ship, viewport: Viewport) {
    ship.x = ship.x.clamp(0.0, viewport.width);
    ship.y = ship.y.clamp(HIGHEST_SHIP_HEIGHT, viewport.height);
}

// ── Key edges ─────────────────────────────────────────────────────────────────

/// Apply a key-down edge.  `Fire` is not a movement key and is ignored here.
pub fn key_down(ship: &mut Ship, key: Key, viewport: Viewport) {
    match key {
        Key::Left => {
            if ship.state.far_right {
                ship.x -= SHIP_SPEED;
            }
            head_left(ship);
            ship.state.moving_x = true;
            ship.state.latch_x.negative_released = false;
        }
        Key::Right => {
            if ship.state.far_left {
                ship.x += SHIP_SPEED;
            }
            head_right(ship);
            ship.state.moving_x = true;
            ship.state.latch_x.positive_released = false;
        }
        Key::Up => {
            if ship.state.too_low {
                ship.y -= SHIP_SPEED;
            }
            head_up(ship);
            ship.state.moving_y = true;
            ship.state.latch_y.negative_released = false;
        }
        Key::Down => {
            if ship.state.too_high {
                ship.y += SHIP_SPEED;
            }
            head_down(ship);
            ship.state.moving_y = true;
            ship.state.latch_y.positive_released = false;
        }
        Key::Fire => return,
    }
    clamp_to_bounds(ship, viewport);
}

/// Apply a key-up edge: the ship heads the opposite way until the axis
/// settles.
pub fn key_up(ship: &mut Ship, key: Key) {
    match key {
        Key::Left => {
            ship.state.latch_x.negative_released = true;
            head_right(ship);
        }
        Key::Right => {
            ship.state.latch_x.positive_released = true;
            head_left(ship);
        }
        Key::Up => {
            ship.state.latch_y.negative_released = true;
            head_down(ship);
        }
        Key::Down => {
            ship.state.latch_y.positive_released = true;
            head_up(ship);
        }
        Key::Fire => {}
    }
}

// ── Per-tick ──────────────────────────────────────────────────────────────────

/// Recompute the proximity flags from the absolute position.  A flag set on
/// one side is only cleared once the ship is strictly inside on that axis.
pub fn update_proximity(ship: &mut Ship, viewport: Viewport) {
    let s = &mut ship.state;
    if ship.x <= 0.0 {
        s.far_left = true;
    } else if ship.x >= viewport.width {
        s.far_right = true;
    } else {
        s.far_left = false;
        s.far_right = false;
    }

    if ship.y <= HIGHEST_SHIP_HEIGHT {
        s.too_high = true;
    } else if ship.y >= viewport.height {
        s.too_low = true;
    } else {
        s.too_high = false;
        s.too_low = false;
    }
}

pub fn move_ship(ship: &mut Ship, viewport: Viewport) {
    let in_x = ship.x >= 0.0 && ship.x <= viewport.width;
    let in_y = ship.y >= HIGHEST_SHIP_HEIGHT && ship.y <= viewport.height;
    if ship.state.moving_x && in_x {
        ship.x += ship.state.speed_x;
    }
    if ship.state.moving_y && in_y {
        ship.y += ship.state.speed_y;
    }
    clamp_to_bounds(ship, viewport);
}

/// Idle an axis once both of its keys are released.
pub fn settle(ship: &mut Ship) {
    if ship.state.latch_x.both_released() {
        ship.state.moving_x = false;
    }
    if ship.state.latch_y.both_released() {
        ship.state.moving_y = false;
    }
}
