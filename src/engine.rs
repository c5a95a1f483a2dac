/// Seam to the presentation/input engine.
///
/// The core never draws or polls devices itself.  It asks a `Stage` for the
/// viewport and for overlap decisions, and it receives input as `Key` edges.

use crate::entities::{Hitbox, Viewport};

pub trait Stage {
    fn viewport(&self) -> Viewport;

    fn colliding(&self, a: &Hitbox, b: &Hitbox) -> bool {
        a.overlaps(b)
    }
}

/// A stage with a fixed world size and box-overlap collisions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedStage {
    pub viewport: Viewport,
}

impl FixedStage {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Viewport { width, height },
        }
    }
}

impl Stage for FixedStage {
    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

impl Key {
    /// Map an engine key name onto a game key.  Unmapped names yield `None`.
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "a" | "left" => Some(Key::Left),
            "d" | "right" => Some(Key::Right),
            "w" | "up" => Some(Key::Up),
            "s" | "down" => Some(Key::Down),
            "space" | " " => Some(Key::Fire),
            _ => None,
        }
    }
}
