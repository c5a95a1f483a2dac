/// Terminal key handling: key mapping, quit keys, and held-key bookkeeping
/// for terminals that never report key releases.

use std::collections::HashMap;
use std::sync::mpsc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use alien_raid::{GameSession, Key, Stage};

/// Frames a key may go unseen before its first auto-repeat arrives.  The OS
/// waits a few hundred milliseconds before repeating a held key.
pub const FIRST_REPEAT_WINDOW: u64 = 20;

/// Frames a repeating key may go unseen before it counts as released.  Once
/// repeats are flowing they arrive at ≥ 15 Hz, well inside this window at
/// 30 FPS.
pub const HOLD_WINDOW: u64 = 4;

pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Key::from_name("left"),
        KeyCode::Right => Key::from_name("right"),
        KeyCode::Up => Key::from_name("up"),
        KeyCode::Down => Key::from_name("down"),
        KeyCode::Char(' ') => Key::from_name("space"),
        KeyCode::Char(c) => Key::from_name(&c.to_ascii_lowercase().to_string()),
        _ => None,
    }
}

pub fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[derive(Clone, Copy, Debug)]
struct Held {
    last_seen: u64,
    repeating: bool,
}

impl Held {
    fn window(&self) -> u64 {
        if self.repeating {
            HOLD_WINDOW
        } else {
            FIRST_REPEAT_WINDOW
        }
    }
}

/// Direction keys currently held, with the frame each was last seen.
#[derive(Debug, Default)]
pub struct HeldKeys {
    keys: HashMap<Key, Held>,
}

impl HeldKeys {
    /// Record a press or auto-repeat.  Returns true when the session should
    /// get a `key_down`: the first press of a direction key, or any Fire.
    pub fn press(&mut self, key: Key, frame: u64) -> bool {
        if key == Key::Fire {
            return true;
        }
        match self.keys.get_mut(&key) {
            Some(held) => {
                held.last_seen = frame;
                held.repeating = true;
                false
            }
            None => {
                self.keys.insert(
                    key,
                    Held {
                        last_seen: frame,
                        repeating: false,
                    },
                );
                true
            }
        }
    }

    /// Record a reported release.  Returns true when the key was held.
    pub fn release(&mut self, key: Key) -> bool {
        self.keys.remove(&key).is_some()
    }

    /// Drop keys not seen within their window; each needs a `key_up`.
    pub fn expire(&mut self, frame: u64) -> Vec<Key> {
        let expired: Vec<Key> = self
            .keys
            .iter()
            .filter(|(_, held)| frame.saturating_sub(held.last_seen) > held.window())
            .map(|(key, _)| *key)
            .collect();
        for key in &expired {
            self.keys.remove(key);
        }
        expired
    }
}

/// Drain every pending event into the session without blocking.  Returns
/// true once a quit key is pressed.
pub fn drain(
    rx: &mpsc::Receiver<Event>,
    frame: u64,
    held: &mut HeldKeys,
    session: &mut GameSession,
    stage: &impl Stage,
) -> bool {
    while let Ok(ev) = rx.try_recv() {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
            continue;
        };
        if kind != KeyEventKind::Release && is_quit(code, modifiers) {
            return true;
        }
        let Some(key) = map_key(code) else {
            continue;
        };
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if held.press(key, frame) {
                    session.key_down(key, stage);
                }
            }
            KeyEventKind::Release => {
                if held.release(key) {
                    session.key_up(key);
                }
            }
        }
    }
    false
}
