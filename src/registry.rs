/// Sole owner of live lasers and aliens.
///
/// Removal is two-phase: callers mark entities by index while iterating, then
/// `compact` drops everything marked in one pass and hands back the handles
/// that died.  Nothing marked survives a `compact`.

use crate::entities::{Alien, EntityId, Laser};

#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    next_id: u64,
    lasers: Vec<Laser>,
    aliens: Vec<Alien>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    // ── Creation ──────────────────────────────────────────────────────────────

    pub fn spawn_laser(&mut self, x: f32, y: f32) -> EntityId {
        let id = self.issue_id();
        self.lasers.push(Laser { id, x, y, alive: true });
        id
    }

    pub fn spawn_alien(&mut self, x: f32, y: f32) -> EntityId {
        let id = self.issue_id();
        self.aliens.push(Alien { id, x, y, alive: true });
        id
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn lasers(&self) -> &[Laser] {
        &self.lasers
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    pub fn lasers_mut(&mut self) -> &mut [Laser] {
        &mut self.lasers
    }

    pub fn aliens_mut(&mut self) -> &mut [Alien] {
        &mut self.aliens
    }

    pub fn has_aliens(&self) -> bool {
        self.aliens.iter().any(|a| a.alive)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.lasers.iter().any(|l| l.id == id) || self.aliens.iter().any(|a| a.id == id)
    }

    // ── Removal ───────────────────────────────────────────────────────────────

    /// Returns `false` if the laser was already marked this pass.
    pub fn mark_laser(&mut self, index: usize) -> bool {
        match self.lasers.get_mut(index) {
            Some(laser) if laser.alive => {
                laser.alive = false;
                true
            }
            _ => false,
        }
    }

    /// Returns `false` if the alien was already marked this pass.
    pub fn mark_alien(&mut self, index: usize) -> bool {
        match self.aliens.get_mut(index) {
            Some(alien) if alien.alive => {
                alien.alive = false;
                true
            }
            _ => false,
        }
    }

    /// Drop every marked entity and return their handles, lasers first.
    pub fn compact(&mut self) -> Vec<EntityId> {
        let mut removed = Vec::new();
        self.lasers.retain(|l| {
            if !l.alive {
                removed.push(l.id);
            }
            l.alive
        });
        self.aliens.retain(|a| {
            if !a.alive {
                removed.push(a.id);
            }
            a.alive
        });
        removed
    }

    /// Destroy everything at once.
    pub fn clear(&mut self) -> Vec<EntityId> {
        self.lasers
            .drain(..)
            .map(|l| l.id)
            .chain(self.aliens.drain(..).map(|a| a.id))
            .collect()
    }
}
