/// Collision resolver: moves aliens and lasers, then settles every
/// lifecycle interaction for the tick.
///
/// Each pass marks entities in the registry and compacts before the next
/// pass runs, so later passes never see something an earlier one destroyed.

use rand::Rng;
use tracing::{debug, info};

use crate::config::{
    ALIEN_HEIGHT, ALIEN_SPEED, ALIEN_WIDTH, JITTER, LASER_HEIGHT, LASER_SPEED, LASER_WIDTH,
    LOW_ALIEN_MARGIN,
};
use crate::engine::Stage;
use crate::entities::{Alien, DifficultyTier, EntityId, Hitbox, Laser, Lives, Viewport};
use crate::registry::EntityRegistry;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    /// Aliens that slipped past the bottom margin.
    pub aliens_escaped: usize,
    /// Aliens that flew into the ship.
    pub aliens_rammed: usize,
    pub aliens_shot: usize,
    pub lasers_expired: usize,
    pub lives_lost: u32,
    pub destroyed: Vec<EntityId>,
}

pub fn alien_hitbox(alien: &Alien) -> Hitbox {
    Hitbox::new(alien.x, alien.y, ALIEN_WIDTH, ALIEN_HEIGHT)
}

pub fn laser_hitbox(laser: &Laser) -> Hitbox {
    Hitbox::new(laser.x, laser.y, LASER_WIDTH, LASER_HEIGHT)
}

// ── Motion ────────────────────────────────────────────────────────────────────

pub fn advance_lasers(registry: &mut EntityRegistry) {
    for laser in registry.lasers_mut() {
        laser.y -= LASER_SPEED;
    }
}

/// Drop every alien and, once unlocked for `level`, wobble it by up to
/// `JITTER` units on each axis.
pub fn descend_aliens(
    registry: &mut EntityRegistry,
    level: usize,
    tier: &DifficultyTier,
    rng: &mut impl Rng,
) {
    for alien in registry.aliens_mut() {
        alien.y += ALIEN_SPEED / 2.0;
        if level >= tier.jitter_x_level {
            alien.x += rng.gen_range(-JITTER..=JITTER) as f32;
        }
        if level >= tier.jitter_y_level {
            alien.y += rng.gen_range(-JITTER..=JITTER) as f32;
        }
    }
}

/// Aliens leaving one side reappear on the other.
pub fn wrap_aliens(registry: &mut EntityRegistry, viewport: Viewport) {
    for alien in registry.aliens_mut() {
        if alien.x > viewport.width {
            alien.x = 0.0;
        } else if alien.x < 0.0 {
            alien.x = viewport.width;
        }
    }
}

// ── Removal passes ────────────────────────────────────────────────────────────

pub fn remove_low_aliens(
    registry: &mut EntityRegistry,
    viewport: Viewport,
    lives: &mut Lives,
) -> (usize, Vec<EntityId>) {
    let floor = viewport.height - LOW_ALIEN_MARGIN;
    let low: Vec<usize> = registry
        .aliens()
        .iter()
        .enumerate()
        .filter(|(_, a)| a.alive && a.y > floor)
        .map(|(i, _)| i)
        .collect();
    for &i in &low {
        if registry.mark_alien(i) {
            lives.lose_one();
        }
    }
    (low.len(), registry.compact())
}

/// Every alien touching the ship costs one life, even several in one tick.
pub fn collide_ship_aliens(
    registry: &mut EntityRegistry,
    stage: &impl Stage,
    ship: &Hitbox,
    lives: &mut Lives,
) -> (usize, Vec<EntityId>) {
    let rammed: Vec<usize> = registry
        .aliens()
        .iter()
        .enumerate()
        .filter(|(_, a)| a.alive && stage.colliding(&alien_hitbox(a), ship))
        .map(|(i, _)| i)
        .collect();
    for &i in &rammed {
        if registry.mark_alien(i) {
            lives.lose_one();
        }
    }
    (rammed.len(), registry.compact())
}

/// Aliens are visited in registry order; each claims the first overlapping
/// laser nobody has claimed yet.  A laser never takes down two aliens.
pub fn collide_lasers_aliens(
    registry: &mut EntityRegistry,
    stage: &impl Stage,
) -> (usize, Vec<EntityId>) {
    let alien_boxes: Vec<Hitbox> = registry.aliens().iter().map(alien_hitbox).collect();
    let laser_boxes: Vec<Hitbox> = registry.lasers().iter().map(laser_hitbox).collect();

    let mut shot = 0;
    for (ai, alien_box) in alien_boxes.iter().enumerate() {
        if !registry.aliens()[ai].alive {
            continue;
        }
        let hit = laser_boxes
            .iter()
            .enumerate()
            .find(|(li, laser_box)| {
                registry.lasers()[*li].alive && stage.colliding(laser_box, alien_box)
            })
            .map(|(li, _)| li);
        if let Some(li) = hit {
            registry.mark_laser(li);
            registry.mark_alien(ai);
            shot += 1;
        }
    }
    (shot, registry.compact())
}

pub fn remove_offscreen_lasers(registry: &mut EntityRegistry) -> (usize, Vec<EntityId>) {
    let gone: Vec<usize> = registry
        .lasers()
        .iter()
        .enumerate()
        .filter(|(_, l)| l.alive && l.y <= 0.0)
        .map(|(i, _)| i)
        .collect();
    for &i in &gone {
        registry.mark_laser(i);
    }
    (gone.len(), registry.compact())
}

// ── Full pass ─────────────────────────────────────────────────────────────────

/// Run every alien/laser interaction for one tick, in order: descent and
/// jitter, wrap, low aliens, ship hits, laser hits, off-screen lasers.
pub fn resolve(
    registry: &mut EntityRegistry,
    stage: &impl Stage,
    ship: Option<&Hitbox>,
    level: usize,
    tier: &DifficultyTier,
    lives: &mut Lives,
    rng: &mut impl Rng,
) -> CollisionReport {
    let viewport = stage.viewport();
    let lives_before = lives.count;
    let mut report = CollisionReport::default();

    descend_aliens(registry, level, tier, rng);
    wrap_aliens(registry, viewport);

    let (escaped, destroyed) = remove_low_aliens(registry, viewport, lives);
    report.aliens_escaped = escaped;
    report.destroyed.extend(destroyed);

    if let Some(ship) = ship {
        let (rammed, destroyed) = collide_ship_aliens(registry, stage, ship, lives);
        report.aliens_rammed = rammed;
        report.destroyed.extend(destroyed);
    }

    let (shot, destroyed) = collide_lasers_aliens(registry, stage);
    report.aliens_shot = shot;
    report.destroyed.extend(destroyed);

    let (expired, destroyed) = remove_offscreen_lasers(registry);
    report.lasers_expired = expired;
    report.destroyed.extend(destroyed);

    report.lives_lost = lives_before - lives.count;
    if report.lives_lost > 0 {
        info!(
            lost = report.lives_lost,
            remaining = lives.count,
            "lives lost"
        );
    }
    if shot > 0 {
        debug!(shot, "aliens shot down");
    }
    report
}
