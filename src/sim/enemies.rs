//! Hostile ship registry: timed spawning, movement and shooting
//!
//! Spawning picks a ship type from the level's ratio table, then places
//! edge-spawning ships on a row that keeps clear of every live ship.

use glam::Vec2;
use rand::Rng;

use super::collision::{Direction, Rect, has_crossed_midline};
use super::projectiles::{Bullets, Torpedoes};
use super::registry::{Registry, RemovalSet};
use super::units::{Bullet, Ship, ShipKind, SpawnMethod, Torpedo};
use crate::bearing_to;
use crate::consts::*;
use crate::settings::{LevelTuning, SHIP_TYPE_COUNT, WaitRange};

/// Play-field geometry needed for placement
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub bounds: Rect,
    /// Top band kept free for the HUD
    pub hud_margin: f32,
}

#[derive(Debug, Clone)]
pub struct Enemies {
    ships: Registry<Ship>,
    max_enemies: usize,
    wait_range: WaitRange,
    /// Seconds to wait before the next spawn
    next_enemy_in: f32,
    /// Seconds since the last spawn
    elapsed: f32,
    total_spawned: u32,
    sunk: u32,
    type_counts: [u32; SHIP_TYPE_COUNT],
}

impl Enemies {
    pub fn new(tuning: &LevelTuning, rng: &mut impl Rng) -> Self {
        Self {
            ships: Registry::new(),
            max_enemies: tuning.max_enemies,
            wait_range: tuning.enemy_wait,
            next_enemy_in: tuning.enemy_wait.sample(rng),
            elapsed: 0.0,
            total_spawned: 0,
            sunk: 0,
            type_counts: [0; SHIP_TYPE_COUNT],
        }
    }

    /// Time-gated spawn; returns true if a ship was added this frame
    pub fn spawn_tick(
        &mut self,
        dt: f32,
        field: Field,
        tuning: &LevelTuning,
        rng: &mut impl Rng,
    ) -> bool {
        self.elapsed += dt;

        let due = self.ships.is_empty()
            || (self.ships.count() < self.max_enemies && self.elapsed > self.next_enemy_in);
        if !due {
            return false;
        }
        self.spawn_now(field, tuning, rng)
    }

    /// Spawn immediately, ignoring the timer. Resets the timer on success;
    /// a failed placement leaves it running so the next frame retries.
    pub fn spawn_now(&mut self, field: Field, tuning: &LevelTuning, rng: &mut impl Rng) -> bool {
        let Some(ship) = self.make_ship(field, tuning, rng) else {
            return false;
        };

        log::debug!(
            "Spawned {:?} at ({:.0}, {:.0}) heading {:?}",
            ship.kind,
            ship.pos.x,
            ship.pos.y,
            ship.direction
        );
        self.type_counts[ship.kind as usize] += 1;
        self.ships.add(ship);
        self.total_spawned += 1;
        self.elapsed = 0.0;
        self.next_enemy_in = self.wait_range.sample(rng);
        true
    }

    /// Roll a ship type, speed and origin
    fn make_ship(&self, field: Field, tuning: &LevelTuning, rng: &mut impl Rng) -> Option<Ship> {
        let index = tuning.ship_ratios.draw(rng);
        debug_assert!(index.is_some(), "ship ratio table failed validation");
        let kind = ShipKind::from_index(index?)?;
        let params = kind.params();
        let speed = rng.random_range(params.min_speed..params.max_speed);

        match params.spawn {
            SpawnMethod::Fixed { origin, direction } => {
                let x = if origin.0 == -1.0 { field.bounds.right() } else { origin.0 };
                let y = if origin.1 == -1.0 { field.bounds.bottom() } else { origin.1 };
                Some(Ship::new(kind, speed, Vec2::new(x, y), direction))
            }
            SpawnMethod::EdgeRandom => {
                let Some(y) = self.place_row(kind, field, rng) else {
                    log::warn!(
                        "No clear row for {:?} after {} attempts, skipping spawn",
                        kind,
                        MAX_PLACEMENT_ATTEMPTS
                    );
                    return None;
                };
                let (x, direction) = if rng.random_bool(0.5) {
                    (field.bounds.left() - SPAWN_OFFSET, Direction::Right)
                } else {
                    (field.bounds.right(), Direction::Left)
                };
                Some(Ship::new(kind, speed, Vec2::new(x, y), direction))
            }
        }
    }

    /// Rejection-sample a spawn row in the upper or lower half of the field
    /// whose hull keeps `PLACEMENT_MARGIN` clear of every live ship
    pub fn place_row(&self, kind: ShipKind, field: Field, rng: &mut impl Rng) -> Option<f32> {
        let params = kind.params();
        let mid = field.bounds.center().y;
        let halves = [
            (field.bounds.top() + field.hud_margin + EDGE_MARGIN, mid - params.min_dist),
            (mid + params.min_dist, field.bounds.bottom() - EDGE_MARGIN),
        ];

        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let (lo, hi) = halves[rng.random_range(0..2)];
            if lo >= hi {
                continue;
            }
            let y = rng.random_range(lo..hi);
            let candidate = Rect::new(0.0, y, params.size.x, params.size.y);
            let blocked = self
                .ships
                .iter()
                .any(|ship| candidate.vertically_near(&ship.rect(), PLACEMENT_MARGIN));
            if !blocked {
                return Some(y);
            }
        }
        None
    }

    /// Advance every ship along its heading
    pub fn move_ships(&mut self, dt: f32, level: u32) {
        for ship in self.ships.iter_mut() {
            ship.advance(dt, level);
        }
    }

    /// Launch torpedoes from ships past the midline and fire guns whose
    /// cooldown has elapsed
    pub fn shoot(
        &mut self,
        dt: f32,
        bounds: Rect,
        max_torpedoes: usize,
        torpedoes: &mut Torpedoes,
        bullets: &mut Bullets,
    ) {
        let mid = bounds.center();

        for ship in self.ships.iter_mut() {
            let center = ship.center();

            if let Some(kind) = ship.params().torpedo {
                if !ship.torpedo_shot && has_crossed_midline(center, ship.direction, &bounds) {
                    // At capacity the torpedo is lost rather than held back
                    if torpedoes.count() < max_torpedoes {
                        let direction = if center.y < mid.y {
                            Direction::Down
                        } else {
                            Direction::Up
                        };
                        torpedoes.add(Torpedo::new(kind, center, direction));
                    }
                    ship.torpedo_shot = true;
                }
            }

            if ship.gun_ready(dt) {
                let Some(gun) = ship.params().gun else {
                    continue;
                };
                // Degenerate aim (ship centred on the target) skips the shot
                if let Some(bearing) = bearing_to(center, mid) {
                    bullets.add(Bullet::new(gun.bullet(), center, bearing));
                }
            }
        }
    }

    pub fn get_all(&self) -> &[Ship] {
        self.ships.get_all()
    }

    pub fn get_all_mut(&mut self) -> &mut [Ship] {
        self.ships.get_all_mut()
    }

    pub fn add(&mut self, ship: Ship) {
        self.ships.add(ship);
    }

    pub fn remove(&mut self, indices: &RemovalSet) {
        self.ships.remove(indices);
    }

    pub fn count(&self) -> usize {
        self.ships.count()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Ships spawned since the session began
    pub fn total_spawned(&self) -> u32 {
        self.total_spawned
    }

    /// Spawns per ship type, indexed like the ratio table
    pub fn type_counts(&self) -> [u32; SHIP_TYPE_COUNT] {
        self.type_counts
    }

    pub fn sunk_count(&self) -> u32 {
        self.sunk
    }

    pub fn inc_sunk_count(&mut self, count: u32) {
        self.sunk += count;
    }

    pub fn reset_sunk_count(&mut self) {
        self.sunk = 0;
    }

    pub fn max_enemies(&self) -> usize {
        self.max_enemies
    }

    pub fn set_max_enemies(&mut self, count: usize) {
        self.max_enemies = count;
    }

    pub fn wait_range(&self) -> WaitRange {
        self.wait_range
    }

    pub fn set_wait_range(&mut self, range: WaitRange) {
        self.wait_range = range;
    }
}
