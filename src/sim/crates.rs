//! Crate registry: timed drops, placement avoidance and ageing out
//!
//! Crates must land clear of every live ship and the player. The enemy
//! registry is handed in by the owner on each call instead of being held
//! here, so neither registry needs the other at construction time.

use glam::Vec2;
use rand::Rng;

use super::collision::Rect;
use super::enemies::{Enemies, Field};
use super::registry::{Registry, RemovalSet};
use super::units::{CRATE_SIZE, Crate, CrateKind};
use crate::consts::*;
use crate::settings::{LevelTuning, RatioTable};

/// Crates stay this far below the HUD band
const CRATE_HUD_CLEARANCE: f32 = 20.0;

#[derive(Debug, Clone)]
pub struct Crates {
    items: Registry<Crate>,
    /// Seconds since the last drop
    elapsed: f32,
    /// Seconds to wait before the next drop
    pause: f32,
    timeout: f32,
    max_crates: usize,
}

impl Crates {
    pub fn new(tuning: &LevelTuning, timeout: f32, max_crates: usize, rng: &mut impl Rng) -> Self {
        Self {
            items: Registry::new(),
            elapsed: 0.0,
            pause: tuning.crate_wait.sample(rng),
            timeout,
            max_crates,
        }
    }

    /// Drop a crate once the pause has elapsed. Returns the kind dropped.
    #[allow(clippy::too_many_arguments)]
    pub fn make_crate(
        &mut self,
        dt: f32,
        field: Field,
        enemies: &Enemies,
        player: Rect,
        ratios: &RatioTable,
        tuning: &LevelTuning,
        rng: &mut impl Rng,
    ) -> Option<CrateKind> {
        self.elapsed += dt;
        if self.elapsed <= self.pause {
            return None;
        }
        // Whatever happens below, the next drop waits a fresh pause
        self.elapsed = 0.0;
        self.pause = tuning.crate_wait.sample(rng);

        if self.items.count() >= self.max_crates {
            return None;
        }

        let index = ratios.draw(rng);
        debug_assert!(index.is_some(), "crate ratio table failed validation");
        let kind = CrateKind::from_index(index?)?;

        let Some(pos) = Self::place(field, enemies, player, rng) else {
            log::warn!(
                "No clear spot for {:?} crate after {} attempts, skipping drop",
                kind,
                MAX_PLACEMENT_ATTEMPTS
            );
            return None;
        };

        log::debug!("Dropped {:?} crate at ({:.0}, {:.0})", kind, pos.x, pos.y);
        self.items.add(Crate::with_defaults(kind, pos));
        Some(kind)
    }

    /// Rejection-sample a crate position clear of ships and the player
    fn place(field: Field, enemies: &Enemies, player: Rect, rng: &mut impl Rng) -> Option<Vec2> {
        let bounds = field.bounds;
        let x_range = (bounds.left() + CRATE_EDGE_MARGIN)..(bounds.right() - CRATE_EDGE_MARGIN);
        let y_range = (bounds.top() + field.hud_margin + CRATE_HUD_CLEARANCE)
            ..(bounds.bottom() - CRATE_EDGE_MARGIN);
        if x_range.is_empty() || y_range.is_empty() {
            return None;
        }

        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let pos = Vec2::new(
                rng.random_range(x_range.clone()),
                rng.random_range(y_range.clone()),
            );
            let rect = Rect::new(pos.x, pos.y, CRATE_SIZE.x, CRATE_SIZE.y);
            let blocked = rect.overlaps(&player)
                || enemies.get_all().iter().any(|ship| ship.rect().overlaps(&rect));
            if !blocked {
                return Some(pos);
            }
        }
        None
    }

    /// Age every crate and drop the ones past their timeout
    pub fn check(&mut self, dt: f32) {
        let mut expired = RemovalSet::new();
        for (i, item) in self.items.iter_mut().enumerate() {
            item.age += dt;
            if item.age > self.timeout {
                expired.insert(i);
            }
        }
        self.items.remove(&expired);
    }

    pub fn add(&mut self, item: Crate) {
        self.items.add(item);
    }

    pub fn get_all(&self) -> &[Crate] {
        self.items.get_all()
    }

    pub fn remove(&mut self, indices: &RemovalSet) {
        self.items.remove(indices);
    }

    pub fn count(&self) -> usize {
        self.items.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::collision::Direction;
    use crate::sim::units::{Ship, ShipKind};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field() -> Field {
        Field {
            bounds: Rect::new(0.0, 0.0, 1280.0, 1024.0),
            hud_margin: 16.0,
        }
    }

    #[test]
    fn test_crate_waits_for_pause() {
        let settings = Settings::default();
        let tuning = &settings.levels[0];
        let mut rng = Pcg32::seed_from_u64(11);
        let enemies = Enemies::new(tuning, &mut rng);
        let mut crates = Crates::new(tuning, 8.0, 2, &mut rng);
        let player = Rect::from_center(Vec2::new(640.0, 512.0), Vec2::new(60.0, 160.0));

        // Level 0 pauses are at least 20 seconds
        assert!(
            crates
                .make_crate(19.0, field(), &enemies, player, &settings.crate_ratios, tuning, &mut rng)
                .is_none()
        );
        assert!(
            crates
                .make_crate(6.0, field(), &enemies, player, &settings.crate_ratios, tuning, &mut rng)
                .is_some()
        );
        assert_eq!(crates.count(), 1);
    }

    #[test]
    fn test_crate_avoids_ships_and_player() {
        let settings = Settings::default();
        let tuning = &settings.levels[0];
        let mut rng = Pcg32::seed_from_u64(12);
        let mut enemies = Enemies::new(tuning, &mut rng);
        let mut y = 40.0;
        while y < 1000.0 {
            enemies.add(Ship::new(ShipKind::Fregatte, 30.0, Vec2::new(200.0, y), Direction::Left));
            y += 100.0;
        }
        let player = Rect::from_center(Vec2::new(640.0, 512.0), Vec2::new(60.0, 160.0));
        let mut crates = Crates::new(tuning, 8.0, 50, &mut rng);

        for _ in 0..30 {
            crates.make_crate(30.0, field(), &enemies, player, &settings.crate_ratios, tuning, &mut rng);
        }
        assert!(crates.count() > 0);
        for item in crates.get_all() {
            let rect = item.rect();
            assert!(!rect.overlaps(&player));
            assert!(enemies.get_all().iter().all(|s| !s.rect().overlaps(&rect)));
        }
    }

    #[test]
    fn test_crate_capacity() {
        let settings = Settings::default();
        let tuning = &settings.levels[0];
        let mut rng = Pcg32::seed_from_u64(13);
        let enemies = Enemies::new(tuning, &mut rng);
        let player = Rect::from_center(Vec2::new(640.0, 512.0), Vec2::new(60.0, 160.0));
        let mut crates = Crates::new(tuning, 8.0, 2, &mut rng);
        for _ in 0..5 {
            crates.make_crate(30.0, field(), &enemies, player, &settings.crate_ratios, tuning, &mut rng);
        }
        assert_eq!(crates.count(), 2);
    }

    #[test]
    fn test_check_expires_old_crates() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(14);
        let mut crates = Crates::new(&settings.levels[0], 8.0, 2, &mut rng);
        crates.add(Crate::with_defaults(CrateKind::Repair, Vec2::new(100.0, 100.0)));
        crates.check(5.0);
        crates.add(Crate::with_defaults(CrateKind::MineDrop, Vec2::new(300.0, 100.0)));
        crates.check(4.0);
        assert_eq!(crates.count(), 1);
        assert_eq!(crates.get_all()[0].kind, CrateKind::MineDrop);
    }
}
