//! Per-frame interaction resolution and level progression
//!
//! Every pass scans the registries as they stood at the start of
//! resolution. Hits only record indices; the registries are filtered once
//! at the end, so an index found in one pass is still valid in the next.

use glam::Vec2;

use super::collision::{Rect, has_exited};
use super::effects::{EffectSink, TextTone};
use super::registry::RemovalSet;
use super::state::GameState;
use super::units::{Bullet, BulletKind, Crate, CrateKind};
use crate::consts::*;
use crate::error::ConfigError;

/// What one resolution pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Ships defeated by damage
    pub sunk: u32,
    /// Ships that left the screen
    pub escaped: u32,
    pub bullets_removed: usize,
    pub ships_removed: usize,
    pub torpedoes_removed: usize,
    pub crates_removed: usize,
    /// Crates shot by the player, in pickup order
    pub pickups: Vec<CrateKind>,
    /// A ship was spawned because the field emptied
    pub respawned: bool,
}

/// Removal sets collected across the passes
#[derive(Debug, Default)]
struct Removals {
    bullets: RemovalSet,
    ships: RemovalSet,
    torpedoes: RemovalSet,
    crates: RemovalSet,
}

/// Resolves collisions, scoring and crate pickups for one frame
#[derive(Debug, Clone, Copy)]
pub struct InteractionEngine {
    bounds: Rect,
}

impl InteractionEngine {
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// Run every pass, apply the batched removals and keep the field populated
    pub fn resolve_frame(&self, state: &mut GameState) -> Result<FrameReport, ConfigError> {
        let mut removals = Removals::default();
        let mut report = FrameReport::default();
        // Bullets raised by crate effects join after removal
        let mut pending_bullets: Vec<Bullet> = Vec::new();

        self.bullets_out_of_bounds(state, &mut removals);
        self.bullets_hit_ships(state, &mut removals, &mut report);
        self.bullets_hit_player(state, &mut removals);
        self.ships_out_of_bounds(state, &mut removals, &mut report);
        self.torpedoes_hit_player(state, &mut removals);
        self.bullets_hit_torpedoes(state, &mut removals);
        self.bullets_hit_crates(state, &mut removals, &mut report, &mut pending_bullets);
        self.ships_crush_crates(state, &mut removals);

        report.bullets_removed = removals.bullets.len();
        report.ships_removed = removals.ships.len();
        report.torpedoes_removed = removals.torpedoes.len();
        report.crates_removed = removals.crates.len();

        state.bullets.remove(&removals.bullets);
        state.enemies.remove(&removals.ships);
        state.torpedoes.remove(&removals.torpedoes);
        state.crates.remove(&removals.crates);
        for bullet in pending_bullets {
            state.bullets.add(bullet);
        }

        if state.enemies.is_empty() {
            let field = state.field();
            let tuning = state.settings.level(state.level.current())?;
            report.respawned = state.enemies.spawn_now(field, tuning, &mut state.rng);
        }
        state.enemies.inc_sunk_count(report.sunk);

        Ok(report)
    }

    /// Pass 1: bullets that left the screen
    fn bullets_out_of_bounds(&self, state: &GameState, removals: &mut Removals) {
        for (i, bullet) in state.bullets.get_all().iter().enumerate() {
            if !self.bounds.contains_point(bullet.pos) {
                removals.bullets.insert(i);
            }
        }
    }

    /// Pass 2a: friendly rounds against hostile ships
    fn bullets_hit_ships(
        &self,
        state: &mut GameState,
        removals: &mut Removals,
        report: &mut FrameReport,
    ) {
        let GameState {
            bullets,
            enemies,
            score,
            effects,
            ..
        } = state;
        let mut defeated = RemovalSet::new();

        for (i, bullet) in bullets.get_all().iter().enumerate() {
            if !bullet.is_friendly() {
                continue;
            }
            let hit = bullet.rect();
            for (j, ship) in enemies.get_all_mut().iter_mut().enumerate() {
                if !hit.overlaps(&ship.rect()) {
                    continue;
                }
                removals.bullets.insert(i);
                // Hull already going down: the round is spent, nothing more
                if defeated.contains(&j) {
                    break;
                }
                effects.explosion(bullet.pos, EXPLOSION_SIZE);
                if ship.reduce_hp(bullet.damage()) {
                    defeated.insert(j);
                    let points = ship.points();
                    score.add(points);
                    effects.fade(ship.rect(), FADE_SECONDS);
                    effects.text(bullet.pos, format!("+{points}"), TextTone::Positive, None);
                    log::debug!("{:?} sunk for {} points", ship.kind, points);
                }
                // A round is spent on the first hull it meets
                break;
            }
        }

        report.sunk += defeated.len() as u32;
        removals.ships.extend(defeated);
    }

    /// Pass 2b: hostile rounds against the player
    fn bullets_hit_player(&self, state: &mut GameState, removals: &mut Removals) {
        let GameState {
            bullets,
            player,
            effects,
            ..
        } = state;
        let hull = player.rect();

        for (i, bullet) in bullets.get_all().iter().enumerate() {
            if bullet.is_friendly() || !bullet.rect().overlaps(&hull) {
                continue;
            }
            removals.bullets.insert(i);
            let damage = bullet.damage();
            effects.explosion(bullet.pos, EXPLOSION_SIZE);
            effects.text(bullet.pos, format!("-{damage}"), TextTone::Negative, None);
            player.reduce_hp(damage);
        }
    }

    /// Pass 3: ships that sailed off screen cost their point value
    fn ships_out_of_bounds(
        &self,
        state: &mut GameState,
        removals: &mut Removals,
        report: &mut FrameReport,
    ) {
        for (j, ship) in state.enemies.get_all().iter().enumerate() {
            if !has_exited(&ship.rect(), ship.direction, &self.bounds) {
                continue;
            }
            // Already sunk this frame; the award stands
            if !removals.ships.insert(j) {
                continue;
            }
            state.score.deduct(ship.points());
            report.escaped += 1;
            log::debug!("{:?} escaped, -{} points", ship.kind, ship.points());
        }
    }

    /// Pass 4: torpedoes striking the player or running off screen
    fn torpedoes_hit_player(&self, state: &mut GameState, removals: &mut Removals) {
        let GameState {
            torpedoes,
            player,
            effects,
            ..
        } = state;
        let hull = player.rect();

        for (k, torpedo) in torpedoes.get_all().iter().enumerate() {
            if torpedo.rect().overlaps(&hull) {
                removals.torpedoes.insert(k);
                let damage = torpedo.params().damage;
                effects.explosion(torpedo.pos, EXPLOSION_SIZE);
                effects.text(torpedo.pos, format!("-{damage}"), TextTone::Negative, None);
                player.reduce_hp(damage);
            } else if has_exited(&torpedo.rect(), torpedo.direction, &self.bounds) {
                removals.torpedoes.insert(k);
            }
        }
    }

    /// Pass 5: friendly rounds shooting down torpedoes
    fn bullets_hit_torpedoes(&self, state: &mut GameState, removals: &mut Removals) {
        let GameState {
            bullets,
            torpedoes,
            score,
            effects,
            ..
        } = state;
        let mut destroyed = RemovalSet::new();

        for (i, bullet) in bullets.get_all().iter().enumerate() {
            if !bullet.is_friendly() {
                continue;
            }
            let hit = bullet.rect();
            let target = torpedoes
                .get_all()
                .iter()
                .enumerate()
                .find(|(k, torpedo)| !destroyed.contains(k) && hit.overlaps(&torpedo.rect()));
            let Some((k, torpedo)) = target else {
                continue;
            };

            destroyed.insert(k);
            removals.bullets.insert(i);
            let points = torpedo.params().points;
            score.add(points);
            effects.explosion(bullet.pos, EXPLOSION_SIZE);
            effects.fade(torpedo.rect(), FADE_SECONDS);
            effects.text(bullet.pos, format!("+{points}"), TextTone::Positive, None);
        }

        removals.torpedoes.extend(destroyed);
    }

    /// Pass 6: friendly rounds opening crates
    fn bullets_hit_crates(
        &self,
        state: &mut GameState,
        removals: &mut Removals,
        report: &mut FrameReport,
        pending_bullets: &mut Vec<Bullet>,
    ) {
        let mut picked = RemovalSet::new();

        for i in 0..state.bullets.count() {
            let Some(bullet) = state.bullets.get(i) else {
                continue;
            };
            if !bullet.is_friendly() {
                continue;
            }
            let (hit, at) = (bullet.rect(), bullet.pos);
            let target = state
                .crates
                .get_all()
                .iter()
                .enumerate()
                .find(|(c, item)| !picked.contains(c) && hit.overlaps(&item.rect()))
                .map(|(c, item)| (c, item.clone()));
            let Some((c, item)) = target else {
                continue;
            };

            picked.insert(c);
            removals.bullets.insert(i);
            state.score.add(item.points);
            state.effects.explosion(at, EXPLOSION_SIZE);
            apply_crate_effect(state, &item, at, &removals.ships, pending_bullets);
            report.pickups.push(item.kind);
        }

        removals.crates.extend(picked);
    }

    /// Pass 7: ships crush crates in their way for no reward
    fn ships_crush_crates(&self, state: &GameState, removals: &mut Removals) {
        for (c, item) in state.crates.get_all().iter().enumerate() {
            let rect = item.rect();
            if state.enemies.get_all().iter().any(|ship| ship.rect().overlaps(&rect)) {
                removals.crates.insert(c);
            }
        }
    }

    /// Advance the level once the sunk counter reaches its threshold.
    /// Returns true on a level change.
    pub fn check_level_up(&self, state: &mut GameState) -> Result<bool, ConfigError> {
        let threshold = state.tuning()?.level_up_after;
        if state.enemies.sunk_count() < threshold || !state.level.advance() {
            return Ok(false);
        }

        let tuning = state.settings.level(state.level.current())?;
        state.enemies.reset_sunk_count();
        state.enemies.set_max_enemies(tuning.max_enemies);
        state.enemies.set_wait_range(tuning.enemy_wait);

        let center = self.bounds.center();
        state.effects.text(
            center,
            "LEVEL UP!".to_string(),
            TextTone::Positive,
            Some(LEVEL_UP_FONT_SIZE),
        );
        log::info!(
            "Level up: {} (max enemies {}, score {})",
            state.level.current(),
            tuning.max_enemies,
            state.score.value()
        );
        Ok(true)
    }
}

/// Apply a picked-up crate to the player or the field. `sinking` lists
/// ships already leaving this frame, which the area bomb skips.
fn apply_crate_effect(
    state: &mut GameState,
    item: &Crate,
    at: Vec2,
    sinking: &RemovalSet,
    pending_bullets: &mut Vec<Bullet>,
) {
    log::debug!("Picked up {:?} crate", item.kind);
    let text = match item.kind {
        CrateKind::Repair => {
            state.player.increase_hp(item.effect);
            format!("+{}hp", item.effect)
        }
        CrateKind::ArmorBoost => {
            state.player.increase_max_hp(item.effect);
            format!("+{} max hp", item.effect)
        }
        CrateKind::FullHeal => {
            state.player.reset_hp();
            "HP refilled!".to_string()
        }
        CrateKind::AreaBomb => {
            let targets = state
                .enemies
                .get_all()
                .iter()
                .enumerate()
                .filter(|(j, _)| !sinking.contains(j))
                .map(|(_, ship)| ship.center());
            pending_bullets.extend(targets.map(|c| Bullet::new(BulletKind::PlayerRound, c, 0.0)));
            "C'EST LA BOMBE!".to_string()
        }
        CrateKind::MineDrop => {
            let center = item.rect().center();
            let offsets = [
                Vec2::new(0.0, -MINE_SPACING),
                Vec2::new(MINE_SPACING, 0.0),
                Vec2::new(0.0, MINE_SPACING),
                Vec2::new(-MINE_SPACING, 0.0),
            ];
            pending_bullets.extend(
                offsets
                    .iter()
                    .map(|&offset| Bullet::new(BulletKind::Mine, center + offset, 0.0)),
            );
            "Mines!".to_string()
        }
        CrateKind::RapidFire => {
            state.options.rapid_fire();
            "M..m...machine gun!!!".to_string()
        }
    };
    state.effects.text(at, text, TextTone::Positive, None);
}
