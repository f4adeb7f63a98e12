//! Frame step
//!
//! One call advances every registry by the measured frame delta, resolves
//! interactions and then applies the player's intents.

use glam::Vec2;

use super::collision::Rect;
use super::effects::{EffectSink, TextTone};
use super::logic::{FrameReport, InteractionEngine};
use super::state::{GamePhase, GameState};
use super::units::{Bullet, BulletKind};
use crate::consts::*;
use crate::error::ConfigError;

/// Muzzle flash footprint
const FLASH_SIZE: f32 = 12.0;

/// Player intents active this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Rotate the turret counter-clockwise
    pub turn_left: bool,
    /// Rotate the turret clockwise
    pub turn_right: bool,
    pub fire: bool,
    /// Open the pause menu
    pub pause: bool,
}

/// Result of a frame step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    Running(FrameReport),
    GameOver,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Result<FrameOutcome, ConfigError> {
    if state.phase == GamePhase::GameOver {
        return Ok(FrameOutcome::GameOver);
    }

    let engine = InteractionEngine::new(state.settings.bounds());
    engine.check_level_up(state)?;

    state.player.update(dt, &state.options);

    let field = state.field();
    let level = state.level.current();
    {
        let tuning = state.settings.level(level)?;
        state.enemies.spawn_tick(dt, field, tuning, &mut state.rng);
    }
    state.enemies.move_ships(dt, level);
    state.enemies.shoot(
        dt,
        field.bounds,
        state.settings.max_torpedoes,
        &mut state.torpedoes,
        &mut state.bullets,
    );
    state.torpedoes.move_all(dt);
    state.bullets.move_all(dt);

    {
        let tuning = state.settings.level(level)?;
        let player = state.player.rect();
        state.crates.make_crate(
            dt,
            field,
            &state.enemies,
            player,
            &state.settings.crate_ratios,
            tuning,
            &mut state.rng,
        );
    }
    state.crates.check(dt);

    let report = engine.resolve_frame(state)?;

    if let Some(secs) = state.options.check(dt) {
        let center = state.screen_center();
        state.effects.text(
            center,
            format!("{secs}..."),
            TextTone::Positive,
            Some(COUNTDOWN_FONT_SIZE),
        );
    }

    state.frame += 1;

    if state.player.is_sunk() {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} frames: score {}, level {}, {} ships spawned",
            state.frame,
            state.score.value(),
            state.level.current(),
            state.enemies.total_spawned()
        );
        return Ok(FrameOutcome::GameOver);
    }

    apply_input(state, input);
    Ok(FrameOutcome::Running(report))
}

/// Turn the turret and fire if reload and power allow
fn apply_input(state: &mut GameState, input: &TickInput) {
    if input.turn_right {
        state.player.turn(TURRET_TURN_STEP);
    }
    if input.turn_left {
        state.player.turn(-TURRET_TURN_STEP);
    }

    if input.fire {
        if let Some(muzzle) = state.player.fire(&state.options) {
            let bearing = state.player.bearing;
            state.bullets.add(Bullet::new(BulletKind::PlayerRound, muzzle, bearing));
            state.effects.fade(
                Rect::from_center(muzzle, Vec2::splat(FLASH_SIZE)),
                MUZZLE_FLASH_SECONDS,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::effects::Effect;
    use crate::sim::player::BASE_SHOT_COST;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_fire_spawns_round_at_muzzle() {
        let mut state = GameState::new(Settings::default(), 21).unwrap();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        let before = state.bullets.count();
        tick(&mut state, &input, DT).unwrap();

        let round = state
            .bullets
            .get_all()
            .iter()
            .find(|b| b.kind == BulletKind::PlayerRound)
            .expect("player round");
        assert_eq!(round.pos, state.player.muzzle());
        assert!(state.bullets.count() > before);
        assert!(state.player.power < state.player.max_power - BASE_SHOT_COST + 10.0);
        assert!(
            state
                .effects
                .pending()
                .iter()
                .any(|e| matches!(e, Effect::Fade { seconds, .. } if *seconds == MUZZLE_FLASH_SECONDS))
        );
    }

    #[test]
    fn test_turn_input_rotates_turret() {
        let mut state = GameState::new(Settings::default(), 22).unwrap();
        let right = TickInput {
            turn_right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &right, DT).unwrap();
        }
        assert_eq!(state.player.bearing, 10.0 * TURRET_TURN_STEP);

        let left = TickInput {
            turn_left: true,
            ..Default::default()
        };
        for _ in 0..15 {
            tick(&mut state, &left, DT).unwrap();
        }
        assert_eq!(state.player.bearing, 360.0 - 5.0 * TURRET_TURN_STEP);
    }

    #[test]
    fn test_sunk_player_ends_session() {
        let mut state = GameState::new(Settings::default(), 23).unwrap();
        state.player.reduce_hp(state.player.max_hp);

        let outcome = tick(&mut state, &TickInput::default(), DT).unwrap();
        assert_eq!(outcome, FrameOutcome::GameOver);
        assert!(state.is_over());

        // Further frames are inert
        let frame = state.frame;
        tick(&mut state, &TickInput::default(), DT).unwrap();
        assert_eq!(state.frame, frame);
    }

    #[test]
    fn test_level_up_runs_first() {
        let mut state = GameState::new(Settings::default(), 24).unwrap();
        state.enemies.inc_sunk_count(20);
        tick(&mut state, &TickInput::default(), DT).unwrap();
        assert_eq!(state.level.current(), 1);
        assert!(state.effects.texts().any(|t| t == "LEVEL UP!"));
    }

    #[test]
    fn test_countdown_announced() {
        let mut state = GameState::new(Settings::default(), 25).unwrap();
        state.options.rapid_fire();
        tick(&mut state, &TickInput::default(), DT).unwrap();
        assert!(state.effects.texts().any(|t| t == "10..."));
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(Settings::default(), 99999).unwrap();
        let mut b = GameState::new(Settings::default(), 99999).unwrap();
        let inputs = [
            TickInput {
                turn_right: true,
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                fire: true,
                ..Default::default()
            },
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut a, input, DT).unwrap();
                tick(&mut b, input, DT).unwrap();
            }
        }

        assert_eq!(a.frame, b.frame);
        assert_eq!(a.score, b.score);
        assert_eq!(a.enemies.count(), b.enemies.count());
        assert_eq!(a.enemies.total_spawned(), b.enemies.total_spawned());
        assert_eq!(a.bullets.count(), b.bullets.count());
        assert_eq!(a.player.hp, b.player.hp);
    }
}
