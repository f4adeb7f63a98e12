//! Destroyer entry point
//!
//! Runs a headless session: an autopilot mans the turret and the HUD is
//! written to the log. Usage: `destroyer [settings.json] [seed]`.

use std::error::Error;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use destroyer::platform::{
    FrameRenderer, InputSource, MenuChoice, PauseMenu, SessionConfig, run_session,
};
use destroyer::sim::{Effect, GameState, ShipKind, TickInput};
use destroyer::{Settings, bearing_to};

/// Frames between HUD log lines
const HUD_INTERVAL: u64 = 120;
/// Demo length (about two minutes at 60 fps)
const DEMO_FRAMES: u64 = 60 * 120;

/// Writes the HUD and floating texts to the log
struct LogRenderer;

impl FrameRenderer for LogRenderer {
    fn render(&mut self, state: &GameState, effects: &[Effect]) {
        for effect in effects {
            if let Effect::FloatingText { text, .. } = effect {
                log::debug!("[frame {}] {}", state.frame, text);
            }
        }

        if state.frame % HUD_INTERVAL == 0 || state.is_over() {
            log::info!(
                "score {:>6} | level {} | hp {}/{} | power {:.0} | ships {} | sunk {}",
                state.score.value(),
                state.level.current(),
                state.player.hp,
                state.player.max_hp,
                state.player.power,
                state.enemies.count(),
                state.enemies.sunk_count()
            );
        }
    }
}

/// Swings the turret toward the nearest ship and fires when roughly on target
struct Autopilot;

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        let origin = state.player.center;
        let target = state
            .enemies
            .get_all()
            .iter()
            .map(|ship| ship.center())
            .min_by(|a, b| a.distance_squared(origin).total_cmp(&b.distance_squared(origin)));

        let Some(bearing) = target.and_then(|t| bearing_to(origin, t)) else {
            return TickInput::default();
        };

        // Signed difference in (-180, 180]
        let diff = (bearing - state.player.bearing + 540.0).rem_euclid(360.0) - 180.0;
        TickInput {
            turn_left: diff < -1.0,
            turn_right: diff > 1.0,
            fire: diff.abs() < 5.0,
            pause: false,
        }
    }
}

/// Headless sessions never pause for long
struct AlwaysResume;

impl PauseMenu for AlwaysResume {
    fn show(&mut self, _state: &GameState) -> MenuChoice {
        MenuChoice::Resume
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => {
            log::info!("Loading settings from {}", path);
            Settings::from_json(&std::fs::read_to_string(&path)?)?
        }
        None => Settings::default(),
    };
    let seed = match args.next() {
        Some(seed) => seed.parse()?,
        None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64,
    };

    log::info!("Destroyer starting...");
    let mut state = GameState::new(settings, seed)?;

    let config = SessionConfig {
        frame_pacing: Duration::from_millis(16),
        max_frames: Some(DEMO_FRAMES),
        fixed_dt: None,
    };
    let end = run_session(
        &mut state,
        &mut LogRenderer,
        &mut Autopilot,
        &mut AlwaysResume,
        config,
    )?;

    log::info!(
        "Session ended ({:?}): score {}, level {}, {} ships spawned",
        end,
        state.score.value(),
        state.level.current(),
        state.enemies.total_spawned()
    );
    let counts = state.enemies.type_counts();
    for kind in ShipKind::ALL {
        log::info!("  {:?}: {}", kind, counts[kind as usize]);
    }
    Ok(())
}
