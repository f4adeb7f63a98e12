//! Platform abstraction layer
//!
//! Contracts for the collaborators around the simulation:
//! - Rendering (consumes state and drained effects once per frame)
//! - Input (delivers the intents active this frame)
//! - Pause menu (blocks until the player resumes or quits)
//!
//! `run_session` is the frame loop that wires them to a `GameState`.

use std::thread;
use std::time::Duration;

use crate::error::ConfigError;
use crate::sim::{Clock, Effect, FrameOutcome, GameState, TickInput, tick};

/// Draws one frame. Effects are handed over once and never repeated.
pub trait FrameRenderer {
    fn render(&mut self, state: &GameState, effects: &[Effect]);
}

/// Snapshot of the player's intents
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> TickInput;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Resume,
    Quit,
}

/// Shown when the pause intent fires; the simulation waits on the answer
pub trait PauseMenu {
    fn show(&mut self, state: &GameState) -> MenuChoice;
}

/// Frame loop limits
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Sleep between frames; zero runs flat out
    pub frame_pacing: Duration,
    /// Stop after this many frames
    pub max_frames: Option<u64>,
    /// Fixed delta instead of wall-clock time
    pub fixed_dt: Option<f32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_pacing: Duration::from_millis(16),
            max_frames: None,
            fixed_dt: None,
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    GameOver,
    Quit,
    FrameLimit,
}

/// Run frames until game over, quit or the frame limit
pub fn run_session(
    state: &mut GameState,
    renderer: &mut impl FrameRenderer,
    input: &mut impl InputSource,
    menu: &mut impl PauseMenu,
    config: SessionConfig,
) -> Result<SessionEnd, ConfigError> {
    let mut clock = Clock::new();
    clock.start();
    let mut intents = TickInput::default();

    loop {
        let dt = config.fixed_dt.unwrap_or_else(|| clock.delta());
        let outcome = tick(state, &intents, dt)?;

        let effects: Vec<Effect> = state.effects.drain().collect();
        renderer.render(state, &effects);

        if outcome == FrameOutcome::GameOver {
            return Ok(SessionEnd::GameOver);
        }
        if config.max_frames.is_some_and(|max| state.frame >= max) {
            return Ok(SessionEnd::FrameLimit);
        }

        intents = input.poll(state);
        if intents.pause {
            match menu.show(state) {
                MenuChoice::Quit => {
                    log::info!("Quit from pause menu at frame {}", state.frame);
                    return Ok(SessionEnd::Quit);
                }
                // Paused wall time is not simulated
                MenuChoice::Resume => clock.reset(),
            }
        }

        if !config.frame_pacing.is_zero() {
            thread::sleep(config.frame_pacing);
        }
        clock.sample();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[derive(Default)]
    struct CountingRenderer {
        frames: u64,
        effects: usize,
    }

    impl FrameRenderer for CountingRenderer {
        fn render(&mut self, _state: &GameState, effects: &[Effect]) {
            self.frames += 1;
            self.effects += effects.len();
        }
    }

    /// Fires continuously, asks for the menu on a given frame
    struct Scripted {
        pause_on: u64,
    }

    impl InputSource for Scripted {
        fn poll(&mut self, state: &GameState) -> TickInput {
            TickInput {
                fire: true,
                pause: state.frame == self.pause_on,
                ..Default::default()
            }
        }
    }

    struct FixedMenu(MenuChoice, u32);

    impl PauseMenu for FixedMenu {
        fn show(&mut self, _state: &GameState) -> MenuChoice {
            self.1 += 1;
            self.0
        }
    }

    fn config(max_frames: u64) -> SessionConfig {
        SessionConfig {
            frame_pacing: Duration::ZERO,
            max_frames: Some(max_frames),
            fixed_dt: Some(1.0 / 60.0),
        }
    }

    #[test]
    fn test_session_stops_at_frame_limit() {
        let mut state = GameState::new(Settings::default(), 3).unwrap();
        let mut renderer = CountingRenderer::default();
        let mut menu = FixedMenu(MenuChoice::Resume, 0);
        let end = run_session(
            &mut state,
            &mut renderer,
            &mut Scripted { pause_on: 10 },
            &mut menu,
            config(120),
        )
        .unwrap();

        assert_eq!(end, SessionEnd::FrameLimit);
        assert_eq!(renderer.frames, 120);
        assert_eq!(menu.1, 1);
        // Muzzle flashes at least
        assert!(renderer.effects > 0);
        assert!(state.effects.pending().is_empty());
    }

    #[test]
    fn test_quit_from_menu() {
        let mut state = GameState::new(Settings::default(), 4).unwrap();
        let mut renderer = CountingRenderer::default();
        let end = run_session(
            &mut state,
            &mut renderer,
            &mut Scripted { pause_on: 5 },
            &mut FixedMenu(MenuChoice::Quit, 0),
            config(1000),
        )
        .unwrap();
        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(state.frame, 5);
    }

    #[test]
    fn test_game_over_ends_session() {
        let mut state = GameState::new(Settings::default(), 5).unwrap();
        state.player.reduce_hp(state.player.max_hp);
        let end = run_session(
            &mut state,
            &mut CountingRenderer::default(),
            &mut Scripted { pause_on: u64::MAX },
            &mut FixedMenu(MenuChoice::Resume, 0),
            config(1000),
        )
        .unwrap();
        assert_eq!(end, SessionEnd::GameOver);
    }
}
