use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::config::{Config, Settings};
use crate::game::{Game, Side};
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::surface::RasterSurface;
use crate::timestep::{FixedTimestep, FrameReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
}

/// The terminal host: owns the game and drives it once per frame
pub struct App {
    running: bool,
    game_state: GameState,
    game: Game,
    timestep: FixedTimestep,
    surface: RasterSurface,
    settings: Settings,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    last_report: FrameReport,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, settings: Settings, reports_releases: bool) -> Self {
        let surface = RasterSurface::new(config.width as u32, config.height as u32);
        let timestep = FixedTimestep::new(config.step);

        Self {
            running: true,
            game_state: GameState::Playing,
            game: Game::new(config),
            timestep,
            surface,
            settings,
            last_frame_time: Instant::now(),
            fps: 0,
            last_report: FrameReport {
                updates: 0,
                fraction: 0.0,
            },
            input_manager: InputManager::new(reports_releases),
            renderer: GameRenderer::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        info!("entering frame loop");

        while self.running {
            // Input only flips flags, read by the next update
            self.input_manager.poll_events(&self.game_state)?;
            let actions = self.input_manager.drain_actions();
            let now = Instant::now();
            self.process_actions(&actions, now);

            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            self.frame(now);

            terminal.draw(|frame| {
                let view = RenderView {
                    game_state: self.game_state,
                    surface: &self.surface,
                    player_score: self.game.score(Side::Player),
                    opponent_score: self.game.score(Side::Opponent),
                    fps: self.fps,
                    updates: self.last_report.updates,
                    area: frame.area(),
                };
                self.renderer.render(frame, &view);
            })?;

            std::thread::sleep(self.settings.frame_interval);
        }

        info!(
            player = self.game.score(Side::Player),
            opponent = self.game.score(Side::Opponent),
            "leaving frame loop"
        );
        Ok(())
    }

    /// Process input actions and update game state accordingly. `now` is the
    /// instant a resume restarts the clock from.
    pub fn process_actions(&mut self, actions: &[InputAction], now: Instant) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Pause => {
                    debug!("paused");
                    self.game_state = GameState::Paused;
                }
                InputAction::Resume => {
                    debug!("resumed");
                    self.game_state = GameState::Playing;
                    self.timestep.resync(now);
                }
                InputAction::Press(control) => {
                    self.game.set_control(*control, true);
                }
                InputAction::Release(control) => {
                    self.game.set_control(*control, false);
                }
            }
        }
    }

    /// Advances the simulation to `now` and renders it onto the raster.
    /// While paused the last frame is redrawn as it was.
    pub fn frame(&mut self, now: Instant) -> FrameReport {
        if self.game_state == GameState::Playing {
            let game = &mut self.game;
            let report = self.timestep.frame(now, || {
                game.update();
            });

            trace!(
                updates = report.updates,
                fraction = report.fraction,
                "frame"
            );
            if report.updates > self.settings.burst_warning {
                warn!(updates = report.updates, "catch-up burst");
            }
            self.last_report = report;
        }

        self.game.render(&mut self.surface, self.last_report.fraction);
        self.last_report
    }
}
