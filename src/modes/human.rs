use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Interval, interval};
use tracing::info;

use crate::game::{GameConfig, GameEngine, schedule::ticker};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    /// Set up a game; a seed makes food, obstacle and power-up placement repeatable
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let engine = match seed {
            Some(seed) => GameEngine::seeded(config, seed),
            None => GameEngine::new(config),
        }
        .context("Failed to start game")?;

        Ok(Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            games_played = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "session ended"
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks at the level-dependent pace, re-armed when it changes
        let mut tick_period = self.engine.tick_interval();
        let mut tick_timer = ticker(tick_period);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                    retime(&mut tick_timer, &mut tick_period, self.engine.tick_interval());
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = self.engine.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => self.engine.set_direction(direction),
                KeyAction::TogglePause => self.toggle_pause(),
                KeyAction::Restart => self.reset_game()?,
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self) {
        let result = self.engine.tick();

        // Track game over
        if result.advanced && result.terminated {
            self.metrics
                .on_game_over(self.engine.score(), self.engine.level());
        }
    }

    fn toggle_pause(&mut self) {
        self.engine.toggle_pause();
        if !self.engine.is_game_over() {
            self.metrics.on_pause_changed(self.engine.is_paused());
        }
    }

    fn reset_game(&mut self) -> Result<()> {
        self.engine.reset().context("Failed to restart game")?;
        self.metrics.on_game_start();
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Swap in a fresh ticker when the engine asks for a different pace
fn retime(timer: &mut Interval, current: &mut Duration, wanted: Duration) {
    if *current != wanted {
        *current = wanted;
        *timer = ticker(wanted);
        // A fresh interval fires immediately; wait a full period instead
        timer.reset();
    }
}
