use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, Write, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{Game, GameConfig, GameEvent};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionStats;
use crate::render::Renderer;

/// Redraw cadence, independent of the simulation tick
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub struct HumanMode {
    game: Game,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    show_grid: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self {
            game: Game::new(config),
            stats: SessionStats::new(Instant::now()),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            show_grid: false,
            should_quit: false,
        }
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

        info!(config = ?self.game.config(), "starting game");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.game.config().tick_interval());
        let mut render_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game(&mut stderr())?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    let now = Instant::now();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.game, &self.stats, now, self.show_grid);
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

        info!(
            games_played = self.stats.games_played,
            restarts = self.stats.restarts,
            high_score = self.stats.high_score,
            "quitting"
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        let action = self.input_handler.handle_key_event(key);
        if action == KeyAction::Quit {
            self.should_quit = true;
            return;
        }

        // Any other key leaves the game-over screen, then still counts as input
        if self.game.restart() {
            self.stats.restart_round(Instant::now());
        }

        match action {
            KeyAction::Steer(id, direction) => {
                if !self.game.set_direction(id, direction) {
                    debug!(?id, ?direction, "turn ignored");
                }
            }
            KeyAction::ToggleGrid => {
                self.show_grid = !self.show_grid;
            }
            KeyAction::Quit | KeyAction::None => {}
        }
    }

    fn update_game<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let outcome = self.game.tick();

        for event in &outcome.events {
            match event {
                GameEvent::Ate(_) | GameEvent::Collision(_) => self.play_sound(out)?,
                GameEvent::SecondSnakeSpawned => {}
            }
        }

        if let Some(final_score) = outcome.final_score {
            self.stats.end_round(final_score, Instant::now());
        }

        Ok(())
    }

    /// Stand-in for the eat and crash sounds
    fn play_sound<W: Write>(&self, out: &mut W) -> Result<()> {
        if !self.game.config().bell {
            return Ok(());
        }
        out.write_all(b"\x07").context("Failed to ring bell")?;
        out.flush().context("Failed to ring bell")?;
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
