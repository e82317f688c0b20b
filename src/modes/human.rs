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
use tokio::time::{Instant, interval, sleep_until};
use tracing::{debug, info};

use crate::game::{
    Action, Controls, Direction, GameConfig, GameSession, GameVariant, SessionEvent, SessionState,
    TICK_INTERVAL,
};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// What the terminal is currently showing
enum Screen {
    Menu { selected: usize },
    Game(GameSession),
}

/// Interactive play: menu, live session and game-over panel in one terminal
pub struct HumanMode {
    config: GameConfig,
    screen: Screen,
    /// When the session wants its next tick; `None` cancels the schedule
    next_tick: Option<Instant>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    /// Open on the menu, or go straight into `variant` when one is given
    pub fn new(config: GameConfig, variant: Option<GameVariant>) -> Result<Self> {
        let mut mode = Self {
            config,
            screen: Screen::Menu { selected: 0 },
            next_tick: None,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        };
        if let Some(variant) = variant {
            mode.start_game(variant)?;
        }
        Ok(mode)
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

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            let next_tick = self.next_tick;

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Session clock; idle while nothing is scheduled
                _ = async {
                    match next_tick {
                        Some(deadline) => sleep_until(deadline).await,
                        None => std::future::pending::<()>().await,
                    }
                } => {
                    self.on_tick()?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| match &self.screen {
                        Screen::Menu { selected } => {
                            self.renderer.render_menu(frame, *selected, &self.metrics);
                        }
                        Screen::Game(session) => {
                            self.renderer.render_session(
                                frame,
                                &session.snapshot(),
                                session.results().ok(),
                                &self.metrics,
                            );
                        }
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

            let action = self.input_handler.handle_key_event(key);
            self.apply(action)?;
        }

        Ok(())
    }

    fn apply(&mut self, action: KeyAction) -> Result<()> {
        if action == KeyAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        match &mut self.screen {
            Screen::Menu { selected } => match action {
                KeyAction::GameAction(Action::Steer(Controls::Arrows, direction)) => {
                    *selected = menu_move(*selected, direction);
                }
                KeyAction::Choose(index) => {
                    if let Some(variant) = GameVariant::ALL.get(index).copied() {
                        self.start_game(variant)?;
                    }
                }
                KeyAction::Confirm => {
                    let variant = GameVariant::ALL[*selected];
                    self.start_game(variant)?;
                }
                _ => {}
            },
            Screen::Game(session) => match action {
                KeyAction::GameAction(Action::Steer(controls, direction)) => {
                    session.steer(controls, direction)?;
                }
                KeyAction::GameAction(Action::Pause) => session.pause(),
                KeyAction::GameAction(Action::Restart) if session.state() == SessionState::Ended => {
                    session.reset().context("Failed to reset session")?;
                    self.metrics.on_game_start();
                    self.schedule(TICK_INTERVAL);
                }
                KeyAction::GameAction(Action::Menu) if session.state() == SessionState::Ended => {
                    session
                        .return_to_menu()
                        .context("Failed to close session")?;
                    let selected = GameVariant::ALL
                        .iter()
                        .position(|variant| variant.kind == session.variant().kind)
                        .unwrap_or(0);
                    self.next_tick = None;
                    self.screen = Screen::Menu { selected };
                }
                _ => {}
            },
        }

        Ok(())
    }

    fn on_tick(&mut self) -> Result<()> {
        let Screen::Game(session) = &mut self.screen else {
            self.next_tick = None;
            return Ok(());
        };

        let report = session.tick().context("Session tick failed")?;
        for event in &report.events {
            debug!(?event, "session event");
            if let SessionEvent::RoundOver { results } = event {
                info!(?results, "round over");
                self.metrics
                    .on_game_over(session.variant().kind, session.headline_score());
            }
        }

        match report.next_tick {
            Some(delay) => self.schedule(delay),
            None => self.next_tick = None,
        }

        Ok(())
    }

    fn start_game(&mut self, variant: GameVariant) -> Result<()> {
        let session = GameSession::start(variant, self.config.clone())
            .with_context(|| format!("Failed to start {}", variant.title))?;
        self.screen = Screen::Game(session);
        self.metrics.on_game_start();
        self.schedule(TICK_INTERVAL);
        Ok(())
    }

    fn schedule(&mut self, delay: Duration) {
        self.next_tick = Some(Instant::now() + delay);
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

/// Menu is two columns of two; arrows walk it like a grid
fn menu_move(selected: usize, direction: Direction) -> usize {
    let (column, row) = (selected / 2, selected % 2);
    let (column, row) = match direction {
        Direction::Up => (column, row.saturating_sub(1)),
        Direction::Down => (column, (row + 1).min(1)),
        Direction::Left => (column.saturating_sub(1), row),
        Direction::Right => ((column + 1).min(1), row),
    };
    column * 2 + row
}
