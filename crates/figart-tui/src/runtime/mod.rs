//! Event loop and effect execution.
//!
//! `update` decides, this module acts: it polls the terminal, drains task results from
//! the inbox channel, feeds both to the reducer and carries out the returned effects.
//! A frame is drawn only on `Tick`.

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use figart_core::config::Config;
use figart_core::fonts::FontStore;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::common::{Clipboard, TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Prefill};
use crate::{render, terminal, update};

/// Target frame rate while something is changing (60fps = ~16ms per frame).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle (no render running, no pending flash).
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Owns the terminal, the app state and the inbox. Restores the terminal on drop.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    store: Arc<FontStore>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    /// Input in the last `IDLE_POLL_DURATION` keeps the fast tick.
    last_terminal_event: Instant,
}

impl TuiRuntime {
    pub fn new(config: &Config, prefill: &Prefill, store: Arc<FontStore>) -> Result<Self> {
        // The hook must be in place before the alternate screen is entered.
        terminal::install_panic_hook();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let state = AppState::new(config, prefill);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            store,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs until the user quits.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let effects = update::initial_effects(&mut self.state);
        self.execute_effects(effects);
        let result = self.event_loop();

        let _ = terminal::disable_input_features();

        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let events = self.collect_events()?;

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }

                // Only Tick triggers render; other events batch until the next Tick.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }

                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty && !self.state.tui.should_quit {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling while a render is in flight, the copy label is flashing,
        // or the user is interacting.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tui.tasks.is_any_running()
            || self.state.tui.copy.is_flashing()
            || recent_terminal_activity;

        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Announces `id` with `TaskStarted`, runs `f`, and reports its event wrapped in
    /// `TaskCompleted`.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, cancelable: bool, f: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = cancelable.then(CancellationToken::new);
        let started = TaskStarted {
            id,
            cancel: cancel.clone(),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let inner = f(cancel).await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::RenderBanner { task, request } => {
                let Some(task) = task else {
                    return;
                };
                let store = Arc::clone(&self.store);
                let settings = self.state.tui.settings.clone();
                self.spawn_task(TaskKind::Render, task, true, move |cancel| {
                    handlers::render_banner(store, request, settings, cancel)
                });
            }
            UiEffect::CancelTask { token, .. } => {
                if let Some(cancel) = token {
                    cancel.cancel();
                }
            }
            UiEffect::CopyToClipboard { target, text } => {
                // The label flashes either way.
                if let Err(err) = Clipboard::copy(&text) {
                    tracing::debug!(?target, error = %err, "clipboard copy failed");
                }
            }
            UiEffect::PersistTheme { theme } => {
                if let Err(err) = Config::save_theme(theme) {
                    tracing::warn!(theme = theme.as_str(), error = %err, "failed to save theme");
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
