//! Dashboard state and key handling

use crate::event::{Event, EventHandler};
use crate::theme::Theme;
use crate::{ui, Handoff};
use boxdeck_config::UiConfig;
use boxdeck_core::{
    runner, ActionGate, Deferred, Inventory, LifecycleController, ProcessFinished, ProcessSpec,
    RefreshDecision, Session,
};
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::Constraint;
use ratatui::widgets::TableState;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Core error: {0}")]
    Core(#[from] boxdeck_core::CoreError),
}

pub type AppResult<T> = Result<T, AppError>;

/// Session attribute shown in a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    Status,
    Image,
}

impl Field {
    pub fn value(self, session: &Session) -> &str {
        match self {
            Field::Id => session.id(),
            Field::Name => session.name(),
            Field::Status => session.status(),
            Field::Image => session.image(),
        }
    }
}

/// One table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub field: Field,
    pub width: Constraint,
}

impl Column {
    pub const fn new(title: &'static str, field: Field, width: Constraint) -> Self {
        Self { title, field, width }
    }
}

/// How the status line is colored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Outcome of the last action or refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

/// Presentation settings handed to the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub columns: Vec<Column>,
    pub theme: Theme,
    /// Rows per page, at least 1
    pub page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            columns: vec![
                Column::new("ID", Field::Id, Constraint::Length(15)),
                Column::new("Name", Field::Name, Constraint::Length(30)),
                Column::new("Status", Field::Status, Constraint::Length(30)),
                Column::new("Image", Field::Image, Constraint::Min(0)),
            ],
            theme: Theme::default(),
            page_size: 5,
        }
    }
}

impl ViewConfig {
    pub fn from_config(config: &UiConfig) -> Self {
        Self {
            theme: Theme::from_name(config.theme),
            page_size: config.page_size.max(1),
            ..Self::default()
        }
    }
}

/// Application state
pub struct App {
    inventory: Inventory,
    controller: LifecycleController,
    pub view: ViewConfig,
    /// Current snapshot, sorted by name
    pub sessions: Vec<Session>,
    /// Index into `sessions` of the highlighted row
    pub selected: usize,
    /// Table state for the visible page
    pub table_state: TableState,
    pub gate: ActionGate,
    pub status: Option<StatusMessage>,
    /// Time of the last successful inventory pass
    pub last_refreshed: Option<DateTime<Local>>,
    pub show_help: bool,
    pub should_quit: bool,
    finished_tx: mpsc::UnboundedSender<ProcessFinished>,
    finished_rx: mpsc::UnboundedReceiver<ProcessFinished>,
}

impl App {
    /// Create an application with an empty snapshot
    pub fn new(inventory: Inventory, controller: LifecycleController, mut view: ViewConfig) -> Self {
        view.page_size = view.page_size.max(1);
        let (finished_tx, finished_rx) = mpsc::unbounded_channel();
        Self {
            inventory,
            controller,
            view,
            sessions: Vec::new(),
            selected: 0,
            table_state: TableState::default(),
            gate: ActionGate::new(),
            status: None,
            last_refreshed: None,
            show_help: false,
            should_quit: false,
            finished_tx,
            finished_rx,
        }
    }

    /// Run the application main loop
    pub async fn run(&mut self, tui: &mut crate::Tui) -> AppResult<()> {
        let mut events = EventHandler::new(Duration::from_millis(250));
        self.refresh().await;

        while !self.should_quit {
            tui.terminal.draw(|frame| ui::draw(frame, self))?;

            tokio::select! {
                event = events.next() => {
                    match event {
                        Some(Event::Key(key)) => {
                            let deferred = self.send_key(key.code, key.modifiers);
                            self.execute(deferred, tui, &mut events).await?;
                        }
                        // redraw only
                        Some(Event::Tick) | Some(Event::Resize(_, _)) => {}
                        None => break,
                    }
                }
                finished = self.finished_rx.recv() => {
                    if let Some(finished) = finished {
                        self.on_process_finished(finished).await;
                    }
                }
            }
        }

        Ok(())
    }

    /// Carry out the work a key press asked for
    async fn execute(
        &mut self,
        deferred: Deferred,
        tui: &mut crate::Tui,
        events: &mut EventHandler,
    ) -> AppResult<()> {
        match deferred {
            Deferred::Continue => {}
            Deferred::Refresh => self.request_refresh().await,
            Deferred::RunDetached(spec) => self.start_detached(spec),
            Deferred::SuspendForProcess(spec) => {
                let paused = events.pause().await;
                let result = self.run_foreground(spec, tui).await;
                drop(paused);
                result?;
            }
        }
        Ok(())
    }

    /// Hand the terminal to a foreground process and take it back once the
    /// process exits. The completion is recorded (and the gate released)
    /// even when the terminal could not be suspended or restored.
    pub async fn run_foreground(&mut self, spec: ProcessSpec, term: &mut impl Handoff) -> AppResult<()> {
        if !self.begin_action(&spec) {
            return Ok(());
        }
        let finished = match term.suspend() {
            Ok(()) => runner::run(&spec).await,
            Err(e) => ProcessFinished::failure(&spec, e.to_string()),
        };
        let restored = term.resume();
        self.on_process_finished(finished).await;
        restored
    }

    /// Map a key press to the work it requests. Navigation is applied
    /// immediately; anything else is returned for the event loop to run.
    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Deferred {
        if self.show_help {
            self.show_help = false;
            return Deferred::Continue;
        }

        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                Deferred::Continue
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                Deferred::Continue
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                Deferred::Continue
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_next();
                Deferred::Continue
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_previous();
                Deferred::Continue
            }
            KeyCode::Right => {
                self.next_page();
                Deferred::Continue
            }
            KeyCode::Left => {
                self.previous_page();
                Deferred::Continue
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.select(0);
                Deferred::Continue
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.select(self.sessions.len().saturating_sub(1));
                Deferred::Continue
            }
            KeyCode::Char('R') | KeyCode::F(5) => self.controller.refresh(),
            KeyCode::Enter => self.on_selected(|ctl, name| ctl.enter(name)),
            KeyCode::Char('S') => self.on_selected(|ctl, name| ctl.stop(name)),
            KeyCode::Char('X') | KeyCode::Delete => self.on_selected(|ctl, name| ctl.remove(name)),
            _ => Deferred::Continue,
        }
    }

    fn on_selected(&self, action: impl Fn(&LifecycleController, &str) -> Deferred) -> Deferred {
        match self.selected_session() {
            Some(session) => action(&self.controller, session.name()),
            None => Deferred::Continue,
        }
    }

    /// Register an action with the gate; false when refused
    pub fn begin_action(&mut self, spec: &ProcessSpec) -> bool {
        match self.gate.begin(spec) {
            Ok(()) => {
                self.set_status(
                    Severity::Info,
                    format!("{} {}...", spec.verb.progressive(), spec.session),
                );
                true
            }
            Err(e) => {
                self.set_status(Severity::Error, e.to_string());
                false
            }
        }
    }

    /// Start a background action
    pub fn start_detached(&mut self, spec: ProcessSpec) {
        if self.begin_action(&spec) {
            runner::spawn_detached(spec, self.finished_tx.clone());
        }
    }

    /// Record a completed action and refresh once nothing is in flight
    pub async fn on_process_finished(&mut self, finished: ProcessFinished) {
        match &finished.error {
            None => self.set_status(
                Severity::Info,
                format!("{} {}: done", finished.verb, finished.session),
            ),
            Some(e) => self.set_status(
                Severity::Error,
                format!("{} {} failed: {}", finished.verb, finished.session, e),
            ),
        }
        if self.gate.finish(&finished) {
            self.refresh().await;
        }
    }

    /// Refresh now, or once outstanding actions complete
    pub async fn request_refresh(&mut self) {
        match self.gate.request_refresh() {
            RefreshDecision::Now => self.refresh().await,
            RefreshDecision::Deferred => {
                tracing::debug!("Refresh held until {} action(s) finish", self.gate.in_flight());
            }
        }
    }

    /// Replace the snapshot from the inventory. On failure the previous
    /// snapshot stays and the error goes to the status line.
    pub async fn refresh(&mut self) {
        match self.inventory.snapshot().await {
            Ok(sessions) => self.set_sessions(sessions),
            Err(e) => {
                tracing::warn!("Refresh failed: {}", e);
                self.set_status(Severity::Error, format!("Refresh failed: {}", e));
            }
        }
    }

    /// Install a new snapshot and clamp the selection
    pub fn set_sessions(&mut self, mut sessions: Vec<Session>) {
        sessions.sort_by(|a, b| a.name().cmp(b.name()));
        self.sessions = sessions;
        self.last_refreshed = Some(Local::now());
        self.select(self.selected.min(self.sessions.len().saturating_sub(1)));
    }

    fn set_status(&mut self, severity: Severity, text: String) {
        self.status = Some(StatusMessage { text, severity });
    }

    /// Text of the status line, if any
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    pub fn selected_session(&self) -> Option<&Session> {
        self.sessions.get(self.selected)
    }

    /// Rows per page, never zero
    fn page_size(&self) -> usize {
        self.view.page_size.max(1)
    }

    /// Zero-based page of the selection
    pub fn page(&self) -> usize {
        self.selected / self.page_size()
    }

    /// Number of pages, at least 1
    pub fn pages(&self) -> usize {
        self.sessions.len().div_ceil(self.page_size()).max(1)
    }

    /// Sessions on the current page
    pub fn page_sessions(&self) -> &[Session] {
        let start = (self.page() * self.page_size()).min(self.sessions.len());
        let end = (start + self.page_size()).min(self.sessions.len());
        &self.sessions[start..end]
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        if self.sessions.is_empty() {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(index % self.page_size()));
        }
    }

    fn select_next(&mut self) {
        if !self.sessions.is_empty() {
            self.select((self.selected + 1) % self.sessions.len());
        }
    }

    fn select_previous(&mut self) {
        if !self.sessions.is_empty() {
            let len = self.sessions.len();
            self.select((self.selected + len - 1) % len);
        }
    }

    fn next_page(&mut self) {
        if self.page() + 1 < self.pages() {
            self.select((self.page() + 1) * self.page_size());
        }
    }

    fn previous_page(&mut self) {
        if self.page() > 0 {
            self.select((self.page() - 1) * self.page_size());
        }
    }
}
