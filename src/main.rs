pub mod app_dirs;
pub mod runtime;
pub mod scramble;
pub mod session;
pub mod stats;
pub mod store;
pub mod time_log;
pub mod ui;
pub mod util;

use crate::{
    runtime::{start_ticks, AppEvent, Clock, CrosstermEventSource, EventSource, SystemClock},
    session::{Session, TimerState, Transition},
    store::{FileTimeStore, MemoryStore, TimeStore},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{
        KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, terminal,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    sync::mpsc::{RecvTimeoutError, Sender},
    time::{Duration, Instant},
};

/// Cadence of the elapsed-time display refresh while a solve is running.
/// Display only; recorded durations are computed at the stop instant.
const TICK_RATE_MS: u64 = 10;

/// How long the event loop waits before re-checking for shutdown.
const IDLE_POLL_MS: u64 = 250;

/// minimal speed-cubing timer tui with fair scrambles and rolling averages
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal speed-cubing timer: hold and release space to time solves, get a fresh scramble every solve, and track Ao5/Ao12/Ao50/Ao100 plus best and session averages."
)]
pub struct Cli {
    /// start with an empty session and skip persistence entirely
    #[clap(long)]
    fresh: bool,

    /// override the time-log file location
    #[clap(long, value_name = "FILE")]
    store: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Timer,
    ConfirmClear,
}

/// What the event loop should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
    StartTicks,
    StopTicks,
}

pub struct App {
    pub session: Session,
    pub state: AppState,
    /// Offset from the most recent time in the newest-first list (0 = latest).
    pub selected: usize,
    store: Box<dyn TimeStore>,
    /// Whether key-release events arrive (kitty keyboard protocol). Without
    /// them, a synthetic release follows every space press so the gesture
    /// degrades to tap-to-start / tap-to-stop.
    pub release_events: bool,
    journal: bool,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        let store: Box<dyn TimeStore> = if cli.fresh {
            Box::new(MemoryStore::default())
        } else if let Some(path) = &cli.store {
            Box::new(FileTimeStore::with_path(path))
        } else {
            Box::new(FileTimeStore::new())
        };

        let log = store.load();

        Self {
            session: Session::new(log),
            state: AppState::Timer,
            selected: 0,
            store,
            release_events: true,
            journal: !cli.fresh,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Control {
        if key.kind == KeyEventKind::Press
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && key.code == KeyCode::Char('c')
        {
            return Control::Quit;
        }

        match self.state {
            AppState::ConfirmClear => self.handle_confirm_key(key),
            AppState::Timer => self.handle_timer_key(key, now),
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Control {
        if key.kind != KeyEventKind::Press {
            return Control::Continue;
        }

        match key.code {
            KeyCode::Char('y') => {
                self.clear_all();
                self.state = AppState::Timer;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.state = AppState::Timer;
            }
            _ => {}
        }

        Control::Continue
    }

    fn handle_timer_key(&mut self, key: KeyEvent, now: Instant) -> Control {
        if key.code == KeyCode::Char(' ') {
            return self.handle_space(key.kind, now);
        }

        // everything else only acts between solves, on the press edge
        if key.kind != KeyEventKind::Press || self.session.state() != TimerState::Idle {
            return Control::Continue;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Control::Quit,
            KeyCode::Char('n') => self.session.new_scramble(),
            KeyCode::Char('c') => {
                if !self.session.log.is_empty() {
                    self.state = AppState::ConfirmClear;
                }
            }
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.session.log.len() {
                    self.selected += 1;
                }
            }
            _ => {}
        }

        Control::Continue
    }

    fn handle_space(&mut self, kind: KeyEventKind, now: Instant) -> Control {
        match kind {
            KeyEventKind::Press => {
                let scramble_in_play = match self.session.state() {
                    TimerState::Running => Some(self.session.scramble.clone()),
                    _ => None,
                };

                let mut control = match self.session.on_hold_start(now) {
                    Transition::Completed(ms) => {
                        self.record_solve(ms, scramble_in_play);
                        Control::StopTicks
                    }
                    _ => Control::Continue,
                };

                if !self.release_events && self.session.on_hold_end(now) == Transition::Started {
                    control = Control::StartTicks;
                }

                control
            }
            KeyEventKind::Release => match self.session.on_hold_end(now) {
                Transition::Started => Control::StartTicks,
                _ => Control::Continue,
            },
            // terminal auto-repeat while the key is held down
            KeyEventKind::Repeat => Control::Continue,
        }
    }

    fn record_solve(&mut self, duration_ms: u64, scramble: Option<scramble::ScrambleSequence>) {
        self.selected = 0;
        self.persist();
        if self.journal {
            if let Some(scramble) = scramble {
                store::journal_solve(duration_ms, &scramble);
            }
        }
    }

    pub fn delete_selected(&mut self) {
        let len = self.session.log.len();
        if len == 0 {
            return;
        }

        // selection counts backwards from the newest entry
        let index = len - 1 - self.selected.min(len - 1);
        if self.session.log.delete_at(index).is_ok() {
            let remaining = self.session.log.len();
            if remaining == 0 {
                self.selected = 0;
            } else if self.selected >= remaining {
                self.selected = remaining - 1;
            }
            self.persist();
        }
    }

    pub fn clear_all(&mut self) {
        self.session.log.clear();
        self.selected = 0;
        let _ = self.store.wipe();
    }

    fn persist(&self) {
        let _ = self.store.save(&self.session.log);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // key-release events need the kitty keyboard protocol
    let release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = CrosstermEventSource::new();
    let tick_tx = events.sender();

    let mut app = App::new(cli);
    app.release_events = release_events;

    let result = start_tui(&mut terminal, &mut app, &events, tick_tx, &SystemClock);

    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &E,
    tick_tx: Sender<AppEvent>,
    clock: &C,
) -> Result<(), Box<dyn Error>> {
    let mut tick_handle = None;

    terminal.draw(|f| ui(app, f))?;

    loop {
        let event = match events.recv_timeout(Duration::from_millis(IDLE_POLL_MS)) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        match event {
            AppEvent::Tick => {
                if app.session.on_tick(clock.now()) {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            AppEvent::Key(key) => {
                match app.handle_key(key, clock.now()) {
                    Control::Quit => break,
                    Control::StartTicks => {
                        tick_handle = Some(start_ticks(
                            tick_tx.clone(),
                            Duration::from_millis(TICK_RATE_MS),
                        ));
                    }
                    Control::StopTicks => {
                        if let Some(handle) = tick_handle.take() {
                            handle.cancel();
                        }
                    }
                    Control::Continue => {}
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    if let Some(handle) = tick_handle.take() {
        handle.cancel();
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}
