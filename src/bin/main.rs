//! Terminal RSVP reader.
//!
//! Thin host around `veloread-core`: reads a plain-text file, drives the
//! engine's one-shot tick loop off the crossterm event-poll timeout, renders
//! one word at a time, and persists settings and per-document progress.

use std::{
    cell::Cell,
    fs,
    io,
    path::PathBuf,
    rc::Rc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::warn;
use veloread_core::{
    engine::RsvpEngine,
    observer::StateObserver,
    settings::{ProgressStore, ReaderSettings, SettingsStore},
    snapshot::StateSnapshot,
    timer::TickScheduler,
};

use progress_sync::ProgressSyncState;
use store::{ProgressFile, SettingsFile};
use term_ui::TerminalGuard;

#[path = "main/progress_sync.rs"]
mod progress_sync;
#[path = "main/store.rs"]
mod store;
#[path = "main/term_ui.rs"]
mod term_ui;

const SKIP_WORDS: usize = 10;
const WPM_STEP: u16 = 25;
const IDLE_POLL_MS: u64 = 250;
const PROGRESS_SAVE_INTERVAL_MS: u64 = 10_000;

#[derive(Debug, Parser)]
#[command(name = "veloread", about = "RSVP speed reader for the terminal")]
struct Args {
    /// UTF-8 text file to read.
    file: PathBuf,

    /// Words per minute for this session (overrides saved settings).
    #[arg(long)]
    wpm: Option<u16>,

    /// Disable the longer pause at sentence and clause punctuation.
    #[arg(long)]
    no_natural_reading: bool,

    /// Ignore saved progress and start at the first word.
    #[arg(long)]
    from_start: bool,
}

/// Deadline shared between the engine's scheduler port and the event loop.
///
/// The engine arms and cancels it; the loop turns the remaining time into the
/// `event::poll` timeout and delivers the tick once due.
#[derive(Clone, Debug, Default)]
struct DeadlineCell(Rc<Cell<Option<Instant>>>);

impl DeadlineCell {
    fn remaining(&self) -> Option<Duration> {
        self.0
            .get()
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Consume the deadline when it has passed.
    fn fire_if_due(&self) -> bool {
        match self.0.get() {
            Some(at) if Instant::now() >= at => {
                self.0.set(None);
                true
            }
            _ => false,
        }
    }
}

impl TickScheduler for DeadlineCell {
    fn schedule(&mut self, delay_ms: u64) {
        self.0
            .set(Some(Instant::now() + Duration::from_millis(delay_ms)));
    }

    fn cancel(&mut self) {
        self.0.set(None);
    }
}

/// Renders every snapshot and mirrors the position for the progress sync.
struct TermObserver {
    position: Rc<Cell<(usize, usize)>>,
    wpm: Rc<Cell<u16>>,
}

impl StateObserver for TermObserver {
    fn on_state_change(&mut self, snapshot: &StateSnapshot<'_>) {
        self.position
            .set((snapshot.current_index, snapshot.total_words));
        if let Err(err) = term_ui::draw(&mut io::stdout(), snapshot, self.wpm.get()) {
            warn!("draw failed: {err}");
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings_file = SettingsFile::open().context("locating settings file")?;
    let mut settings = match settings_file.load() {
        Ok(found) => found.unwrap_or_default(),
        Err(err) => {
            warn!("failed to load settings, using defaults: {err:#}");
            ReaderSettings::default()
        }
    };
    if let Some(wpm) = args.wpm {
        settings.wpm = wpm;
    }
    if args.no_natural_reading {
        settings.natural_reading_enabled = false;
    }

    let bytes =
        fs::read(&args.file).with_context(|| format!("reading {}", args.file.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let document_id = fs::canonicalize(&args.file)
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| args.file.display().to_string());

    let mut progress_file = ProgressFile::open().context("locating progress file")?;
    let saved_index = if args.from_start {
        None
    } else {
        match progress_file.load(&document_id) {
            Ok(found) => found.map(|p| p.current_word_index),
            Err(err) => {
                warn!("failed to load progress: {err:#}");
                None
            }
        }
    };

    let guard = TerminalGuard::enter().context("entering raw mode")?;

    let deadline = DeadlineCell::default();
    let position = Rc::new(Cell::new((0usize, 0usize)));
    let wpm_cell = Rc::new(Cell::new(settings.wpm));
    let observer = TermObserver {
        position: Rc::clone(&position),
        wpm: Rc::clone(&wpm_cell),
    };

    let mut engine = RsvpEngine::new(deadline.clone(), observer, settings);
    wpm_cell.set(engine.wpm());
    engine.load_content(&text);
    if let Some(index) = saved_index.filter(|&i| i > 0) {
        engine.jump_to(index);
    }

    let mut sync = ProgressSyncState::new(document_id.clone(), PROGRESS_SAVE_INTERVAL_MS);
    let run = run_loop(
        &mut engine,
        &deadline,
        &position,
        &wpm_cell,
        &mut sync,
        &mut progress_file,
    );

    sync.flush_now(&mut progress_file, position.get(), engine.wpm());
    settings = ReaderSettings {
        wpm: engine.wpm(),
        ..settings
    };
    if let Err(err) = settings_file.save(&settings) {
        warn!("failed to save settings: {err:#}");
    }
    engine.destroy();
    drop(guard);

    run
}

fn run_loop(
    engine: &mut RsvpEngine<DeadlineCell, TermObserver>,
    deadline: &DeadlineCell,
    position: &Rc<Cell<(usize, usize)>>,
    wpm_cell: &Rc<Cell<u16>>,
    sync: &mut ProgressSyncState,
    progress_file: &mut ProgressFile,
) -> Result<()> {
    loop {
        let idle = Duration::from_millis(IDLE_POLL_MS);
        let timeout = deadline.remaining().map_or(idle, |left| left.min(idle));

        if event::poll(timeout).context("polling terminal events")? {
            match event::read().context("reading terminal event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char(' ') => {
                        if engine.is_playing() {
                            engine.pause();
                        } else {
                            engine.play();
                        }
                    }
                    KeyCode::Left => engine.rewind(SKIP_WORDS),
                    KeyCode::Right => engine.skip(SKIP_WORDS),
                    KeyCode::Up => adjust_wpm(engine, wpm_cell, true)?,
                    KeyCode::Down => adjust_wpm(engine, wpm_cell, false)?,
                    KeyCode::Home => engine.stop(),
                    _ => {}
                },
                Event::Resize(..) => {
                    term_ui::draw(&mut io::stdout(), &engine.state(), wpm_cell.get())?;
                }
                _ => {}
            }
        }

        if deadline.fire_if_due() {
            engine.tick();
        }

        sync.track(position.get(), engine.wpm());
        sync.flush_if_due(progress_file);
    }

    Ok(())
}

/// Step the rate and redraw; `set_wpm` itself emits no snapshot.
fn adjust_wpm(
    engine: &mut RsvpEngine<DeadlineCell, TermObserver>,
    wpm_cell: &Rc<Cell<u16>>,
    increase: bool,
) -> Result<()> {
    let next = if increase {
        engine.wpm().saturating_add(WPM_STEP)
    } else {
        engine.wpm().saturating_sub(WPM_STEP)
    };
    engine.set_wpm(next);
    wpm_cell.set(engine.wpm());
    term_ui::draw(&mut io::stdout(), &engine.state(), engine.wpm())?;
    Ok(())
}
