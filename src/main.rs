mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use galaga_clone::config::{self, GameConfig};
use galaga_clone::input::Key;
use galaga_clone::scores::ScoreStore;
use galaga_clone::session::Session;

#[derive(Parser, Debug)]
#[command(name = "galaga_clone")]
#[command(about = "Shoot down falling asteroids before they reach your ship")]
struct Args {
    /// Logical playfield width (scaled to the terminal)
    #[arg(long, default_value_t = config::resolution::WIDTH)]
    width: f32,

    /// Logical playfield height (scaled to the terminal)
    #[arg(long, default_value_t = config::resolution::HEIGHT)]
    height: f32,

    /// Target frames per second
    #[arg(long, default_value_t = config::timing::DEFAULT_FPS)]
    fps: u32,

    /// High-score file (JSON list of integers)
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Seed for obstacle placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (filtered by RUST_LOG); logging is off otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> GameConfig {
        let defaults = GameConfig::default();
        GameConfig {
            width: self.width,
            height: self.height,
            scores_path: self.scores.unwrap_or_else(config::default_scores_path),
            seed: self.seed,
            log_file: self.log_file,
            ..defaults
        }
        .with_fps(self.fps)
    }
}

/// The terminal is owned by the game, so logs can only go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Char(c) => Some(Key::letter(c)),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drain input, advance one frame, redraw if needed, sleep out the frame.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events; held keys expire after the
///   tracker's hold window (`GameConfig::release_events` is false).
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: GameConfig) -> Result<()> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let store = ScoreStore::new(config.scores_path.clone());
    let frame = config.frame;
    let mut session = Session::new(config, store, rng);

    let start = Instant::now();
    let (mut cols, mut rows) = terminal::size()?;

    while !session.should_quit() {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code: KeyCode::Char('c'), modifiers, .. })
                    if modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    session.quit();
                }
                Event::Key(KeyEvent { code, kind, .. }) => {
                    let Some(key) = map_key(code) else { continue };
                    match kind {
                        KeyEventKind::Press => session.key_down(key),
                        KeyEventKind::Repeat => session.key_repeat(key),
                        KeyEventKind::Release => session.key_up(key),
                    }
                }
                Event::Resize(c, r) => {
                    cols = c;
                    rows = r;
                    session.invalidate();
                }
                _ => {}
            }
        }
        if session.should_quit() {
            break;
        }

        session.frame(start.elapsed().as_millis() as u64);

        if session.take_redraw() {
            display::render(out, &session, cols, rows)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let mut config = Args::parse().into_config();
    if let Some(path) = &config.log_file {
        init_logging(path)?;
    }
    tracing::info!(scores = %config.scores_path.display(), "starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("cannot switch terminal to raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    config.release_events = keyboard_enhanced;
    tracing::info!(keyboard_enhanced, "terminal input mode");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!(error = %e, "exiting after error");
    }
    result
}
