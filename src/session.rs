/// One running game session: the current screen, the game state, held keys,
/// the obstacle spawn timer and the persisted leaderboard.
///
/// The binary feeds it key events and one `frame` call per display frame, then
/// asks whether anything needs redrawing.
use rand::Rng;

use crate::compute::{init_state, reset_game, spawn_obstacle, tick};
use crate::config::timing::SPAWN_INTERVAL_MS;
use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus};
use crate::input::{InputTracker, Key};
use crate::scores::{HighScores, ScoreStore};
use crate::screen::{dispatch, Command, Screen};

// ── Spawn timer ───────────────────────────────────────────────────────────────

/// Fixed-interval timer.  `advance` returns how many intervals elapsed, so a
/// long frame never silently drops a spawn.
#[derive(Clone, Debug)]
pub struct SpawnTimer {
    interval_ms: u64,
    elapsed_ms: u64,
}

impl SpawnTimer {
    pub fn new(interval_ms: u64) -> Self {
        Self { interval_ms: interval_ms.max(1), elapsed_ms: 0 }
    }

    pub fn advance(&mut self, dt_ms: u64) -> u64 {
        self.elapsed_ms += dt_ms;
        let due = self.elapsed_ms / self.interval_ms;
        self.elapsed_ms %= self.interval_ms;
        due
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

pub struct Session<R: Rng> {
    config: GameConfig,
    screen: Screen,
    state: GameState,
    input: InputTracker,
    spawner: SpawnTimer,
    store: ScoreStore,
    high_scores: HighScores,
    rng: R,
    last_frame_ms: Option<u64>,
    dirty: bool,
    quit: bool,
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, store: ScoreStore, rng: R) -> Self {
        let high_scores = store.load();
        Self {
            state: init_state(config.width, config.height),
            input: InputTracker::new(config.release_events),
            config,
            screen: Screen::Menu,
            spawner: SpawnTimer::new(SPAWN_INTERVAL_MS),
            store,
            high_scores,
            rng,
            last_frame_ms: None,
            dirty: true,
            quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Force a full redraw on the next frame (e.g. after a terminal resize).
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// True when the current screen must be drawn.  Playing redraws every
    /// frame; the static screens only once after they change.
    pub fn take_redraw(&mut self) -> bool {
        let redraw = self.dirty || self.screen == Screen::Playing;
        self.dirty = false;
        redraw
    }

    // ── Input ────────────────────────────────────────────────────────────────

    pub fn key_down(&mut self, key: Key) {
        self.input.key_down(key, self.clock_ms());
        let command = dispatch(self.screen, key);
        self.apply(command);
    }

    /// Auto-repeat only refreshes the held state; it never re-triggers commands.
    pub fn key_repeat(&mut self, key: Key) {
        self.input.key_down(key, self.clock_ms());
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Key events arrive between frames; they are stamped with the last
    /// frame's timestamp.
    fn clock_ms(&self) -> u64 {
        self.last_frame_ms.unwrap_or(0)
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::None => {}
            Command::StartGame => self.start_game(),
            Command::ShowLeaderboard => {
                self.high_scores = self.store.load();
                self.enter(Screen::Leaderboard);
            }
            Command::ShowMenu => self.enter(Screen::Menu),
            Command::Quit => self.quit = true,
        }
    }

    fn enter(&mut self, screen: Screen) {
        tracing::info!(from = ?self.screen, to = ?screen, "screen transition");
        self.screen = screen;
        self.dirty = true;
    }

    fn start_game(&mut self) {
        self.state = reset_game(&self.state);
        self.spawner.reset();
        self.enter(Screen::Playing);
    }

    // ── Frame loop ───────────────────────────────────────────────────────────

    /// Advance one display frame.  `now_ms` is a monotonic timestamp; it drives
    /// both the spawn timer and the shot cooldown.
    pub fn frame(&mut self, now_ms: u64) {
        let dt = self.last_frame_ms.map_or(0, |last| now_ms.saturating_sub(last));
        self.last_frame_ms = Some(now_ms);

        if self.screen != Screen::Playing {
            return;
        }

        for _ in 0..self.spawner.advance(dt) {
            self.state = spawn_obstacle(&self.state, &mut self.rng);
        }

        let controls = self.input.controls(now_ms);
        self.state = tick(&self.state, &controls, now_ms);

        if self.state.status == GameStatus::GameOver {
            self.finish_game();
        }
    }

    fn finish_game(&mut self) {
        let score = self.state.score;
        tracing::info!(score, frames = self.state.frame, "game over");
        self.input.clear();
        self.enter(Screen::GameOver);

        if score == 0 {
            return;
        }
        let mut scores = self.store.load();
        if let Some(rank) = scores.record(score, self.config.leaderboard_capacity) {
            tracing::info!(score, rank, "new leaderboard entry");
            if let Err(e) = self.store.save(&scores) {
                tracing::error!(path = %self.store.path().display(), error = %e, "failed to save high scores");
            }
        }
        self.high_scores = scores;
    }
}
