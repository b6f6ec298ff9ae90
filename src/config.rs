/// Gameplay constants and the runtime settings built from the command line.
use std::path::PathBuf;
use std::time::Duration;

/// Default logical playfield size, in "pixels".
pub mod resolution {
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;
}

pub mod player {
    pub const WIDTH: f32 = 50.0;
    pub const HEIGHT: f32 = 50.0;
    /// Distance between the player's top edge and the bottom of the playfield.
    pub const BOTTOM_OFFSET: f32 = 60.0;
    /// Horizontal step per tick while an arrow key is held.
    pub const SPEED: f32 = 3.5;
    pub const STARTING_LIVES: u32 = 3;
}

pub mod bullet {
    pub const WIDTH: f32 = 4.0;
    pub const HEIGHT: f32 = 20.0;
    /// Upward step per tick.
    pub const SPEED: f32 = 5.0;
}

pub mod obstacle {
    pub const WIDTH: f32 = 50.0;
    pub const HEIGHT: f32 = 50.0;
    pub const MIN_SPEED: f32 = 1.0;
    pub const MAX_SPEED: f32 = 4.0; // exclusive
    pub const MAX_ROTATION: f32 = 360.0; // exclusive, degrees
}

pub mod timing {
    /// Minimum gap between two successful shots.
    pub const SHOT_COOLDOWN_MS: u64 = 900;
    pub const SPAWN_INTERVAL_MS: u64 = 2_000;
    /// On terminals without release events a key is considered held while
    /// its last press/repeat arrived within this window.  Wider than a 30 Hz
    /// auto-repeat at any frame rate.
    pub const HOLD_WINDOW_MS: u64 = 133;
    pub const DEFAULT_FPS: u32 = 60;
}

pub mod scoring {
    pub const POINTS_PER_OBSTACLE: u32 = 10;
    pub const LEADERBOARD_CAPACITY: usize = 10;
}

/// Runtime settings, filled in by the binary from its command line.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub frame: Duration,
    pub scores_path: PathBuf,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub leaderboard_capacity: usize,
    /// Whether the terminal reports key releases.  When it does, keys stay
    /// held from press until release; otherwise they expire after
    /// `timing::HOLD_WINDOW_MS` without a repeat.
    pub release_events: bool,
}

impl GameConfig {
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.frame = frame_duration(fps);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: resolution::WIDTH,
            height: resolution::HEIGHT,
            frame: frame_duration(timing::DEFAULT_FPS),
            scores_path: default_scores_path(),
            seed: None,
            log_file: None,
            leaderboard_capacity: scoring::LEADERBOARD_CAPACITY,
            release_events: true,
        }
    }
}

fn frame_duration(fps: u32) -> Duration {
    Duration::from_millis(1_000 / u64::from(fps.max(1)))
}

pub fn default_scores_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".galaga_clone_scores.json")
}
