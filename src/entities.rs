/// All game entity types: pure data plus bounding-box helpers.

use crate::config;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Bounding boxes ────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in logical coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    /// Strict overlap on all four edges: boxes that merely touch do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Player {
    /// Centered horizontally, `BOTTOM_OFFSET` above the bottom edge.
    pub fn spawn(field_width: f32, field_height: f32) -> Self {
        Self {
            x: field_width / 2.0 - config::player::WIDTH / 2.0,
            y: field_height - config::player::BOTTOM_OFFSET,
            width: config::player::WIDTH,
            height: config::player::HEIGHT,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bullet {
    /// A bullet leaving from the player's top edge, centered on its midpoint.
    pub fn fired_by(player: &Player) -> Self {
        Self {
            x: player.x + player.width / 2.0 - config::bullet::WIDTH / 2.0,
            y: player.y,
            width: config::bullet::WIDTH,
            height: config::bullet::HEIGHT,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Fall distance per tick.
    pub speed: f32,
    /// Degrees in `[0, 360)`; fixed for the obstacle's lifetime.
    pub rotation: f32,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, speed: f32, rotation: f32) -> Self {
        Self {
            x,
            y,
            width: config::obstacle::WIDTH,
            height: config::obstacle::HEIGHT,
            speed,
            rotation,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub lives: u32,
    pub status: GameStatus,
    /// Timestamp of the last successful shot; `None` until the first one.
    pub last_shot_ms: Option<u64>,
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}
