/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle or a timestamp) and returns a
/// brand-new `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::config;
use crate::entities::{Bullet, GameState, GameStatus, Obstacle, Player};
use crate::input::Controls;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a logical playfield of the given size.
pub fn init_state(width: f32, height: f32) -> GameState {
    GameState {
        player: Player::spawn(width, height),
        bullets: Vec::new(),
        obstacles: Vec::new(),
        score: 0,
        lives: config::player::STARTING_LIVES,
        status: GameStatus::Playing,
        last_shot_ms: None,
        frame: 0,
        width,
        height,
    }
}

/// Fresh game on the same playfield: score, lives, projectiles, obstacles and
/// the player position all go back to their starting values.
pub fn reset_game(state: &GameState) -> GameState {
    init_state(state.width, state.height)
}

// ── Player controller ───────────────────────────────────────────────────────

/// Apply held arrow keys, keeping the player's box inside the playfield.
pub fn move_player(state: &GameState, controls: &Controls) -> GameState {
    let mut x = state.player.x;
    if controls.left {
        x -= config::player::SPEED;
    }
    if controls.right {
        x += config::player::SPEED;
    }
    let max_x = (state.width - state.player.width).max(0.0);
    GameState {
        player: Player {
            x: x.clamp(0.0, max_x),
            ..state.player.clone()
        },
        ..state.clone()
    }
}

// ── Projectile manager ──────────────────────────────────────────────────────

/// Fire one bullet unless the previous shot is still cooling down.
pub fn shoot(state: &GameState, now_ms: u64) -> GameState {
    let ready = match state.last_shot_ms {
        None => true,
        Some(last) => now_ms.saturating_sub(last) >= config::timing::SHOT_COOLDOWN_MS,
    };
    if !ready {
        return state.clone();
    }
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet::fired_by(&state.player));
    GameState {
        bullets,
        last_shot_ms: Some(now_ms),
        ..state.clone()
    }
}

/// Move every bullet up and drop those whose bottom edge left the screen.
pub fn update_bullets(state: &GameState) -> GameState {
    let bullets = state
        .bullets
        .iter()
        .map(|b| Bullet { y: b.y - config::bullet::SPEED, ..b.clone() })
        .filter(|b| b.y + b.height >= 0.0)
        .collect();
    GameState { bullets, ..state.clone() }
}

// ── Obstacle spawner / mover ────────────────────────────────────────────────

/// Add one obstacle at the top edge with a random column, speed and rotation.
pub fn spawn_obstacle(state: &GameState, rng: &mut impl Rng) -> GameState {
    let span = state.width - config::obstacle::WIDTH;
    let x = if span > 0.0 { rng.gen_range(0.0..span).floor() } else { 0.0 };
    let speed = rng.gen_range(config::obstacle::MIN_SPEED..config::obstacle::MAX_SPEED);
    let rotation = rng.gen_range(0.0..config::obstacle::MAX_ROTATION);

    tracing::trace!(x, speed, rotation, "obstacle spawned");

    let mut obstacles = state.obstacles.clone();
    obstacles.push(Obstacle::new(x, 0.0, speed, rotation));
    GameState { obstacles, ..state.clone() }
}

/// Advance each obstacle by its own speed; drop those past the bottom edge.
pub fn update_obstacles(state: &GameState) -> GameState {
    let obstacles = state
        .obstacles
        .iter()
        .map(|o| Obstacle { y: o.y + o.speed, ..o.clone() })
        .filter(|o| o.y <= state.height)
        .collect();
    GameState { obstacles, ..state.clone() }
}

// ── Collision detector ──────────────────────────────────────────────────────

/// Resolve bullet/obstacle hits, then obstacle/player hits.
///
/// Both passes mark first and filter afterwards, so several hits in the same
/// frame are all resolved and no pairing is skipped.
pub fn check_collisions(state: &GameState) -> GameState {
    // ── 1. Bullets ↔ obstacles ───────────────────────────────────────────────
    let mut hit_obstacles = vec![false; state.obstacles.len()];
    let mut used_bullets = vec![false; state.bullets.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let bounds = bullet.bounds();
        let target = state
            .obstacles
            .iter()
            .enumerate()
            .find(|(oi, o)| !hit_obstacles[*oi] && bounds.overlaps(&o.bounds()));
        if let Some((oi, _)) = target {
            hit_obstacles[oi] = true;
            used_bullets[bi] = true;
        }
    }

    let destroyed = hit_obstacles.iter().filter(|&&hit| hit).count() as u32;

    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .zip(&used_bullets)
        .filter(|(_, &used)| !used)
        .map(|(b, _)| b.clone())
        .collect();

    let survivors = state
        .obstacles
        .iter()
        .zip(&hit_obstacles)
        .filter(|(_, &hit)| !hit)
        .map(|(o, _)| o);

    // ── 2. Obstacles ↔ player ────────────────────────────────────────────────
    let player_bounds = state.player.bounds();
    let (crashed, obstacles): (Vec<Obstacle>, Vec<Obstacle>) = survivors
        .cloned()
        .partition(|o| o.bounds().overlaps(&player_bounds));

    let lives = state.lives.saturating_sub(crashed.len() as u32);
    let status = if lives == 0 { GameStatus::GameOver } else { state.status };

    if !crashed.is_empty() {
        tracing::debug!(lives, "player hit by {} obstacle(s)", crashed.len());
    }

    GameState {
        bullets,
        obstacles,
        score: state.score + destroyed * config::scoring::POINTS_PER_OBSTACLE,
        lives,
        status,
        ..state.clone()
    }
}

// ── Per-frame tick ──────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Order: player movement (and fire), bullets, obstacles, collisions.  A game
/// that is already over is returned unchanged.
pub fn tick(state: &GameState, controls: &Controls, now_ms: u64) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }

    let mut next = move_player(state, controls);
    if controls.shooting {
        next = shoot(&next, now_ms);
    }
    let next = update_bullets(&next);
    let next = update_obstacles(&next);
    let next = check_collisions(&next);

    GameState {
        frame: state.frame + 1,
        ..next
    }
}
