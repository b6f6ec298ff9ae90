/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only scales logical
/// coordinates onto the terminal grid and translates state into commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use galaga_clone::entities::{Aabb, GameState};
use galaga_clone::screen::Screen;
use galaga_clone::session::Session;
use rand::Rng;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TEXT: Color = Color::Green; // the classic "#0f0" arcade green
const C_HUD_BEST: Color = Color::Yellow;
const C_LIVES: Color = Color::White;
const C_PLAYER: Color = Color::White;
const C_BULLET: Color = Color::Cyan;
const C_OBSTACLE: Color = Color::DarkYellow;
const C_GAME_OVER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Obstacle glyph per 90° quadrant of its rotation.
const OBSTACLE_GLYPHS: [char; 4] = ['◢', '◣', '◤', '◥'];

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps the logical playfield onto terminal rows `1 .. rows-1`; row 0 is the
/// HUD and the last row holds the controls hint.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    cols: u16,
    rows: u16,
    field_w: f32,
    field_h: f32,
}

impl Viewport {
    const TOP: u16 = 1;

    fn new(cols: u16, rows: u16, state: &GameState) -> Self {
        Self { cols, rows, field_w: state.width, field_h: state.height }
    }

    fn field_rows(&self) -> u16 {
        self.rows.saturating_sub(2).max(1)
    }

    fn col(&self, x: f32) -> i32 {
        (x / self.field_w * self.cols as f32).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        (y / self.field_h * self.field_rows() as f32).floor() as i32 + Self::TOP as i32
    }

    /// Cell rectangle covering `b`, at least one cell in each direction,
    /// clipped to the playfield.  `None` when entirely off screen.
    fn cells(&self, b: &Aabb) -> Option<(u16, u16, u16, u16)> {
        let c0 = self.col(b.x);
        let r0 = self.row(b.y);
        let c1 = self.col(b.x + b.width).max(c0 + 1);
        let r1 = self.row(b.y + b.height).max(r0 + 1);

        let min_row = Self::TOP as i32;
        let max_row = (Self::TOP + self.field_rows()) as i32;
        let (c0, c1) = (c0.max(0), c1.min(self.cols as i32));
        let (r0, r1) = (r0.max(min_row), r1.min(max_row));
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as u16, r0 as u16, (c1 - c0) as u16, (r1 - r0) as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render whatever the session's current screen needs.
pub fn render<W: Write, R: Rng>(
    out: &mut W,
    session: &Session<R>,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match session.screen() {
        Screen::Menu => draw_menu(out, session, cols, rows)?,
        Screen::Leaderboard => draw_leaderboard(out, session, cols, rows)?,
        Screen::Playing => draw_playfield(out, session, cols, rows)?,
        Screen::GameOver => {
            draw_playfield(out, session, cols, rows)?;
            draw_game_over(out, session.state(), cols, rows)?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_playfield<W: Write, R: Rng>(
    out: &mut W,
    session: &Session<R>,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let state = session.state();
    let vp = Viewport::new(cols, rows, state);

    draw_player(out, &vp, state)?;
    for bullet in &state.bullets {
        fill_cells(out, &vp, &bullet.bounds(), '║', C_BULLET)?;
    }
    for obstacle in &state.obstacles {
        let quadrant = (obstacle.rotation.rem_euclid(360.0) / 90.0) as usize % 4;
        fill_cells(out, &vp, &obstacle.bounds(), OBSTACLE_GLYPHS[quadrant], C_OBSTACLE)?;
    }

    draw_hud(out, session, cols)?;
    draw_hint(out, rows, "← → : Move   SPACE : Shoot   Q : Quit")?;
    Ok(())
}

fn fill_cells<W: Write>(
    out: &mut W,
    vp: &Viewport,
    bounds: &Aabb,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row, w, h)) = vp.cells(bounds) else {
        return Ok(());
    };
    let line: String = std::iter::repeat(glyph).take(w as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for dy in 0..h {
        out.queue(cursor::MoveTo(col, row + dy))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, vp: &Viewport, state: &GameState) -> std::io::Result<()> {
    // Sprite, scaled to the player's box:
    //    ▲       ← first row (tip)
    //  /███\     ← remaining rows (fuselage + wings)
    let Some((col, row, w, h)) = vp.cells(&state.player.bounds()) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_PLAYER))?;

    out.queue(cursor::MoveTo(col + w / 2, row))?;
    out.queue(Print("▲"))?;

    let body = if w >= 3 {
        format!("/{}\\", "█".repeat(w as usize - 2))
    } else {
        "█".repeat(w as usize)
    };
    for dy in 1..h {
        out.queue(cursor::MoveTo(col, row + dy))?;
        out.queue(Print(&body))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write, R: Rng>(out: &mut W, session: &Session<R>, cols: u16) -> std::io::Result<()> {
    let state = session.state();

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print(format!("Score: {}", state.score)))?;

    if let Some(best) = session.high_scores().best() {
        out.queue(style::SetForegroundColor(C_HUD_BEST))?;
        out.queue(Print(format!("   Hi: {}", best.max(state.score))))?;
    }

    // One small ship icon per remaining life, right-aligned
    let icons = vec!["▲"; state.lives as usize].join(" ");
    let rx = cols.saturating_sub(icons.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_LIVES))?;
    out.queue(Print(&icons))?;
    Ok(())
}

fn draw_hint<W: Write>(out: &mut W, rows: u16, hint: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

/// Print `lines` centered horizontally, starting at `start_row`.
fn draw_centered<W: Write>(
    out: &mut W,
    cols: u16,
    start_row: u16,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = cols / 2;
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write, R: Rng>(
    out: &mut W,
    session: &Session<R>,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let best_line = session
        .high_scores()
        .best()
        .map(|best| format!("Best Score: {best}"))
        .unwrap_or_default();

    let lines: &[(&str, Color)] = &[
        ("★  GALAGA CLONE  ★", Color::Cyan),
        (best_line.as_str(), C_HUD_BEST),
        ("", C_TEXT),
        ("Press S to Start", C_TEXT),
        ("Press L for Leaderboard", C_TEXT),
        ("Press Q to Quit", C_HINT),
    ];
    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2 + 2);
    draw_centered(out, cols, start_row, lines)?;
    draw_hint(out, rows, "← → : Move   SPACE : Shoot")?;
    Ok(())
}

// ── Leaderboard ───────────────────────────────────────────────────────────────

fn draw_leaderboard<W: Write, R: Rng>(
    out: &mut W,
    session: &Session<R>,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    draw_centered(out, cols, 2, &[("LEADERBOARD", Color::Cyan)])?;

    let scores = session.high_scores();
    let entries: Vec<String> = if scores.is_empty() {
        vec!["No scores yet".to_string()]
    } else {
        scores
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{:>2}. {:>8}", i + 1, s))
            .collect()
    };

    let first_row = 4;
    let last_row = rows.saturating_sub(3);
    for (i, entry) in entries.iter().enumerate() {
        let row = first_row + i as u16;
        if row > last_row {
            break;
        }
        draw_centered(out, cols, row, &[(entry.as_str(), C_TEXT)])?;
    }

    draw_centered(
        out,
        cols,
        rows.saturating_sub(2),
        &[("Press M to Return to Menu", C_HINT)],
    )?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", C_GAME_OVER),
        ("║    GAME  OVER    ║", C_GAME_OVER),
        ("╚══════════════════╝", C_GAME_OVER),
        (score_line.as_str(), Color::Yellow),
        ("Press R to Restart", Color::White),
        ("Press M for Menu", Color::White),
    ];
    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2);
    draw_centered(out, cols, start_row, lines)
}
