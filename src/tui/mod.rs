//! Rendering layer; all terminal I/O lives here.
//!
//! Each function receives a mutable writer and a read-only [`Snapshot`];
//! no game logic is performed, this module only translates view data into
//! terminal commands. The simulation runs in pixel space, so everything is
//! mapped down to character cells on the way out.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use crate::highscores::HighScores;
use crate::sim::{EntityKind, PowerUpKind, Rect, Snapshot};

/// Assumed pixel footprint of one terminal cell.
pub const CELL_W: f32 = 8.0;
pub const CELL_H: f32 = 16.0;

/// Rows reserved for the HUD at the top of the screen.
const HUD_ROWS: i32 = 1;

// ── Colour palette ───────────────────────────────────────────────────────────

const C_HUD: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_COIN: Color = Color::Yellow;
const C_OBSTACLE: Color = Color::Red;
const C_POWERUP_INVINCIBLE: Color = Color::Magenta;
const C_POWERUP_DOUBLE: Color = Color::Green;
const C_POWERUP_HEALTH: Color = Color::Rgb { r: 255, g: 105, b: 180 };
const C_POWERUP_SLOW: Color = Color::Blue;
const C_OVERLAY: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    snap: &Snapshot,
    scores: &HighScores,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let max_row = (snap.arena_height / CELL_H) as i32;

    for entity in &snap.entities {
        let (color, ch) = entity_style(entity.kind);
        draw_rect(out, &entity.rect, color, ch, max_row)?;
    }

    // Flicker: skip the player on hidden phases of the post-hit window
    if !snap.player_hidden {
        draw_rect(out, &snap.player, C_PLAYER, '█', max_row)?;
    }

    draw_hud(out, snap, scores)?;

    if snap.game_over {
        draw_game_over(out, snap, scores)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()
}

fn entity_style(kind: EntityKind) -> (Color, char) {
    match kind {
        EntityKind::Coin => (C_COIN, '●'),
        EntityKind::Obstacle => (C_OBSTACLE, '▓'),
        EntityKind::PowerUp(PowerUpKind::Invincible) => (C_POWERUP_INVINCIBLE, '!'),
        EntityKind::PowerUp(PowerUpKind::DoublePoints) => (C_POWERUP_DOUBLE, '2'),
        EntityKind::PowerUp(PowerUpKind::Health) => (C_POWERUP_HEALTH, '+'),
        EntityKind::PowerUp(PowerUpKind::SlowObstacles) => (C_POWERUP_SLOW, 'S'),
    }
}

/// Fill a pixel-space rectangle with a character, clipped to the playfield.
fn draw_rect<W: Write>(
    out: &mut W,
    rect: &Rect,
    color: Color,
    ch: char,
    max_row: i32,
) -> std::io::Result<()> {
    let col = (rect.pos.x / CELL_W).floor().max(0.0) as u16;
    let row0 = (rect.pos.y / CELL_H).floor() as i32;
    let cols = ((rect.size.x / CELL_W).round() as usize).max(1);
    let rows = ((rect.size.y / CELL_H).round() as i32).max(1);

    out.queue(style::SetForegroundColor(color))?;
    let line: String = std::iter::repeat_n(ch, cols).collect();
    for row in row0..row0 + rows {
        // Entities above the top or under the HUD are simply not drawn
        if row < HUD_ROWS || row > max_row {
            continue;
        }
        out.queue(cursor::MoveTo(col, row as u16))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── HUD ──────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    snap: &Snapshot,
    scores: &HighScores,
) -> std::io::Result<()> {
    let hearts: String = "♥".repeat(snap.health as usize)
        + &"♡".repeat(snap.max_health.saturating_sub(snap.health) as usize);

    let filled = (snap.level_progress * 10.0).round() as usize;
    let progress: String = "▰".repeat(filled.min(10)) + &"▱".repeat(10 - filled.min(10));

    let mut effects = String::new();
    for effect in &snap.effects {
        let label = match effect.kind {
            PowerUpKind::Invincible => "inv",
            PowerUpKind::DoublePoints => "2x",
            PowerUpKind::SlowObstacles => "slow",
            PowerUpKind::Health => continue,
        };
        effects.push_str(&format!("  [{label} {:.1}s]", effect.remaining_secs));
    }

    let best = scores.best().max(snap.score);

    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Score {:>6}  Best {:>6}  Level {:>2} {progress}  {hearts}{effects}",
        snap.score, best, snap.level
    )))?;
    Ok(())
}

// ── Game over overlay ────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    snap: &Snapshot,
    scores: &HighScores,
) -> std::io::Result<()> {
    let center_col = (snap.arena_width / CELL_W / 2.0) as u16;
    let center_row = (snap.arena_height / CELL_H / 2.0) as u16;

    let title = "G A M E   O V E R";
    let summary = format!("Score {}  —  Level {}", snap.score, snap.level);
    let best = format!("Session best: {}", scores.best().max(snap.score));
    let hint = "R to restart  ·  Q to quit";

    let lines = [
        (title, C_OVERLAY),
        (summary.as_str(), C_OVERLAY),
        (best.as_str(), C_HUD),
        (hint, C_HINT),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        let col = center_col.saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, center_row.saturating_sub(2) + i as u16 * 2))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}
