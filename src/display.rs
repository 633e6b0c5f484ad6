//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game.  No game logic is performed; this module only translates logical
//! positions into terminal cells.

use std::collections::HashMap;
use std::io::Write;

use castle_defense::assets::{AssetKind, Sprite};
use castle_defense::entities::{Arrow, Rect, ARROW_LENGTH};
use castle_defense::game::{Game, Status};
use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::White;
const C_STATUS: Color = Color::Yellow;
const C_PLAYER: Color = Color::Rgb { r: 34, g: 139, b: 34 };
const C_ARROW: Color = Color::Rgb { r: 255, g: 204, b: 0 };
const C_POWER_UP: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const C_HINT: Color = Color::DarkGrey;

// ── Layout ────────────────────────────────────────────────────────────────────

/// Maps the logical play area onto the terminal.
///
/// Row 0 is the HUD, row 1 and row `rows - 2` are the border, the last row
/// holds the controls hint; columns 0 and `cols - 1` are the side walls.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    pub cols: u16,
    pub rows: u16,
    cell_width: f32,
    cell_height: f32,
}

impl Layout {
    pub fn new(cols: u16, rows: u16, cell_width: f32, cell_height: f32) -> Self {
        Self {
            cols,
            rows,
            cell_width,
            cell_height,
        }
    }

    fn play_cols(&self) -> u16 {
        self.cols.saturating_sub(2)
    }

    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(4)
    }

    pub fn world_width(&self) -> f32 {
        self.play_cols() as f32 * self.cell_width
    }

    pub fn world_height(&self) -> f32 {
        self.play_rows() as f32 * self.cell_height
    }

    /// Number of cells an entity of the given size covers.
    pub fn footprint(&self, width: f32, height: f32) -> (u16, u16) {
        let cols = (width / self.cell_width).round().max(1.0) as u16;
        let rows = (height / self.cell_height).round().max(1.0) as u16;
        (cols, rows)
    }

    /// Terminal cell for a logical point, or `None` if it is off the board.
    fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.cell_width) as u16;
        let row = (y / self.cell_height) as u16;
        if col >= self.play_cols() || row >= self.play_rows() {
            return None;
        }
        Some((col + 1, row + 2))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    game: &Game,
    layout: &Layout,
    sprites: &HashMap<AssetKind, Sprite>,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, layout)?;
    draw_hud(out, game, layout)?;

    let world = &game.world;
    if let Some(castle) = &world.castle {
        draw_sprite(out, layout, &castle.rect, sprites.get(&AssetKind::Castle), Color::Grey)?;
    }
    for enemy in &world.entities.enemies {
        draw_sprite(out, layout, &enemy.rect, sprites.get(&AssetKind::Knight), Color::Red)?;
    }
    for power_up in &world.entities.power_ups {
        draw_block(out, layout, &power_up.rect, C_POWER_UP, "+")?;
    }
    for arrow in &world.entities.arrows {
        draw_arrow(out, layout, arrow)?;
    }
    draw_block(out, layout, &world.player.rect, C_PLAYER, "█")?;

    draw_controls_hint(out, layout)?;

    match game.status() {
        Status::Idle => draw_banner(out, layout, &["CASTLE  DEFENSE", "S - Start   Q - Quit"], Color::Cyan)?,
        Status::Paused => draw_banner(out, layout, &["PAUSED", "P - Resume"], Color::Yellow)?,
        Status::GameOver => draw_game_over(out, game, layout)?,
        Status::Running => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, layout.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    let w = layout.cols as usize;
    let h = layout.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(layout.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, game: &Game, layout: &Layout) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&game.world.hud))?;

    let readiness = game.readiness();
    let tag = match game.status() {
        Status::Running if !readiness.castle || !readiness.knight => "[ LOADING ]",
        Status::Running => "[ RUNNING ]",
        Status::Paused => "[ PAUSED ]",
        Status::Idle => "[ READY ]",
        Status::GameOver => "[ GAME OVER ]",
    };
    let x = layout.cols.saturating_sub(tag.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(x, 0))?;
    out.queue(style::SetForegroundColor(C_STATUS))?;
    out.queue(Print(tag))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Draw an image-backed entity cell by cell; a plain block stands in until
/// its sprite arrives.
fn draw_sprite<W: Write>(
    out: &mut W,
    layout: &Layout,
    rect: &Rect,
    sprite: Option<&Sprite>,
    fallback: Color,
) -> std::io::Result<()> {
    let Some(sprite) = sprite else {
        return draw_block(out, layout, rect, fallback, "█");
    };
    let cell_w = rect.width / sprite.cols as f32;
    let cell_h = rect.height / sprite.rows as f32;
    for row in 0..sprite.rows {
        for col in 0..sprite.cols {
            let x = rect.x + col as f32 * cell_w;
            let y = rect.y + row as f32 * cell_h;
            let (Some((cx, cy)), Some([r, g, b])) = (layout.to_cell(x, y), sprite.pixel(col, row)) else {
                continue;
            };
            out.queue(cursor::MoveTo(cx, cy))?;
            out.queue(style::SetForegroundColor(Color::Rgb { r, g, b }))?;
            out.queue(Print("█"))?;
        }
    }
    Ok(())
}

fn draw_block<W: Write>(
    out: &mut W,
    layout: &Layout,
    rect: &Rect,
    color: Color,
    glyph: &str,
) -> std::io::Result<()> {
    let (cols, rows) = layout.footprint(rect.width, rect.height);
    out.queue(style::SetForegroundColor(color))?;
    for row in 0..rows {
        for col in 0..cols {
            let x = rect.x + col as f32 * rect.width / cols as f32;
            let y = rect.y + row as f32 * rect.height / rows as f32;
            if let Some((cx, cy)) = layout.to_cell(x, y) {
                out.queue(cursor::MoveTo(cx, cy))?;
                out.queue(Print(glyph))?;
            }
        }
    }
    Ok(())
}

/// Only the last `ARROW_LENGTH` units behind the head are visible.
fn draw_arrow<W: Write>(out: &mut W, layout: &Layout, arrow: &Arrow) -> std::io::Result<()> {
    let head = layout.to_cell(arrow.head.x, arrow.head.y);
    let shaft_end = (arrow.head.y + ARROW_LENGTH).min(arrow.tail.y);
    let shaft = layout.to_cell(arrow.head.x, shaft_end);

    out.queue(style::SetForegroundColor(C_ARROW))?;
    if let Some((cx, cy)) = shaft.filter(|cell| Some(*cell) != head) {
        out.queue(cursor::MoveTo(cx, cy))?;
        out.queue(Print("│"))?;
    }
    if let Some((cx, cy)) = head {
        out.queue(cursor::MoveTo(cx, cy))?;
        out.queue(Print("↑"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, layout: &Layout) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, layout.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   SPACE : Shoot   S : Start   P : Pause   R : Reset   Q : Quit",
    ))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    layout: &Layout,
    lines: &[&str],
    color: Color,
) -> std::io::Result<()> {
    let cx = layout.cols / 2;
    let start_row = (layout.rows / 2).saturating_sub(lines.len() as u16 / 2);
    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*line))?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, game: &Game, layout: &Layout) -> std::io::Result<()> {
    let score_line = format!(
        "Game Over! The castle has fallen. Your score: {}",
        game.final_score().unwrap_or_default()
    );
    draw_banner(
        out,
        layout,
        &["╔════════════════════╗", "║     GAME  OVER     ║", "╚════════════════════╝"],
        Color::Red,
    )?;
    let row = layout.rows / 2 + 2;
    let cx = layout.cols / 2;
    out.queue(cursor::MoveTo(cx.saturating_sub(score_line.chars().count() as u16 / 2), row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let hint = "S - Play Again  Q - Quit";
    out.queue(cursor::MoveTo(cx.saturating_sub(hint.chars().count() as u16 / 2), row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;
    Ok(())
}
