/// Rendering layer.  All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only scales world
/// coordinates onto terminal cells and emits commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use alien_raid::entities::{Alien, Laser, Viewport};
use alien_raid::GameSession;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::White;
const C_LIFE_ICON: Color = Color::Red;
const C_SHIP: Color = Color::White;
const C_ALIEN: Color = Color::Green;
const C_LASER: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Maps the world onto the terminal area inside the border.
#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub cols: u16,
    pub rows: u16,
    pub viewport: Viewport,
}

impl Screen {
    /// Row 0 is free, row 1 and `rows - 2` are the border, `rows - 1` holds
    /// the controls hint.
    fn to_cell(&self, x: f32, y: f32) -> (u16, u16) {
        let inner_w = self.cols.saturating_sub(3) as f32;
        let inner_h = self.rows.saturating_sub(5) as f32;
        let fx = (x / self.viewport.width).clamp(0.0, 1.0);
        let fy = (y / self.viewport.height).clamp(0.0, 1.0);
        let col = 1 + (fx * inner_w).round() as u16;
        let row = 2 + (fy * inner_h).round() as u16;
        (col, row)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &GameSession, screen: Screen) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, screen)?;

    for alien in session.registry.aliens() {
        draw_alien(out, alien, screen)?;
    }
    for laser in session.registry.lasers() {
        draw_laser(out, laser, screen)?;
    }

    draw_ship(out, session, screen)?;
    draw_lives(out, session, screen)?;
    draw_label(out, session, screen)?;
    draw_controls_hint(out, session, screen)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, screen: Screen) -> std::io::Result<()> {
    let w = screen.cols as usize;
    let h = screen.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(screen.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// The score label, centred on its world position.
fn draw_label<W: Write>(out: &mut W, session: &GameSession, screen: Screen) -> std::io::Result<()> {
    let label = &session.label;
    let (col, row) = screen.to_cell(label.x, label.y);
    let half = label.text.chars().count() as u16 / 2;
    out.queue(cursor::MoveTo(col.saturating_sub(half).max(1), row))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&label.text))?;
    Ok(())
}

fn draw_lives<W: Write>(out: &mut W, session: &GameSession, screen: Screen) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_LIFE_ICON))?;
    for icon in &session.lives.icons {
        let (col, row) = screen.to_cell(icon.x, icon.y);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("▲"))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_ship<W: Write>(out: &mut W, session: &GameSession, screen: Screen) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲       ← row y      (tip)
    //  /█\      ← row y+1    (fuselage + wings)
    let Some(ship) = &session.ship else {
        return Ok(());
    };
    let (col, row) = screen.to_cell(ship.x, ship.y);
    out.queue(style::SetForegroundColor(C_SHIP))?;

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▲"))?;

    let wing_row = row + 1;
    if wing_row < screen.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), wing_row))?;
        out.queue(Print(if ship.flip_x { "/█>" } else { "<█\\" }))?;
    }

    Ok(())
}

fn draw_alien<W: Write>(out: &mut W, alien: &Alien, screen: Screen) -> std::io::Result<()> {
    // Row 0:  «▼»
    let (col, row) = screen.to_cell(alien.x, alien.y);
    out.queue(style::SetForegroundColor(C_ALIEN))?;
    out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
    out.queue(Print("«▼»"))?;
    Ok(())
}

fn draw_laser<W: Write>(out: &mut W, laser: &Laser, screen: Screen) -> std::io::Result<()> {
    let (col, row) = screen.to_cell(laser.x, laser.y);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_LASER))?;
    out.queue(Print("║"))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    session: &GameSession,
    screen: Screen,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, screen.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    if session.is_over() {
        out.queue(Print("Q : Quit"))?;
    } else {
        out.queue(Print("← → ↑ ↓ / W A S D : Move   SPACE : Shoot   Q : Quit"))?;
    }
    Ok(())
}
