/// Rendering layer — all terminal output lives here.
///
/// The `draw_*`/`render_*` functions receive a `Renderer` and an immutable
/// view of the arena.  No game logic is performed; they only translate state
/// into draw calls on an 800×600 logical surface.  `TerminalRenderer` maps
/// that surface onto the terminal's cell grid.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{Actor, Arena, Projectile, Rect, Rgb, SpriteKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Rgb = Rgb::WHITE;
const C_PROJECTILE: Rgb = Rgb::RED;
const C_HEALTH_BACK: Rgb = Rgb::RED;
const C_HEALTH_FILL: Rgb = Rgb::GREEN;
const C_TEXT: Rgb = Rgb::BLACK;

const HEALTH_BAR_WIDTH: f32 = 100.0;
const HEALTH_BAR_HEIGHT: f32 = 10.0;
/// Gap between the top of an actor and its health bar.
const HEALTH_BAR_OFFSET: f32 = 20.0;

// ── Surface contract ──────────────────────────────────────────────────────────

/// A drawing surface addressed in logical pixels.
pub trait Renderer {
    fn clear(&mut self, color: Rgb) -> io::Result<()>;
    fn draw_rect(&mut self, color: Rgb, rect: Rect) -> io::Result<()>;
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Rgb) -> io::Result<()>;
    /// Width `text` occupies on this surface, in logical pixels.
    fn text_width(&self, text: &str) -> f32;
    fn present(&mut self) -> io::Result<()>;
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Clear the surface for a new frame.
pub fn begin_frame<R: Renderer>(r: &mut R) -> io::Result<()> {
    r.clear(C_BACKGROUND)
}

/// Draw actors, then projectiles, then health bars.
pub fn render_arena<R: Renderer>(r: &mut R, arena: &Arena) -> io::Result<()> {
    for actor in &arena.actors {
        draw_actor(r, actor)?;
    }
    for actor in &arena.actors {
        for p in &actor.projectiles {
            draw_projectile(r, p)?;
        }
    }
    for actor in &arena.actors {
        draw_health_bar(r, actor)?;
    }
    Ok(())
}

/// Replace the frame with a centred "<winner> wins!" line.
pub fn render_winner<R: Renderer>(r: &mut R, arena: &Arena, winner: &str) -> io::Result<()> {
    r.clear(C_BACKGROUND)?;
    let text = format!("{} wins!", winner);
    let x = arena.config.width / 2.0 - r.text_width(&text) / 2.0;
    let y = arena.config.height / 2.0;
    r.draw_text(&text, x, y, C_TEXT)
}

/// One stateless draw routine for every box on screen; the kind picks the look.
pub fn draw_sprite<R: Renderer>(
    r: &mut R,
    kind: SpriteKind,
    rect: Rect,
    color: Rgb,
) -> io::Result<()> {
    match kind {
        SpriteKind::Actor => r.draw_rect(color, rect),
        SpriteKind::Projectile => r.draw_rect(C_PROJECTILE, rect),
    }
}

fn draw_actor<R: Renderer>(r: &mut R, actor: &Actor) -> io::Result<()> {
    draw_sprite(r, SpriteKind::Actor, actor.rect(), actor.color)
}

fn draw_projectile<R: Renderer>(r: &mut R, p: &Projectile) -> io::Result<()> {
    draw_sprite(r, SpriteKind::Projectile, p.rect(), C_PROJECTILE)
}

/// Green fill is the health clamped to [0, 100] so a finishing blow never
/// produces a negative width.
pub fn health_bar_fill(health: i32) -> f32 {
    health.clamp(0, 100) as f32 / 100.0 * HEALTH_BAR_WIDTH
}

fn draw_health_bar<R: Renderer>(r: &mut R, actor: &Actor) -> io::Result<()> {
    let x = actor.position.x;
    let y = actor.position.y - HEALTH_BAR_OFFSET;
    r.draw_rect(C_HEALTH_BACK, Rect::new(x, y, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT))?;
    let fill = health_bar_fill(actor.health);
    if fill > 0.0 {
        r.draw_rect(C_HEALTH_FILL, Rect::new(x, y, fill, HEALTH_BAR_HEIGHT))?;
    }
    Ok(())
}

// ── Terminal surface ──────────────────────────────────────────────────────────

/// How the terminal renderer learns its grid size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Viewport {
    /// Re-query the terminal on every `clear`.
    FollowTerminal,
    Fixed { cols: u16, rows: u16 },
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    viewport: Viewport,
    cols: u16,
    rows: u16,
    logical_w: f32,
    logical_h: f32,
    background: Rgb,
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, viewport: Viewport, logical_w: f32, logical_h: f32) -> Self {
        let (cols, rows) = match viewport {
            Viewport::Fixed { cols, rows } => (cols, rows),
            Viewport::FollowTerminal => terminal::size().unwrap_or((80, 24)),
        };
        TerminalRenderer {
            out,
            viewport,
            cols,
            rows,
            logical_w,
            logical_h,
            background: C_BACKGROUND,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Logical span `[start, start + len)` → covered cell range, clipped to
    /// `[0, cells)`. Any non-empty span covers at least one cell.
    fn cell_span(start: f32, len: f32, logical: f32, cells: u16) -> Option<(u16, u16)> {
        if len <= 0.0 || cells == 0 {
            return None;
        }
        let cells_f = f32::from(cells);
        let lo = (start * cells_f / logical).floor();
        let hi = ((start + len) * cells_f / logical).ceil().max(lo + 1.0);
        let lo = lo.max(0.0);
        let hi = hi.min(cells_f);
        if hi <= lo {
            return None;
        }
        Some((lo as u16, hi as u16))
    }

    fn cell_of(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x * f32::from(self.cols) / self.logical_w).floor();
        let row = (y * f32::from(self.rows) / self.logical_h).floor();
        if col < 0.0 || row < 0.0 || col >= f32::from(self.cols) || row >= f32::from(self.rows) {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self, color: Rgb) -> io::Result<()> {
        if self.viewport == Viewport::FollowTerminal {
            let (cols, rows) = terminal::size()?;
            self.cols = cols;
            self.rows = rows;
        }
        self.background = color;
        self.out.queue(style::SetBackgroundColor(to_color(color)))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_rect(&mut self, color: Rgb, rect: Rect) -> io::Result<()> {
        let cols = Self::cell_span(rect.x, rect.w, self.logical_w, self.cols);
        let rows = Self::cell_span(rect.y, rect.h, self.logical_h, self.rows);
        let (Some((c0, c1)), Some((r0, r1))) = (cols, rows) else {
            return Ok(());
        };
        let fill = " ".repeat(usize::from(c1 - c0));
        self.out.queue(style::SetBackgroundColor(to_color(color)))?;
        for row in r0..r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&fill))?;
        }
        self.out.queue(style::SetBackgroundColor(to_color(self.background)))?;
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Rgb) -> io::Result<()> {
        let Some((col, row)) = self.cell_of(x.max(0.0), y) else {
            return Ok(());
        };
        let room = usize::from(self.cols - col);
        let clipped: String = text.chars().take(room).collect();
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(to_color(color)))?;
        self.out.queue(Print(clipped))?;
        Ok(())
    }

    fn text_width(&self, text: &str) -> f32 {
        if self.cols == 0 {
            return 0.0;
        }
        text.chars().count() as f32 * self.logical_w / f32::from(self.cols)
    }

    fn present(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
