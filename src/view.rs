//! Plain text board view for the terminal runner.
//!
//! Each grid cell is drawn two characters wide. The view reads nothing but a
//! [`GameSnapshot`]; it never touches game state.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::{GameSnapshot, Phase};
use crate::types::Color;

/// What to draw in one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Block(Color),
    /// Where the active piece would land
    Ghost,
}

impl Glyph {
    pub fn text(self) -> &'static str {
        match self {
            Glyph::Empty => " .",
            Glyph::Block(_) => "[]",
            Glyph::Ghost => "::",
        }
    }
}

pub fn glyph_at(snap: &GameSnapshot, x: i16, y: i16) -> Glyph {
    if let Some(color) = snap.visible_cell(x, y) {
        return Glyph::Block(color);
    }
    if let (Some(active), Some(landing_y)) = (&snap.active, snap.landing_y) {
        let dy = landing_y - active.y;
        if dy > 0 && active.footprint.iter().any(|&(fx, fy)| (fx, fy + dy) == (x, y)) {
            return Glyph::Ghost;
        }
    }
    Glyph::Empty
}

/// Board and side panel as uncolored text, one string per terminal row
pub fn render_lines(snap: &GameSnapshot) -> Vec<String> {
    let mut lines = Vec::with_capacity(snap.height as usize + 1);
    for y in 0..snap.height as i16 {
        let mut line = String::with_capacity(snap.width as usize * 2 + 24);
        line.push('|');
        for x in 0..snap.width as i16 {
            line.push_str(glyph_at(snap, x, y).text());
        }
        line.push('|');
        if let Some(panel) = panel_line(snap, y as usize) {
            line.push_str("  ");
            line.push_str(&panel);
        }
        lines.push(line);
    }

    let mut floor = String::with_capacity(snap.width as usize * 2 + 2);
    floor.push('+');
    floor.push_str(&"-".repeat(snap.width as usize * 2));
    floor.push('+');
    lines.push(floor);
    lines
}

fn panel_line(snap: &GameSnapshot, row: usize) -> Option<String> {
    match row {
        0 => Some("NEXT".to_string()),
        1 => Some(
            snap.next
                .iter()
                .map(|k| k.as_str().to_uppercase())
                .collect::<Vec<_>>()
                .join(" "),
        ),
        3 => Some("HOLD".to_string()),
        4 => Some(match snap.held {
            Some(kind) if snap.can_hold => kind.as_str().to_uppercase(),
            Some(kind) => format!("({})", kind.as_str().to_uppercase()),
            None => "-".to_string(),
        }),
        6 if snap.phase == Phase::GameOver => Some("GAME OVER".to_string()),
        _ => None,
    }
}

pub struct TerminalView {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Redraw the whole board from a snapshot
    pub fn draw(&mut self, snap: &GameSnapshot) -> Result<()> {
        self.buf.clear();
        for y in 0..snap.height as i16 {
            self.buf.queue(cursor::MoveTo(0, y as u16))?;
            self.buf.queue(Print('|'))?;
            for x in 0..snap.width as i16 {
                let glyph = glyph_at(snap, x, y);
                match glyph {
                    Glyph::Block(color) => {
                        self.buf.queue(SetForegroundColor(term_color(color)))?;
                    }
                    Glyph::Empty | Glyph::Ghost => {
                        self.buf.queue(SetForegroundColor(style::Color::DarkGrey))?;
                    }
                }
                self.buf.queue(Print(glyph.text()))?;
            }
            self.buf.queue(ResetColor)?;
            self.buf.queue(Print('|'))?;
            self.buf.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
            if let Some(panel) = panel_line(snap, y as usize) {
                self.buf.queue(Print("  "))?;
                self.buf.queue(Print(panel))?;
            }
        }

        self.buf.queue(cursor::MoveTo(0, snap.height))?;
        self.buf.queue(Print('+'))?;
        self.buf.queue(Print("-".repeat(snap.width as usize * 2)))?;
        self.buf.queue(Print('+'))?;
        self.flush_buf()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

fn term_color(color: Color) -> style::Color {
    match color {
        Color::Cyan => style::Color::Rgb { r: 80, g: 220, b: 220 },
        Color::Orange => style::Color::Rgb { r: 255, g: 165, b: 0 },
        Color::Purple => style::Color::Rgb { r: 200, g: 120, b: 220 },
        Color::Green => style::Color::Rgb { r: 100, g: 220, b: 120 },
        Color::Red => style::Color::Rgb { r: 220, g: 80, b: 80 },
        Color::Blue => style::Color::Rgb { r: 80, g: 120, b: 220 },
        Color::Yellow => style::Color::Rgb { r: 240, g: 220, b: 80 },
    }
}
