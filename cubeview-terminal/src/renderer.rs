/// ASCII line canvas for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use cubeview_core::{Colour, LineCanvas, Pt2};
use std::io::Write;

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    colour: Option<Colour>,
}

const BLANK: Cell = Cell {
    glyph: ' ',
    colour: None,
};

/// Double-buffered character canvas, one cell per pixel
pub struct AsciiCanvas {
    width: usize,
    height: usize,
    back: Vec<Cell>,
    front: Vec<Cell>,
    colour: Colour,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            back: vec![BLANK; size],
            front: vec![BLANK; size],
            colour: Colour::BORDER,
        }
    }

    fn plot(&mut self, x: f64, y: f64, glyph: char) {
        let (col, row) = (x.round(), y.round());
        if col < 0.0 || row < 0.0 || col >= self.width as f64 || row >= self.height as f64 {
            return;
        }
        let idx = row as usize * self.width + col as usize;
        self.back[idx] = Cell {
            glyph,
            colour: Some(self.colour),
        };
    }

    /// Rows of the presented frame as plain text
    pub fn rows(&self) -> Vec<String> {
        self.front
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|c| c.glyph).collect())
            .collect()
    }

    /// Write the presented frame starting at terminal row `top`
    pub fn draw<W: Write>(&self, writer: &mut W, top: u16) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, top + y as u16))?;
            for x in 0..self.width {
                let cell = self.front[y * self.width + x];
                if cell.colour != current {
                    current = cell.colour;
                    match cell.colour {
                        Some(colour) => {
                            let (r, g, b) = colour.to_rgb8();
                            writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                        }
                        None => {
                            writer.queue(ResetColor)?;
                        }
                    }
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Character approximating the slope of a line in y-down screen space
fn glyph_for(dx: f64, dy: f64) -> char {
    if dx.abs() > 2.0 * dy.abs() {
        '-'
    } else if dy.abs() > 2.0 * dx.abs() {
        '|'
    } else if dx * dy > 0.0 {
        '\\'
    } else {
        '/'
    }
}

impl LineCanvas for AsciiCanvas {
    fn begin(&mut self, width: u32, height: u32) {
        let (width, height) = (width as usize, height as usize);
        if width != self.width || height != self.height {
            *self = Self::new(width, height);
        }
        self.back.fill(BLANK);
    }

    fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    fn draw_line(&mut self, p: Pt2, q: Pt2) {
        let (dx, dy) = (q.x - p.x, q.y - p.y);
        if !(dx.is_finite() && dy.is_finite()) {
            log::debug!("skipping non-finite line {:?} -> {:?}", p, q);
            return;
        }
        let glyph = glyph_for(dx, dy);
        let steps = dx.abs().max(dy.abs()).ceil() as usize;
        if steps == 0 {
            self.plot(p.x, p.y, glyph);
            return;
        }
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.plot(p.x + t * dx, p.y + t * dy, glyph);
        }
    }

    fn complete(&mut self) {}

    fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }
}
