//! Character-grid drawing surface.
//!
//! The layout never talks to the terminal directly. It moves a cursor,
//! switches the current style and writes text on a [`Surface`]; the surface
//! owns the cursor and style so every write is a function of its arguments
//! and that state.

use std::io;

use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Widget};

use super::style::{StyleToken, Styles};

/// Fixed-size character grid with cursor addressing and styled writes.
///
/// Rows and columns are zero-based. Writes past the right edge are clipped;
/// writes on rows outside the grid are dropped.
pub trait Surface {
    /// Returns `(width, height)` in cells.
    fn size(&self) -> (u16, u16);

    fn move_to(&mut self, row: u16, col: u16);

    /// Sets the style for subsequent writes.
    fn apply(&mut self, token: StyleToken);

    fn reset(&mut self) {
        self.apply(StyleToken::Reset);
    }

    /// Writes `text` at the cursor in the current style and advances the cursor.
    fn write(&mut self, text: &str);

    /// Erases from the cursor to the end of its row.
    fn clear_to_eol(&mut self);

    /// Draws a box around the whole grid.
    fn draw_border(&mut self);

    /// Called before each paint; may resize the grid.
    fn prepare(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Flushes the grid as one frame.
    fn present(&mut self) -> io::Result<()>;
}

/// In-memory surface backed by a ratatui [`Buffer`].
#[derive(Debug, Clone)]
pub struct GridSurface {
    buffer: Buffer,
    row: u16,
    col: u16,
    token: StyleToken,
    presented: usize,
    last_frame: Option<Buffer>,
}

impl GridSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, width, height)),
            row: 0,
            col: 0,
            token: StyleToken::Reset,
            presented: 0,
            last_frame: None,
        }
    }

    /// Replaces the grid with a blank one of the new size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.buffer = Buffer::empty(Rect::new(0, 0, width, height));
        self.row = 0;
        self.col = 0;
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn cursor(&self) -> (u16, u16) {
        (self.row, self.col)
    }

    pub fn current_style(&self) -> StyleToken {
        self.token
    }

    pub fn cell(&self, row: u16, col: u16) -> Option<&Cell> {
        self.buffer.cell((col, row))
    }

    /// Text of one row, trailing blanks trimmed.
    pub fn row_text(&self, row: u16) -> String {
        let (width, height) = self.size();
        if row >= height {
            return String::new();
        }
        let text: String = (0..width)
            .filter_map(|col| self.cell(row, col))
            .map(Cell::symbol)
            .collect();
        text.trim_end().to_string()
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> usize {
        self.presented
    }

    /// Copy of the grid as of the last `present`.
    pub fn last_frame(&self) -> Option<&Buffer> {
        self.last_frame.as_ref()
    }
}

impl Surface for GridSurface {
    fn size(&self) -> (u16, u16) {
        (self.buffer.area.width, self.buffer.area.height)
    }

    fn move_to(&mut self, row: u16, col: u16) {
        self.row = row;
        self.col = col;
    }

    fn apply(&mut self, token: StyleToken) {
        self.token = token;
    }

    fn write(&mut self, text: &str) {
        let (width, height) = self.size();
        if self.row >= height || self.col >= width {
            return;
        }
        let room = usize::from(width - self.col);
        let (x, _) =
            self.buffer
                .set_stringn(self.col, self.row, text, room, self.token.style());
        self.col = x;
    }

    fn clear_to_eol(&mut self) {
        let (width, height) = self.size();
        if self.row >= height {
            return;
        }
        for col in self.col..width {
            if let Some(cell) = self.buffer.cell_mut((col, self.row)) {
                cell.reset();
            }
        }
    }

    fn draw_border(&mut self) {
        let area = self.buffer.area;
        Block::bordered()
            .border_style(Styles::border())
            .render(area, &mut self.buffer);
    }

    fn present(&mut self) -> io::Result<()> {
        self.presented += 1;
        self.last_frame = Some(self.buffer.clone());
        Ok(())
    }
}
