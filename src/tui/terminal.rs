//! Terminal-backed surface.

use std::io::{self, Stdout};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

use super::style::StyleToken;
use super::surface::{GridSurface, Surface};

/// Surface drawing into the real terminal.
///
/// Creating one switches the terminal to raw mode on the alternate screen
/// with a hidden cursor. The layout paints into an in-memory grid which is
/// copied to the terminal in one `draw` per frame; ratatui only emits the
/// cells that changed. The terminal is restored on [`restore`] or drop.
///
/// [`restore`]: TerminalSurface::restore
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    grid: GridSurface,
    restored: bool,
}

impl TerminalSurface {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let size = terminal.size()?;
        debug!(width = size.width, height = size.height, "terminal initialized");

        Ok(Self {
            terminal,
            grid: GridSurface::new(size.width, size.height),
            restored: false,
        })
    }

    /// Leaves raw mode and the alternate screen and shows the cursor.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> (u16, u16) {
        self.grid.size()
    }

    fn move_to(&mut self, row: u16, col: u16) {
        self.grid.move_to(row, col);
    }

    fn apply(&mut self, token: StyleToken) {
        self.grid.apply(token);
    }

    fn write(&mut self, text: &str) {
        self.grid.write(text);
    }

    fn clear_to_eol(&mut self) {
        self.grid.clear_to_eol();
    }

    fn draw_border(&mut self) {
        self.grid.draw_border();
    }

    /// Picks up terminal resizes; ratatui resizes its own buffers on draw.
    fn prepare(&mut self) -> io::Result<()> {
        let size = self.terminal.size()?;
        if (size.width, size.height) != self.grid.size() {
            debug!(width = size.width, height = size.height, "terminal resized");
            self.grid.resize(size.width, size.height);
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        let grid = self.grid.buffer();
        self.terminal.draw(|frame| {
            let area = frame.area().intersection(grid.area);
            let out = frame.buffer_mut();
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    if let (Some(src), Some(dst)) = (grid.cell((x, y)), out.cell_mut((x, y))) {
                        *dst = src.clone();
                    }
                }
            }
        })?;
        self.grid.present()
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
