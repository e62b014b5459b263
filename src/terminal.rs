use crate::colors::Rgb;
use crate::event::HostEvent;
use crate::surface::Surface;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        poll, read, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, window_size, Clear, ClearType,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::ops::Range;
use std::time::Duration;

/// Pixel size of a character cell when the terminal does not report one
const FALLBACK_CELL_PIXELS: (f64, f64) = (8.0, 16.0);

/// Upper half block: foreground paints the top dot, background the bottom one
const HALF_BLOCK: char = '▀';

/// A character drawn over the raster (help overlay)
#[derive(Clone, Copy)]
struct Glyph {
    ch: char,
    fg: Color,
}

/// Terminal drawing surface.
///
/// Each character cell holds two vertically stacked dots, so the raster is
/// `width x 2*height` dots. Pixel coordinates are mapped onto dots using the
/// terminal's reported pixel size per character cell.
pub struct Terminal {
    width: u16,
    height: u16,
    dots: Vec<Rgb>,
    overlay: Vec<Option<Glyph>>,
    background: Rgb,
    /// Pixels per character column
    px_per_col: f64,
    /// Pixels per dot row (half a character row)
    px_per_dot: f64,
    available: bool,
    alternate_screen: bool,
}

impl Terminal {
    /// Initialize the terminal for drawing
    pub fn new(alternate_screen: bool, background: Rgb) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
        }

        let mut term = Self::detached(width, height, background);
        term.alternate_screen = alternate_screen;
        term.available = true;
        term.refresh_metrics();
        Ok(term)
    }

    /// Off-screen terminal buffer that never touches the real tty
    pub(crate) fn detached(width: u16, height: u16, background: Rgb) -> Self {
        let cells = width as usize * height as usize;
        Self {
            width,
            height,
            dots: vec![background; cells * 2],
            overlay: vec![None; cells],
            background,
            px_per_col: FALLBACK_CELL_PIXELS.0,
            px_per_dot: FALLBACK_CELL_PIXELS.1 / 2.0,
            available: true,
            alternate_screen: false,
        }
    }

    /// Get terminal dimensions in characters
    pub fn char_size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Re-read pixel metrics from the tty
    fn refresh_metrics(&mut self) {
        let (cw, ch) = match window_size() {
            Ok(ws) if ws.width > 0 && ws.height > 0 && ws.columns > 0 && ws.rows > 0 => (
                ws.width as f64 / ws.columns as f64,
                ws.height as f64 / ws.rows as f64,
            ),
            _ => FALLBACK_CELL_PIXELS,
        };
        self.px_per_col = cw;
        self.px_per_dot = ch / 2.0;
    }

    /// Resize the buffers for a new character size
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        log::info!("terminal resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
        let cells = width as usize * height as usize;
        self.dots = vec![self.background; cells * 2];
        self.overlay = vec![None; cells];
        if self.alternate_screen {
            self.refresh_metrics();
        }
    }

    /// Pick up the current tty size. A failed query marks the surface
    /// unavailable until the next successful one.
    pub fn sync_size(&mut self) -> io::Result<()> {
        match size() {
            Ok((w, h)) => {
                if (w, h) != (self.width, self.height) {
                    self.resize(w, h);
                    self.clear_screen()?;
                }
                self.available = true;
            }
            Err(e) => {
                if self.available {
                    log::warn!("terminal size unavailable: {}", e);
                }
                self.available = false;
            }
        }
        Ok(())
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    /// Pixel position at the centre of a character cell
    pub fn pointer_position(&self, column: u16, row: u16) -> (f64, f64) {
        (
            (column as f64 + 0.5) * self.px_per_col,
            (row as f64 + 0.5) * self.px_per_dot * 2.0,
        )
    }

    /// Set a character at position, drawn on top of the raster
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.overlay[y as usize * self.width as usize + x as usize] = Some(Glyph { ch, fg });
        }
    }

    #[cfg(test)]
    pub(crate) fn glyph_at(&self, x: usize, y: usize) -> Option<char> {
        self.overlay[y * self.width as usize + x].map(|g| g.ch)
    }

    fn dot_rows(&self) -> usize {
        self.height as usize * 2
    }

    fn dot(&self, x: usize, y: usize) -> Rgb {
        self.dots[y * self.width as usize + x]
    }

    /// Write the raster and overlay to the screen
    pub fn present(&self) -> io::Result<()> {
        let mut out = stdout();
        let mut last: Option<(Color, Color)> = None;

        for row in 0..self.height as usize {
            queue!(out, MoveTo(0, row as u16))?;
            for col in 0..self.width as usize {
                let (ch, fg, bg): (char, Color, Color) = match self.overlay[row * self.width as usize + col] {
                    Some(glyph) => (glyph.ch, glyph.fg, self.background.into()),
                    None => (
                        HALF_BLOCK,
                        self.dot(col, row * 2).into(),
                        self.dot(col, row * 2 + 1).into(),
                    ),
                };
                if last != Some((fg, bg)) {
                    queue!(out, SetForegroundColor(fg), SetBackgroundColor(bg))?;
                    last = Some((fg, bg));
                }
                queue!(out, Print(ch))?;
            }
        }

        queue!(out, ResetColor)?;
        out.flush()?;
        Ok(())
    }

    /// Check for an input event (non-blocking when `timeout` is zero)
    pub fn poll_event(&self, timeout: Duration) -> io::Result<Option<HostEvent>> {
        if !poll(timeout)? {
            return Ok(None);
        }
        let event = match read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(HostEvent::Key(key.code, key.modifiers)),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    let (x, y) = self.pointer_position(mouse.column, mouse.row);
                    Some(HostEvent::PointerMoved { x, y })
                }
                _ => None,
            },
            Event::Resize(w, h) => Some(HostEvent::Resized(w, h)),
            _ => None,
        };
        Ok(event)
    }
}

/// Dots of one axis whose centres fall inside `[start, start + len)`
fn covered_dots(start: f64, len: f64, step: f64, limit: usize) -> Range<usize> {
    let first = (start / step - 0.5).ceil().max(0.0) as usize;
    let end = ((start + len) / step - 0.5).ceil().max(0.0) as usize;
    first.min(limit)..end.min(limit)
}

impl Surface for Terminal {
    fn size(&self) -> Option<(u32, u32)> {
        if !self.available {
            return None;
        }
        let w = (self.width as f64 * self.px_per_col).round() as u32;
        let h = (self.dot_rows() as f64 * self.px_per_dot).round() as u32;
        Some((w, h))
    }

    fn clear(&mut self) {
        self.dots.fill(self.background);
        self.overlay.fill(None);
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb) {
        let cols = covered_dots(x as f64, width as f64, self.px_per_col, self.width as usize);
        let rows = covered_dots(y as f64, height as f64, self.px_per_dot, self.dot_rows());
        let stride = self.width as usize;
        for dy in rows {
            self.dots[dy * stride + cols.start..dy * stride + cols.end].fill(color);
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), ResetColor, Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

/// Mouse reporting is on while this guard lives
pub struct MouseCaptureGuard;

impl MouseCaptureGuard {
    pub fn enable() -> io::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for MouseCaptureGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableMouseCapture);
    }
}
