//! Terminal presentation of rendered frames.
//!
//! Rows are drawn as stacked lines centred in the terminal. A terminal has no per-line alpha, so
//! each row's opacity is expressed by blending the foreground colour over the background.

use std::io::Write;

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate},
};

use crate::field::Frame;
use crate::foundation::core::GridDims;
use crate::foundation::error::RippleResult;

/// Straight 8-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend `self` over `under` with coverage `alpha` (clamped to `[0, 1]`).
    pub fn over(self, under: Self, alpha: f64) -> Self {
        let a = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
        fn mix(top: u8, bottom: u8, a: f64) -> u8 {
            let v = f64::from(bottom) + (f64::from(top) - f64::from(bottom)) * a;
            v.round().clamp(0.0, 255.0) as u8
        }
        Self {
            r: mix(self.r, under.r, a),
            g: mix(self.g, under.g, a),
            b: mix(self.b, under.b, a),
        }
    }

    fn to_crossterm(self) -> Color {
        Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Glyph colour at full opacity.
pub const FOREGROUND: Rgb8 = Rgb8::new(0xa3, 0xc4, 0xf3);
/// Surface colour behind the field.
pub const BACKGROUND: Rgb8 = Rgb8::new(0x1a, 0x1a, 0x2e);

/// Colour of a row drawn with `opacity`.
pub fn shade(opacity: f64) -> Rgb8 {
    FOREGROUND.over(BACKGROUND, opacity)
}

/// Where a frame lands inside a viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Column of the first drawn glyph.
    pub x: u16,
    /// Row of the first drawn line.
    pub y: u16,
    pub visible_rows: usize,
    pub visible_cols: usize,
}

/// Centre `dims` in a `viewport_cols` x `viewport_rows` viewport, clipping what does not fit.
pub fn place(dims: GridDims, viewport_cols: u16, viewport_rows: u16) -> Placement {
    let vc = usize::from(viewport_cols);
    let vr = usize::from(viewport_rows);
    let visible_cols = dims.cols.min(vc);
    let visible_rows = dims.rows.min(vr);
    Placement {
        x: ((vc - visible_cols) / 2) as u16,
        y: ((vr - visible_rows) / 2) as u16,
        visible_rows,
        visible_cols,
    }
}

/// Draws frames onto a terminal-like writer.
pub struct TerminalSurface<W: Write> {
    out: W,
    viewport: (u16, u16),
    entered: bool,
}

impl<W: Write> TerminalSurface<W> {
    /// Wrap `out` without touching terminal modes. `viewport` is `(cols, rows)`.
    pub fn new(out: W, viewport: (u16, u16)) -> Self {
        Self {
            out,
            viewport,
            entered: false,
        }
    }

    /// Switch to the alternate screen in raw mode with a hidden cursor, sized to the terminal.
    ///
    /// The terminal is restored when the surface is dropped.
    pub fn enter(out: W) -> RippleResult<Self> {
        let viewport = terminal::size()?;
        let mut surface = Self::new(out, viewport);
        terminal::enable_raw_mode()?;
        surface.entered = true;
        queue!(
            surface.out,
            terminal::EnterAlternateScreen,
            terminal::DisableLineWrap,
            cursor::Hide
        )?;
        surface.clear()?;
        tracing::debug!(cols = viewport.0, rows = viewport.1, "terminal surface entered");
        Ok(surface)
    }

    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    /// Record a new viewport size and repaint the background.
    pub fn resize(&mut self, cols: u16, rows: u16) -> RippleResult<()> {
        self.viewport = (cols, rows);
        self.clear()
    }

    fn clear(&mut self) -> RippleResult<()> {
        queue!(
            self.out,
            SetBackgroundColor(BACKGROUND.to_crossterm()),
            Clear(ClearType::All)
        )?;
        self.out.flush()?;
        Ok(())
    }

    /// Draw every visible row of `frame`, each in its opacity shade.
    pub fn draw(&mut self, frame: &Frame) -> RippleResult<()> {
        let p = place(frame.dims, self.viewport.0, self.viewport.1);

        queue!(
            self.out,
            BeginSynchronizedUpdate,
            SetBackgroundColor(BACKGROUND.to_crossterm())
        )?;
        for (i, row) in frame.rows.iter().take(p.visible_rows).enumerate() {
            let text: String = row.text.chars().take(p.visible_cols).collect();
            queue!(
                self.out,
                cursor::MoveTo(p.x, p.y + i as u16),
                SetForegroundColor(shade(row.opacity).to_crossterm()),
                Print(text)
            )?;
        }
        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(mut self) -> W
    where
        W: Default,
    {
        std::mem::take(&mut self.out)
    }
}

impl<W: Write> Drop for TerminalSurface<W> {
    fn drop(&mut self) {
        if !self.entered {
            return;
        }
        let _ = queue!(
            self.out,
            ResetColor,
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
    }
}
