//! Procedural water field.
//!
//! Every cell is a closed-form function of its position and the frame counter: three sinusoids at
//! different spatial and temporal frequencies are summed into a wave value, which selects a glyph
//! and an opacity. Frames are recomputed wholesale; nothing carries over between calls.

use std::f64::consts::TAU;

use crate::foundation::core::{FrameIndex, GridDims};
use crate::palette::Palette;

/// Normalized coordinate of the ripple centre on both axes.
const CENTER: f64 = 0.5;

/// Frame divisors of the three oscillators.
const T1_DIV: f64 = 6.7;
const T2_DIV: f64 = 8.3;
const T3_DIV: f64 = 13.3;

pub const MIN_OPACITY: f64 = 0.2;
pub const MAX_OPACITY: f64 = 0.8;

/// One rendered cell.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Cell {
    pub glyph: char,
    /// In `[MIN_OPACITY, MAX_OPACITY]`.
    pub opacity: f64,
}

/// One rendered line of the field.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Row {
    /// Glyphs of the row, left to right.
    pub text: String,
    /// Mean of the cell opacities (0 for an empty row).
    pub opacity: f64,
    #[serde(skip)]
    pub cells: Vec<Cell>,
}

/// A full frame of the field.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Frame {
    pub frame: FrameIndex,
    pub dims: GridDims,
    pub rows: Vec<Row>,
}

impl Frame {
    /// Rows joined by newlines, without opacity.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&row.text);
        }
        out
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flat_map(|r| r.cells.iter())
    }
}

/// Per-frame time terms, computed once per render.
#[derive(Clone, Copy, Debug)]
struct Phase {
    t1: f64,
    t2: f64,
    t3: f64,
}

impl Phase {
    fn at(frame: FrameIndex) -> Self {
        let f = frame.as_f64();
        Self {
            t1: f / T1_DIV,
            t2: f / T2_DIV,
            t3: f / T3_DIV,
        }
    }
}

/// Wave value at a cell, in `[-3, 3]`.
fn wave(x: f64, y: f64, x_norm: f64, dist: f64, phase: Phase) -> f64 {
    (x / 3.0 + y / 5.0 + phase.t1 + dist * 10.0).sin()
        + (x / 4.0 - y / 3.0 - phase.t2).cos()
        + (phase.t3 + x_norm * TAU).sin()
}

fn glyph_index(wave: f64, dist: f64, palette_len: usize) -> usize {
    let len = palette_len as f64;
    let v = ((wave + 2.0) * (len / 4.0) + dist * 5.0).abs().floor();
    // `v` is finite and non-negative, so the cast cannot wrap.
    (v as u64 % palette_len as u64) as usize
}

fn opacity(wave: f64, dist: f64) -> f64 {
    (1.0 - dist + wave.sin() / 3.0).clamp(MIN_OPACITY, MAX_OPACITY)
}

fn cell_with_phase(x: usize, y: usize, dims: GridDims, palette: &Palette, phase: Phase) -> Cell {
    let x_norm = x as f64 / dims.cols as f64;
    let y_norm = y as f64 / dims.rows as f64;
    let dx = x_norm - CENTER;
    let dy = y_norm - CENTER;
    let dist = (dx * dx + dy * dy).sqrt();

    let w = wave(x as f64, y as f64, x_norm, dist, phase);
    Cell {
        glyph: palette.glyph(glyph_index(w, dist, palette.len())),
        opacity: opacity(w, dist),
    }
}

/// Sample a single cell of the field at `frame`.
///
/// `x` and `y` are expected to lie inside `dims`; positions outside are still computed with the
/// same formula.
pub fn sample_cell(frame: FrameIndex, x: usize, y: usize, dims: GridDims, palette: &Palette) -> Cell {
    cell_with_phase(x, y, dims, palette, Phase::at(frame))
}

/// Render the full field for `frame`.
///
/// Pure: identical inputs always produce identical output.
#[tracing::instrument(level = "trace", skip(palette))]
pub fn render(frame: FrameIndex, dims: GridDims, palette: &Palette) -> Frame {
    let phase = Phase::at(frame);
    let mut rows = Vec::with_capacity(dims.rows);

    for y in 0..dims.rows {
        let mut text = String::with_capacity(dims.cols * 3);
        let mut cells = Vec::with_capacity(dims.cols);
        let mut opacity_sum = 0.0;

        for x in 0..dims.cols {
            let cell = cell_with_phase(x, y, dims, palette, phase);
            opacity_sum += cell.opacity;
            text.push(cell.glyph);
            cells.push(cell);
        }

        let opacity = if cells.is_empty() {
            0.0
        } else {
            opacity_sum / cells.len() as f64
        };
        rows.push(Row {
            text,
            opacity,
            cells,
        });
    }

    Frame { frame, dims, rows }
}
