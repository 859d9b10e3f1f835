//! Ripple renders a looping ASCII water-ripple animation.
//!
//! - [`field::render`] maps a frame counter to a grid of glyphs and opacities.
//! - [`FrameClock`] steps the frame counter at a fixed cadence from host refresh deltas.
//! - [`AnimationSession`] ties both to a [`Scheduler`] and keeps the current frame.
#![forbid(unsafe_code)]

mod foundation;

pub mod clock;
pub mod config;
pub mod field;
pub mod palette;
pub mod schedule;
pub mod session;
pub mod surface;

pub use crate::clock::{FrameClock, UPDATE_THRESHOLD_MS};
pub use crate::config::FieldConfig;
pub use crate::field::{Cell, Frame, MAX_OPACITY, MIN_OPACITY, Row, render, sample_cell};
pub use crate::foundation::core::{DEFAULT_COLS, DEFAULT_ROWS, FrameIndex, GridDims};
pub use crate::foundation::error::{RippleError, RippleResult};
pub use crate::palette::{DEFAULT_PALETTE, Palette};
pub use crate::schedule::{FrameCallback, ManualScheduler, RealtimeScheduler, Scheduler};
pub use crate::session::AnimationSession;
pub use crate::surface::{BACKGROUND, FOREGROUND, Rgb8, TerminalSurface, shade};
