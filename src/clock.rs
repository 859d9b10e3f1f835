use crate::foundation::core::FrameIndex;

/// Accumulated milliseconds that must be exceeded before the frame counter steps (~6 updates/s).
pub const UPDATE_THRESHOLD_MS: f64 = 166.0;

/// Fixed-cadence frame counter fed by variable-rate host ticks.
///
/// Host deltas accumulate until they exceed [`UPDATE_THRESHOLD_MS`]; the counter then steps once
/// and the accumulator drops back to zero. Time beyond the threshold is discarded rather than
/// carried into the next step, so a slow host skips frames instead of catching up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameClock {
    frame: FrameIndex,
    accumulated_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    pub fn accumulated_ms(&self) -> f64 {
        self.accumulated_ms
    }

    /// Feed one host delta. Returns the new frame when the counter stepped.
    ///
    /// Negative and non-finite deltas are ignored.
    pub fn advance(&mut self, delta_ms: f64) -> Option<FrameIndex> {
        if !delta_ms.is_finite() || delta_ms < 0.0 {
            tracing::trace!(delta_ms, "ignoring invalid host delta");
            return None;
        }

        self.accumulated_ms += delta_ms;
        if self.accumulated_ms <= UPDATE_THRESHOLD_MS {
            return None;
        }

        self.accumulated_ms = 0.0;
        self.frame = self.frame.next();
        tracing::trace!(frame = self.frame.0, "frame advanced");
        Some(self.frame)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
