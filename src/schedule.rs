//! Host timing capability.
//!
//! A [`Scheduler`] stands in for a display-refresh callback registry: the animation registers one
//! callback that receives the elapsed milliseconds since the previous refresh, and cancels it on
//! teardown. [`ManualScheduler`] is driven with synthetic deltas; [`RealtimeScheduler`] is pumped
//! by a render loop and measures wall time itself.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

/// Callback invoked once per host refresh with the elapsed time in milliseconds.
pub type FrameCallback = Box<dyn FnMut(f64)>;

/// Registry for a single per-refresh callback.
pub trait Scheduler {
    /// Register `callback`, replacing any callback already registered.
    fn schedule(&mut self, callback: FrameCallback);

    /// Unregister the callback. No invocation happens after this returns.
    fn cancel(&mut self);

    fn is_scheduled(&self) -> bool;
}

#[derive(Default)]
struct Slot {
    callback: Option<FrameCallback>,
    generation: u64,
}

/// Scheduler fired by hand with explicit deltas.
///
/// Clones share the same registration, so a test can keep a handle while a session owns another.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    slot: Rc<RefCell<Slot>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke the registered callback with `delta_ms`. Returns `false` when nothing is registered.
    pub fn fire(&self, delta_ms: f64) -> bool {
        let (callback, generation) = {
            let mut slot = self.slot.borrow_mut();
            (slot.callback.take(), slot.generation)
        };
        let Some(mut callback) = callback else {
            return false;
        };

        callback(delta_ms);

        // The callback may have rescheduled or cancelled while it ran.
        let mut slot = self.slot.borrow_mut();
        if slot.generation == generation {
            slot.callback = Some(callback);
        }
        true
    }

    /// Fire once per delta, returning how many invocations reached a callback.
    pub fn fire_all(&self, deltas: &[f64]) -> usize {
        deltas.iter().filter(|&&d| self.fire(d)).count()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, callback: FrameCallback) {
        let mut slot = self.slot.borrow_mut();
        slot.callback = Some(callback);
        slot.generation = slot.generation.wrapping_add(1);
    }

    fn cancel(&mut self) {
        let mut slot = self.slot.borrow_mut();
        slot.callback = None;
        slot.generation = slot.generation.wrapping_add(1);
    }

    fn is_scheduled(&self) -> bool {
        self.slot.borrow().callback.is_some()
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("scheduled", &self.is_scheduled())
            .finish()
    }
}

/// Wall-clock scheduler pumped once per display refresh.
///
/// The first pump after scheduling only records the timestamp; later pumps pass the time elapsed
/// since the previous pump. Cancelling forgets the timestamp.
#[derive(Default)]
pub struct RealtimeScheduler {
    callback: Option<FrameCallback>,
    previous: Option<Instant>,
}

impl RealtimeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one refresh at `now`. Returns `true` when the callback was invoked.
    pub fn pump(&mut self, now: Instant) -> bool {
        let Some(callback) = self.callback.as_mut() else {
            return false;
        };
        let previous = self.previous.replace(now);
        let Some(previous) = previous else {
            return false;
        };

        let elapsed = now.saturating_duration_since(previous);
        callback(elapsed.as_secs_f64() * 1000.0);
        true
    }
}

impl Scheduler for RealtimeScheduler {
    fn schedule(&mut self, callback: FrameCallback) {
        self.callback = Some(callback);
        self.previous = None;
    }

    fn cancel(&mut self) {
        self.callback = None;
        self.previous = None;
    }

    fn is_scheduled(&self) -> bool {
        self.callback.is_some()
    }
}

impl std::fmt::Debug for RealtimeScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeScheduler")
            .field("scheduled", &self.is_scheduled())
            .field("previous", &self.previous)
            .finish()
    }
}
