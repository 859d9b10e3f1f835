use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::clock::FrameClock;
use crate::config::FieldConfig;
use crate::field::{self, Frame};
use crate::foundation::core::{FrameIndex, GridDims};
use crate::foundation::error::RippleResult;
use crate::palette::Palette;
use crate::schedule::Scheduler;

/// State shared between the session handle and its scheduler callback.
#[derive(Debug)]
struct SessionState {
    clock: FrameClock,
    dims: GridDims,
    palette: Palette,
    current: Frame,
    renders: u64,
}

impl SessionState {
    fn new(dims: GridDims, palette: Palette) -> Self {
        let current = field::render(FrameIndex(0), dims, &palette);
        Self {
            clock: FrameClock::new(),
            dims,
            palette,
            current,
            renders: 1,
        }
    }

    fn on_tick(&mut self, delta_ms: f64) {
        let Some(frame) = self.clock.advance(delta_ms) else {
            return;
        };
        self.current = field::render(frame, self.dims, &self.palette);
        self.renders += 1;
    }
}

/// One running animation: a frame clock registered with a host scheduler, plus the field rendered
/// for the current frame.
///
/// The frame is re-rendered synchronously inside the tick that advances the clock. Dropping the
/// session cancels the scheduler registration.
pub struct AnimationSession<S: Scheduler> {
    state: Rc<RefCell<SessionState>>,
    scheduler: S,
}

impl<S: Scheduler> AnimationSession<S> {
    /// Validate `config`, render frame 0 and register with `scheduler`.
    pub fn start(config: &FieldConfig, scheduler: S) -> RippleResult<Self> {
        let dims = config.dims()?;
        Ok(Self::launch(dims, config.palette.clone(), scheduler))
    }

    fn launch(dims: GridDims, palette: Palette, mut scheduler: S) -> Self {
        let state = Rc::new(RefCell::new(SessionState::new(dims, palette)));

        let weak: Weak<RefCell<SessionState>> = Rc::downgrade(&state);
        scheduler.schedule(Box::new(move |delta_ms| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().on_tick(delta_ms);
            }
        }));
        tracing::debug!(rows = dims.rows, cols = dims.cols, "animation session started");

        Self { state, scheduler }
    }

    pub fn frame(&self) -> FrameIndex {
        self.state.borrow().current.frame
    }

    pub fn dims(&self) -> GridDims {
        self.state.borrow().dims
    }

    /// Borrow the field rendered for the current frame.
    ///
    /// The borrow must be released before the scheduler fires again.
    pub fn current_frame(&self) -> Ref<'_, Frame> {
        Ref::map(self.state.borrow(), |s| &s.current)
    }

    /// Owned copy of the current frame.
    pub fn snapshot(&self) -> Frame {
        self.state.borrow().current.clone()
    }

    /// Number of field renders performed, including the initial frame.
    pub fn render_count(&self) -> u64 {
        self.state.borrow().renders
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<S: Scheduler + Default> AnimationSession<S> {
    /// Cancel the registration and hand the scheduler back for reuse.
    pub fn teardown(mut self) -> S {
        let mut scheduler = std::mem::take(&mut self.scheduler);
        scheduler.cancel();
        scheduler
    }

    /// Tear down and start a fresh session on the same scheduler, back at frame 0.
    pub fn restart(self) -> Self {
        let (dims, palette) = {
            let s = self.state.borrow();
            (s.dims, s.palette.clone())
        };
        let scheduler = self.teardown();
        Self::launch(dims, palette, scheduler)
    }
}

impl<S: Scheduler> Drop for AnimationSession<S> {
    fn drop(&mut self) {
        self.scheduler.cancel();
        tracing::debug!(frame = self.frame().0, "animation session torn down");
    }
}

impl<S: Scheduler> std::fmt::Debug for AnimationSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSession")
            .field("frame", &self.frame())
            .field("dims", &self.dims())
            .field("scheduled", &self.scheduler.is_scheduled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ManualScheduler;

    fn small() -> FieldConfig {
        FieldConfig {
            rows: 4,
            cols: 10,
            palette: Palette::default(),
        }
    }

    #[test]
    fn start_renders_frame_zero_and_registers() {
        let host = ManualScheduler::new();
        let s = AnimationSession::start(&small(), host.clone()).unwrap();
        assert_eq!(s.frame(), FrameIndex(0));
        assert_eq!(s.render_count(), 1);
        assert!(host.is_scheduled());
        assert_eq!(s.current_frame().rows.len(), 4);
    }

    #[test]
    fn renders_once_per_increment() {
        let host = ManualScheduler::new();
        let s = AnimationSession::start(&small(), host.clone()).unwrap();

        host.fire_all(&[16.0; 10]);
        assert_eq!(s.frame(), FrameIndex(0));
        assert_eq!(s.render_count(), 1);

        host.fire_all(&[16.0; 2]);
        assert_eq!(s.frame(), FrameIndex(1));
        assert_eq!(s.render_count(), 2);
        assert_eq!(
            *s.current_frame(),
            field::render(FrameIndex(1), s.dims(), &Palette::default())
        );
    }

    #[test]
    fn invalid_config_does_not_register() {
        let host = ManualScheduler::new();
        let cfg = FieldConfig {
            rows: 0,
            ..small()
        };
        assert!(AnimationSession::start(&cfg, host.clone()).is_err());
        assert!(!host.is_scheduled());
    }

    #[test]
    fn drop_cancels_registration() {
        let host = ManualScheduler::new();
        {
            let _s = AnimationSession::start(&small(), host.clone()).unwrap();
            assert!(host.is_scheduled());
        }
        assert!(!host.is_scheduled());
        assert!(!host.fire(500.0));
    }

    #[test]
    fn restart_returns_to_frame_zero() {
        let host = ManualScheduler::new();
        let s = AnimationSession::start(&small(), host.clone()).unwrap();
        let first = s.snapshot();

        host.fire_all(&[200.0, 200.0, 200.0]);
        assert_eq!(s.frame(), FrameIndex(3));

        let s = s.restart();
        assert!(host.is_scheduled());
        assert_eq!(s.frame(), FrameIndex(0));
        assert_eq!(s.snapshot(), first);

        host.fire(200.0);
        assert_eq!(s.frame(), FrameIndex(1));
    }
}
