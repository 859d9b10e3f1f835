use ripple::{AnimationSession, FieldConfig, FrameIndex, ManualScheduler, Palette, Scheduler};

fn config() -> FieldConfig {
    FieldConfig {
        rows: 6,
        cols: 20,
        palette: Palette::default(),
    }
}

#[test]
fn clock_cadence_through_scheduler() {
    let host = ManualScheduler::new();
    let session = AnimationSession::start(&config(), host.clone()).unwrap();

    host.fire_all(&[100.0, 100.0]);
    assert_eq!(session.frame(), FrameIndex(1));
    host.fire(100.0);
    assert_eq!(session.frame(), FrameIndex(1));
    host.fire(100.0);
    assert_eq!(session.frame(), FrameIndex(2));

    host.fire_all(&[-50.0, f64::NAN, f64::INFINITY]);
    assert_eq!(session.frame(), FrameIndex(2));
}

#[test]
fn high_refresh_and_low_refresh_hosts_share_cadence() {
    let fast = ManualScheduler::new();
    let slow = ManualScheduler::new();
    let a = AnimationSession::start(&config(), fast.clone()).unwrap();
    let b = AnimationSession::start(&config(), slow.clone()).unwrap();

    // One second of wall time at 120 Hz and at 30 Hz.
    fast.fire_all(&[1000.0 / 120.0; 120]);
    slow.fire_all(&[1000.0 / 30.0; 30]);

    assert_eq!(a.frame(), FrameIndex(6));
    assert_eq!(b.frame(), FrameIndex(6));
}

#[test]
fn teardown_unregisters_and_restart_reproduces_frame_zero() {
    let host = ManualScheduler::new();
    let session = AnimationSession::start(&config(), host.clone()).unwrap();
    let frame_zero = session.snapshot();

    host.fire_all(&[170.0; 4]);
    assert_eq!(session.frame(), FrameIndex(4));

    let scheduler = session.teardown();
    assert!(!scheduler.is_scheduled());
    assert!(!host.fire(500.0));

    let session = AnimationSession::start(&config(), scheduler).unwrap();
    assert_eq!(session.frame(), FrameIndex(0));
    assert_eq!(session.snapshot(), frame_zero);
    assert!(host.is_scheduled());
}
