use super::*;

#[test]
fn frame_index_next_saturates() {
    assert_eq!(FrameIndex(0).next(), FrameIndex(1));
    assert_eq!(FrameIndex(u64::MAX).next(), FrameIndex(u64::MAX));
}

#[test]
fn grid_dims_rejects_zero() {
    assert!(GridDims::new(0, 10).is_err());
    assert!(GridDims::new(10, 0).is_err());
    let d = GridDims::new(3, 4).unwrap();
    assert_eq!(d.cell_count(), 12);
}

#[test]
fn grid_dims_default_matches_constants() {
    let d = GridDims::default();
    assert_eq!(d.rows, DEFAULT_ROWS);
    assert_eq!(d.cols, DEFAULT_COLS);
}
