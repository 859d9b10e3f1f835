use ripple::{FrameIndex, GridDims, MAX_OPACITY, MIN_OPACITY, Palette, render};

#[test]
fn render_is_deterministic() {
    let dims = GridDims::default();
    let palette = Palette::default();
    for f in [0u64, 1, 17, 600, 1_000_000] {
        let a = render(FrameIndex(f), dims, &palette);
        let b = render(FrameIndex(f), dims, &palette);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap()
        );
    }
}

#[test]
fn cells_stay_within_palette_and_opacity_bounds() {
    let dims = GridDims::default();
    for palette in [
        Palette::default(),
        Palette::new("AB").unwrap(),
        Palette::new("#").unwrap(),
        Palette::new(" .:-=+*%@").unwrap(),
    ] {
        for f in 0..60u64 {
            let frame = render(FrameIndex(f * 7), dims, &palette);
            assert_eq!(frame.rows.len(), dims.rows);
            for row in &frame.rows {
                assert_eq!(row.text.chars().count(), dims.cols);
                assert!(row.opacity >= MIN_OPACITY && row.opacity <= MAX_OPACITY);
            }
            for cell in frame.cells() {
                assert!(palette.glyphs().contains(&cell.glyph));
                assert!(cell.opacity >= MIN_OPACITY && cell.opacity <= MAX_OPACITY);
            }
        }
    }
}

#[test]
fn single_cell_scenario() {
    let frame = render(
        FrameIndex(0),
        GridDims { rows: 1, cols: 1 },
        &Palette::new("AB").unwrap(),
    );
    assert_eq!(frame.to_text(), "B");
    assert!((frame.rows[0].opacity - 0.623).abs() < 1e-3);
}

#[test]
fn consecutive_frames_differ() {
    let dims = GridDims { rows: 10, cols: 30 };
    let palette = Palette::default();
    let a = render(FrameIndex(0), dims, &palette);
    let b = render(FrameIndex(1), dims, &palette);
    assert_ne!(a.to_text(), b.to_text());
}

#[test]
fn json_dump_carries_rows_and_opacity() {
    let frame = render(
        FrameIndex(2),
        GridDims { rows: 2, cols: 3 },
        &Palette::default(),
    );
    let v: serde_json::Value = serde_json::to_value(&frame).unwrap();
    assert_eq!(v["frame"], 2);
    assert_eq!(v["dims"]["rows"], 2);
    let rows = v["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0]["text"].is_string());
    assert!(rows[0]["opacity"].is_f64());
    assert!(rows[0].get("cells").is_none());
}
