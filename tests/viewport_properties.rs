use canvas_editor::{EditorConfig, Viewport};
use egui::{Pos2, Vec2};

fn assert_close(a: Pos2, b: Pos2) {
    assert!(
        (a.x - b.x).abs() < 0.001 && (a.y - b.y).abs() < 0.001,
        "{a:?} != {b:?}"
    );
}

#[test]
fn test_round_trip_after_pan_and_zoom() {
    let mut viewport = Viewport::default();
    let probes = [
        Pos2::new(0.0, 0.0),
        Pos2::new(123.5, -42.0),
        Pos2::new(-900.0, 310.25),
    ];

    let steps: [(Vec2, Pos2, f32); 5] = [
        (Vec2::new(10.0, -5.0), Pos2::new(200.0, 100.0), 1.1),
        (Vec2::new(-300.0, 40.0), Pos2::new(0.0, 0.0), 1.0 / 1.1),
        (Vec2::ZERO, Pos2::new(640.0, 480.0), 3.0),
        (Vec2::new(7.5, 7.5), Pos2::new(12.0, 900.0), 0.25),
        (Vec2::new(1000.0, -1000.0), Pos2::new(50.0, 50.0), 100.0),
    ];

    for (pan, anchor, factor) in steps {
        viewport.pan_by(pan);
        viewport.zoom_at(anchor, factor);
        for probe in probes {
            assert_close(viewport.to_world(viewport.to_screen(probe)), probe);
        }
    }
}

#[test]
fn test_zoom_keeps_anchor_fixed() {
    let mut viewport = Viewport::default();
    viewport.pan_by(Vec2::new(37.0, -12.0));

    for (anchor, factor) in [
        (Pos2::new(300.0, 200.0), 1.1),
        (Pos2::new(-50.0, 75.0), 0.5),
        (Pos2::new(800.0, 10.0), 2.0),
    ] {
        let before = viewport.to_world(anchor);
        viewport.zoom_at(anchor, factor);
        assert_close(viewport.to_world(anchor), before);
    }
}

#[test]
fn test_clamped_zoom_keeps_anchor_fixed() {
    let mut viewport = Viewport::default();
    let anchor = Pos2::new(250.0, 125.0);
    let before = viewport.to_world(anchor);

    viewport.zoom_at(anchor, 50.0);
    assert_eq!(viewport.scale(), 5.0);
    assert_close(viewport.to_world(anchor), before);

    viewport.zoom_at(anchor, 0.0001);
    assert!((viewport.scale() - 0.1).abs() < 1e-6);
    assert_close(viewport.to_world(anchor), before);
}

#[test]
fn test_zoom_bounds_come_from_config() {
    let config = EditorConfig::from_json_str(r#"{ "min_zoom": 0.5, "max_zoom": 2.0 }"#).unwrap();
    let mut viewport = Viewport::new(&config);
    viewport.zoom_at(Pos2::ZERO, 10.0);
    assert_eq!(viewport.scale(), 2.0);
    viewport.zoom_at(Pos2::ZERO, 0.01);
    assert_eq!(viewport.scale(), 0.5);
}

#[test]
fn test_initial_scale_respects_zoom_bounds() {
    let config = EditorConfig::from_json_str(r#"{ "min_zoom": 2.0, "max_zoom": 4.0 }"#).unwrap();
    let mut viewport = Viewport::new(&config);
    assert_eq!(viewport.scale(), 2.0);

    viewport.zoom_at(Pos2::new(10.0, 10.0), 1.5);
    assert_eq!(viewport.scale(), 3.0);
    viewport.reset();
    assert_eq!(viewport.scale(), 2.0);
    assert_eq!(viewport.pan(), Vec2::ZERO);

    let config = EditorConfig::from_json_str(r#"{ "min_zoom": 0.2, "max_zoom": 0.5 }"#).unwrap();
    assert_eq!(Viewport::new(&config).scale(), 0.5);
}
