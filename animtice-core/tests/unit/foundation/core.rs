use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_rejects_reversed_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn fps_rounds_seconds_to_nearest_frame() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_round(0.7), 21);
    assert_eq!(fps.secs_to_frames_round(0.01), 0);
    assert_eq!(Fps::new(30000, 1001).unwrap().whole_fps(), 30);
    assert!(Fps::new(0, 1).is_err());
}

#[test]
fn hex_colors_parse_and_print() {
    let c = Rgba8::from_hex("#58C4DD").unwrap();
    assert_eq!(c, Rgba8::BLUE);
    assert_eq!(c.to_svg_hex(), "#58c4dd");

    let translucent = Rgba8::from_hex("ff000080").unwrap();
    assert_eq!(translucent.a, 0x80);
    assert_eq!(String::from(translucent), "#ff000080");

    assert!(Rgba8::from_hex("#12345").is_err());
    assert!(Rgba8::from_hex("#zzzzzz").is_err());
}

#[test]
fn colors_deserialize_from_hex_strings() {
    let c: Rgba8 = serde_json::from_str("\"#fc6255\"").unwrap();
    assert_eq!(c, Rgba8::RED);
    assert!(serde_json::from_str::<Rgba8>("\"red\"").is_err());
}

#[test]
fn viewport_maps_scene_origin_to_canvas_center() {
    let vp = Viewport::new(Canvas {
        width: 1600,
        height: 800,
    });
    assert_eq!(vp.pixels_per_unit(), 100.0);
    assert_eq!(vp.frame_width_units(), 16.0);

    let center = vp.to_pixels() * Point::ORIGIN;
    assert_eq!(center, Point::new(800.0, 400.0));

    let top_left = vp.to_pixels() * Point::new(-8.0, 4.0);
    assert!((top_left.x - 0.0).abs() < 1e-9);
    assert!((top_left.y - 0.0).abs() < 1e-9);
}
