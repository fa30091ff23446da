use super::*;

#[test]
fn empty_channel_returns_default() {
    let k = Keyframes::constant(0.25);
    assert_eq!(k.sample(FrameIndex(0)), 0.25);
    assert_eq!(k.sample(FrameIndex(1000)), 0.25);
}

#[test]
fn linear_segment_interpolates_and_holds_ends() {
    let mut k = Keyframes::constant(1.0);
    k.segment(FrameIndex(10), FrameIndex(20), 0.0, 10.0, Ease::Linear)
        .unwrap();
    assert_eq!(k.sample(FrameIndex(0)), 0.0);
    assert_eq!(k.sample(FrameIndex(10)), 0.0);
    assert_eq!(k.sample(FrameIndex(15)), 5.0);
    assert_eq!(k.sample(FrameIndex(20)), 10.0);
    assert_eq!(k.sample(FrameIndex(99)), 10.0);
}

#[test]
fn later_key_at_same_frame_wins() {
    let mut k = Keyframes::constant(0.0);
    k.segment(FrameIndex(0), FrameIndex(10), 0.0, 1.0, Ease::Linear)
        .unwrap();
    k.segment(FrameIndex(10), FrameIndex(20), 1.0, 0.0, Ease::Linear)
        .unwrap();
    assert_eq!(k.sample(FrameIndex(10)), 1.0);
    assert_eq!(k.sample(FrameIndex(15)), 0.5);
    assert!(k.validate().is_ok());
}

#[test]
fn ease_of_earlier_key_shapes_the_segment() {
    let mut k = Keyframes::constant(0.0);
    k.segment(FrameIndex(0), FrameIndex(10), 0.0, 1.0, Ease::InQuad)
        .unwrap();
    assert!((k.sample(FrameIndex(5)) - 0.25).abs() < 1e-12);
}

#[test]
fn out_of_order_push_is_rejected() {
    let mut k = Keyframes::constant(Vec2::ZERO);
    k.push(FrameIndex(5), Vec2::new(1.0, 0.0), Ease::Linear)
        .unwrap();
    assert!(k.push(FrameIndex(4), Vec2::ZERO, Ease::Linear).is_err());
}

#[test]
fn vec2_channels_interpolate_componentwise() {
    let mut k = Keyframes::constant(Vec2::ZERO);
    k.segment(
        FrameIndex(0),
        FrameIndex(4),
        Vec2::new(0.0, 0.0),
        Vec2::new(4.0, -8.0),
        Ease::Linear,
    )
    .unwrap();
    assert_eq!(k.sample(FrameIndex(1)), Vec2::new(1.0, -2.0));
    assert_eq!(k.keys.len(), 2);
}
