use super::*;

#[test]
fn targets_accept_single_ids_and_collections() {
    let a = Animation::create(ObjectId(3));
    assert_eq!(a.targets, Targets(vec![ObjectId(3)]));

    let ids = vec![ObjectId(1), ObjectId(2)];
    let b = Animation::fade_out(&ids);
    assert_eq!(b.targets.0, ids);

    let c = Animation::write([ObjectId(4), ObjectId(5)]);
    assert_eq!(c.targets.0.len(), 2);
}

#[test]
fn default_ease_is_smooth_unless_overridden() {
    assert_eq!(Animation::create(ObjectId(0)).ease_or_default(), Ease::Smooth);
    assert_eq!(
        Animation::shift(ObjectId(0), Vec2::new(1.0, 0.0))
            .eased(Ease::OutCubic)
            .ease_or_default(),
        Ease::OutCubic
    );
    assert_eq!(
        Animation::move_along(ObjectId(0), vec![Point::ZERO]).ease_or_default(),
        Ease::Linear
    );
}

#[test]
fn only_entrances_introduce() {
    assert!(Animation::create(ObjectId(0)).introduces());
    assert!(Animation::fade_in(ObjectId(0)).introduces());
    assert!(!Animation::fade_out(ObjectId(0)).introduces());
    assert!(!Animation::indicate(ObjectId(0)).introduces());
}
