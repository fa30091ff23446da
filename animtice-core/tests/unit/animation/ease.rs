use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn input_is_clamped() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn smooth_is_symmetric() {
    let e = Ease::Smooth;
    assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
    assert!((e.apply(0.2) + e.apply(0.8) - 1.0).abs() < 1e-12);
}
