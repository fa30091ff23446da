use super::*;

fn bar() -> Rect {
    Rect::new(-3.0, -0.4, 3.0, 0.4)
}

#[test]
fn bar_dividers_are_evenly_spaced() {
    let w = bar().width();
    for n in 1..=12u32 {
        let lines = bar_dividers(bar(), n, Orientation::Vertical).unwrap();
        assert_eq!(lines.len(), (n - 1) as usize);
        let step = w / f64::from(n);
        for (i, l) in lines.iter().enumerate() {
            let expected = bar().x0 + step * (i as f64 + 1.0);
            assert!((l.p0.x - expected).abs() < 1e-12);
            assert_eq!(l.p0.x, l.p1.x);
            assert_eq!(l.p0.y, bar().y0);
            assert_eq!(l.p1.y, bar().y1);
        }
        for pair in lines.windows(2) {
            assert!((pair[1].p0.x - pair[0].p0.x - step).abs() < 1e-12);
        }
    }
}

#[test]
fn horizontal_dividers_span_the_width() {
    let lines = bar_dividers(bar(), 4, Orientation::Horizontal).unwrap();
    assert_eq!(lines.len(), 3);
    assert!((lines[1].p0.y - 0.0).abs() < 1e-12);
    assert_eq!(lines[1].p0.x, -3.0);
    assert_eq!(lines[1].p1.x, 3.0);
}

#[test]
fn zero_parts_is_rejected() {
    assert!(bar_dividers(bar(), 0, Orientation::Vertical).is_err());
    assert!(part_boxes(bar(), 0, Orientation::Vertical).is_err());
    assert!(circle_spokes(Point::ORIGIN, 1.0, 0).is_err());
    assert!(refinement_dividers(bar(), 3, 0, Orientation::Vertical).is_err());
}

#[test]
fn part_boxes_tile_the_bar() {
    let boxes = part_boxes(bar(), 5, Orientation::Vertical).unwrap();
    assert_eq!(boxes.len(), 5);
    assert_eq!(boxes[0].x0, bar().x0);
    assert!((boxes[4].x1 - bar().x1).abs() < 1e-12);
    for pair in boxes.windows(2) {
        assert!((pair[0].x1 - pair[1].x0).abs() < 1e-12);
    }
    let total: f64 = boxes.iter().map(|b| b.width()).sum();
    assert!((total - bar().width()).abs() < 1e-12);
}

#[test]
fn refinement_skips_existing_boundaries() {
    let coarse = bar_dividers(bar(), 3, Orientation::Vertical).unwrap();
    let fine = refinement_dividers(bar(), 3, 2, Orientation::Vertical).unwrap();
    // 6 parts have 5 interior boundaries, 2 of them already drawn.
    assert_eq!(fine.len(), 3);
    for f in &fine {
        assert!(coarse.iter().all(|c| (c.p0.x - f.p0.x).abs() > 1e-9));
    }
    assert!(refinement_dividers(bar(), 4, 1, Orientation::Vertical)
        .unwrap()
        .is_empty());
}

#[test]
fn spokes_and_sectors_match_the_denominator() {
    let spokes = circle_spokes(Point::ORIGIN, 1.5, 4).unwrap();
    assert_eq!(spokes.len(), 4);
    assert!((spokes[1].p1.x).abs() < 1e-12);
    assert!((spokes[1].p1.y - 1.5).abs() < 1e-12);

    let sectors = circle_sectors(Point::ORIGIN, 1.5, 4).unwrap();
    assert_eq!(sectors.len(), 4);
    for s in &sectors {
        let els = s.elements();
        assert_eq!(els.first(), Some(&kurbo::PathEl::MoveTo(Point::ORIGIN)));
        assert_eq!(els.last(), Some(&kurbo::PathEl::ClosePath));
    }
}
