use super::*;

#[test]
fn segments_are_proportional_and_contiguous() {
    let spans = segment_layout(-4.0, 8.0, &[1.0, 1.0, 2.0]).unwrap();
    assert_eq!(spans.len(), 3);
    assert_eq!(spans[0].start, -4.0);
    assert_eq!(spans[0].width, 2.0);
    assert_eq!(spans[1].start, -2.0);
    assert_eq!(spans[2].width, 4.0);
    assert_eq!(spans[2].end(), 4.0);
}

#[test]
fn bad_ratios_are_rejected() {
    assert!(segment_layout(0.0, 4.0, &[]).is_err());
    assert!(segment_layout(0.0, 4.0, &[1.0, 0.0]).is_err());
    assert!(segment_layout(0.0, 4.0, &[1.0, f64::NAN]).is_err());
    assert!(segment_layout(0.0, 0.0, &[1.0]).is_err());
}

#[test]
fn quantity_bars_share_a_left_edge() {
    let bars = quantity_bars(-5.0, 0.5, &[14, 9]).unwrap();
    assert_eq!(bars[0].start, bars[1].start);
    assert_eq!(bars[0].width, 7.0);
    assert_eq!(bars[1].width, 4.5);

    let diff = difference_span(bars[0], bars[1]).unwrap();
    assert_eq!(diff.start, bars[1].end());
    assert_eq!(diff.width, 2.5);
}

#[test]
fn equal_bars_have_no_difference() {
    let bars = quantity_bars(0.0, 1.0, &[3, 3]).unwrap();
    assert!(difference_span(bars[0], bars[1]).is_none());
}

#[test]
fn span_rect_is_centered_on_y() {
    let r = Span {
        start: 1.0,
        width: 2.0,
    }
    .to_rect(0.5, 0.5);
    assert_eq!(r, Rect::new(1.0, 0.25, 3.0, 0.75));
}
