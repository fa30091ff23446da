use super::*;

#[test]
fn expression_shows_remainder_only_when_needed() {
    assert_eq!(SharingExample::new(12, 3).expression(), "12 ÷ 3 = 4");
    assert_eq!(SharingExample::new(14, 4).expression(), "14 ÷ 4 = 3 R 2");
}

#[test]
fn dealing_is_round_robin() {
    let deal = SharingExample::new(7, 3).deal();
    assert_eq!(deal, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
}

#[test]
fn every_group_gets_the_quotient() {
    for ex in SharingConfig::default().examples {
        let deal = ex.deal();
        for g in 0..ex.groups {
            let got = deal.iter().filter(|(group, _)| *group == g).count() as u32;
            assert_eq!(got, ex.quotient(), "{ex:?}");
        }
        assert_eq!(deal.len() as u32 + ex.remainder(), ex.total);
    }
}

#[test]
fn out_of_range_examples_are_rejected() {
    assert!(SharingExample::new(12, 0).validate().is_err());
    assert!(SharingExample::new(12, MAX_GROUPS + 1).validate().is_err());
    assert!(SharingExample::new(MAX_TOTAL + 1, 3).validate().is_err());
}

#[test]
fn wrong_assessment_answer_is_rejected() {
    let config = SharingConfig {
        assessment_answer: 5,
        ..SharingConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("16 ÷ 4 = 4"), "{err}");
}

#[test]
fn pool_wraps_at_the_row_limit() {
    let l = SharingLesson::new(SharingConfig::default(), SharingStyle::default()).unwrap();
    let pts = l.pool_points(14);
    assert_eq!(pts.len(), 14);
    let top = pts[0].y;
    assert_eq!(pts.iter().filter(|p| p.y == top).count(), 6);
}

#[test]
fn overlapping_tokens_are_rejected() {
    let style = SharingStyle {
        token_spacing: 0.2,
        ..SharingStyle::default()
    };
    assert!(style.validate().is_err());
}
