use super::*;

#[test]
fn digits_split_by_place() {
    let d = Digits::of(509).unwrap();
    assert_eq!(d.as_array(), [5, 0, 9]);
    assert_eq!(d.value(), 509);
    assert_eq!(d.expanded(), "5×100 + 0×10 + 9");
}

#[test]
fn thousand_is_out_of_range() {
    assert!(Digits::of(999).is_ok());
    let err = Digits::of(1000).unwrap_err();
    assert!(err.to_string().contains("1000"), "{err}");
}

#[test]
fn config_rejects_numbers_past_999() {
    let mut config = PlaceValueConfig::default();
    config.examples.push(1000);
    assert!(config.validate().is_err());
}

#[test]
fn assessment_must_be_among_the_options() {
    let config = PlaceValueConfig {
        options: vec![243, 324],
        ..PlaceValueConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn zone_blocks_count_each_place() {
    let l = PlaceValueLesson::new(PlaceValueConfig::default(), PlaceValueStyle::default()).unwrap();
    // hundreds and tens are a body plus a grid, units a single square
    assert_eq!(l.zone_blocks(0, 3).unwrap().len(), 6);
    assert_eq!(l.zone_blocks(1, 7).unwrap().len(), 14);
    assert_eq!(l.zone_blocks(2, 5).unwrap().len(), 5);
    assert!(l.zone_blocks(1, 0).unwrap().is_empty());
}

#[test]
fn digit_cards_step_follows_its_toggle() {
    let style = PlaceValueStyle {
        show_digit_cards: false,
        ..PlaceValueStyle::default()
    };
    let l = PlaceValueLesson::new(PlaceValueConfig::default(), style).unwrap();
    let names: Vec<&str> = l.build_steps().iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        [
            "intro",
            "exploration_concrete",
            "collective_discussion",
            "institutionalization_rule",
            "mini_assessment",
            "outro"
        ]
    );
}
