use super::*;

#[test]
fn arabic_falls_back_to_english() {
    let both = Bilingual::new("Perimeter", "المحيط");
    assert_eq!(both.pick(Locale::En), "Perimeter");
    assert_eq!(both.pick(Locale::Ar), "المحيط");

    let en = Bilingual::en_only("Lines");
    assert_eq!(en.pick(Locale::Ar), "Lines");
}

#[test]
fn locale_codes_parse_case_insensitively() {
    assert_eq!(Locale::parse("AR"), Some(Locale::Ar));
    assert_eq!(Locale::parse(" en "), Some(Locale::En));
    assert_eq!(Locale::parse("fr"), None);
    assert_eq!(Locale::Ar.code(), "ar");
    assert!(Locale::Ar.is_rtl());
}

#[test]
fn missing_arabic_deserializes() {
    let b: Bilingual = serde_json::from_str(r#"{"en":"Hi"}"#).unwrap();
    assert_eq!(b, Bilingual::en_only("Hi"));
}
