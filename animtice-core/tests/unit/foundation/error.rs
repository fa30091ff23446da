use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TiceError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(TiceError::lesson("x").to_string().contains("lesson error:"));
    assert!(
        TiceError::timeline("x")
            .to_string()
            .contains("timeline error:")
    );
    assert!(TiceError::render("x").to_string().contains("render error:"));
    assert!(TiceError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn json_errors_become_serde_errors() {
    let err: TiceError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, TiceError::Serde(_)));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TiceError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
