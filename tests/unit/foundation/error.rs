use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BellcurveError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        BellcurveError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        BellcurveError::typeset("x")
            .to_string()
            .contains("typeset error:")
    );
    assert!(BellcurveError::render("x").to_string().contains("render error:"));
    assert!(BellcurveError::encode("x").to_string().contains("encode error:"));
    assert!(
        BellcurveError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BellcurveError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
