use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SketchError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SketchError::surface("x")
            .to_string()
            .contains("surface error:")
    );
    assert!(SketchError::export("x").to_string().contains("export error:"));
    assert!(
        SketchError::unsupported("x")
            .to_string()
            .contains("unsupported:")
    );
    assert!(
        SketchError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SketchError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
