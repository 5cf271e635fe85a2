use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MemeError::network("x")
            .to_string()
            .contains("network error:")
    );
    assert!(
        MemeError::file_not_found("x")
            .to_string()
            .contains("file not found:")
    );
    assert!(
        MemeError::template_load("x")
            .to_string()
            .contains("template load error:")
    );
    assert!(
        MemeError::model_unavailable("x")
            .to_string()
            .contains("model unavailable:")
    );
    assert!(MemeError::font("x").to_string().contains("font error:"));
    assert!(
        MemeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MemeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
