use super::*;

#[test]
fn missing_font_file_is_font_error() {
    let err = FontRasterizer::from_file("no/such/font.ttf").unwrap_err();
    assert!(matches!(err, MemeError::Font(_)));
}

#[test]
fn garbage_bytes_are_font_error() {
    let err = FontRasterizer::from_bytes(b"not a font".to_vec(), 0, "junk").unwrap_err();
    assert!(matches!(err, MemeError::Font(_)));
}

#[test]
fn explicit_path_skips_discovery() {
    let cfg = FontConfig {
        path: Some("no/such/font.ttf".into()),
        ..FontConfig::default()
    };
    assert!(matches!(
        FontRasterizer::discover(&cfg).unwrap_err(),
        MemeError::Font(_)
    ));
}
