use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DanmakuError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(DanmakuError::render("x").to_string().contains("render error:"));
    assert!(
        DanmakuError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn font_errors_name_the_path() {
    let err = DanmakuError::FontOpen {
        path: PathBuf::from("fonts/missing.ttf"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    let msg = err.to_string();
    assert!(msg.contains("fonts/missing.ttf"));
    assert!(msg.contains("gone"));
    assert!(err.is_font_error());

    let err = DanmakuError::FontFormat {
        path: PathBuf::from("fonts/garbage.bin"),
    };
    assert!(err.to_string().contains("fonts/garbage.bin"));
    assert!(err.is_font_error());
    assert!(!DanmakuError::render("x").is_font_error());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DanmakuError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
