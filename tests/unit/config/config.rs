use super::*;

#[test]
fn presets_match_their_resolutions() {
    let expected = [
        (Quality::Low, 854, 480, 15),
        (Quality::Medium, 1280, 720, 30),
        (Quality::High, 1920, 1080, 60),
        (Quality::Production, 2560, 1440, 60),
    ];
    for (q, w, h, fps) in expected {
        let cfg = RenderConfig::with_quality(q);
        assert_eq!(cfg.canvas(), Canvas { width: w, height: h });
        assert_eq!(cfg.fps().unwrap(), Fps::new(fps, 1).unwrap());
    }
    assert_eq!(Quality::ALL.len(), 4);
}

#[test]
fn default_is_high_quality_on_black() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.quality, Quality::High);
    assert_eq!(cfg.background_color().unwrap(), Rgba8Premul::opaque(0, 0, 0));
    assert!(cfg.overwrite);
    cfg.validate().unwrap();
}

#[test]
fn json_overrides_apply() {
    let cfg = RenderConfig::from_json_str(
        r##"{"quality": "low", "fps": 24, "width": 320, "background": "#102030"}"##,
    )
    .unwrap();
    assert_eq!(cfg.quality, Quality::Low);
    assert_eq!(cfg.canvas(), Canvas { width: 320, height: 480 });
    assert_eq!(cfg.fps().unwrap().as_f64(), 24.0);
    assert_eq!(
        cfg.background_color().unwrap(),
        Rgba8Premul::opaque(0x10, 0x20, 0x30)
    );
}

#[test]
fn empty_json_is_default() {
    assert_eq!(RenderConfig::from_json_str("{}").unwrap(), RenderConfig::default());
}

#[test]
fn unknown_fields_and_bad_quality_are_serde_errors() {
    let err = RenderConfig::from_json_str(r#"{"qualty": "low"}"#).unwrap_err();
    assert!(matches!(err, BellcurveError::Serde(_)));
    let err = RenderConfig::from_json_str(r#"{"quality": "ultra"}"#).unwrap_err();
    assert!(matches!(err, BellcurveError::Serde(_)));
}

#[test]
fn validation_rejects_zero_and_oversized_values() {
    let err = RenderConfig::from_json_str(r#"{"fps": 0}"#).unwrap_err();
    assert!(err.to_string().contains("fps must be > 0"));

    let err = RenderConfig::from_json_str(r#"{"height": 0}"#).unwrap_err();
    assert!(err.to_string().contains("height must be > 0"));

    let err = RenderConfig::from_json_str(r#"{"width": 70000}"#).unwrap_err();
    assert!(err.to_string().contains("width must be <="));

    let err = RenderConfig::from_json_str(r#"{"background": "blue"}"#).unwrap_err();
    assert!(matches!(err, BellcurveError::Validation(_)));
}

#[test]
fn from_path_reads_file() {
    let dir = std::env::temp_dir().join(format!("bellcurve_config_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("render.json");
    std::fs::write(&path, r#"{"quality": "medium", "overwrite": false}"#).unwrap();

    let cfg = RenderConfig::from_path(&path).unwrap();
    assert_eq!(cfg.quality, Quality::Medium);
    assert!(!cfg.overwrite);

    let missing = RenderConfig::from_path(dir.join("missing.json")).unwrap_err();
    assert!(missing.to_string().contains("open render config"));
    let _ = std::fs::remove_dir_all(&dir);
}
