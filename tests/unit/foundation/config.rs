use super::*;

#[test]
fn default_config_is_valid() {
    let cfg = OverlayConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.reflow_secs(), cfg.attack_secs);
    assert_eq!(cfg.reflow_duration(), Duration::from_secs_f64(0.3));
}

#[test]
fn baseline_sits_above_padding_and_margin() {
    let cfg = OverlayConfig {
        shadow_radius: 3.0,
        extra_line_height: 4.0,
        ..OverlayConfig::default()
    };
    assert_eq!(cfg.baseline_y(600.0), 593.0);
    assert_eq!(cfg.margin(), 3.0);
}

#[test]
fn json_fills_missing_fields_from_defaults() {
    let cfg = OverlayConfig::from_json_str(r#"{ "font_size": 24, "reflow_secs": 0.5 }"#).unwrap();
    assert_eq!(cfg.font_size, 24.0);
    assert_eq!(cfg.lifetime_secs, 8.0);
    assert_eq!(cfg.reflow_secs(), 0.5);
}

#[test]
fn json_rejects_unknown_fields() {
    let err = OverlayConfig::from_json_str(r#"{ "font_sise": 24 }"#).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn phase_ordering_is_enforced() {
    let bad_decay = OverlayConfig {
        decay_secs: 8.0,
        ..OverlayConfig::default()
    };
    assert!(bad_decay.validate().is_err());

    let bad_attack = OverlayConfig {
        attack_secs: 7.5,
        ..OverlayConfig::default()
    };
    assert!(bad_attack.validate().is_err());

    let negative_radius = OverlayConfig {
        shadow_radius: -1.0,
        ..OverlayConfig::default()
    };
    assert!(negative_radius.validate().is_err());

    let zero_reflow = OverlayConfig {
        reflow_secs: Some(0.0),
        ..OverlayConfig::default()
    };
    assert!(zero_reflow.validate().is_err());
}

#[test]
fn zero_shadow_radius_is_allowed() {
    let cfg = OverlayConfig {
        shadow_radius: 0.0,
        ..OverlayConfig::default()
    };
    cfg.validate().unwrap();
}
