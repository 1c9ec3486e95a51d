use super::*;

#[test]
fn defaults_match_documented_values() {
    let p = ShapeParams::default();
    assert_eq!(p.corner_radius, 0.2);
    assert_eq!(p.oversampling, 2);
    assert_eq!(p.distortion_start, 0.3);
    assert_eq!(p.distortion_end, 0.0);
    assert_eq!(p.distortion_offset, 0.15);
    assert_eq!((p.scaling_start, p.scaling_end), (0.0, 1.0));
    assert_eq!(p.edge_softness, 2.0);
    assert_eq!(p.center(), Vec2::new(0.5, 0.5));
}

#[test]
fn warp_keeps_center_fixed() {
    let p = ShapeParams::default();
    assert_eq!(p.warp(Vec2::new(0.5, 0.5)), Vec2::new(0.5, 0.5));

    let shifted = ShapeParams {
        center_offset_x: 0.1,
        center_offset_y: -0.2,
        ..ShapeParams::default()
    };
    let c = shifted.center();
    assert_eq!(shifted.warp(c), c);
}

#[test]
fn warp_pulls_samples_towards_center_near_the_middle() {
    // Near the middle the offset SDF is below distortion_end, so the ease saturates
    // at 1 and the scaling ease maps that to 1: no displacement.
    let p = ShapeParams::default();
    let uv = Vec2::new(0.52, 0.5);
    let src = p.warp(uv);
    assert!((src - uv).hypot() < 1e-12);

    // Out by the border the distortion ease is 0, so samples collapse onto the center.
    let corner = p.warp(Vec2::new(0.0, 0.0));
    assert!((corner - p.center()).hypot() < 1e-12);
}

#[test]
fn surface_size_applies_oversampling() {
    let s = ShapeConfig::new(100, 40).surface_size().unwrap();
    assert_eq!((s.width, s.height), (200, 80));
}

#[test]
fn invalid_configs_are_configuration_errors() {
    let err = ShapeConfig::new(0, 10).surface_size().unwrap_err();
    assert!(matches!(err, GlassmapError::Configuration(_)));

    let bad = ShapeConfig::new(10, 10).with_params(ShapeParams {
        corner_radius: f64::NAN,
        ..ShapeParams::default()
    });
    assert!(matches!(
        bad.surface_size().unwrap_err(),
        GlassmapError::Configuration(_)
    ));

    let bad = ShapeConfig::new(10, 10).with_params(ShapeParams {
        oversampling: 0,
        ..ShapeParams::default()
    });
    assert!(bad.surface_size().is_err());
}

#[test]
fn for_element_floors_measured_size() {
    let c = ShapeConfig::for_element(Size::new(320.7, 0.2));
    assert_eq!((c.width, c.height), (320, 1));
    assert_eq!(c.params, ShapeParams::default());
}

#[test]
fn json_fills_defaults_and_accepts_aliases() {
    let c = ShapeConfig::from_json_str(
        r#"{ "width": 64, "height": 32, "cornerRadius": 0.1, "rectWidth": 0.25, "edgeSoftness": 4 }"#,
    )
    .unwrap();
    assert_eq!((c.width, c.height), (64, 32));
    assert_eq!(c.params.corner_radius, 0.1);
    assert_eq!(c.params.inner_half_width, 0.25);
    assert_eq!(c.params.inner_half_height, 0.0);
    assert_eq!(c.params.edge_softness, 4.0);
    assert_eq!(c.params.distortion_start, 0.3);
}

#[test]
fn json_without_size_is_a_serde_error() {
    let err = ShapeConfig::from_json_str(r#"{ "cornerRadius": 0.1 }"#).unwrap_err();
    assert!(matches!(err, GlassmapError::Serde(_)));
}

#[test]
fn json_with_non_positive_size_is_a_configuration_error() {
    for json in [
        r#"{ "width": -4, "height": 10 }"#,
        r#"{ "width": 10, "height": 0 }"#,
        r#"{ "width": 10, "height": 5000000000 }"#,
    ] {
        let err = ShapeConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, GlassmapError::Configuration(_)), "{json}");
    }
}
