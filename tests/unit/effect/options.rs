use super::*;

#[test]
fn empty_object_gives_defaults() {
    let o = EffectOptions::from_json_str("{}").unwrap();
    assert_eq!(o, EffectOptions::default());
    assert_eq!(o.displacement_scale, 65.0);
    assert_eq!(o.shader_distortion_end, 0.2);
}

#[test]
fn flat_keys_override_defaults_and_unknown_keys_are_ignored() {
    let o = EffectOptions::from_json_str(
        r#"{ "displacementScale": 80, "glassBlur": 12.5, "glassTintHue": 210, "noiseStrength": 0.2 }"#,
    )
    .unwrap();
    assert_eq!(o.displacement_scale, 80.0);
    assert_eq!(o.glass_blur, 12.5);
    assert_eq!(o.aberration_intensity, 2.8);
}

#[test]
fn nested_blocks_override_shader_thresholds() {
    let o = EffectOptions::from_json_str(
        r#"{
            "shaderDistortionStart": 0.9,
            "distortion": { "start": 0.25, "end": 0.05 },
            "scaling": { "end": 0.8 }
        }"#,
    )
    .unwrap();
    assert_eq!(o.shader_distortion_start, 0.25);
    assert_eq!(o.shader_distortion_end, 0.05);
    assert_eq!(o.shader_distortion_offset, 0.15);
    assert_eq!(o.shader_scaling_start, 0.0);
    assert_eq!(o.shader_scaling_end, 0.8);
}

#[test]
fn surface_curvature_is_a_legacy_alias() {
    let o = EffectOptions::from_json_str(
        r#"{ "displacementCurvature": 1.0, "surfaceCurvature": 2.4 }"#,
    )
    .unwrap();
    assert_eq!(o.displacement_curvature, 2.4);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = EffectOptions::from_json_str(r#"{ "displacementScale": "big" }"#).unwrap_err();
    assert!(matches!(err, GlassmapError::Serde(_)));
    let err = EffectOptions::from_path("does/not/exist.json").unwrap_err();
    assert!(matches!(err, GlassmapError::Configuration(_)));
}

#[test]
fn shape_config_maps_shader_fields() {
    let o = EffectOptions {
        shader_corner_radius: 0.1,
        shader_distortion_start: 0.4,
        shader_scaling_end: 0.9,
        ..EffectOptions::default()
    };
    let c = o.shape_config(Size::new(200.6, 80.2));
    assert_eq!((c.width, c.height), (200, 80));
    assert_eq!(c.params.corner_radius, 0.1);
    assert_eq!(c.params.distortion_start, 0.4);
    assert_eq!(c.params.distortion_end, 0.2);
    assert_eq!(c.params.distortion_offset, 0.15);
    assert_eq!(c.params.scaling_end, 0.9);
    assert_eq!(c.params.oversampling, 2);
    assert_eq!(c.params.edge_softness, 2.0);
}
