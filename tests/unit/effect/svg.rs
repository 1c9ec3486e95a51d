use super::*;
use crate::effect::options::EffectOptions;

fn params() -> FilterParams {
    FilterParams::new(&EffectOptions::default(), 1.0).unwrap()
}

#[test]
fn filter_markup_chains_three_displacement_passes() {
    let size = PixelSize::new(120, 60).unwrap();
    let s = filter_markup("glass-1", "data:image/png;base64,AAAA", size, &params()).unwrap();

    assert!(s.starts_with(r#"<filter id="glass-1""#));
    assert!(s.ends_with("</filter>"));
    assert!(s.contains(r#"width="120" height="60""#));
    assert!(s.contains(r#"xlink:href="data:image/png;base64,AAAA""#));
    assert_eq!(s.matches("<feDisplacementMap").count(), 3);
    for name in ["RED_CHANNEL", "GREEN_CHANNEL", "BLUE_CHANNEL", "EDGE_MASK", "CENTER_CLEAN"] {
        assert!(s.contains(name), "missing {name}");
    }
    assert!(s.contains(r#"tableValues="0 0.1 1""#));
    assert!(s.contains(&format!(
        r#"values="{}" result="EDGE_INTENSITY""#,
        params().edge_intensity.to_svg_values()
    )));
    let p = params();
    assert!(s.contains(&format!(r#"scale="{}""#, p.red_scale)));
    assert!(s.contains(&format!(r#"stdDeviation="{}""#, p.blur)));
}

#[test]
fn filter_markup_rejects_unsafe_ids_and_hrefs() {
    let size = PixelSize::new(10, 10).unwrap();
    for bad in ["", "a b", "x\"y", "<id>"] {
        let err = filter_markup(bad, "map.png", size, &params()).unwrap_err();
        assert!(matches!(err, GlassmapError::Configuration(_)));
    }
    assert!(filter_markup("ok_id", "a\"b", size, &params()).is_err());
}

#[test]
fn preview_document_is_a_standalone_svg() {
    let size = PixelSize::new(32, 16).unwrap();
    let doc = preview_document("backdrop.png", "map.png", size, &params()).unwrap();
    assert!(doc.starts_with("<svg "));
    assert!(doc.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));
    assert!(doc.contains(r#"viewBox="0 0 32 16""#));
    assert!(doc.contains(r#"filter="url(#glass)""#));
    assert!(doc.contains(r#"<filter id="glass""#));
    assert!(preview_document("a&b", "map.png", size, &params()).is_err());
}
