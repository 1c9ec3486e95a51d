use super::*;

fn checker(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgba([255, 128, 128, 255])
        } else {
            image::Rgba([0, 64, 64, 255])
        }
    })
}

#[test]
fn png_keeps_dimensions_and_pixels() {
    let img = checker(5, 3);
    let enc = EncodedDisplacementImage::from_rgba(&img).unwrap();
    assert_eq!(enc.size(), PixelSize::new(5, 3).unwrap());
    assert_eq!(&enc.png_bytes()[1..4], b"PNG");

    let back = enc.to_rgba8().unwrap();
    assert_eq!(back.as_raw(), img.as_raw());
}

#[test]
fn data_uri_has_png_prefix_and_parses_back() {
    let enc = EncodedDisplacementImage::from_rgba(&checker(4, 4)).unwrap();
    let uri = enc.data_uri();
    assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));

    let parsed = EncodedDisplacementImage::decode_data_uri(&uri).unwrap();
    assert_eq!(parsed, enc);
}

#[test]
fn decode_data_uri_rejects_other_payloads() {
    assert!(matches!(
        EncodedDisplacementImage::decode_data_uri("data:image/jpeg;base64,AAAA").unwrap_err(),
        GlassmapError::Configuration(_)
    ));
    assert!(matches!(
        EncodedDisplacementImage::decode_data_uri("data:image/png;base64,@@@").unwrap_err(),
        GlassmapError::Other(_)
    ));
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = std::path::PathBuf::from("target").join("png_unit");
    let _ = std::fs::remove_dir_all(&dir);
    let out = dir.join("nested").join("map.png");

    let enc = EncodedDisplacementImage::from_rgba(&checker(2, 2)).unwrap();
    enc.write_png(&out).unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), enc.png_bytes());
}
